//! Per-kind policy configuration
//!
//! ```json
//! { "kinds": { "Shop": { "size": { "min_width": 9, "max_width": 13,
//!                                  "min_height": 9, "max_height": 11,
//!                                  "snap": "Odd" } } } }
//! ```
//!
//! Kinds missing from the map, or fields missing from an entry, keep the
//! defaults from [`RoomKind`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::room::{ConnectionPolicy, RoomKind, SizePolicy};
use crate::error::LayoutError;

/// Overrides for one room kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindPolicy {
    #[serde(default)]
    pub size: Option<SizePolicy>,
    #[serde(default)]
    pub connections: Option<ConnectionPolicy>,
}

/// Layout configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    pub kinds: BTreeMap<RoomKind, KindPolicy>,
}

impl LayoutConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        let config: LayoutConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every override for inconsistent bounds
    pub fn validate(&self) -> Result<(), LayoutError> {
        for (kind, policy) in &self.kinds {
            if let Some(size) = &policy.size {
                size.validate().map_err(|e| LayoutError::invalid(format!("{kind}: {e}")))?;
            }
            if let Some(connections) = &policy.connections {
                connections
                    .validate()
                    .map_err(|e| LayoutError::invalid(format!("{kind}: {e}")))?;
            }
        }
        Ok(())
    }

    pub fn size_policy(&self, kind: RoomKind) -> SizePolicy {
        self.kinds
            .get(&kind)
            .and_then(|p| p.size)
            .unwrap_or_else(|| kind.default_size())
    }

    pub fn connection_policy(&self, kind: RoomKind) -> ConnectionPolicy {
        self.kinds
            .get(&kind)
            .and_then(|p| p.connections)
            .unwrap_or_else(|| kind.default_connections())
    }

    pub fn set_size(&mut self, kind: RoomKind, size: SizePolicy) {
        self.kinds.entry(kind).or_default().size = Some(size);
    }

    pub fn set_connections(&mut self, kind: RoomKind, connections: ConnectionPolicy) {
        self.kinds.entry(kind).or_default().connections = Some(connections);
    }
}
