//! Door placeholders binding two connected rooms

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::rect::Point;
use super::room::RoomId;

/// Door identifier, unique within one [`RoomGraph`](super::RoomGraph)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DoorId(pub u32);

impl core::fmt::Display for DoorId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Door category; starts as `Empty` and is decided by painting
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum DoorVariant {
    #[default]
    Empty,
    Regular,
    Tunnel,
    Locked,
    Secret,
    Hidden,
    Enemy,
}

/// A passage between two neighbouring rooms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    id: DoorId,
    rooms: [RoomId; 2],
    /// Grid position, assigned once the shared wall is known
    pub position: Option<Point>,
    pub variant: DoorVariant,
}

impl Door {
    pub(crate) fn new(id: DoorId, a: RoomId, b: RoomId) -> Self {
        Self {
            id,
            rooms: [a, b],
            position: None,
            variant: DoorVariant::Empty,
        }
    }

    pub fn id(&self) -> DoorId {
        self.id
    }

    /// The two rooms this door links, in connection order
    pub fn rooms(&self) -> [RoomId; 2] {
        self.rooms
    }

    /// The room on the other side of `room`
    pub fn other(&self, room: RoomId) -> Option<RoomId> {
        match self.rooms {
            [a, b] if a == room => Some(b),
            [a, b] if b == room => Some(a),
            _ => None,
        }
    }

    pub fn is_placed(&self) -> bool {
        self.position.is_some()
    }
}
