//! Layout errors
//!
//! Nothing here is fatal: every variant describes a local failure that the
//! layout driver recovers from by retrying with different randomness or a
//! different room arrangement.

use strum::Display;
use thiserror::Error;

use crate::layout::{Direction, DoorId, RoomId};

/// Why a neighbour or connection request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RejectReason {
    /// A room cannot be linked to itself
    SameRoom,
    /// The rooms do not share a wall segment of at least two cells
    NoSharedWall,
    /// The rooms are not neighbours
    NotNeighbours,
    /// A door already links the pair
    AlreadyConnected,
    /// No point of the shared wall is a legal door spot for both rooms
    NoSharedPoint,
    /// One of the rooms has no quota left on the named side
    QuotaExhausted(Direction),
}

/// Layout errors
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("connection rejected: {0}")]
    ConnectionRejected(RejectReason),

    #[error("sampling exhausted after {attempts} attempts")]
    SamplingExhausted { attempts: usize },

    #[error("room {room} has no connections to route from")]
    RoutingPrecondition { room: RoomId },

    #[error("door {door} has no position yet")]
    DoorNotPlaced { door: DoorId },

    #[error("unknown room {0}")]
    UnknownRoom(RoomId),

    #[error("configuration parse error: {0}")]
    Config(#[from] serde_json::Error),
}

impl LayoutError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        LayoutError::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

impl From<RejectReason> for LayoutError {
    fn from(reason: RejectReason) -> Self {
        LayoutError::ConnectionRejected(reason)
    }
}
