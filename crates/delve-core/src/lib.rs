//! delve-core: room layout core for procedural dungeon levels
//!
//! Decides which rectangular rooms are neighbours, which of them get a
//! door, how big each room is, and where tunnels run from the doors to a
//! hub inside the room. Painting tiles, populating rooms and scattering
//! rooms over a level are left to the caller.
//!
//! All state for one level lives in a [`layout::RoomGraph`]; all randomness
//! comes from a caller-supplied [`RandomSource`], so a seeded [`GameRng`]
//! regenerates the same layout.

pub mod layout;

mod consts;
mod error;
mod rng;

pub use consts::*;
pub use error::{LayoutError, RejectReason};
pub use rng::{GameRng, RandomSource};
