//! Room layout
//!
//! Rectangle math, the room adjacency graph, cell sampling, tunnel routing
//! and room sizing.

mod cell;
mod config;
mod door;
mod graph;
mod rect;
mod room;
pub mod sampler;
pub mod sizing;
pub mod tunnel;

pub use cell::{Painter, Tile, TileFlags, TileGrid, TileQuery};
pub use config::{KindPolicy, LayoutConfig};
pub use door::{Door, DoorId, DoorVariant};
pub use graph::RoomGraph;
pub use rect::{Point, Rect};
pub use room::{
    ConnectionPolicy, Direction, Quota, Room, RoomEvent, RoomId, RoomKind, SizePolicy, SizeSnap,
};
pub use tunnel::{RouteOptions, TunnelPath};
