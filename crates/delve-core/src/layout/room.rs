//! Room kinds, sizing and connection policies, and the room record
//!
//! A room kind is a plain tag; everything that differed between kinds
//! (size bounds, side quotas, size snapping) lives in [`SizePolicy`] and
//! [`ConnectionPolicy`] values that can be overridden from configuration.

use std::collections::BTreeMap;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::door::{DoorId, DoorVariant};
use super::rect::{Point, Rect};
use crate::error::LayoutError;
use crate::{DEFAULT_MAX_SIZE, DEFAULT_MIN_SIZE};

/// Room identifier, an index into its [`RoomGraph`](super::RoomGraph)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub u32);

impl core::fmt::Display for RoomId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Side of a room a connection goes through; `All` means any side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Direction {
    All,
    Left,
    Top,
    Right,
    Bottom,
}

impl Direction {
    /// The four real sides, in classification order
    pub const SIDES: [Direction; 4] = [
        Direction::Left,
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
    ];

    /// Side seen from the other room of a shared wall
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::All => Direction::All,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Top => Direction::Bottom,
            Direction::Bottom => Direction::Top,
        }
    }

    /// Whether the overlap `i` of `room` with another rectangle lies on this side
    pub fn touches(self, room: &Rect, i: &Rect) -> bool {
        match self {
            Direction::All => !i.is_empty(),
            Direction::Left => i.span_x() == 0 && i.left == room.left,
            Direction::Top => i.span_y() == 0 && i.top == room.top,
            Direction::Right => i.span_x() == 0 && i.right == room.right,
            Direction::Bottom => i.span_y() == 0 && i.bottom == room.bottom,
        }
    }

    /// First side of `room` that the overlap `i` lies on
    pub fn classify(room: &Rect, i: &Rect) -> Option<Direction> {
        Self::SIDES.into_iter().find(|side| side.touches(room, i))
    }
}

/// Connection counts per side plus an overall total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Quota {
    pub all: usize,
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
}

impl Quota {
    /// Same count on every side
    pub const fn uniform(all: usize, side: usize) -> Self {
        Self {
            all,
            left: side,
            top: side,
            right: side,
            bottom: side,
        }
    }

    pub const fn get(&self, direction: Direction) -> usize {
        match direction {
            Direction::All => self.all,
            Direction::Left => self.left,
            Direction::Top => self.top,
            Direction::Right => self.right,
            Direction::Bottom => self.bottom,
        }
    }
}

/// Minimum and maximum connections a room accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionPolicy {
    pub max: Quota,
    #[serde(default)]
    pub min: Quota,
}

impl ConnectionPolicy {
    pub fn validate(&self) -> Result<(), LayoutError> {
        for direction in [Direction::All].into_iter().chain(Direction::SIDES) {
            if self.min.get(direction) > self.max.get(direction) {
                return Err(LayoutError::invalid(format!(
                    "min connections exceed max on {direction}"
                )));
            }
        }
        Ok(())
    }
}

/// Size adjustment applied after each random draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
pub enum SizeSnap {
    #[default]
    Any,
    Odd,
    Even,
}

impl SizeSnap {
    fn accepts(self, v: i32) -> bool {
        match self {
            SizeSnap::Any => true,
            SizeSnap::Odd => v % 2 != 0,
            SizeSnap::Even => v % 2 == 0,
        }
    }

    /// Nearest accepted value to `v` inside `[min, max]`, preferring smaller.
    /// Returns `None` when the range holds no accepted value.
    pub fn apply(self, v: i32, min: i32, max: i32) -> Option<i32> {
        if min > max {
            return None;
        }
        let v = v.clamp(min, max);
        [v, v - 1, v + 1]
            .into_iter()
            .find(|&c| c >= min && c <= max && self.accepts(c))
    }
}

/// Width and height bounds of a room kind (inclusive cell counts)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizePolicy {
    pub min_width: i32,
    pub max_width: i32,
    pub min_height: i32,
    pub max_height: i32,
    /// Force width == height
    #[serde(default)]
    pub square: bool,
    #[serde(default)]
    pub snap: SizeSnap,
}

impl SizePolicy {
    pub const fn new(min_width: i32, max_width: i32, min_height: i32, max_height: i32) -> Self {
        Self {
            min_width,
            max_width,
            min_height,
            max_height,
            square: false,
            snap: SizeSnap::Any,
        }
    }

    pub const fn squared(mut self) -> Self {
        self.square = true;
        self
    }

    pub const fn snapped(mut self, snap: SizeSnap) -> Self {
        self.snap = snap;
        self
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        // A room needs at least one interior cell inside its walls
        if self.min_width < 3 || self.min_height < 3 {
            return Err(LayoutError::invalid("rooms must be at least 3x3"));
        }
        if self.min_width > self.max_width || self.min_height > self.max_height {
            return Err(LayoutError::invalid(format!(
                "size bounds inverted: {}..{} x {}..{}",
                self.min_width, self.max_width, self.min_height, self.max_height
            )));
        }
        if self.snap.apply(self.min_width, self.min_width, self.max_width).is_none()
            || self.snap.apply(self.min_height, self.min_height, self.max_height).is_none()
        {
            return Err(LayoutError::invalid(format!("no {} size in bounds", self.snap)));
        }
        if self.square && self.min_width.max(self.min_height) > self.max_width.min(self.max_height) {
            return Err(LayoutError::invalid("square room with disjoint width/height bounds"));
        }
        Ok(())
    }
}

impl Default for SizePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SIZE, DEFAULT_MAX_SIZE, DEFAULT_MIN_SIZE, DEFAULT_MAX_SIZE)
    }
}

/// Room kinds
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
pub enum RoomKind {
    #[default]
    Regular,
    Entrance,
    Exit,
    Boss,
    Secret,
    Treasure,
    Special,
    Connection,
    Shop,
}

impl RoomKind {
    /// Kinds reached through a single locked or hidden door
    pub fn is_locked(self) -> bool {
        matches!(
            self,
            RoomKind::Secret | RoomKind::Treasure | RoomKind::Special | RoomKind::Shop
        )
    }

    pub fn default_size(self) -> SizePolicy {
        match self {
            RoomKind::Regular => SizePolicy::default(),
            RoomKind::Entrance | RoomKind::Exit => SizePolicy::new(5, 10, 5, 10),
            RoomKind::Boss => SizePolicy::new(18, 26, 18, 26).squared(),
            RoomKind::Secret => SizePolicy::new(5, 8, 5, 8),
            RoomKind::Treasure | RoomKind::Special => SizePolicy::new(5, 10, 5, 10),
            RoomKind::Connection => SizePolicy::new(3, 10, 3, 10),
            RoomKind::Shop => SizePolicy::new(11, 15, 9, 13).snapped(SizeSnap::Odd),
        }
    }

    pub fn default_connections(self) -> ConnectionPolicy {
        match self {
            RoomKind::Regular | RoomKind::Entrance | RoomKind::Exit => ConnectionPolicy {
                max: Quota::uniform(16, 4),
                min: Quota::uniform(1, 0),
            },
            RoomKind::Connection => ConnectionPolicy {
                max: Quota::uniform(16, 4),
                min: Quota::uniform(2, 0),
            },
            RoomKind::Boss => ConnectionPolicy {
                max: Quota::uniform(2, 1),
                min: Quota::uniform(1, 0),
            },
            _ if self.is_locked() => ConnectionPolicy {
                max: Quota::uniform(1, 1),
                min: Quota::uniform(1, 0),
            },
            _ => ConnectionPolicy {
                max: Quota::uniform(16, 4),
                min: Quota::uniform(1, 0),
            },
        }
    }
}

/// Notification delivered to room observers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomEvent {
    Connected { other: RoomId, door: DoorId },
    Disconnected { other: RoomId, door: DoorId },
    DoorVariantChanged { door: DoorId, variant: DoorVariant },
}

pub(crate) type Observer = Box<dyn FnMut(&RoomEvent)>;

/// A rectangular room plus its place in the room graph
pub struct Room {
    id: RoomId,
    kind: RoomKind,
    rect: Rect,
    size: SizePolicy,
    quota: ConnectionPolicy,
    pub(crate) neighbours: Vec<RoomId>,
    pub(crate) connections: BTreeMap<RoomId, DoorId>,
    pub(crate) busy: HashSet<Point>,
    observers: Vec<Observer>,
}

impl core::fmt::Debug for Room {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Room")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("rect", &self.rect)
            .field("neighbours", &self.neighbours)
            .field("connections", &self.connections)
            .field("busy", &self.busy.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Room {
    pub(crate) fn new(id: RoomId, kind: RoomKind, size: SizePolicy, quota: ConnectionPolicy) -> Self {
        Self {
            id,
            kind,
            rect: Rect::default(),
            size,
            quota,
            neighbours: Vec::new(),
            connections: BTreeMap::new(),
            busy: HashSet::new(),
            observers: Vec::new(),
        }
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn kind(&self) -> RoomKind {
        self.kind
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn left(&self) -> i32 {
        self.rect.left
    }

    pub fn top(&self) -> i32 {
        self.rect.top
    }

    pub fn right(&self) -> i32 {
        self.rect.right
    }

    pub fn bottom(&self) -> i32 {
        self.rect.bottom
    }

    /// Width in cells, walls included
    pub fn width(&self) -> i32 {
        self.rect.width()
    }

    /// Height in cells, walls included
    pub fn height(&self) -> i32 {
        self.rect.height()
    }

    pub fn size_policy(&self) -> &SizePolicy {
        &self.size
    }

    pub fn connection_policy(&self) -> &ConnectionPolicy {
        &self.quota
    }

    pub fn max_connections(&self, direction: Direction) -> usize {
        self.quota.max.get(direction)
    }

    pub fn min_connections(&self, direction: Direction) -> usize {
        self.quota.min.get(direction)
    }

    pub fn neighbours(&self) -> &[RoomId] {
        &self.neighbours
    }

    pub fn is_neighbour(&self, other: RoomId) -> bool {
        self.neighbours.contains(&other)
    }

    /// Connected rooms and the door to each, ordered by room id
    pub fn connections(&self) -> impl Iterator<Item = (RoomId, DoorId)> + '_ {
        self.connections.iter().map(|(&r, &d)| (r, d))
    }

    pub fn door_to(&self, other: RoomId) -> Option<DoorId> {
        self.connections.get(&other).copied()
    }

    pub fn is_connected(&self, other: RoomId) -> bool {
        self.connections.contains_key(&other)
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn busy_cells(&self) -> &HashSet<Point> {
        &self.busy
    }

    /// Move the room so its top-left corner is at `(x, y)`, keeping its size
    pub fn set_position(&mut self, x: i32, y: i32) {
        let (w, h) = (self.rect.span_x(), self.rect.span_y());
        self.rect = Rect::new(x, y, x + w, y + h);
    }

    /// Resize to `width` x `height` cells, keeping the top-left corner
    pub fn resize(&mut self, width: i32, height: i32) {
        self.rect.right = self.rect.left + width - 1;
        self.rect.bottom = self.rect.top + height - 1;
    }

    /// Whether `p` may hold a door: on exactly one of the vertical or
    /// horizontal borders, so corners never qualify
    pub fn can_connect_at(&self, p: Point) -> bool {
        let on_vertical = p.x == self.rect.left || p.x == self.rect.right;
        let on_horizontal = p.y == self.rect.top || p.y == self.rect.bottom;
        on_vertical != on_horizontal
    }

    /// Geometric center
    pub fn center(&self) -> (f32, f32) {
        (
            self.rect.left as f32 + self.width() as f32 / 2.0,
            self.rect.top as f32 + self.height() as f32 / 2.0,
        )
    }

    /// One-cell anchor at the integer center
    pub fn center_rect(&self) -> Rect {
        Rect::at(Point::new(
            self.rect.left + self.width() / 2,
            self.rect.top + self.height() / 2,
        ))
    }

    /// Interior cells accepted by `pred`, column by column
    pub fn placeable_points(&self, mut pred: impl FnMut(Point) -> bool) -> Vec<Point> {
        let mut points = Vec::new();
        for x in self.rect.left + 1..self.rect.right {
            for y in self.rect.top + 1..self.rect.bottom {
                let p = Point::new(x, y);
                if pred(p) {
                    points.push(p);
                }
            }
        }
        points
    }

    pub(crate) fn add_observer(&mut self, observer: Observer) {
        self.observers.push(observer);
    }

    pub(crate) fn notify(&mut self, event: RoomEvent) {
        for observer in &mut self.observers {
            observer(&event);
        }
    }
}
