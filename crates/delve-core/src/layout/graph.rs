//! Room adjacency and connection graph
//!
//! [`RoomGraph`] owns every room and door of one level. All relations are
//! symmetric: a neighbour or connection is recorded on both rooms before
//! any call returns, and [`RoomGraph::clear`] removes both sides.
//!
//! Two rooms are neighbours when their rectangles overlap on a wall of
//! span at least 2. They are connected when a door links them, which also
//! needs a legal door spot on that wall and quota on both sides.

use std::collections::BTreeMap;

use log::{debug, trace, warn};

use super::cell::{Painter, TileQuery};
use super::config::LayoutConfig;
use super::door::{Door, DoorId, DoorVariant};
use super::rect::{Point, Rect};
use super::room::{ConnectionPolicy, Direction, Room, RoomEvent, RoomId, RoomKind, SizePolicy};
use super::sampler;
use super::sizing;
use super::tunnel::{self, RouteOptions, TunnelPath};
use crate::error::{LayoutError, RejectReason};
use crate::rng::RandomSource;

/// Rooms and doors of one level
#[derive(Debug, Default)]
pub struct RoomGraph {
    config: LayoutConfig,
    rooms: Vec<Room>,
    doors: BTreeMap<DoorId, Door>,
    next_door: u32,
}

impl RoomGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Add an empty room using the configured policies for `kind`
    pub fn add_room(&mut self, kind: RoomKind) -> RoomId {
        let size = self.config.size_policy(kind);
        let connections = self.config.connection_policy(kind);
        self.push_room(kind, size, connections)
    }

    /// Add an empty room with explicit policies
    pub fn add_room_with(
        &mut self,
        kind: RoomKind,
        size: SizePolicy,
        connections: ConnectionPolicy,
    ) -> Result<RoomId, LayoutError> {
        size.validate()?;
        connections.validate()?;
        Ok(self.push_room(kind, size, connections))
    }

    fn push_room(&mut self, kind: RoomKind, size: SizePolicy, connections: ConnectionPolicy) -> RoomId {
        let id = RoomId(self.rooms.len() as u32);
        self.rooms.push(Room::new(id, kind, size, connections));
        id
    }

    pub fn room(&self, id: RoomId) -> Result<&Room, LayoutError> {
        self.rooms.get(id.0 as usize).ok_or(LayoutError::UnknownRoom(id))
    }

    pub fn room_mut(&mut self, id: RoomId) -> Result<&mut Room, LayoutError> {
        self.rooms.get_mut(id.0 as usize).ok_or(LayoutError::UnknownRoom(id))
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn door(&self, id: DoorId) -> Option<&Door> {
        self.doors.get(&id)
    }

    pub fn doors(&self) -> impl Iterator<Item = &Door> {
        self.doors.values()
    }

    /// Register a callback for changes to `room`'s connections and doors
    pub fn observe(
        &mut self,
        room: RoomId,
        observer: impl FnMut(&RoomEvent) + 'static,
    ) -> Result<(), LayoutError> {
        self.room_mut(room)?.add_observer(Box::new(observer));
        Ok(())
    }

    /// Rooms geometrically adjacent to `room`
    pub fn neighbours(&self, room: RoomId) -> Result<&[RoomId], LayoutError> {
        Ok(self.room(room)?.neighbours())
    }

    /// Connected rooms of `room` and the door to each
    pub fn connections(&self, room: RoomId) -> Result<Vec<(RoomId, DoorId)>, LayoutError> {
        Ok(self.room(room)?.connections().collect())
    }

    /// Number of connections leaving `room` through `direction`
    pub fn current_connections(&self, room: RoomId, direction: Direction) -> usize {
        let Ok(r) = self.room(room) else {
            return 0;
        };
        if direction == Direction::All {
            return r.connection_count();
        }

        r.connections()
            .filter_map(|(other, _)| self.room(other).ok())
            .filter(|other| direction.touches(r.rect(), &r.rect().intersect(other.rect())))
            .count()
    }

    /// Connections still allowed through `direction`; zero once the
    /// overall maximum is reached
    pub fn last_connections(&self, room: RoomId, direction: Direction) -> usize {
        let Ok(r) = self.room(room) else {
            return 0;
        };
        if self.current_connections(room, Direction::All) >= r.max_connections(Direction::All) {
            return 0;
        }
        r.max_connections(direction)
            .saturating_sub(self.current_connections(room, direction))
    }

    /// Whether `room` can take another connection through `direction`
    pub fn can_connect(&self, room: RoomId, direction: Direction) -> bool {
        self.last_connections(room, direction) > 0
    }

    /// Whether `p` is a legal door spot on `room`'s wall
    pub fn can_connect_at(&self, room: RoomId, p: Point) -> bool {
        self.room(room).is_ok_and(|r| r.can_connect_at(p))
    }

    /// Whether a door could join `a` and `b` right now
    pub fn can_connect_pair(&self, a: RoomId, b: RoomId) -> bool {
        self.check_pair(a, b).is_ok()
    }

    fn check_pair(&self, a: RoomId, b: RoomId) -> Result<Direction, LayoutError> {
        if a == b {
            return Err(RejectReason::SameRoom.into());
        }
        let ra = self.room(a)?;
        let rb = self.room(b)?;
        let i = ra.rect().intersect(rb.rect());

        let found = i
            .border_points()
            .into_iter()
            .any(|p| ra.can_connect_at(p) && rb.can_connect_at(p));
        if !found {
            return Err(RejectReason::NoSharedPoint.into());
        }

        let side = Direction::classify(ra.rect(), &i).ok_or(RejectReason::NoSharedPoint)?;
        if !self.can_connect(a, side) {
            return Err(RejectReason::QuotaExhausted(side).into());
        }
        if !self.can_connect(b, side.opposite()) {
            return Err(RejectReason::QuotaExhausted(side.opposite()).into());
        }
        Ok(side)
    }

    /// Every connection quota minimum of `room` is met
    pub fn has_min_connections(&self, room: RoomId) -> bool {
        let Ok(r) = self.room(room) else {
            return false;
        };
        [Direction::All]
            .into_iter()
            .chain(Direction::SIDES)
            .all(|d| self.current_connections(room, d) >= r.min_connections(d))
    }

    /// A uniformly chosen neighbour of `room`
    pub fn random_neighbour<R: RandomSource + ?Sized>(&self, room: RoomId, rng: &mut R) -> Option<RoomId> {
        let neighbours = self.room(room).ok()?.neighbours();
        if neighbours.is_empty() {
            return None;
        }
        Some(neighbours[rng.int(0, neighbours.len() as i32) as usize])
    }

    /// Positions of `room`'s doors, ordered by connected room id.
    ///
    /// Fails if any door has not been placed yet.
    pub fn door_positions(&self, room: RoomId) -> Result<Vec<Point>, LayoutError> {
        self.room(room)?
            .connections()
            .map(|(_, door)| {
                self.doors
                    .get(&door)
                    .and_then(|d| d.position)
                    .ok_or(LayoutError::DoorNotPlaced { door })
            })
            .collect()
    }

    /// Record `a` and `b` as neighbours; true when they are afterwards
    pub fn establish_neighbour(&mut self, a: RoomId, b: RoomId) -> bool {
        self.try_establish_neighbour(a, b).is_ok()
    }

    pub fn try_establish_neighbour(&mut self, a: RoomId, b: RoomId) -> Result<(), LayoutError> {
        if a == b {
            return Err(RejectReason::SameRoom.into());
        }
        let ra = self.room(a)?;
        let rb = self.room(b)?;
        if ra.is_neighbour(b) {
            return Ok(());
        }

        let i = ra.rect().intersect(rb.rect());
        let shared_wall = (i.span_x() == 0 && i.span_y() >= 2) || (i.span_y() == 0 && i.span_x() >= 2);
        if !shared_wall {
            trace!("rooms {a} and {b} share no wall ({i:?})");
            return Err(RejectReason::NoSharedWall.into());
        }

        self.rooms[a.0 as usize].neighbours.push(b);
        self.rooms[b.0 as usize].neighbours.push(a);
        trace!("rooms {a} and {b} are neighbours");
        Ok(())
    }

    /// Join `a` and `b` with a new door; false if refused or already joined
    pub fn connect(&mut self, a: RoomId, b: RoomId) -> bool {
        self.try_connect(a, b).is_ok()
    }

    pub fn try_connect(&mut self, a: RoomId, b: RoomId) -> Result<DoorId, LayoutError> {
        if !self.room(a)?.is_neighbour(b) && self.try_establish_neighbour(a, b).is_err() {
            return Err(RejectReason::NotNeighbours.into());
        }
        if self.room(a)?.is_connected(b) {
            return Err(RejectReason::AlreadyConnected.into());
        }
        let side = self.check_pair(a, b).inspect_err(|e| debug!("connect {a} -> {b}: {e}"))?;

        let id = DoorId(self.next_door);
        self.next_door += 1;
        self.doors.insert(id, Door::new(id, a, b));

        let ra = &mut self.rooms[a.0 as usize];
        ra.connections.insert(b, id);
        let rb = &mut self.rooms[b.0 as usize];
        rb.connections.insert(a, id);

        self.rooms[a.0 as usize].notify(RoomEvent::Connected { other: b, door: id });
        self.rooms[b.0 as usize].notify(RoomEvent::Connected { other: a, door: id });
        debug!("connected {a} -> {b} through {side} with door {id}");
        Ok(id)
    }

    /// Unlink `room` from every neighbour and connection on both sides,
    /// drop its doors and forget its busy cells
    pub fn clear(&mut self, room: RoomId) -> Result<(), LayoutError> {
        let r = self.room_mut(room)?;
        let neighbours = std::mem::take(&mut r.neighbours);
        let connections = std::mem::take(&mut r.connections);
        r.busy.clear();

        for other in neighbours {
            if let Some(o) = self.rooms.get_mut(other.0 as usize) {
                o.neighbours.retain(|&n| n != room);
            }
        }

        for (other, door) in connections {
            self.doors.remove(&door);
            if let Some(o) = self.rooms.get_mut(other.0 as usize) {
                o.connections.remove(&room);
                o.notify(RoomEvent::Disconnected { other: room, door });
            }
            self.rooms[room.0 as usize].notify(RoomEvent::Disconnected { other, door });
        }
        debug!("cleared room {room}");
        Ok(())
    }

    /// Give every unplaced door a random spot on its shared wall that both
    /// rooms accept. Returns how many doors were placed.
    pub fn place_doors<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> usize {
        let pending: Vec<(DoorId, [RoomId; 2])> = self
            .doors
            .values()
            .filter(|d| !d.is_placed())
            .map(|d| (d.id(), d.rooms()))
            .collect();

        let mut placed = 0;
        for (id, [a, b]) in pending {
            let (Ok(ra), Ok(rb)) = (self.room(a), self.room(b)) else {
                continue;
            };
            let candidates: Vec<Point> = ra
                .rect()
                .intersect(rb.rect())
                .border_points()
                .into_iter()
                .filter(|&p| ra.can_connect_at(p) && rb.can_connect_at(p))
                .collect();

            if candidates.is_empty() {
                warn!("door {id} between {a} and {b} has no legal spot");
                continue;
            }

            let p = candidates[rng.int(0, candidates.len() as i32) as usize];
            if let Some(door) = self.doors.get_mut(&id) {
                door.position = Some(p);
                placed += 1;
            }
        }
        placed
    }

    /// Pin a door to an explicit position
    pub fn set_door_position(&mut self, door: DoorId, p: Point) -> bool {
        match self.doors.get_mut(&door) {
            Some(d) => {
                d.position = Some(p);
                true
            }
            None => false,
        }
    }

    /// Change a door's variant and notify both rooms
    pub fn set_door_variant(&mut self, door: DoorId, variant: DoorVariant) -> bool {
        let Some(d) = self.doors.get_mut(&door) else {
            return false;
        };
        d.variant = variant;
        let rooms = d.rooms();
        for room in rooms {
            if let Some(r) = self.rooms.get_mut(room.0 as usize) {
                r.notify(RoomEvent::DoorVariantChanged { door, variant });
            }
        }
        true
    }

    /// Default painting hook: every door of `room` becomes a regular door
    pub fn finalize_doors(&mut self, room: RoomId) -> Result<(), LayoutError> {
        let doors: Vec<DoorId> = self.room(room)?.connections().map(|(_, d)| d).collect();
        for door in doors {
            self.set_door_variant(door, DoorVariant::Regular);
        }
        Ok(())
    }

    pub fn negotiate<R: RandomSource + ?Sized>(&mut self, room: RoomId, rng: &mut R) -> bool {
        self.try_negotiate(room, rng).is_ok()
    }

    pub fn try_negotiate<R: RandomSource + ?Sized>(
        &mut self,
        room: RoomId,
        rng: &mut R,
    ) -> Result<(i32, i32), LayoutError> {
        sizing::negotiate(self.room_mut(room)?, rng)
    }

    pub fn negotiate_with_ceiling<R: RandomSource + ?Sized>(
        &mut self,
        room: RoomId,
        max_w: i32,
        max_h: i32,
        rng: &mut R,
    ) -> bool {
        self.try_negotiate_with_ceiling(room, max_w, max_h, rng).is_ok()
    }

    pub fn try_negotiate_with_ceiling<R: RandomSource + ?Sized>(
        &mut self,
        room: RoomId,
        max_w: i32,
        max_h: i32,
        rng: &mut R,
    ) -> Result<(i32, i32), LayoutError> {
        sizing::negotiate_with_ceiling(self.room_mut(room)?, max_w, max_h, rng)
    }

    pub fn random_free_cell<T, R>(&self, room: RoomId, tiles: &T, rng: &mut R) -> Result<Point, LayoutError>
    where
        T: TileQuery + ?Sized,
        R: RandomSource + ?Sized,
    {
        sampler::random_free_cell(self.room(room)?, tiles, rng)
    }

    pub fn random_cell_near_wall<T, R>(
        &mut self,
        room: RoomId,
        tiles: &T,
        rng: &mut R,
    ) -> Result<Point, LayoutError>
    where
        T: TileQuery + ?Sized,
        R: RandomSource + ?Sized,
    {
        let doors = self.door_positions(room)?;
        sampler::random_cell_near_wall(self.room_mut(room)?, &doors, tiles, rng)
    }

    pub fn random_door_free_cell<T, R>(
        &self,
        room: RoomId,
        tiles: &T,
        rng: &mut R,
    ) -> Result<Point, LayoutError>
    where
        T: TileQuery + ?Sized,
        R: RandomSource + ?Sized,
    {
        let doors = self.door_positions(room)?;
        sampler::random_door_free_cell(self.room(room)?, &doors, tiles, rng)
    }

    pub fn door_center<R: RandomSource + ?Sized>(&self, room: RoomId, rng: &mut R) -> Result<Point, LayoutError> {
        let doors = self.door_positions(room)?;
        tunnel::door_center(self.room(room)?, &doors, rng)
    }

    /// Zero-size rectangle at the door center
    pub fn connection_space<R: RandomSource + ?Sized>(&self, room: RoomId, rng: &mut R) -> Result<Rect, LayoutError> {
        self.door_center(room, rng).map(Rect::at)
    }

    pub fn route<P, R>(
        &self,
        room: RoomId,
        painter: &mut P,
        floor: &P::Material,
        anchor: Option<Rect>,
        options: RouteOptions,
        rng: &mut R,
    ) -> Result<Vec<TunnelPath>, LayoutError>
    where
        P: Painter + ?Sized,
        R: RandomSource + ?Sized,
    {
        let doors = self.door_positions(room)?;
        tunnel::route(self.room(room)?, &doors, painter, floor, anchor, options, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Quota;
    use crate::rng::GameRng;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn place(graph: &mut RoomGraph, kind: RoomKind, left: i32, top: i32, w: i32, h: i32) -> RoomId {
        let id = graph.add_room(kind);
        let room = graph.room_mut(id).unwrap();
        room.set_position(left, top);
        room.resize(w, h);
        id
    }

    /// Two 10x10 rooms sharing the vertical wall at x = 9
    fn side_by_side() -> (RoomGraph, RoomId, RoomId) {
        let mut graph = RoomGraph::new();
        let a = place(&mut graph, RoomKind::Regular, 0, 0, 10, 10);
        let b = place(&mut graph, RoomKind::Regular, 9, 0, 10, 10);
        (graph, a, b)
    }

    #[test]
    fn test_establish_neighbour_symmetric() {
        let (mut graph, a, b) = side_by_side();
        assert!(graph.establish_neighbour(a, b));
        assert_eq!(graph.neighbours(a).unwrap(), &[b]);
        assert_eq!(graph.neighbours(b).unwrap(), &[a]);
    }

    #[test]
    fn test_establish_neighbour_idempotent() {
        let (mut graph, a, b) = side_by_side();
        assert!(graph.establish_neighbour(a, b));
        assert!(graph.establish_neighbour(a, b));
        assert!(graph.establish_neighbour(b, a));
        assert_eq!(graph.neighbours(a).unwrap().len(), 1);
        assert_eq!(graph.neighbours(b).unwrap().len(), 1);
    }

    #[test]
    fn test_corner_touch_is_not_neighbour() {
        let mut graph = RoomGraph::new();
        let a = place(&mut graph, RoomKind::Regular, 0, 0, 10, 10);
        let b = place(&mut graph, RoomKind::Regular, 9, 9, 10, 10);
        assert!(!graph.establish_neighbour(a, b));
        assert!(graph.neighbours(a).unwrap().is_empty());
        assert!(!graph.connect(a, b));
    }

    #[test]
    fn test_short_wall_is_not_neighbour() {
        let mut graph = RoomGraph::new();
        let a = place(&mut graph, RoomKind::Regular, 0, 0, 10, 10);
        // Shares x = 9, y in 8..=9: span 1
        let b = place(&mut graph, RoomKind::Regular, 9, 8, 10, 10);
        let err = graph.try_establish_neighbour(a, b).unwrap_err();
        assert!(matches!(err, LayoutError::ConnectionRejected(RejectReason::NoSharedWall)));
    }

    #[test]
    fn test_self_connection_rejected() {
        let (mut graph, a, _) = side_by_side();
        assert!(!graph.establish_neighbour(a, a));
        assert!(!graph.connect(a, a));
    }

    #[test]
    fn test_connect_side_by_side() {
        let (mut graph, a, b) = side_by_side();
        let door = graph.try_connect(a, b).unwrap();
        assert_eq!(graph.room(a).unwrap().door_to(b), Some(door));
        assert_eq!(graph.room(b).unwrap().door_to(a), Some(door));
        assert_eq!(graph.current_connections(a, Direction::Right), 1);
        assert_eq!(graph.current_connections(b, Direction::Left), 1);
        assert_eq!(graph.current_connections(a, Direction::Left), 0);
        assert_eq!(graph.current_connections(a, Direction::All), 1);
    }

    #[test]
    fn test_connect_twice_fails() {
        let (mut graph, a, b) = side_by_side();
        assert!(graph.connect(a, b));
        let err = graph.try_connect(b, a).unwrap_err();
        assert!(matches!(err, LayoutError::ConnectionRejected(RejectReason::AlreadyConnected)));
        assert_eq!(graph.doors().count(), 1);
    }

    #[test]
    fn test_vertical_stack_directions() {
        let mut graph = RoomGraph::new();
        let top = place(&mut graph, RoomKind::Regular, 0, 0, 10, 10);
        let bottom = place(&mut graph, RoomKind::Regular, 2, 9, 6, 8);
        assert!(graph.connect(top, bottom));
        assert_eq!(graph.current_connections(top, Direction::Bottom), 1);
        assert_eq!(graph.current_connections(bottom, Direction::Top), 1);
    }

    #[test]
    fn test_quota_checks_opposite_side() {
        let mut graph = RoomGraph::new();
        let one_right = ConnectionPolicy {
            max: Quota { all: 4, left: 0, top: 0, right: 1, bottom: 0 },
            min: Quota::default(),
        };
        let a = graph
            .add_room_with(RoomKind::Regular, SizePolicy::default(), one_right)
            .unwrap();
        let b = place(&mut graph, RoomKind::Regular, 9, 0, 10, 10);
        let c = place(&mut graph, RoomKind::Regular, 9, 9, 10, 10);
        let room = graph.room_mut(a).unwrap();
        room.resize(10, 19);

        assert!(graph.connect(a, b));
        // Right side of a is used up
        let err = graph.try_connect(a, c).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::ConnectionRejected(RejectReason::QuotaExhausted(Direction::Right))
        ));
        assert!(graph.current_connections(a, Direction::Right) <= 1);
        // Neighbour relation stays even though the door was refused
        assert!(graph.room(a).unwrap().is_neighbour(c));
    }

    #[test]
    fn test_total_quota() {
        let mut graph = RoomGraph::new();
        let a = place(&mut graph, RoomKind::Secret, 0, 0, 8, 8);
        let b = place(&mut graph, RoomKind::Regular, 7, 0, 10, 10);
        let c = place(&mut graph, RoomKind::Regular, -9, 0, 10, 10);
        assert!(graph.connect(a, b));
        assert!(!graph.can_connect(a, Direction::Left));
        assert!(!graph.connect(a, c));
        assert_eq!(graph.last_connections(a, Direction::Left), 0);
    }

    #[test]
    fn test_clear_is_symmetric() {
        let mut graph = RoomGraph::new();
        let a = place(&mut graph, RoomKind::Regular, 0, 0, 10, 10);
        let b = place(&mut graph, RoomKind::Regular, 9, 0, 10, 10);
        let c = place(&mut graph, RoomKind::Regular, 0, 9, 10, 10);
        assert!(graph.connect(a, b));
        assert!(graph.connect(a, c));
        // b and c only touch at a corner
        assert!(!graph.establish_neighbour(b, c));

        graph.clear(a).unwrap();
        assert!(graph.neighbours(a).unwrap().is_empty());
        assert_eq!(graph.current_connections(a, Direction::All), 0);
        assert!(!graph.room(b).unwrap().is_neighbour(a));
        assert!(!graph.room(b).unwrap().is_connected(a));
        assert!(!graph.room(c).unwrap().is_neighbour(a));
        assert!(graph.doors().all(|d| d.other(a).is_none()));
    }

    #[test]
    fn test_clear_forgets_busy_cells() {
        let (mut graph, a, _) = side_by_side();
        graph.room_mut(a).unwrap().busy.insert(Point::new(3, 3));
        graph.clear(a).unwrap();
        assert!(graph.room(a).unwrap().busy_cells().is_empty());
    }

    #[test]
    fn test_place_doors_on_shared_wall() {
        let (mut graph, a, b) = side_by_side();
        let door = graph.try_connect(a, b).unwrap();
        let mut rng = GameRng::new(42);
        assert_eq!(graph.place_doors(&mut rng), 1);
        let p = graph.door(door).unwrap().position.unwrap();
        assert_eq!(p.x, 9);
        assert!((1..=8).contains(&p.y));
        // Already placed doors are left alone
        assert_eq!(graph.place_doors(&mut rng), 0);
    }

    #[test]
    fn test_door_positions_need_placement() {
        let (mut graph, a, b) = side_by_side();
        let door = graph.try_connect(a, b).unwrap();
        let err = graph.door_positions(a).unwrap_err();
        assert!(matches!(err, LayoutError::DoorNotPlaced { door: d } if d == door));
    }

    #[test]
    fn test_observers_see_lifecycle() {
        let (mut graph, a, b) = side_by_side();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        graph.observe(b, move |e| sink.borrow_mut().push(*e)).unwrap();

        let door = graph.try_connect(a, b).unwrap();
        graph.finalize_doors(a).unwrap();
        graph.clear(a).unwrap();

        assert_eq!(
            *events.borrow(),
            vec![
                RoomEvent::Connected { other: a, door },
                RoomEvent::DoorVariantChanged { door, variant: DoorVariant::Regular },
                RoomEvent::Disconnected { other: a, door },
            ]
        );
    }

    #[test]
    fn test_has_min_connections() {
        let (mut graph, a, b) = side_by_side();
        assert!(!graph.has_min_connections(a));
        assert!(graph.connect(a, b));
        assert!(graph.has_min_connections(a));
    }

    #[test]
    fn test_random_neighbour() {
        let (mut graph, a, b) = side_by_side();
        let mut rng = GameRng::new(1);
        assert_eq!(graph.random_neighbour(a, &mut rng), None);
        graph.establish_neighbour(a, b);
        assert_eq!(graph.random_neighbour(a, &mut rng), Some(b));
    }

    #[test]
    fn test_unknown_room() {
        let mut graph = RoomGraph::new();
        let err = graph.clear(RoomId(5)).unwrap_err();
        assert!(matches!(err, LayoutError::UnknownRoom(RoomId(5))));
        assert_eq!(graph.current_connections(RoomId(5), Direction::All), 0);
    }

    #[test]
    fn test_add_room_with_rejects_bad_policy() {
        let mut graph = RoomGraph::new();
        let res = graph.add_room_with(
            RoomKind::Regular,
            SizePolicy::new(12, 10, 10, 12),
            RoomKind::Regular.default_connections(),
        );
        assert!(matches!(res, Err(LayoutError::InvalidConfiguration { .. })));
        assert!(graph.is_empty());
    }

    #[test]
    fn test_configured_kinds() {
        let mut config = LayoutConfig::default();
        config.set_size(RoomKind::Regular, SizePolicy::new(4, 5, 4, 5));
        let mut graph = RoomGraph::with_config(config);
        let id = graph.add_room(RoomKind::Regular);
        let mut rng = GameRng::new(3);
        let (w, h) = graph.try_negotiate(id, &mut rng).unwrap();
        assert!((4..=5).contains(&w) && (4..=5).contains(&h));
    }
}
