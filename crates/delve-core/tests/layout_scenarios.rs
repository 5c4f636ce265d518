//! End-to-end layout scenarios: connect, place doors, size, sample, route

use delve_core::layout::{
    Direction, DoorVariant, Point, Rect, RoomGraph, RoomId, RoomKind, RouteOptions, Tile, TileGrid,
    TileQuery,
};
use delve_core::{GameRng, LayoutError, DOOR_CLEARANCE};

fn place(graph: &mut RoomGraph, kind: RoomKind, left: i32, top: i32, w: i32, h: i32) -> RoomId {
    let id = graph.add_room(kind);
    let room = graph.room_mut(id).unwrap();
    room.set_position(left, top);
    room.resize(w, h);
    id
}

/// Paint every room shell and mark placed doors
fn paint(graph: &RoomGraph, width: i32, height: i32) -> TileGrid {
    let mut grid = TileGrid::new(width, height);
    for room in graph.rooms() {
        grid.paint_room(room.rect(), Tile::WallA, Tile::FloorA);
    }
    for door in graph.doors() {
        if let Some(p) = door.position {
            grid.set(p.x, p.y, Tile::Door);
        }
    }
    grid
}

#[test]
fn test_two_rooms_sharing_a_wall() {
    let mut graph = RoomGraph::new();
    let a = place(&mut graph, RoomKind::Regular, 0, 0, 10, 10);
    let b = place(&mut graph, RoomKind::Regular, 9, 0, 10, 10);

    assert!(graph.establish_neighbour(a, b));
    assert!(graph.connect(a, b));

    let mut rng = GameRng::new(2024);
    graph.place_doors(&mut rng);

    let door = graph.room(a).unwrap().door_to(b).unwrap();
    let p = graph.door(door).unwrap().position.unwrap();
    assert_eq!(p.x, 9, "door must sit on the shared wall");
    assert!(graph.can_connect_at(a, p) && graph.can_connect_at(b, p));
    assert_eq!(graph.current_connections(a, Direction::Right), 1);
    assert_eq!(graph.current_connections(b, Direction::Left), 1);
}

#[test]
fn test_route_without_connections() {
    let mut graph = RoomGraph::new();
    let a = place(&mut graph, RoomKind::Regular, 0, 0, 10, 10);
    let mut grid = TileGrid::new(12, 12);
    let mut rng = GameRng::new(1);

    let err = graph
        .route(a, &mut grid, &Tile::FloorB, None, RouteOptions::default(), &mut rng)
        .unwrap_err();
    assert!(matches!(err, LayoutError::RoutingPrecondition { room } if room == a));
    assert_eq!(grid.count(Tile::FloorB), 0);
}

#[test]
fn test_door_free_cell_exhausts_when_doors_cover_room() {
    let mut graph = RoomGraph::new();
    let a = place(&mut graph, RoomKind::Regular, 4, 0, 5, 5);
    let left = place(&mut graph, RoomKind::Regular, 0, 0, 5, 5);
    let right = place(&mut graph, RoomKind::Regular, 8, 0, 5, 5);
    assert!(graph.connect(a, left));
    assert!(graph.connect(a, right));

    let mut rng = GameRng::new(77);
    assert_eq!(graph.place_doors(&mut rng), 2);
    let grid = paint(&graph, 14, 6);

    // Every interior cell of a 5x5 room is within reach of a side door
    let doors = graph.door_positions(a).unwrap();
    for p in graph.room(a).unwrap().placeable_points(|_| true) {
        assert!(doors.iter().any(|d| d.dist_sq(p) < DOOR_CLEARANCE * DOOR_CLEARANCE));
    }

    let err = graph.random_door_free_cell(a, &grid, &mut rng).unwrap_err();
    assert!(matches!(err, LayoutError::SamplingExhausted { .. }));
}

#[test]
fn test_full_pipeline() {
    let mut rng = GameRng::new(99);
    let mut graph = RoomGraph::new();

    let hub = graph.add_room(RoomKind::Regular);
    assert!(graph.negotiate(hub, &mut rng));
    let (w, h) = {
        let r = graph.room(hub).unwrap();
        (r.width(), r.height())
    };
    let room = graph.room_mut(hub).unwrap();
    room.set_position(10, 10);

    // One room glued to each side of the hub
    let west = place(&mut graph, RoomKind::Connection, 10 - 5, 12, 6, 6);
    let east = place(&mut graph, RoomKind::Connection, 10 + w - 1, 12, 6, 6);
    let north = place(&mut graph, RoomKind::Treasure, 12, 10 - 5, 6, 6);
    let south = place(&mut graph, RoomKind::Shop, 12, 10 + h - 1, 11, 9);

    for other in [west, east, north, south] {
        assert!(graph.connect(hub, other), "hub -> {other}");
    }
    assert!(graph.has_min_connections(hub));
    assert_eq!(graph.place_doors(&mut rng), 4);
    graph.finalize_doors(hub).unwrap();
    assert!(graph.doors().all(|d| d.variant == DoorVariant::Regular));

    let mut grid = paint(&graph, 50, 50);
    let paths = graph
        .route(hub, &mut grid, &Tile::FloorC, None, RouteOptions::default(), &mut rng)
        .unwrap();
    assert_eq!(paths.len(), 4);
    let hub_rect = *graph.room(hub).unwrap().rect();
    for path in &paths {
        assert!(hub_rect.inside(path.start));
        assert!(hub_rect.inside(path.end));
        assert_eq!(grid.get(path.end.x, path.end.y), Tile::FloorC);
    }

    // Props along the walls never collide
    let mut props = Vec::new();
    for _ in 0..6 {
        let p = graph.random_cell_near_wall(hub, &grid, &mut rng).unwrap();
        assert!(hub_rect.inside(p));
        assert!(!grid.is_wall(p.x, p.y));
        assert!(!props.contains(&p));
        props.push(p);
    }

    let free = graph.random_door_free_cell(hub, &grid, &mut rng).unwrap();
    let doors = graph.door_positions(hub).unwrap();
    assert!(doors.iter().all(|d| d.dist_sq(free) >= DOOR_CLEARANCE * DOOR_CLEARANCE));

    // Rejected layout: tear the hub down and check nothing points at it
    graph.clear(hub).unwrap();
    for other in [west, east, north, south] {
        let r = graph.room(other).unwrap();
        assert!(!r.is_neighbour(hub));
        assert_eq!(r.connection_count(), 0);
    }
    assert_eq!(graph.doors().count(), 0);
    assert!(graph.room(hub).unwrap().busy_cells().is_empty());
}

#[test]
fn test_shop_anchor_routes_to_center() {
    let mut graph = RoomGraph::new();
    let shop = place(&mut graph, RoomKind::Shop, 0, 0, 11, 9);
    let hall = place(&mut graph, RoomKind::Regular, 10, 0, 10, 10);
    assert!(graph.connect(shop, hall));

    let mut rng = GameRng::new(5);
    graph.place_doors(&mut rng);
    let center = graph.room(shop).unwrap().center_rect();
    let mut grid = paint(&graph, 22, 12);

    let options = RouteOptions { bold: true, shift: true };
    let paths = graph
        .route(shop, &mut grid, &Tile::Chasm, Some(center), options, &mut rng)
        .unwrap();
    assert_eq!(paths[0].end, Point::new(center.left, center.top));
    assert_eq!(grid.get(center.left, center.top), Tile::Chasm);
}

#[test]
fn test_same_seed_same_layout() {
    fn run(seed: u64) -> (Vec<(i32, i32)>, Vec<Point>, Point) {
        let mut rng = GameRng::new(seed);
        let mut graph = RoomGraph::new();
        let ids: Vec<RoomId> = (0..4).map(|_| graph.add_room(RoomKind::Regular)).collect();
        let sizes = ids
            .iter()
            .map(|&id| graph.try_negotiate(id, &mut rng).unwrap())
            .collect();

        for (i, &id) in ids.iter().enumerate() {
            let room = graph.room_mut(id).unwrap();
            room.resize(10, 10);
            room.set_position(i as i32 * 9, 0);
        }
        for pair in ids.windows(2) {
            assert!(graph.connect(pair[0], pair[1]));
        }
        graph.place_doors(&mut rng);
        let doors = graph.doors().filter_map(|d| d.position).collect();
        let center = graph.door_center(ids[1], &mut rng).unwrap();
        (sizes, doors, center)
    }

    assert_eq!(run(1234), run(1234));
}

#[test]
fn test_connection_space_is_a_point() {
    let mut graph = RoomGraph::new();
    let a = place(&mut graph, RoomKind::Regular, 0, 0, 10, 10);
    let b = place(&mut graph, RoomKind::Regular, 9, 0, 10, 10);
    let door = graph.try_connect(a, b).unwrap();
    assert!(graph.set_door_position(door, Point::new(9, 4)));

    let mut rng = GameRng::new(3);
    let space = graph.connection_space(a, &mut rng).unwrap();
    assert_eq!(space, Rect::at(Point::new(8, 4)));
}
