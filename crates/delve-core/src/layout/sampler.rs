//! Randomized cell search inside a room
//!
//! Every search draws at most [`RETRY_BUDGET`] candidates and reports
//! [`LayoutError::SamplingExhausted`] instead of looping forever on rooms
//! where no cell qualifies.

use log::warn;

use super::cell::TileQuery;
use super::rect::{Point, Rect};
use super::room::Room;
use crate::error::LayoutError;
use crate::rng::RandomSource;
use crate::{DOOR_CLEARANCE, RETRY_BUDGET};

/// Uniform cell strictly inside the walls
pub fn random_interior_cell<R: RandomSource + ?Sized>(rect: &Rect, rng: &mut R) -> Point {
    let x = rng.int(rect.left + 1, rect.right);
    let y = rng.int(rect.top + 1, rect.bottom);
    Point::new(x, y)
}

/// Uniform cell anywhere in the room, walls included
pub fn random_cell_with_walls<R: RandomSource + ?Sized>(rect: &Rect, rng: &mut R) -> Point {
    let x = rng.int(rect.left, rect.right + 1);
    let y = rng.int(rect.top, rect.bottom + 1);
    Point::new(x, y)
}

fn near_door(p: Point, doors: &[Point]) -> bool {
    doors
        .iter()
        .any(|&d| d.dist_sq(p) < DOOR_CLEARANCE * DOOR_CLEARANCE)
}

fn exhausted(room: &Room, what: &str) -> LayoutError {
    warn!("room {}: too many attempts looking for {what}", room.id());
    LayoutError::SamplingExhausted {
        attempts: RETRY_BUDGET,
    }
}

/// Interior cell that the level reports passable
pub fn random_free_cell<T, R>(room: &Room, tiles: &T, rng: &mut R) -> Result<Point, LayoutError>
where
    T: TileQuery + ?Sized,
    R: RandomSource + ?Sized,
{
    for _ in 0..RETRY_BUDGET {
        let p = random_interior_cell(room.rect(), rng);
        if tiles.is_passable(p.x, p.y) {
            return Ok(p);
        }
    }
    Err(exhausted(room, "a free cell"))
}

/// Open cell next to a wall, away from doors and from earlier picks.
///
/// Candidates are drawn over the whole room, walls included. A candidate
/// is skipped when it is busy, or, once the room has connections, when it
/// is not a wall or lies within [`DOOR_CLEARANCE`] of a door. The result is
/// the first open, non-busy interior neighbour of the candidate, checked
/// right, left, down, up. It is recorded as busy before being returned.
pub fn random_cell_near_wall<T, R>(
    room: &mut Room,
    doors: &[Point],
    tiles: &T,
    rng: &mut R,
) -> Result<Point, LayoutError>
where
    T: TileQuery + ?Sized,
    R: RandomSource + ?Sized,
{
    let rect = *room.rect();
    let connected = room.connection_count() > 0;

    for _ in 0..RETRY_BUDGET {
        let p = random_cell_with_walls(&rect, rng);

        if room.busy.contains(&p) {
            continue;
        }
        if connected && (!tiles.is_wall(p.x, p.y) || near_door(p, doors)) {
            continue;
        }

        let open = [p.offset(1, 0), p.offset(-1, 0), p.offset(0, 1), p.offset(0, -1)]
            .into_iter()
            .find(|&n| rect.inside(n) && !tiles.is_wall(n.x, n.y) && !room.busy.contains(&n));

        if let Some(open) = open {
            room.busy.insert(open);
            return Ok(open);
        }
    }
    Err(exhausted(room, "a cell near a wall"))
}

/// Passable interior cell at least [`DOOR_CLEARANCE`] away from every door.
///
/// A room without connections has nothing to keep clear of, so the first
/// interior draw is returned as is, passable or not.
pub fn random_door_free_cell<T, R>(
    room: &Room,
    doors: &[Point],
    tiles: &T,
    rng: &mut R,
) -> Result<Point, LayoutError>
where
    T: TileQuery + ?Sized,
    R: RandomSource + ?Sized,
{
    let connected = room.connection_count() > 0;

    for _ in 0..RETRY_BUDGET {
        let p = random_interior_cell(room.rect(), rng);
        if !connected {
            return Ok(p);
        }
        if !tiles.is_passable(p.x, p.y) || near_door(p, doors) {
            continue;
        }
        return Ok(p);
    }
    Err(exhausted(room, "a cell clear of doors"))
}
