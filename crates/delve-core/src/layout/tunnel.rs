//! Tunnels from doors to a room's hub
//!
//! Each door gets an L-shaped path of two orthogonal segments. The first
//! segment leaves the door perpendicular to the wall it sits in, so a
//! tunnel never runs along the wall it came through.

use log::error;

use super::cell::Painter;
use super::rect::{Point, Rect};
use super::room::Room;
use crate::error::LayoutError;
use crate::rng::RandomSource;

/// Tunnel drawing options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteOptions {
    /// Draw wide lines
    pub bold: bool,
    /// Start one cell inside the room instead of on the door
    pub shift: bool,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            bold: false,
            shift: true,
        }
    }
}

/// Two-segment path `start -> mid -> end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TunnelPath {
    pub start: Point,
    pub mid: Point,
    pub end: Point,
}

/// Average of the door positions with stochastic rounding, clamped inside
/// the walls.
///
/// On each axis the mean `sum / n` is rounded up with probability equal to
/// its fractional part, so repeated runs scatter the hub around the true
/// center. Always draws two floats, x first.
///
/// The room needs an interior, so it must be at least 3x3.
pub fn door_center<R: RandomSource + ?Sized>(
    room: &Room,
    doors: &[Point],
    rng: &mut R,
) -> Result<Point, LayoutError> {
    if doors.is_empty() {
        error!("room {}: door center of a room without doors", room.id());
        return Err(LayoutError::RoutingPrecondition { room: room.id() });
    }
    if room.width() < 3 || room.height() < 3 {
        return Err(LayoutError::invalid(format!(
            "room {} is {}x{}, too small to have an interior",
            room.id(),
            room.width(),
            room.height()
        )));
    }

    let n = doors.len() as i32;
    let sum_x: i32 = doors.iter().map(|d| d.x).sum();
    let sum_y: i32 = doors.iter().map(|d| d.y).sum();

    let mut x = sum_x.div_euclid(n);
    let mut y = sum_y.div_euclid(n);

    if rng.float() < sum_x.rem_euclid(n) as f32 / n as f32 {
        x += 1;
    }
    if rng.float() < sum_y.rem_euclid(n) as f32 / n as f32 {
        y += 1;
    }

    let rect = room.rect();
    x = x.max(rect.left + 1).min(rect.right - 1);
    y = y.max(rect.top + 1).min(rect.bottom - 1);

    Ok(Point::new(x, y))
}

/// Path from `door` into `anchor` for a room occupying `rect`
pub fn plan_tunnel(rect: &Rect, door: Point, anchor: &Rect, shift: bool) -> TunnelPath {
    let mut start = door;

    if shift {
        if start.x == rect.left {
            start.x += 1;
        } else if start.y == rect.top {
            start.y += 1;
        } else if start.x == rect.right {
            start.x -= 1;
        } else if start.y == rect.bottom {
            start.y -= 1;
        }
    }

    let right_shift = if start.x < anchor.left {
        anchor.left - start.x
    } else if start.x > anchor.right {
        anchor.right - start.x
    } else {
        0
    };

    let down_shift = if start.y < anchor.top {
        anchor.top - start.y
    } else if start.y > anchor.bottom {
        anchor.bottom - start.y
    } else {
        0
    };

    let (mid, end) = if door.x == rect.left || door.x == rect.right {
        let mid = start.offset(right_shift, 0);
        (mid, mid.offset(0, down_shift))
    } else {
        let mid = start.offset(0, down_shift);
        (mid, mid.offset(right_shift, 0))
    };

    TunnelPath { start, mid, end }
}

/// Draw a tunnel from every door into `anchor`, or into the door center
/// when no anchor is given.
///
/// Returns the drawn paths in door order.
pub fn route<P, R>(
    room: &Room,
    doors: &[Point],
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
    if doors.is_empty() {
        error!("room {}: invalid connection room, nothing to route", room.id());
        return Err(LayoutError::RoutingPrecondition { room: room.id() });
    }

    let anchor = match anchor {
        Some(anchor) => anchor,
        None => Rect::at(door_center(room, doors, rng)?),
    };

    let paths: Vec<TunnelPath> = doors
        .iter()
        .map(|&door| plan_tunnel(room.rect(), door, &anchor, options.shift))
        .collect();

    for path in &paths {
        painter.draw_line(path.start, path.mid, floor, options.bold);
        painter.draw_line(path.mid, path.end, floor, options.bold);
    }

    Ok(paths)
}
