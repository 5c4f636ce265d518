//! Room size negotiation
//!
//! Width and height are drawn independently inside the room's policy
//! bounds (one shared draw for square rooms), then snapped by the policy's
//! [`SizeSnap`](super::SizeSnap).

use log::trace;

use super::room::{Room, SizePolicy};
use crate::error::LayoutError;
use crate::rng::RandomSource;

/// Negotiate a size within the room's own policy bounds
pub fn negotiate<R: RandomSource + ?Sized>(room: &mut Room, rng: &mut R) -> Result<(i32, i32), LayoutError> {
    let policy = *room.size_policy();
    negotiate_within(
        room,
        policy.min_width,
        policy.max_width,
        policy.min_height,
        policy.max_height,
        rng,
    )
}

/// Negotiate a size within narrower bounds.
///
/// The requested bounds must lie inside the policy's and be ordered.
pub fn negotiate_within<R: RandomSource + ?Sized>(
    room: &mut Room,
    min_w: i32,
    max_w: i32,
    min_h: i32,
    max_h: i32,
    rng: &mut R,
) -> Result<(i32, i32), LayoutError> {
    let policy = *room.size_policy();

    if min_w < policy.min_width
        || max_w > policy.max_width
        || min_h < policy.min_height
        || max_h > policy.max_height
    {
        return Err(LayoutError::invalid(format!(
            "requested {min_w}..{max_w} x {min_h}..{max_h} outside {} bounds",
            room.kind()
        )));
    }
    if min_w > max_w || min_h > max_h {
        return Err(LayoutError::invalid(format!(
            "requested bounds inverted: {min_w}..{max_w} x {min_h}..{max_h}"
        )));
    }

    let snap = policy.snap;
    let (w, h) = if policy.square {
        let lo = min_w.max(min_h);
        let hi = max_w.min(max_h);
        let v = snap
            .apply(rng.int(lo, hi + 1), lo, hi)
            .ok_or_else(|| LayoutError::invalid("no square size fits both bounds"))?;
        (v, v)
    } else {
        let w = snap
            .apply(rng.int(min_w, max_w + 1), min_w, max_w)
            .ok_or_else(|| LayoutError::invalid(format!("no {snap} width in {min_w}..{max_w}")))?;
        let h = snap
            .apply(rng.int(min_h, max_h + 1), min_h, max_h)
            .ok_or_else(|| LayoutError::invalid(format!("no {snap} height in {min_h}..{max_h}")))?;
        (w, h)
    };

    room.resize(w, h);
    trace!("room {} sized {}x{}", room.id(), w, h);
    Ok((w, h))
}

/// Negotiate normally, then shrink any axis that exceeds the ceiling.
///
/// Fails before drawing when no snapped size fits under the ceiling. On
/// failure the room keeps the size it had before the call.
pub fn negotiate_with_ceiling<R: RandomSource + ?Sized>(
    room: &mut Room,
    max_w: i32,
    max_h: i32,
    rng: &mut R,
) -> Result<(i32, i32), LayoutError> {
    let policy = *room.size_policy();
    let cap_w = policy.max_width.min(max_w);
    let cap_h = policy.max_height.min(max_h);
    check_ceiling(&policy, cap_w, cap_h).inspect_err(|e| trace!("room {}: {e}", room.id()))?;

    let before = *room.rect();
    let (w, h) = negotiate(room, rng)?;
    if w <= max_w && h <= max_h {
        return Ok((w, h));
    }

    match shrink(&policy, w, h, cap_w, cap_h) {
        Ok((w, h)) => {
            room.resize(w, h);
            trace!("room {} shrunk to {}x{} under {}x{}", room.id(), w, h, max_w, max_h);
            Ok((w, h))
        }
        Err(e) => {
            room.resize(before.width(), before.height());
            Err(e)
        }
    }
}

fn check_ceiling(policy: &SizePolicy, cap_w: i32, cap_h: i32) -> Result<(), LayoutError> {
    let snap = policy.snap;
    if policy.square {
        let lo = policy.min_width.max(policy.min_height);
        let hi = cap_w.min(cap_h);
        if snap.apply(hi, lo, hi).is_none() {
            return Err(LayoutError::invalid(format!(
                "no {snap} square size in {lo}..{hi} under the ceiling"
            )));
        }
        return Ok(());
    }
    if snap.apply(cap_w, policy.min_width, cap_w).is_none() {
        return Err(LayoutError::invalid(format!(
            "no {snap} width in {}..{cap_w} under the ceiling",
            policy.min_width
        )));
    }
    if snap.apply(cap_h, policy.min_height, cap_h).is_none() {
        return Err(LayoutError::invalid(format!(
            "no {snap} height in {}..{cap_h} under the ceiling",
            policy.min_height
        )));
    }
    Ok(())
}

fn shrink(policy: &SizePolicy, w: i32, h: i32, cap_w: i32, cap_h: i32) -> Result<(i32, i32), LayoutError> {
    let snap = policy.snap;
    if policy.square {
        let lo = policy.min_width.max(policy.min_height);
        let hi = cap_w.min(cap_h);
        let v = snap
            .apply(w.min(h).min(hi), lo, hi)
            .ok_or_else(|| LayoutError::invalid(format!("square room cannot fit under {hi}")))?;
        return Ok((v, v));
    }
    let w = snap
        .apply(w.min(cap_w), policy.min_width, cap_w)
        .ok_or_else(|| LayoutError::invalid(format!("no width fits under {cap_w}")))?;
    let h = snap
        .apply(h.min(cap_h), policy.min_height, cap_h)
        .ok_or_else(|| LayoutError::invalid(format!("no height fits under {cap_h}")))?;
    Ok((w, h))
}
