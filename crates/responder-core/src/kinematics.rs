//! Kinematic state tracking.
//!
//! Pure transitions from one [`GestureState`] to the next. Nothing here
//! touches arbitration; the dispatcher decides which transition applies.

use crate::event::InputEvent;
use crate::state::GestureState;
use responder_geometry::Point;

/// Seeds a new claim at the event's coordinates.
///
/// Only `last_local` survives from `prev`, so `local` continues from where the
/// previous claim left off.
pub fn granted(prev: &GestureState, event: &InputEvent, now: u64) -> GestureState {
    let xy = event.point();
    GestureState {
        event: Some(event.clone()),
        target: Some(event.target),
        time: now,
        xy,
        previous: xy,
        initial: xy,
        delta: Point::ZERO,
        local: prev.last_local,
        last_local: prev.last_local,
        direction: Point::ZERO,
        velocity: 0.0,
        distance: 0.0,
        down: true,
        first: true,
    }
}

/// Advances the snapshot by one move sample.
pub fn moved(prev: &GestureState, event: &InputEvent, now: u64) -> GestureState {
    let xy = event.point();
    let delta = xy - prev.initial;
    let step = xy - prev.xy;
    let len = step.length();

    let direction = step.normalize_or_zero();
    // equal (or out-of-order) timestamps carry the previous velocity
    let elapsed = now.saturating_sub(prev.time);
    let velocity = if elapsed != 0 {
        len / elapsed as f32
    } else {
        prev.velocity
    };

    log::trace!(
        "move sample xy=({:.1}, {:.1}) delta=({:.1}, {:.1}) v={velocity:.3}",
        xy.x,
        xy.y,
        delta.x,
        delta.y
    );

    GestureState {
        event: Some(event.clone()),
        target: prev.target,
        time: now,
        xy,
        previous: prev.xy,
        initial: prev.initial,
        delta,
        local: prev.last_local + delta,
        last_local: prev.last_local,
        direction,
        velocity,
        distance: delta.length(),
        down: prev.down,
        first: false,
    }
}

/// Commits the accumulated offset after a voluntary end of stream.
pub fn released(prev: &GestureState, event: &InputEvent, now: u64) -> GestureState {
    GestureState {
        event: Some(event.clone()),
        time: now,
        last_local: prev.local,
        down: false,
        first: false,
        ..prev.clone()
    }
}

/// Commits the accumulated offset after the claim was taken away.
///
/// Same as [`released`] except that no triggering event is retained.
pub fn terminated(prev: &GestureState, now: u64) -> GestureState {
    GestureState {
        event: None,
        time: now,
        last_local: prev.local,
        down: false,
        first: false,
        ..prev.clone()
    }
}

#[cfg(test)]
#[path = "tests/kinematics_tests.rs"]
mod tests;
