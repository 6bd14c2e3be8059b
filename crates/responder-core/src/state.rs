use crate::event::{InputEvent, TargetId};
use responder_geometry::Point;

/// Snapshot of a responder's gesture kinematics.
///
/// Every transition produces a fresh value that replaces the previous one
/// wholesale; readers never observe a partially updated snapshot.
#[derive(Clone, Debug, Default)]
pub struct GestureState {
    /// Event that produced this snapshot. `None` before the first grant and
    /// after a forced termination.
    pub event: Option<InputEvent>,
    /// Target captured when the claim was granted.
    pub target: Option<TargetId>,
    /// Monotonic milliseconds of the last update.
    pub time: u64,
    pub xy: Point,
    pub previous: Point,
    pub initial: Point,
    /// `xy - initial`; resets at every grant.
    pub delta: Point,
    /// `last_local + delta`; accumulates across grant/release cycles.
    pub local: Point,
    pub last_local: Point,
    /// Unit vector of the last inter-sample displacement, or zero.
    pub direction: Point,
    /// Inter-sample distance per millisecond.
    pub velocity: f32,
    /// Length of `delta`.
    pub distance: f32,
    pub down: bool,
    pub first: bool,
}

impl GestureState {
    /// Velocity split along `direction`, in pixels per millisecond.
    pub fn velocity_vector(&self) -> Point {
        self.direction * self.velocity
    }
}
