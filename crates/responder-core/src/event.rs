use responder_geometry::Point;
use smallvec::SmallVec;
use std::cell::Cell;
use std::rc::Rc;

/// Identity of the host element an input event was delivered to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TargetId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Start,
    Move,
    End,
}

/// Propagation phase a listener is registered for.
///
/// Capture listeners for a given event always run before bubble listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Capture,
    Bubble,
}

/// Raw pointer/touch sample as delivered by the host.
///
/// Only the fields the responder consumes are modelled: the target, the
/// coordinates (either a direct position or a touch list) and cancelability.
/// The default-prevented flag is shared between clones so that a copy stored
/// in a gesture snapshot observes `prevent_default` calls made elsewhere.
#[derive(Clone, Debug)]
pub struct InputEvent {
    pub kind: EventKind,
    pub target: TargetId,
    pub position: Option<Point>,
    pub touches: SmallVec<[Point; 4]>,
    pub cancelable: bool,
    /// Stamped by the event source; identical for the capture and bubble
    /// deliveries of the same physical event.
    pub serial: u64,
    default_prevented: Rc<Cell<bool>>,
}

impl InputEvent {
    pub fn new(kind: EventKind, target: TargetId, position: Point) -> Self {
        Self {
            kind,
            target,
            position: Some(position),
            touches: SmallVec::new(),
            cancelable: true,
            serial: 0,
            default_prevented: Rc::new(Cell::new(false)),
        }
    }

    /// Creates an event whose coordinates come from a multi-point touch list.
    pub fn from_touches(
        kind: EventKind,
        target: TargetId,
        touches: impl IntoIterator<Item = Point>,
    ) -> Self {
        Self {
            kind,
            target,
            position: None,
            touches: touches.into_iter().collect(),
            cancelable: true,
            serial: 0,
            default_prevented: Rc::new(Cell::new(false)),
        }
    }

    pub fn start(target: TargetId, x: f32, y: f32) -> Self {
        Self::new(EventKind::Start, target, Point::new(x, y))
    }

    pub fn moved(target: TargetId, x: f32, y: f32) -> Self {
        Self::new(EventKind::Move, target, Point::new(x, y))
    }

    pub fn end(target: TargetId, x: f32, y: f32) -> Self {
        Self::new(EventKind::End, target, Point::new(x, y))
    }

    pub fn with_cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }

    pub fn with_serial(mut self, serial: u64) -> Self {
        self.serial = serial;
        self
    }

    /// The coordinates this event reports: the first touch if a touch list is
    /// present, otherwise the direct position, otherwise the origin.
    pub fn point(&self) -> Point {
        self.touches
            .first()
            .copied()
            .or(self.position)
            .unwrap_or(Point::ZERO)
    }

    /// Suppresses the host's default action. No-op for non-cancelable events.
    pub fn prevent_default(&self) {
        if self.cancelable {
            self.default_prevented.set(true);
        }
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    /// True if both values are deliveries of the same physical event, i.e.
    /// one is a clone of the other.
    pub fn is_same_event(&self, other: &InputEvent) -> bool {
        Rc::ptr_eq(&self.default_prevented, &other.default_prevented)
    }
}
