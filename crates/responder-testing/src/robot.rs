//! Robot-style driver for responder tests
//!
//! [`ResponderTestRule`] owns everything a test needs to exercise responders
//! end to end: one arbitration context, one event hub standing in for the
//! host element, and a manual clock so velocities are deterministic.
//!
//! # Example
//!
//! ```
//! use responder_testing::{CallbackLog, ResponderTestRule};
//! use responder_core::ResponderOptions;
//!
//! let mut rule = ResponderTestRule::new();
//! let log = CallbackLog::new();
//! let card = rule.attach("card", log.record("card", ResponderOptions::draggable()));
//!
//! rule.drag((0.0, 0.0), (10.0, 4.0), 2);
//! assert_eq!(rule.responder(card).state().local.x, 10.0);
//! assert_eq!(log.hooks_for("card"), vec!["grant", "move", "move", "release"]);
//! ```

use responder_core::{
    ArbitrationContext, EventHub, GestureResponder, InputEvent, ManualClock, Point,
    ResponderId, ResponderOptions, TargetId,
};
use std::rc::Rc;

/// Default milliseconds between robot samples, one 60Hz frame.
pub const FRAME_MILLIS: u64 = 16;

pub const TEST_TARGET: TargetId = TargetId(1);

/// Handle to a responder attached through [`ResponderTestRule::attach`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResponderHandle(usize);

/// Test harness that drives a shared event hub like a single pointer would.
pub struct ResponderTestRule {
    context: ArbitrationContext,
    hub: Rc<EventHub>,
    clock: ManualClock,
    responders: Vec<(&'static str, GestureResponder)>,
    cursor: Point,
    next_id: u64,
}

impl Default for ResponderTestRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponderTestRule {
    pub fn new() -> Self {
        Self {
            context: ArbitrationContext::new(),
            hub: Rc::new(EventHub::new(TEST_TARGET)),
            clock: ManualClock::new(0),
            responders: Vec::new(),
            cursor: Point::ZERO,
            next_id: 1,
        }
    }

    pub fn context(&self) -> &ArbitrationContext {
        &self.context
    }

    pub fn hub(&self) -> &Rc<EventHub> {
        &self.hub
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    /// Creates a responder with a sequential id and attaches it to the hub.
    ///
    /// Responders attached later are nested deeper: they capture after and
    /// bubble before the ones attached earlier.
    pub fn attach(&mut self, name: &'static str, options: ResponderOptions) -> ResponderHandle {
        let id = ResponderId(self.next_id);
        self.next_id += 1;
        let responder = GestureResponder::with_id(self.context.clone(), id, options)
            .with_clock(self.clock.clone());
        responder
            .attach(self.hub.clone())
            .unwrap_or_else(|err| panic!("attaching {name} failed: {err}"));
        self.responders.push((name, responder));
        ResponderHandle(self.responders.len() - 1)
    }

    pub fn responder(&self, handle: ResponderHandle) -> &GestureResponder {
        &self.responders[handle.0].1
    }

    /// Name of the responder holding the claim, if any.
    pub fn holder_name(&self) -> Option<&'static str> {
        let holder = self.context.holder()?;
        self.responders
            .iter()
            .find(|(_, responder)| responder.id() == holder)
            .map(|(name, _)| *name)
    }

    /// Number of attached responders currently holding the claim.
    pub fn holder_count(&self) -> usize {
        self.responders
            .iter()
            .filter(|(_, responder)| responder.is_responder())
            .count()
    }

    pub fn advance_time(&mut self, millis: u64) {
        self.clock.advance(millis);
    }

    pub fn press(&mut self, x: f32, y: f32) -> InputEvent {
        self.send(InputEvent::start(TEST_TARGET, x, y))
    }

    /// Moves the pointer after one frame.
    pub fn move_to(&mut self, x: f32, y: f32) -> InputEvent {
        self.advance_time(FRAME_MILLIS);
        self.send(InputEvent::moved(TEST_TARGET, x, y))
    }

    /// Moves the pointer without advancing time.
    pub fn move_now(&mut self, x: f32, y: f32) -> InputEvent {
        self.send(InputEvent::moved(TEST_TARGET, x, y))
    }

    pub fn release(&mut self) -> InputEvent {
        let Point { x, y } = self.cursor;
        self.send(InputEvent::end(TEST_TARGET, x, y))
    }

    /// Press at `from`, move to `to` in `steps` evenly spaced frames, release.
    pub fn drag(&mut self, from: (f32, f32), to: (f32, f32), steps: usize) {
        let from = Point::from(from);
        let to = Point::from(to);
        self.press(from.x, from.y);
        let steps = steps.max(1);
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            let p = from + (to - from) * t;
            self.move_to(p.x, p.y);
        }
        self.release();
    }

    /// Dispatches a prepared event and returns the delivered copy, so tests
    /// can inspect `is_default_prevented`.
    pub fn send(&mut self, event: InputEvent) -> InputEvent {
        self.cursor = event.point();
        let delivered = event.clone();
        self.hub.dispatch(event);
        delivered
    }
}
