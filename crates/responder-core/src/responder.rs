//! Gesture responder facade.
//!
//! A [`GestureResponder`] binds one identity and one [`ResponderOptions`] to
//! an [`ArbitrationContext`] and wires the capture/bubble handlers into an
//! [`EventSource`].
//!
//! # Example
//!
//! ```
//! use responder_core::{ArbitrationContext, EventHub, GestureResponder, InputEvent, ResponderOptions, TargetId};
//! use std::rc::Rc;
//!
//! let context = ArbitrationContext::new();
//! let hub = Rc::new(EventHub::new(TargetId(1)));
//! let responder = GestureResponder::new(context.clone(), ResponderOptions::draggable());
//! responder.attach(hub.clone()).expect("hub has a target");
//!
//! hub.dispatch(InputEvent::start(TargetId(1), 0.0, 0.0));
//! hub.dispatch(InputEvent::moved(TargetId(1), 10.0, 4.0));
//! assert_eq!(responder.state().distance, 10.0f32.hypot(4.0));
//! ```

use crate::arbitration::ArbitrationContext;
use crate::clock::{Clock, MonotonicClock};
use crate::dispatcher::{Dispatcher, ResponderPhase};
use crate::error::ResponderError;
use crate::event::{EventKind, InputEvent, Phase};
use crate::identity::ResponderId;
use crate::options::ResponderOptions;
use crate::source::{EventSource, Listener, SubscriptionId};
use crate::state::GestureState;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;

type Route = fn(&Dispatcher, &InputEvent) -> Result<(), ResponderError>;

/// Handlers installed by `attach`, one per (kind, phase) slot used.
const ROUTES: [(EventKind, Phase, Route); 5] = [
    (EventKind::Start, Phase::Capture, Dispatcher::start_capture),
    (EventKind::Start, Phase::Bubble, Dispatcher::start_bubble),
    (EventKind::Move, Phase::Capture, Dispatcher::move_capture),
    (EventKind::Move, Phase::Bubble, Dispatcher::move_bubble),
    (EventKind::End, Phase::Bubble, Dispatcher::end),
];

struct Attachment {
    source: Rc<dyn EventSource>,
    subscriptions: SmallVec<[SubscriptionId; 5]>,
}

pub struct GestureResponder {
    dispatcher: Dispatcher,
    attachment: RefCell<Option<Attachment>>,
}

impl GestureResponder {
    /// Creates a responder with a randomly generated identity.
    pub fn new(context: ArbitrationContext, options: ResponderOptions) -> Self {
        Self::with_id(context, ResponderId::random(), options)
    }

    pub fn with_id(context: ArbitrationContext, id: ResponderId, options: ResponderOptions) -> Self {
        Self {
            dispatcher: Dispatcher::new(id, context, options, Rc::new(MonotonicClock::new())),
            attachment: RefCell::new(None),
        }
    }

    /// Replaces the time source used to stamp state transitions.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.dispatcher.set_clock(Rc::new(clock));
        self
    }

    pub fn id(&self) -> ResponderId {
        self.dispatcher.id()
    }

    pub fn context(&self) -> &ArbitrationContext {
        self.dispatcher.context()
    }

    /// Current gesture snapshot.
    pub fn state(&self) -> GestureState {
        self.dispatcher.state()
    }

    pub fn phase(&self) -> ResponderPhase {
        self.dispatcher.phase()
    }

    /// Whether this responder currently holds the claim.
    pub fn is_responder(&self) -> bool {
        self.dispatcher.is_holding()
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.borrow().is_some()
    }

    /// Subscribes the five capture/bubble handlers to `source`.
    ///
    /// Fails without subscribing anything if the source has no target, if
    /// this responder is already attached, or if another attached responder
    /// on the same context uses the same identity.
    pub fn attach(&self, source: Rc<dyn EventSource>) -> Result<(), ResponderError> {
        if self.is_attached() {
            return Err(ResponderError::AlreadyAttached);
        }
        let target = source.target().ok_or(ResponderError::MissingTarget)?;
        self.context().register(self.id())?;

        let subscriptions = ROUTES
            .iter()
            .map(|&(kind, phase, route)| source.subscribe(kind, phase, self.listener(route)))
            .collect();

        log::debug!("{} attached to target {:?}", self.id(), target);
        *self.attachment.borrow_mut() = Some(Attachment {
            source,
            subscriptions,
        });
        Ok(())
    }

    /// Unsubscribes all handlers. If this responder holds the claim, the
    /// claim is terminated and `on_terminate` fires. No-op when detached.
    pub fn detach(&self) {
        let Some(attachment) = self.attachment.borrow_mut().take() else {
            return;
        };
        for id in attachment.subscriptions {
            attachment.source.unsubscribe(id);
        }
        self.context().unregister(self.id());
        self.dispatcher.relinquish();
        log::debug!("{} detached", self.id());
    }

    pub fn handle_start_capture(&self, event: &InputEvent) -> Result<(), ResponderError> {
        self.dispatcher.start_capture(event)
    }

    pub fn handle_start(&self, event: &InputEvent) -> Result<(), ResponderError> {
        self.dispatcher.start_bubble(event)
    }

    /// Capture leg of a move. Hosts delivering events themselves must hand
    /// the same `InputEvent` (or clones of it) to [`Self::handle_move`];
    /// a fresh copy of the sample counts as a second physical event and the
    /// holder would be updated twice.
    pub fn handle_move_capture(&self, event: &InputEvent) -> Result<(), ResponderError> {
        self.dispatcher.move_capture(event)
    }

    /// Bubble leg of a move. Must receive a clone of the event passed to
    /// [`Self::handle_move_capture`] for the same physical sample.
    pub fn handle_move(&self, event: &InputEvent) -> Result<(), ResponderError> {
        self.dispatcher.move_bubble(event)
    }

    pub fn handle_end(&self, event: &InputEvent) -> Result<(), ResponderError> {
        self.dispatcher.end(event)
    }

    fn listener(&self, route: Route) -> Listener {
        let dispatcher = self.dispatcher.clone();
        Rc::new(move |event: &InputEvent| {
            if let Err(err) = route(&dispatcher, event) {
                log::error!(
                    "{} dropped {:?} event #{}: {err}",
                    dispatcher.id(),
                    event.kind,
                    event.serial
                );
            }
        })
    }
}

impl Drop for GestureResponder {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for GestureResponder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureResponder")
            .field("id", &self.id())
            .field("phase", &self.phase())
            .field("attached", &self.is_attached())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/responder_tests.rs"]
mod tests;
