//! Gesture responder runtime.
//!
//! Several responders may listen to the same pointer stream; at most one of
//! them holds the claim on it at any time. Claims are arbitrated by an
//! [`ArbitrationContext`] shared between the competing responders, events are
//! routed in a capture leg followed by a bubble leg, and the holder keeps a
//! [`GestureState`] with position, delta, velocity, direction and an offset
//! that accumulates across successive drags.

pub mod arbitration;
pub mod clock;
mod dispatcher;
pub mod error;
pub mod event;
pub mod identity;
pub mod kinematics;
pub mod options;
pub mod responder;
pub mod source;
pub mod state;

pub use arbitration::{ArbitrationContext, DispatchGuard, TerminateNotifier, TerminationRequest};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use dispatcher::ResponderPhase;
pub use error::ResponderError;
pub use event::{EventKind, InputEvent, Phase, TargetId};
pub use identity::ResponderId;
pub use options::{Gate, Notify, ResponderOptions};
pub use responder::GestureResponder;
pub use responder_geometry::Point;
pub use source::{EventHub, EventSource, Listener, SubscriptionId};
pub use state::GestureState;

pub mod prelude {
    pub use crate::arbitration::ArbitrationContext;
    pub use crate::event::{EventKind, InputEvent, Phase, TargetId};
    pub use crate::options::ResponderOptions;
    pub use crate::responder::GestureResponder;
    pub use crate::source::{EventHub, EventSource};
    pub use crate::state::GestureState;
    pub use responder_geometry::Point;
}
