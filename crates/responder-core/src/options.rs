//! Responder configuration.
//!
//! Every hook has a concrete default, so an unset hook is simply the default
//! closure rather than an absent value checked at dispatch time.

use crate::state::GestureState;
use std::fmt;
use std::rc::Rc;

/// Decides whether the responder wants the stream, or whether it agrees to
/// give it up.
pub type Gate = Rc<dyn Fn(&GestureState) -> bool>;

/// Observes a state transition.
pub type Notify = Rc<dyn Fn(&GestureState)>;

#[derive(Clone)]
pub struct ResponderOptions {
    pub on_start_should_set_capture: Gate,
    pub on_start_should_set: Gate,
    pub on_move_should_set_capture: Gate,
    pub on_move_should_set: Gate,
    pub on_grant: Notify,
    pub on_move: Notify,
    /// Advisory; see [`crate::ArbitrationContext::request_termination`].
    pub on_termination_request: Gate,
    pub on_release: Notify,
    pub on_terminate: Notify,
}

fn never() -> Gate {
    Rc::new(|_: &GestureState| false)
}

fn always() -> Gate {
    Rc::new(|_: &GestureState| true)
}

fn ignore() -> Notify {
    Rc::new(|_: &GestureState| {})
}

impl Default for ResponderOptions {
    fn default() -> Self {
        Self {
            on_start_should_set_capture: never(),
            on_start_should_set: never(),
            on_move_should_set_capture: never(),
            on_move_should_set: never(),
            on_grant: ignore(),
            on_move: ignore(),
            on_termination_request: always(),
            on_release: ignore(),
            on_terminate: ignore(),
        }
    }
}

impl ResponderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_start_should_set_capture(
        mut self,
        gate: impl Fn(&GestureState) -> bool + 'static,
    ) -> Self {
        self.on_start_should_set_capture = Rc::new(gate);
        self
    }

    pub fn on_start_should_set(mut self, gate: impl Fn(&GestureState) -> bool + 'static) -> Self {
        self.on_start_should_set = Rc::new(gate);
        self
    }

    pub fn on_move_should_set_capture(
        mut self,
        gate: impl Fn(&GestureState) -> bool + 'static,
    ) -> Self {
        self.on_move_should_set_capture = Rc::new(gate);
        self
    }

    pub fn on_move_should_set(mut self, gate: impl Fn(&GestureState) -> bool + 'static) -> Self {
        self.on_move_should_set = Rc::new(gate);
        self
    }

    pub fn on_grant(mut self, notify: impl Fn(&GestureState) + 'static) -> Self {
        self.on_grant = Rc::new(notify);
        self
    }

    pub fn on_move(mut self, notify: impl Fn(&GestureState) + 'static) -> Self {
        self.on_move = Rc::new(notify);
        self
    }

    pub fn on_termination_request(
        mut self,
        gate: impl Fn(&GestureState) -> bool + 'static,
    ) -> Self {
        self.on_termination_request = Rc::new(gate);
        self
    }

    pub fn on_release(mut self, notify: impl Fn(&GestureState) + 'static) -> Self {
        self.on_release = Rc::new(notify);
        self
    }

    pub fn on_terminate(mut self, notify: impl Fn(&GestureState) + 'static) -> Self {
        self.on_terminate = Rc::new(notify);
        self
    }

    /// Claims on start in the bubble phase and never yields; the usual setup
    /// for a plain draggable.
    pub fn draggable() -> Self {
        Self::default()
            .on_start_should_set(|_| true)
            .on_termination_request(|_| false)
    }
}

impl fmt::Debug for ResponderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponderOptions").finish_non_exhaustive()
    }
}
