//! Recording of responder notifications for assertions.

use responder_core::{GestureState, Notify, ResponderOptions};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hook {
    Grant,
    Move,
    Release,
    Terminate,
}

impl Hook {
    pub fn as_str(self) -> &'static str {
        match self {
            Hook::Grant => "grant",
            Hook::Move => "move",
            Hook::Release => "release",
            Hook::Terminate => "terminate",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct CallbackRecord {
    pub responder: &'static str,
    pub hook: Hook,
    pub state: GestureState,
}

/// Shared, ordered record of every notification across responders.
#[derive(Clone, Default)]
pub struct CallbackLog {
    entries: Rc<RefCell<Vec<CallbackRecord>>>,
}

impl CallbackLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps the notification hooks of `options` so each call is recorded
    /// under `responder` before the original hook runs.
    pub fn record(&self, responder: &'static str, options: ResponderOptions) -> ResponderOptions {
        let grant = self.wrap(responder, Hook::Grant, &options.on_grant);
        let moved = self.wrap(responder, Hook::Move, &options.on_move);
        let release = self.wrap(responder, Hook::Release, &options.on_release);
        let terminate = self.wrap(responder, Hook::Terminate, &options.on_terminate);
        ResponderOptions {
            on_grant: grant,
            on_move: moved,
            on_release: release,
            on_terminate: terminate,
            ..options
        }
    }

    fn wrap(&self, responder: &'static str, hook: Hook, original: &Notify) -> Notify {
        let entries = Rc::clone(&self.entries);
        let original = Rc::clone(original);
        Rc::new(move |state: &GestureState| {
            entries.borrow_mut().push(CallbackRecord {
                responder,
                hook,
                state: state.clone(),
            });
            original(state);
        })
    }

    pub fn records(&self) -> Vec<CallbackRecord> {
        self.entries.borrow().clone()
    }

    /// Every notification as `"<responder>:<hook>"`, in call order.
    pub fn sequence(&self) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .map(|record| format!("{}:{}", record.responder, record.hook))
            .collect()
    }

    pub fn hooks_for(&self, responder: &str) -> Vec<&'static str> {
        self.entries
            .borrow()
            .iter()
            .filter(|record| record.responder == responder)
            .map(|record| record.hook.as_str())
            .collect()
    }

    pub fn states_for(&self, responder: &str, hook: Hook) -> Vec<GestureState> {
        self.entries
            .borrow()
            .iter()
            .filter(|record| record.responder == responder && record.hook == hook)
            .map(|record| record.state.clone())
            .collect()
    }

    pub fn count(&self, responder: &str, hook: Hook) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|record| record.responder == responder && record.hook == hook)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}
