//! Capture/bubble routing for a single responder.
//!
//! Each handler is one leg of the two-phase protocol. Capture handlers for a
//! physical event run before the bubble handlers for the same event; the
//! event source guarantees that ordering, the dispatcher only relies on it.
//!
//! No borrow of the responder's state is held while the arbitration context,
//! user gates or user notifications run.

use crate::arbitration::{ArbitrationContext, TerminateNotifier, TerminationRequest};
use crate::clock::Clock;
use crate::error::ResponderError;
use crate::event::InputEvent;
use crate::identity::ResponderId;
use crate::kinematics;
use crate::options::{Gate, Notify, ResponderOptions};
use crate::state::GestureState;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ResponderPhase {
    #[default]
    Idle,
    Granted,
}

#[derive(Default)]
struct Slot {
    state: GestureState,
    phase: ResponderPhase,
}

#[derive(Clone)]
pub(crate) struct Dispatcher {
    id: ResponderId,
    context: ArbitrationContext,
    options: Rc<ResponderOptions>,
    clock: Rc<dyn Clock>,
    slot: Rc<RefCell<Slot>>,
}

impl Dispatcher {
    pub(crate) fn new(
        id: ResponderId,
        context: ArbitrationContext,
        options: ResponderOptions,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self {
            id,
            context,
            options: Rc::new(options),
            clock,
            slot: Rc::new(RefCell::new(Slot::default())),
        }
    }

    pub(crate) fn id(&self) -> ResponderId {
        self.id
    }

    pub(crate) fn context(&self) -> &ArbitrationContext {
        &self.context
    }

    pub(crate) fn set_clock(&mut self, clock: Rc<dyn Clock>) {
        self.clock = clock;
    }

    pub(crate) fn state(&self) -> GestureState {
        self.slot.borrow().state.clone()
    }

    pub(crate) fn phase(&self) -> ResponderPhase {
        self.slot.borrow().phase
    }

    pub(crate) fn is_holding(&self) -> bool {
        self.context.is_held_by(self.id)
    }

    pub(crate) fn start_capture(&self, event: &InputEvent) -> Result<(), ResponderError> {
        let _guard = self.context.enter_dispatch()?;
        if self.is_holding() {
            return Ok(());
        }
        if self.ask(&self.options.on_start_should_set_capture) {
            self.try_grant(event);
        }
        Ok(())
    }

    pub(crate) fn start_bubble(&self, event: &InputEvent) -> Result<(), ResponderError> {
        let _guard = self.context.enter_dispatch()?;
        event.prevent_default();
        if self.is_holding() {
            return Ok(());
        }
        if self.ask(&self.options.on_start_should_set) {
            self.try_grant(event);
        }
        Ok(())
    }

    pub(crate) fn move_capture(&self, event: &InputEvent) -> Result<(), ResponderError> {
        let _guard = self.context.enter_dispatch()?;
        if self.is_holding() {
            self.update_move(event);
        } else if self.ask(&self.options.on_move_should_set_capture) {
            self.force_grant(event);
            self.context.mark_captured(self.id, event);
        }
        Ok(())
    }

    pub(crate) fn move_bubble(&self, event: &InputEvent) -> Result<(), ResponderError> {
        let _guard = self.context.enter_dispatch()?;
        if self.already_handled(event) || self.context.claimed_during_capture(event) {
            return Ok(());
        }
        if self.is_holding() {
            self.update_move(event);
        } else if self.ask(&self.options.on_move_should_set) {
            self.force_grant(event);
        }
        Ok(())
    }

    pub(crate) fn end(&self, event: &InputEvent) -> Result<(), ResponderError> {
        let _guard = self.context.enter_dispatch()?;
        if !self.is_holding() {
            log::trace!("{} ignores end, not the holder", self.id);
            return Ok(());
        }

        self.context.release();
        event.prevent_default();
        let now = self.clock.now_millis();
        let state = self.commit(ResponderPhase::Idle, |prev| {
            kinematics::released(prev, event, now)
        });
        self.notify(&self.options.on_release, &state);
        Ok(())
    }

    /// Terminates this responder's claim, if it holds one. Used on detach.
    pub(crate) fn relinquish(&self) {
        if self.is_holding() {
            self.context.terminate();
        }
    }

    fn try_grant(&self, event: &InputEvent) {
        let (request, terminate) = self.claim_hooks();
        if self.context.grant(self.id, request, terminate) {
            self.on_granted(event);
        }
    }

    fn force_grant(&self, event: &InputEvent) {
        let (request, terminate) = self.claim_hooks();
        // runs the evicted holder's terminate notification first
        self.context.force_claim(self.id, request, terminate);
        self.on_granted(event);
    }

    fn on_granted(&self, event: &InputEvent) {
        let now = self.clock.now_millis();
        let state = self.commit(ResponderPhase::Granted, |prev| {
            kinematics::granted(prev, event, now)
        });
        self.notify(&self.options.on_grant, &state);
    }

    fn update_move(&self, event: &InputEvent) {
        let now = self.clock.now_millis();
        let state = self.commit(ResponderPhase::Granted, |prev| {
            kinematics::moved(prev, event, now)
        });
        self.notify(&self.options.on_move, &state);
    }

    /// The capture leg already claimed or tracked this physical event.
    fn already_handled(&self, event: &InputEvent) -> bool {
        self.slot
            .borrow()
            .state
            .event
            .as_ref()
            .is_some_and(|seen| seen.is_same_event(event))
    }

    fn ask(&self, gate: &Gate) -> bool {
        let state = self.state();
        gate(&state)
    }

    fn notify(&self, hook: &Notify, state: &GestureState) {
        hook(state);
    }

    fn commit(
        &self,
        phase: ResponderPhase,
        transition: impl FnOnce(&GestureState) -> GestureState,
    ) -> GestureState {
        commit(&self.slot, phase, transition)
    }

    /// Hooks handed to the arbitration context with a claim.
    ///
    /// They hold the state slot weakly so a claim outliving its responder
    /// cannot keep the responder alive.
    fn claim_hooks(&self) -> (TerminationRequest, TerminateNotifier) {
        let request: TerminationRequest = {
            let slot = Rc::downgrade(&self.slot);
            let options = Rc::clone(&self.options);
            Rc::new(move || match slot.upgrade() {
                Some(slot) => {
                    let state = slot.borrow().state.clone();
                    (options.on_termination_request)(&state)
                }
                None => true,
            })
        };

        let terminate: TerminateNotifier = {
            let slot = Rc::downgrade(&self.slot);
            let options = Rc::clone(&self.options);
            let clock = Rc::clone(&self.clock);
            let id = self.id;
            Rc::new(move || {
                let Some(slot) = slot.upgrade() else {
                    return;
                };
                log::debug!("{id} terminated");
                let now = clock.now_millis();
                let state = commit(&slot, ResponderPhase::Idle, |prev| {
                    kinematics::terminated(prev, now)
                });
                (options.on_terminate)(&state);
            })
        };

        (request, terminate)
    }
}

fn commit(
    slot: &RefCell<Slot>,
    phase: ResponderPhase,
    transition: impl FnOnce(&GestureState) -> GestureState,
) -> GestureState {
    let mut slot = slot.borrow_mut();
    let next = transition(&slot.state);
    slot.state = next.clone();
    slot.phase = phase;
    next
}

#[cfg(test)]
#[path = "tests/dispatcher_tests.rs"]
mod tests;
