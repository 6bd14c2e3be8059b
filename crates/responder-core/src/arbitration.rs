//! Exclusive claim arbitration.
//!
//! An [`ArbitrationContext`] tracks which responder, if any, owns the input
//! stream. It is constructed by the host and handed to every responder that
//! should compete for the same stream; responders built against different
//! contexts never interact.
//!
//! The context is single-threaded. Handlers must not interleave: a dispatch
//! entered through [`ArbitrationContext::enter_dispatch`] while another is in
//! flight is rejected with [`ResponderError::Reentrant`]. No internal borrow
//! is held while terminate notifiers or termination predicates run, so those
//! hooks may call back into the context.

use crate::error::ResponderError;
use crate::event::InputEvent;
use crate::identity::ResponderId;
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

/// Asked by external arbiters whether the holder is willing to give up the claim.
pub type TerminationRequest = Rc<dyn Fn() -> bool>;

/// Invoked when the holder loses the claim without releasing it.
pub type TerminateNotifier = Rc<dyn Fn()>;

struct Claim {
    id: ResponderId,
    on_termination_request: TerminationRequest,
    on_terminate: TerminateNotifier,
    /// Event whose capture leg installed this claim, if any.
    captured_on: Option<InputEvent>,
}

#[derive(Default)]
struct ArbitrationInner {
    claim: RefCell<Option<Claim>>,
    attached: RefCell<HashSet<ResponderId>>,
    dispatching: Cell<bool>,
}

/// Shared holder of the single active claim.
#[derive(Clone, Default)]
pub struct ArbitrationContext {
    inner: Rc<ArbitrationInner>,
}

impl ArbitrationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a claim for `id` if the stream is unclaimed.
    ///
    /// First claimant wins: while any claim is held, including one held by
    /// `id` itself, this returns `false` and changes nothing.
    pub fn grant(
        &self,
        id: ResponderId,
        on_termination_request: TerminationRequest,
        on_terminate: TerminateNotifier,
    ) -> bool {
        let mut slot = self.inner.claim.borrow_mut();
        if let Some(current) = slot.as_ref() {
            log::debug!("grant to {id} ignored, claim held by {}", current.id);
            return false;
        }
        log::debug!("claim granted to {id}");
        *slot = Some(Claim {
            id,
            on_termination_request,
            on_terminate,
            captured_on: None,
        });
        true
    }

    /// Installs a claim for `id`, evicting any other holder.
    ///
    /// The evicted holder's terminate notifier runs before the new claim is
    /// installed. Its termination predicate is not consulted.
    pub fn force_claim(
        &self,
        id: ResponderId,
        on_termination_request: TerminationRequest,
        on_terminate: TerminateNotifier,
    ) {
        let evicted = {
            let mut slot = self.inner.claim.borrow_mut();
            match slot.as_ref() {
                Some(current) if current.id != id => slot.take(),
                _ => None,
            }
        };

        if let Some(evicted) = evicted {
            log::debug!("claim forcibly moved from {} to {id}", evicted.id);
            (evicted.on_terminate)();
        } else {
            log::debug!("claim forced to {id}");
        }

        *self.inner.claim.borrow_mut() = Some(Claim {
            id,
            on_termination_request,
            on_terminate,
            captured_on: None,
        });
    }

    pub fn is_held_by(&self, id: ResponderId) -> bool {
        self.inner
            .claim
            .borrow()
            .as_ref()
            .is_some_and(|claim| claim.id == id)
    }

    /// Identity of the current holder.
    pub fn holder(&self) -> Option<ResponderId> {
        self.inner.claim.borrow().as_ref().map(|claim| claim.id)
    }

    /// Clears the claim without notifying anyone. Called by the holder itself.
    pub fn release(&self) {
        if let Some(claim) = self.inner.claim.borrow_mut().take() {
            log::debug!("claim released by {}", claim.id);
        }
    }

    /// Ends the current claim and notifies the holder. Returns the evicted id.
    pub fn terminate(&self) -> Option<ResponderId> {
        let evicted = self.inner.claim.borrow_mut().take()?;
        log::debug!("claim held by {} terminated", evicted.id);
        (evicted.on_terminate)();
        Some(evicted.id)
    }

    /// Asks the holder to give the stream up, terminating it if it agrees.
    ///
    /// Returns `true` when the stream is unclaimed afterwards. Intended for
    /// arbiters coordinating several independent gesture systems; the
    /// responder-to-responder paths never call this.
    pub fn request_termination(&self) -> bool {
        let (id, predicate) = match self.inner.claim.borrow().as_ref() {
            Some(claim) => (claim.id, Rc::clone(&claim.on_termination_request)),
            None => return true,
        };

        if !predicate() {
            log::debug!("{id} refused to give up the claim");
            return false;
        }

        // the predicate may have released or replaced the claim itself
        if self.is_held_by(id) {
            self.terminate();
        }
        self.holder().is_none()
    }

    /// Records that `id` won its claim during the capture leg of `event`.
    /// Ignored unless `id` still holds the claim.
    pub(crate) fn mark_captured(&self, id: ResponderId, event: &InputEvent) {
        if let Some(claim) = self.inner.claim.borrow_mut().as_mut() {
            if claim.id == id {
                claim.captured_on = Some(event.clone());
            }
        }
    }

    /// Whether the current claim was installed by the capture leg of `event`.
    /// The bubble leg of the same event must not contest it.
    pub(crate) fn claimed_during_capture(&self, event: &InputEvent) -> bool {
        self.inner
            .claim
            .borrow()
            .as_ref()
            .and_then(|claim| claim.captured_on.as_ref())
            .is_some_and(|captured| captured.is_same_event(event))
    }

    /// Marks the start of a dispatch. Dropping the guard ends it.
    pub fn enter_dispatch(&self) -> Result<DispatchGuard, ResponderError> {
        if self.inner.dispatching.replace(true) {
            log::warn!("re-entrant dispatch rejected");
            return Err(ResponderError::Reentrant);
        }
        Ok(DispatchGuard {
            inner: Rc::clone(&self.inner),
        })
    }

    pub(crate) fn register(&self, id: ResponderId) -> Result<(), ResponderError> {
        if self.inner.attached.borrow_mut().insert(id) {
            Ok(())
        } else {
            Err(ResponderError::DuplicateId(id))
        }
    }

    pub(crate) fn unregister(&self, id: ResponderId) {
        self.inner.attached.borrow_mut().remove(&id);
    }

    pub fn attached_count(&self) -> usize {
        self.inner.attached.borrow().len()
    }
}

impl fmt::Debug for ArbitrationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArbitrationContext")
            .field("holder", &self.holder())
            .field("attached", &self.attached_count())
            .finish()
    }
}

/// Proof that a dispatch is in flight.
#[must_use = "the dispatch ends when the guard is dropped"]
pub struct DispatchGuard {
    inner: Rc<ArbitrationInner>,
}

impl Drop for DispatchGuard {
    fn drop(&mut self) {
        self.inner.dispatching.set(false);
    }
}

#[cfg(test)]
#[path = "tests/arbitration_tests.rs"]
mod tests;
