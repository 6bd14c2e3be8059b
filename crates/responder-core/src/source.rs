//! Input event sources.
//!
//! [`EventSource`] is the boundary with the host: anything that can hand out
//! start/move/end events per propagation phase. [`EventHub`] is the in-process
//! implementation used by the test harness and by hosts that translate their
//! platform callbacks themselves.

use crate::event::{EventKind, InputEvent, Phase, TargetId};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

pub type Listener = Rc<dyn Fn(&InputEvent)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub trait EventSource {
    /// Target listeners would be attached to, or `None` if the host element
    /// is gone.
    fn target(&self) -> Option<TargetId>;

    fn subscribe(&self, kind: EventKind, phase: Phase, listener: Listener) -> SubscriptionId;

    /// Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}

struct Subscription {
    id: SubscriptionId,
    kind: EventKind,
    phase: Phase,
    listener: Listener,
}

/// Listener table with two independent slots per event kind.
///
/// Listeners registered later are treated as nested deeper: the capture
/// phase runs them in registration order, the bubble phase in reverse.
pub struct EventHub {
    target: Cell<Option<TargetId>>,
    subscriptions: RefCell<Vec<Subscription>>,
    queue: RefCell<VecDeque<InputEvent>>,
    next_id: Cell<u64>,
    next_serial: Cell<u64>,
}

impl EventHub {
    pub fn new(target: TargetId) -> Self {
        Self {
            target: Cell::new(Some(target)),
            subscriptions: RefCell::new(Vec::new()),
            queue: RefCell::new(VecDeque::new()),
            next_id: Cell::new(1),
            next_serial: Cell::new(1),
        }
    }

    /// Detaches the hub from its host element. Later `attach` calls fail.
    pub fn set_target(&self, target: Option<TargetId>) {
        self.target.set(target);
    }

    pub fn listener_count(&self) -> usize {
        self.subscriptions.borrow().len()
    }

    /// Delivers `event` to capture listeners, then bubble listeners, for its kind.
    ///
    /// The listener list is snapshotted first, so listeners may subscribe or
    /// unsubscribe while running; changes apply to the next event.
    pub fn dispatch(&self, event: InputEvent) {
        let serial = self.next_serial.get();
        self.next_serial.set(serial + 1);
        let event = event.with_serial(serial);

        let (capture, bubble) = {
            let subscriptions = self.subscriptions.borrow();
            let matching = |phase: Phase| {
                subscriptions
                    .iter()
                    .filter(|s| s.kind == event.kind && s.phase == phase)
                    .map(|s| Rc::clone(&s.listener))
                    .collect::<Vec<_>>()
            };
            (matching(Phase::Capture), matching(Phase::Bubble))
        };

        for listener in &capture {
            listener(&event);
        }
        for listener in bubble.iter().rev() {
            listener(&event);
        }
    }

    /// Queues an event for a later [`EventHub::flush`].
    pub fn push(&self, event: InputEvent) {
        self.queue.borrow_mut().push_back(event);
    }

    /// Dispatches queued events in arrival order, including any queued while
    /// flushing.
    pub fn flush(&self) {
        loop {
            let next = self.queue.borrow_mut().pop_front();
            match next {
                Some(event) => self.dispatch(event),
                None => break,
            }
        }
    }
}

impl EventSource for EventHub {
    fn target(&self) -> Option<TargetId> {
        self.target.get()
    }

    fn subscribe(&self, kind: EventKind, phase: Phase, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscriptions.borrow_mut().push(Subscription {
            id,
            kind,
            phase,
            listener,
        });
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.subscriptions.borrow_mut().retain(|s| s.id != id);
    }
}
