//! Single-slot pending-call state shared by dispatcher and correlator.

use std::cell::RefCell;

use futures::channel::oneshot;
use selection_host::{RequestKind, SelectionResult};

use crate::error::SelectionError;

/// Outcome delivered to a pick caller.
pub(crate) type SelectionOutcome = Result<SelectionResult, SelectionError>;

/// The single in-flight caller: request kind marker plus its responder.
///
/// Created at dispatch, consumed exactly once at resolution. The dispatch cycle
/// number lets the dispatcher identify its own call in the slot after awaiting
/// the host launch (another dispatch may have replaced it in the meantime).
pub(crate) struct PendingCall {
    cycle: u64,
    kind: RequestKind,
    responder: oneshot::Sender<SelectionOutcome>,
}

impl PendingCall {
    pub(crate) fn new(cycle: u64, kind: RequestKind) -> (Self, oneshot::Receiver<SelectionOutcome>) {
        let (responder, receiver) = oneshot::channel();
        (
            Self {
                cycle,
                kind,
                responder,
            },
            receiver,
        )
    }

    pub(crate) fn kind(&self) -> RequestKind {
        self.kind
    }

    /// Resolves or rejects the caller. A caller that already went away (its
    /// receiver dropped) is a no-op.
    pub(crate) fn resolve(self, outcome: SelectionOutcome) {
        let _ = self.responder.send(outcome);
    }
}

/// One-element holder for the in-flight call.
///
/// `store` replaces any previous occupant and hands it back so the dispatcher
/// can reject it; `take` clears the slot in the same step that reads it, which
/// makes duplicate completion delivery a natural no-op.
#[derive(Default)]
pub(crate) struct PendingSlot {
    slot: RefCell<Option<PendingCall>>,
}

impl PendingSlot {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Stores `call`, returning the displaced occupant if there was one.
    pub(crate) fn store(&self, call: PendingCall) -> Option<PendingCall> {
        self.slot.borrow_mut().replace(call)
    }

    /// Takes the pending call out of the slot.
    pub(crate) fn take(&self) -> Option<PendingCall> {
        self.slot.borrow_mut().take()
    }

    /// Takes the pending call only if it belongs to the given dispatch cycle.
    pub(crate) fn take_if_cycle(&self, cycle: u64) -> Option<PendingCall> {
        let mut slot = self.slot.borrow_mut();
        if slot.as_ref().is_some_and(|call| call.cycle == cycle) {
            slot.take()
        } else {
            None
        }
    }
}
