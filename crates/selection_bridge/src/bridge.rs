//! The selection bridge: request dispatch, completion correlation, resolution.

use std::cell::Cell;
use std::rc::Rc;

use selection_host::{DocumentHost, FlowCompletion, RequestKind, SelectionResult};

use crate::error::SelectionError;
use crate::normalize;
use crate::pending::{PendingCall, PendingSlot};

/// Bridge between pick callers and the host document chooser.
///
/// One dispatch cycle runs `IDLE → DISPATCHED → {RESOLVED | REJECTED} → IDLE`:
/// a pick call stores itself as the single pending call and launches the
/// chooser flow; control only re-enters the bridge through
/// [`handle_completion`](Self::handle_completion), which matches the event to
/// the pending call and resolves it exactly once. No timeouts are enforced; a
/// flow the host never completes leaves the call pending until a newer dispatch
/// displaces it.
///
/// The bridge is single-threaded-cooperative: completions must be delivered on
/// the same logical thread that dispatched, which is the host contract this
/// crate is written against.
pub struct SelectionBridge<H: ?Sized> {
    host: Rc<H>,
    pending: PendingSlot,
    next_cycle: Cell<u64>,
}

impl<H: DocumentHost + ?Sized> SelectionBridge<H> {
    /// Creates a bridge over the given document host.
    pub fn new(host: Rc<H>) -> Self {
        Self {
            host,
            pending: PendingSlot::new(),
            next_cycle: Cell::new(0),
        }
    }

    /// Asks the user to pick a folder; resolves with the folder's root handle
    /// and its immediate children.
    pub async fn pick_folder(&self) -> Result<SelectionResult, SelectionError> {
        self.dispatch(RequestKind::FolderTree).await
    }

    /// Asks the user to pick one or more documents; resolves with one file
    /// node per picked document.
    pub async fn pick_files(&self) -> Result<SelectionResult, SelectionError> {
        self.dispatch(RequestKind::Documents).await
    }

    async fn dispatch(&self, kind: RequestKind) -> Result<SelectionResult, SelectionError> {
        let cycle = self.next_cycle.get();
        self.next_cycle.set(cycle.wrapping_add(1));

        let (call, receiver) = PendingCall::new(cycle, kind);
        if let Some(stale) = self.pending.store(call) {
            // Single-slot state: the chooser UI is modal and exclusive, so a
            // newer dispatch displaces the older caller rather than queueing.
            stale.resolve(Err(SelectionError::Superseded));
        }

        if self.host.launch_selection_flow(kind.flow_request()).await.is_err() {
            // The flow never started, so no completion will arrive for this
            // call. Only reclaim the slot if it still holds this dispatch.
            if let Some(call) = self.pending.take_if_cycle(cycle) {
                call.resolve(Err(SelectionError::NoSelection));
            }
        }

        match receiver.await {
            Ok(outcome) => outcome,
            // Responder dropped without resolving: the bridge itself went away
            // mid-flow, indistinguishable from being displaced.
            Err(_canceled) => Err(SelectionError::Superseded),
        }
    }

    /// Correlates a host completion signal with the pending call.
    ///
    /// Completions for unknown flow identifiers and completions with no pending
    /// call are ignored; the latter also makes duplicate delivery idempotent,
    /// since the first delivery takes the call out of the slot. The pending
    /// call is resolved or rejected exactly once per dispatch cycle.
    pub async fn handle_completion(&self, completion: FlowCompletion) {
        if RequestKind::from_flow_id(completion.flow).is_none() {
            return;
        }
        let Some(call) = self.pending.take() else {
            return;
        };

        let outcome = match completion.payload {
            Some(payload) => {
                match normalize::normalize(self.host.as_ref(), call.kind(), payload).await {
                    Some(result) => Ok(result),
                    None => Err(SelectionError::NoSelection),
                }
            }
            None => Err(SelectionError::NoSelection),
        };
        call.resolve(outcome);
    }
}
