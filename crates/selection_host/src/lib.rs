//! Typed host-domain contracts and shared models for native selection flows.
//!
//! This crate is the API-first boundary between the selection bridge and the host
//! OS document chooser. It exposes the shared flow/payload/result models and the
//! [`DocumentHost`] service trait, while concrete adapters live in host-specific
//! crates (`selection_host_fs` for the scoped native filesystem) and the
//! request/response correlation layer lives in `selection_bridge`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod flow;
pub mod handle;
pub mod host;
pub mod node;

pub use flow::{
    FlowCompletion, FlowId, FlowPayload, FlowRequest, FlowStatus, PermissionFlags, PermissionMode,
    RequestKind, DOCUMENT_FLOW_ID, FOLDER_TREE_FLOW_ID,
};
pub use handle::LocationHandle;
pub use host::{DocumentHost, DocumentHostFuture, MemoryDocumentHost, NoopDocumentHost};
pub use node::{DirectoryEntry, SelectionNode, SelectionResult};
