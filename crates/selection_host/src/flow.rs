//! Selection-flow identifiers, launch requests, and completion events.

use serde::{Deserialize, Serialize};

use crate::handle::LocationHandle;

/// Wire identifier of the folder-tree chooser flow.
pub const FOLDER_TREE_FLOW_ID: FlowId = FlowId(90210);
/// Wire identifier of the multi-document chooser flow.
pub const DOCUMENT_FLOW_ID: FlowId = FlowId(90211);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Tag distinguishing which chooser flow a completion event belongs to.
///
/// The completion channel is shared with unrelated host callbacks, so the bridge
/// only reacts to the two identifiers it dispatched with and ignores everything
/// else.
pub struct FlowId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Kind of selection requested by the caller. Exactly two flows exist.
pub enum RequestKind {
    /// Pick a single folder and enumerate its immediate children.
    FolderTree,
    /// Pick one or more documents from any provider.
    Documents,
}

impl RequestKind {
    /// Returns the stable flow identifier used to correlate completions.
    pub const fn flow_id(self) -> FlowId {
        match self {
            Self::FolderTree => FOLDER_TREE_FLOW_ID,
            Self::Documents => DOCUMENT_FLOW_ID,
        }
    }

    /// Maps a completion flow identifier back to a request kind.
    ///
    /// Returns `None` for identifiers the bridge never dispatched.
    pub fn from_flow_id(flow: FlowId) -> Option<Self> {
        match flow {
            FOLDER_TREE_FLOW_ID => Some(Self::FolderTree),
            DOCUMENT_FLOW_ID => Some(Self::Documents),
            _ => None,
        }
    }

    /// Builds the kind-appropriate flow launch request.
    ///
    /// The folder flow asks for a persistable read+write grant; the document
    /// flow asks for an openable, multi-select, any-type chooser.
    pub fn flow_request(self) -> FlowRequest {
        match self {
            Self::FolderTree => FlowRequest::FolderTree {
                grant: PermissionMode::Readwrite,
            },
            Self::Documents => FlowRequest::Documents {
                multiple: true,
                mime_filter: "*/*".to_string(),
            },
        }
    }

    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FolderTree => "folder-tree",
            Self::Documents => "documents",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Permission mode requested when taking a durable grant.
pub enum PermissionMode {
    /// Read-only access.
    Read,
    /// Read/write access.
    Readwrite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Grant flag bundle delivered alongside a folder-tree payload.
///
/// The host reports which of the requested grant flags it actually attached to
/// the selection; the bridge takes the persistable permission with exactly these
/// flags rather than the ones it asked for.
pub struct PermissionFlags {
    /// Read access was granted.
    pub read: bool,
    /// Write access was granted.
    pub write: bool,
}

impl PermissionFlags {
    /// Read-only flag bundle.
    pub const READ: Self = Self {
        read: true,
        write: false,
    };
    /// Read/write flag bundle.
    pub const READ_WRITE: Self = Self {
        read: true,
        write: true,
    };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "flow", rename_all = "kebab-case")]
/// Parameters handed to the host when launching a chooser flow.
pub enum FlowRequest {
    /// Launch the directory-tree chooser.
    FolderTree {
        /// Durable grant mode to request for the picked tree.
        grant: PermissionMode,
    },
    /// Launch the openable document chooser.
    Documents {
        /// Allow selecting more than one document.
        multiple: bool,
        /// MIME filter for offered documents.
        mime_filter: String,
    },
}

impl FlowRequest {
    /// Returns the flow identifier the completion for this request will carry.
    pub const fn flow_id(&self) -> FlowId {
        match self {
            Self::FolderTree { .. } => FOLDER_TREE_FLOW_ID,
            Self::Documents { .. } => DOCUMENT_FLOW_ID,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Host-reported completion status of a chooser flow.
pub enum FlowStatus {
    /// The flow finished normally (a payload may still be absent).
    Ok,
    /// The flow was dismissed without a selection.
    Canceled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
/// Raw native payload carried by a flow completion.
pub enum FlowPayload {
    /// Folder-tree selection: one root handle plus the granted flag bundle.
    Tree {
        /// Picked directory root.
        root: LocationHandle,
        /// Grant flags the host attached to the selection.
        grant_flags: PermissionFlags,
    },
    /// Clip-style multi-document selection.
    Documents {
        /// Picked document handles in host clipboard order.
        items: Vec<LocationHandle>,
    },
    /// Single-document selection (providers that skip the clip set).
    Document {
        /// Picked document handle.
        item: LocationHandle,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Completion signal delivered by the host when a chooser flow finishes.
pub struct FlowCompletion {
    /// Flow identifier the completion belongs to.
    pub flow: FlowId,
    /// Host-reported status.
    pub status: FlowStatus,
    /// Raw payload; absent when the user dismissed the chooser.
    pub payload: Option<FlowPayload>,
}

impl FlowCompletion {
    /// Builds a completed signal carrying a payload.
    pub fn delivered(flow: FlowId, payload: FlowPayload) -> Self {
        Self {
            flow,
            status: FlowStatus::Ok,
            payload: Some(payload),
        }
    }

    /// Builds a cancellation signal with no payload.
    pub fn canceled(flow: FlowId) -> Self {
        Self {
            flow,
            status: FlowStatus::Canceled,
            payload: None,
        }
    }
}
