//! Payload normalization for the two chooser flows.

use selection_host::{
    DocumentHost, FlowPayload, LocationHandle, PermissionFlags, RequestKind, SelectionNode,
    SelectionResult,
};

/// Normalizes a raw payload for the given request kind.
///
/// Returns `None` when the payload carries no usable location for the kind
/// (empty document set, or a payload shape the kind cannot consume); the
/// correlator turns that into a `No selection` rejection.
pub(crate) async fn normalize<H: DocumentHost + ?Sized>(
    host: &H,
    kind: RequestKind,
    payload: FlowPayload,
) -> Option<SelectionResult> {
    match (kind, payload) {
        (RequestKind::FolderTree, FlowPayload::Tree { root, grant_flags }) => {
            Some(folder_tree(host, root, grant_flags).await)
        }
        (RequestKind::Documents, FlowPayload::Documents { items }) => documents(items),
        (RequestKind::Documents, FlowPayload::Document { item }) => documents(vec![item]),
        _ => None,
    }
}

/// Folder-tree path: persist the grant, then enumerate immediate children.
///
/// Both side calls are best-effort. A failed grant still leaves the transient
/// session access intact, and a root that cannot be resolved as a directory
/// still yields a result carrying the root location with no children.
async fn folder_tree<H: DocumentHost + ?Sized>(
    host: &H,
    root: LocationHandle,
    grant_flags: PermissionFlags,
) -> SelectionResult {
    let _ = host.take_persistable_permission(&root, grant_flags).await;

    let children = match host.resolve_directory(&root).await {
        Ok(Some(entries)) => entries.into_iter().map(SelectionNode::from).collect(),
        Ok(None) | Err(_) => Vec::new(),
    };

    SelectionResult {
        root_location: Some(root),
        children,
    }
}

/// Multi-document path: one node per handle, in host clipboard order.
///
/// The chooser cannot select directories, so every node is a file. Names come
/// from the handle's last path segment; a handle with no derivable segment
/// falls back to its full reference string.
fn documents(items: Vec<LocationHandle>) -> Option<SelectionResult> {
    if items.is_empty() {
        return None;
    }

    let children = items
        .into_iter()
        .map(|item| {
            let name = item
                .last_path_segment()
                .unwrap_or_else(|| item.as_str().to_string());
            SelectionNode {
                name,
                is_directory: false,
                location: Some(item),
            }
        })
        .collect();

    Some(SelectionResult {
        root_location: None,
        children,
    })
}
