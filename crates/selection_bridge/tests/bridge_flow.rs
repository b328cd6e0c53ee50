//! End-to-end dispatch/completion scenarios over the in-memory document host.

use std::rc::Rc;

use futures::executor::LocalPool;
use futures::future::RemoteHandle;
use futures::task::LocalSpawnExt;
use pretty_assertions::assert_eq;
use selection_bridge::{SelectionBridge, SelectionError};
use selection_host::{
    DirectoryEntry, FlowCompletion, FlowPayload, FlowRequest, LocationHandle, MemoryDocumentHost,
    PermissionFlags, PermissionMode, RequestKind, SelectionNode, SelectionResult,
};

type Outcome = Result<SelectionResult, SelectionError>;

fn bridge_over(host: &MemoryDocumentHost) -> Rc<SelectionBridge<MemoryDocumentHost>> {
    Rc::new(SelectionBridge::new(Rc::new(host.clone())))
}

/// Spawns a pick future and drives the pool until the chooser flow is open.
fn spawn_pick(
    pool: &mut LocalPool,
    bridge: &Rc<SelectionBridge<MemoryDocumentHost>>,
    kind: RequestKind,
) -> RemoteHandle<Outcome> {
    let handle = pool
        .spawner()
        .spawn_local_with_handle({
            let bridge = Rc::clone(bridge);
            async move {
                match kind {
                    RequestKind::FolderTree => bridge.pick_folder().await,
                    RequestKind::Documents => bridge.pick_files().await,
                }
            }
        })
        .expect("spawn pick");
    pool.run_until_stalled();
    handle
}

#[test]
fn folder_pick_round_trip_preserves_host_order_and_flags() {
    let host = MemoryDocumentHost::new();
    let root = LocationHandle::new("content://provider/tree/R");
    host.insert_directory(
        root.as_str(),
        vec![
            DirectoryEntry {
                name: "x".to_string(),
                is_directory: true,
                location: Some(LocationHandle::new("content://provider/tree/R/x")),
            },
            DirectoryEntry {
                name: "y.txt".to_string(),
                is_directory: false,
                location: Some(LocationHandle::new("content://provider/tree/R/y.txt")),
            },
        ],
    );
    let bridge = bridge_over(&host);

    let mut pool = LocalPool::new();
    let picked = spawn_pick(&mut pool, &bridge, RequestKind::FolderTree);

    assert_eq!(
        host.launched_flows(),
        vec![FlowRequest::FolderTree {
            grant: PermissionMode::Readwrite,
        }]
    );

    pool.run_until(bridge.handle_completion(FlowCompletion::delivered(
        RequestKind::FolderTree.flow_id(),
        FlowPayload::Tree {
            root: root.clone(),
            grant_flags: PermissionFlags::READ_WRITE,
        },
    )));

    let result = pool.run_until(picked).expect("folder selection");
    assert_eq!(result.root_location, Some(root.clone()));
    assert_eq!(
        result.children,
        vec![
            SelectionNode {
                name: "x".to_string(),
                is_directory: true,
                location: Some(LocationHandle::new("content://provider/tree/R/x")),
            },
            SelectionNode {
                name: "y.txt".to_string(),
                is_directory: false,
                location: Some(LocationHandle::new("content://provider/tree/R/y.txt")),
            },
        ]
    );
    assert_eq!(host.taken_grants(), vec![(root, PermissionFlags::READ_WRITE)]);
}

#[test]
fn document_pick_round_trip_preserves_clip_order() {
    let host = MemoryDocumentHost::new();
    let bridge = bridge_over(&host);

    let mut pool = LocalPool::new();
    let picked = spawn_pick(&mut pool, &bridge, RequestKind::Documents);

    assert_eq!(
        host.launched_flows(),
        vec![FlowRequest::Documents {
            multiple: true,
            mime_filter: "*/*".to_string(),
        }]
    );

    pool.run_until(bridge.handle_completion(FlowCompletion::delivered(
        RequestKind::Documents.flow_id(),
        FlowPayload::Documents {
            items: vec![
                LocationHandle::new("a/doc1.pdf"),
                LocationHandle::new("b/doc2.txt"),
                LocationHandle::new("c/doc3.png"),
            ],
        },
    )));

    let result = pool.run_until(picked).expect("document selection");
    assert_eq!(result.root_location, None);
    let names: Vec<&str> = result.children.iter().map(|node| node.name.as_str()).collect();
    assert_eq!(names, vec!["doc1.pdf", "doc2.txt", "doc3.png"]);
    assert!(result.children.iter().all(|node| !node.is_directory));
    // No grant step for the document flow.
    assert!(host.taken_grants().is_empty());
}

#[test]
fn singleton_document_payload_yields_one_node() {
    let host = MemoryDocumentHost::new();
    let bridge = bridge_over(&host);

    let mut pool = LocalPool::new();
    let picked = spawn_pick(&mut pool, &bridge, RequestKind::Documents);

    pool.run_until(bridge.handle_completion(FlowCompletion::delivered(
        RequestKind::Documents.flow_id(),
        FlowPayload::Document {
            item: LocationHandle::new("content://provider/doc/report%20final.pdf"),
        },
    )));

    let result = pool.run_until(picked).expect("document selection");
    assert_eq!(result.children.len(), 1);
    assert_eq!(result.children[0].name, "report final.pdf");
    assert!(!result.children[0].is_directory);
}

#[test]
fn folder_normalization_never_recurses() {
    let host = MemoryDocumentHost::new();
    let root = LocationHandle::new("/R");
    // /R contains a subdirectory which itself contains files; only the
    // subdirectory may appear in the result.
    host.insert_directory(
        "/R",
        vec![DirectoryEntry {
            name: "nested".to_string(),
            is_directory: true,
            location: Some(LocationHandle::new("/R/nested")),
        }],
    );
    host.insert_directory(
        "/R/nested",
        vec![DirectoryEntry {
            name: "deep.txt".to_string(),
            is_directory: false,
            location: Some(LocationHandle::new("/R/nested/deep.txt")),
        }],
    );
    let bridge = bridge_over(&host);

    let mut pool = LocalPool::new();
    let picked = spawn_pick(&mut pool, &bridge, RequestKind::FolderTree);
    pool.run_until(bridge.handle_completion(FlowCompletion::delivered(
        RequestKind::FolderTree.flow_id(),
        FlowPayload::Tree {
            root,
            grant_flags: PermissionFlags::READ,
        },
    )));

    let result = pool.run_until(picked).expect("folder selection");
    assert_eq!(result.children.len(), 1);
    assert_eq!(result.children[0].name, "nested");
    assert!(result.children[0].is_directory);
}

#[test]
fn unresolvable_root_still_resolves_with_empty_children() {
    let host = MemoryDocumentHost::new();
    let bridge = bridge_over(&host);
    let root = LocationHandle::new("content://provider/tree/gone");

    let mut pool = LocalPool::new();
    let picked = spawn_pick(&mut pool, &bridge, RequestKind::FolderTree);
    pool.run_until(bridge.handle_completion(FlowCompletion::delivered(
        RequestKind::FolderTree.flow_id(),
        FlowPayload::Tree {
            root: root.clone(),
            grant_flags: PermissionFlags::READ_WRITE,
        },
    )));

    let result = pool.run_until(picked).expect("no rejection for unresolvable root");
    assert_eq!(result.root_location, Some(root));
    assert!(result.children.is_empty());
}

#[test]
fn absent_payload_rejects_with_no_selection_and_clears_state() {
    let host = MemoryDocumentHost::new();
    let bridge = bridge_over(&host);

    let mut pool = LocalPool::new();
    let picked = spawn_pick(&mut pool, &bridge, RequestKind::Documents);

    let cancellation = FlowCompletion::canceled(RequestKind::Documents.flow_id());
    pool.run_until(bridge.handle_completion(cancellation.clone()));
    assert_eq!(pool.run_until(picked), Err(SelectionError::NoSelection));

    // A second identical signal finds no pending call and is a no-op.
    pool.run_until(bridge.handle_completion(cancellation));
}

#[test]
fn empty_document_set_rejects_with_no_selection() {
    let host = MemoryDocumentHost::new();
    let bridge = bridge_over(&host);

    let mut pool = LocalPool::new();
    let picked = spawn_pick(&mut pool, &bridge, RequestKind::Documents);
    pool.run_until(bridge.handle_completion(FlowCompletion::delivered(
        RequestKind::Documents.flow_id(),
        FlowPayload::Documents { items: Vec::new() },
    )));

    assert_eq!(pool.run_until(picked), Err(SelectionError::NoSelection));
}

#[test]
fn second_dispatch_supersedes_the_first_caller() {
    let host = MemoryDocumentHost::new();
    let bridge = bridge_over(&host);

    let mut pool = LocalPool::new();
    let first = spawn_pick(&mut pool, &bridge, RequestKind::FolderTree);
    let second = spawn_pick(&mut pool, &bridge, RequestKind::Documents);

    // The displaced caller is rejected immediately.
    assert_eq!(pool.run_until(first), Err(SelectionError::Superseded));

    // Only the second call is still addressable by a completion.
    pool.run_until(bridge.handle_completion(FlowCompletion::delivered(
        RequestKind::Documents.flow_id(),
        FlowPayload::Document {
            item: LocationHandle::new("a/doc1.pdf"),
        },
    )));
    let result = pool.run_until(second).expect("second selection");
    assert_eq!(result.children[0].name, "doc1.pdf");
}

#[test]
fn unrelated_completions_leave_the_pending_call_open() {
    let host = MemoryDocumentHost::new();
    let bridge = bridge_over(&host);

    let mut pool = LocalPool::new();
    let picked = spawn_pick(&mut pool, &bridge, RequestKind::Documents);

    // This callback channel also carries completions the bridge never asked
    // for; they must not consume the pending call.
    pool.run_until(bridge.handle_completion(FlowCompletion {
        flow: selection_host::FlowId(41),
        status: selection_host::FlowStatus::Ok,
        payload: None,
    }));

    pool.run_until(bridge.handle_completion(FlowCompletion::delivered(
        RequestKind::Documents.flow_id(),
        FlowPayload::Document {
            item: LocationHandle::new("b/doc2.txt"),
        },
    )));
    let result = pool.run_until(picked).expect("selection still deliverable");
    assert_eq!(result.children[0].name, "doc2.txt");
}

#[test]
fn mismatched_payload_shape_rejects_instead_of_cross_contaminating() {
    let host = MemoryDocumentHost::new();
    host.insert_directory(
        "/R",
        vec![DirectoryEntry {
            name: "x".to_string(),
            is_directory: true,
            location: None,
        }],
    );
    let bridge = bridge_over(&host);

    let mut pool = LocalPool::new();
    let picked = spawn_pick(&mut pool, &bridge, RequestKind::Documents);

    // A folder-flow completion while a document pick is pending: the document
    // normalization path cannot consume a tree payload, so the caller is
    // rejected rather than handed a folder-shaped result.
    pool.run_until(bridge.handle_completion(FlowCompletion::delivered(
        RequestKind::FolderTree.flow_id(),
        FlowPayload::Tree {
            root: LocationHandle::new("/R"),
            grant_flags: PermissionFlags::READ_WRITE,
        },
    )));

    assert_eq!(pool.run_until(picked), Err(SelectionError::NoSelection));
    // The folder path was never invoked for it: no grant was taken.
    assert!(host.taken_grants().is_empty());
}
