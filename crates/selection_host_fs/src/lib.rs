//! Scoped native-filesystem adapter for the document-host contract.
//!
//! [`ScopedFsDocumentHost`] serves directory resolution and permission grants
//! over a canonicalized native root directory, using normalized virtual paths
//! as its location-handle scheme. The chooser UI itself belongs to the
//! embedding shell: launching a flow is recorded and succeeds, and the shell
//! feeds the eventual pick back to the bridge as a flow completion. This is
//! also the adapter the end-to-end integration tests drive.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod path;

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use selection_host::{
    DirectoryEntry, DocumentHost, DocumentHostFuture, FlowRequest, LocationHandle, PermissionFlags,
};

pub use path::normalize_virtual_path;

fn canonical_root(root: &Path) -> Result<PathBuf, String> {
    fs::canonicalize(root)
        .map_err(|err| format!("failed to canonicalize {}: {err}", root.display()))
}

#[derive(Debug, Default)]
struct ScopedFsState {
    launched: Vec<FlowRequest>,
    grants: Vec<(LocationHandle, PermissionFlags)>,
}

#[derive(Debug)]
/// Document host rooted at a canonical native directory.
///
/// Handles are normalized virtual paths (`/docs/reports`) resolved strictly
/// inside the scoped root; a handle that escapes the root never resolves.
/// Persistable grants are recorded in an in-process registry, standing in for
/// the durable permission store a real platform host keeps.
pub struct ScopedFsDocumentHost {
    root: PathBuf,
    state: RefCell<ScopedFsState>,
}

impl ScopedFsDocumentHost {
    /// Creates a scoped host rooted at `root`.
    ///
    /// The root directory is created if needed and canonicalized before use.
    pub fn from_root(root: impl AsRef<Path>) -> Result<Self, String> {
        let root = root.as_ref();
        fs::create_dir_all(root)
            .map_err(|err| format!("failed to create host root {}: {err}", root.display()))?;
        Ok(Self {
            root: canonical_root(root)?,
            state: RefCell::new(ScopedFsState::default()),
        })
    }

    /// Mints the location handle for a virtual path under the root.
    pub fn handle_for(&self, virtual_path: &str) -> LocationHandle {
        LocationHandle::new(normalize_virtual_path(virtual_path))
    }

    /// Returns every flow request launched so far, in order.
    pub fn launched_flows(&self) -> Vec<FlowRequest> {
        self.state.borrow().launched.clone()
    }

    /// Returns every persistable grant taken so far, in order.
    pub fn taken_grants(&self) -> Vec<(LocationHandle, PermissionFlags)> {
        self.state.borrow().grants.clone()
    }

    fn native_path(&self, handle: &LocationHandle) -> PathBuf {
        let normalized = normalize_virtual_path(handle.as_str());
        let mut native = self.root.clone();
        for segment in normalized.trim_start_matches('/').split('/') {
            if !segment.is_empty() {
                native.push(segment);
            }
        }
        native
    }

    /// Canonicalizes `native` and checks it stays inside the scoped root.
    /// Symlinks pointing outside the root fail here.
    fn ensure_within_root(&self, native: &Path) -> Result<PathBuf, String> {
        let canonical = fs::canonicalize(native)
            .map_err(|err| format!("failed to canonicalize {}: {err}", native.display()))?;
        if canonical.starts_with(&self.root) {
            Ok(canonical)
        } else {
            Err(format!(
                "handle `{}` resolves outside the scoped root",
                native.display()
            ))
        }
    }

    fn child_handle(&self, parent: &str, child_name: &str) -> LocationHandle {
        let parent = normalize_virtual_path(parent);
        if parent == "/" {
            LocationHandle::new(format!("/{child_name}"))
        } else {
            LocationHandle::new(format!("{parent}/{child_name}"))
        }
    }

    fn list_children(&self, handle: &LocationHandle) -> Result<Option<Vec<DirectoryEntry>>, String> {
        let native = self.native_path(handle);
        let canonical = match self.ensure_within_root(&native) {
            Ok(canonical) => canonical,
            // A handle that does not exist or escapes the root simply does not
            // resolve as a directory.
            Err(_) => return Ok(None),
        };
        let metadata = fs::metadata(&canonical)
            .map_err(|err| format!("failed to read metadata {}: {err}", canonical.display()))?;
        if !metadata.is_dir() {
            return Ok(None);
        }

        let mut entries = Vec::new();
        let read_dir = fs::read_dir(&canonical)
            .map_err(|err| format!("failed to read directory {}: {err}", canonical.display()))?;
        for entry in read_dir {
            let entry =
                entry.map_err(|err| format!("failed to read directory entry: {err}"))?;
            let name = entry.file_name().to_string_lossy().to_string();
            // An entry that vanishes between listing and stat is dropped.
            let Ok(child_meta) = entry.metadata() else {
                continue;
            };
            entries.push(DirectoryEntry {
                name: name.clone(),
                is_directory: child_meta.is_dir(),
                location: Some(self.child_handle(handle.as_str(), &name)),
            });
        }
        // Host-reported order: whatever read_dir yields, no sorting imposed.
        Ok(Some(entries))
    }
}

impl DocumentHost for ScopedFsDocumentHost {
    fn launch_selection_flow<'a>(
        &'a self,
        request: FlowRequest,
    ) -> DocumentHostFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.state.borrow_mut().launched.push(request);
            Ok(())
        })
    }

    fn take_persistable_permission<'a>(
        &'a self,
        handle: &'a LocationHandle,
        flags: PermissionFlags,
    ) -> DocumentHostFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let native = self.native_path(handle);
            self.ensure_within_root(&native)?;
            self.state
                .borrow_mut()
                .grants
                .push((handle.clone(), flags));
            Ok(())
        })
    }

    fn resolve_directory<'a>(
        &'a self,
        handle: &'a LocationHandle,
    ) -> DocumentHostFuture<'a, Result<Option<Vec<DirectoryEntry>>, String>> {
        Box::pin(async move { self.list_children(handle) })
    }
}
