//! Document-host service contract and baseline adapters.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use crate::{
    flow::{FlowRequest, PermissionFlags},
    handle::LocationHandle,
    node::DirectoryEntry,
};

/// Object-safe boxed future used by [`DocumentHost`] async methods.
pub type DocumentHostFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service wrapping the native document chooser and its side channels.
///
/// Launching a flow transfers UI control to the host; the eventual completion is
/// delivered back to the bridge out-of-band as a
/// [`FlowCompletion`](crate::FlowCompletion). The permission and enumeration
/// methods are best-effort side channels: callers are expected to fold their
/// `Err` branches into absent values rather than propagate them.
pub trait DocumentHost {
    /// Starts the native chooser UI for the given flow request.
    fn launch_selection_flow<'a>(
        &'a self,
        request: FlowRequest,
    ) -> DocumentHostFuture<'a, Result<(), String>>;

    /// Takes a durable permission grant for a handle with the given flags.
    fn take_persistable_permission<'a>(
        &'a self,
        handle: &'a LocationHandle,
        flags: PermissionFlags,
    ) -> DocumentHostFuture<'a, Result<(), String>>;

    /// Resolves a handle as a directory and lists its immediate children.
    ///
    /// Returns `Ok(None)` when the handle does not resolve as a directory.
    /// Children are reported in host enumeration order; no ordering is imposed.
    fn resolve_directory<'a>(
        &'a self,
        handle: &'a LocationHandle,
    ) -> DocumentHostFuture<'a, Result<Option<Vec<DirectoryEntry>>, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op document host for unsupported targets and baseline tests.
pub struct NoopDocumentHost;

impl NoopDocumentHost {
    fn unsupported_error(op: &str) -> String {
        format!("document host unavailable: {op}")
    }
}

impl DocumentHost for NoopDocumentHost {
    fn launch_selection_flow<'a>(
        &'a self,
        _request: FlowRequest,
    ) -> DocumentHostFuture<'a, Result<(), String>> {
        Box::pin(async { Err(Self::unsupported_error("launch_selection_flow")) })
    }

    fn take_persistable_permission<'a>(
        &'a self,
        _handle: &'a LocationHandle,
        _flags: PermissionFlags,
    ) -> DocumentHostFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn resolve_directory<'a>(
        &'a self,
        _handle: &'a LocationHandle,
    ) -> DocumentHostFuture<'a, Result<Option<Vec<DirectoryEntry>>, String>> {
        Box::pin(async { Ok(None) })
    }
}

#[derive(Debug, Default)]
struct MemoryHostState {
    directories: HashMap<String, Vec<DirectoryEntry>>,
    launched: Vec<FlowRequest>,
    grants: Vec<(LocationHandle, PermissionFlags)>,
    launch_error: Option<String>,
    permission_error: Option<String>,
    resolve_error: Option<String>,
}

#[derive(Debug, Clone, Default)]
/// In-memory document host used as the test double for the selection bridge.
///
/// Directory listings are seeded per handle; launched flows and taken grants are
/// recorded for assertions. Each side channel can be forced into a failure mode
/// to exercise best-effort degradation paths.
pub struct MemoryDocumentHost {
    inner: Rc<RefCell<MemoryHostState>>,
}

impl MemoryDocumentHost {
    /// Creates an empty memory host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the directory listing resolved for `handle`.
    pub fn insert_directory(&self, handle: impl Into<LocationHandle>, entries: Vec<DirectoryEntry>) {
        self.inner
            .borrow_mut()
            .directories
            .insert(handle.into().as_str().to_string(), entries);
    }

    /// Returns every flow request launched so far, in order.
    pub fn launched_flows(&self) -> Vec<FlowRequest> {
        self.inner.borrow().launched.clone()
    }

    /// Returns every persistable grant taken so far, in order.
    pub fn taken_grants(&self) -> Vec<(LocationHandle, PermissionFlags)> {
        self.inner.borrow().grants.clone()
    }

    /// Makes every subsequent flow launch fail with `message`.
    pub fn set_launch_error(&self, message: impl Into<String>) {
        self.inner.borrow_mut().launch_error = Some(message.into());
    }

    /// Makes every subsequent permission take fail with `message`.
    pub fn set_permission_error(&self, message: impl Into<String>) {
        self.inner.borrow_mut().permission_error = Some(message.into());
    }

    /// Makes every subsequent directory resolution fail with `message`.
    pub fn set_resolve_error(&self, message: impl Into<String>) {
        self.inner.borrow_mut().resolve_error = Some(message.into());
    }
}

impl DocumentHost for MemoryDocumentHost {
    fn launch_selection_flow<'a>(
        &'a self,
        request: FlowRequest,
    ) -> DocumentHostFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            if let Some(message) = state.launch_error.clone() {
                return Err(message);
            }
            state.launched.push(request);
            Ok(())
        })
    }

    fn take_persistable_permission<'a>(
        &'a self,
        handle: &'a LocationHandle,
        flags: PermissionFlags,
    ) -> DocumentHostFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            if let Some(message) = state.permission_error.clone() {
                return Err(message);
            }
            state.grants.push((handle.clone(), flags));
            Ok(())
        })
    }

    fn resolve_directory<'a>(
        &'a self,
        handle: &'a LocationHandle,
    ) -> DocumentHostFuture<'a, Result<Option<Vec<DirectoryEntry>>, String>> {
        Box::pin(async move {
            let state = self.inner.borrow();
            if let Some(message) = state.resolve_error.clone() {
                return Err(message);
            }
            Ok(state.directories.get(handle.as_str()).cloned())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::flow::RequestKind;

    #[test]
    fn noop_document_host_reports_unsupported_launch() {
        let host = NoopDocumentHost;
        let host_obj: &dyn DocumentHost = &host;

        let err = block_on(host_obj.launch_selection_flow(RequestKind::Documents.flow_request()))
            .expect_err("launch should fail");
        assert!(err.contains("launch_selection_flow"));

        let handle = LocationHandle::new("content://provider/tree/docs");
        block_on(host_obj.take_persistable_permission(&handle, PermissionFlags::READ))
            .expect("permission take is vacuous");
        assert_eq!(
            block_on(host_obj.resolve_directory(&handle)).expect("resolve"),
            None
        );
    }

    #[test]
    fn memory_document_host_records_launches_and_grants() {
        let host = MemoryDocumentHost::new();
        let handle = LocationHandle::new("/docs");
        host.insert_directory(
            "/docs",
            vec![DirectoryEntry {
                name: "x".to_string(),
                is_directory: true,
                location: Some(LocationHandle::new("/docs/x")),
            }],
        );

        block_on(host.launch_selection_flow(RequestKind::FolderTree.flow_request()))
            .expect("launch");
        block_on(host.take_persistable_permission(&handle, PermissionFlags::READ_WRITE))
            .expect("grant");

        assert_eq!(host.launched_flows().len(), 1);
        assert_eq!(host.taken_grants(), vec![(handle.clone(), PermissionFlags::READ_WRITE)]);

        let entries = block_on(host.resolve_directory(&handle))
            .expect("resolve")
            .expect("seeded directory");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "x");

        let missing = LocationHandle::new("/absent");
        assert_eq!(block_on(host.resolve_directory(&missing)).expect("resolve"), None);
    }

    #[test]
    fn memory_document_host_failure_modes_surface_as_errors() {
        let host = MemoryDocumentHost::new();
        host.set_launch_error("chooser unavailable");
        host.set_permission_error("grant refused");
        host.set_resolve_error("provider gone");

        let handle = LocationHandle::new("/docs");
        assert_eq!(
            block_on(host.launch_selection_flow(RequestKind::Documents.flow_request())),
            Err("chooser unavailable".to_string())
        );
        assert_eq!(
            block_on(host.take_persistable_permission(&handle, PermissionFlags::READ)),
            Err("grant refused".to_string())
        );
        assert_eq!(
            block_on(host.resolve_directory(&handle)),
            Err("provider gone".to_string())
        );
    }
}
