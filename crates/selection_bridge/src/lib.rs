//! Asynchronous request/response correlation layer for native selection flows.
//!
//! The bridge turns a caller-facing pick request into a host chooser launch,
//! holds the caller in a single-slot pending state across the opaque UI flow,
//! matches the eventual completion signal back to that caller, and normalizes
//! the two native payload shapes into one uniform
//! [`SelectionResult`](selection_host::SelectionResult). Host specifics stay
//! behind the [`DocumentHost`](selection_host::DocumentHost) contract; this
//! crate owns only dispatch, correlation, and normalization.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod bridge;
pub mod error;
mod normalize;
mod pending;

pub use bridge::SelectionBridge;
pub use error::SelectionError;
