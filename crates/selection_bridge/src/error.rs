//! Caller-visible selection errors.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
/// Rejection delivered to a pick caller.
///
/// Everything else that can go wrong inside result processing (permission
/// grants, enumeration) degrades the result instead of surfacing here.
pub enum SelectionError {
    /// The chooser flow yielded no usable selection.
    ///
    /// Covers user dismissal, an empty document set, and a flow that failed to
    /// launch. The display string is the stable rejection tag consumed by the
    /// application layer.
    #[error("No selection")]
    NoSelection,
    /// A newer pick request replaced this one before its flow completed.
    ///
    /// The pending slot holds at most one call; dispatching again while a flow
    /// is open displaces the earlier caller with this rejection instead of
    /// leaving it pending forever.
    #[error("selection request superseded by a newer request")]
    Superseded,
}
