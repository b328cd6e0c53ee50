//! Normalized selection results delivered back to the caller.

use serde::{Deserialize, Serialize};

use crate::handle::LocationHandle;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Directory entry reported by the host when enumerating a picked tree root.
pub struct DirectoryEntry {
    /// Base name of the entry.
    pub name: String,
    /// Whether the entry is itself a directory.
    pub is_directory: bool,
    /// Handle for the entry, when the host can produce one.
    pub location: Option<LocationHandle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Normalized unit of a picked entry, uniform across both chooser flows.
pub struct SelectionNode {
    /// Display name of the entry.
    pub name: String,
    /// Whether the entry is a directory (always `false` for document picks).
    pub is_directory: bool,
    /// Handle for the entry, when one could be produced.
    pub location: Option<LocationHandle>,
}

impl From<DirectoryEntry> for SelectionNode {
    fn from(entry: DirectoryEntry) -> Self {
        Self {
            name: entry.name,
            is_directory: entry.is_directory,
            location: entry.location,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Value delivered to the caller when a selection flow succeeds.
pub struct SelectionResult {
    /// Picked tree root; present only for folder-tree requests.
    pub root_location: Option<LocationHandle>,
    /// Normalized entries in host-reported order.
    pub children: Vec<SelectionNode>,
}
