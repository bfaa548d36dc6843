//! Domain-level errors (no external dependencies)

use itertools::Itertools;
use thiserror::Error;

/// Domain errors represent violations of the manifest's structure.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("malformed manifest: {message}")]
    MalformedManifest { message: String },

    #[error("unresolved merge conflict markers at lines {}", format_lines(.lines))]
    ConflictMarkers { lines: Vec<usize> },

    #[error("entry not found: {0}")]
    EntryNotFound(String),

    #[error("cycle detected in navigation: {0}")]
    CycleDetected(String),

    #[error("invalid node reference: {0}")]
    InvalidNode(String),
}

fn format_lines(lines: &[usize]) -> String {
    lines.iter().join(", ")
}
