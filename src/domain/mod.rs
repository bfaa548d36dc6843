//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod builtin;
pub mod conflict;
pub mod entities;
pub mod error;
pub mod outline;
pub mod query;
pub mod validate;

pub use arena::{NavArena, NavNode, NodeData};
pub use builder::{create_branches, NavBuilder};
pub use builtin::tutorials;
pub use conflict::{ConflictRegion, ConflictScanner, Side};
pub use entities::*;
pub use error::DomainError;
pub use outline::ToOutline;
pub use validate::{validate, Report, Severity, Violation, ViolationKind};
