//! Typed tutorial navigation manifests.
//!
//! The built-in TimescaleDB tutorials index lives in [`domain::builtin`]; the
//! rest of the crate loads, validates, inspects and re-serializes manifests of
//! the same shape.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{tutorials, Entry, Manifest};
