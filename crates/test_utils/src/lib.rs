//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! portal test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for common entities
//! - `builders`: Builder patterns for test data construction
//! - `backend`: In-process mock of the portal backend
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod backend;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use backend::*;
pub use assertions::*;
pub use generators::*;
