//! Core Kernel - Foundational types shared by every portal crate
//!
//! This crate provides the building blocks the domain and page layers are
//! written against:
//! - Numeric identifiers issued by the backend
//! - Wire-format helpers for dates, timestamps and amounts
//! - The draft/validation abstraction behind every create/edit form
//! - Case-insensitive search and "all or one" selectors for list pages

pub mod identifiers;
pub mod temporal;
pub mod form;
pub mod filter;
pub mod error;

pub use identifiers::{UserId, PolicyId, ClaimId};
pub use temporal::parse_date;
pub use form::{parse_amount_input, Draft, FieldErrors, FormState};
pub use filter::{contains_ignore_case, ListFilter, Selector};
pub use error::CoreError;
