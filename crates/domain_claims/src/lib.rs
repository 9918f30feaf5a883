//! Claims Domain
//!
//! Claims filed by the signed-in user against one of their policies.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Submitted -> Under Review -> Approved
//!                          \-> Rejected
//! ```
//!
//! Every transition is made by the backend. The client may only amend or
//! withdraw a claim while it is still `Submitted`; that rule lives in
//! `ClaimStatus::allowed_actions`.

pub mod claim;
pub mod draft;
pub mod filter;

pub use claim::{
    Claim, ClaimActions, ClaimStatus, CreateClaimRequest, UpdateClaimRequest,
    MAX_DESCRIPTION_LEN,
};
pub use draft::{ClaimDraft, ClaimField};
pub use filter::ClaimFilter;
