//! Policy Domain
//!
//! Insurance policies as the portal sees them: a record owned by the
//! signed-in user, edited through a validated draft, listed with a search
//! box and a policy-type selector.
//!
//! Status changes are decided by the backend. The client only submits the
//! status the user asked for.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_policy::{PolicyDraft, PolicyType};
//!
//! let mut draft = PolicyDraft::default();
//! draft.insurer = "Acme Mutual".into();
//! draft.policy_type = Some(PolicyType::Home);
//! let request = draft.to_create_request()?;
//! ```

pub mod policy;
pub mod draft;
pub mod filter;

pub use policy::{CreatePolicyRequest, Policy, PolicyStatus, PolicyType, UpdatePolicyRequest};
pub use draft::{PolicyDraft, PolicyField};
pub use filter::PolicyFilter;
