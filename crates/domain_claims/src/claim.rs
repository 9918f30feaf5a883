//! Claim records and request payloads

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ClaimId, CoreError, PolicyId, UserId};
use domain_policy::Policy;

/// Longest description the claim form accepts, in characters
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// Filed, not yet picked up
    Submitted,
    /// Being assessed
    #[serde(rename = "Under Review")]
    UnderReview,
    Approved,
    Rejected,
}

/// What the claimant may still do with a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimActions {
    pub can_edit: bool,
    pub can_delete: bool,
}

impl ClaimStatus {
    pub const ALL: [ClaimStatus; 4] = [
        ClaimStatus::Submitted,
        ClaimStatus::UnderReview,
        ClaimStatus::Approved,
        ClaimStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Submitted => "Submitted",
            ClaimStatus::UnderReview => "Under Review",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
        }
    }

    /// Submitted or Under Review
    pub fn is_pending(&self) -> bool {
        matches!(self, ClaimStatus::Submitted | ClaimStatus::UnderReview)
    }

    /// Edit and delete are offered only before review starts
    pub fn allowed_actions(&self) -> ClaimActions {
        let open = matches!(self, ClaimStatus::Submitted);
        ClaimActions {
            can_edit: open,
            can_delete: open,
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ClaimStatus::ALL
            .into_iter()
            .find(|status| {
                status.as_str().eq_ignore_ascii_case(wanted)
                    || format!("{:?}", status).eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| CoreError::unknown_variant("claim status", s))
    }
}

/// A claim against one of the user's policies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    #[serde(rename = "claimId")]
    pub id: ClaimId,
    pub policy_id: PolicyId,
    pub user_id: UserId,
    #[serde(rename = "claimAmt", with = "rust_decimal::serde::float")]
    pub claim_amount: Decimal,
    pub description: String,
    pub status: ClaimStatus,
    #[serde(with = "core_kernel::temporal::timestamp")]
    pub submitted_at: DateTime<Utc>,
    /// Present when the backend embeds the policy in the claim listing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<Policy>,
}

impl Claim {
    pub fn allowed_actions(&self) -> ClaimActions {
        self.status.allowed_actions()
    }

    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }
}

/// Body of `POST /api/claims`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClaimRequest {
    pub policy_id: PolicyId,
    #[serde(rename = "claimAmt", with = "rust_decimal::serde::float")]
    pub claim_amount: Decimal,
    pub description: String,
}

/// Body of `PUT /api/claims/{id}`; the policy cannot be changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateClaimRequest {
    #[serde(rename = "claimAmt", with = "rust_decimal::serde::float")]
    pub claim_amount: Decimal,
    pub description: String,
}
