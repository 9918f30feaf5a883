//! Policy records and request payloads

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{CoreError, PolicyId, UserId};

/// Line of business
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PolicyType {
    Life,
    Health,
    Motor,
    Home,
    Travel,
    Business,
}

impl PolicyType {
    /// Every policy type, in the order the type selector lists them
    pub const ALL: [PolicyType; 6] = [
        PolicyType::Life,
        PolicyType::Health,
        PolicyType::Motor,
        PolicyType::Home,
        PolicyType::Travel,
        PolicyType::Business,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyType::Life => "Life",
            PolicyType::Health => "Health",
            PolicyType::Motor => "Motor",
            PolicyType::Home => "Home",
            PolicyType::Travel => "Travel",
            PolicyType::Business => "Business",
        }
    }
}

impl fmt::Display for PolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::unknown_variant("policy type", s))
    }
}

/// Policy standing as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PolicyStatus {
    Active,
    Lapsed,
    Cancelled,
}

impl PolicyStatus {
    pub const ALL: [PolicyStatus; 3] = [
        PolicyStatus::Active,
        PolicyStatus::Lapsed,
        PolicyStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyStatus::Active => "Active",
            PolicyStatus::Lapsed => "Lapsed",
            PolicyStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for PolicyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::unknown_variant("policy status", s))
    }
}

/// An insurance contract owned by the signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    #[serde(rename = "policyId")]
    pub id: PolicyId,
    pub user_id: UserId,
    /// Insurer name
    pub insurer: String,
    pub policy_type: PolicyType,
    /// Premium, always positive
    #[serde(rename = "premiumAmt", with = "rust_decimal::serde::float")]
    pub premium_amount: Decimal,
    #[serde(with = "core_kernel::temporal::date")]
    pub start_date: NaiveDate,
    /// Strictly after `start_date`
    #[serde(with = "core_kernel::temporal::date")]
    pub end_date: NaiveDate,
    pub status: PolicyStatus,
}

impl Policy {
    pub fn is_active(&self) -> bool {
        self.status == PolicyStatus::Active
    }

    /// Short label used wherever a policy is picked from a list
    pub fn label(&self) -> String {
        format!("{} - {}", self.insurer, self.policy_type)
    }
}

/// Body of `POST /api/policies`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePolicyRequest {
    pub insurer: String,
    pub policy_type: PolicyType,
    #[serde(rename = "premiumAmt", with = "rust_decimal::serde::float")]
    pub premium_amount: Decimal,
    #[serde(with = "core_kernel::temporal::date")]
    pub start_date: NaiveDate,
    #[serde(with = "core_kernel::temporal::date")]
    pub end_date: NaiveDate,
}

/// Body of `PUT /api/policies/{id}`: the editable fields plus the status the user asks for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePolicyRequest {
    #[serde(flatten)]
    pub details: CreatePolicyRequest,
    pub status: PolicyStatus,
}
