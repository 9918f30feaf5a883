//! The policy create/edit form

use chrono::NaiveDate;
use rust_decimal::Decimal;

use core_kernel::{Draft, FieldErrors};

use crate::policy::{CreatePolicyRequest, Policy, PolicyStatus, PolicyType, UpdatePolicyRequest};

/// Fields of the policy form, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PolicyField {
    Insurer,
    PolicyType,
    PremiumAmount,
    StartDate,
    EndDate,
    /// Edit only; never fails validation
    Status,
}

/// Editable state of the policy form
///
/// Unset selections are `None`; an unset premium is zero and fails the
/// positivity rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolicyDraft {
    pub insurer: String,
    pub policy_type: Option<PolicyType>,
    pub premium_amount: Decimal,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Only offered when editing
    pub status: Option<PolicyStatus>,
}

impl Draft for PolicyDraft {
    type Record = Policy;
    type Field = PolicyField;

    fn from_record(policy: &Policy) -> Self {
        Self {
            insurer: policy.insurer.clone(),
            policy_type: Some(policy.policy_type),
            premium_amount: policy.premium_amount,
            start_date: Some(policy.start_date),
            end_date: Some(policy.end_date),
            status: Some(policy.status),
        }
    }

    fn validate(&self) -> FieldErrors<PolicyField> {
        let mut errors = FieldErrors::new();

        if self.insurer.trim().is_empty() {
            errors.insert(PolicyField::Insurer, "Insurer is required");
        }
        if self.policy_type.is_none() {
            errors.insert(PolicyField::PolicyType, "Policy type is required");
        }
        if self.premium_amount <= Decimal::ZERO {
            errors.insert(PolicyField::PremiumAmount, "Valid premium amount is required");
        }
        if self.start_date.is_none() {
            errors.insert(PolicyField::StartDate, "Start date is required");
        }
        match (self.start_date, self.end_date) {
            (_, None) => errors.insert(PolicyField::EndDate, "End date is required"),
            (Some(start), Some(end)) if end <= start => {
                errors.insert(PolicyField::EndDate, "End date must be after start date")
            }
            _ => {}
        }

        errors
    }
}

impl PolicyDraft {
    /// Validates and builds the create payload
    pub fn to_create_request(&self) -> Result<CreatePolicyRequest, FieldErrors<PolicyField>> {
        let errors = self.validate();
        match (self.policy_type, self.start_date, self.end_date) {
            (Some(policy_type), Some(start_date), Some(end_date)) if errors.is_empty() => {
                Ok(CreatePolicyRequest {
                    insurer: self.insurer.trim().to_string(),
                    policy_type,
                    premium_amount: self.premium_amount,
                    start_date,
                    end_date,
                })
            }
            _ => Err(errors),
        }
    }

    /// Validates and builds the update payload; the status defaults to Active
    pub fn to_update_request(&self) -> Result<UpdatePolicyRequest, FieldErrors<PolicyField>> {
        let details = self.to_create_request()?;
        Ok(UpdatePolicyRequest {
            details,
            status: self.status.unwrap_or(PolicyStatus::Active),
        })
    }
}
