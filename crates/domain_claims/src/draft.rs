//! The claim filing/amendment form

use rust_decimal::Decimal;

use core_kernel::{Draft, FieldErrors, PolicyId};

use crate::claim::{Claim, CreateClaimRequest, UpdateClaimRequest, MAX_DESCRIPTION_LEN};

/// Fields of the claim form, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClaimField {
    PolicyId,
    ClaimAmount,
    Description,
}

/// Editable state of the claim form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimDraft {
    pub policy_id: Option<PolicyId>,
    pub claim_amount: Decimal,
    pub description: String,
}

impl Draft for ClaimDraft {
    type Record = Claim;
    type Field = ClaimField;

    fn from_record(claim: &Claim) -> Self {
        Self {
            policy_id: Some(claim.policy_id),
            claim_amount: claim.claim_amount,
            description: claim.description.clone(),
        }
    }

    fn validate(&self) -> FieldErrors<ClaimField> {
        let mut errors = FieldErrors::new();

        if self.policy_id.is_none() {
            errors.insert(ClaimField::PolicyId, "Please select a policy");
        }
        if self.claim_amount <= Decimal::ZERO {
            errors.insert(ClaimField::ClaimAmount, "Valid claim amount is required");
        }
        if self.description.trim().is_empty() {
            errors.insert(ClaimField::Description, "Description is required");
        } else if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            errors.insert(
                ClaimField::Description,
                format!("Description must be at most {} characters", MAX_DESCRIPTION_LEN),
            );
        }

        errors
    }
}

impl ClaimDraft {
    /// Validates and builds the filing payload
    ///
    /// A claim may only be filed against one of `eligible`, the user's
    /// Active policies; any other policy counts as no selection.
    pub fn to_create_request(
        &self,
        eligible: &[PolicyId],
    ) -> Result<CreateClaimRequest, FieldErrors<ClaimField>> {
        let mut errors = self.validate();
        if let Some(policy_id) = self.policy_id {
            if !eligible.contains(&policy_id) {
                errors.insert(ClaimField::PolicyId, "Please select a policy");
            }
        }
        match self.policy_id {
            Some(policy_id) if errors.is_empty() => Ok(CreateClaimRequest {
                policy_id,
                claim_amount: self.claim_amount,
                description: self.description.clone(),
            }),
            _ => Err(errors),
        }
    }

    /// Validates and builds the amendment payload (amount and description only)
    pub fn to_update_request(&self) -> Result<UpdateClaimRequest, FieldErrors<ClaimField>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(UpdateClaimRequest {
            claim_amount: self.claim_amount,
            description: self.description.clone(),
        })
    }
}
