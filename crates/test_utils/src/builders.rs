//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::{ClaimId, PolicyId, UserId};
use domain_claims::{Claim, ClaimStatus};
use domain_policy::{Policy, PolicyStatus, PolicyType};
use rust_decimal::Decimal;

use crate::fixtures::{AmountFixtures, IdFixtures, TemporalFixtures};

/// Builder for constructing test policies
pub struct TestPolicyBuilder {
    policy: Policy,
}

impl Default for TestPolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPolicyBuilder {
    /// Creates a new builder for an active home policy
    pub fn new() -> Self {
        Self {
            policy: Policy {
                id: IdFixtures::policy_id(),
                user_id: IdFixtures::user_id(),
                insurer: "Acme Mutual".to_string(),
                policy_type: PolicyType::Home,
                premium_amount: AmountFixtures::premium(),
                start_date: TemporalFixtures::policy_start(),
                end_date: TemporalFixtures::policy_end(),
                status: PolicyStatus::Active,
            },
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.policy.id = PolicyId::new(id);
        self
    }

    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.policy.user_id = user_id;
        self
    }

    pub fn with_insurer(mut self, insurer: impl Into<String>) -> Self {
        self.policy.insurer = insurer.into();
        self
    }

    pub fn with_type(mut self, policy_type: PolicyType) -> Self {
        self.policy.policy_type = policy_type;
        self
    }

    pub fn with_premium(mut self, premium: Decimal) -> Self {
        self.policy.premium_amount = premium;
        self
    }

    pub fn with_period(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.policy.start_date = start;
        self.policy.end_date = end;
        self
    }

    pub fn with_status(mut self, status: PolicyStatus) -> Self {
        self.policy.status = status;
        self
    }

    pub fn lapsed(self) -> Self {
        self.with_status(PolicyStatus::Lapsed)
    }

    /// Builds the policy
    pub fn build(self) -> Policy {
        self.policy
    }
}

/// Builder for constructing test claims
pub struct TestClaimBuilder {
    claim: Claim,
}

impl Default for TestClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClaimBuilder {
    /// Creates a new builder for a submitted claim against the default policy
    pub fn new() -> Self {
        Self {
            claim: Claim {
                id: IdFixtures::claim_id(),
                policy_id: IdFixtures::policy_id(),
                user_id: IdFixtures::user_id(),
                claim_amount: AmountFixtures::claim(),
                description: "Water damage in kitchen".to_string(),
                status: ClaimStatus::Submitted,
                submitted_at: TemporalFixtures::submitted_at(),
                policy: None,
            },
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.claim.id = ClaimId::new(id);
        self
    }

    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.claim.user_id = user_id;
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.claim.claim_amount = amount;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.claim.description = description.into();
        self
    }

    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.claim.status = status;
        self
    }

    pub fn with_submitted_at(mut self, at: DateTime<Utc>) -> Self {
        self.claim.submitted_at = at;
        self
    }

    /// Files the claim against `policy`, embedding it as the backend does
    pub fn against(mut self, policy: &Policy) -> Self {
        self.claim.policy_id = policy.id;
        self.claim.policy = Some(policy.clone());
        self
    }

    /// Builds the claim
    pub fn build(self) -> Claim {
        self.claim
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_policy_builder_defaults() {
        let policy = TestPolicyBuilder::new().build();
        assert!(policy.is_active());
        assert!(policy.start_date < policy.end_date);
    }

    #[test]
    fn test_claim_builder_against_policy() {
        let policy = TestPolicyBuilder::new().with_id(42).build();
        let claim = TestClaimBuilder::new()
            .against(&policy)
            .with_amount(dec!(99.99))
            .build();
        assert_eq!(claim.policy_id, PolicyId::new(42));
        assert_eq!(claim.policy.as_ref().map(|p| p.id), Some(PolicyId::new(42)));
        assert_eq!(claim.claim_amount, dec!(99.99));
    }
}
