//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{Duration, NaiveDate};
use core_kernel::{ClaimId, PolicyId};
use domain_claims::{Claim, ClaimStatus};
use domain_policy::{Policy, PolicyStatus, PolicyType};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::builders::{TestClaimBuilder, TestPolicyBuilder};

/// Strategy for generating claim statuses
pub fn claim_status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop::sample::select(ClaimStatus::ALL.to_vec())
}

/// Strategy for generating policy statuses
pub fn policy_status_strategy() -> impl Strategy<Value = PolicyStatus> {
    prop::sample::select(PolicyStatus::ALL.to_vec())
}

/// Strategy for generating policy types
pub fn policy_type_strategy() -> impl Strategy<Value = PolicyType> {
    prop::sample::select(PolicyType::ALL.to_vec())
}

/// Strategy for generating positive amounts with two decimal places
pub fn positive_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for generating dates in 2020-2029
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..3650i64).prop_map(|days| {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(days)
    })
}

pub fn policy_id_strategy() -> impl Strategy<Value = PolicyId> {
    (1i64..100_000i64).prop_map(PolicyId::new)
}

pub fn claim_id_strategy() -> impl Strategy<Value = ClaimId> {
    (1i64..100_000i64).prop_map(ClaimId::new)
}

/// Strategy for generating well-formed policies
pub fn policy_strategy() -> impl Strategy<Value = Policy> {
    (
        policy_id_strategy(),
        "[A-Z][a-z]{2,12}( Mutual| Insurance)?",
        policy_type_strategy(),
        positive_amount_strategy(),
        date_strategy(),
        1i64..1000i64,
        policy_status_strategy(),
    )
        .prop_map(|(id, insurer, policy_type, premium, start, length, status)| {
            TestPolicyBuilder::new()
                .with_id(id.get())
                .with_insurer(insurer)
                .with_type(policy_type)
                .with_premium(premium)
                .with_period(start, start + Duration::days(length))
                .with_status(status)
                .build()
        })
}

/// Strategy for generating well-formed claims
pub fn claim_strategy() -> impl Strategy<Value = Claim> {
    (
        claim_id_strategy(),
        positive_amount_strategy(),
        "[a-z ]{1,60}",
        claim_status_strategy(),
    )
        .prop_map(|(id, amount, description, status)| {
            TestClaimBuilder::new()
                .with_id(id.get())
                .with_amount(amount)
                .with_description(description)
                .with_status(status)
                .build()
        })
}
