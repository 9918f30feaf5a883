//! Policy list filtering

use core_kernel::{contains_ignore_case, ListFilter, Selector};

use crate::policy::{Policy, PolicyType};

/// Search box plus policy-type selector for the policy list
///
/// The search term matches the insurer or the policy type name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolicyFilter {
    pub search: String,
    pub policy_type: Selector<PolicyType>,
}

impl ListFilter for PolicyFilter {
    type Item = Policy;

    fn matches(&self, policy: &Policy) -> bool {
        let term = self.search.as_str();
        let text_match = contains_ignore_case(&policy.insurer, term)
            || contains_ignore_case(policy.policy_type.as_str(), term);
        text_match && self.policy_type.admits(&policy.policy_type)
    }

    fn is_active(&self) -> bool {
        !self.search.is_empty() || !self.policy_type.is_all()
    }
}
