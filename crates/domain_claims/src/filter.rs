//! Claim list filtering

use core_kernel::{contains_ignore_case, ListFilter, Selector};

use crate::claim::{Claim, ClaimStatus};

/// Search box over descriptions plus a status selector
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimFilter {
    pub search: String,
    pub status: Selector<ClaimStatus>,
}

impl ListFilter for ClaimFilter {
    type Item = Claim;

    fn matches(&self, claim: &Claim) -> bool {
        contains_ignore_case(&claim.description, &self.search) && self.status.admits(&claim.status)
    }

    fn is_active(&self) -> bool {
        !self.search.is_empty() || !self.status.is_all()
    }
}
