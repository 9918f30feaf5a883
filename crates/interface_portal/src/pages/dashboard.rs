//! Dashboard page
//!
//! Summary counters are derived from the fetched policy and claim lists;
//! nothing is fetched on their behalf.

use rust_decimal::Decimal;

use domain_claims::{Claim, ClaimStatus};
use domain_policy::Policy;
use infra_http::PortalApi;

use crate::activity::Activity;
use crate::portal::Portal;

pub const DASHBOARD_LOAD_FAILED: &str = "Failed to load dashboard data";

/// How many policies and claims the dashboard lists
pub const RECENT_ITEMS: usize = 3;

/// Summary counters for the signed-in user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_policies: usize,
    pub active_policies: usize,
    pub total_claims: usize,
    /// Claims still Submitted or Under Review
    pub pending_claims: usize,
    pub total_premium: Decimal,
    pub approved_claims_amount: Decimal,
}

impl DashboardStats {
    pub fn compute(policies: &[Policy], claims: &[Claim]) -> Self {
        Self {
            total_policies: policies.len(),
            active_policies: policies.iter().filter(|p| p.is_active()).count(),
            total_claims: claims.len(),
            pending_claims: claims.iter().filter(|c| c.is_pending()).count(),
            total_premium: policies.iter().map(|p| p.premium_amount).sum(),
            approved_claims_amount: claims
                .iter()
                .filter(|c| c.status == ClaimStatus::Approved)
                .map(|c| c.claim_amount)
                .sum(),
        }
    }
}

pub struct DashboardPage<A: PortalApi> {
    portal: Portal<A>,
    loading: Activity,
    stats: DashboardStats,
    recent_policies: Vec<Policy>,
    recent_claims: Vec<Claim>,
}

impl<A: PortalApi> DashboardPage<A> {
    pub fn new(portal: Portal<A>) -> Self {
        Self {
            portal,
            loading: Activity::new(),
            stats: DashboardStats::default(),
            recent_policies: Vec::new(),
            recent_claims: Vec::new(),
        }
    }

    /// Fetches policies and claims together; either failing fails the load
    pub async fn load(&mut self) -> bool {
        let loading = self.loading.begin();
        let api = self.portal.api();
        let result = tokio::try_join!(api.list_policies(), api.list_claims());
        drop(loading);

        match result {
            Ok((policies, claims)) => {
                self.stats = DashboardStats::compute(&policies, &claims);
                self.recent_policies = policies.into_iter().take(RECENT_ITEMS).collect();
                self.recent_claims = claims.into_iter().take(RECENT_ITEMS).collect();
                true
            }
            Err(e) => {
                self.portal.report(&e, DASHBOARD_LOAD_FAILED);
                false
            }
        }
    }

    pub fn greeting(&self) -> String {
        match self.portal.session().user() {
            Some(user) => format!("Welcome back, {}!", user.first_name),
            None => "Welcome back!".to_string(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_active()
    }

    /// A handle that keeps reporting the loading flag while `load` runs
    pub fn loading_flag(&self) -> Activity {
        self.loading.clone()
    }

    pub fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    pub fn recent_policies(&self) -> &[Policy] {
        &self.recent_policies
    }

    pub fn recent_claims(&self) -> &[Claim] {
        &self.recent_claims
    }
}
