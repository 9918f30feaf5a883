//! Page controller tests
//!
//! Controllers run against the real HTTP client talking to an in-process
//! mock backend, except where a stub port pins an exact response.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use core_kernel::{ClaimId, PolicyId, Selector, UserId};
use domain_account::{AuthField, AuthResponse, LoginRequest, RegisterRequest, User};
use domain_claims::{Claim, ClaimField, ClaimStatus, CreateClaimRequest, UpdateClaimRequest};
use domain_policy::{
    CreatePolicyRequest, Policy, PolicyField, PolicyStatus, PolicyType, UpdatePolicyRequest,
};
use infra_http::{
    ApiError, ApiResult, ClientConfig, Navigator, PortalApi, PortalClient, Route, SessionStore,
};
use interface_portal::{view, NoticeLevel, PoliciesPage, Portal};
use test_utils::{
    assert_field_error, MockBackend, TestClaimBuilder, TestPolicyBuilder, UserFixtures,
};

async fn portal_for(backend: &MockBackend) -> Portal<PortalClient> {
    let session = SessionStore::ephemeral();
    let navigator = Navigator::new();
    let config = ClientConfig::default().with_api_url(backend.url());
    let client = PortalClient::new(&config, session.clone(), navigator.clone()).unwrap();
    Portal::new(client, session, navigator)
}

/// A portal already signed in as the default user and showing `route`
async fn signed_in(backend: &MockBackend, route: Route) -> Portal<PortalClient> {
    let portal = portal_for(backend).await;
    let token = backend.sign_in(&UserFixtures::ada());
    portal.session().login(token, UserFixtures::ada());
    assert_eq!(portal.open(route.path()), route);
    portal
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Port that answers sign-in with a fixed response and fails everything else
struct StubApi {
    auth: AuthResponse,
}

#[async_trait]
impl PortalApi for StubApi {
    async fn login(&self, _request: &LoginRequest) -> ApiResult<AuthResponse> {
        Ok(self.auth.clone())
    }

    async fn register(&self, _request: &RegisterRequest) -> ApiResult<AuthResponse> {
        Ok(self.auth.clone())
    }

    async fn list_policies(&self) -> ApiResult<Vec<Policy>> {
        Err(ApiError::Unauthorized { message: None })
    }

    async fn get_policy(&self, _id: PolicyId) -> ApiResult<Policy> {
        Err(ApiError::Transport("offline".into()))
    }

    async fn create_policy(&self, _request: &CreatePolicyRequest) -> ApiResult<Policy> {
        Err(ApiError::Transport("offline".into()))
    }

    async fn update_policy(&self, _id: PolicyId, _request: &UpdatePolicyRequest) -> ApiResult<Policy> {
        Err(ApiError::Transport("offline".into()))
    }

    async fn delete_policy(&self, _id: PolicyId) -> ApiResult<()> {
        Err(ApiError::Transport("offline".into()))
    }

    async fn list_claims(&self) -> ApiResult<Vec<Claim>> {
        Err(ApiError::Transport("offline".into()))
    }

    async fn get_claim(&self, _id: ClaimId) -> ApiResult<Claim> {
        Err(ApiError::Transport("offline".into()))
    }

    async fn create_claim(&self, _request: &CreateClaimRequest) -> ApiResult<Claim> {
        Err(ApiError::Transport("offline".into()))
    }

    async fn update_claim(&self, _id: ClaimId, _request: &UpdateClaimRequest) -> ApiResult<Claim> {
        Err(ApiError::Transport("offline".into()))
    }

    async fn delete_claim(&self, _id: ClaimId) -> ApiResult<()> {
        Err(ApiError::Transport("offline".into()))
    }
}

/// Port whose first policy creation hangs; later ones answer at once
struct SlowCreateApi {
    first_delay: Duration,
    creates: Arc<AtomicUsize>,
}

#[async_trait]
impl PortalApi for SlowCreateApi {
    async fn login(&self, _request: &LoginRequest) -> ApiResult<AuthResponse> {
        Err(ApiError::Transport("offline".into()))
    }

    async fn register(&self, _request: &RegisterRequest) -> ApiResult<AuthResponse> {
        Err(ApiError::Transport("offline".into()))
    }

    async fn list_policies(&self) -> ApiResult<Vec<Policy>> {
        Ok(Vec::new())
    }

    async fn get_policy(&self, _id: PolicyId) -> ApiResult<Policy> {
        Err(ApiError::Transport("offline".into()))
    }

    async fn create_policy(&self, _request: &CreatePolicyRequest) -> ApiResult<Policy> {
        if self.creates.fetch_add(1, Ordering::SeqCst) == 0 {
            tokio::time::sleep(self.first_delay).await;
        }
        Ok(TestPolicyBuilder::new().build())
    }

    async fn update_policy(&self, _id: PolicyId, _request: &UpdatePolicyRequest) -> ApiResult<Policy> {
        Err(ApiError::Transport("offline".into()))
    }

    async fn delete_policy(&self, _id: PolicyId) -> ApiResult<()> {
        Err(ApiError::Transport("offline".into()))
    }

    async fn list_claims(&self) -> ApiResult<Vec<Claim>> {
        Err(ApiError::Transport("offline".into()))
    }

    async fn get_claim(&self, _id: ClaimId) -> ApiResult<Claim> {
        Err(ApiError::Transport("offline".into()))
    }

    async fn create_claim(&self, _request: &CreateClaimRequest) -> ApiResult<Claim> {
        Err(ApiError::Transport("offline".into()))
    }

    async fn update_claim(&self, _id: ClaimId, _request: &UpdateClaimRequest) -> ApiResult<Claim> {
        Err(ApiError::Transport("offline".into()))
    }

    async fn delete_claim(&self, _id: ClaimId) -> ApiResult<()> {
        Err(ApiError::Transport("offline".into()))
    }
}

fn fill_valid_policy<A: PortalApi>(page: &mut PoliciesPage<A>) {
    page.open_create();
    page.update_field(PolicyField::Insurer, |d| d.insurer = "Acme".into());
    page.update_field(PolicyField::PolicyType, |d| d.policy_type = Some(PolicyType::Home));
    page.update_field(PolicyField::PremiumAmount, |d| d.premium_amount = dec!(10));
    page.update_field(PolicyField::StartDate, |d| d.start_date = Some(day(2024, 1, 1)));
    page.update_field(PolicyField::EndDate, |d| d.end_date = Some(day(2025, 1, 1)));
}

mod auth_pages {
    use super::*;

    #[tokio::test]
    async fn test_login_example_exposes_first_name() {
        let user = User {
            id: UserId::new(1),
            email: "ada@example.com".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
        };
        let api = StubApi {
            auth: AuthResponse {
                token: "abc".into(),
                user,
            },
        };
        let portal = Portal::new(api, SessionStore::ephemeral(), Navigator::new());

        let mut page = portal.login_page();
        page.set_email("ada@example.com");
        page.set_password("secret123");
        assert!(page.submit().await);

        assert!(portal.session().is_authenticated());
        assert_eq!(portal.session().token().as_deref(), Some("abc"));
        assert_eq!(portal.session().user().map(|u| u.first_name), Some("Ada".to_string()));
        assert_eq!(portal.navigator().current(), Route::Dashboard);
        assert_eq!(
            portal.notifier().last().map(|n| n.message),
            Some("Welcome back!".to_string())
        );
    }

    #[tokio::test]
    async fn test_login_returns_to_bounced_route() {
        let backend = MockBackend::start().await;
        backend.register_user(UserFixtures::ada(), UserFixtures::password());
        let portal = portal_for(&backend).await;

        assert_eq!(portal.open("/claims"), Route::Login);

        let mut page = portal.login_page();
        page.set_email("ada@example.com");
        page.set_password(UserFixtures::password());
        assert!(page.submit().await);
        assert_eq!(portal.navigator().current(), Route::Claims);
        assert_eq!(portal.nav_links().len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_login_form_sends_nothing() {
        let backend = MockBackend::start().await;
        let portal = portal_for(&backend).await;

        let mut page = portal.login_page();
        page.set_email("not-an-email");
        page.set_password("123");
        assert!(!page.submit().await);

        assert_field_error(page.errors(), AuthField::Email, "Please enter a valid email");
        assert_field_error(
            page.errors(),
            AuthField::Password,
            "Password must be at least 6 characters",
        );
        assert_eq!(backend.request_count(), 0);

        page.set_email("ada@example.com");
        assert!(!page.errors().contains(AuthField::Email));
    }

    #[tokio::test]
    async fn test_rejected_login_shows_fallback_notice() {
        let backend = MockBackend::start().await;
        let portal = portal_for(&backend).await;
        backend.fail_next(401, None);

        let mut page = portal.login_page();
        page.set_email("ada@example.com");
        page.set_password("wrong-password");
        assert!(!page.submit().await);

        let notice = portal.notifier().last().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Invalid credentials. Please try again.");
        assert!(!portal.session().is_authenticated());
        assert_eq!(portal.navigator().current(), Route::Login);
    }

    #[tokio::test]
    async fn test_register_signs_in() {
        let backend = MockBackend::start().await;
        let portal = portal_for(&backend).await;

        let mut page = portal.register_page();
        page.set(AuthField::FirstName, "Grace");
        page.set(AuthField::LastName, "Hopper");
        page.set(AuthField::Email, "grace@example.com");
        page.set(AuthField::Password, "secret123");
        page.set(AuthField::ConfirmPassword, "secret123");
        assert!(page.submit().await);

        assert_eq!(portal.session().user().map(|u| u.first_name), Some("Grace".to_string()));
        assert_eq!(portal.navigator().current(), Route::Dashboard);
        assert_eq!(
            portal.notifier().last().map(|n| n.message),
            Some("Account created successfully!".to_string())
        );
    }

    #[tokio::test]
    async fn test_register_mismatched_confirmation() {
        let backend = MockBackend::start().await;
        let portal = portal_for(&backend).await;

        let mut page = portal.register_page();
        page.set(AuthField::FirstName, "Grace");
        page.set(AuthField::LastName, "Hopper");
        page.set(AuthField::Email, "grace@example.com");
        page.set(AuthField::Password, "secret123");
        page.set(AuthField::ConfirmPassword, "secret124");
        assert!(!page.submit().await);

        assert_field_error(page.errors(), AuthField::ConfirmPassword, "Passwords do not match");
        assert_eq!(backend.request_count(), 0);
    }

    #[tokio::test]
    async fn test_logout_clears_session_and_nav() {
        let backend = MockBackend::start().await;
        let portal = signed_in(&backend, Route::Dashboard).await;

        portal.logout();
        assert!(!portal.session().is_authenticated());
        assert_eq!(portal.navigator().current(), Route::Login);
        assert!(portal.nav_links().is_empty());
        assert_eq!(
            portal.notifier().last().map(|n| n.message),
            Some("Logged out successfully".to_string())
        );
    }
}

mod dashboard {
    use super::*;

    #[tokio::test]
    async fn test_load_computes_stats_and_recent_items() {
        let backend = MockBackend::start().await;
        for id in 1..=4 {
            backend.insert_policy(TestPolicyBuilder::new().with_id(id).with_premium(dec!(100)).build());
        }
        backend.insert_claim(TestClaimBuilder::new().with_id(1).build());
        backend.insert_claim(
            TestClaimBuilder::new()
                .with_id(2)
                .with_status(ClaimStatus::Approved)
                .with_amount(dec!(75.25))
                .build(),
        );
        let portal = signed_in(&backend, Route::Dashboard).await;

        let mut page = portal.dashboard_page();
        assert!(page.load().await);

        let stats = page.stats();
        assert_eq!(stats.total_policies, 4);
        assert_eq!(stats.active_policies, 4);
        assert_eq!(stats.total_claims, 2);
        assert_eq!(stats.pending_claims, 1);
        assert_eq!(stats.total_premium, dec!(400));
        assert_eq!(stats.approved_claims_amount, dec!(75.25));
        assert_eq!(page.recent_policies().len(), 3);
        assert_eq!(page.recent_claims().len(), 2);
        assert_eq!(page.greeting(), "Welcome back, Ada!");

        let rendered = view::dashboard(&page);
        assert!(rendered.contains("Claims: 2 (1 pending)"));
    }

    #[tokio::test]
    async fn test_either_fetch_failing_fails_the_load() {
        let backend = MockBackend::start().await;
        let portal = signed_in(&backend, Route::Dashboard).await;
        backend.fail_next(500, None);

        let mut page = portal.dashboard_page();
        assert!(!page.load().await);
        assert_eq!(
            portal.notifier().last().map(|n| n.message),
            Some("Failed to load dashboard data".to_string())
        );
        assert!(portal.session().is_authenticated());
    }
}

mod policies {
    use super::*;

    #[tokio::test]
    async fn test_end_date_not_after_start_is_rejected_without_network() {
        let backend = MockBackend::start().await;
        let portal = signed_in(&backend, Route::Policies).await;
        let mut page = portal.policies_page();
        assert!(page.load().await);
        let before = backend.request_count();

        page.open_create();
        page.update_field(PolicyField::Insurer, |d| d.insurer = "Acme".into());
        page.update_field(PolicyField::PolicyType, |d| d.policy_type = Some(PolicyType::Life));
        page.update_field(PolicyField::PremiumAmount, |d| d.premium_amount = dec!(50));
        page.update_field(PolicyField::StartDate, |d| d.start_date = Some(day(2024, 5, 1)));
        page.update_field(PolicyField::EndDate, |d| d.end_date = Some(day(2024, 5, 1)));

        assert!(!page.submit().await);
        assert_field_error(
            page.form_errors(),
            PolicyField::EndDate,
            "End date must be after start date",
        );
        assert!(page.form().is_open());
        assert_eq!(backend.request_count(), before);

        page.update_field(PolicyField::EndDate, |d| d.end_date = Some(day(2023, 1, 1)));
        assert!(!page.form_errors().contains(PolicyField::EndDate));
        assert!(!page.submit().await);
        assert_eq!(backend.request_count(), before);
    }

    #[tokio::test]
    async fn test_create_closes_form_and_refetches() {
        let backend = MockBackend::start().await;
        let portal = signed_in(&backend, Route::Policies).await;
        let mut page = portal.policies_page();
        assert!(page.load().await);

        page.open_create();
        page.update_field(PolicyField::Insurer, |d| d.insurer = "  Acme Mutual ".into());
        page.update_field(PolicyField::PolicyType, |d| d.policy_type = Some(PolicyType::Travel));
        page.update_field(PolicyField::PremiumAmount, |d| d.premium_amount = dec!(89.99));
        page.update_field(PolicyField::StartDate, |d| d.start_date = Some(day(2024, 1, 1)));
        page.update_field(PolicyField::EndDate, |d| d.end_date = Some(day(2024, 2, 1)));

        let before = backend.request_count();
        assert!(page.submit().await);
        assert_eq!(backend.request_count(), before + 2);
        assert!(!page.form().is_open());
        assert_eq!(page.policies().len(), 1);
        assert_eq!(page.policies()[0].insurer, "Acme Mutual");
        assert_eq!(
            portal.notifier().last().map(|n| n.message),
            Some("Policy created successfully".to_string())
        );
    }

    #[tokio::test]
    async fn test_edit_sends_requested_status() {
        let backend = MockBackend::start().await;
        backend.insert_policy(TestPolicyBuilder::new().with_id(3).build());
        let portal = signed_in(&backend, Route::Policies).await;
        let mut page = portal.policies_page();
        assert!(page.load().await);

        assert!(page.open_edit(PolicyId::new(3)));
        assert_eq!(page.form().draft().insurer, "Acme Mutual");
        page.update_field(PolicyField::Status, |d| d.status = Some(PolicyStatus::Cancelled));
        assert!(page.submit().await);

        assert_eq!(backend.policies()[0].status, PolicyStatus::Cancelled);
        assert_eq!(page.policies()[0].status, PolicyStatus::Cancelled);
        assert!(!page.open_edit(PolicyId::new(99)));
    }

    #[tokio::test]
    async fn test_filtering_by_search_and_type() {
        let backend = MockBackend::start().await;
        backend.insert_policy(TestPolicyBuilder::new().with_id(1).with_insurer("Acme").with_type(PolicyType::Home).build());
        backend.insert_policy(TestPolicyBuilder::new().with_id(2).with_insurer("Zenith").with_type(PolicyType::Motor).build());
        backend.insert_policy(TestPolicyBuilder::new().with_id(3).with_insurer("Acme").with_type(PolicyType::Motor).build());
        let portal = signed_in(&backend, Route::Policies).await;
        let mut page = portal.policies_page();
        assert!(page.load().await);
        assert_eq!(page.visible().len(), 3);

        page.set_search("ACME");
        assert_eq!(page.visible().len(), 2);
        page.set_type_filter(Selector::Only(PolicyType::Motor));
        assert_eq!(page.visible().len(), 1);
        assert_eq!(page.visible()[0].id, PolicyId::new(3));

        page.set_search("motor");
        assert_eq!(page.visible().len(), 2);

        page.set_search("nobody");
        assert!(page.visible().is_empty());
        assert!(view::policies(&page).contains("Try adjusting your filters"));
    }

    #[tokio::test]
    async fn test_busy_is_visible_in_flight_and_cleared_when_dropped() {
        let creates = Arc::new(AtomicUsize::new(0));
        let api = SlowCreateApi {
            first_delay: Duration::from_secs(5),
            creates: Arc::clone(&creates),
        };
        let portal = Portal::new(api, SessionStore::ephemeral(), Navigator::new());
        let mut page = portal.policies_page();
        fill_valid_policy(&mut page);
        let busy = page.busy_flag();

        let (first, seen_busy) = tokio::join!(
            tokio::time::timeout(Duration::from_millis(50), page.submit()),
            async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                busy.is_active()
            }
        );
        assert!(first.is_err());
        assert!(seen_busy);
        assert!(!page.is_busy());
        assert!(page.form().is_open());

        assert!(page.submit().await);
        assert_eq!(creates.load(Ordering::SeqCst), 2);
        assert!(!page.is_busy());
        assert!(!page.form().is_open());
    }

    #[tokio::test]
    async fn test_server_rejection_keeps_form_open() {
        let backend = MockBackend::start().await;
        let portal = signed_in(&backend, Route::Policies).await;
        let mut page = portal.policies_page();
        assert!(page.load().await);

        page.open_create();
        page.update_field(PolicyField::Insurer, |d| d.insurer = "Acme".into());
        page.update_field(PolicyField::PolicyType, |d| d.policy_type = Some(PolicyType::Home));
        page.update_field(PolicyField::PremiumAmount, |d| d.premium_amount = dec!(10));
        page.update_field(PolicyField::StartDate, |d| d.start_date = Some(day(2024, 1, 1)));
        page.update_field(PolicyField::EndDate, |d| d.end_date = Some(day(2025, 1, 1)));
        backend.fail_next(422, Some("Insurer is not supported"));

        assert!(!page.submit().await);
        assert!(page.form().is_open());
        assert_eq!(
            portal.notifier().last().map(|n| n.message),
            Some("Insurer is not supported".to_string())
        );
    }
}

mod claims {
    use super::*;

    async fn seeded() -> (MockBackend, Portal<PortalClient>) {
        let backend = MockBackend::start().await;
        let policy = TestPolicyBuilder::new().with_id(1).build();
        backend.insert_policy(policy.clone());
        backend.insert_claim(
            TestClaimBuilder::new()
                .with_id(1)
                .against(&policy)
                .with_description("Flood in basement")
                .build(),
        );
        backend.insert_claim(
            TestClaimBuilder::new()
                .with_id(2)
                .against(&policy)
                .with_description("Flash flooding damaged car")
                .with_status(ClaimStatus::UnderReview)
                .build(),
        );
        backend.insert_claim(
            TestClaimBuilder::new()
                .with_id(3)
                .against(&policy)
                .with_description("Stolen bicycle")
                .with_status(ClaimStatus::Approved)
                .build(),
        );
        let portal = signed_in(&backend, Route::Claims).await;
        (backend, portal)
    }

    #[tokio::test]
    async fn test_actions_follow_status() {
        let (_backend, portal) = seeded().await;
        let mut page = portal.claims_page();
        assert!(page.load().await);

        let submitted = page.claims().iter().find(|c| c.id == ClaimId::new(1)).unwrap().clone();
        let reviewing = page.claims().iter().find(|c| c.id == ClaimId::new(2)).unwrap().clone();

        let actions = page.actions_for(&submitted);
        assert!(actions.can_edit && actions.can_delete);
        let actions = page.actions_for(&reviewing);
        assert!(!actions.can_edit && !actions.can_delete);

        assert!(!page.open_edit(reviewing.id));
        assert!(!page.request_delete(reviewing.id));
        assert!(page.open_edit(submitted.id));
    }

    #[tokio::test]
    async fn test_flood_search_with_status_filter() {
        let (_backend, portal) = seeded().await;
        let mut page = portal.claims_page();
        assert!(page.load().await);

        page.set_search("flood");
        let ids: Vec<_> = page.visible().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![ClaimId::new(1), ClaimId::new(2)]);

        page.set_status_filter(Selector::Only(ClaimStatus::UnderReview));
        let ids: Vec<_> = page.visible().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![ClaimId::new(2)]);

        page.set_status_filter(Selector::All);
        page.set_search("");
        assert_eq!(page.visible().len(), 3);
    }

    #[tokio::test]
    async fn test_overlong_description_is_rejected() {
        let (backend, portal) = seeded().await;
        let mut page = portal.claims_page();
        assert!(page.load().await);
        let before = backend.request_count();

        assert!(page.open_create());
        page.update_field(ClaimField::PolicyId, |d| d.policy_id = Some(PolicyId::new(1)));
        page.update_field(ClaimField::ClaimAmount, |d| d.claim_amount = dec!(120));
        page.update_field(ClaimField::Description, |d| d.description = "x".repeat(201));

        assert!(!page.submit().await);
        assert_field_error(
            page.form_errors(),
            ClaimField::Description,
            "Description must be at most 200 characters",
        );
        assert_eq!(backend.request_count(), before);
    }

    #[tokio::test]
    async fn test_file_claim_then_refetch() {
        let (backend, portal) = seeded().await;
        let mut page = portal.claims_page();
        assert!(page.load().await);

        assert!(page.open_create());
        page.update_field(ClaimField::PolicyId, |d| d.policy_id = Some(PolicyId::new(1)));
        page.update_field(ClaimField::ClaimAmount, |d| d.claim_amount = dec!(120));
        page.update_field(ClaimField::Description, |d| d.description = "Broken window".into());
        assert!(page.submit().await);

        assert_eq!(backend.claims().len(), 4);
        assert_eq!(page.claims().len(), 4);
        assert!(!page.form().is_open());
        assert_eq!(
            portal.notifier().last().map(|n| n.message),
            Some("Claim submitted successfully".to_string())
        );
    }

    #[tokio::test]
    async fn test_claim_against_lapsed_policy_is_rejected() {
        let backend = MockBackend::start().await;
        backend.insert_policy(TestPolicyBuilder::new().with_id(1).build());
        backend.insert_policy(TestPolicyBuilder::new().with_id(2).lapsed().build());
        let portal = signed_in(&backend, Route::Claims).await;
        let mut page = portal.claims_page();
        assert!(page.load().await);
        let before = backend.request_count();

        assert!(page.open_create());
        page.update_field(ClaimField::PolicyId, |d| d.policy_id = Some(PolicyId::new(2)));
        page.update_field(ClaimField::ClaimAmount, |d| d.claim_amount = dec!(80));
        page.update_field(ClaimField::Description, |d| d.description = "Hail damage".into());

        assert!(!page.submit().await);
        assert_field_error(page.form_errors(), ClaimField::PolicyId, "Please select a policy");
        assert_eq!(backend.request_count(), before);
        assert!(backend.claims().is_empty());

        page.update_field(ClaimField::PolicyId, |d| d.policy_id = Some(PolicyId::new(1)));
        assert!(page.submit().await);
        assert_eq!(backend.claims().len(), 1);
        assert_eq!(backend.claims()[0].policy_id, PolicyId::new(1));
    }

    #[tokio::test]
    async fn test_rendered_rows_offer_controls_by_status() {
        let (_backend, portal) = seeded().await;
        let mut page = portal.claims_page();
        assert!(page.load().await);

        let rendered = view::claims(&page);
        let row = |id: &str| {
            rendered
                .lines()
                .find(|line| line.starts_with(&format!("{}  ", id)))
                .unwrap()
                .to_string()
        };

        assert!(row("CLM-1").ends_with("(edit, delete)"));
        let reviewing = row("CLM-2");
        assert!(!reviewing.contains("edit"));
        assert!(!reviewing.contains("delete"));
        let approved = row("CLM-3");
        assert!(!approved.contains("(edit"));
    }

    #[tokio::test]
    async fn test_filing_needs_an_active_policy() {
        let backend = MockBackend::start().await;
        backend.insert_policy(TestPolicyBuilder::new().lapsed().build());
        let portal = signed_in(&backend, Route::Claims).await;
        let mut page = portal.claims_page();
        assert!(page.load().await);

        assert!(!page.can_file_claim());
        assert!(page.active_policies().is_empty());
        assert!(!page.open_create());
        assert!(!page.form().is_open());
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let (backend, portal) = seeded().await;
        let mut page = portal.claims_page();
        assert!(page.load().await);

        assert!(page.request_delete(ClaimId::new(1)));
        page.cancel_delete();
        assert!(!page.confirm_delete().await);
        assert_eq!(backend.claims().len(), 3);

        assert!(page.request_delete(ClaimId::new(1)));
        assert!(page.confirm_delete().await);
        assert_eq!(backend.claims().len(), 2);
        assert_eq!(page.pending_delete(), None);
        assert_eq!(
            portal.notifier().last().map(|n| n.message),
            Some("Claim deleted successfully".to_string())
        );
    }
}

mod unauthorized {
    use super::*;

    async fn expired(route: Route) -> (MockBackend, Portal<PortalClient>) {
        let backend = MockBackend::start().await;
        let portal = signed_in(&backend, route).await;
        backend.revoke_tokens();
        (backend, portal)
    }

    fn assert_torn_down(portal: &Portal<PortalClient>) {
        assert!(!portal.session().is_authenticated());
        assert!(portal.session().user().is_none());
        assert_eq!(portal.navigator().current(), Route::Login);
    }

    #[tokio::test]
    async fn test_from_dashboard() {
        let (_backend, portal) = expired(Route::Dashboard).await;
        assert!(!portal.dashboard_page().load().await);
        assert_torn_down(&portal);
    }

    #[tokio::test]
    async fn test_from_policies() {
        let (_backend, portal) = expired(Route::Policies).await;
        assert!(!portal.policies_page().load().await);
        assert_torn_down(&portal);
    }

    #[tokio::test]
    async fn test_from_claims() {
        let (_backend, portal) = expired(Route::Claims).await;
        assert!(!portal.claims_page().load().await);
        assert_torn_down(&portal);
    }

    #[tokio::test]
    async fn test_from_claim_delete() {
        let backend = MockBackend::start().await;
        let policy = TestPolicyBuilder::new().build();
        backend.insert_policy(policy.clone());
        backend.insert_claim(TestClaimBuilder::new().against(&policy).build());
        let portal = signed_in(&backend, Route::Claims).await;

        let mut page = portal.claims_page();
        assert!(page.load().await);
        assert!(page.request_delete(test_utils::IdFixtures::claim_id()));
        backend.revoke_tokens();

        assert!(!page.confirm_delete().await);
        assert_torn_down(&portal);
        assert_eq!(portal.open("/claims"), Route::Login);
    }

    #[tokio::test]
    async fn test_from_any_adapter() {
        let api = StubApi {
            auth: test_utils::AuthFixtures::response("abc"),
        };
        let portal = Portal::new(api, SessionStore::ephemeral(), Navigator::new());
        portal.session().login("abc", UserFixtures::ada());
        portal.open("/policies");

        assert!(!portal.policies_page().load().await);
        assert!(!portal.session().is_authenticated());
        assert_eq!(portal.navigator().current(), Route::Login);
    }
}
