//! Claims page
//!
//! Lists the user's claims behind a description search and a status
//! selector. Claims are filed against an Active policy, and only a
//! `Submitted` claim offers edit and delete.

use core_kernel::{ClaimId, FieldErrors, FormState, ListFilter, PolicyId, Selector};
use domain_claims::{Claim, ClaimActions, ClaimDraft, ClaimField, ClaimFilter, ClaimStatus};
use domain_policy::Policy;
use infra_http::PortalApi;
use tracing::debug;

use crate::activity::Activity;
use crate::portal::Portal;

pub const CLAIMS_LOAD_FAILED: &str = "Failed to load data";
pub const SAVE_FAILED: &str = "Operation failed";
pub const DELETE_FAILED: &str = "Failed to delete claim";
pub const NO_ACTIVE_POLICY: &str = "You need at least one active policy to file a claim.";

pub struct ClaimsPage<A: PortalApi> {
    portal: Portal<A>,
    claims: Vec<Claim>,
    policies: Vec<Policy>,
    filter: ClaimFilter,
    visible: Vec<Claim>,
    loading: Activity,
    busy: Activity,
    form: FormState<ClaimDraft>,
    pending_delete: Option<ClaimId>,
}

impl<A: PortalApi> ClaimsPage<A> {
    pub fn new(portal: Portal<A>) -> Self {
        Self {
            portal,
            claims: Vec::new(),
            policies: Vec::new(),
            filter: ClaimFilter::default(),
            visible: Vec::new(),
            loading: Activity::new(),
            busy: Activity::new(),
            form: FormState::new(),
            pending_delete: None,
        }
    }

    /// Fetches claims and policies together; either failing fails the load
    pub async fn load(&mut self) -> bool {
        let loading = self.loading.begin();
        let api = self.portal.api();
        let result = tokio::try_join!(api.list_claims(), api.list_policies());
        drop(loading);

        match result {
            Ok((claims, policies)) => {
                self.claims = claims;
                self.policies = policies;
                self.refilter();
                true
            }
            Err(e) => {
                self.portal.report(&e, CLAIMS_LOAD_FAILED);
                false
            }
        }
    }

    fn refilter(&mut self) {
        self.visible = self.filter.apply(&self.claims);
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.search = term.into();
        self.refilter();
    }

    pub fn set_status_filter(&mut self, selector: Selector<ClaimStatus>) {
        self.filter.status = selector;
        self.refilter();
    }

    pub fn filter(&self) -> &ClaimFilter {
        &self.filter
    }

    pub fn has_active_filter(&self) -> bool {
        self.filter.is_active()
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// The filtered view
    pub fn visible(&self) -> &[Claim] {
        &self.visible
    }

    /// Policies a new claim may be filed against
    pub fn active_policies(&self) -> Vec<&Policy> {
        self.policies.iter().filter(|p| p.is_active()).collect()
    }

    pub fn can_file_claim(&self) -> bool {
        self.policies.iter().any(Policy::is_active)
    }

    /// The policy a claim was filed against, embedded or looked up
    pub fn policy_for<'a>(&'a self, claim: &'a Claim) -> Option<&'a Policy> {
        claim
            .policy
            .as_ref()
            .or_else(|| self.policies.iter().find(|p| p.id == claim.policy_id))
    }

    pub fn actions_for(&self, claim: &Claim) -> ClaimActions {
        claim.allowed_actions()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_active()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_active()
    }

    /// A handle that keeps reporting the busy flag while a save or delete runs
    pub fn busy_flag(&self) -> Activity {
        self.busy.clone()
    }

    /// Opens an empty filing form; refused without an Active policy
    pub fn open_create(&mut self) -> bool {
        if !self.can_file_claim() {
            self.portal.notifier().error(NO_ACTIVE_POLICY);
            return false;
        }
        self.form.open_create();
        true
    }

    /// Opens the form on a listed claim that still allows editing
    pub fn open_edit(&mut self, id: ClaimId) -> bool {
        match self.claims.iter().find(|c| c.id == id) {
            Some(claim) if claim.allowed_actions().can_edit => {
                self.form.open_edit(claim);
                true
            }
            Some(claim) => {
                debug!(claim = %claim.id, status = %claim.status, "Edit refused");
                false
            }
            None => false,
        }
    }

    pub fn close_form(&mut self) {
        self.form.close();
    }

    pub fn form(&self) -> &FormState<ClaimDraft> {
        &self.form
    }

    pub fn form_errors(&self) -> &FieldErrors<ClaimField> {
        self.form.errors()
    }

    /// Edits one field of the open form
    pub fn update_field(&mut self, field: ClaimField, edit: impl FnOnce(&mut ClaimDraft)) {
        self.form.update(field, edit);
    }

    /// Validates and saves the form; returns true when saved
    ///
    /// A new claim must name one of the listed Active policies. An
    /// amendment sends only the amount and description.
    pub async fn submit(&mut self) -> bool {
        if !self.form.is_open() {
            return false;
        }
        let Some(_busy) = self.busy.begin() else {
            return false;
        };

        let editing = self.form.editing().map(|c| c.id);
        let result = match editing {
            Some(id) => {
                let Some(request) = self.form.prepare(ClaimDraft::to_update_request) else {
                    return false;
                };
                self.portal
                    .api()
                    .update_claim(id, &request)
                    .await
                    .map(|_| "Claim updated successfully")
            }
            None => {
                let eligible: Vec<PolicyId> =
                    self.active_policies().iter().map(|p| p.id).collect();
                let Some(request) = self
                    .form
                    .prepare(|draft| draft.to_create_request(&eligible))
                else {
                    return false;
                };
                self.portal
                    .api()
                    .create_claim(&request)
                    .await
                    .map(|_| "Claim submitted successfully")
            }
        };

        match result {
            Ok(notice) => {
                self.portal.notifier().success(notice);
                self.form.close();
                self.load().await;
                true
            }
            Err(e) => {
                self.portal.report(&e, SAVE_FAILED);
                false
            }
        }
    }

    /// Asks for confirmation before deleting; false when not allowed
    pub fn request_delete(&mut self, id: ClaimId) -> bool {
        match self.claims.iter().find(|c| c.id == id) {
            Some(claim) if claim.allowed_actions().can_delete => {
                self.pending_delete = Some(id);
                true
            }
            _ => false,
        }
    }

    /// The claim awaiting delete confirmation
    pub fn pending_delete(&self) -> Option<ClaimId> {
        self.pending_delete
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Deletes the claim awaiting confirmation; returns true when deleted
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.pending_delete else {
            return false;
        };
        let Some(_busy) = self.busy.begin() else {
            return false;
        };

        self.pending_delete = None;
        let result = self.portal.api().delete_claim(id).await;

        match result {
            Ok(()) => {
                self.portal.notifier().success("Claim deleted successfully");
                self.load().await;
                true
            }
            Err(e) => {
                self.portal.report(&e, DELETE_FAILED);
                false
            }
        }
    }
}
