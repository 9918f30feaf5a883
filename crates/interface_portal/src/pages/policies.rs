//! Policies page
//!
//! Lists the user's policies behind a search box and a policy-type
//! selector, and hosts the create/edit form. After every successful save
//! the whole list is fetched again.

use core_kernel::{FieldErrors, FormState, ListFilter, PolicyId, Selector};
use domain_policy::{Policy, PolicyDraft, PolicyField, PolicyFilter, PolicyType};
use infra_http::PortalApi;

use crate::activity::Activity;
use crate::portal::Portal;

pub const POLICIES_LOAD_FAILED: &str = "Failed to load policies";
pub const SAVE_FAILED: &str = "Operation failed";

pub struct PoliciesPage<A: PortalApi> {
    portal: Portal<A>,
    policies: Vec<Policy>,
    filter: PolicyFilter,
    visible: Vec<Policy>,
    loading: Activity,
    busy: Activity,
    form: FormState<PolicyDraft>,
}

impl<A: PortalApi> PoliciesPage<A> {
    pub fn new(portal: Portal<A>) -> Self {
        Self {
            portal,
            policies: Vec::new(),
            filter: PolicyFilter::default(),
            visible: Vec::new(),
            loading: Activity::new(),
            busy: Activity::new(),
            form: FormState::new(),
        }
    }

    /// Fetches the full policy list
    pub async fn load(&mut self) -> bool {
        let loading = self.loading.begin();
        let result = self.portal.api().list_policies().await;
        drop(loading);

        match result {
            Ok(policies) => {
                self.policies = policies;
                self.refilter();
                true
            }
            Err(e) => {
                self.portal.report(&e, POLICIES_LOAD_FAILED);
                false
            }
        }
    }

    fn refilter(&mut self) {
        self.visible = self.filter.apply(&self.policies);
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.search = term.into();
        self.refilter();
    }

    pub fn set_type_filter(&mut self, selector: Selector<PolicyType>) {
        self.filter.policy_type = selector;
        self.refilter();
    }

    pub fn filter(&self) -> &PolicyFilter {
        &self.filter
    }

    /// Whether an empty list is down to the filters rather than no data
    pub fn has_active_filter(&self) -> bool {
        self.filter.is_active()
    }

    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    /// The filtered view
    pub fn visible(&self) -> &[Policy] {
        &self.visible
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_active()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_active()
    }

    /// A handle that keeps reporting the busy flag while `submit` runs
    pub fn busy_flag(&self) -> Activity {
        self.busy.clone()
    }

    pub fn open_create(&mut self) {
        self.form.open_create();
    }

    /// Opens the form on a listed policy; false when it is not listed
    pub fn open_edit(&mut self, id: PolicyId) -> bool {
        match self.policies.iter().find(|p| p.id == id) {
            Some(policy) => {
                self.form.open_edit(policy);
                true
            }
            None => false,
        }
    }

    pub fn close_form(&mut self) {
        self.form.close();
    }

    pub fn form(&self) -> &FormState<PolicyDraft> {
        &self.form
    }

    pub fn form_errors(&self) -> &FieldErrors<PolicyField> {
        self.form.errors()
    }

    /// Edits one field of the open form
    pub fn update_field(&mut self, field: PolicyField, edit: impl FnOnce(&mut PolicyDraft)) {
        self.form.update(field, edit);
    }

    /// Validates and saves the form; returns true when saved
    ///
    /// An invalid draft annotates its fields and sends nothing.
    pub async fn submit(&mut self) -> bool {
        if !self.form.is_open() {
            return false;
        }
        let Some(_busy) = self.busy.begin() else {
            return false;
        };

        let editing = self.form.editing().map(|p| p.id);
        let result = match editing {
            Some(id) => {
                let Some(request) = self.form.prepare(PolicyDraft::to_update_request) else {
                    return false;
                };
                self.portal
                    .api()
                    .update_policy(id, &request)
                    .await
                    .map(|_| "Policy updated successfully")
            }
            None => {
                let Some(request) = self.form.prepare(PolicyDraft::to_create_request) else {
                    return false;
                };
                self.portal
                    .api()
                    .create_policy(&request)
                    .await
                    .map(|_| "Policy created successfully")
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
}
