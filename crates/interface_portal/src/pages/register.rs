//! Registration page

use core_kernel::FieldErrors;
use domain_account::{AuthField, RegisterForm};
use infra_http::{PortalApi, Route};

use crate::activity::Activity;
use crate::portal::Portal;

pub const REGISTER_FAILED: &str = "Registration failed. Please try again.";

pub struct RegisterPage<A: PortalApi> {
    portal: Portal<A>,
    form: RegisterForm,
    errors: FieldErrors<AuthField>,
    busy: Activity,
}

impl<A: PortalApi> RegisterPage<A> {
    pub fn new(portal: Portal<A>) -> Self {
        Self {
            portal,
            form: RegisterForm::default(),
            errors: FieldErrors::new(),
            busy: Activity::new(),
        }
    }

    /// Edits one field and clears its message
    pub fn set(&mut self, field: AuthField, value: impl Into<String>) {
        let value = value.into();
        match field {
            AuthField::FirstName => self.form.first_name = value,
            AuthField::LastName => self.form.last_name = value,
            AuthField::Email => self.form.email = value,
            AuthField::Password => self.form.password = value,
            AuthField::ConfirmPassword => self.form.confirm_password = value,
        }
        self.errors.remove(field);
    }

    pub fn form(&self) -> &RegisterForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors<AuthField> {
        &self.errors
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_active()
    }

    /// A handle that keeps reporting the busy flag while `submit` runs
    pub fn busy_flag(&self) -> Activity {
        self.busy.clone()
    }

    /// Validates, creates the account and signs in; returns true on success
    pub async fn submit(&mut self) -> bool {
        let Some(_busy) = self.busy.begin() else {
            return false;
        };
        self.errors = self.form.validate();
        if !self.errors.is_empty() {
            return false;
        }

        let result = self.portal.api().register(&self.form.to_request()).await;

        match result {
            Ok(response) => {
                self.portal.session().login(response.token, response.user);
                self.portal.notifier().success("Account created successfully!");
                self.portal.navigator().navigate(Route::Dashboard);
                true
            }
            Err(e) => {
                self.portal.report(&e, REGISTER_FAILED);
                false
            }
        }
    }
}
