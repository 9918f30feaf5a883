//! Sign-in page

use tracing::info;

use core_kernel::FieldErrors;
use domain_account::{AuthField, LoginForm};
use infra_http::{PortalApi, Route};

use crate::activity::Activity;
use crate::portal::Portal;

pub const LOGIN_FAILED: &str = "Invalid credentials. Please try again.";

pub struct LoginPage<A: PortalApi> {
    portal: Portal<A>,
    form: LoginForm,
    errors: FieldErrors<AuthField>,
    busy: Activity,
}

impl<A: PortalApi> LoginPage<A> {
    pub fn new(portal: Portal<A>) -> Self {
        Self {
            portal,
            form: LoginForm::default(),
            errors: FieldErrors::new(),
            busy: Activity::new(),
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.form.email = email.into();
        self.errors.remove(AuthField::Email);
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.form.password = password.into();
        self.errors.remove(AuthField::Password);
    }

    pub fn form(&self) -> &LoginForm {
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

    /// Validates, signs in and moves on; returns true on success
    ///
    /// After success the navigator shows the page the route guard bounced
    /// from, or the dashboard.
    pub async fn submit(&mut self) -> bool {
        let Some(_busy) = self.busy.begin() else {
            return false;
        };
        self.errors = self.form.validate();
        if !self.errors.is_empty() {
            return false;
        }

        let result = self.portal.api().login(&self.form.to_request()).await;

        match result {
            Ok(response) => {
                self.portal.session().login(response.token, response.user);
                self.portal.notifier().success("Welcome back!");
                let navigator = self.portal.navigator();
                let destination = navigator.take_return_to().unwrap_or(Route::Dashboard);
                info!(to = %destination, "Signed in");
                navigator.navigate(destination);
                true
            }
            Err(e) => {
                self.portal.report(&e, LOGIN_FAILED);
                false
            }
        }
    }
}
