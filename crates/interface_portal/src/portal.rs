//! The portal context shared by every page

use std::sync::Arc;
use tracing::warn;

use infra_http::{ApiError, Navigator, PortalApi, Route, SessionStore};

use crate::notify::Notifier;
use crate::pages::{ClaimsPage, DashboardPage, LoginPage, PoliciesPage, RegisterPage};

/// Backend port, session, navigation and notices, bundled for the pages
pub struct Portal<A: PortalApi> {
    api: Arc<A>,
    session: SessionStore,
    navigator: Navigator,
    notifier: Notifier,
}

impl<A: PortalApi> Clone for Portal<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            session: self.session.clone(),
            navigator: self.navigator.clone(),
            notifier: self.notifier.clone(),
        }
    }
}

impl<A: PortalApi> Portal<A> {
    pub fn new(api: A, session: SessionStore, navigator: Navigator) -> Self {
        Self {
            api: Arc::new(api),
            session,
            navigator,
            notifier: Notifier::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Opens `path` through the route guard; returns the page shown
    pub fn open(&self, path: &str) -> Route {
        self.navigator.open(Route::parse(path), &self.session)
    }

    /// Ends the session and returns to the login page
    pub fn logout(&self) {
        self.session.logout();
        self.notifier.success("Logged out successfully");
        self.navigator.navigate(Route::Login);
    }

    /// Navigation bar entries; empty while signed out
    pub fn nav_links(&self) -> Vec<(Route, &'static str)> {
        if self.session.is_authenticated() {
            Route::nav_links().to_vec()
        } else {
            Vec::new()
        }
    }

    /// Turns a failed call into an error notice
    ///
    /// A 401 also guarantees the session is gone and the login page is
    /// shown, whichever adapter produced it.
    pub(crate) fn report(&self, err: &ApiError, fallback: &str) {
        warn!(error = %err, "Backend call failed");
        if err.is_unauthorized() {
            if self.session.is_authenticated() {
                self.session.logout();
            }
            self.navigator.redirect_to_login();
        }
        self.notifier.error(err.user_message(fallback));
    }

    pub fn login_page(&self) -> LoginPage<A> {
        LoginPage::new(self.clone())
    }

    pub fn register_page(&self) -> RegisterPage<A> {
        RegisterPage::new(self.clone())
    }

    pub fn dashboard_page(&self) -> DashboardPage<A> {
        DashboardPage::new(self.clone())
    }

    pub fn policies_page(&self) -> PoliciesPage<A> {
        PoliciesPage::new(self.clone())
    }

    pub fn claims_page(&self) -> ClaimsPage<A> {
        ClaimsPage::new(self.clone())
    }
}
