//! Routes and the route guard
//!
//! The navigator holds the route the user is on. Protected routes bounce to
//! the login page while signed out, and the bounced-from route is kept so
//! a successful sign-in can return there.

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::session::SessionStore;

/// A page of the portal
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Policies,
    Claims,
    NotFound(String),
}

impl Route {
    /// Maps a path to a route; `/` lands on the dashboard
    pub fn parse(path: &str) -> Route {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            other => other,
        };
        match normalized {
            "/" | "/dashboard" => Route::Dashboard,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/policies" => Route::Policies,
            "/claims" => Route::Claims,
            _ => Route::NotFound(trimmed.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::Policies => "/policies",
            Route::Claims => "/claims",
            Route::NotFound(path) => path,
        }
    }

    /// Whether the page needs a signed-in user
    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::Dashboard | Route::Policies | Route::Claims)
    }

    /// Links shown in the navigation bar once signed in
    pub fn nav_links() -> [(Route, &'static str); 3] {
        [
            (Route::Dashboard, "Dashboard"),
            (Route::Policies, "Policies"),
            (Route::Claims, "Claims"),
        ]
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug)]
struct NavState {
    current: Route,
    return_to: Option<Route>,
}

/// Shared handle to the current route
#[derive(Debug, Clone)]
pub struct Navigator {
    state: Arc<RwLock<NavState>>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Starts on the login page
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(NavState {
                current: Route::Login,
                return_to: None,
            })),
        }
    }

    pub fn current(&self) -> Route {
        self.state.read().current.clone()
    }

    /// Moves to `route` without any guard check
    pub fn navigate(&self, route: Route) {
        debug!(to = %route, "Navigate");
        self.state.write().current = route;
    }

    /// Sends the user to the login page, forgetting any pending return
    pub fn redirect_to_login(&self) {
        let mut state = self.state.write();
        state.current = Route::Login;
        state.return_to = None;
    }

    /// Takes the route a guard bounce remembered, if any
    pub fn take_return_to(&self) -> Option<Route> {
        self.state.write().return_to.take()
    }

    /// Route guard: moves to `route`, or to login when it needs a session
    /// the user does not have. Returns the route actually shown.
    pub fn open(&self, route: Route, session: &SessionStore) -> Route {
        let mut state = self.state.write();
        if route.requires_auth() && !session.is_authenticated() {
            debug!(requested = %route, "Protected route while signed out");
            state.return_to = Some(route);
            state.current = Route::Login;
        } else {
            if let Route::NotFound(path) = &route {
                warn!(path = %path, "No page at this path");
            }
            state.current = route;
        }
        state.current.clone()
    }
}
