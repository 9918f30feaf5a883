//! Page controllers
//!
//! Each page owns its state exclusively and reaches the backend through
//! the portal's `PortalApi`. Failed calls end as an error notice and leave
//! the page interactive.

pub mod login;
pub mod register;
pub mod dashboard;
pub mod policies;
pub mod claims;

pub use login::LoginPage;
pub use register::RegisterPage;
pub use dashboard::{DashboardPage, DashboardStats, RECENT_ITEMS};
pub use policies::PoliciesPage;
pub use claims::ClaimsPage;
