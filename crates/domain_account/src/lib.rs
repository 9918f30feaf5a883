//! Account Domain
//!
//! Users as the backend describes them, the session a signed-in user holds,
//! and the client-side rules for the sign-in and registration forms.

pub mod user;
pub mod session;
pub mod validation;

pub use user::{AuthResponse, LoginRequest, RegisterRequest, User};
pub use session::Session;
pub use validation::{AuthField, LoginForm, RegisterForm};
