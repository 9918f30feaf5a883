//! Sign-in and registration form rules
//!
//! # Validation Rules
//!
//! ## Sign-in
//! - Email is required and must look like `local@domain.tld`
//! - Password is required and at least 6 characters
//!
//! ## Registration
//! - First and last name are required (whitespace does not count)
//! - Email and password follow the sign-in rules
//! - The confirmation must equal the password

use once_cell::sync::Lazy;
use regex::Regex;

use core_kernel::FieldErrors;

use crate::user::{LoginRequest, RegisterRequest};

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Fields of the sign-in and registration forms, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AuthField {
    FirstName,
    LastName,
    Email,
    Password,
    ConfirmPassword,
}

/// Draft of the sign-in form
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> FieldErrors<AuthField> {
        let mut errors = FieldErrors::new();
        check_email(&self.email, &mut errors);
        check_password(&self.password, &mut errors);
        errors
    }

    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

/// Draft of the registration form
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> FieldErrors<AuthField> {
        let mut errors = FieldErrors::new();

        if self.first_name.trim().is_empty() {
            errors.insert(AuthField::FirstName, "First name is required");
        }
        if self.last_name.trim().is_empty() {
            errors.insert(AuthField::LastName, "Last name is required");
        }
        check_email(&self.email, &mut errors);
        check_password(&self.password, &mut errors);
        if self.password != self.confirm_password {
            errors.insert(AuthField::ConfirmPassword, "Passwords do not match");
        }

        errors
    }

    /// The confirmation field stays client-side
    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            email: self.email.clone(),
            password: self.password.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }
}

/// Returns true when `email` has the `local@domain.tld` shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn check_email(email: &str, errors: &mut FieldErrors<AuthField>) {
    if email.is_empty() {
        errors.insert(AuthField::Email, "Email is required");
    } else if !is_valid_email(email) {
        errors.insert(AuthField::Email, "Please enter a valid email");
    }
}

fn check_password(password: &str, errors: &mut FieldErrors<AuthField>) {
    if password.is_empty() {
        errors.insert(AuthField::Password, "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert(
            AuthField::Password,
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        );
    }
}
