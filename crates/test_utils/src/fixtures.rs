//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the portal's entities. These
//! fixtures are consistent and predictable; `UserFixtures::random` is the
//! one exception and exists for tests that need distinct accounts.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_kernel::{ClaimId, PolicyId, UserId};
use domain_account::{AuthResponse, LoginRequest, RegisterRequest, User};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for user test data
pub struct UserFixtures;

impl UserFixtures {
    /// The default signed-in user
    pub fn ada() -> User {
        User {
            id: UserId::new(1),
            email: "ada@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        }
    }

    /// A second user for ownership tests
    pub fn grace() -> User {
        User {
            id: UserId::new(2),
            email: "grace@example.com".to_string(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
        }
    }

    /// A user with generated names and email
    pub fn random(id: i64) -> User {
        User {
            id: UserId::new(id),
            email: SafeEmail().fake(),
            first_name: FirstName().fake(),
            last_name: LastName().fake(),
        }
    }

    /// Password accepted by the mock backend for seeded users
    pub fn password() -> &'static str {
        "secret123"
    }
}

/// Fixture for authentication payloads
pub struct AuthFixtures;

impl AuthFixtures {
    /// Login response carrying `token` for the default user
    pub fn response(token: &str) -> AuthResponse {
        AuthResponse {
            token: token.to_string(),
            user: UserFixtures::ada(),
        }
    }

    pub fn login_request() -> LoginRequest {
        LoginRequest {
            email: "ada@example.com".to_string(),
            password: UserFixtures::password().to_string(),
        }
    }

    pub fn register_request() -> RegisterRequest {
        RegisterRequest {
            email: "new.user@example.com".to_string(),
            password: UserFixtures::password().to_string(),
            first_name: "New".to_string(),
            last_name: "User".to_string(),
        }
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard policy start date (Jan 1, 2024)
    pub fn policy_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    /// Standard policy end date (Dec 31, 2024)
    pub fn policy_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
    }

    /// Standard claim submission time
    pub fn submitted_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }
}

/// Fixture for identifiers
pub struct IdFixtures;

impl IdFixtures {
    pub fn user_id() -> UserId {
        UserFixtures::ada().id
    }

    pub fn policy_id() -> PolicyId {
        PolicyId::new(10)
    }

    pub fn claim_id() -> ClaimId {
        ClaimId::new(100)
    }
}

/// Fixture for amounts
pub struct AmountFixtures;

impl AmountFixtures {
    pub fn premium() -> Decimal {
        dec!(1200.50)
    }

    pub fn claim() -> Decimal {
        dec!(350.00)
    }
}
