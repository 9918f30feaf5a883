//! Users and the authentication payloads exchanged with the backend

use serde::{Deserialize, Serialize};

use core_kernel::UserId;

/// A registered portal user
///
/// Created server-side at registration and never modified by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "userId")]
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    /// Returns "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Body returned by both sign-in and registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_wire_format() {
        let json = r#"{"userId":1,"email":"ada@example.com","firstName":"Ada","lastName":"Lovelace"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, UserId::new(1));
        assert_eq!(user.full_name(), "Ada Lovelace");

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["firstName"], "Ada");
        assert_eq!(back["userId"], 1);
    }

    #[test]
    fn test_register_request_uses_camel_case() {
        let request = RegisterRequest {
            email: "a@b.co".into(),
            password: "secret1".into(),
            first_name: "A".into(),
            last_name: "B".into(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["firstName"], "A");
        assert_eq!(value["lastName"], "B");
    }
}
