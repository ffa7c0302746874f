pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::not_blank;
use password::fits_bcrypt;

pub use extractors::{AdminUser, AuthenticatedUser};
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, verify_token, Claims};

/// Payload for `POST /users/register`.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name. Older clients send it as `username`.
    #[serde(alias = "username")]
    #[validate(length(min = 1, max = 50), custom = "not_blank")]
    pub name: String,
    #[validate(email)]
    pub email: String,
    /// At least 6 characters and at most 72 bytes, the most bcrypt can hash.
    #[validate(length(min = 6), custom = "fits_bcrypt")]
    pub password: String,
}

/// Payload for `POST /users/login`. The login identifier is the email address,
/// accepted under `username` as well for form-style clients.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(alias = "username")]
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Returned by a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The signed JWT to send as `Authorization: Bearer <token>`.
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
    pub user_id: i64,
}

impl TokenResponse {
    pub fn bearer(access_token: String, user_id: i64) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_login_request_validation() {
        let valid_login = LoginRequest {
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_login.validate().is_ok());

        let empty_password = LoginRequest {
            email: "test@example.com".to_string(),
            password: "".to_string(),
        };
        assert!(empty_password.validate().is_err());
    }

    #[test]
    fn test_login_accepts_username_alias() {
        let login: LoginRequest =
            serde_json::from_str(r#"{"username": "a@b.io", "password": "pw"}"#).unwrap();
        assert_eq!(login.email, "a@b.io");
    }

    #[test]
    fn test_register_request_validation() {
        let valid_register = RegisterRequest {
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_register.validate().is_ok());

        let invalid_email = RegisterRequest {
            name: "Test User".to_string(),
            email: "testexample.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(invalid_email.validate().is_err());

        let short_password = RegisterRequest {
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password: "12345".to_string(),
        };
        assert!(short_password.validate().is_err());

        let empty_name = RegisterRequest {
            name: "".to_string(),
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(empty_name.validate().is_err());

        let blank_name = RegisterRequest {
            name: "   ".to_string(),
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(blank_name.validate().is_err());

        let long_password = RegisterRequest {
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password: "x".repeat(73),
        };
        assert!(long_password.validate().is_err());
    }

    #[test]
    fn test_token_response_shape() {
        let json = serde_json::to_value(TokenResponse::bearer("abc".into(), 5)).unwrap();
        assert_eq!(json["access_token"], "abc");
        assert_eq!(json["token_type"], "bearer");
        assert_eq!(json["user_id"], 5);
    }
}
