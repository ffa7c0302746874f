use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::not_blank;

pub const ADMIN_ROLE: &str = "admin";
pub const USER_ROLE: &str = "user";

lazy_static! {
    // Role names: alphanumeric, underscores, hyphens
    static ref ROLE_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// Request body for `POST /roles/assign`.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RoleAssignment {
    /// Name of the user receiving the role.
    #[validate(length(min = 1, max = 50), custom = "not_blank")]
    pub username: String,
    #[validate(
        length(min = 1, max = 32),
        regex(
            path = "ROLE_REGEX",
            message = "Role must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub role: String,
}

/// Response body for `GET /roles/{username}`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct UserRoles {
    pub username: String,
    pub roles: Vec<String>,
}
