pub mod role;
pub mod task;
pub mod user;

use validator::ValidationError;

pub use role::{RoleAssignment, UserRoles};
pub use task::{Task, TaskInput, TaskPriority, TaskQuery, TaskSort, TaskStatus, TaskUpdate};
pub use user::{NewUser, User, UserResponse};

/// Rejects strings made up only of whitespace.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}
