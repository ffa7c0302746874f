use crate::error::AppError;
use bcrypt::{hash, verify};
use validator::ValidationError;

/// bcrypt silently ignores everything past this many bytes.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Validator for passwords that bcrypt can hash without truncating them.
pub fn fits_bcrypt(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        let mut error = ValidationError::new("password_too_long");
        error.message = Some(format!("Password must be at most {} bytes", MAX_PASSWORD_BYTES).into());
        return Err(error);
    }
    Ok(())
}

/// Hashes `password` with the given bcrypt work factor.
///
/// This is CPU-bound; handlers run it through `actix_web::web::block`.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AppError::BadRequest(format!(
            "Password must be at most {} bytes",
            MAX_PASSWORD_BYTES
        )));
    }

    hash(password, cost)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

/// Passwords bcrypt would truncate never match, so a shared 72-byte prefix is
/// not enough to log in.
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Ok(false);
    }

    verify(password, hashed_password)
        .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {}", e)))
}
