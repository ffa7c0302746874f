use crate::{config::JwtSettings, error::AppError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by an access token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Subject: the user's id.
    pub sub: i64,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// Issues an HS256 token for `user_id` valid for `settings.expiration_hours`.
pub fn generate_token(user_id: i64, settings: &JwtSettings) -> Result<String, AppError> {
    let now = Utc::now();
    let expiration = Duration::try_hours(settings.expiration_hours)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| AppError::InternalServerError("Token expiry out of range".into()))?;

    let claims = Claims {
        sub: user_id,
        iat: now.timestamp(),
        exp: expiration.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(settings.secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
}

/// Checks signature and expiry of `token` and returns its claims.
///
/// Any failure (bad signature, malformed token, expired) is `AppError::Unauthorized`.
pub fn verify_token(token: &str, settings: &JwtSettings) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(AppError::from)
}
