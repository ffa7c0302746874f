use actix_web::dev::Payload;
use actix_web::{web, Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;
use sqlx::SqlitePool;

use crate::{auth::token::Claims, db, error::AppError, models::role::ADMIN_ROLE};

/// The id of the user whose token was verified by `AuthMiddleware`.
///
/// Fails with `401` when no claims are present, which means the route was not
/// covered by the middleware, or when the token's user no longer exists.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub i64);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user_id = claims_user_id(req);
        let pool = req.app_data::<web::Data<SqlitePool>>().cloned();

        Box::pin(async move {
            require_user(user_id, pool)
                .await
                .map(|(user_id, _)| AuthenticatedUser(user_id))
                .map_err(ActixError::from)
        })
    }
}

/// An authenticated user holding the `admin` role; anyone else gets `403`.
#[derive(Debug, Clone, Copy)]
pub struct AdminUser(pub i64);

impl FromRequest for AdminUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user_id = claims_user_id(req);
        let pool = req.app_data::<web::Data<SqlitePool>>().cloned();

        Box::pin(async move { require_admin(user_id, pool).await.map_err(ActixError::from) })
    }
}

async fn require_user(
    user_id: Result<i64, AppError>,
    pool: Option<web::Data<SqlitePool>>,
) -> Result<(i64, web::Data<SqlitePool>), AppError> {
    let user_id = user_id?;
    let pool = pool
        .ok_or_else(|| AppError::InternalServerError("Database pool not available".into()))?;

    if db::users::find_by_id(&pool, user_id).await?.is_none() {
        log::debug!("token subject {} no longer exists", user_id);
        return Err(credentials_error());
    }

    Ok((user_id, pool))
}

async fn require_admin(
    user_id: Result<i64, AppError>,
    pool: Option<web::Data<SqlitePool>>,
) -> Result<AdminUser, AppError> {
    let (user_id, pool) = require_user(user_id, pool).await?;

    if db::roles::has_role(&pool, user_id, ADMIN_ROLE).await? {
        Ok(AdminUser(user_id))
    } else {
        log::warn!("user {} denied admin access", user_id);
        Err(AppError::Forbidden("Only admin can perform this action".into()))
    }
}

fn claims_user_id(req: &HttpRequest) -> Result<i64, AppError> {
    req.extensions()
        .get::<Claims>()
        .map(|claims| claims.sub)
        .ok_or_else(credentials_error)
}

fn credentials_error() -> AppError {
    AppError::Unauthorized("Could not validate credentials".to_string())
}
