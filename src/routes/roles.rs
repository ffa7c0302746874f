use crate::{
    auth::AdminUser,
    db,
    error::AppError,
    models::{RoleAssignment, UserRoles},
};
use actix_web::{get, post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

/// Assign a role
///
/// Admin only. Grants `role` to the user named `username`; assigning a role the
/// user already holds is a no-op that still succeeds.
///
/// The body is parsed only after the admin check, so non-admins get `403`
/// whatever they send.
#[post("/assign")]
pub async fn assign_role(
    pool: web::Data<SqlitePool>,
    admin: AdminUser,
    body: web::Bytes,
) -> Result<impl Responder, AppError> {
    let assignment: RoleAssignment = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Json deserialize error: {}", e)))?;
    assignment.validate()?;

    let user = db::users::find_by_name(&pool, &assignment.username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", assignment.username)))?;

    if db::roles::assign_role(&pool, user.id, &assignment.role).await? {
        log::info!(
            "admin {} assigned role '{}' to user {}",
            admin.0,
            assignment.role,
            user.id
        );
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": format!(
            "Role '{}' assigned to user '{}'",
            assignment.role, assignment.username
        )
    })))
}

/// List a user's roles
///
/// Admin only. An unknown username yields an empty list rather than a `404`.
#[get("/{username}")]
pub async fn get_user_roles(
    pool: web::Data<SqlitePool>,
    _admin: AdminUser,
    username: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let username = username.into_inner();

    let roles = match db::users::find_by_name(&pool, &username).await? {
        Some(user) => db::roles::roles_for_user(&pool, user.id).await?,
        None => Vec::new(),
    };

    Ok(HttpResponse::Ok().json(UserRoles { username, roles }))
}
