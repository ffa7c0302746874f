use crate::{
    auth::{
        generate_token, hash_password, verify_password, AuthenticatedUser, LoginRequest,
        RegisterRequest, TokenResponse,
    },
    config::Config,
    db,
    error::AppError,
    models::{
        role::{ADMIN_ROLE, USER_ROLE},
        user::normalize_email,
        NewUser, UserResponse,
    },
};
use actix_web::{get, post, web, HttpResponse, Responder};
use sqlx::SqlitePool;
use validator::Validate;

/// Register a new user
///
/// Creates the account, grants it the `user` role (plus `admin` when the email
/// matches `ADMIN_EMAIL`) and returns the public profile with `201 Created`.
/// A taken email is a `400`.
#[post("/register")]
pub async fn register(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;
    let RegisterRequest {
        name,
        email,
        password,
    } = register_data.into_inner();
    let email = normalize_email(&email);

    if db::users::find_by_email(&pool, &email).await?.is_some() {
        return Err(AppError::BadRequest("Email already registered".into()));
    }

    let cost = config.bcrypt_cost;
    let hashed_password = web::block(move || hash_password(&password, cost)).await??;

    let mut roles = vec![USER_ROLE];
    if config.admin_email.as_deref() == Some(email.as_str()) {
        roles.push(ADMIN_ROLE);
    }

    let user = db::users::create_user(
        &pool,
        &NewUser {
            name,
            email,
            hashed_password,
        },
        &roles,
    )
    .await?;

    log::info!("registered user {} with roles {:?}", user.id, roles);
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Login user
///
/// Exchanges email and password for a bearer token. Unknown emails and wrong
/// passwords both answer `400` with the same message.
#[post("/login")]
pub async fn login(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;
    let LoginRequest { email, password } = login_data.into_inner();
    let email = normalize_email(&email);

    let user = match db::users::find_by_email(&pool, &email).await? {
        Some(user) => user,
        None => {
            log::warn!("login attempt for unknown email");
            return Err(invalid_credentials());
        }
    };

    let hashed_password = user.hashed_password.clone();
    let password_ok = web::block(move || verify_password(&password, &hashed_password)).await??;
    if !password_ok {
        log::warn!("failed login for user {}", user.id);
        return Err(invalid_credentials());
    }

    let token = generate_token(user.id, &config.jwt)?;
    Ok(HttpResponse::Ok().json(TokenResponse::bearer(token, user.id)))
}

/// Current user
///
/// Profile of the token's subject. A token for a deleted user is a `401`.
#[get("/me")]
pub async fn me(
    pool: web::Data<SqlitePool>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let user = db::users::find_by_id(&pool, user.0)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Could not validate credentials".into()))?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

fn invalid_credentials() -> AppError {
    AppError::BadRequest("Incorrect email or password".into())
}
