#![allow(dead_code)]

use actix_http::Request;
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::{header, StatusCode},
    middleware::Logger,
    test, web, App, Error,
};
use serde_json::json;
use sqlx::SqlitePool;
use taskdesk::{
    auth::{AuthMiddleware, TokenResponse},
    config::{Config, JwtSettings},
    db, routes,
};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const JWT_SECRET: &str = "integration-test-secret";

pub struct TestUser {
    pub id: i64,
    pub token: String,
}

impl TestUser {
    pub fn auth_header(&self) -> (header::HeaderName, String) {
        (header::AUTHORIZATION, format!("Bearer {}", self.token))
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_port: 0,
        server_host: "127.0.0.1".to_string(),
        jwt: JwtSettings {
            secret: JWT_SECRET.to_string(),
            expiration_hours: 1,
        },
        bcrypt_cost: 4,
        admin_email: Some(ADMIN_EMAIL.to_string()),
    }
}

/// A fresh, migrated in-memory database.
pub async fn test_pool() -> SqlitePool {
    let pool = db::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    db::migrate(&pool).await.expect("Failed to run migrations");
    pool
}

pub async fn init_app(
    pool: SqlitePool,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(pool))
            .app_data(web::Data::new(test_config()))
            .wrap(AuthMiddleware)
            .wrap(Logger::default())
            .configure(routes::config),
    )
    .await
}

pub async fn register(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error>,
    name: &str,
    email: &str,
    password: &str,
) -> (StatusCode, serde_json::Value) {
    let req = test::TestRequest::post()
        .uri("/users/register")
        .set_json(json!({ "name": name, "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

pub async fn login(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error>,
    email: &str,
    password: &str,
) -> (StatusCode, serde_json::Value) {
    let req = test::TestRequest::post()
        .uri("/users/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

pub async fn register_and_login(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error>,
    name: &str,
    email: &str,
    password: &str,
) -> TestUser {
    let (status, body) = register(app, name, email, password).await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {}", body);

    let (status, body) = login(app, email, password).await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);

    let token: TokenResponse =
        serde_json::from_value(body).expect("Failed to parse login response");
    TestUser {
        id: token.user_id,
        token: token.access_token,
    }
}
