pub mod health;
pub mod roles;
pub mod tasks;
pub mod users;
pub mod voice;

use actix_web::web;

use crate::error::AppError;

/// Registers every route plus the extractor configs that turn malformed JSON
/// bodies, query strings and path segments into `AppError::BadRequest`.
///
/// Expects `web::Data<SqlitePool>` and `web::Data<Config>` to be registered on
/// the `App`, and `AuthMiddleware` to wrap it.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(health::root)
    .service(health::health)
    .service(
        web::scope("/users")
            .service(users::register)
            .service(users::login)
            .service(users::me),
    )
    .service(
        web::scope("/tasks")
            .service(
                web::resource(vec!["", "/"])
                    .route(web::get().to(tasks::list_tasks))
                    .route(web::post().to(tasks::create_task)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(tasks::get_task))
                    .route(web::put().to(tasks::update_task))
                    .route(web::delete().to(tasks::delete_task)),
            ),
    )
    .service(
        web::scope("/roles")
            .service(roles::assign_role)
            .service(roles::get_user_roles),
    )
    .service(web::scope("/voice").service(voice::create_task_from_voice));
}
