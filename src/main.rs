use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::io;

use taskdesk::{auth::AuthMiddleware, db, routes, Config};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        log::error!("invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    let pool = db::connect(&config.database_url).await.map_err(|e| {
        log::error!("failed to open database {}: {}", config.database_url, e);
        io::Error::new(io::ErrorKind::Other, e)
    })?;
    db::migrate(&pool).await.map_err(|e| {
        log::error!("failed to apply migrations: {}", e);
        io::Error::new(io::ErrorKind::Other, e)
    })?;

    let bind_addr = (config.server_host.clone(), config.server_port);
    log::info!("starting task manager at {}", config.server_url());

    let pool = web::Data::new(pool);
    let config = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(pool.clone())
            .app_data(config.clone())
            .wrap(AuthMiddleware)
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .configure(routes::config)
    })
    .bind(bind_addr)?
    .run()
    .await
}
