#![doc = "The `taskdesk` library crate."]
#![doc = ""]
#![doc = "Domain models, persistence, authentication, routing and error handling for the"]
#![doc = "task manager service. The binary (`main.rs`) wires these into an actix-web server."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod voice;

pub use config::Config;
pub use error::AppError;
