pub mod admin;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod services;
pub mod utils;

pub use config::{ApiConfig, DbConfig};
pub use errors::AppError;
