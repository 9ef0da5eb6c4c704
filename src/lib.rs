//! Pokemon review API: REST CRUD over categories, countries, owners, pokemon,
//! reviews and reviewers, backed by PostgreSQL.

pub mod config;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod mapping;
pub mod model;
pub mod repository;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use routes::{app, common_routes, common_routes_with_ready, entity_routes};
pub use state::AppState;
pub use store::{connect, ensure_database_exists, ensure_tables};
pub use validation::ValidationState;
