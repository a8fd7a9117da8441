//! Hero powers: REST backend for heroes, powers and their strength-rated associations.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod routes;
pub mod seed;
pub mod service;
pub mod state;
pub mod store;
pub mod view;

pub use config::{Settings, StoreBackend};
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use routes::{api_routes, app, common_routes};
pub use seed::seed_if_empty;
pub use service::{HeroPowerService, HeroService, PowerService};
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryStore, PgStore, Store};
