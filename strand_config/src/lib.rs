mod schema;

pub use schema::{Config, DatabaseConfig, LoggingConfig};
