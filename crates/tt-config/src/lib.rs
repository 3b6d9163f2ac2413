mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod server_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DATABASE_FILENAME: &str = "data.db";
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";

const MIN_PORT: u16 = 1024;
const MIN_DATABASE_CONNECTIONS: u32 = 1;
const MAX_DATABASE_CONNECTIONS: u32 = 100;

/// Page size for time entry listings when the request gives none.
pub const DEFAULT_TIME_ENTRIES_LIMIT: i64 = 150;
/// Hard cap on the time entry listing page size.
pub const MAX_TIME_ENTRIES_LIMIT: i64 = 500;
