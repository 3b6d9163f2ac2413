pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod state;

#[cfg(test)]
mod tests;

pub use api::{
    actor::{Actor, resolve_actor},
    error::ApiError,
    error::Result as ApiResult,
    extractors::current_user::CurrentUser,
    time_entries::{
        aggregate::aggregate_time_entries,
        aggregate_response::AggregateResponse,
        aggregate_time_entries_query::AggregateTimeEntriesQuery,
        create_time_entry_request::CreateTimeEntryRequest,
        list_time_entries_query::ListTimeEntriesQuery,
        scope::{parse_uuid_list, parse_uuid_param, resolve_member_scope},
        time_entries::{
            create_time_entry, delete_time_entry, list_time_entries, update_time_entry,
        },
        time_entry_dto::TimeEntryDto,
        time_entry_list_response::TimeEntryListResponse,
        time_entry_response::TimeEntryResponse,
        update_multiple::update_multiple_time_entries,
        update_multiple_request::UpdateMultipleRequest,
        update_multiple_response::UpdateMultipleResponse,
        update_time_entry_request::UpdateTimeEntryRequest,
    },
};

pub use crate::routes::build_router;
pub use crate::state::AppState;

use std::error::Error;

use log::{error, info};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = tt_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = tt_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        // Ensure log directory exists
        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting tt-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Initialize database pool
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(database_path)
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
                .busy_timeout(std::time::Duration::from_secs(5)),
        )
        .await?;

    info!("Database connection established");

    // Run migrations
    info!("Running database migrations...");
    sqlx::migrate!("../crates/tt-db/migrations")
        .run(&pool)
        .await?;
    info!("Migrations complete");

    // Build router
    let app = build_router(AppState { pool });

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Start server with graceful shutdown
    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Graceful shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        Err(e) => error!("Failed to listen for SIGINT: {}", e),
    }
}
