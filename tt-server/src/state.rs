use sqlx::SqlitePool;

/// Shared application state handed to every handler via axum's `State`.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}
