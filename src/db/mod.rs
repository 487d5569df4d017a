use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;

/// Pool bounds for a database URL. An in-memory SQLite database only exists
/// inside a single connection.
fn pool_bounds(database_url: &str) -> (u32, u32) {
    if database_url.starts_with("sqlite:") && database_url.contains(":memory:") {
        (1, 1)
    } else {
        (2, 20)
    }
}

/// Open the storefront database with connection pooling.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> anyhow::Result<DatabaseConnection> {
    let (min, max) = pool_bounds(database_url);

    let mut opts = ConnectOptions::new(database_url);
    opts.max_connections(max)
        .min_connections(min)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let db = Database::connect(opts).await?;
    tracing::debug!(max_connections = max, "Database pool ready");
    Ok(db)
}
