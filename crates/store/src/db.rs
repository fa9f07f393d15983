use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use tasteboard_core::config::PostgresConfig;

/// Create the PostgreSQL connection pool and apply migrations.
pub async fn connect(config: &PostgresConfig) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.connection_string())
        .await?;
    info!("PostgreSQL connected: {}", config.host);

    sqlx::migrate!("../../migrations").run(&pool).await?;
    info!("Database migrations applied");

    Ok(pool)
}
