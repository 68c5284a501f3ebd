use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::presentation::config::DatabaseSettings;

/// Lazy pool: the service starts without a reachable database and the store
/// endpoints report failures per request instead.
pub async fn create_pg_pool(settings: &DatabaseSettings) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_lazy(&settings.url)?;

    if settings.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!().run(&pool).await?;
        tracing::info!("Migrations complete");
    }

    Ok(pool)
}
