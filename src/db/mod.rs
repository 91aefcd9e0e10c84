use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Process-wide PostgreSQL handle, created once in `main` and passed down.
#[derive(Clone)]
pub struct Database {
    pub pg: PgPool,
}

impl Database {
    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let pg = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(config.connect_options())
            .await?;

        tracing::info!(
            host = %config.host,
            database = %config.name,
            max_connections = config.max_connections,
            "PostgreSQL connection established"
        );

        Ok(Self { pg })
    }

    pub async fn run_migrations(&self) -> anyhow::Result<()> {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&self.pg).await?;
        tracing::info!("Database migrations completed");
        Ok(())
    }

    pub async fn close(&self) {
        self.pg.close().await;
        tracing::info!("PostgreSQL connection closed");
    }
}
