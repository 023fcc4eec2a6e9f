use crate::config::DatabaseConfig;
use crate::database::device::DeviceStore;
use crate::database::postgres_repository::PostgresRepository;
use rocket::fairing::AdHoc;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::sync::Arc;
use std::time::Duration;

/// Store handle managed by rocket and handed to the report routes.
pub type SharedDeviceStore = Arc<dyn DeviceStore>;

pub fn connect_options(db_config: &DatabaseConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&db_config.host)
        .port(db_config.port)
        .username(&db_config.user)
        .password(&db_config.password)
        .database(&db_config.database)
}

pub async fn init_pool(db_config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(db_config.max_connections)
        .min_connections(db_config.min_connections)
        .acquire_timeout(Duration::from_secs(db_config.acquire_timeout))
        .idle_timeout(Duration::from_secs(30))
        .max_lifetime(Duration::from_secs(1800))
        .connect_with(connect_options(db_config))
        .await
}

pub fn stage_db(db_config: DatabaseConfig) -> AdHoc {
    AdHoc::try_on_ignite("Postgres (sqlx)", |rocket| async move {
        match init_pool(&db_config).await {
            Ok(pool) => {
                tracing::info!(
                    host = %db_config.host,
                    database = %db_config.database,
                    "Database pool initialized successfully"
                );
                let store: SharedDeviceStore = Arc::new(PostgresRepository { pool });
                Ok(rocket.manage(store))
            }
            Err(e) => {
                tracing::error!("Failed to initialize database pool: {}", e);
                Err(rocket)
            }
        }
    })
}
