use crate::database::device::{DeviceSession, DeviceStore, PgDeviceSession};
use crate::error::app_error::AppError;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PostgresRepository {
    pub pool: PgPool,
}

#[async_trait::async_trait]
impl DeviceStore for PostgresRepository {
    async fn open(&self) -> Result<Box<dyn DeviceSession>, AppError> {
        let conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::fetch_failed("Failed to connect to database", e))?;

        Ok(Box::new(PgDeviceSession::new(conn)))
    }
}
