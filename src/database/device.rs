use crate::error::app_error::AppError;
use crate::models::device::{
    BatteryStress, CpuStress, DataWipeRecord, Device, DevicePhoto, DeviceSpecs, DeviceSummary, GpuStress, MemoryStress, StorageStress,
    StressTestResult,
};
use chrono::NaiveDate;
use sqlx::Postgres;
use sqlx::pool::PoolConnection;
use tracing::warn;

/// Source of per-call sessions. Each call to [`DeviceStore::open`] hands out
/// one connection; dropping the returned session releases it.
#[async_trait::async_trait]
pub trait DeviceStore: Send + Sync {
    async fn open(&self) -> Result<Box<dyn DeviceSession>, AppError>;
}

/// Lookups against a single acquired connection. Dependent relations return
/// `None` / empty when the device has no row there.
#[async_trait::async_trait]
pub trait DeviceSession: Send {
    async fn find_device(&mut self, id: &str) -> Result<Option<Device>, AppError>;
    async fn find_specs(&mut self, id: &str) -> Result<Option<DeviceSpecs>, AppError>;
    async fn list_photos(&mut self, id: &str) -> Result<Vec<DevicePhoto>, AppError>;
    async fn find_stress_test(&mut self, id: &str) -> Result<Option<StressTestResult>, AppError>;
    async fn find_data_wipe(&mut self, id: &str) -> Result<Option<DataWipeRecord>, AppError>;
    async fn list_devices(&mut self) -> Result<Vec<DeviceSummary>, AppError>;
}

#[derive(Debug, sqlx::FromRow)]
struct DeviceRow {
    id: String,
    name: String,
    category: String,
    grade: String,
    refurbished_date: NaiveDate,
    warranty: Option<String>,
}

impl From<DeviceRow> for Device {
    fn from(row: DeviceRow) -> Self {
        Device {
            id: row.id,
            name: row.name,
            category: row.category,
            grade: row.grade,
            refurbished_date: row.refurbished_date,
            warranty: row.warranty,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DeviceSummaryRow {
    id: String,
    name: String,
    category: String,
    grade: String,
    refurbished_date: NaiveDate,
}

impl From<DeviceSummaryRow> for DeviceSummary {
    fn from(row: DeviceSummaryRow) -> Self {
        DeviceSummary {
            id: row.id,
            name: row.name,
            category: row.category,
            grade: row.grade,
            refurbished_date: row.refurbished_date,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DeviceSpecsRow {
    processor: Option<String>,
    memory: Option<String>,
    storage: Option<String>,
    display: Option<String>,
    graphics: Option<String>,
    battery: Option<String>,
    ports: Option<String>,
    wireless: Option<String>,
    operating_system: Option<String>,
    weight: Option<String>,
}

impl From<DeviceSpecsRow> for DeviceSpecs {
    fn from(row: DeviceSpecsRow) -> Self {
        DeviceSpecs {
            processor: row.processor,
            memory: row.memory,
            storage: row.storage,
            display: row.display,
            graphics: row.graphics,
            battery: row.battery,
            ports: row.ports,
            wireless: row.wireless,
            operating_system: row.operating_system,
            weight: row.weight,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DevicePhotoRow {
    photo_url: String,
    display_order: i32,
}

impl From<DevicePhotoRow> for DevicePhoto {
    fn from(row: DevicePhotoRow) -> Self {
        DevicePhoto {
            url: row.photo_url,
            display_order: row.display_order,
        }
    }
}

#[derive(Debug, Default, sqlx::FromRow)]
struct StressTestRow {
    cpu_score: Option<i32>,
    cpu_temperature: Option<String>,
    cpu_throttling: Option<String>,
    cpu_stability: Option<String>,
    memory_score: Option<i32>,
    memory_errors: Option<String>,
    memory_stability: Option<String>,
    storage_score: Option<i32>,
    storage_read_speed: Option<String>,
    storage_write_speed: Option<String>,
    storage_health: Option<String>,
    gpu_score: Option<i32>,
    gpu_temperature: Option<String>,
    gpu_stability: Option<String>,
    battery_score: Option<i32>,
    battery_capacity: Option<String>,
    battery_runtime: Option<String>,
}

/// Scores are percentages. Anything outside 0..=100 is dropped rather than
/// passed through to the report.
fn score_from_db(column: &str, value: Option<i32>) -> Option<u8> {
    let value = value?;
    match u8::try_from(value) {
        Ok(score) if score <= 100 => Some(score),
        _ => {
            warn!(column = column, value = value, "discarding out-of-range stress test score");
            None
        }
    }
}

impl From<StressTestRow> for StressTestResult {
    fn from(row: StressTestRow) -> Self {
        StressTestResult {
            cpu: Some(CpuStress {
                score: score_from_db("cpu_score", row.cpu_score),
                temperature: row.cpu_temperature,
                throttling: row.cpu_throttling,
                stability: row.cpu_stability,
            }),
            memory: Some(MemoryStress {
                score: score_from_db("memory_score", row.memory_score),
                errors: row.memory_errors,
                stability: row.memory_stability,
            }),
            storage: Some(StorageStress {
                score: score_from_db("storage_score", row.storage_score),
                read_speed: row.storage_read_speed,
                write_speed: row.storage_write_speed,
                health: row.storage_health,
            }),
            gpu: Some(GpuStress {
                score: score_from_db("gpu_score", row.gpu_score),
                temperature: row.gpu_temperature,
                stability: row.gpu_stability,
            }),
            battery: Some(BatteryStress {
                score: score_from_db("battery_score", row.battery_score),
                capacity: row.battery_capacity,
                runtime: row.battery_runtime,
            }),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DataWipeRow {
    method: Option<String>,
    completion_date: Option<NaiveDate>,
    verification_method: Option<String>,
    certificate: Option<String>,
    technician: Option<String>,
}

impl From<DataWipeRow> for DataWipeRecord {
    fn from(row: DataWipeRow) -> Self {
        DataWipeRecord {
            method: row.method,
            completion_date: row.completion_date,
            verification_method: row.verification_method,
            certificate: row.certificate,
            technician: row.technician,
        }
    }
}

/// A pooled Postgres connection scoped to one aggregation call.
pub struct PgDeviceSession {
    conn: PoolConnection<Postgres>,
}

impl PgDeviceSession {
    pub fn new(conn: PoolConnection<Postgres>) -> Self {
        Self { conn }
    }
}

// Dependent relations may hold several rows per device; only the first one
// the store returns is used (LIMIT 1).
#[async_trait::async_trait]
impl DeviceSession for PgDeviceSession {
    async fn find_device(&mut self, id: &str) -> Result<Option<Device>, AppError> {
        let row = sqlx::query_as::<_, DeviceRow>(
            r#"
            SELECT id, name, category, grade, refurbished_date, warranty
            FROM devices
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await
        .map_err(|e| AppError::fetch_failed("Failed to load device", e))?;

        Ok(row.map(Device::from))
    }

    async fn find_specs(&mut self, id: &str) -> Result<Option<DeviceSpecs>, AppError> {
        let row = sqlx::query_as::<_, DeviceSpecsRow>(
            r#"
            SELECT processor, memory, storage, display, graphics, battery,
                   ports, wireless, operating_system, weight
            FROM device_specs
            WHERE device_id = $1
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await
        .map_err(|e| AppError::fetch_failed("Failed to load device specs", e))?;

        Ok(row.map(DeviceSpecs::from))
    }

    async fn list_photos(&mut self, id: &str) -> Result<Vec<DevicePhoto>, AppError> {
        let rows = sqlx::query_as::<_, DevicePhotoRow>(
            r#"
            SELECT photo_url, display_order
            FROM device_photos
            WHERE device_id = $1
            ORDER BY display_order, id
            "#,
        )
        .bind(id)
        .fetch_all(&mut *self.conn)
        .await
        .map_err(|e| AppError::fetch_failed("Failed to load device photos", e))?;

        Ok(rows.into_iter().map(DevicePhoto::from).collect())
    }

    async fn find_stress_test(&mut self, id: &str) -> Result<Option<StressTestResult>, AppError> {
        let row = sqlx::query_as::<_, StressTestRow>(
            r#"
            SELECT cpu_score, cpu_temperature, cpu_throttling, cpu_stability,
                   memory_score, memory_errors, memory_stability,
                   storage_score, storage_read_speed, storage_write_speed, storage_health,
                   gpu_score, gpu_temperature, gpu_stability,
                   battery_score, battery_capacity, battery_runtime
            FROM stress_tests
            WHERE device_id = $1
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await
        .map_err(|e| AppError::fetch_failed("Failed to load stress test results", e))?;

        Ok(row.map(StressTestResult::from))
    }

    async fn find_data_wipe(&mut self, id: &str) -> Result<Option<DataWipeRecord>, AppError> {
        let row = sqlx::query_as::<_, DataWipeRow>(
            r#"
            SELECT method, completion_date, verification_method, certificate, technician
            FROM data_wipe
            WHERE device_id = $1
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await
        .map_err(|e| AppError::fetch_failed("Failed to load data wipe record", e))?;

        Ok(row.map(DataWipeRecord::from))
    }

    async fn list_devices(&mut self) -> Result<Vec<DeviceSummary>, AppError> {
        let rows = sqlx::query_as::<_, DeviceSummaryRow>(
            r#"
            SELECT id, name, category, grade, refurbished_date
            FROM devices
            ORDER BY refurbished_date DESC
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await
        .map_err(|e| AppError::fetch_failed("Failed to list devices", e))?;

        Ok(rows.into_iter().map(DeviceSummary::from).collect())
    }
}
