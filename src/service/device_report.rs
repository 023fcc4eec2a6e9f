use crate::database::device::DeviceStore;
use crate::error::app_error::AppError;
use crate::models::device::{DataWipeRecord, Device, DevicePhoto, DeviceReport, DeviceSpecs, DeviceSummary, StressTestResult};
use tracing::debug;

/// Aggregates a device and its dependent relations into one report record.
///
/// Every call opens its own session on the store and drops it before
/// returning, whatever the outcome. Nothing is cached between calls.
pub struct DeviceReportService<'a> {
    store: &'a dyn DeviceStore,
}

impl<'a> DeviceReportService<'a> {
    pub fn new(store: &'a dyn DeviceStore) -> Self {
        DeviceReportService { store }
    }

    /// Returns `Ok(None)` when no device has this id. Any store failure
    /// aborts the whole call; partial records are never returned.
    pub async fn get_device_by_id(&self, id: &str) -> Result<Option<DeviceReport>, AppError> {
        let mut session = self.store.open().await?;

        let Some(device) = session.find_device(id).await? else {
            debug!(device_id = %id, "device not found");
            return Ok(None);
        };

        let specs = session.find_specs(id).await?;
        let photos = session.list_photos(id).await?;
        let stress_tests = session.find_stress_test(id).await?;
        let data_wipe = session.find_data_wipe(id).await?;

        debug!(
            device_id = %id,
            has_specs = specs.is_some(),
            photo_count = photos.len(),
            has_stress_tests = stress_tests.is_some(),
            has_data_wipe = data_wipe.is_some(),
            "device report assembled"
        );

        Ok(Some(assemble_report(device, specs, photos, stress_tests, data_wipe)))
    }

    /// Summaries of every device, most recently refurbished first.
    pub async fn get_all_devices(&self) -> Result<Vec<DeviceSummary>, AppError> {
        let mut session = self.store.open().await?;
        let mut devices = session.list_devices().await?;
        devices.sort_by(|a, b| b.refurbished_date.cmp(&a.refurbished_date));
        Ok(devices)
    }
}

fn assemble_report(
    device: Device,
    specs: Option<DeviceSpecs>,
    mut photos: Vec<DevicePhoto>,
    stress_tests: Option<StressTestResult>,
    data_wipe: Option<DataWipeRecord>,
) -> DeviceReport {
    // Stable sort: equal display orders keep the store's insertion order.
    photos.sort_by_key(|photo| photo.display_order);

    DeviceReport {
        id: device.id,
        name: device.name,
        category: device.category,
        grade: device.grade,
        refurbished_date: device.refurbished_date,
        warranty: device.warranty,
        photos: photos.into_iter().map(|photo| photo.url).collect(),
        specs: specs.unwrap_or_default(),
        stress_tests: stress_tests.unwrap_or_default(),
        data_wipe: data_wipe.unwrap_or_default(),
    }
}
