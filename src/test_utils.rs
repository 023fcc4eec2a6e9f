use crate::database::device::{DeviceSession, DeviceStore};
use crate::error::app_error::AppError;
use crate::models::device::{
    BatteryStress, CpuStress, DataWipeRecord, Device, DevicePhoto, DeviceSpecs, DeviceSummary, GpuStress, MemoryStress, StorageStress,
    StressTestResult,
};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Which store interaction a [`MockDeviceStore`] should fail on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Connect,
    Device,
    Specs,
    Photos,
    StressTest,
    DataWipe,
    List,
}

pub struct DeviceFixture {
    pub device: Device,
    pub specs: DeviceSpecs,
    pub photos: Vec<DevicePhoto>,
    pub stress_tests: StressTestResult,
    pub data_wipe: DataWipeRecord,
}

#[derive(Default, Clone)]
struct MockData {
    devices: HashMap<String, Device>,
    specs: HashMap<String, DeviceSpecs>,
    photos: HashMap<String, Vec<DevicePhoto>>,
    stress_tests: HashMap<String, StressTestResult>,
    data_wipes: HashMap<String, DataWipeRecord>,
    summaries: Vec<DeviceSummary>,
}

/// In-memory store that counts how many sessions were opened and dropped.
#[derive(Default)]
pub struct MockDeviceStore {
    data: MockData,
    fail_on: Option<Lookup>,
    opened: Arc<AtomicUsize>,
    released: Arc<AtomicUsize>,
}

impl MockDeviceStore {
    pub fn with_device(mut self, device: Device) -> Self {
        self.data.summaries.push(DeviceSummary {
            id: device.id.clone(),
            name: device.name.clone(),
            category: device.category.clone(),
            grade: device.grade.clone(),
            refurbished_date: device.refurbished_date,
        });
        self.data.devices.insert(device.id.clone(), device);
        self
    }

    pub fn with_full_device(mut self, fixture: DeviceFixture) -> Self {
        let id = fixture.device.id.clone();
        self.data.specs.insert(id.clone(), fixture.specs);
        self.data.photos.insert(id.clone(), fixture.photos);
        self.data.stress_tests.insert(id.clone(), fixture.stress_tests);
        self.data.data_wipes.insert(id, fixture.data_wipe);
        self.with_device(fixture.device)
    }

    pub fn with_photos(mut self, id: &str, photos: Vec<DevicePhoto>) -> Self {
        self.data.photos.insert(id.to_string(), photos);
        self
    }

    pub fn with_summaries(mut self, summaries: Vec<DeviceSummary>) -> Self {
        self.data.summaries.extend(summaries);
        self
    }

    pub fn failing_on(mut self, lookup: Lookup) -> Self {
        self.fail_on = Some(lookup);
        self
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl DeviceStore for MockDeviceStore {
    async fn open(&self) -> Result<Box<dyn DeviceSession>, AppError> {
        if self.fail_on == Some(Lookup::Connect) {
            return Err(AppError::fetch_failed("Failed to connect to database", sqlx::Error::PoolTimedOut));
        }

        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockSession {
            data: self.data.clone(),
            fail_on: self.fail_on,
            released: Arc::clone(&self.released),
        }))
    }
}

struct MockSession {
    data: MockData,
    fail_on: Option<Lookup>,
    released: Arc<AtomicUsize>,
}

impl MockSession {
    fn check(&self, lookup: Lookup) -> Result<(), AppError> {
        if self.fail_on == Some(lookup) {
            let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset by peer");
            return Err(AppError::fetch_failed(format!("{lookup:?} lookup failed"), sqlx::Error::Io(io)));
        }
        Ok(())
    }
}

impl Drop for MockSession {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl DeviceSession for MockSession {
    async fn find_device(&mut self, id: &str) -> Result<Option<Device>, AppError> {
        self.check(Lookup::Device)?;
        Ok(self.data.devices.get(id).cloned())
    }

    async fn find_specs(&mut self, id: &str) -> Result<Option<DeviceSpecs>, AppError> {
        self.check(Lookup::Specs)?;
        Ok(self.data.specs.get(id).cloned())
    }

    async fn list_photos(&mut self, id: &str) -> Result<Vec<DevicePhoto>, AppError> {
        self.check(Lookup::Photos)?;
        Ok(self.data.photos.get(id).cloned().unwrap_or_default())
    }

    async fn find_stress_test(&mut self, id: &str) -> Result<Option<StressTestResult>, AppError> {
        self.check(Lookup::StressTest)?;
        Ok(self.data.stress_tests.get(id).cloned())
    }

    async fn find_data_wipe(&mut self, id: &str) -> Result<Option<DataWipeRecord>, AppError> {
        self.check(Lookup::DataWipe)?;
        Ok(self.data.data_wipes.get(id).cloned())
    }

    async fn list_devices(&mut self) -> Result<Vec<DeviceSummary>, AppError> {
        self.check(Lookup::List)?;
        Ok(self.data.summaries.clone())
    }
}

pub fn bare_device(id: &str) -> Device {
    Device {
        id: id.to_string(),
        name: "Lenovo ThinkPad T14".to_string(),
        category: "Laptop".to_string(),
        grade: "B".to_string(),
        refurbished_date: NaiveDate::from_ymd_opt(2023, 2, 10).unwrap(),
        warranty: None,
    }
}

pub fn photo(url: &str, display_order: i32) -> DevicePhoto {
    DevicePhoto {
        url: url.to_string(),
        display_order,
    }
}

pub fn summary(id: &str, refurbished_date: NaiveDate) -> DeviceSummary {
    DeviceSummary {
        id: id.to_string(),
        name: format!("Device {id}"),
        category: "Laptop".to_string(),
        grade: "A".to_string(),
        refurbished_date,
    }
}

pub fn sample_device() -> DeviceFixture {
    DeviceFixture {
        device: Device {
            id: "RF-2023-05421".to_string(),
            name: "Dell XPS 15 9500".to_string(),
            category: "Laptop".to_string(),
            grade: "A".to_string(),
            refurbished_date: NaiveDate::from_ymd_opt(2023, 5, 15).unwrap(),
            warranty: Some("12 months limited warranty".to_string()),
        },
        specs: DeviceSpecs {
            processor: Some("Intel Core i7-10750H (6 cores, 2.6 GHz)".to_string()),
            memory: Some("16GB DDR4 2933MHz".to_string()),
            storage: Some("512GB NVMe SSD".to_string()),
            display: Some("15.6\" FHD+ (1920x1200)".to_string()),
            graphics: Some("NVIDIA GeForce GTX 1650 Ti 4GB".to_string()),
            battery: Some("86Wh, 6-cell".to_string()),
            ports: Some("2x Thunderbolt 3, 1x USB-C 3.2, SD card reader".to_string()),
            wireless: Some("Wi-Fi 6, Bluetooth 5.1".to_string()),
            operating_system: Some("Windows 11 Pro".to_string()),
            weight: Some("1.83 kg".to_string()),
        },
        photos: vec![
            photo("https://cdn.example.com/rf-2023-05421/back.jpg", 2),
            photo("https://cdn.example.com/rf-2023-05421/front.jpg", 0),
            photo("https://cdn.example.com/rf-2023-05421/keyboard.jpg", 1),
        ],
        stress_tests: StressTestResult {
            cpu: Some(CpuStress {
                score: Some(95),
                temperature: Some("Max 78°C under load".to_string()),
                throttling: Some("None detected".to_string()),
                stability: Some("Stable for 2 hours".to_string()),
            }),
            memory: Some(MemoryStress {
                score: Some(98),
                errors: Some("0 errors detected".to_string()),
                stability: Some("Passed 4 MemTest86 passes".to_string()),
            }),
            storage: Some(StorageStress {
                score: Some(92),
                read_speed: Some("3,100 MB/s".to_string()),
                write_speed: Some("2,800 MB/s".to_string()),
                health: Some("98% remaining life".to_string()),
            }),
            gpu: Some(GpuStress {
                score: Some(90),
                temperature: Some("Max 72°C under load".to_string()),
                stability: Some("No artifacts detected".to_string()),
            }),
            battery: Some(BatteryStress {
                score: Some(87),
                capacity: Some("89% of design capacity".to_string()),
                runtime: Some("7h 45m (web browsing)".to_string()),
            }),
        },
        data_wipe: DataWipeRecord {
            method: Some("NIST 800-88 Purge".to_string()),
            completion_date: NaiveDate::from_ymd_opt(2023, 5, 14),
            verification_method: Some("Full disk read verification".to_string()),
            certificate: Some("DW-2023-05421-NIST".to_string()),
            technician: Some("Carlos Mendes".to_string()),
        },
    }
}
