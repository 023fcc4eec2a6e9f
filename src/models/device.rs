use chrono::NaiveDate;
use rocket::serde::Serialize;
use schemars::JsonSchema;

/// Core identity of a refurbished unit as stored in `devices`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub category: String,
    pub grade: String,
    pub refurbished_date: NaiveDate,
    pub warranty: Option<String>,
}

/// Free-text hardware description. All fields are optional so a missing
/// `device_specs` row serializes as `{}`.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSpecs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graphics: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wireless: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
}

impl DeviceSpecs {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevicePhoto {
    pub url: String,
    pub display_order: i32,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CpuStress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub throttling: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stability: Option<String>,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stability: Option<String>,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorageStress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_speed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_speed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<String>,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GpuStress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stability: Option<String>,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatteryStress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
}

/// Results of one stress-test run. Every subsection is absent when the device
/// has no `stress_tests` row, which serializes as `{}`.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StressTestResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<CpuStress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<MemoryStress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageStress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpu: Option<GpuStress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery: Option<BatteryStress>,
}

impl StressTestResult {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataWipeRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technician: Option<String>,
}

impl DataWipeRecord {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// The denormalized record served to the report presenter.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceReport {
    pub id: String,
    pub name: String,
    pub category: String,
    pub grade: String,
    /// ISO-8601 date; display formatting happens in the presenter.
    pub refurbished_date: NaiveDate,
    pub warranty: Option<String>,
    /// Photo URLs in display order.
    pub photos: Vec<String>,
    pub specs: DeviceSpecs,
    pub stress_tests: StressTestResult,
    pub data_wipe: DataWipeRecord,
}

/// Listing row. Field names follow the `devices` columns.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct DeviceSummary {
    pub id: String,
    pub name: String,
    pub category: String,
    pub grade: String,
    pub refurbished_date: NaiveDate,
}
