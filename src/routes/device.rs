use crate::config::ReportConfig;
use crate::db::SharedDeviceStore;
use crate::error::app_error::AppError;
use crate::models::device::{DeviceReport, DeviceSummary};
use crate::service::certificate::DeviceReportView;
use crate::service::device_report::DeviceReportService;
use rocket::response::content::RawText;
use rocket::serde::json::Json;
use rocket::{State, get};
use rocket_okapi::openapi;

fn device_not_found() -> AppError {
    AppError::NotFound("Device not found".to_string())
}

/// List every device, most recently refurbished first
#[openapi(tag = "Devices")]
#[get("/")]
pub async fn list_devices(store: &State<SharedDeviceStore>) -> Result<Json<Vec<DeviceSummary>>, AppError> {
    let service = DeviceReportService::new(store.inner().as_ref());
    let devices = service.get_all_devices().await.map_err(|e| AppError::ListFailed(Box::new(e)))?;
    Ok(Json(devices))
}

/// Full report record for one device
#[openapi(tag = "Devices")]
#[get("/<id>")]
pub async fn get_device(store: &State<SharedDeviceStore>, id: &str) -> Result<Json<DeviceReport>, AppError> {
    let service = DeviceReportService::new(store.inner().as_ref());
    service.get_device_by_id(id).await?.map(Json).ok_or_else(device_not_found)
}

/// Printable certificate for one device
#[openapi(tag = "Devices")]
#[get("/<id>/certificate")]
pub async fn get_device_certificate(
    store: &State<SharedDeviceStore>,
    report_config: &State<ReportConfig>,
    id: &str,
) -> Result<RawText<String>, AppError> {
    let service = DeviceReportService::new(store.inner().as_ref());
    let report = service.get_device_by_id(id).await?.ok_or_else(device_not_found)?;
    Ok(RawText(DeviceReportView::new(&report, report_config.inner()).render()))
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![list_devices, get_device, get_device_certificate]
}
