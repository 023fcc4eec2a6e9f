use crate::Config;
use crate::config::ReportConfig;
use crate::database::device::DeviceStore;
use crate::database::postgres_repository::PostgresRepository;
use crate::db::init_pool;
use crate::error::app_error::AppError;
use crate::service::certificate::DeviceReportView;
use crate::service::device_report::DeviceReportService;

/// Connects with `config.database`, renders the certificate for `device_id`
/// and closes the pool. `Ok(None)` means the device does not exist.
pub async fn print_certificate(config: &Config, device_id: &str) -> Result<Option<String>, AppError> {
    let pool = init_pool(&config.database)
        .await
        .map_err(|err| AppError::fetch_failed("Failed to initialize database pool", err))?;

    let repo = PostgresRepository { pool: pool.clone() };
    let result = render_certificate(&repo, &config.report, device_id).await;

    pool.close().await;
    result
}

pub async fn render_certificate(store: &dyn DeviceStore, report_config: &ReportConfig, device_id: &str) -> Result<Option<String>, AppError> {
    let service = DeviceReportService::new(store);
    let report = service.get_device_by_id(device_id).await?;
    Ok(report.map(|report| DeviceReportView::new(&report, report_config).render()))
}
