pub mod certificate;
pub mod device_report;
