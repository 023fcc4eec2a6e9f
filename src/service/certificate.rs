use crate::config::ReportConfig;
use crate::models::device::DeviceReport;
use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use std::fmt::Display;

const FALLBACK_DATE_FORMAT: &str = "%d/%m/%Y";
const NOT_AVAILABLE: &str = "Not available";

/// Formats a stored date for display. A pattern chrono cannot parse falls
/// back to day/month/year instead of failing the render.
pub fn format_display_date(date: NaiveDate, pattern: &str) -> String {
    let valid = !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error));
    let pattern = if valid { pattern } else { FALLBACK_DATE_FORMAT };
    date.format(pattern).to_string()
}

/// Printable plain-text rendering of a device report.
pub struct DeviceReportView<'a> {
    report: &'a DeviceReport,
    config: &'a ReportConfig,
}

impl<'a> DeviceReportView<'a> {
    pub fn new(report: &'a DeviceReport, config: &'a ReportConfig) -> Self {
        Self { report, config }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_header(&mut out);
        self.write_specs(&mut out);
        self.write_photos(&mut out);
        self.write_stress_tests(&mut out);
        self.write_data_wipe(&mut out);
        out
    }

    fn date(&self, date: NaiveDate) -> String {
        format_display_date(date, &self.config.date_format)
    }

    fn write_header(&self, out: &mut String) {
        let report = self.report;
        line(out, "REFURBISHED DEVICE REPORT");
        line(out, "=".repeat(60));
        line(out, format_args!("{}  [Grade {}]", report.name, report.grade));
        line(out, format_args!("ID: {}", report.id));
        field(out, "Category", Some(&report.category));
        field(out, "Refurbished", Some(&self.date(report.refurbished_date)));
        field(out, "Warranty", report.warranty.as_ref());
    }

    fn write_specs(&self, out: &mut String) {
        let specs = &self.report.specs;
        section(out, "Hardware Specifications");
        if specs.is_empty() {
            line(out, NOT_AVAILABLE);
            return;
        }
        field(out, "Processor", specs.processor.as_ref());
        field(out, "Memory", specs.memory.as_ref());
        field(out, "Storage", specs.storage.as_ref());
        field(out, "Display", specs.display.as_ref());
        field(out, "Graphics", specs.graphics.as_ref());
        field(out, "Operating System", specs.operating_system.as_ref());
        field(out, "Battery", specs.battery.as_ref());
        field(out, "Ports", specs.ports.as_ref());
        field(out, "Wireless", specs.wireless.as_ref());
        field(out, "Weight", specs.weight.as_ref());
    }

    fn write_photos(&self, out: &mut String) {
        section(out, "Photos");
        // Fixed slot count; photos beyond it are left off the printout.
        for index in 0..self.config.photo_slots {
            let entry = self.report.photos.get(index).map(String::as_str).unwrap_or("No photo");
            line(out, format_args!("{:>2}. {}", index + 1, entry));
        }
    }

    fn write_stress_tests(&self, out: &mut String) {
        let tests = &self.report.stress_tests;
        section(out, "Stress Tests");
        if tests.is_empty() {
            line(out, NOT_AVAILABLE);
            return;
        }

        if let Some(cpu) = &tests.cpu {
            score_line(out, "CPU", cpu.score);
            field(out, "  Temperature", cpu.temperature.as_ref());
            field(out, "  Throttling", cpu.throttling.as_ref());
            field(out, "  Stability", cpu.stability.as_ref());
        }
        if let Some(memory) = &tests.memory {
            score_line(out, "Memory", memory.score);
            field(out, "  Errors", memory.errors.as_ref());
            field(out, "  Stability", memory.stability.as_ref());
        }
        if let Some(storage) = &tests.storage {
            score_line(out, "Storage", storage.score);
            field(out, "  Read", storage.read_speed.as_ref());
            field(out, "  Write", storage.write_speed.as_ref());
            field(out, "  Health", storage.health.as_ref());
        }
        if let Some(gpu) = &tests.gpu {
            score_line(out, "GPU", gpu.score);
            field(out, "  Temperature", gpu.temperature.as_ref());
            field(out, "  Stability", gpu.stability.as_ref());
        }
        if let Some(battery) = &tests.battery {
            score_line(out, "Battery", battery.score);
            field(out, "  Capacity", battery.capacity.as_ref());
            field(out, "  Runtime", battery.runtime.as_ref());
        }
    }

    fn write_data_wipe(&self, out: &mut String) {
        let wipe = &self.report.data_wipe;
        section(out, "Data Wipe Certificate");
        if wipe.is_empty() {
            line(out, NOT_AVAILABLE);
            return;
        }
        field(out, "Method", wipe.method.as_ref());
        field(out, "Completed", wipe.completion_date.map(|d| self.date(d)).as_ref());
        field(out, "Verification", wipe.verification_method.as_ref());
        field(out, "Certificate", wipe.certificate.as_ref());
        field(out, "Technician", wipe.technician.as_ref());
    }
}

fn line(out: &mut String, text: impl Display) {
    out.push_str(&text.to_string());
    out.push('\n');
}

fn section(out: &mut String, title: &str) {
    out.push('\n');
    line(out, title);
    line(out, "-".repeat(title.len()));
}

fn field(out: &mut String, label: &str, value: Option<&String>) {
    line(out, format_args!("{:<18} {}", format!("{label}:"), value.map(String::as_str).unwrap_or("-")));
}

fn score_line(out: &mut String, label: &str, score: Option<u8>) {
    match score {
        Some(score) => line(out, format_args!("{label}: {score}/100")),
        None => line(out, format_args!("{label}: -/100")),
    }
}
