use revy_report::{AppError, Config, init_tracing, print_certificate};

fn print_usage(bin_name: &str) {
    eprintln!("Usage: {bin_name} <device-id>");
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let mut args = std::env::args();
    let bin_name = args.next().unwrap_or_else(|| "revy-report-print".to_string());
    let device_id = args.next();

    let Some(device_id) = device_id.filter(|_| args.next().is_none()) else {
        print_usage(&bin_name);
        std::process::exit(2);
    };

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", AppError::from(err));
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level, config.logging.json_format);

    match print_certificate(&config, &device_id).await {
        Ok(Some(certificate)) => print!("{certificate}"),
        Ok(None) => {
            eprintln!("Device not found: {device_id}");
            std::process::exit(3);
        }
        Err(err) => {
            tracing::error!(error = ?err, device_id = %device_id, "certificate generation failed");
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
