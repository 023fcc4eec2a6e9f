use revy_report::{AppError, Config, build_rocket};

#[rocket::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", AppError::from(err));
            std::process::exit(1);
        }
    };

    let rocket = match build_rocket(config) {
        Ok(rocket) => rocket,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = rocket.launch().await {
        tracing::error!(error = %err, "server terminated");
        std::process::exit(1);
    }
}
