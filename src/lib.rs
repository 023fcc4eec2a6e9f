mod config;
mod database;
mod db;
mod error;
mod middleware;
mod models;
mod print_task;
mod routes;
mod service;

#[cfg(test)]
pub mod test_utils;

pub use config::Config;
pub use error::app_error::AppError;
pub use print_task::print_certificate;

use crate::db::stage_db;
use crate::middleware::RequestLogger;
use crate::routes as app_routes;
use rocket::figment::providers::Serialized;
use rocket::{Build, Rocket, catchers, http::Method};
use rocket_cors::{AllowedOrigins, CorsOptions};
use rocket_okapi::swagger_ui::{SwaggerUIConfig, make_swagger_ui};
use rocket_okapi::{get_openapi_route, okapi::merge::marge_spec_list};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// configured level, e.g. `RUST_LOG=info,revy_report::service=debug`.
pub fn init_tracing(log_level: &str, json_format: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).with_line_number(true);

    // A subscriber may already be installed (tests, embedding binaries).
    let _ = if json_format {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };
}

fn build_cors(cors_config: &config::CorsConfig) -> Result<CorsOptions, String> {
    let is_wildcard = cors_config.allowed_origins.len() == 1 && cors_config.allowed_origins[0] == "*";

    if is_wildcard && cors_config.allow_credentials {
        return Err("Invalid CORS configuration: wildcard origins (*) cannot be combined with credentials".to_string());
    }

    let allowed_origins = if cors_config.allowed_origins.is_empty() {
        AllowedOrigins::some_exact::<&str>(&[])
    } else if is_wildcard {
        AllowedOrigins::all()
    } else {
        AllowedOrigins::some_exact(&cors_config.allowed_origins.iter().map(String::as_str).collect::<Vec<_>>())
    };

    Ok(CorsOptions {
        allowed_origins,
        allowed_methods: vec![Method::Get, Method::Head, Method::Options].into_iter().map(From::from).collect(),
        allowed_headers: rocket_cors::AllowedHeaders::some(&["Accept", "Content-Type", middleware::REQUEST_ID_HEADER]),
        allow_credentials: cors_config.allow_credentials,
        ..Default::default()
    })
}

fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return config::DEFAULT_API_BASE_PATH.to_string();
    }

    let mut normalized = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    };

    while normalized.ends_with('/') && normalized.len() > 1 {
        normalized.pop();
    }

    normalized
}

fn join_base_path(base_path: &str, path: &str) -> String {
    let base = base_path.trim_end_matches('/');
    let suffix = path.trim_start_matches('/');

    if base.is_empty() {
        format!("/{}", suffix)
    } else {
        format!("{}/{}", base, suffix)
    }
}

fn collect_base_paths(api_config: &config::ApiConfig) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::new();
    let mut push_unique = |path: String| {
        if !normalized.contains(&path) {
            normalized.push(path);
        }
    };

    push_unique(normalize_base_path(&api_config.base_path));
    for extra in &api_config.additional_base_paths {
        push_unique(normalize_base_path(extra));
    }

    normalized
}

struct RouteSpec {
    path: &'static str,
    routes: Vec<rocket::Route>,
    openapi: rocket_okapi::okapi::openapi3::OpenApi,
}

fn collect_route_specs() -> Vec<RouteSpec> {
    let (device_routes, device_openapi) = app_routes::device::routes();
    let (health_routes, health_openapi) = app_routes::health::routes();

    vec![
        RouteSpec {
            path: "/devices",
            routes: device_routes,
            openapi: device_openapi,
        },
        RouteSpec {
            path: "/health",
            routes: health_routes,
            openapi: health_openapi,
        },
    ]
}

fn mount_api_routes(mut rocket: Rocket<Build>, base_path: &str, enable_swagger: bool) -> Result<Rocket<Build>, String> {
    let route_specs = collect_route_specs();

    if !enable_swagger {
        for spec in route_specs {
            rocket = rocket.mount(join_base_path(base_path, spec.path), spec.routes);
        }
        return Ok(rocket);
    }

    let mut openapi_list = Vec::new();
    for spec in route_specs {
        rocket = rocket.mount(join_base_path(base_path, spec.path), spec.routes);
        openapi_list.push((spec.path, spec.openapi));
    }

    let openapi_docs = marge_spec_list(&openapi_list).map_err(|err| format!("Could not merge OpenAPI spec: {}", err))?;

    let settings = rocket_okapi::settings::OpenApiSettings::default();
    rocket = rocket.mount(base_path, vec![get_openapi_route(openapi_docs, &settings)]);

    let docs_path = join_base_path(base_path, "docs");
    let openapi_url = join_base_path(base_path, "openapi.json");
    rocket = rocket.mount(
        docs_path,
        make_swagger_ui(&SwaggerUIConfig {
            url: openapi_url,
            ..Default::default()
        }),
    );

    Ok(rocket)
}

/// Assemble the rocket instance without the database fairing. The caller
/// must manage a [`db::SharedDeviceStore`].
fn build_base_rocket(config: &Config) -> Result<Rocket<Build>, String> {
    let cors = build_cors(&config.cors)?
        .to_cors()
        .map_err(|err| format!("Failed to create CORS fairing: {}", err))?;

    let figment = rocket::Config::figment()
        .merge(Serialized::default("address", &config.server.address))
        .merge(Serialized::default("port", config.server.port));

    let mut rocket = rocket::custom(figment)
        .attach(cors)
        .attach(RequestLogger)
        .manage(config.report.clone());

    for base_path in collect_base_paths(&config.api) {
        rocket = mount_api_routes(rocket, &base_path, config.api.enable_swagger)?;
        rocket = rocket.register(base_path.as_str(), catchers![app_routes::error::not_found, app_routes::error::internal_error]);
    }

    Ok(rocket)
}

pub fn build_rocket(config: Config) -> Result<Rocket<Build>, String> {
    init_tracing(&config.logging.level, config.logging.json_format);

    let rocket = build_base_rocket(&config)?;
    Ok(rocket.attach(stage_db(config.database)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SharedDeviceStore;
    use crate::test_utils::{MockDeviceStore, sample_device};
    use rocket::http::Status;
    use rocket::local::asynchronous::Client;
    use std::sync::Arc;

    async fn client_for(config: Config) -> Client {
        let store: SharedDeviceStore = Arc::new(MockDeviceStore::default().with_full_device(sample_device()));
        let rocket = build_base_rocket(&config).expect("valid config").manage(store);
        Client::tracked(rocket).await.expect("valid rocket instance")
    }

    #[test]
    fn base_paths_are_normalized() {
        assert_eq!(normalize_base_path(""), "/api");
        assert_eq!(normalize_base_path("v1/"), "/v1");
        assert_eq!(normalize_base_path("/reports//"), "/reports");
        assert_eq!(normalize_base_path("/"), "/");
    }

    #[test]
    fn base_paths_are_deduplicated() {
        let api = config::ApiConfig {
            base_path: "/api".to_string(),
            additional_base_paths: vec!["api/".to_string(), "/v1".to_string()],
            enable_swagger: false,
        };
        assert_eq!(collect_base_paths(&api), vec!["/api", "/v1"]);
    }

    #[test]
    fn join_handles_root_base() {
        assert_eq!(join_base_path("/", "devices"), "/devices");
        assert_eq!(join_base_path("/api", "/devices"), "/api/devices");
    }

    #[test]
    fn wildcard_cors_with_credentials_is_rejected() {
        let cors = config::CorsConfig {
            allowed_origins: vec!["*".to_string()],
            allow_credentials: true,
        };
        assert!(build_cors(&cors).is_err());
    }

    #[rocket::async_test]
    async fn device_routes_are_mounted_under_every_base_path() {
        let mut config = Config::default();
        config.api.additional_base_paths = vec!["/v1".to_string()];
        let client = client_for(config).await;

        for uri in ["/api/devices/RF-2023-05421", "/v1/devices/RF-2023-05421", "/api/health"] {
            let response = client.get(uri).dispatch().await;
            assert_eq!(response.status(), Status::Ok, "{uri}");
        }
    }

    #[rocket::async_test]
    async fn openapi_document_lists_device_routes() {
        let client = client_for(Config::default()).await;

        let response = client.get("/api/openapi.json").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let body = response.into_string().await.expect("body");
        assert!(body.contains("/devices/{id}"));
        assert!(body.contains("/devices/{id}/certificate"));
    }

    #[rocket::async_test]
    async fn unknown_route_uses_json_catcher() {
        let client = client_for(Config::default()).await;

        let response = client.get("/api/nothing-here").dispatch().await;
        assert_eq!(response.status(), Status::NotFound);
        assert_eq!(response.into_string().await.as_deref(), Some(r#"{"error":"Not found"}"#));
    }

    #[rocket::async_test]
    #[ignore = "requires database"]
    async fn full_rocket_ignites_against_database() {
        let client = Client::tracked(build_rocket(Config::default()).expect("valid config"))
            .await
            .expect("valid rocket instance");
        let response = client.get("/api/health").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
    }
}
