use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use trek_match::config::Settings;
use trek_match::core::{Matcher, TrekCategories};
use trek_match::routes::{self, treks::AppState};
use trek_match::services::{CacheManager, TrekCatalog, WeatherClient};
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();

    // LOG_LEVEL / LOG_FORMAT win over the logging section
    let (log_level, log_format) = match &settings {
        Ok(s) => (s.logging.level.clone(), s.logging.format.clone()),
        Err(_) => ("info".to_string(), "json".to_string()),
    };
    let log_level = std::env::var("LOG_LEVEL").unwrap_or(log_level);
    let log_format = std::env::var("LOG_FORMAT").unwrap_or(log_format);
    init_logging(&log_level, &log_format);

    info!("Starting Trek Match service...");

    let settings = settings.map_err(|e| startup_error("Failed to load configuration", e))?;

    info!("Configuration loaded successfully");

    // Load the trek catalog
    let catalog = TrekCatalog::load(&settings.catalog.path)
        .map_err(|e| startup_error("Failed to load trek catalog", e))?;

    if catalog.is_empty() {
        tracing::warn!("Trek catalog at {} is empty", settings.catalog.path);
    }

    // Load category tables, falling back to the bundled ones
    let categories = match &settings.catalog.categories_path {
        Some(path) => TrekCategories::load(path)
            .map_err(|e| startup_error("Failed to load category tables", e))?,
        None => TrekCategories::default(),
    };

    let thresholds = settings.matching.thresholds();
    let matcher = Matcher::new(categories, thresholds);

    info!("Matcher initialized with thresholds: {:?}", thresholds);

    // Initialize weather client with its reading cache
    let weather_cache = CacheManager::new(
        settings.weather.cache_size,
        settings.weather.cache_ttl_secs,
    );

    let weather = WeatherClient::new(
        settings.weather.base_url.clone(),
        settings.weather.api_key.clone(),
        settings.weather.timeout_secs,
    )
    .map_err(|e| startup_error("Failed to create weather client", e))?
    .with_cache(weather_cache);

    if weather.is_configured() {
        info!("Weather client initialized (TTL: {}s)", settings.weather.cache_ttl_secs);
    } else {
        info!("No weather API key configured, serving placeholder readings");
    }

    // Build application state
    let app_state = AppState {
        catalog: Arc::new(catalog),
        matcher,
        weather,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
