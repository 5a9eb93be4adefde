use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    ErrorResponse, HealthResponse, RankThresholds, TrekListResponse, TrekMatchRequest,
    TrekMatchResponse, WeatherQuery,
};
use crate::services::{TrekCatalog, WeatherClient};
use crate::core::Matcher;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<TrekCatalog>,
    pub matcher: Matcher,
    pub weather: WeatherClient,
}

/// Configure all trek-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/treks", web::get().to(list_treks))
        .route("/treks/match", web::post().to(match_treks))
        .route("/weather", web::get().to(current_weather));
}

fn validation_error(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message,
        status_code: 400,
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = if state.catalog.is_empty() { "degraded" } else { "healthy" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        treks: state.catalog.len(),
    })
}

/// List the catalog
///
/// GET /api/v1/treks
async fn list_treks(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(TrekListResponse {
        treks: state.catalog.treks().to_vec(),
        count: state.catalog.len(),
    })
}

/// Trek match endpoint
///
/// POST /api/v1/treks/match
///
/// Request body:
/// ```json
/// {
///   "age_group": "18_40",
///   "health_issues": ["none"],
///   "fitness_level": "medium",
///   "experience": "few_treks",
///   "trek_type": ["fort_history", "scenic_waterfall"],
///   "minimum": 40,
///   "limit": 6
/// }
/// ```
async fn match_treks(
    state: web::Data<AppState>,
    req: web::Json<TrekMatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match request: {:?}", errors);
        return validation_error(errors.to_string());
    }

    let preferences = req.preferences();
    let defaults = state.matcher.thresholds();
    let thresholds = RankThresholds {
        minimum: req.minimum.unwrap_or(defaults.minimum),
        limit: req.limit.unwrap_or(defaults.limit),
    };

    tracing::debug!("Matching treks for {:?} with {:?}", preferences, thresholds);

    let matches = state
        .matcher
        .rank_with(state.catalog.treks(), &preferences, thresholds);

    tracing::info!(
        "Returning {} trek matches (from {} treks)",
        matches.len(),
        state.catalog.len()
    );

    HttpResponse::Ok().json(TrekMatchResponse {
        matches,
        total_candidates: state.catalog.len(),
    })
}

/// Current weather near a trek
///
/// GET /api/v1/weather?city={baseVillage}&region={region}
async fn current_weather(
    state: web::Data<AppState>,
    query: web::Query<WeatherQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_error(errors.to_string());
    }

    let report = state
        .weather
        .current(query.city.as_deref(), query.region.as_deref())
        .await;

    HttpResponse::Ok().json(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Trek;
    use crate::services::weather::DEFAULT_WEATHER_URL;
    use actix_web::{test, App};

    fn state() -> AppState {
        let catalog = TrekCatalog::new(vec![
            Trek::new("Torna Fort", Some("Hard")),
            Trek::new("Rajgad Fort", Some("Moderate")),
            Trek::new("Karnala Fort", Some("Easy")),
        ])
        .unwrap();

        AppState {
            catalog: Arc::new(catalog),
            matcher: Matcher::with_default_tables(),
            weather: WeatherClient::new(DEFAULT_WEATHER_URL, None, 5).unwrap(),
        }
    }

    #[actix_web::test]
    async fn test_match_endpoint() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(crate::routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/treks/match")
            .set_json(serde_json::json!({
                "age_group": "over_60",
                "health_issues": ["none"],
                "fitness_level": "low",
                "experience": "first_time",
                "trek_type": ["easy_short"]
            }))
            .to_request();

        let body: TrekMatchResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.total_candidates, 3);
        assert_eq!(body.matches.len(), 2);
        assert_eq!(body.matches[0].trek.name, "Karnala Fort");
        assert_eq!(body.matches[0].match_score, 100);
        assert_eq!(body.matches[0].reason, "Gentle trek with beautiful views!");
    }

    #[actix_web::test]
    async fn test_match_endpoint_rejects_bad_limit() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(crate::routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/treks/match")
            .set_json(serde_json::json!({ "limit": 0 }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_weather_endpoint_without_key() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(crate::routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/weather?city=Sondai")
            .to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["location"], "Sondai");
        assert_eq!(body["source"], "placeholder");
    }

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(crate::routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.status, "healthy");
        assert_eq!(body.treks, 3);
    }
}
