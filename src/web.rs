//! HTTP API surface
//!
//! Mounts the report, insights, recommendations, alerts and assistant
//! endpoints under `/api`, with permissive CORS and a static-file
//! fallback for a bundled front-end.

use crate::alerts::{AlertBook, AlertSpec, CustomAlert};
use crate::assistant::{self, AssistantContext};
use crate::insights::ProfessionalReport;
use crate::models::WeatherReport;
use crate::recommendations::{Recommendation, plan_day};
use crate::service::{LocationQuery, WeatherService};
use anyhow::{Context, Result};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

/// Shared application state
pub struct AppState {
    /// Weather report service
    pub service: WeatherService,
    /// In-memory alert registry
    pub alerts: AlertBook,
}

/// Place selection accepted by every report-shaped endpoint
#[derive(Debug, Deserialize)]
pub struct PlaceQuery {
    /// Free-form location ("Berlin" or "52.52,13.40")
    pub location: Option<String>,
    /// Latitude, paired with `lon`
    pub lat: Option<f64>,
    /// Longitude, paired with `lat`
    pub lon: Option<f64>,
}

impl PlaceQuery {
    fn into_query(self) -> Result<LocationQuery, (StatusCode, String)> {
        if let (Some(lat), Some(lon)) = (self.lat, self.lon) {
            return Ok(LocationQuery::Coordinates {
                lat,
                lon,
                label: None,
            });
        }
        match self.location {
            Some(location) => LocationQuery::parse(&location)
                .map_err(|e| (StatusCode::BAD_REQUEST, format!("{e:#}"))),
            None => Err((
                StatusCode::BAD_REQUEST,
                "Provide a location or lat/lon coordinates".to_string(),
            )),
        }
    }
}

/// Assistant request body
#[derive(Debug, Deserialize)]
pub struct AssistantRequest {
    /// The user's message
    pub message: String,
    /// Optional location to answer in the context of
    pub location: Option<String>,
}

/// Assistant response body
#[derive(Debug, Serialize)]
pub struct AssistantResponse {
    /// The assistant's name
    pub assistant: String,
    /// The composed reply
    pub reply: String,
}

/// Build the `/api` router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/report", get(get_report))
        .route("/insights", get(get_insights))
        .route("/recommendations", get(get_recommendations))
        .route("/alerts", get(list_alerts).post(create_alert))
        .route("/alerts/{id}", axum::routing::put(update_alert).delete(delete_alert))
        .route("/alerts/{id}/toggle", post(toggle_alert))
        .route("/alerts/check", get(check_alerts))
        .route("/assistant", post(ask_assistant))
        .with_state(state)
}

async fn fetch_report(
    state: &AppState,
    place: PlaceQuery,
) -> Result<WeatherReport, (StatusCode, String)> {
    let query = place.into_query()?;
    // The service is infallible past input validation: failures resolve
    // to the demo report.
    Ok(state.service.report(&query).await)
}

async fn get_report(
    State(state): State<Arc<AppState>>,
    Query(place): Query<PlaceQuery>,
) -> Result<Json<WeatherReport>, (StatusCode, String)> {
    let report = fetch_report(&state, place).await?;
    Ok(Json(report))
}

async fn get_insights(
    State(state): State<Arc<AppState>>,
    Query(place): Query<PlaceQuery>,
) -> Result<Json<ProfessionalReport>, (StatusCode, String)> {
    let report = fetch_report(&state, place).await?;
    Ok(Json(ProfessionalReport::generate(&report)))
}

async fn get_recommendations(
    State(state): State<Arc<AppState>>,
    Query(place): Query<PlaceQuery>,
) -> Result<Json<Vec<Recommendation>>, (StatusCode, String)> {
    let report = fetch_report(&state, place).await?;
    Ok(Json(plan_day(&report)))
}

async fn list_alerts(State(state): State<Arc<AppState>>) -> Json<Vec<CustomAlert>> {
    Json(state.alerts.list())
}

async fn create_alert(
    State(state): State<Arc<AppState>>,
    Json(spec): Json<AlertSpec>,
) -> (StatusCode, Json<CustomAlert>) {
    (StatusCode::CREATED, Json(state.alerts.add(spec)))
}

async fn update_alert(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(spec): Json<AlertSpec>,
) -> Result<Json<CustomAlert>, StatusCode> {
    state
        .alerts
        .update(id, spec)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn delete_alert(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> StatusCode {
    if state.alerts.remove(id) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn toggle_alert(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<CustomAlert>, StatusCode> {
    state.alerts.toggle(id).map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn check_alerts(
    State(state): State<Arc<AppState>>,
    Query(place): Query<PlaceQuery>,
) -> Result<Json<Vec<CustomAlert>>, (StatusCode, String)> {
    let report = fetch_report(&state, place).await?;
    Ok(Json(state.alerts.check(&report)))
}

async fn ask_assistant(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AssistantRequest>,
) -> Result<Json<AssistantResponse>, (StatusCode, String)> {
    let reply = match request.location {
        Some(location) => {
            let query = LocationQuery::parse(&location)
                .map_err(|e| (StatusCode::BAD_REQUEST, format!("{e:#}")))?;
            let report = state.service.report(&query).await;
            let professional = ProfessionalReport::generate(&report);
            assistant::reply(
                &request.message,
                &AssistantContext {
                    weather: Some(&report),
                    professional: Some(&professional),
                },
            )
        }
        None => assistant::reply(&request.message, &AssistantContext::default()),
    };

    Ok(Json(AssistantResponse {
        assistant: assistant::ASSISTANT_NAME.to_string(),
        reply,
    }))
}

/// Run the web server until shutdown
pub async fn run(state: Arc<AppState>, port: u16) -> Result<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api", router(state))
        .fallback_service(ServeDir::new("static"))
        .layer(cors);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", port);
    axum::serve(listener, app)
        .await
        .with_context(|| "Web server terminated unexpectedly")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::{AlertParameter, AlertTrigger};
    use crate::config::WeatherBuddyConfig;
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    fn test_state() -> Arc<AppState> {
        // No API key: every report resolves to demo data without touching
        // the network.
        let config = WeatherBuddyConfig::default();
        Arc::new(AppState {
            service: WeatherService::new(config).unwrap(),
            alerts: AlertBook::new(),
        })
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_report_endpoint_serves_demo_fallback() {
        let app = router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/report?location=Berlin")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["location"], "Berlin");
        assert_eq!(json["source"], "demo");
        assert_eq!(json["hourly"].as_array().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_report_endpoint_requires_a_place() {
        let app = router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/report").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_insights_endpoint_shape() {
        let app = router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/insights?lat=40.71&lon=-74.01")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["workability_score"]["score"].is_number());
        assert_eq!(json["commute_impact"]["severity"], "low");
    }

    #[tokio::test]
    async fn test_alert_lifecycle_over_http() {
        let state = test_state();
        let spec = AlertSpec {
            name: "Heat".to_string(),
            parameter: AlertParameter::Temperature,
            trigger: AlertTrigger::Above,
            threshold: 20.0,
            active: true,
            locations: Vec::new(),
        };

        let response = router(state.clone())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/alerts")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&spec).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        let id = created["id"].as_u64().unwrap();

        // Demo temperature is 22, so the alert fires
        let response = router(state.clone())
            .oneshot(
                Request::builder()
                    .uri("/alerts/check?location=Test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let fired = body_json(response).await;
        assert_eq!(fired.as_array().unwrap().len(), 1);

        let response = router(state.clone())
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/alerts/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = router(state)
            .oneshot(Request::builder().uri("/alerts").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let remaining = body_json(response).await;
        assert!(remaining.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_assistant_endpoint_answers() {
        let app = router(test_state());
        let body = serde_json::json!({
            "message": "What's the weather?",
            "location": "Chicago"
        });
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/assistant")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["assistant"], "Aria");
        assert!(json["reply"].as_str().unwrap().contains("Chicago"));
    }
}
