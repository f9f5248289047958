//! Route table and handlers.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use launchdash_core::charts::{payload_scatter_chart, success_pie_chart};
use launchdash_core::{
    CallbackRegistry, DashboardLayout, DatasetSummary, Figure, PayloadRange, SiteSelection,
    UpdateRequest, UpdateResponse,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/_dash-layout", get(layout))
        .route("/_dash-dependencies", get(dependencies))
        .route("/_dash-update-component", post(update_component))
        .route("/api/charts/success-pie", get(success_pie))
        .route("/api/charts/payload-scatter", get(payload_scatter))
        .route("/api/summary", get(summary))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.page.as_ref().clone())
}

async fn layout(State(state): State<AppState>) -> Json<DashboardLayout> {
    Json(state.layout.as_ref().clone())
}

async fn dependencies(State(state): State<AppState>) -> Json<CallbackRegistry> {
    Json(state.callbacks.as_ref().clone())
}

async fn update_component(
    State(state): State<AppState>,
    request: Result<Json<UpdateRequest>, JsonRejection>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let Json(request) = request?;
    let response = state.callbacks.dispatch(&state.table, &request)?;
    Ok(Json(response))
}

/// Query for the pie chart endpoint.
#[derive(Debug, Deserialize)]
pub struct PieParams {
    /// Dropdown value; defaults to every site.
    pub site: Option<String>,
}

async fn success_pie(
    State(state): State<AppState>,
    params: Result<Query<PieParams>, QueryRejection>,
) -> Result<Json<Figure>, ApiError> {
    let Query(params) = params?;
    let site = selection(&state, params.site.as_deref())?;
    Ok(Json(success_pie_chart(&state.table, &site)))
}

/// Query for the scatter chart endpoint.
#[derive(Debug, Deserialize)]
pub struct ScatterParams {
    /// Dropdown value; defaults to every site.
    pub site: Option<String>,
    /// Low payload bound; defaults to the slider's initial value.
    pub low: Option<f64>,
    /// High payload bound; defaults to the slider's initial value.
    pub high: Option<f64>,
}

async fn payload_scatter(
    State(state): State<AppState>,
    params: Result<Query<ScatterParams>, QueryRejection>,
) -> Result<Json<Figure>, ApiError> {
    let Query(params) = params?;
    let site = selection(&state, params.site.as_deref())?;
    let initial = state
        .layout
        .initial_payload_range()
        .ok_or_else(|| ApiError::internal("layout has no payload slider"))?;
    let range = PayloadRange::new(
        params.low.unwrap_or(initial.low()),
        params.high.unwrap_or(initial.high()),
    )?;
    Ok(Json(payload_scatter_chart(&state.table, &site, &range)))
}

fn selection(state: &AppState, site: Option<&str>) -> Result<SiteSelection, ApiError> {
    let selection = site.map(SiteSelection::from_value).unwrap_or_default();
    state.table.check_selection(&selection)?;
    Ok(selection)
}

async fn summary(State(state): State<AppState>) -> Json<DatasetSummary> {
    Json(DatasetSummary::from_table(&state.table))
}

/// Health check response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Server status ("healthy").
    pub status: String,
    /// Server name.
    pub name: String,
    /// Server version.
    pub version: String,
    /// Loaded launch records.
    pub records: usize,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        records: state.table.len(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use launchdash_core::{DashConfig, LaunchOutcome, LaunchRecord, LaunchTable};
    use tower::ServiceExt;

    fn state() -> AppState {
        let rows = [
            ("CCAFS LC-40", false, 0.0, "v1.0"),
            ("CCAFS LC-40", true, 3000.0, "v1.1"),
            ("KSC LC-39A", true, 5300.0, "FT"),
        ];
        let table = LaunchTable::from_records(
            rows.iter()
                .map(|(site, ok, payload, category)| LaunchRecord {
                    flight_number: 1,
                    launch_site: site.to_string(),
                    outcome: if *ok {
                        LaunchOutcome::Success
                    } else {
                        LaunchOutcome::Failure
                    },
                    payload_mass_kg: *payload,
                    booster_version: format!("F9 {category}"),
                    booster_version_category: category.to_string(),
                })
                .collect(),
        )
        .unwrap();
        AppState::new(table, &DashConfig::default()).unwrap()
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let resp = router(state())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["records"], 3);
    }

    #[tokio::test]
    async fn test_pie_defaults_to_all_sites() {
        let (status, body) = get_json("/api/charts/success-pie").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["layout"]["title"]["text"], "Total Success Launches By Site");
        assert_eq!(body["data"][0]["labels"][0], "CCAFS LC-40");
    }

    #[tokio::test]
    async fn test_pie_unknown_site_is_404() {
        let (status, body) = get_json("/api/charts/success-pie?site=Boca%20Chica").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["category"], "not_found");
    }

    #[tokio::test]
    async fn test_scatter_uses_slider_defaults() {
        let (status, body) = get_json("/api/charts/payload-scatter").await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["v1.1", "FT"]);
    }

    #[tokio::test]
    async fn test_scatter_reversed_range_is_400() {
        let (status, body) = get_json("/api/charts/payload-scatter?low=9000&high=100").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["category"], "invalid_request");
    }

    #[tokio::test]
    async fn test_scatter_without_slider_is_500() {
        let mut state = state();
        let mut layout = state.layout.as_ref().clone();
        layout.root = launchdash_core::Component::Div { children: vec![] };
        state.layout = std::sync::Arc::new(layout);

        let resp = router(state)
            .oneshot(
                Request::builder()
                    .uri("/api/charts/payload-scatter")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["category"], "internal");
    }

    #[tokio::test]
    async fn test_dependencies_lists_both_callbacks() {
        let (status, body) = get_json("/_dash-dependencies").await;
        assert_eq!(status, StatusCode::OK);
        let callbacks = body["callbacks"].as_array().unwrap();
        assert_eq!(callbacks.len(), 2);
        assert_eq!(callbacks[1]["inputs"][1]["id"], "payload-slider");
    }

    #[tokio::test]
    async fn test_summary() {
        let (status, body) = get_json("/api/summary").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["records"], 3);
        assert_eq!(body["successes"], 2);
    }
}
