//! HTTP API handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use utoipa::ToSchema;

use super::envelope::Envelope;
use crate::config::{AppEnv, Config};
use crate::error::{ApiError, Result, ValidationError};
use crate::greeting::{
    CustomGreeting, GreetingRequest, GreetingService, LanguageList, RandomGreeting,
};
use crate::metrics;
use crate::stats::{StatsSnapshot, StatsTracker};
use crate::utils::iso_timestamp;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration.
    pub config: Arc<Config>,
    /// Request statistics, incremented by middleware on every request.
    pub stats: Arc<StatsTracker>,
    /// Greeting operations.
    pub greetings: GreetingService,
    /// Prometheus render handle, when a recorder is installed.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state with fresh statistics.
    pub fn new(config: Config) -> Self {
        Self {
            greetings: GreetingService::new(config.greeting_delay()),
            config: Arc::new(config),
            stats: Arc::new(StatsTracker::new()),
            prometheus: None,
        }
    }

    /// Use an existing statistics tracker.
    pub fn with_stats(mut self, stats: Arc<StatsTracker>) -> Self {
        self.stats = stats;
        self
    }

    /// Expose metrics from the given Prometheus recorder.
    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }

    /// Deployment mode.
    pub fn app_env(&self) -> AppEnv {
        self.config.app_env
    }
}

/// Health check payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    /// Always `healthy` while the process answers.
    pub status: String,
    /// ISO-8601 time of the check.
    pub timestamp: String,
    /// Seconds since start.
    pub uptime: f64,
    /// Service version.
    pub version: String,
}

/// API overview payload.
#[derive(Debug, Serialize)]
pub struct ApiIndex {
    /// Service title.
    pub title: &'static str,
    /// Service version.
    pub version: String,
    /// One-line description.
    pub description: &'static str,
    /// Endpoint path to summary.
    pub endpoints: BTreeMap<&'static str, &'static str>,
    /// Where to find the full API description.
    pub documentation: &'static str,
}

fn reject(err: ValidationError) -> ApiError {
    metrics::inc_validation_failures();
    err.into()
}

/// Random greeting handler.
#[utoipa::path(
    get,
    path = "/api/hello",
    tag = "greetings",
    responses(
        (status = 200, description = "Random canned greeting", body = RandomGreeting),
        (status = 500, description = "Internal failure")
    )
)]
pub async fn hello(State(state): State<AppState>) -> Envelope<RandomGreeting> {
    let greeting = state.greetings.random_greeting().await;
    metrics::inc_greetings_served("api");
    Envelope::success(greeting)
}

/// Custom greeting handler.
///
/// Takes the raw body so malformed or mistyped JSON, and bodies over the
/// size limit, are reported in the response envelope rather than as an
/// extractor rejection.
#[utoipa::path(
    post,
    path = "/api/hello/custom",
    tag = "greetings",
    request_body = GreetingRequest,
    responses(
        (status = 200, description = "Personalized greeting", body = CustomGreeting),
        (status = 400, description = "Missing, too long or invalid name"),
        (status = 413, description = "Request body over the configured limit"),
        (status = 500, description = "Internal failure")
    )
)]
pub async fn custom_greeting(
    State(state): State<AppState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Envelope<CustomGreeting>> {
    let body = body?;
    let request = GreetingRequest::from_body(&body).map_err(reject)?;
    let greeting = state.greetings.custom_greeting(request).map_err(reject)?;
    metrics::inc_greetings_served("custom");
    Ok(Envelope::success(greeting))
}

/// Supported languages handler.
#[utoipa::path(
    get,
    path = "/api/hello/languages",
    tag = "greetings",
    responses((status = 200, description = "Supported languages", body = LanguageList))
)]
pub async fn languages(State(state): State<AppState>) -> Envelope<LanguageList> {
    Envelope::success(state.greetings.languages())
}

/// Usage statistics handler.
#[utoipa::path(
    get,
    path = "/api/hello/stats",
    tag = "greetings",
    responses((status = 200, description = "Request statistics", body = StatsSnapshot))
)]
pub async fn stats(State(state): State<AppState>) -> Envelope<StatsSnapshot> {
    Envelope::success(state.stats.snapshot())
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up", body = HealthStatus))
)]
pub async fn health(State(state): State<AppState>) -> Envelope<HealthStatus> {
    Envelope::success(HealthStatus {
        status: "healthy".to_string(),
        timestamp: iso_timestamp(Utc::now()),
        uptime: state.stats.uptime().as_secs_f64(),
        version: state.config.version(),
    })
}

/// API overview handler.
pub async fn api_index(State(state): State<AppState>) -> Envelope<ApiIndex> {
    let endpoints = BTreeMap::from([
        ("/health", "GET - Health check endpoint"),
        ("/api/hello", "GET - Random hello message"),
        ("/api/hello/custom", "POST - Custom hello message"),
        ("/api/hello/languages", "GET - Supported languages"),
        ("/api/hello/stats", "GET - API usage statistics"),
        ("/api/docs", "GET - Interactive API documentation"),
    ]);

    Envelope::success(ApiIndex {
        title: "Hello World Greeting API",
        version: state.config.version(),
        description: "Greeting messages with input sanitization and usage statistics",
        endpoints,
        documentation: "/api/openapi.json",
    })
}

/// Prometheus exposition handler.
pub async fn prometheus(State(state): State<AppState>, uri: Uri) -> Response {
    match &state.prometheus {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => not_found(uri).await,
    }
}

/// Fallback for unmatched paths and unsupported methods.
pub async fn not_found(uri: Uri) -> Response {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    if is_api_path(uri.path()) {
        ApiError::NotFound { path }.into_response()
    } else {
        Envelope::failure(format!("Not found: {path}")).into_response_with(StatusCode::NOT_FOUND)
    }
}

fn is_api_path(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}
