//! Request counting, panic recovery and response hardening layers.

use std::any::Any;
use std::backtrace::Backtrace;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{MatchedPath, Request, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{error, warn};

use super::envelope::Envelope;
use crate::config::{AppEnv, Config};
use crate::metrics;
use crate::stats::StatsTracker;

const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; style-src 'self' 'unsafe-inline'; \
     script-src 'self'; img-src 'self' data: https:";

/// Count every request before it reaches routing-specific handlers.
pub async fn count_requests(
    State(stats): State<Arc<StatsTracker>>,
    request: Request,
    next: Next,
) -> Response {
    stats.record_request();

    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    metrics::record_http_request(start, &route, response.status().as_u16());
    response
}

/// Build the response for a handler panic.
///
/// Production responses carry only a generic message. Other modes expose
/// the panic message; development mode also attaches a backtrace.
pub fn panic_response(app_env: AppEnv) -> impl Fn(Box<dyn Any + Send + 'static>) -> Response + Clone {
    move |payload: Box<dyn Any + Send + 'static>| {
        let message = panic_message(&*payload);
        error!(panic = %message, "handler panicked");

        let envelope = match app_env {
            AppEnv::Production => Envelope::failure("Internal server error"),
            AppEnv::Test => Envelope::failure(message),
            AppEnv::Development => {
                Envelope::failure(message).with_stack(Backtrace::force_capture().to_string())
            }
        };

        envelope.into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}

/// CORS policy derived from the configured origins.
pub fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins()
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Security headers added to responses that do not already set them.
pub fn security_headers() -> [SetResponseHeaderLayer<HeaderValue>; 4] {
    [
        SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ),
        SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ),
        SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY),
        ),
        SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_message_from_str_and_string() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(&*payload), "boom");

        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(&*payload), "bang");

        let payload: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(&*payload), "handler panicked");
    }

    async fn panic_body(app_env: AppEnv) -> serde_json::Value {
        let respond = panic_response(app_env);
        let payload: Box<dyn Any + Send> = Box::new("secret detail");
        let response = respond(payload);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn production_panic_is_generic() {
        let body = panic_body(AppEnv::Production).await;
        assert_eq!(
            body,
            serde_json::json!({ "success": false, "error": "Internal server error" })
        );
    }

    #[tokio::test]
    async fn test_mode_panic_exposes_message_only() {
        let body = panic_body(AppEnv::Test).await;
        assert_eq!(body["error"], "secret detail");
        assert!(body.get("stack").is_none());
    }

    #[tokio::test]
    async fn development_panic_attaches_stack() {
        let body = panic_body(AppEnv::Development).await;
        assert_eq!(body["error"], "secret detail");
        assert!(body["stack"].is_string());
    }

    #[test]
    fn cors_layer_builds_for_defaults() {
        let _ = cors_layer(&Config::default());
    }
}
