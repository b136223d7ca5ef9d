//! Uniform `{success, data | error}` response envelope.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::routes::AVAILABLE_ENDPOINTS;

/// Body returned when the envelope itself cannot be serialized.
const SERIALIZATION_FAILURE_BODY: &str = r#"{"success":false,"error":"Internal server error"}"#;

/// Response envelope wrapping every JSON body the API produces.
///
/// Constructed only through [`Envelope::success`] and [`Envelope::failure`],
/// so `data` is present exactly when `success` is true and `error` exactly
/// when it is false.
#[derive(Debug, Serialize)]
pub struct Envelope<T = ()> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    available_endpoints: Option<&'static [&'static str]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stack: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    /// Wrap a successful operation result.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            available_endpoints: None,
            stack: None,
        }
    }

    /// Serialize into a JSON response with the given status.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        match serde_json::to_vec(&self) {
            Ok(body) => json_response(status, body),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize response envelope");
                json_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SERIALIZATION_FAILURE_BODY.as_bytes().to_vec(),
                )
            }
        }
    }
}

impl Envelope<()> {
    /// Wrap a failure message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            available_endpoints: None,
            stack: None,
        }
    }

    /// Attach the list of routable API endpoints (404 responses).
    pub fn with_available_endpoints(mut self) -> Self {
        self.available_endpoints = Some(AVAILABLE_ENDPOINTS);
        self
    }

    /// Attach diagnostic detail (development mode 500 responses).
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = if self.success {
            StatusCode::OK
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        self.into_response_with(status)
    }
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response {
    let mut response = (status, body).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn success_omits_error() {
        let envelope = Envelope::success(json!({ "message": "hi" }));
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "success": true, "data": { "message": "hi" } })
        );
    }

    #[test]
    fn failure_omits_data() {
        let envelope = Envelope::failure("nope");
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "success": false, "error": "nope" })
        );
    }

    #[test]
    fn not_found_lists_endpoints() {
        let value = serde_json::to_value(Envelope::failure("x").with_available_endpoints()).unwrap();
        let endpoints = value["available_endpoints"].as_array().unwrap();
        assert!(endpoints.iter().any(|e| e == "/api/hello"));
        assert!(endpoints.iter().any(|e| e == "/health"));
    }

    #[test]
    fn response_is_json() {
        let response = Envelope::failure("bad").into_response_with(StatusCode::BAD_REQUEST);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}
