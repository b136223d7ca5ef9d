//! OpenAPI description of the greeting API.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{self, HealthStatus};
use crate::greeting::{
    CustomGreeting, GreetingRequest, GreetingSource, LanguageInfo, LanguageList, RandomGreeting,
};
use crate::stats::StatsSnapshot;

/// Successful responses are wrapped as `{"success": true, "data": <schema>}`;
/// failures as `{"success": false, "error": "<message>"}`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hello World Greeting API",
        description = "Greeting messages with input sanitization and usage statistics"
    ),
    paths(
        handlers::hello,
        handlers::custom_greeting,
        handlers::languages,
        handlers::stats,
        handlers::health
    ),
    components(schemas(
        RandomGreeting,
        CustomGreeting,
        GreetingRequest,
        GreetingSource,
        LanguageList,
        LanguageInfo,
        StatsSnapshot,
        HealthStatus
    )),
    tags(
        (name = "greetings", description = "Greeting and statistics endpoints"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

/// Swagger UI at `/api/docs` backed by `/api/openapi.json`.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_greeting_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/hello",
            "/api/hello/custom",
            "/api/hello/languages",
            "/api/hello/stats",
            "/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
