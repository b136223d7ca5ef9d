//! Greeting operations served by the API.

use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, instrument};
use utoipa::ToSchema;

use super::catalog::{list_languages, Language, LanguageInfo};
use super::request::GreetingRequest;
use super::sanitize::sanitize_name;
use crate::error::ValidationError;
use crate::utils::iso_timestamp;

/// Canned greetings served by `GET /api/hello`, indexed by `greeting_id`.
pub const GREETINGS: [&str; 5] = [
    "Hello, World!",
    "Hello from the greeting API!",
    "Greetings from the best practices demo!",
    "Welcome to Rust-powered development!",
    "Hello, fellow developer!",
];

/// Where a greeting came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GreetingSource {
    /// Random canned greeting.
    Api,
    /// Personalized greeting.
    Custom,
}

/// Result of `GET /api/hello`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RandomGreeting {
    /// Greeting text.
    pub message: String,
    /// ISO-8601 time the greeting was produced.
    pub timestamp: String,
    /// Always `api`.
    pub source: GreetingSource,
    /// Index of the greeting in the canned list.
    pub greeting_id: usize,
}

/// Result of `POST /api/hello/custom`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CustomGreeting {
    /// Interpolated greeting.
    pub message: String,
    /// Sanitized name.
    pub name: String,
    /// Language code exactly as requested, `en` when omitted.
    pub language: String,
    /// ISO-8601 time the greeting was produced.
    pub timestamp: String,
    /// Always `custom`.
    pub source: GreetingSource,
}

/// Result of `GET /api/hello/languages`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LanguageList {
    /// Supported languages in catalog order.
    pub languages: Vec<LanguageInfo>,
    /// Number of supported languages.
    pub total: usize,
    /// Code used when none or an unknown one is requested.
    pub default: String,
}

/// Stateless greeting service.
#[derive(Debug, Clone, Default)]
pub struct GreetingService {
    /// Artificial latency applied to random greetings.
    delay: Duration,
}

impl GreetingService {
    /// Create a service with the given random-greeting latency.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Pick a canned greeting uniformly at random.
    pub async fn random_greeting(&self) -> RandomGreeting {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.pick_greeting(&mut rand::thread_rng())
    }

    /// Pick a canned greeting using the supplied random source.
    pub fn pick_greeting<R: Rng>(&self, rng: &mut R) -> RandomGreeting {
        let greeting_id = rng.gen_range(0..GREETINGS.len());
        RandomGreeting {
            message: GREETINGS[greeting_id].to_string(),
            timestamp: iso_timestamp(Utc::now()),
            source: GreetingSource::Api,
            greeting_id,
        }
    }

    /// Build a personalized greeting.
    ///
    /// Unknown language codes render in English, but the response echoes
    /// the code the caller sent.
    #[instrument(skip(self, request), fields(language = ?request.language))]
    pub fn custom_greeting(
        &self,
        request: GreetingRequest,
    ) -> Result<CustomGreeting, ValidationError> {
        let name = sanitize_name(&request.name)?;
        let requested = request
            .language
            .unwrap_or_else(|| Language::default().code().to_string());
        let language = Language::resolve(&requested);

        if language.code() != requested {
            debug!(requested = %requested, "unsupported language, using {}", language);
        }

        Ok(CustomGreeting {
            message: language.greet(name.as_str()),
            name: name.into_inner(),
            language: requested,
            timestamp: iso_timestamp(Utc::now()),
            source: GreetingSource::Custom,
        })
    }

    /// List supported languages.
    pub fn languages(&self) -> LanguageList {
        let languages = list_languages();
        LanguageList {
            total: languages.len(),
            languages,
            default: Language::default().code().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn service() -> GreetingService {
        GreetingService::new(Duration::ZERO)
    }

    #[test]
    fn alice_defaults_to_english() {
        let greeting = service()
            .custom_greeting(GreetingRequest::new("Alice", None))
            .unwrap();
        assert_eq!(greeting.message, "Hello, Alice!");
        assert_eq!(greeting.name, "Alice");
        assert_eq!(greeting.language, "en");
        assert_eq!(greeting.source, GreetingSource::Custom);
    }

    #[test]
    fn spanish_greeting() {
        let greeting = service()
            .custom_greeting(GreetingRequest::new("María", Some("es")))
            .unwrap();
        assert_eq!(greeting.message, "¡Hola, María!");
        assert_eq!(greeting.language, "es");
    }

    #[test]
    fn unsupported_language_falls_back_but_is_echoed() {
        let greeting = service()
            .custom_greeting(GreetingRequest::new("Test", Some("xx")))
            .unwrap();
        assert_eq!(greeting.message, "Hello, Test!");
        assert_eq!(greeting.language, "xx");
    }

    #[test]
    fn sanitized_name_is_returned() {
        let greeting = service()
            .custom_greeting(GreetingRequest::new("  <b>Eve</b> ", Some("fr")))
            .unwrap();
        assert_eq!(greeting.name, "bEve/b");
        assert_eq!(greeting.message, "Bonjour, bEve/b!");
    }

    #[test]
    fn validation_errors_propagate_unchanged() {
        let err = service()
            .custom_greeting(GreetingRequest::new("&&&", None))
            .unwrap_err();
        assert_eq!(err, ValidationError::NameInvalidCharacters);

        let err = service()
            .custom_greeting(GreetingRequest::new("x".repeat(51), Some("de")))
            .unwrap_err();
        assert_eq!(err, ValidationError::NameTooLong { max: 50 });
    }

    #[test]
    fn pick_greeting_covers_every_index() {
        let svc = service();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; GREETINGS.len()];
        for _ in 0..500 {
            let greeting = svc.pick_greeting(&mut rng);
            assert_eq!(greeting.message, GREETINGS[greeting.greeting_id]);
            assert_eq!(greeting.source, GreetingSource::Api);
            seen[greeting.greeting_id] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[tokio::test]
    async fn random_greeting_is_from_catalog() {
        let greeting = service().random_greeting().await;
        assert!(greeting.greeting_id < GREETINGS.len());
        assert!(!greeting.message.is_empty());
    }

    #[test]
    fn language_list_shape() {
        let list = service().languages();
        assert_eq!(list.total, 6);
        assert_eq!(list.default, "en");
        assert_eq!(list.languages.len(), list.total);
    }
}
