//! Parsing of custom greeting request bodies.

use serde_json::Value;
use utoipa::ToSchema;

use crate::error::ValidationError;

/// Body of `POST /api/hello/custom`.
#[derive(Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct GreetingRequest {
    /// Name to greet, unsanitized.
    pub name: String,
    /// Requested language code; `None` when omitted or null.
    pub language: Option<String>,
}

impl GreetingRequest {
    /// Build a request from a name and optional language.
    pub fn new(name: impl Into<String>, language: Option<&str>) -> Self {
        Self {
            name: name.into(),
            language: language.map(str::to_string),
        }
    }

    /// Parse a raw request body.
    ///
    /// An empty body is treated as an empty object so it reports the
    /// missing name rather than a JSON syntax error.
    pub fn from_body(body: &[u8]) -> Result<Self, ValidationError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Self::from_json(&Value::Object(Default::default()));
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ValidationError::MalformedBody(e.to_string()))?;
        Self::from_json(&value)
    }

    /// Validate the shape of a decoded JSON body.
    ///
    /// `name` must be a non-empty string. `language` may be absent, null
    /// or a string. Other fields are ignored.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let name = match value.get("name") {
            Some(Value::String(name)) if !name.is_empty() => name.clone(),
            _ => return Err(ValidationError::NameRequired),
        };

        let language = match value.get("language") {
            None | Some(Value::Null) => None,
            Some(Value::String(code)) => Some(code.clone()),
            Some(_) => return Err(ValidationError::LanguageNotString),
        };

        Ok(Self { name, language })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn name_only() {
        let req = GreetingRequest::from_json(&json!({ "name": "Alice" })).unwrap();
        assert_eq!(req, GreetingRequest::new("Alice", None));
    }

    #[test]
    fn name_and_language() {
        let req = GreetingRequest::from_json(&json!({ "name": "Hans", "language": "de" })).unwrap();
        assert_eq!(req, GreetingRequest::new("Hans", Some("de")));
    }

    #[test]
    fn null_language_is_absent() {
        let req = GreetingRequest::from_json(&json!({ "name": "A", "language": null })).unwrap();
        assert_eq!(req.language, None);
    }

    #[test]
    fn missing_or_non_string_name_rejected() {
        for body in [
            json!({}),
            json!({ "name": null }),
            json!({ "name": 42 }),
            json!({ "name": ["a"] }),
            json!({ "name": "" }),
            json!("Alice"),
            json!([1, 2]),
        ] {
            assert_eq!(
                GreetingRequest::from_json(&body),
                Err(ValidationError::NameRequired),
                "{body}"
            );
        }
    }

    #[test]
    fn non_string_language_rejected() {
        assert_eq!(
            GreetingRequest::from_json(&json!({ "name": "A", "language": 7 })),
            Err(ValidationError::LanguageNotString)
        );
    }

    #[test]
    fn empty_body_reports_missing_name() {
        assert_eq!(
            GreetingRequest::from_body(b""),
            Err(ValidationError::NameRequired)
        );
        assert_eq!(
            GreetingRequest::from_body(b"  \n"),
            Err(ValidationError::NameRequired)
        );
    }

    #[test]
    fn malformed_body_rejected() {
        assert!(matches!(
            GreetingRequest::from_body(b"{\"name\":"),
            Err(ValidationError::MalformedBody(_))
        ));
    }
}
