//! Greeting module: name sanitization, language catalog and greeting operations.
//!
//! This module handles:
//! - Validation and stripping of user-supplied names
//! - Language resolution with English fallback
//! - Random and personalized greetings

pub mod catalog;
pub mod request;
pub mod sanitize;
pub mod service;

pub use catalog::{list_languages, Language, LanguageInfo};
pub use request::GreetingRequest;
pub use sanitize::{sanitize_name, SanitizedName, FORBIDDEN_CHARS, MAX_NAME_LENGTH};
pub use service::{
    CustomGreeting, GreetingService, GreetingSource, LanguageList, RandomGreeting, GREETINGS,
};
