//! Supported languages and their greeting templates.

use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};
use utoipa::ToSchema;

/// Language a custom greeting can be rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Spanish.
    Es,
    /// French.
    Fr,
    /// German.
    De,
    /// Italian.
    It,
    /// Portuguese.
    Pt,
}

impl Language {
    /// Resolve a language code, falling back to English for unknown codes.
    pub fn resolve(code: &str) -> Self {
        code.parse().unwrap_or_default()
    }

    /// Two-letter language code.
    pub fn code(self) -> &'static str {
        self.into()
    }

    /// English display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Spanish",
            Language::Fr => "French",
            Language::De => "German",
            Language::It => "Italian",
            Language::Pt => "Portuguese",
        }
    }

    /// Render the greeting template for `name`.
    pub fn greet(self, name: &str) -> String {
        match self {
            Language::En => format!("Hello, {name}!"),
            Language::Es => format!("¡Hola, {name}!"),
            Language::Fr => format!("Bonjour, {name}!"),
            Language::De => format!("Hallo, {name}!"),
            Language::It => format!("Ciao, {name}!"),
            Language::Pt => format!("Olá, {name}!"),
        }
    }
}

/// Entry in the supported-languages listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct LanguageInfo {
    /// Language code, e.g. `es`.
    pub code: String,
    /// English display name, e.g. `Spanish`.
    pub name: String,
}

/// All supported languages in catalog order.
pub fn list_languages() -> Vec<LanguageInfo> {
    Language::iter()
        .map(|lang| LanguageInfo {
            code: lang.code().to_string(),
            name: lang.display_name().to_string(),
        })
        .collect()
}
