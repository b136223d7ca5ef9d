//! Application configuration loaded from environment variables.

use std::time::Duration;

use axum::http::HeaderValue;
use serde::Deserialize;

/// Filter directives used when verbose logging is requested.
pub const VERBOSE_LOG_DIRECTIVES: &str = "hello_api=debug,tower_http=debug,info";

/// Deployment mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnv {
    /// Local development: detailed errors with diagnostics.
    #[default]
    Development,
    /// Automated tests: detailed errors, no diagnostics.
    Test,
    /// Production: generic errors only.
    Production,
}

impl AppEnv {
    /// Whether this is a production deployment.
    pub fn is_production(self) -> bool {
        self == AppEnv::Production
    }

    /// Name used in logs and the config summary.
    pub fn as_str(self) -> &'static str {
        match self {
            AppEnv::Development => "development",
            AppEnv::Test => "test",
            AppEnv::Production => "production",
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Deployment mode (development, test, production).
    #[serde(default)]
    pub app_env: AppEnv,

    /// Allowed CORS origin in production.
    #[serde(default)]
    pub frontend_url: Option<String>,

    /// Maximum request body size in bytes.
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,

    // === Greeting Behaviour ===
    /// Simulated latency of the random greeting endpoint.
    #[serde(default = "default_greeting_delay")]
    pub greeting_delay_ms: u64,

    /// Version reported by the health endpoint.
    #[serde(default)]
    pub app_version: Option<String>,

    // === Logging ===
    /// Log filter directives (`RUST_LOG` syntax).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_port() -> u16 {
    5000
}

fn default_body_limit() -> usize {
    10 * 1024 * 1024 // 10 MiB
}

fn default_greeting_delay() -> u64 {
    100
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            app_env: AppEnv::default(),
            frontend_url: None,
            body_limit_bytes: default_body_limit(),
            greeting_delay_ms: default_greeting_delay(),
            app_version: None,
            rust_log: default_log_level(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.body_limit_bytes == 0 {
            return Err("BODY_LIMIT_BYTES must be greater than 0".to_string());
        }

        match &self.frontend_url {
            Some(url) if HeaderValue::from_str(url).is_err() => {
                return Err(format!("FRONTEND_URL is not a valid origin: {url}"));
            }
            None if self.app_env.is_production() => {
                return Err("FRONTEND_URL is required in production".to_string());
            }
            _ => {}
        }

        Ok(())
    }

    /// Version string reported by `/health`.
    pub fn version(&self) -> String {
        self.app_version
            .clone()
            .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string())
    }

    /// Random greeting latency as a duration.
    pub fn greeting_delay(&self) -> Duration {
        Duration::from_millis(self.greeting_delay_ms)
    }

    /// Log filter directives; verbose mode overrides `RUST_LOG`.
    pub fn log_directives(&self, verbose: bool) -> &str {
        if verbose || self.verbose {
            VERBOSE_LOG_DIRECTIVES
        } else {
            &self.rust_log
        }
    }

    /// Origins allowed to make credentialed cross-origin requests.
    pub fn cors_origins(&self) -> Vec<String> {
        if self.app_env.is_production() {
            self.frontend_url.iter().cloned().collect()
        } else {
            vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ]
        }
    }
}
