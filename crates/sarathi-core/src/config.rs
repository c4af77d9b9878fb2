//! Application configuration model.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Bounds for the canned responder's simulated thinking pause.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ReplyDelayConfig {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Default for ReplyDelayConfig {
    fn default() -> Self {
        Self {
            min_ms: 600,
            max_ms: 1400,
        }
    }
}

/// Client configuration, loaded from `config.toml`.
///
/// Every field has a default, so a partial or missing file still yields a
/// working configuration.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the backend, without a trailing slash.
    pub api_url: String,
    /// Path of the login endpoint.
    pub login_endpoint: String,
    /// Path of the question-answering endpoint.
    pub questions_endpoint: String,
    /// Product name used in user-facing output.
    pub app_name: String,
    /// Per-request timeout for API calls.
    pub request_timeout_secs: u64,
    /// Simulated thinking pause for offline replies.
    pub reply_delay: ReplyDelayConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: "https://localhost:7254".to_string(),
            login_endpoint: "/api/auth/login".to_string(),
            questions_endpoint: "/api/questions".to_string(),
            app_name: "Sarathi".to_string(),
            request_timeout_secs: 30,
            reply_delay: ReplyDelayConfig::default(),
        }
    }
}

impl AppConfig {
    /// Full URL of the login endpoint.
    pub fn login_url(&self) -> String {
        self.join(&self.login_endpoint)
    }

    /// Full URL of the question-answering endpoint.
    pub fn questions_url(&self) -> String {
        self.join(&self.questions_endpoint)
    }

    /// Per-request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn join(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), endpoint)
    }
}
