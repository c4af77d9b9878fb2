//! HTTP client for the login endpoint.
//!
//! Every failure is folded into a [`LoginError`] whose `Display` text is
//! exactly what the user should read, so callers never have to re-map
//! status codes into wording.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::http::build_client;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Shown for HTTP 400/401, whatever the body said.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password. Please try again.";
/// Shown when a 2xx response cannot be interpreted at all.
pub const UNEXPECTED_LOGIN_MESSAGE: &str = "An unexpected error occurred during login.";

/// Credentials sent to the login endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A successful login response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginSuccess {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    /// The issued bearer token.
    pub auth_token: String,
    /// Canonical email of the signed-in principal.
    pub email: String,
    /// Token validity in seconds.
    pub expires_in: i64,
    /// Token scheme, e.g. "Bearer".
    pub token_type: String,
    /// Issue timestamp, ISO 8601.
    pub timestamp: String,
}

#[derive(Debug, Clone, Deserialize)]
struct LoginFailure {
    #[serde(default)]
    #[allow(dead_code)]
    success: bool,
    #[serde(default)]
    error: String,
}

// Success first: a body without the token fields falls through to the
// catch-all failure shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LoginResponse {
    Success(LoginSuccess),
    Failure(LoginFailure),
}

/// Login failures, worded for direct display.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// The server rejected the credentials (HTTP 400/401).
    #[error("Invalid email or password. Please try again.")]
    InvalidCredentials { status: u16 },

    /// The server could not be reached at all.
    #[error("Cannot connect to server. Please check your connection.")]
    Unreachable,

    /// The server itself failed (HTTP 5xx).
    #[error("Server error. Please try again later.")]
    ServerFault { status: u16 },

    /// A well-formed response that still said no.
    #[error("{message}")]
    Rejected { message: String },

    /// Anything else, carrying the best explanation available.
    #[error("{message}")]
    Other { message: String },
}

/// Client for the login endpoint.
pub struct AuthClient {
    client: Client,
    url: String,
}

impl AuthClient {
    /// Creates a client posting to `url` with the default timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: build_client(DEFAULT_TIMEOUT),
            url: url.into(),
        }
    }

    /// Overrides the per-request timeout after construction.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_client(timeout);
        self
    }

    /// Verifies credentials against the server.
    ///
    /// # Errors
    ///
    /// Returns a [`LoginError`] classified per failure mode; the error's
    /// `Display` text is the user-facing message.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginSuccess, LoginError> {
        debug!(url = %self.url, email = %request.email, "verifying credentials");

        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|err| {
                if err.is_connect() || err.is_timeout() {
                    LoginError::Unreachable
                } else {
                    LoginError::Other {
                        message: format!("Network error: {err}"),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body_error = response
                .json::<LoginFailure>()
                .await
                .ok()
                .map(|failure| failure.error)
                .filter(|error| !error.is_empty());
            return Err(classify_login_status(status.as_u16(), body_error));
        }

        match response.json::<LoginResponse>().await {
            Ok(LoginResponse::Success(body)) if body.success => Ok(body),
            Ok(LoginResponse::Success(body)) => {
                // Token present but the server still flagged failure.
                let message = if body.message.is_empty() {
                    "Login failed".to_string()
                } else {
                    body.message
                };
                Err(LoginError::Rejected { message })
            }
            Ok(LoginResponse::Failure(body)) => {
                let message = if body.error.is_empty() {
                    "Login failed".to_string()
                } else {
                    body.error
                };
                Err(LoginError::Rejected { message })
            }
            Err(err) => {
                warn!(%err, "login response did not parse");
                Err(LoginError::Other {
                    message: UNEXPECTED_LOGIN_MESSAGE.to_string(),
                })
            }
        }
    }
}

fn classify_login_status(status: u16, body_error: Option<String>) -> LoginError {
    match status {
        400 | 401 => LoginError::InvalidCredentials { status },
        s if s >= 500 => LoginError::ServerFault { status: s },
        s => LoginError::Other {
            message: body_error.unwrap_or_else(|| format!("Login failed ({s})")),
        },
    }
}
