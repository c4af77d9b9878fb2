//! HTTP answer source backed by the questions endpoint.
//!
//! Sends the question as `{"Question": ...}` with the session's current
//! Authorization header and returns the `answer` field of the response.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use sarathi_core::ApiError;
use sarathi_core::chat::AnswerSource;
use sarathi_core::session::SessionStore;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http::{build_client, classify_transport_error};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct QuestionRequest<'a> {
    // The backend contract spells the field with a capital Q.
    #[serde(rename = "Question")]
    question: &'a str,
}

#[derive(Deserialize)]
struct AnswerResponse {
    answer: String,
}

/// [`AnswerSource`] that forwards questions to the remote backend.
///
/// The Authorization header is read from the session store at send time, so
/// a re-login between questions is picked up without rebuilding the source.
pub struct HttpAnswerSource {
    client: Client,
    url: String,
    session: Arc<SessionStore>,
}

impl HttpAnswerSource {
    /// Creates a source posting to `url` with the default timeout.
    pub fn new(url: impl Into<String>, session: Arc<SessionStore>) -> Self {
        Self {
            client: build_client(DEFAULT_TIMEOUT),
            url: url.into(),
            session,
        }
    }

    /// Overrides the per-request timeout after construction.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_client(timeout);
        self
    }
}

#[async_trait]
impl AnswerSource for HttpAnswerSource {
    async fn answer(&self, question: &str) -> Result<String, ApiError> {
        let request = QuestionRequest { question };
        debug!(url = %self.url, "posting question");

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", self.session.authorization_header())
            .json(&request)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status.as_u16(), body));
        }

        let parsed: AnswerResponse = response.json().await.map_err(|err| {
            ApiError::Unclassified {
                status: Some(status.as_u16()),
                message: format!("malformed answer body: {err}"),
            }
        })?;

        Ok(parsed.answer)
    }
}
