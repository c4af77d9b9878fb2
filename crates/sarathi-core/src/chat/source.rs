//! The answer-source seam.

use async_trait::async_trait;

use crate::error::ApiError;

/// Anything that can turn a user question into an answer.
///
/// The conversation controller only ever talks to this trait, so the remote
/// HTTP endpoint and the local canned responder are interchangeable, and
/// tests can drop in sources with scripted behavior.
#[async_trait]
pub trait AnswerSource: Send + Sync {
    /// Produces the answer for a single question.
    ///
    /// # Arguments
    /// * `question` - The question text, already trimmed by the caller
    ///
    /// # Errors
    /// Returns a classified [`ApiError`] when no answer could be produced.
    async fn answer(&self, question: &str) -> Result<String, ApiError>;
}
