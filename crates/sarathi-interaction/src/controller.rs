//! The conversation controller.
//!
//! Owns the append-only transcript and runs the submission cycle: accept a
//! user turn, await exactly one answer, append exactly one assistant turn.
//! Failures become assistant turns too, worded by failure class, so the
//! transcript never ends on a dangling question.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use sarathi_core::ApiError;
use sarathi_core::chat::{AnswerSource, Speaker, Turn};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Reply shown when the endpoint rejects the stored token (HTTP 401).
pub const SESSION_EXPIRED_REPLY: &str = "Your session has expired. Please log in again.";
/// Reply shown when the server cannot be reached at all.
pub const UNREACHABLE_REPLY: &str = "Cannot connect to the server. Please check your connection.";
/// Reply shown when the server itself fails (HTTP 5xx).
pub const SERVER_ISSUES_REPLY: &str = "The server is experiencing issues. Please try again later.";
/// Reply shown for any other failure.
pub const GENERIC_FAILURE_REPLY: &str =
    "I apologize, but I encountered an error processing your request.";

/// Outcome of a single submission cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Whitespace-only input; the transcript was not touched.
    Ignored,
    /// The cycle completed and the assistant turn is in the transcript.
    Answered { reply: Turn },
    /// The controller was disposed before the answer landed; the transcript
    /// was left exactly as it was.
    Disposed,
}

/// Mediates between a transcript and an [`AnswerSource`].
///
/// The controller accepts one submission at a time; callers gate on
/// [`is_busy`](Self::is_busy) while a cycle is in flight. Disposing the
/// controller suppresses any in-flight completion without cancelling the
/// underlying request.
pub struct ChatController {
    /// Correlation id for logs.
    id: String,
    /// Ordered conversation history.
    transcript: Arc<RwLock<Vec<Turn>>>,
    /// Where answers come from; remote endpoint or canned responder.
    source: Arc<dyn AnswerSource>,
    /// True from user-turn append until the assistant turn lands.
    busy: AtomicBool,
    /// Monotonic part of turn ids.
    next_seq: AtomicU64,
    /// Set once by `dispose`, never reset.
    disposed: CancellationToken,
}

impl ChatController {
    /// Creates a controller with an empty transcript.
    pub fn new(source: Arc<dyn AnswerSource>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            transcript: Arc::new(RwLock::new(Vec::new())),
            source,
            busy: AtomicBool::new(false),
            next_seq: AtomicU64::new(0),
            disposed: CancellationToken::new(),
        }
    }

    /// Appends an assistant greeting. Call once, before the first exchange.
    pub async fn seed_greeting(&self, text: &str) {
        self.push_turn(Speaker::Assistant, text).await;
    }

    /// Runs one full submission cycle for `input`.
    ///
    /// Whitespace-only input is ignored. Otherwise the raw input is appended
    /// as a user turn, the trimmed question goes to the answer source, and
    /// the outcome (answer or classified failure wording) is appended as the
    /// assistant turn.
    pub async fn submit(&self, input: &str) -> SubmitOutcome {
        if self.disposed.is_cancelled() {
            return SubmitOutcome::Disposed;
        }

        let question = input.trim();
        if question.is_empty() {
            return SubmitOutcome::Ignored;
        }

        self.push_turn(Speaker::User, input).await;
        self.busy.store(true, Ordering::SeqCst);
        debug!(controller = %self.id, "submission accepted, awaiting answer");

        let result = self.source.answer(question).await;

        // A disposed controller must not mutate the transcript, however late
        // the answer arrives.
        if self.disposed.is_cancelled() {
            debug!(controller = %self.id, "answer arrived after disposal, dropping it");
            return SubmitOutcome::Disposed;
        }

        let text = match &result {
            Ok(answer) => answer.clone(),
            Err(error) => {
                warn!(controller = %self.id, %error, "answer call failed");
                Self::reply_for(error).to_string()
            }
        };

        let reply = self.push_turn(Speaker::Assistant, &text).await;
        self.busy.store(false, Ordering::SeqCst);
        SubmitOutcome::Answered { reply }
    }

    /// A snapshot of the transcript in append order.
    pub async fn transcript(&self) -> Vec<Turn> {
        self.transcript.read().await.clone()
    }

    /// Whether a submission cycle is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Marks the controller as torn down.
    ///
    /// Idempotent. Any answer still in flight is dropped on arrival instead
    /// of being appended.
    pub fn dispose(&self) {
        if !self.disposed.is_cancelled() {
            info!(controller = %self.id, "controller disposed");
        }
        self.disposed.cancel();
    }

    /// Whether `dispose` has been called.
    pub fn is_disposed(&self) -> bool {
        self.disposed.is_cancelled()
    }

    /// Correlation id of this controller.
    pub fn id(&self) -> &str {
        &self.id
    }

    fn next_turn_id(&self) -> String {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        format!("turn-{}-{}", seq, chrono::Utc::now().timestamp_millis())
    }

    async fn push_turn(&self, speaker: Speaker, text: &str) -> Turn {
        let turn = Turn {
            id: self.next_turn_id(),
            speaker,
            text: text.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            pending: false,
        };
        self.transcript.write().await.push(turn.clone());
        turn
    }

    fn reply_for(error: &ApiError) -> &'static str {
        match error {
            ApiError::Unauthorized { .. } => SESSION_EXPIRED_REPLY,
            ApiError::Unreachable => UNREACHABLE_REPLY,
            ApiError::ServerFault { .. } => SERVER_ISSUES_REPLY,
            ApiError::Unclassified { .. } => GENERIC_FAILURE_REPLY,
        }
    }
}
