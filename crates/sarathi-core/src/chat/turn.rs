//! Conversation turn types.
//!
//! A transcript is an ordered list of turns; every turn belongs to exactly
//! one speaker and is immutable once appended.

use serde::{Deserialize, Serialize};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// The signed-in user.
    User,
    /// The assistant, whether remote or canned.
    Assistant,
}

/// A single turn in a conversation transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Unique id of the form `turn-<sequence>-<unix millis>`.
    pub id: String,
    /// Who spoke.
    pub speaker: Speaker,
    /// The spoken text, exactly as produced.
    pub text: String,
    /// Timestamp when the turn was created (ISO 8601 format).
    pub created_at: String,
    /// Typing-indicator flag kept for renderers; the controller itself
    /// never appends a pending turn.
    #[serde(default)]
    pub pending: bool,
}

impl Turn {
    /// Whether this turn came from the user.
    pub fn is_user(&self) -> bool {
        self.speaker == Speaker::User
    }

    /// Whether this turn came from the assistant.
    pub fn is_assistant(&self) -> bool {
        self.speaker == Speaker::Assistant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speaker_serializes_lowercase() {
        let turn = Turn {
            id: "turn-1-1700000000000".to_string(),
            speaker: Speaker::Assistant,
            text: "hello".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            pending: false,
        };

        let json = serde_json::to_string(&turn).unwrap();
        assert!(json.contains("\"speaker\":\"assistant\""));

        let back: Turn = serde_json::from_str(&json).unwrap();
        assert!(back.is_assistant());
        assert!(!back.is_user());
    }

    #[test]
    fn pending_defaults_to_false_when_absent() {
        let json = r#"{
            "id": "turn-1-1700000000000",
            "speaker": "user",
            "text": "hi",
            "created_at": "2024-01-01T00:00:00Z"
        }"#;

        let turn: Turn = serde_json::from_str(json).unwrap();
        assert!(!turn.pending);
    }
}
