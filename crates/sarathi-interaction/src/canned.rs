//! Canned keyword responder for offline use.
//!
//! Matches normalized input against a small keyword table, exact phrases
//! first and substring probes second, and picks uniformly among the replies
//! for the matched keyword. A short randomized pause stands in for remote
//! latency so the conversation keeps its rhythm.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use rand::seq::SliceRandom;
use sarathi_core::ApiError;
use sarathi_core::chat::AnswerSource;
use tracing::debug;

/// Greeting the chat surface seeds the transcript with.
pub const GREETING: &str =
    "Hello! I'm Sarathi, your RAG-based intelligence assistant. How can I help you today?";

const HELLO_REPLIES: &[&str] = &[
    GREETING,
    "Hi there! I'm Sarathi. Ask me anything and I'll ground the answer in your documents.",
];

const RAG_REPLIES: &[&str] = &[
    "RAG stands for Retrieval-Augmented Generation. I first retrieve the documents most \
     relevant to your question, then generate an answer grounded in them.",
    "Retrieval-Augmented Generation pairs a document retriever with a language model, so \
     responses are based on your actual documents rather than guesswork.",
];

const SARATHI_REPLIES: &[&str] = &[
    "Sarathi means charioteer. I steer your questions to the right knowledge and bring back \
     accurate, context-aware answers.",
    "Sarathi is a RAG-based intelligence assistant. It answers from your organization's own \
     documents, with citations and source references.",
];

const HELP_REPLIES: &[&str] = &[
    "You can ask me about Sarathi, RAG, or the product features. Short, specific questions \
     work best.",
    "I can explain what Sarathi does, how RAG works, and which features are available. What \
     would you like to know?",
];

const FEATURES_REPLIES: &[&str] = &[
    "Sarathi ships with sub-second retrieval, enterprise-grade security, and analytics to \
     track how your knowledge base is used.",
    "Highlights include context-aware answers, team workspaces with granular permissions, \
     and REST API integration.",
];

const ARJUNA_REPLIES: &[&str] =
    &["Ah, a fellow traveler of the epics! Every Arjuna deserves a trusted sarathi. Consider \
       me yours."];

const CLARIFICATION_REPLIES: &[&str] = &[
    "I'm not sure I understood that. Could you rephrase your question?",
    "I don't have a good answer for that yet. Try asking about Sarathi, RAG, or the features.",
    "Could you put that another way? Short, specific questions work best for me.",
];

/// One entry in the keyword table.
struct CannedRule {
    /// Phrases the whole normalized input may equal.
    exact: &'static [&'static str],
    /// Fragments probed by containment once no exact phrase matched.
    /// Empty for keywords too short to probe safely.
    contains: &'static [&'static str],
    replies: &'static [&'static str],
}

/// Table order is match priority for the containment pass.
const RULES: &[CannedRule] = &[
    CannedRule {
        // "hi" is probed as a raw substring, so it also fires inside words
        // ("which", "sarathi"). The rule sits first either way.
        exact: &["hello"],
        contains: &["hello", "hi"],
        replies: HELLO_REPLIES,
    },
    CannedRule {
        // "rag" as a substring would fire on words like "storage".
        exact: &["rag"],
        contains: &[],
        replies: RAG_REPLIES,
    },
    CannedRule {
        exact: &["sarathi"],
        contains: &["sarathi"],
        replies: SARATHI_REPLIES,
    },
    CannedRule {
        exact: &["help"],
        contains: &["help"],
        replies: HELP_REPLIES,
    },
    CannedRule {
        exact: &["features"],
        contains: &["feature"],
        replies: FEATURES_REPLIES,
    },
    CannedRule {
        exact: &["arjuna"],
        contains: &["arjuna"],
        replies: ARJUNA_REPLIES,
    },
];

/// Local [`AnswerSource`] that needs no server at all.
pub struct CannedResponder {
    delay_ms: (u64, u64),
}

impl CannedResponder {
    /// Creates a responder with the default thinking pause.
    pub fn new() -> Self {
        Self::with_delay_ms(600, 1400)
    }

    /// Creates a responder with an explicit pause range in milliseconds.
    /// Bounds given in the wrong order are swapped.
    pub fn with_delay_ms(min: u64, max: u64) -> Self {
        let delay_ms = if min <= max { (min, max) } else { (max, min) };
        Self { delay_ms }
    }

    fn reply_candidates(input: &str) -> &'static [&'static str] {
        let normalized = input.trim().to_lowercase();

        for rule in RULES {
            if rule.exact.contains(&normalized.as_str()) {
                return rule.replies;
            }
        }

        for rule in RULES {
            if rule.contains.iter().any(|key| normalized.contains(key)) {
                return rule.replies;
            }
        }

        CLARIFICATION_REPLIES
    }
}

impl Default for CannedResponder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnswerSource for CannedResponder {
    async fn answer(&self, question: &str) -> Result<String, ApiError> {
        // Both samples happen before the await; ThreadRng is not Send.
        let (delay, reply) = {
            let mut rng = rand::thread_rng();
            let delay = rng.gen_range(self.delay_ms.0..=self.delay_ms.1);
            let candidates = Self::reply_candidates(question);
            // The tables are never empty.
            let reply = candidates
                .choose(&mut rng)
                .copied()
                .unwrap_or(CLARIFICATION_REPLIES[0]);
            (delay, reply)
        };

        debug!(delay_ms = delay, "serving canned reply");
        tokio::time::sleep(Duration::from_millis(delay)).await;
        Ok(reply.to_string())
    }
}
