//! Chat domain module.
//!
//! # Module Structure
//!
//! - `turn`: Transcript building blocks (`Speaker`, `Turn`)
//! - `source`: The pluggable answer provider (`AnswerSource`)

mod source;
mod turn;

// Re-export public API
pub use source::AnswerSource;
pub use turn::{Speaker, Turn};
