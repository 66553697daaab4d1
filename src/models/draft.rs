//! Content Draft
//!
//! The user-entered content and structuring guidance feeding a generation run.

use serde::{Deserialize, Serialize};

/// The user's pasted content plus optional structuring guidance.
///
/// Mutated freely and persisted to the session store on every change; the only
/// downstream validation is the readiness gate's non-emptiness check.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContentDraft {
    /// Raw text, markdown, or structured content to convert into slides
    pub text: String,
    /// Free-form guidance for structuring (tone, emphasis, slide count)
    pub guidance: String,
}

impl ContentDraft {
    /// Create a draft from content and guidance.
    pub fn new(text: impl Into<String>, guidance: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            guidance: guidance.into(),
        }
    }

    /// Whether any non-whitespace content has been entered.
    pub fn has_content(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Number of whitespace-separated words, for the content summary line.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
