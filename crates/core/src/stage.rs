//! Generation Stage Machine
//!
//! The generation pipeline advances through five fixed stages in order, each
//! committing a progress checkpoint. The machine itself is pure: ordering and
//! checkpoints live here, while timing and the provider call live in the
//! application crate's pipeline controller.

use serde::{Deserialize, Serialize};

/// One named phase of the generation pipeline.
///
/// Stages always run in declaration order; there is no branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Parse the pasted content into workable text
    Parsing,
    /// Structure the content into an outline (provider call happens here)
    Structuring,
    /// Extract template styling (simulated, no PPTX introspection)
    Extracting,
    /// Synthesize slides from the outline (simulated)
    Generating,
    /// Assemble the final artifact descriptor
    Finalizing,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Stage; 5] = [
        Stage::Parsing,
        Stage::Structuring,
        Stage::Extracting,
        Stage::Generating,
        Stage::Finalizing,
    ];

    /// The first stage of every run.
    pub fn first() -> Stage {
        Stage::Parsing
    }

    /// Progress checkpoint committed when this stage is entered, in [0, 100].
    pub fn checkpoint(&self) -> u8 {
        match self {
            Stage::Parsing => 20,
            Stage::Structuring => 40,
            Stage::Extracting => 60,
            Stage::Generating => 80,
            Stage::Finalizing => 100,
        }
    }

    /// The stage that follows this one, or `None` after `Finalizing`.
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::Parsing => Some(Stage::Structuring),
            Stage::Structuring => Some(Stage::Extracting),
            Stage::Extracting => Some(Stage::Generating),
            Stage::Generating => Some(Stage::Finalizing),
            Stage::Finalizing => None,
        }
    }

    /// Whether this is the terminal stage.
    pub fn is_final(&self) -> bool {
        matches!(self, Stage::Finalizing)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Parsing => write!(f, "parsing"),
            Stage::Structuring => write!(f, "structuring"),
            Stage::Extracting => write!(f, "extracting"),
            Stage::Generating => write!(f, "generating"),
            Stage::Finalizing => write!(f, "finalizing"),
        }
    }
}
