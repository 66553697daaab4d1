//! Generated Artifact
//!
//! The descriptor produced by a completed generation run. Immutable after
//! creation and held until the next run starts.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use slideforge_llm::PresentationStructure;

/// Fallback title used when no provider structure was captured.
pub const DEFAULT_TITLE: &str = "AI Generated Presentation";

/// Fallback summary used when no provider structure was captured.
pub const DEFAULT_SUMMARY: &str = "Professional presentation generated from your content";

/// Fallback speaking duration used when no provider structure was captured.
pub const DEFAULT_DURATION: &str = "15-20 minutes";

/// File name of every generated presentation.
const ARTIFACT_NAME: &str = "Generated_Presentation.pptx";

/// Placeholder size label; no real file is assembled in this core.
const SIZE_LABEL: &str = "2.4 MB";

/// Descriptor for a generated presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedArtifact {
    /// Download file name
    pub name: String,
    /// Number of slides
    pub slide_count: u32,
    /// Human-readable size label
    pub size_label: String,
    /// Presentation title
    pub title: String,
    /// One-paragraph summary
    pub summary: String,
    /// Estimated speaking duration
    pub estimated_duration: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl GeneratedArtifact {
    /// Assemble the artifact from a captured provider structure, falling back
    /// to synthesized values for anything missing.
    ///
    /// The fallback slide count is random in [8, 15]; an empty slide list in
    /// the structure also takes the fallback.
    pub fn from_structure(structure: Option<&PresentationStructure>) -> Self {
        let slide_count = structure
            .map(|s| s.slide_count() as u32)
            .filter(|count| *count > 0)
            .unwrap_or_else(|| rand::thread_rng().gen_range(8..=15));

        let title = structure
            .map(|s| s.title.trim())
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TITLE)
            .to_string();

        let summary = structure
            .and_then(|s| s.summary.as_deref())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_SUMMARY)
            .to_string();

        let estimated_duration = structure
            .and_then(|s| s.estimated_duration.as_deref())
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(DEFAULT_DURATION)
            .to_string();

        Self {
            name: ARTIFACT_NAME.to_string(),
            slide_count,
            size_label: SIZE_LABEL.to_string(),
            title,
            summary,
            estimated_duration,
            created_at: Utc::now(),
        }
    }
}
