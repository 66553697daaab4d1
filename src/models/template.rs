//! Template Models
//!
//! The attached template artifact driving a generation run, and the library
//! records managed by the template collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::format::format_file_size;

/// The PowerPoint template attached to the current session.
///
/// Either a user-uploaded file reference or the synthesized default
/// descriptor. Uploads are opaque byte blobs referenced by name and size; no
/// PPTX parsing is performed. Exactly one artifact may be attached at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateArtifact {
    /// Original file name, including extension
    pub name: String,
    /// File size in bytes
    pub size: u64,
    /// True for the built-in default template descriptor
    pub is_default: bool,
}

impl TemplateArtifact {
    /// Create an artifact for an uploaded file reference.
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            is_default: false,
        }
    }

    /// The built-in default template descriptor.
    pub fn default_template() -> Self {
        Self {
            name: "Default Professional Template.pptx".to_string(),
            size: 2_048_576,
            is_default: true,
        }
    }

    /// Human-readable size label.
    pub fn size_label(&self) -> String {
        format_file_size(self.size)
    }
}

/// One named color extracted from a template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteColor {
    /// Hex color value, e.g. "#1E40AF"
    pub hex: String,
    /// Display name, e.g. "Primary Blue"
    pub name: String,
}

/// A font family and where the template uses it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontFamily {
    /// Font family name
    pub name: String,
    /// Usage description, e.g. "Headings" or "Body Text"
    pub usage: String,
}

/// Extracted styling metadata for a library template.
///
/// Extraction is simulated; these values come from the analysis fixture, not
/// from reading the file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TemplateAnalysis {
    /// Dominant colors
    pub color_palette: Vec<PaletteColor>,
    /// Fonts and their roles
    pub font_families: Vec<FontFamily>,
    /// Named layout patterns found in the deck
    pub layout_patterns: Vec<String>,
    /// Number of slides in the template
    pub slide_count: u32,
    /// Number of distinct colors
    pub color_count: u32,
}

/// A template stored in the library collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRecord {
    /// Unique id within the collection
    pub id: String,
    /// Display name
    pub name: String,
    /// Category slug, e.g. "business"
    pub category: String,
    /// Free-form tags
    pub tags: Vec<String>,
    /// How many presentations have used this template
    pub usage_count: u32,
    /// When the template was uploaded
    pub upload_date: DateTime<Utc>,
    /// File size in bytes
    pub file_size: u64,
    /// Simulated styling analysis
    pub analysis: TemplateAnalysis,
}

impl TemplateRecord {
    /// Case-insensitive substring match against the name or any tag.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle))
    }

    /// A fresh copy of this record: new id, "(Copy)" suffix, zero usage.
    pub fn duplicated(&self, now: DateTime<Utc>) -> TemplateRecord {
        TemplateRecord {
            id: uuid::Uuid::new_v4().to_string(),
            name: format!("{} (Copy)", self.name),
            usage_count: 0,
            upload_date: now,
            ..self.clone()
        }
    }
}
