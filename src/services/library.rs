//! Template Library
//!
//! The in-memory template collection plus the pure filter/sort pass that
//! produces the ordered views the library page renders. Filtering and sorting
//! never mutate the collection; mutations are explicit operations (upload,
//! duplicate, delete, bulk delete).

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::template::{TemplateAnalysis, TemplateRecord};
use crate::services::analysis::{font, palette, simulated_analysis};
use crate::services::upload::validate_upload;
use crate::utils::error::{AppError, AppResult};

// ============================================================================
// Filter State
// ============================================================================

/// Sort orderings for the library view.
///
/// All sorts are stable; ties keep the collection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Upload date descending
    Recent,
    /// Upload date ascending
    Oldest,
    /// Usage count descending
    Usage,
    /// Name A-Z
    Name,
    /// Name Z-A
    NameDesc,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Recent
    }
}

/// Usage-frequency buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageFilter {
    /// 10 or more uses
    Frequent,
    /// Never used
    Unused,
}

/// Upload-date buckets, measured in whole days before "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    All,
    Today,
    Week,
    Month,
    Quarter,
    Year,
}

impl Default for DateRange {
    fn default() -> Self {
        DateRange::All
    }
}

impl DateRange {
    /// Maximum age in days for this bucket, or `None` for no limit.
    fn max_age_days(&self) -> Option<i64> {
        match self {
            DateRange::All => None,
            DateRange::Today => Some(0),
            DateRange::Week => Some(7),
            DateRange::Month => Some(30),
            DateRange::Quarter => Some(90),
            DateRange::Year => Some(365),
        }
    }
}

/// File-size buckets offered by the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeFilter {
    /// < 5 MB
    Small,
    /// 5-20 MB
    Medium,
    /// > 20 MB
    Large,
}

/// Pure description of the current library view.
///
/// `size_filter` is carried in the state and reset by [`FilterState::clear`],
/// but no size predicate is applied to the view.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Case-insensitive substring match against name or tags
    pub search: String,
    /// View ordering
    pub sort_by: SortOrder,
    /// Category slugs; empty means "all categories"
    pub categories: Vec<String>,
    /// Usage bucket, or `None` to disable
    pub usage_filter: Option<UsageFilter>,
    /// Upload-date bucket
    pub date_range: DateRange,
    /// Size bucket, or `None` to disable
    pub size_filter: Option<SizeFilter>,
}

impl FilterState {
    /// Reset every field to its default.
    pub fn clear(&mut self) {
        *self = FilterState::default();
    }

    /// Whether any narrowing filter is active.
    pub fn is_filtering(&self) -> bool {
        !self.search.is_empty()
            || !self.categories.is_empty()
            || self.usage_filter.is_some()
            || self.date_range != DateRange::All
    }

    /// Whether a record passes every active predicate.
    fn matches(&self, record: &TemplateRecord, now: DateTime<Utc>) -> bool {
        if !self.search.is_empty() && !record.matches_search(&self.search) {
            return false;
        }

        if !self.categories.is_empty() && !self.categories.contains(&record.category) {
            return false;
        }

        match self.usage_filter {
            Some(UsageFilter::Frequent) if record.usage_count < 10 => return false,
            Some(UsageFilter::Unused) if record.usage_count > 0 => return false,
            _ => {}
        }

        if let Some(max_age) = self.date_range.max_age_days() {
            let age_days = now.signed_duration_since(record.upload_date).num_days();
            if age_days > max_age {
                return false;
            }
        }

        true
    }
}

/// Apply the filter predicates and sort ordering to a collection.
///
/// Produces a new ordered view; the input is never mutated. `now` anchors the
/// date-range buckets.
pub fn apply(
    records: &[TemplateRecord],
    filters: &FilterState,
    now: DateTime<Utc>,
) -> Vec<TemplateRecord> {
    let mut view: Vec<TemplateRecord> = records
        .iter()
        .filter(|record| filters.matches(record, now))
        .cloned()
        .collect();

    match filters.sort_by {
        SortOrder::Recent => view.sort_by(|a, b| b.upload_date.cmp(&a.upload_date)),
        SortOrder::Oldest => view.sort_by(|a, b| a.upload_date.cmp(&b.upload_date)),
        SortOrder::Usage => view.sort_by(|a, b| b.usage_count.cmp(&a.usage_count)),
        SortOrder::Name => view.sort_by(|a, b| a.name.cmp(&b.name)),
        SortOrder::NameDesc => view.sort_by(|a, b| b.name.cmp(&a.name)),
    }

    view
}

// ============================================================================
// Upload Payload
// ============================================================================

/// A validated library upload: the file reference plus user-entered metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateUpload {
    /// Uploaded file name, including extension
    pub file_name: String,
    /// Uploaded file size in bytes
    pub file_size: u64,
    /// Display name for the record
    pub name: String,
    /// Category slug
    pub category: String,
    /// Comma-separated tag list
    pub tags: String,
}

impl TemplateUpload {
    fn parsed_tags(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .map(|tag| tag.to_string())
            .collect()
    }
}

// ============================================================================
// Template Library
// ============================================================================

/// The in-memory template collection.
#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    records: Vec<TemplateRecord>,
}

impl TemplateLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a library seeded with the sample catalog.
    pub fn with_sample_catalog() -> Self {
        Self {
            records: sample_catalog(),
        }
    }

    /// All records in collection order.
    pub fn records(&self) -> &[TemplateRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id.
    pub fn get(&self, id: &str) -> Option<&TemplateRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// The filtered, sorted view described by `filters`.
    pub fn view(&self, filters: &FilterState, now: DateTime<Utc>) -> Vec<TemplateRecord> {
        apply(&self.records, filters, now)
    }

    /// Add a validated upload to the front of the collection.
    ///
    /// Returns the id of the new record.
    pub fn add_upload(&mut self, upload: &TemplateUpload, now: DateTime<Utc>) -> AppResult<String> {
        validate_upload(&upload.file_name, upload.file_size)?;

        if upload.name.trim().is_empty() {
            return Err(AppError::validation("Please enter a template name"));
        }
        if upload.category.trim().is_empty() {
            return Err(AppError::validation("Please select a category"));
        }

        let record = TemplateRecord {
            id: Uuid::new_v4().to_string(),
            name: upload.name.trim().to_string(),
            category: upload.category.trim().to_string(),
            tags: upload.parsed_tags(),
            usage_count: 0,
            upload_date: now,
            file_size: upload.file_size,
            analysis: simulated_analysis(),
        };
        let id = record.id.clone();
        self.records.insert(0, record);
        Ok(id)
    }

    /// Duplicate a record to the front of the collection.
    ///
    /// Returns the id of the copy.
    pub fn duplicate(&mut self, id: &str, now: DateTime<Utc>) -> AppResult<String> {
        let source = self
            .get(id)
            .ok_or_else(|| AppError::not_found(format!("Template not found: {}", id)))?;
        let copy = source.duplicated(now);
        let copy_id = copy.id.clone();
        self.records.insert(0, copy);
        Ok(copy_id)
    }

    /// Remove a record by id.
    pub fn remove(&mut self, id: &str) -> AppResult<()> {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        if self.records.len() == before {
            return Err(AppError::not_found(format!("Template not found: {}", id)));
        }
        Ok(())
    }

    /// Remove every record whose id appears in `ids`; returns how many were removed.
    pub fn remove_many(&mut self, ids: &[String]) -> usize {
        let before = self.records.len();
        self.records.retain(|record| !ids.contains(&record.id));
        before - self.records.len()
    }
}

// ============================================================================
// Sample Catalog
// ============================================================================

fn seed_date(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid seed timestamp")
}

fn seed_record(
    id: &str,
    name: &str,
    category: &str,
    tags: [&str; 3],
    usage_count: u32,
    upload_date: DateTime<Utc>,
    file_size: u64,
    analysis: TemplateAnalysis,
) -> TemplateRecord {
    TemplateRecord {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        usage_count,
        upload_date,
        file_size,
        analysis,
    }
}

/// The built-in sample catalog the library ships with.
fn sample_catalog() -> Vec<TemplateRecord> {
    vec![
        seed_record(
            "1",
            "Modern Business Presentation",
            "business",
            ["professional", "corporate", "clean"],
            45,
            seed_date(2024, 8, 15, 10, 30),
            12_500_000,
            TemplateAnalysis {
                color_palette: vec![
                    palette("#1E40AF", "Primary Blue"),
                    palette("#FFFFFF", "White"),
                    palette("#F3F4F6", "Light Gray"),
                    palette("#374151", "Dark Gray"),
                ],
                font_families: vec![font("Inter", "Headings"), font("Open Sans", "Body Text")],
                layout_patterns: vec![
                    "Title Slide".to_string(),
                    "Content with Image".to_string(),
                    "Two Column".to_string(),
                    "Full Image".to_string(),
                ],
                slide_count: 24,
                color_count: 6,
            },
        ),
        seed_record(
            "2",
            "Creative Marketing Deck",
            "marketing",
            ["creative", "colorful", "marketing"],
            32,
            seed_date(2024, 8, 20, 14, 15),
            18_750_000,
            TemplateAnalysis {
                color_palette: vec![
                    palette("#F59E0B", "Amber"),
                    palette("#EF4444", "Red"),
                    palette("#10B981", "Green"),
                    palette("#3B82F6", "Blue"),
                ],
                font_families: vec![font("Poppins", "Headings"), font("Roboto", "Body Text")],
                layout_patterns: vec![
                    "Hero Slide".to_string(),
                    "Stats Grid".to_string(),
                    "Timeline".to_string(),
                    "Call to Action".to_string(),
                ],
                slide_count: 18,
                color_count: 8,
            },
        ),
        seed_record(
            "3",
            "Educational Course Template",
            "education",
            ["education", "learning", "academic"],
            28,
            seed_date(2024, 8, 25, 9, 45),
            8_900_000,
            TemplateAnalysis {
                color_palette: vec![
                    palette("#6366F1", "Indigo"),
                    palette("#FFFFFF", "White"),
                    palette("#F8FAFC", "Slate"),
                    palette("#1F2937", "Gray"),
                ],
                font_families: vec![font("Source Sans Pro", "All Text")],
                layout_patterns: vec![
                    "Lesson Title".to_string(),
                    "Content Blocks".to_string(),
                    "Quiz Slide".to_string(),
                    "Summary".to_string(),
                ],
                slide_count: 30,
                color_count: 4,
            },
        ),
        seed_record(
            "4",
            "Sales Pitch Deck",
            "sales",
            ["sales", "pitch", "revenue"],
            67,
            seed_date(2024, 8, 10, 16, 20),
            15_200_000,
            TemplateAnalysis {
                color_palette: vec![
                    palette("#059669", "Emerald"),
                    palette("#DC2626", "Red"),
                    palette("#FFFFFF", "White"),
                    palette("#111827", "Gray"),
                ],
                font_families: vec![font("Montserrat", "Headings"), font("Lato", "Body Text")],
                layout_patterns: vec![
                    "Problem Statement".to_string(),
                    "Solution Overview".to_string(),
                    "ROI Calculator".to_string(),
                    "Next Steps".to_string(),
                ],
                slide_count: 15,
                color_count: 5,
            },
        ),
        seed_record(
            "5",
            "Minimal Corporate Template",
            "corporate",
            ["minimal", "corporate", "clean"],
            15,
            seed_date(2024, 8, 28, 11, 30),
            6_800_000,
            TemplateAnalysis {
                color_palette: vec![
                    palette("#000000", "Black"),
                    palette("#FFFFFF", "White"),
                    palette("#6B7280", "Gray"),
                ],
                font_families: vec![font("Helvetica", "All Text")],
                layout_patterns: vec![
                    "Title Only".to_string(),
                    "Text Heavy".to_string(),
                    "Image Focus".to_string(),
                    "Data Visualization".to_string(),
                ],
                slide_count: 20,
                color_count: 3,
            },
        ),
        seed_record(
            "6",
            "Creative Agency Portfolio",
            "creative",
            ["creative", "portfolio", "design"],
            8,
            seed_date(2024, 8, 29, 8, 15),
            22_100_000,
            TemplateAnalysis {
                color_palette: vec![
                    palette("#8B5CF6", "Purple"),
                    palette("#F59E0B", "Amber"),
                    palette("#EF4444", "Red"),
                    palette("#10B981", "Green"),
                ],
                font_families: vec![
                    font("Playfair Display", "Headings"),
                    font("Source Sans Pro", "Body Text"),
                ],
                layout_patterns: vec![
                    "Portfolio Grid".to_string(),
                    "Case Study".to_string(),
                    "Before/After".to_string(),
                    "Team Showcase".to_string(),
                ],
                slide_count: 25,
                color_count: 10,
            },
        ),
    ]
}

// ============================================================================
// Tests
// ============================================================================
