//! Template Library Integration Tests
//!
//! Filter/sort views over fixtures and the sample catalog, plus collection
//! maintenance (upload, duplicate, delete, bulk delete).

use chrono::{DateTime, Duration, TimeZone, Utc};

use slideforge::models::template::{TemplateAnalysis, TemplateRecord};
use slideforge::services::library::{
    apply, DateRange, SortOrder, TemplateLibrary, TemplateUpload, UsageFilter,
};
use slideforge::{AppError, FilterState};

// ============================================================================
// Helper Functions
// ============================================================================

fn record(
    id: &str,
    name: &str,
    category: &str,
    tags: &[&str],
    usage_count: u32,
    age_days: i64,
    now: DateTime<Utc>,
) -> TemplateRecord {
    TemplateRecord {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        usage_count,
        upload_date: now - Duration::days(age_days),
        file_size: 1_000_000,
        analysis: TemplateAnalysis::default(),
    }
}

fn anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 8, 30, 0, 0, 0).single().unwrap()
}

// ============================================================================
// Filter & Sort
// ============================================================================

#[test]
fn test_search_returns_exactly_the_matching_record() {
    let now = anchor();
    let records = vec![
        record("a", "Quarterly Report", "business", &["finance"], 12, 2, now),
        record("b", "Creative Marketing Deck", "marketing", &["colorful"], 32, 9, now),
        record("c", "Team Offsite", "corporate", &["travel"], 0, 40, now),
    ];

    let filters = FilterState {
        search: "market".to_string(),
        sort_by: SortOrder::Usage,
        ..Default::default()
    };

    let view = apply(&records, &filters, now);
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, "b");
}

#[test]
fn test_name_sort_is_lexicographic() {
    let now = anchor();
    let records = vec![
        record("z", "Zeta", "business", &[], 0, 1, now),
        record("a", "Alpha", "business", &[], 0, 1, now),
        record("m", "Mu", "business", &[], 0, 1, now),
    ];

    let filters = FilterState {
        sort_by: SortOrder::Name,
        ..Default::default()
    };
    let names: Vec<String> = apply(&records, &filters, now)
        .into_iter()
        .map(|record| record.name)
        .collect();
    assert_eq!(names, vec!["Alpha", "Mu", "Zeta"]);
}

#[test]
fn test_combined_predicates_are_anded() {
    let now = anchor();
    let records = vec![
        record("a", "Sales Pitch", "sales", &["pitch"], 40, 3, now),
        record("b", "Sales Onboarding", "sales", &["pitch"], 2, 3, now),
        record("c", "Pitch Workshop", "education", &["pitch"], 50, 3, now),
        record("d", "Sales Archive", "sales", &["pitch"], 90, 200, now),
    ];

    let filters = FilterState {
        search: "pitch".to_string(),
        categories: vec!["sales".to_string()],
        usage_filter: Some(UsageFilter::Frequent),
        date_range: DateRange::Month,
        ..Default::default()
    };

    let view = apply(&records, &filters, now);
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, "a");
}

#[test]
fn test_sample_catalog_date_buckets() {
    let library = TemplateLibrary::with_sample_catalog();
    let now = anchor();

    let today = FilterState {
        date_range: DateRange::Today,
        ..Default::default()
    };
    let view = library.view(&today, now);
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].name, "Creative Agency Portfolio");

    let week = FilterState {
        date_range: DateRange::Week,
        ..Default::default()
    };
    assert_eq!(library.view(&week, now).len(), 3);

    let month = FilterState {
        date_range: DateRange::Month,
        ..Default::default()
    };
    assert_eq!(library.view(&month, now).len(), 6);
}

#[test]
fn test_sample_catalog_usage_sort() {
    let library = TemplateLibrary::with_sample_catalog();
    let filters = FilterState {
        sort_by: SortOrder::Usage,
        ..Default::default()
    };

    let usage: Vec<u32> = library
        .view(&filters, anchor())
        .into_iter()
        .map(|record| record.usage_count)
        .collect();
    assert_eq!(usage, vec![67, 45, 32, 28, 15, 8]);
}

#[test]
fn test_frequent_filter_over_sample_catalog() {
    let library = TemplateLibrary::with_sample_catalog();
    let filters = FilterState {
        usage_filter: Some(UsageFilter::Frequent),
        ..Default::default()
    };

    let view = library.view(&filters, anchor());
    assert_eq!(view.len(), 5);
    assert!(view.iter().all(|record| record.usage_count >= 10));
}

// ============================================================================
// Collection Maintenance
// ============================================================================

#[test]
fn test_upload_duplicate_and_delete_cycle() {
    let mut library = TemplateLibrary::with_sample_catalog();
    let now = anchor();

    let upload = TemplateUpload {
        file_name: "Keynote 2024.pptx".to_string(),
        file_size: 9_000_000,
        name: "Keynote 2024".to_string(),
        category: "business".to_string(),
        tags: "keynote, annual".to_string(),
    };
    let id = library.add_upload(&upload, now).unwrap();
    assert_eq!(library.len(), 7);
    assert_eq!(library.records()[0].id, id);

    let copy_id = library.duplicate(&id, now).unwrap();
    let copy = library.get(&copy_id).unwrap();
    assert_eq!(copy.name, "Keynote 2024 (Copy)");
    assert_eq!(copy.usage_count, 0);

    library.remove(&copy_id).unwrap();
    let removed = library.remove_many(&[id, "1".to_string()]);
    assert_eq!(removed, 2);
    assert_eq!(library.len(), 5);
}

#[test]
fn test_invalid_upload_is_rejected_and_collection_unchanged() {
    let mut library = TemplateLibrary::with_sample_catalog();
    let before: Vec<String> = library
        .records()
        .iter()
        .map(|record| record.id.clone())
        .collect();

    let upload = TemplateUpload {
        file_name: "notes.docx".to_string(),
        file_size: 1024,
        name: "Notes".to_string(),
        category: "business".to_string(),
        tags: String::new(),
    };
    let err = library.add_upload(&upload, anchor()).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let after: Vec<String> = library
        .records()
        .iter()
        .map(|record| record.id.clone())
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_oversized_upload_is_rejected() {
    let mut library = TemplateLibrary::new();
    let upload = TemplateUpload {
        file_name: "huge.pptx".to_string(),
        file_size: 51 * 1024 * 1024,
        name: "Huge".to_string(),
        category: "business".to_string(),
        tags: String::new(),
    };
    assert!(library.add_upload(&upload, anchor()).is_err());
    assert!(library.is_empty());
}
