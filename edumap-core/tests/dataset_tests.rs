// Tests for dataset loading and schema normalization

use edumap_core::dataset::Dataset;
use edumap_core::model::GroupBy;
use std::io::Write;
use tempfile::NamedTempFile;

// ============================================================================
// Schema Normalization
// ============================================================================

#[test]
fn test_load_current_schema() {
    let json = r#"[
        {
            "name": "University of Ilorin",
            "latitude": 8.4859,
            "longitude": 4.6746,
            "category": "University",
            "area": "Ilorin South",
            "ownership": "Federal",
            "year_established": 1975,
            "image_url": "https://example.com/unilorin.jpg"
        }
    ]"#;

    let dataset = Dataset::from_json_str(json).unwrap();
    assert_eq!(dataset.len(), 1);

    let r = &dataset.records()[0];
    assert_eq!(r.name, "University of Ilorin");
    assert_eq!(r.coordinate(), (8.4859, 4.6746));
    assert_eq!(r.ownership, "Federal");
    assert_eq!(r.year_established, Some(1975));
    assert!(r.image_url.is_some());
}

#[test]
fn test_load_legacy_schema_with_source_typo() {
    // The earliest published dataset: lat/lng, yoe, and a misspelled
    // ownership field
    let json = r#"[
        {
            "name": "Kwara State Polytechnic",
            "lat": 8.5370,
            "lng": 4.5667,
            "category": "Polytechnic",
            "lga": "Ilorin West",
            "onwership": "State",
            "yoe": 1973
        }
    ]"#;

    let dataset = Dataset::from_json_str(json).unwrap();
    assert_eq!(dataset.len(), 1);

    let r = &dataset.records()[0];
    assert_eq!(r.coordinate(), (8.5370, 4.5667));
    assert_eq!(r.area, "Ilorin West");
    assert_eq!(r.ownership, "State");
    assert_eq!(r.year_established, Some(1973));
    assert_eq!(r.image_url, None);
}

#[test]
fn test_mixed_schemas_in_one_file() {
    let json = r#"[
        {"name": "A", "lat": 8.1, "lng": 4.1, "category": "University"},
        {"name": "B", "latitude": 8.2, "longitude": 4.2, "level": "Polytechnic"}
    ]"#;

    let dataset = Dataset::from_json_str(json).unwrap();
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.records()[0].category, "University");
    assert_eq!(dataset.records()[1].category, "Polytechnic");
}

#[test]
fn test_records_missing_identity_or_coordinates_are_skipped() {
    let json = r#"[
        {"name": "Valid", "lat": 8.1, "lng": 4.1},
        {"lat": 8.2, "lng": 4.2},
        {"name": "   ", "lat": 8.3, "lng": 4.3},
        {"name": "No coordinates"},
        {"name": "Also valid", "lat": 8.4, "lng": 4.4}
    ]"#;

    let dataset = Dataset::from_json_str(json).unwrap();
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.records()[0].name, "Valid");
    assert_eq!(dataset.records()[1].name, "Also valid");
}

#[test]
fn test_source_order_is_preserved() {
    let json = r#"[
        {"name": "C", "lat": 8.3, "lng": 4.3},
        {"name": "A", "lat": 8.1, "lng": 4.1},
        {"name": "B", "lat": 8.2, "lng": 4.2}
    ]"#;

    let dataset = Dataset::from_json_str(json).unwrap();
    let names: Vec<&str> = dataset.records().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["C", "A", "B"]);
}

// ============================================================================
// File Loading and Failure Behavior
// ============================================================================

#[test]
fn test_load_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    write!(
        temp_file,
        r#"[{{"name": "Federal Polytechnic Offa", "lat": 8.1460, "lng": 4.7190, "category": "Polytechnic"}}]"#
    )?;

    let dataset = Dataset::load(temp_file.path())?;
    assert_eq!(dataset.len(), 1);
    Ok(())
}

#[test]
fn test_load_malformed_json_is_an_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{{not json").unwrap();

    assert!(Dataset::load(temp_file.path()).is_err());
}

#[test]
fn test_load_or_empty_falls_back_to_empty_dataset() {
    let dataset = Dataset::load_or_empty("/nonexistent/path/institutions.json");
    assert!(dataset.is_empty());

    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "not even json").unwrap();
    let dataset = Dataset::load_or_empty(temp_file.path());
    assert!(dataset.is_empty());
}

// ============================================================================
// Lookup and Statistics
// ============================================================================

fn sample() -> Dataset {
    Dataset::from_json_str(
        r#"[
        {"name": "University of Ilorin", "lat": 8.4859, "lng": 4.6746, "category": "University", "lga": "Ilorin South"},
        {"name": "Kwara State University", "lat": 8.7106, "lng": 4.4784, "category": "University", "lga": "Moro"},
        {"name": "Federal Polytechnic Offa", "lat": 8.1460, "lng": 4.7190, "category": "Polytechnic", "lga": "Offa"}
    ]"#,
    )
    .unwrap()
}

#[test]
fn test_find_by_name_is_case_insensitive_exact() {
    let dataset = sample();

    assert!(dataset.find_by_name("university of ilorin").is_some());
    assert!(dataset.find_by_name("  University of Ilorin  ").is_some());
    // Substrings are search's job, not identity lookup
    assert!(dataset.find_by_name("Ilorin").is_none());
}

#[test]
fn test_group_counts_sorted_by_size() {
    let dataset = sample();

    let by_category = dataset.group_counts(GroupBy::Category);
    assert_eq!(
        by_category,
        vec![("University".to_string(), 2), ("Polytechnic".to_string(), 1)]
    );

    let by_area = dataset.group_counts(GroupBy::Area);
    assert_eq!(by_area.len(), 3);
}
