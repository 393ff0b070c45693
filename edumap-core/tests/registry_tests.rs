// Tests for marker registry bookkeeping against a fake surface

use edumap_core::model::{GroupBy, LocationRecord};
use edumap_core::registry::{MapSurface, MarkerId, MarkerPopup, MarkerRegistry};
use edumap_core::search::SearchFilter;
use edumap_core::viewport::{LatLng, Viewport};
use std::collections::HashMap;

/// Minimal surface double: remembers what is currently placed and the last
/// viewport it was told to show.
#[derive(Default)]
struct FakeSurface {
    next_id: u64,
    placed: HashMap<MarkerId, (LatLng, MarkerPopup)>,
    viewport: Option<Viewport>,
    remove_calls: usize,
}

impl MapSurface for FakeSurface {
    fn place_marker(&mut self, position: LatLng, popup: MarkerPopup) -> MarkerId {
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        self.placed.insert(id, (position, popup));
        id
    }

    fn remove_marker(&mut self, id: MarkerId) {
        self.placed.remove(&id);
        self.remove_calls += 1;
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }
}

fn record(name: &str, category: &str, area: &str, lat: f64, lng: f64) -> LocationRecord {
    LocationRecord {
        name: name.to_string(),
        latitude: lat,
        longitude: lng,
        category: category.to_string(),
        area: area.to_string(),
        ownership: "State".to_string(),
        year_established: Some(1975),
        image_url: None,
    }
}

fn sample_records() -> Vec<LocationRecord> {
    vec![
        record("University of Ilorin", "University", "Ilorin South", 8.4859, 4.6746),
        record("Kwara State Polytechnic", "Polytechnic", "Ilorin West", 8.5370, 4.5667),
        record("Federal Polytechnic Offa", "Polytechnic", "Offa", 8.1460, 4.7190),
    ]
}

// ============================================================================
// Add / Clear Invariants
// ============================================================================

#[test]
fn test_add_marker_places_one_marker_per_record() {
    let mut surface = FakeSurface::default();
    let mut registry = MarkerRegistry::new(GroupBy::Category, 1.0, 19.0);

    for r in &sample_records() {
        registry.add_marker(&mut surface, r);
    }

    assert_eq!(registry.marker_count(), 3);
    assert_eq!(surface.placed.len(), 3);
}

#[test]
fn test_markers_bucket_under_group_key() {
    let mut surface = FakeSurface::default();
    let mut registry = MarkerRegistry::new(GroupBy::Category, 1.0, 19.0);

    for r in &sample_records() {
        registry.add_marker(&mut surface, r);
    }

    let sizes: HashMap<String, usize> = registry
        .group_sizes()
        .map(|(k, n)| (k.to_string(), n))
        .collect();
    assert_eq!(sizes.get("University"), Some(&1));
    assert_eq!(sizes.get("Polytechnic"), Some(&2));
}

#[test]
fn test_grouping_by_area() {
    let mut surface = FakeSurface::default();
    let mut registry = MarkerRegistry::new(GroupBy::Area, 1.0, 19.0);

    for r in &sample_records() {
        registry.add_marker(&mut surface, r);
    }

    assert_eq!(registry.group_count(), 3);
}

#[test]
fn test_clear_all_removes_everything() {
    let mut surface = FakeSurface::default();
    let mut registry = MarkerRegistry::new(GroupBy::Category, 1.0, 19.0);

    for r in &sample_records() {
        registry.add_marker(&mut surface, r);
    }
    registry.clear_all(&mut surface);

    assert_eq!(registry.marker_count(), 0);
    assert_eq!(registry.group_count(), 0);
    assert!(surface.placed.is_empty());
    assert_eq!(surface.remove_calls, 3);
}

// ============================================================================
// Redraw Properties
// ============================================================================

#[test]
fn test_redraw_renders_exactly_the_filtered_set() {
    let records = sample_records();
    let mut surface = FakeSurface::default();
    let mut registry = MarkerRegistry::new(GroupBy::Category, 1.0, 19.0);
    let filter = SearchFilter::default();

    registry.redraw(&mut surface, filter.filter(&records, ""));
    assert_eq!(registry.marker_count(), 3);

    let hits = filter.filter(&records, "polytechnic");
    registry.redraw(&mut surface, hits.iter().copied());
    assert_eq!(registry.marker_count(), 2);
    assert_eq!(surface.placed.len(), 2);
}

#[test]
fn test_repeated_redraw_leaves_no_stale_handles() {
    let records = sample_records();
    let mut surface = FakeSurface::default();
    let mut registry = MarkerRegistry::new(GroupBy::Category, 1.0, 19.0);

    for _ in 0..5 {
        registry.redraw(&mut surface, records.iter());
    }

    // Clear-then-add is idempotent: never a duplicate marker for a record
    assert_eq!(registry.marker_count(), records.len());
    assert_eq!(surface.placed.len(), records.len());
}

#[test]
fn test_redraw_with_no_matches_empties_the_surface() {
    let records = sample_records();
    let mut surface = FakeSurface::default();
    let mut registry = MarkerRegistry::new(GroupBy::Category, 1.0, 19.0);

    registry.redraw(&mut surface, records.iter());
    let previous_viewport = surface.viewport;
    registry.redraw(&mut surface, std::iter::empty());

    assert_eq!(registry.marker_count(), 0);
    assert!(surface.placed.is_empty());
    // No bounds to fit; the camera stays where it was
    assert_eq!(surface.viewport, previous_viewport);
}

// ============================================================================
// Selection and Camera
// ============================================================================

#[test]
fn test_marker_resolves_to_its_own_record() {
    let records = sample_records();
    let mut surface = FakeSurface::default();
    let mut registry = MarkerRegistry::new(GroupBy::Category, 1.0, 19.0);

    let mut ids = Vec::new();
    for r in &records {
        ids.push(registry.add_marker(&mut surface, r));
    }

    for (id, r) in ids.iter().zip(records.iter()) {
        assert_eq!(registry.record_for(*id).map(|x| x.name.as_str()), Some(r.name.as_str()));
    }
    assert_eq!(registry.record_for(MarkerId(999)), None);
}

#[test]
fn test_popup_content_comes_from_the_record() {
    let mut surface = FakeSurface::default();
    let mut registry = MarkerRegistry::new(GroupBy::Category, 1.0, 19.0);
    let r = record("Al-Hikmah University", "University", "Ilorin South", 8.4860, 4.6130);

    let id = registry.add_marker(&mut surface, &r);

    let (_, popup) = surface.placed.get(&id).unwrap();
    assert_eq!(popup.title, "Al-Hikmah University");
    assert_eq!(popup.summary, "University");
}

#[test]
fn test_fit_to_bounds_clamps_single_marker_to_max_zoom() {
    let mut surface = FakeSurface::default();
    let mut registry = MarkerRegistry::new(GroupBy::Category, 1.0, 19.0);
    let r = record("University of Ilorin", "University", "Ilorin South", 8.4859, 4.6746);

    registry.redraw(&mut surface, std::iter::once(&r));

    let viewport = surface.viewport.expect("viewport set");
    assert_eq!(viewport.zoom, 19.0);
    assert!((viewport.center.lat - 8.4859).abs() < 1e-9);
    assert!((viewport.center.lng - 4.6746).abs() < 1e-9);
}

#[test]
fn test_fit_to_bounds_covers_all_markers() {
    let records = sample_records();
    let mut surface = FakeSurface::default();
    let mut registry = MarkerRegistry::new(GroupBy::Category, 1.0, 19.0);

    registry.redraw(&mut surface, records.iter());

    let viewport = surface.viewport.expect("viewport set");
    let bounds = viewport.bounds();
    for r in &records {
        assert!(bounds.contains(LatLng::new(r.latitude, r.longitude)));
    }
}
