// Tests for bounds accumulation and zoom-to-fit math

use edumap_core::viewport::{GeoBounds, LatLng, Viewport, fit_bounds};

// ============================================================================
// Bounds Accumulation
// ============================================================================

#[test]
fn test_bounds_of_empty_set_is_none() {
    assert_eq!(GeoBounds::from_points(std::iter::empty()), None);
}

#[test]
fn test_bounds_of_single_point() {
    let p = LatLng::new(8.5, 4.6);
    let bounds = GeoBounds::from_points([p]).unwrap();

    assert_eq!(bounds.lat_span(), 0.0);
    assert_eq!(bounds.lng_span(), 0.0);
    assert_eq!(bounds.center(), p);
}

#[test]
fn test_bounds_accumulates_extremes() {
    let bounds = GeoBounds::from_points([
        LatLng::new(8.1, 4.9),
        LatLng::new(8.9, 4.2),
        LatLng::new(8.4, 4.6),
    ])
    .unwrap();

    assert_eq!(bounds.min_lat, 8.1);
    assert_eq!(bounds.max_lat, 8.9);
    assert_eq!(bounds.min_lng, 4.2);
    assert_eq!(bounds.max_lng, 4.9);
    assert!((bounds.center().lat - 8.5).abs() < 1e-12);
    assert!((bounds.center().lng - 4.55).abs() < 1e-12);
}

#[test]
fn test_bounds_contains() {
    let bounds = GeoBounds::from_points([LatLng::new(8.0, 4.0), LatLng::new(9.0, 5.0)]).unwrap();

    assert!(bounds.contains(LatLng::new(8.5, 4.5)));
    assert!(bounds.contains(LatLng::new(8.0, 4.0)));
    assert!(!bounds.contains(LatLng::new(7.9, 4.5)));
    assert!(!bounds.contains(LatLng::new(8.5, 5.1)));
}

// ============================================================================
// Zoom-to-Fit
// ============================================================================

#[test]
fn test_fit_single_point_clamps_to_max_zoom() {
    let bounds = GeoBounds::from_point(LatLng::new(8.4859, 4.6746));
    let viewport = fit_bounds(&bounds, 1.0, 19.0);

    assert_eq!(viewport.zoom, 19.0);
    assert_eq!(viewport.center, LatLng::new(8.4859, 4.6746));
}

#[test]
fn test_fit_wide_bounds_clamps_to_min_zoom() {
    // Half the globe cannot fit below the floor of the zoom range
    let bounds = GeoBounds::from_points([LatLng::new(-60.0, -170.0), LatLng::new(60.0, 170.0)])
        .unwrap();
    let viewport = fit_bounds(&bounds, 2.0, 19.0);

    assert_eq!(viewport.zoom, 2.0);
}

#[test]
fn test_fitted_viewport_contains_the_bounds() {
    let bounds = GeoBounds::from_points([
        LatLng::new(8.1239, 4.4784),
        LatLng::new(8.7106, 5.0834),
    ])
    .unwrap();
    let viewport = fit_bounds(&bounds, 1.0, 19.0);
    let visible = viewport.bounds();

    assert!(visible.contains(LatLng::new(8.1239, 4.4784)));
    assert!(visible.contains(LatLng::new(8.7106, 5.0834)));
    // And it is a fit, not a wide-open camera
    assert!(viewport.zoom > 5.0);
}

#[test]
fn test_deeper_zoom_sees_less() {
    let center = LatLng::new(8.5, 4.6);
    let near = Viewport::new(center, 12.0);
    let far = Viewport::new(center, 8.0);

    assert!(near.lng_span() < far.lng_span());
    assert!(near.lat_span() < far.lat_span());
    assert!((near.bounds().center().lat - far.bounds().center().lat).abs() < 1e-9);
    assert!((near.bounds().center().lng - far.bounds().center().lng).abs() < 1e-9);
}
