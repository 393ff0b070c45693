//! Geographic bounds and zoom-to-fit math. Pure functions; the map surface
//! applies the resulting viewport however it renders.

/// A geographic coordinate, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Axis-aligned bounding box over coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl GeoBounds {
    pub fn from_point(p: LatLng) -> Self {
        Self {
            min_lat: p.lat,
            max_lat: p.lat,
            min_lng: p.lng,
            max_lng: p.lng,
        }
    }

    /// Bounding box of a coordinate sequence; `None` when it is empty.
    pub fn from_points(points: impl IntoIterator<Item = LatLng>) -> Option<Self> {
        let mut iter = points.into_iter();
        let mut bounds = Self::from_point(iter.next()?);
        for p in iter {
            bounds.extend(p);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, p: LatLng) {
        self.min_lat = self.min_lat.min(p.lat);
        self.max_lat = self.max_lat.max(p.lat);
        self.min_lng = self.min_lng.min(p.lng);
        self.max_lng = self.max_lng.max(p.lng);
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lng_span(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.min_lat && p.lat <= self.max_lat && p.lng >= self.min_lng && p.lng <= self.max_lng
    }
}

/// A map viewport: where the camera looks and how far in it is. Zoom uses
/// the slippy-map convention (each level halves the visible span).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: f64,
}

impl Viewport {
    pub const fn new(center: LatLng, zoom: f64) -> Self {
        Self { center, zoom }
    }

    pub fn lng_span(&self) -> f64 {
        360.0 / 2f64.powf(self.zoom)
    }

    pub fn lat_span(&self) -> f64 {
        180.0 / 2f64.powf(self.zoom)
    }

    /// Visible bounds under an equirectangular approximation, which is what
    /// the terminal canvas renders.
    pub fn bounds(&self) -> GeoBounds {
        GeoBounds {
            min_lat: self.center.lat - self.lat_span() / 2.0,
            max_lat: self.center.lat + self.lat_span() / 2.0,
            min_lng: self.center.lng - self.lng_span() / 2.0,
            max_lng: self.center.lng + self.lng_span() / 2.0,
        }
    }
}

/// Fraction of extra span kept around a fitted box so boundary markers do
/// not sit on the viewport edge.
const FIT_PADDING: f64 = 1.1;

/// Pan/zoom so `bounds` fits: the deepest zoom whose visible span still
/// covers both (padded) axes of the box, clamped to `[min_zoom, max_zoom]`.
/// A single-point box would zoom without bound, so the max-zoom clamp is
/// what keeps one-result searches sane.
pub fn fit_bounds(bounds: &GeoBounds, min_zoom: f64, max_zoom: f64) -> Viewport {
    let zoom_for_lng = (360.0 / (bounds.lng_span() * FIT_PADDING)).log2();
    let zoom_for_lat = (180.0 / (bounds.lat_span() * FIT_PADDING)).log2();
    let zoom = zoom_for_lng.min(zoom_for_lat).clamp(min_zoom, max_zoom);
    Viewport::new(bounds.center(), zoom)
}
