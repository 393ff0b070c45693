use crate::model::{GroupBy, LocationRecord};
use crate::viewport::{GeoBounds, LatLng, Viewport, fit_bounds};
use std::collections::HashMap;
use tracing::debug;

/// Opaque handle to a rendered marker, issued by the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u64);

/// Popup content shown when a marker is activated. Built from the marker's
/// own record at construction time, so activating a popup can never resolve
/// to a different record than the one it was placed for.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPopup {
    pub title: String,
    pub summary: String,
}

impl MarkerPopup {
    pub fn for_record(record: &LocationRecord) -> Self {
        Self {
            title: record.name.clone(),
            summary: record.category.clone(),
        }
    }
}

/// The rendering seam. The registry drives any widget that can place and
/// remove point markers and move its camera; the terminal canvas is one
/// implementation, test doubles are another.
pub trait MapSurface {
    fn place_marker(&mut self, position: LatLng, popup: MarkerPopup) -> MarkerId;
    fn remove_marker(&mut self, id: MarkerId);
    fn set_viewport(&mut self, viewport: Viewport);
}

/// Bookkeeping for the markers currently on the surface: one entry per
/// displayed record, bucketed under the record's group key. The only reason
/// the buckets exist is bulk clearing before a redraw, which is what keeps
/// a record from ever being rendered twice.
pub struct MarkerRegistry {
    group_by: GroupBy,
    min_zoom: f64,
    max_zoom: f64,
    groups: HashMap<String, Vec<MarkerId>>,
    records: HashMap<MarkerId, LocationRecord>,
}

impl MarkerRegistry {
    pub fn new(group_by: GroupBy, min_zoom: f64, max_zoom: f64) -> Self {
        Self {
            group_by,
            min_zoom,
            max_zoom,
            groups: HashMap::new(),
            records: HashMap::new(),
        }
    }

    /// Render a marker for `record` and file it under the record's group key.
    pub fn add_marker(&mut self, surface: &mut impl MapSurface, record: &LocationRecord) -> MarkerId {
        let (lat, lng) = record.coordinate();
        let id = surface.place_marker(LatLng::new(lat, lng), MarkerPopup::for_record(record));

        self.groups
            .entry(record.group_key(self.group_by).to_string())
            .or_default()
            .push(id);
        self.records.insert(id, record.clone());
        id
    }

    /// Remove every rendered marker and empty the mapping. Must run before
    /// any redraw.
    pub fn clear_all(&mut self, surface: &mut impl MapSurface) {
        for ids in self.groups.values() {
            for &id in ids {
                surface.remove_marker(id);
            }
        }
        self.groups.clear();
        self.records.clear();
    }

    /// Clear-then-add for a filtered record set, then fit the camera to it.
    pub fn redraw<'a>(
        &mut self,
        surface: &mut impl MapSurface,
        records: impl IntoIterator<Item = &'a LocationRecord>,
    ) {
        self.clear_all(surface);
        let mut count = 0;
        for record in records {
            self.add_marker(surface, record);
            count += 1;
        }
        debug!("Redraw placed {} markers", count);
        self.fit_to_bounds(surface);
    }

    /// Pan/zoom the surface to the bounding box of the visible markers,
    /// clamped to the configured zoom range. No-op when nothing is shown.
    pub fn fit_to_bounds(&self, surface: &mut impl MapSurface) {
        let points = self
            .records
            .values()
            .map(|r| LatLng::new(r.latitude, r.longitude));
        if let Some(bounds) = GeoBounds::from_points(points) {
            surface.set_viewport(fit_bounds(&bounds, self.min_zoom, self.max_zoom));
        }
    }

    /// Resolve a marker back to the record it was placed for. This is the
    /// selection path: a popup's action always lands on its own record.
    pub fn record_for(&self, id: MarkerId) -> Option<&LocationRecord> {
        self.records.get(&id)
    }

    pub fn marker_count(&self) -> usize {
        self.records.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn group_sizes(&self) -> impl Iterator<Item = (&str, usize)> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.len()))
    }
}
