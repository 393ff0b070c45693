use crate::model::GroupBy;
use crate::viewport::{LatLng, Viewport};

/// Environment variable carrying the tile provider API key. The key is the
/// only process-wide configuration the view needs.
pub const TILE_API_KEY_ENV: &str = "EDUMAP_TILE_API_KEY";

/// University of Ilorin; the deployed map opens centered here.
pub const DEFAULT_CENTER: LatLng = LatLng::new(8.485_895_7, 4.674_583);

pub const DEFAULT_ZOOM: f64 = 19.0;
pub const MAX_ZOOM: f64 = 19.0;
pub const MIN_ZOOM: f64 = 1.0;

/// Map configuration for one view: where the camera starts, the zoom range,
/// the tile source, and how markers are grouped.
#[derive(Debug, Clone)]
pub struct MapConfig {
    pub center: LatLng,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub tile_url_template: String,
    pub tile_api_key: Option<String>,
    pub attribution: String,
    pub group_by: GroupBy,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            tile_url_template: "https://mt1.google.com/vt/lyrs=s&x={x}&y={y}&z={z}&key={key}"
                .to_string(),
            tile_api_key: None,
            attribution: "Tertiary Institutions in Kwara State".to_string(),
            group_by: GroupBy::Category,
        }
    }
}

impl MapConfig {
    /// Defaults plus the tile API key from the environment, when set.
    pub fn from_env() -> Self {
        Self {
            tile_api_key: std::env::var(TILE_API_KEY_ENV).ok(),
            ..Self::default()
        }
    }

    pub fn with_group_by(mut self, group_by: GroupBy) -> Self {
        self.group_by = group_by;
        self
    }

    pub fn initial_viewport(&self) -> Viewport {
        Viewport::new(self.center, self.zoom)
    }

    /// Expand the tile URL template for one tile coordinate. The key slot is
    /// left empty when no API key is configured.
    pub fn tile_url(&self, x: u32, y: u32, z: u32) -> String {
        self.tile_url_template
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
            .replace("{z}", &z.to_string())
            .replace("{key}", self.tile_api_key.as_deref().unwrap_or(""))
    }
}
