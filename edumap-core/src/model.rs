use crate::error::DatasetError;
use serde::{Deserialize, Serialize};

/// Canonical institution record. Every source schema is normalized into this
/// shape at the loader boundary; downstream components never see the raw
/// field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// School level, e.g. "University", "Polytechnic".
    pub category: String,
    /// Administrative area (local government area in the source datasets).
    pub area: String,
    pub ownership: String,
    pub year_established: Option<u32>,
    pub image_url: Option<String>,
}

impl LocationRecord {
    pub fn coordinate(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    /// The attribute used to bucket this record's marker.
    pub fn group_key(&self, group_by: GroupBy) -> &str {
        match group_by {
            GroupBy::Category => &self.category,
            GroupBy::Area => &self.area,
        }
    }
}

/// Attribute used to bucket markers for bulk operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupBy {
    Category,
    Area,
}

impl GroupBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::Category => "category",
            GroupBy::Area => "area",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "category" => Some(GroupBy::Category),
            "area" | "lga" => Some(GroupBy::Area),
            _ => None,
        }
    }
}

/// One record as it appears in a source dataset. The published datasets went
/// through several schema revisions (`lat` vs `latitude`, a misspelled
/// `onwership` field, optional `yoe`/`image_url`), so every observed spelling
/// is accepted here and resolved by [`RawRecord::normalize`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    pub name: Option<String>,
    #[serde(alias = "lat")]
    pub latitude: Option<f64>,
    #[serde(alias = "lng", alias = "lon")]
    pub longitude: Option<f64>,
    #[serde(alias = "level", alias = "school_level")]
    pub category: Option<String>,
    #[serde(alias = "lga")]
    pub area: Option<String>,
    #[serde(alias = "onwership")]
    pub ownership: Option<String>,
    #[serde(alias = "yoe")]
    pub year_established: Option<u32>,
    pub image_url: Option<String>,
}

impl RawRecord {
    /// Convert into the canonical shape. A record must carry a non-empty name
    /// and a coordinate pair; the descriptive attributes default to empty
    /// strings when a schema revision omitted them.
    pub fn normalize(self) -> Result<LocationRecord, DatasetError> {
        let name = match self.name {
            Some(n) if !n.trim().is_empty() => n,
            _ => return Err(DatasetError::InvalidRecord("missing name".to_string())),
        };
        let latitude = self
            .latitude
            .ok_or_else(|| DatasetError::InvalidRecord(format!("'{}' has no latitude", name)))?;
        let longitude = self
            .longitude
            .ok_or_else(|| DatasetError::InvalidRecord(format!("'{}' has no longitude", name)))?;

        Ok(LocationRecord {
            name,
            latitude,
            longitude,
            category: self.category.unwrap_or_default(),
            area: self.area.unwrap_or_default(),
            ownership: self.ownership.unwrap_or_default(),
            year_established: self.year_established,
            image_url: self.image_url,
        })
    }
}
