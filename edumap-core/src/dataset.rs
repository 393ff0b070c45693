use crate::error::Result;
use crate::model::{GroupBy, LocationRecord, RawRecord};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{error, warn};

/// An immutable, ordered collection of institution records, loaded exactly
/// once per view lifetime.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<LocationRecord>,
}

impl Dataset {
    pub fn from_records(records: Vec<LocationRecord>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of raw records, preserving source order. Records
    /// that fail normalization (no name, no coordinates) are skipped with a
    /// warning rather than failing the whole load.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let raw: Vec<RawRecord> = serde_json::from_reader(reader)?;

        let mut records = Vec::with_capacity(raw.len());
        for r in raw {
            match r.normalize() {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping dataset record: {}", e),
            }
        }

        Ok(Self { records })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_reader(json.as_bytes())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load a dataset, reporting any failure to the log and falling back to
    /// an empty dataset. There is no retry; an empty map is the degraded
    /// state the view shows.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(dataset) => dataset,
            Err(e) => {
                error!("Failed to load dataset {}: {}", path.as_ref().display(), e);
                Self::default()
            }
        }
    }

    pub fn records(&self) -> &[LocationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Case-insensitive exact-name lookup. Names are the only identity the
    /// datasets guarantee.
    pub fn find_by_name(&self, name: &str) -> Option<&LocationRecord> {
        self.records
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Record counts per group key, sorted descending by count.
    pub fn group_counts(&self, group_by: GroupBy) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in &self.records {
            *counts.entry(record.group_key(group_by)).or_insert(0) += 1;
        }

        let mut out: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        out
    }
}
