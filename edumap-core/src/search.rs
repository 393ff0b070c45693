use crate::model::LocationRecord;
use serde::{Deserialize, Serialize};

/// Record fields a free-text search term is matched against. Which fields
/// are searchable varied between dataset revisions, so the set is
/// configuration rather than a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchField {
    Name,
    Category,
    Area,
}

impl SearchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Name => "name",
            SearchField::Category => "category",
            SearchField::Area => "area",
        }
    }

    fn value<'a>(&self, record: &'a LocationRecord) -> &'a str {
        match self {
            SearchField::Name => &record.name,
            SearchField::Category => &record.category,
            SearchField::Area => &record.area,
        }
    }
}

/// Case-insensitive substring filter over a configured field set.
#[derive(Debug, Clone)]
pub struct SearchFilter {
    fields: Vec<SearchField>,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            fields: vec![SearchField::Name, SearchField::Category, SearchField::Area],
        }
    }
}

impl SearchFilter {
    pub fn with_fields(fields: Vec<SearchField>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[SearchField] {
        &self.fields
    }

    /// Keep the records whose configured fields contain `term`, ignoring
    /// case. The result is an ordered subsequence of `records`; an empty
    /// term is a substring of everything, so it returns the full set and
    /// clearing a search restores the whole map.
    pub fn filter<'a>(&self, records: &'a [LocationRecord], term: &str) -> Vec<&'a LocationRecord> {
        let q = term.to_lowercase();
        records.iter().filter(|r| self.matches(r, &q)).collect()
    }

    fn matches(&self, record: &LocationRecord, lowered_term: &str) -> bool {
        self.fields
            .iter()
            .any(|f| f.value(record).to_lowercase().contains(lowered_term))
    }
}
