//! The sparse record model shared by every crawl variant.

use indexmap::IndexMap;
use serde::Serialize;

/// Per-competition statistics: competition name -> stat field -> value.
pub type StatsTable = IndexMap<String, IndexMap<String, String>>;

/// A single field value on a record. Almost everything is text; the one
/// structured case is the competition-keyed stats breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Table(StatsTable),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Table(_) => None,
        }
    }
}

/// One crawled entity. The schema is sparse: the key set is whatever the
/// listing row and detail page yielded, in insertion order, and records
/// simply omit fields they never produced.
pub type EntityRecord = IndexMap<String, FieldValue>;

/// Records produced from a single listing page. Empty is a valid result.
pub type PageResult = Vec<EntityRecord>;

/// Accumulated output of one crawl, plus page/row bookkeeping.
#[derive(Debug, Default)]
pub struct CrawlState {
    pub records: Vec<EntityRecord>,
    pub pages_attempted: u32,
    pub pages_succeeded: u32,
    pub pages_skipped: u32,
    pub rows_skipped: u32,
}

impl CrawlState {
    /// True when the crawl produced nothing to persist.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
