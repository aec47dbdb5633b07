//! Ordered, URL-keyed record set used by one aggregation run.
//!
//! The key is the exact URL string. No canonicalisation is applied: two
//! URLs differing only by a trailing slash or query-parameter order are
//! distinct results.

use std::collections::HashSet;

use crate::types::SearchRecord;

/// Records in first-seen order, with at most one record per URL.
#[derive(Debug, Default)]
pub struct CollectedSet {
    records: Vec<SearchRecord>,
    seen: HashSet<String>,
}

impl CollectedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a record with exactly this URL has been collected.
    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    /// Append `record` unless its URL is already present.
    ///
    /// Returns `true` if the record was added.
    pub fn insert(&mut self, record: SearchRecord) -> bool {
        if !self.seen.insert(record.url.clone()) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume the set, yielding records in insertion order.
    pub fn into_records(self) -> Vec<SearchRecord> {
        self.records
    }
}
