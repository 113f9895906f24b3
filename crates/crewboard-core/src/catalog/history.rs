//! Rename history and temporal name resolution.
//!
//! An entity's display name is not a field but a timeline: each
//! [`HistoryRecord`] says "from this date on, the entity is called X".
//! Resolving a name means picking the record in force on a given date.
//!
//! # Tie-break
//!
//! Records sharing the same `from` date keep insertion order, so the record
//! inserted last wins. The fallback for dates before the whole timeline is
//! the chronologically first record, and among records tied on that date the
//! one inserted first.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// The sentinel date for "valid since the beginning of time" (1970-01-01).
///
/// Every default dataset entry is seeded with one record at this date.
pub fn epoch() -> NaiveDate {
    NaiveDate::default()
}

/// Attribute keys that would collide with a record's own fields once the
/// attributes are flattened into it.
pub const RESERVED_ATTRIBUTES: [&str; 2] = ["from", "name"];

/// A dated name snapshot, valid from `from` until a later record takes over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// First day this name is in force
    pub from: NaiveDate,
    /// Display name
    pub name: String,
    /// Extra per-record fields (accounts carry `project`), stored flat
    #[serde(flatten)]
    pub(crate) attributes: BTreeMap<String, serde_json::Value>,
}

impl HistoryRecord {
    pub fn new(from: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            from,
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Adds an attribute, builder style. Reserved keys (`from`, `name`) are
    /// ignored.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        let key = key.into();
        if RESERVED_ATTRIBUTES.contains(&key.as_str()) {
            tracing::warn!(key = %key, "ignoring reserved history attribute");
            return self;
        }
        self.attributes.insert(key, value.into());
        self
    }

    pub fn attributes(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.attributes
    }

    /// The first attribute key that shadows a record field, if any.
    pub fn reserved_attribute(&self) -> Option<&str> {
        self.attributes
            .keys()
            .map(String::as_str)
            .find(|k| RESERVED_ATTRIBUTES.contains(k))
    }

    /// Returns a string attribute, if present and a string.
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(|v| v.as_str())
    }
}

/// Raised when a history would be built with no records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("history must contain at least one record")]
pub struct EmptyHistoryError;

/// A non-empty rename history.
///
/// The first record is held apart from the rest so that emptiness cannot be
/// represented. Persisted as a plain JSON array; an empty array is rejected
/// at deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<HistoryRecord>", into = "Vec<HistoryRecord>")]
pub struct History {
    head: HistoryRecord,
    tail: Vec<HistoryRecord>,
}

impl History {
    /// Creates a history with its initial record.
    pub fn new(initial: HistoryRecord) -> Self {
        Self {
            head: initial,
            tail: Vec::new(),
        }
    }

    /// Creates a history seeded at the epoch, the shape of every default entry.
    pub fn seeded(name: impl Into<String>) -> Self {
        Self::new(HistoryRecord::new(epoch(), name))
    }

    /// Appends a record. No deduplication: a repeated `from` date simply
    /// shadows the earlier record at query time.
    pub fn push(&mut self, record: HistoryRecord) {
        self.tail.push(record);
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryRecord> {
        std::iter::once(&self.head).chain(self.tail.iter())
    }

    pub fn len(&self) -> usize {
        1 + self.tail.len()
    }

    /// Always false; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Records sorted ascending by `from`, ties in insertion order.
    pub fn chronological(&self) -> Vec<&HistoryRecord> {
        let mut records: Vec<&HistoryRecord> = self.iter().collect();
        records.sort_by_key(|r| r.from);
        records
    }

    /// The chronologically first record.
    pub fn earliest(&self) -> &HistoryRecord {
        self.iter()
            .enumerate()
            .min_by_key(|(i, r)| (r.from, *i))
            .map_or(&self.head, |(_, r)| r)
    }

    /// The chronologically last record.
    pub fn latest(&self) -> &HistoryRecord {
        self.iter()
            .enumerate()
            .max_by_key(|(i, r)| (r.from, *i))
            .map_or(&self.head, |(_, r)| r)
    }

    /// The record in force on `date`.
    ///
    /// Falls back to [`History::earliest`] when `date` precedes every record.
    pub fn record_as_of(&self, date: NaiveDate) -> &HistoryRecord {
        self.iter()
            .enumerate()
            .filter(|(_, r)| r.from <= date)
            .max_by_key(|(i, r)| (r.from, *i))
            .map_or_else(|| self.earliest(), |(_, r)| r)
    }
}

impl TryFrom<Vec<HistoryRecord>> for History {
    type Error = EmptyHistoryError;

    fn try_from(records: Vec<HistoryRecord>) -> Result<Self, Self::Error> {
        let mut records = records.into_iter();
        let head = records.next().ok_or(EmptyHistoryError)?;
        Ok(Self {
            head,
            tail: records.collect(),
        })
    }
}

impl From<History> for Vec<HistoryRecord> {
    fn from(history: History) -> Self {
        let mut records = Vec::with_capacity(history.len());
        records.push(history.head);
        records.extend(history.tail);
        records
    }
}

/// Resolves the name an entity carried on `date`.
///
/// Total: always returns a name. Dates before the whole timeline resolve to
/// the earliest record's name.
pub fn resolve_name_as_of(history: &History, date: NaiveDate) -> &str {
    &history.record_as_of(date).name
}

/// Resolves the most recent name, ignoring any reference date.
pub fn resolve_latest_name(history: &History) -> &str {
    &history.latest().name
}
