// src/record.rs
use csv::StringRecord;
use serde::{Deserialize, Serialize};

/// Column order of the normalized output file.
pub const FIELDNAMES: [&str; 11] = [
    "date",
    "city",
    "state",
    "event_type",
    "macro_event",
    "size_low",
    "size_high",
    "arrests",
    "lat",
    "lon",
    "claims",
];

/// One protest event in the unified schema.
///
/// Every field is text; an empty string means the source had nothing.
/// Field declaration order is the on-disk column order and must stay in
/// step with [`FIELDNAMES`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// `YYYY-MM-DD`, or empty when the source date was missing or unreadable.
    pub date: String,
    pub city: String,
    pub state: String,
    pub event_type: String,
    pub macro_event: String,
    pub size_low: String,
    pub size_high: String,
    pub arrests: String,
    pub lat: String,
    pub lon: String,
    pub claims: String,
}

/// A single parsed source row, viewed through its file's header.
///
/// Lookups never fail: an unknown column or a short row reads as `""`.
#[derive(Debug, Clone, Copy)]
pub struct RawRecord<'a> {
    headers: &'a StringRecord,
    values: &'a StringRecord,
}

impl<'a> RawRecord<'a> {
    pub fn new(headers: &'a StringRecord, values: &'a StringRecord) -> Self {
        Self { headers, values }
    }

    /// Value under `column`. With a repeated header the last one wins.
    pub fn get(&self, column: &str) -> &'a str {
        self.headers
            .iter()
            .enumerate()
            .filter(|(_, h)| *h == column)
            .last()
            .and_then(|(idx, _)| self.values.get(idx))
            .unwrap_or("")
    }
}
