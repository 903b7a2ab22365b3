// src/process/mod.rs
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use std::{borrow::Cow, fs, path::Path};
use tracing::{debug, info, instrument};

use crate::record::{CanonicalRecord, RawRecord};

pub mod date_parser;
pub mod era;

pub use era::Era;

const UTF8_BOM: char = '\u{feff}';

/// Lossy UTF-8 decoding: invalid sequences become U+FFFD instead of failing.
/// A leading byte-order mark is dropped so the first header name stays clean.
pub fn decode_lossy(bytes: &[u8]) -> Cow<'_, str> {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(s) => Cow::Borrowed(s.strip_prefix(UTF8_BOM).unwrap_or(s)),
        Cow::Owned(mut s) => {
            if s.starts_with(UTF8_BOM) {
                s.drain(..UTF8_BOM.len_utf8());
            }
            Cow::Owned(s)
        }
    }
}

/// Parse delimited text whose first row is the header, normalizing every
/// data row through `era`.
pub fn read_delimited(text: &str, delimiter: u8, era: Era) -> Result<Vec<CanonicalRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true) // short or ragged rows read as missing columns
        .from_reader(text.as_bytes());

    let headers = rdr
        .headers()
        .with_context(|| format!("reading {} header row", era))?
        .clone();
    debug!(era = %era, columns = headers.len(), "parsed header");

    let mut out = Vec::new();
    let mut values = StringRecord::new();
    loop {
        let more = rdr
            .read_record(&mut values)
            .with_context(|| format!("CSV parse error in {} at record {}", era, out.len()))?;
        if !more {
            break;
        }
        out.push(era.normalize(&RawRecord::new(&headers, &values)));
    }
    Ok(out)
}

/// Read the comma-separated file at `path` and normalize it as `era`.
///
/// A missing or unreadable file is an error; there is no fallback.
#[instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_local<P: AsRef<Path>>(path: P, era: Era) -> Result<Vec<CanonicalRecord>> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let rows = read_delimited(&decode_lossy(&bytes), b',', era)
        .with_context(|| format!("parsing {}", path.display()))?;
    info!("{}: {} rows", path.display(), rows.len());
    Ok(rows)
}
