// src/merge.rs
use anyhow::{Context, Result};
use csv::{Terminator, WriterBuilder};
use std::{fmt, fs::File, io::Write, path::Path};

use crate::record::{CanonicalRecord, FIELDNAMES};

/// Earliest and latest non-empty ISO date in a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub first: String,
    pub last: String,
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.first, self.last)
    }
}

/// ISO dates order lexically the same as chronologically, so plain string
/// comparison is enough. `None` when no record carries a date.
pub fn date_range(records: &[CanonicalRecord]) -> Option<DateRange> {
    let mut dates = records
        .iter()
        .map(|r| r.date.as_str())
        .filter(|d| !d.is_empty());
    let first = dates.next()?;
    let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
    Some(DateRange {
        first: min.to_string(),
        last: max.to_string(),
    })
}

/// Header row plus one line per record, in the order given.
pub fn write_csv<W: Write>(writer: W, records: &[CanonicalRecord]) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_writer(writer);
    // written by hand so an empty dataset still gets its header
    wtr.write_record(FIELDNAMES).context("writing header row")?;
    for (idx, rec) in records.iter().enumerate() {
        wtr.serialize(rec)
            .with_context(|| format!("writing record {}", idx))?;
    }
    wtr.flush().context("flushing CSV writer")?;
    Ok(())
}

/// Overwrite `path` with the merged dataset.
pub fn write_file(path: &Path, records: &[CanonicalRecord]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("creating output file {}", path.display()))?;
    write_csv(file, records).with_context(|| format!("writing {}", path.display()))
}
