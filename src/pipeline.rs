// src/pipeline.rs
use anyhow::Context;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

use crate::{
    config::Config,
    fetch::{fetch_and_read, Fetch},
    merge::{date_range, write_file, DateRange},
    process::{read_local, Era},
    record::CanonicalRecord,
};

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A download phase failed; nothing has been written.
    #[error("ERROR downloading {era}: {cause:#}")]
    Fetch { era: Era, cause: anyhow::Error },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub rows_per_era: Vec<(Era, usize)>,
    pub total_rows: usize,
    pub output_path: PathBuf,
    pub date_range: Option<DateRange>,
}

/// Read the historical file, download the two remote eras, then write
/// everything to `config.output_path`, strictly in that order.
///
/// The output file is only touched once all three sources are in memory.
pub fn run<F: Fetch + ?Sized>(config: &Config, fetcher: &F) -> Result<RunSummary, PipelineError> {
    let mut all_rows: Vec<CanonicalRecord> = Vec::new();
    let mut rows_per_era = Vec::with_capacity(Era::ALL.len());

    for era in Era::ALL {
        let rows = match config.files.for_era(era) {
            None => {
                info!("Reading {} static file...", era);
                read_local(&config.historical_path, era)
                    .with_context(|| format!("reading {} static file", era))?
            }
            Some(file_id) => {
                info!("Downloading {} data...", era);
                fetch_and_read(fetcher, file_id, era)
                    .map_err(|cause| PipelineError::Fetch { era, cause })?
            }
        };
        rows_per_era.push((era, rows.len()));
        all_rows.extend(rows);
    }

    info!(
        "Writing {} rows to {}...",
        all_rows.len(),
        config.output_path.display()
    );
    write_file(&config.output_path, &all_rows)?;

    let range = date_range(&all_rows);
    match &range {
        Some(r) => info!("Date range: {}", r),
        None => info!("Date range: no dates found"),
    }

    Ok(RunSummary {
        rows_per_era,
        total_rows: all_rows.len(),
        output_path: config.output_path.clone(),
        date_range: range,
    })
}
