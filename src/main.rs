use anyhow::{Context, Result};
use ccc_normalize::{
    config::Config,
    fetch::DataverseClient,
    pipeline::{self, PipelineError},
};
use clap::Parser;
use std::{env, path::PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Merge the 2017-2020, 2021-2024 and 2025-present protest event files into
/// one normalized CSV.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// YAML config file; unset keys keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory relative input and output paths resolve against
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Static 2017-2020 compiled CSV
    #[arg(long)]
    historical: Option<PathBuf>,

    /// Merged output CSV
    #[arg(long)]
    output: Option<PathBuf>,

    /// Dataverse file-access endpoint
    #[arg(long)]
    base_url: Option<String>,

    /// Per-download timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

impl Args {
    fn into_config(self) -> Result<Config> {
        let mut cfg = Config::load(self.config.as_deref())?;
        if let Some(p) = self.historical {
            cfg.historical_path = p;
        }
        if let Some(p) = self.output {
            cfg.output_path = p;
        }
        if let Some(u) = self.base_url {
            cfg.dataverse.base_url = u;
        }
        if let Some(t) = self.timeout_secs {
            cfg.dataverse.timeout_secs = t;
        }
        let dir = match self.data_dir {
            Some(d) => d,
            None => env::current_dir().context("resolving current directory")?,
        };
        Ok(cfg.rooted_at(&dir))
    }
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .init();

    let config = Args::parse().into_config()?;
    debug!(?config, "resolved configuration");

    let client = DataverseClient::new(&config.dataverse)?;
    match pipeline::run(&config, &client) {
        Ok(summary) => {
            debug!(?summary, "run complete");
            info!("Done.");
            Ok(())
        }
        Err(err @ PipelineError::Fetch { .. }) => {
            // diagnostics go to stderr; progress logging stays on stdout
            eprintln!("  {}", err);
            std::process::exit(1);
        }
        Err(PipelineError::Other(err)) => Err(err),
    }
}
