// src/fetch/mod.rs
use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

use crate::config::DataverseConfig;
use crate::process::{decode_lossy, read_delimited, Era};
use crate::record::CanonicalRecord;

/// Anything that can hand back the raw bytes of a remote file by id.
pub trait Fetch {
    fn fetch(&self, file_id: &str) -> Result<Vec<u8>>;
}

/// Blocking download client for the Dataverse file-access API.
pub struct DataverseClient {
    client: Client,
    base_url: Url,
}

impl DataverseClient {
    pub fn new(cfg: &DataverseConfig) -> Result<Self> {
        let base_url = Url::parse(&cfg.base_url)
            .with_context(|| format!("parsing base URL {}", cfg.base_url))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("base URL {} cannot take path segments", cfg.base_url));
        }
        let client = Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("building HTTP client")?;
        Ok(Self { client, base_url })
    }

    /// `<base_url>/<file_id>`, with the id percent-encoded as one segment.
    pub fn file_url(&self, file_id: &str) -> Result<Url> {
        file_url(&self.base_url, file_id)
    }
}

fn file_url(base: &Url, file_id: &str) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| anyhow!("base URL {} cannot take path segments", base))?
        .pop_if_empty()
        .push(file_id);
    Ok(url)
}

impl Fetch for DataverseClient {
    fn fetch(&self, file_id: &str) -> Result<Vec<u8>> {
        let url = self.file_url(file_id)?;
        let resp = self
            .client
            .get(url.as_str())
            .send()
            .with_context(|| format!("GET {}", url))?
            .error_for_status()?;
        let bytes = resp
            .bytes()
            .with_context(|| format!("reading body from {}", url))?;
        Ok(bytes.to_vec())
    }
}

/// Download `file_id`, decode it lossily and normalize every row as `era`.
#[instrument(level = "info", skip(fetcher))]
pub fn fetch_and_read<F: Fetch + ?Sized>(
    fetcher: &F,
    file_id: &str,
    era: Era,
) -> Result<Vec<CanonicalRecord>> {
    info!("Downloading file ID {} from Dataverse...", file_id);
    let bytes = fetcher.fetch(file_id)?;
    let rows = read_delimited(&decode_lossy(&bytes), era.delimiter(), era)
        .with_context(|| format!("parsing file ID {}", file_id))?;
    info!("File ID {}: {} rows", file_id, rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    struct Canned(&'static [u8]);

    impl Fetch for Canned {
        fn fetch(&self, _file_id: &str) -> Result<Vec<u8>> {
            Ok(self.0.to_vec())
        }
    }

    fn dataverse(base_url: &str) -> DataverseConfig {
        DataverseConfig {
            base_url: base_url.to_string(),
            ..DataverseConfig::default()
        }
    }

    #[test]
    fn test_file_url_appends_segment() -> Result<()> {
        let client = DataverseClient::new(&DataverseConfig::default())?;
        assert_eq!(
            client.file_url("10822959")?.as_str(),
            "https://dataverse.harvard.edu/api/access/datafile/10822959"
        );

        let client = DataverseClient::new(&dataverse("http://localhost:8080/files/"))?;
        assert_eq!(
            client.file_url("42")?.as_str(),
            "http://localhost:8080/files/42"
        );
        Ok(())
    }

    #[test]
    fn test_bad_base_url_is_rejected() {
        assert!(DataverseClient::new(&dataverse("not a url")).is_err());
        assert!(DataverseClient::new(&dataverse("mailto:someone@example.com")).is_err());
    }

    #[test]
    fn test_fetch_uses_era_delimiter() -> Result<()> {
        let tsv = Canned(b"date\tlocality\ttype\tclaims_verbatim\n01/02/2023\tOmaha\tsit-in\tfree speech\n");
        let rows = fetch_and_read(&tsv, "1", Era::Recent)?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, "2023-01-02");
        assert_eq!(rows[0].city, "Omaha");
        assert_eq!(rows[0].claims, "free speech");

        let csv = Canned(b"date,locality,event_type,claims_verbatim\n2025-03-01,Tulsa,march,\"jobs, wages\"\n");
        let rows = fetch_and_read(&csv, "2", Era::Current)?;
        assert_eq!(rows[0].event_type, "march");
        assert_eq!(rows[0].claims, "jobs, wages");
        Ok(())
    }

    #[test]
    fn test_fetch_error_propagates() {
        struct Down;
        impl Fetch for Down {
            fn fetch(&self, file_id: &str) -> Result<Vec<u8>> {
                Err(anyhow!("connection refused for {}", file_id))
            }
        }
        let err = fetch_and_read(&Down, "13448233", Era::Current).unwrap_err();
        assert!(err.to_string().contains("13448233"));
    }
}
