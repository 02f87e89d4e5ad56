//! Dataset bootstrap.
//!
//! The offline build step publishes three kinds of JSON files: a manifest
//! listing the record chunk files, the chunk files themselves, and the CPV
//! taxonomy. The loader fetches the manifest and taxonomy concurrently, then
//! fetches every chunk with bounded concurrency and concatenates the payloads
//! in manifest order. Datasets can live in a local directory or behind an
//! HTTP(S) base URL. There is no retry: any failed or malformed file fails
//! the whole load, which the CLI surfaces as the single data-load error.

use crate::config::ResolvedConfig;
use crate::errors::{AppError, AppResult};
use crate::models::{CpvNode, Manifest, Record};
use futures::stream::{self, StreamExt, TryStreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use url::Url;

/// Where a pre-built dataset lives.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Base URL the dataset files are served under
    Remote(Url),
    /// Local directory containing the dataset files
    Local(PathBuf),
}

impl DataSource {
    /// Parses a CLI/config source spec. `http://` and `https://` prefixes
    /// select a remote source; anything else is a local directory.
    pub fn parse(spec: &str) -> AppResult<Self> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(AppError::InvalidInput(
                "Data source must not be empty".to_string(),
            ));
        }
        if spec.starts_with("http://") || spec.starts_with("https://") {
            // A trailing slash makes Url::join treat the last segment as a
            // directory instead of replacing it.
            let normalized = if spec.ends_with('/') {
                spec.to_string()
            } else {
                format!("{spec}/")
            };
            Ok(Self::Remote(Url::parse(&normalized)?))
        } else {
            Ok(Self::Local(PathBuf::from(spec)))
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{url}"),
            Self::Local(dir) => write!(f, "{}", dir.display()),
        }
    }
}

/// Everything the browsing session needs, assembled by the loader.
#[derive(Debug, Default)]
pub struct DataSet {
    pub records: Vec<Record>,
    pub nodes: Vec<CpvNode>,
}

/// Loads the full dataset (records + taxonomy) from a source.
pub async fn load_dataset(source: &DataSource, config: &ResolvedConfig) -> AppResult<DataSet> {
    info!(source = %source, "Loading dataset");
    let dataset = match source {
        DataSource::Remote(base) => load_remote(base, config).await?,
        DataSource::Local(dir) => load_local(dir, config).await?,
    };
    info!(
        records = dataset.records.len(),
        cpv_nodes = dataset.nodes.len(),
        "Dataset loaded"
    );
    Ok(dataset)
}

/// Loads only the CPV taxonomy, for commands that never touch the records.
pub async fn load_taxonomy(source: &DataSource, config: &ResolvedConfig) -> AppResult<Vec<CpvNode>> {
    match source {
        DataSource::Remote(base) => {
            let client = reqwest::Client::new();
            fetch_json(&client, base, &config.taxonomy_file).await
        }
        DataSource::Local(dir) => read_json(dir, &config.taxonomy_file).await,
    }
}

async fn load_remote(base: &Url, config: &ResolvedConfig) -> AppResult<DataSet> {
    let client = reqwest::Client::new();

    let (manifest, nodes): (Manifest, Vec<CpvNode>) = tokio::try_join!(
        fetch_json(&client, base, &config.manifest_file),
        fetch_json(&client, base, &config.taxonomy_file),
    )?;
    debug!(chunks = manifest.chunks.len(), "Manifest fetched");

    let concurrency = config.concurrent_fetches.max(1);
    let records = collect_chunks(&manifest, concurrency, |file| {
        let client = client.clone();
        let base = base.clone();
        async move { fetch_json::<Vec<Record>>(&client, &base, &file).await }
    })
    .await?;

    Ok(DataSet { records, nodes })
}

async fn load_local(dir: &Path, config: &ResolvedConfig) -> AppResult<DataSet> {
    let (manifest, nodes): (Manifest, Vec<CpvNode>) = tokio::try_join!(
        read_json(dir, &config.manifest_file),
        read_json(dir, &config.taxonomy_file),
    )?;
    debug!(chunks = manifest.chunks.len(), "Manifest read");

    let concurrency = config.concurrent_fetches.max(1);
    let dir = dir.to_path_buf();
    let records = collect_chunks(&manifest, concurrency, |file| {
        let dir = dir.clone();
        async move { read_json::<Vec<Record>>(&dir, &file).await }
    })
    .await?;

    Ok(DataSet { records, nodes })
}

/// Fetches every chunk named by the manifest with bounded concurrency and
/// concatenates the payloads.
///
/// `buffered` yields results in stream order, so the flattened record list
/// follows manifest order no matter how the fetches interleave; awaiting the
/// whole stream is the join barrier before the session is assembled.
async fn collect_chunks<F, Fut>(
    manifest: &Manifest,
    concurrency: usize,
    fetch: F,
) -> AppResult<Vec<Record>>
where
    F: Fn(String) -> Fut,
    Fut: std::future::Future<Output = AppResult<Vec<Record>>>,
{
    if manifest.chunks.is_empty() {
        return Ok(Vec::new());
    }

    let pb = chunk_progress_bar(manifest.chunks.len() as u64)?;
    let payloads: Vec<Vec<Record>> = stream::iter(manifest.chunks.iter().map(|chunk| {
        let fut = fetch(chunk.file.clone());
        let pb = pb.clone();
        async move {
            let payload = fut.await?;
            pb.inc(1);
            Ok::<_, AppError>(payload)
        }
    }))
    .buffered(concurrency)
    .try_collect()
    .await?;
    pb.finish_and_clear();

    Ok(payloads.into_iter().flatten().collect())
}

async fn fetch_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    base: &Url,
    file: &str,
) -> AppResult<T> {
    let url = base.join(file)?;
    let response = client
        .get(url.as_str())
        .send()
        .await
        .map_err(|e| AppError::NetworkError(format!("Failed to fetch {file}: {e}")))?
        .error_for_status()
        .map_err(|e| AppError::NetworkError(format!("Failed to fetch {file}: {e}")))?;

    response
        .json::<T>()
        .await
        .map_err(|e| AppError::ParseError(format!("Invalid JSON in {file}: {e}")))
}

async fn read_json<T: DeserializeOwned>(dir: &Path, file: &str) -> AppResult<T> {
    let path = dir.join(file);
    let contents = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| AppError::IoError(format!("Failed to read {}: {e}", path.display())))?;

    serde_json::from_str(&contents)
        .map_err(|e| AppError::ParseError(format!("Invalid JSON in {}: {e}", path.display())))
}

fn chunk_progress_bar(total: u64) -> AppResult<ProgressBar> {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} chunks")
            .map_err(|e| {
                AppError::IoError(format!("Failed to create progress bar template: {e}"))
            })?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

#[cfg(test)]
mod tests {
    use super::DataSource;

    #[test]
    fn test_parse_local_directory() {
        let source = DataSource::parse("data/web").unwrap();
        assert!(matches!(source, DataSource::Local(_)));
    }

    #[test]
    fn test_parse_remote_url_gains_trailing_slash() {
        let source = DataSource::parse("https://example.com/data").unwrap();
        match source {
            DataSource::Remote(url) => {
                assert_eq!(url.as_str(), "https://example.com/data/");
                // Joins must extend the path, not replace the last segment.
                assert_eq!(
                    url.join("records_manifest.json").unwrap().as_str(),
                    "https://example.com/data/records_manifest.json"
                );
            }
            other => panic!("Expected remote source, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_remote_url_keeps_existing_slash() {
        let source = DataSource::parse("https://example.com/data/").unwrap();
        match source {
            DataSource::Remote(url) => assert_eq!(url.as_str(), "https://example.com/data/"),
            other => panic!("Expected remote source, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_spec_is_invalid() {
        assert!(DataSource::parse("  ").is_err());
    }

    #[test]
    fn test_parse_invalid_url_is_rejected() {
        assert!(DataSource::parse("https://").is_err());
    }
}
