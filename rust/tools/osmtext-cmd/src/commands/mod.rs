//! Command implementations for osmtext-cmd

use anyhow::{Context, Result};
use std::{fs, path::Path, sync::Arc};

use osmtext_fetch::{
    BaseLocation, ResourceFetcher,
    local_fetcher::{LocalFsFetcher, LocalFsMode},
};
use osmtext_index::IndexSession;

pub mod explain;
pub mod index;
pub mod search;

/// Converts a shard set location given on the command line to a base location.
///
/// URLs are kept as they are. Paths must name an existing directory and are
/// made absolute, with `.` and `..` components resolved.
pub fn resolve_base(path_or_url: &str) -> Result<BaseLocation> {
    let base = BaseLocation::new(path_or_url)
        .with_context(|| format!("Invalid shard set location: {path_or_url}"))?;
    if base.is_url() {
        return Ok(base);
    }

    let path = fs::canonicalize(base.as_str())
        .with_context(|| format!("Shard set directory not found: {path_or_url}"))?;
    let path = path
        .to_str()
        .with_context(|| format!("Path is not valid UTF-8: {}", path.display()))?;
    BaseLocation::new(path).with_context(|| format!("Invalid shard set location: {path}"))
}

/// Picks the fetcher able to read resources under `base`.
pub fn fetcher_for(base: &BaseLocation) -> Result<Arc<dyn ResourceFetcher>> {
    let location = base.as_str();
    if location.starts_with("http://") || location.starts_with("https://") {
        return http_fetcher(location);
    }
    if base.is_url() {
        // file:// URLs; any other scheme is rejected by the fetcher itself.
        return Ok(Arc::new(LocalFsFetcher::new_unscoped()));
    }
    Ok(Arc::new(LocalFsFetcher::new(
        Path::new(location),
        LocalFsMode::Passthrough,
    )))
}

#[cfg(feature = "http")]
fn http_fetcher(_location: &str) -> Result<Arc<dyn ResourceFetcher>> {
    Ok(Arc::new(osmtext_fetch::http_fetcher::HttpFetcher::new()))
}

#[cfg(not(feature = "http"))]
fn http_fetcher(location: &str) -> Result<Arc<dyn ResourceFetcher>> {
    anyhow::bail!("Cannot fetch {location}: osmtext-cmd was built without the `http` feature")
}

/// Opens a search session over the shard set at `path_or_url`.
///
/// Must be called from within the tokio runtime.
pub fn open_session(path_or_url: &str) -> Result<IndexSession> {
    let base = resolve_base(path_or_url)?;
    let fetcher = fetcher_for(&base)?;
    IndexSession::open(base.as_str(), fetcher)
        .with_context(|| format!("Failed to open shard set: {base}"))
}

pub fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .with_context(|| "Failed to start the async runtime")
}
