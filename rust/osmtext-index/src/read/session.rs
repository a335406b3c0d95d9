//! The client-side search session over a lazily loaded shard set.

use std::sync::{Arc, LazyLock, OnceLock};

use futures::{
    FutureExt,
    future::{BoxFuture, Shared},
};
use log::{debug, trace};
use tokio::sync::Mutex;

use osmtext_common::{Result, async_runtime, error::Error};
use osmtext_fetch::{BaseLocation, ResourceFetcher};

use crate::{
    config::{IndexConfig, METADATA_FILE_NAME},
    entry::AddressEntry,
    read::{matcher::filter_entries, query::PreparedQuery},
    shard::{ShardKey, ShardSlot},
    tokenizers::LetterRunTokenizer,
};

/// Outcome of the one-shot metadata load, shared by every awaiter.
type ConfigOutcome = std::result::Result<Arc<IndexConfig>, Arc<Error>>;

/// Lifecycle of a session's configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The metadata load has not completed yet.
    Initializing,
    /// The configuration is loaded; searches may proceed.
    Ready,
    /// The metadata load failed; every search reports the same failure.
    Failed,
}

/// A search session over the shard set found at a base location.
///
/// Opening a session starts loading `<base>/index_metadata.json` in the
/// background. Every operation needing the configuration awaits that single
/// load; it is never re-run, and its failure is reported to every caller.
///
/// At most one shard is resident at any time. A search whose shard key differs
/// from the resident one fetches `<base>/<key>.json` and replaces the resident
/// shard wholesale; a missing shard file is an empty shard. Overlapping
/// searches are serialized on the shard slot, so a search never observes a
/// shard another search is replacing.
pub struct IndexSession {
    base: BaseLocation,
    fetcher: Arc<dyn ResourceFetcher>,
    tokenizer: LetterRunTokenizer,
    config: Shared<BoxFuture<'static, ConfigOutcome>>,
    outcome: Arc<OnceLock<ConfigOutcome>>,
    shard: Mutex<ShardSlot>,
}

impl IndexSession {
    /// Opens a session and starts loading the index metadata.
    ///
    /// Must be called from within a tokio runtime. Fails only if `base` is not
    /// a valid base location; metadata failures surface from [`Self::search`].
    pub fn open(base: &str, fetcher: Arc<dyn ResourceFetcher>) -> Result<IndexSession> {
        let base = BaseLocation::new(base)?;
        let location = base.resolve(METADATA_FILE_NAME)?;
        let outcome = Arc::new(OnceLock::new());

        let task = async_runtime::spawn({
            let fetcher = Arc::clone(&fetcher);
            let outcome = Arc::clone(&outcome);
            async move {
                let result: ConfigOutcome = load_config(fetcher.as_ref(), &location)
                    .await
                    .map(Arc::new)
                    .map_err(Arc::new);
                let _ = outcome.set(result.clone());
                result
            }
        });

        let config = async move {
            match task.await {
                Ok(result) => result,
                Err(e) => Err(Arc::new(Error::invalid_operation(format!(
                    "index metadata load task: {e}"
                )))),
            }
        }
        .boxed()
        .shared();

        Ok(IndexSession {
            base,
            fetcher,
            tokenizer: LetterRunTokenizer::new(),
            config,
            outcome,
            shard: Mutex::new(ShardSlot::new()),
        })
    }

    pub fn base(&self) -> &BaseLocation {
        &self.base
    }

    /// Waits for the metadata load and returns the configuration.
    ///
    /// Returns immediately once the load has completed.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::Initialization` wrapping the load failure, the same
    /// one for every caller.
    pub async fn ready(&self) -> Result<Arc<IndexConfig>> {
        self.config.clone().await.map_err(Error::initialization)
    }

    /// The configuration in effect, without waiting.
    ///
    /// Until the metadata has loaded (or if it failed to load) this is the
    /// default configuration: no stop words and a minimum token length of 3.
    pub fn config(&self) -> Arc<IndexConfig> {
        static DEFAULT: LazyLock<Arc<IndexConfig>> =
            LazyLock::new(|| Arc::new(IndexConfig::default()));
        match self.outcome.get() {
            Some(Ok(config)) => Arc::clone(config),
            _ => Arc::clone(&DEFAULT),
        }
    }

    pub fn state(&self) -> SessionState {
        match self.outcome.get() {
            None => SessionState::Initializing,
            Some(Ok(_)) => SessionState::Ready,
            Some(Err(_)) => SessionState::Failed,
        }
    }

    /// The key of the resident shard, if any.
    pub async fn active_shard(&self) -> Option<ShardKey> {
        self.shard.lock().await.active_key().cloned()
    }

    /// Returns the key of the shard `query` would be answered from, without
    /// fetching it.
    pub async fn shard_key_for(&self, query: &str) -> Result<ShardKey> {
        let config = self.ready().await?;
        PreparedQuery::new(&self.tokenizer, query).shard_key(&config)
    }

    /// Finds every entry of the shard selected by `query` whose name matches
    /// all query terms.
    ///
    /// # Errors
    ///
    /// - `ErrorKind::Initialization` if the metadata could not be loaded.
    /// - `ErrorKind::InsufficientQuery` if no query token is long enough and
    ///   not a stop word.
    /// - `ErrorKind::Transport` / `ErrorKind::Json` if the shard could not be
    ///   fetched or parsed. The resident shard is left unchanged.
    pub async fn search(&self, query: &str) -> Result<Vec<AddressEntry>> {
        let config = self.ready().await?;
        let query = PreparedQuery::new(&self.tokenizer, query);
        let key = query.shard_key(&config)?;
        trace!("query {:?} tokens {:?} -> shard {key}", query.text(), query.tokens());

        let mut slot = self.shard.lock().await;
        if slot.is_resident(&key) {
            debug!("shard '{key}' already resident");
        } else {
            let entries = self.load_shard(&key).await?;
            slot.replace(key, entries);
        }
        Ok(filter_entries(&self.tokenizer, &query, slot.entries()))
    }

    async fn load_shard(&self, key: &ShardKey) -> Result<Vec<AddressEntry>> {
        let location = self.base.resolve(&key.file_name())?;
        let response = self.fetcher.fetch(&location).await?;
        if !response.is_ok() {
            debug!("shard '{location}' absent ({}), treated as empty", response.status());
            return Ok(Vec::new());
        }
        let entries: Vec<AddressEntry> = response.json()?;
        debug!("loaded shard '{location}' with {} entries", entries.len());
        Ok(entries)
    }
}

async fn load_config(fetcher: &dyn ResourceFetcher, location: &str) -> Result<IndexConfig> {
    let response = fetcher.fetch(location).await?;
    if !response.is_ok() {
        return Err(Error::metadata_unavailable(
            location,
            response.status().to_string(),
        ));
    }
    let config = IndexConfig::from_json(location, response.body())?;
    debug!(
        "loaded index metadata '{location}': token length {}, {} stop words",
        config.min_token_length(),
        config.stop_words().len()
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use osmtext_fetch::{memory_fetcher::MemoryFetcher, null_fetcher::NullFetcher};

    use super::{IndexSession, SessionState};

    #[tokio::test]
    async fn test_open_fetches_metadata_once() {
        let fetcher = Arc::new(MemoryFetcher::new());
        fetcher.insert("address/index_metadata.json", r#"{"token_length": 30}"#);

        let session = IndexSession::open("address", fetcher.clone()).unwrap();
        let config = session.ready().await.unwrap();
        assert_eq!(config.min_token_length(), 30);
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.config().min_token_length(), 30);

        session.ready().await.unwrap();
        assert_eq!(fetcher.requests(), vec!["address/index_metadata.json"]);
    }

    #[tokio::test]
    async fn test_open_rejects_empty_base() {
        assert!(IndexSession::open("", Arc::new(NullFetcher)).is_err());
    }

    #[tokio::test]
    async fn test_missing_metadata_fails_every_caller() {
        let session = IndexSession::open("idx", Arc::new(NullFetcher)).unwrap();
        let first = session.search("main").await.unwrap_err();
        let second = session.search("main").await.unwrap_err();
        assert!(first.to_string().contains("index_metadata.json"));
        assert_eq!(first.to_string(), second.to_string());
        assert_eq!(session.state(), SessionState::Failed);
        assert_eq!(session.config().min_token_length(), 3);
    }

    #[tokio::test]
    async fn test_default_config_is_shared_until_ready() {
        let session = IndexSession::open("idx", Arc::new(NullFetcher)).unwrap();
        assert!(session.ready().await.is_err());
        assert!(Arc::ptr_eq(&session.config(), &session.config()));

        let other = IndexSession::open("other", Arc::new(NullFetcher)).unwrap();
        assert!(Arc::ptr_eq(&session.config(), &other.config()));
    }
}
