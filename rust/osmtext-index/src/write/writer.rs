use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

use log::debug;

use osmtext_common::{Result, error::Error};

use crate::{
    config::{IndexConfig, METADATA_FILE_NAME},
    entry::AddressEntry,
    shard::ShardKey,
    tokenizers::{LetterRunTokenizer, Tokenizer},
};

/// Number of pending shards above which the writer flushes to disk.
pub const DEFAULT_MAX_PENDING_SHARDS: usize = 10_000;

/// Totals reported by [`ShardSetWriter::finish`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Address entries pushed.
    pub entries: u64,
    /// Entries that were placed in no shard (no eligible token).
    pub unindexed: u64,
    /// Distinct shard files written.
    pub shards: usize,
}

/// Writes a shard set to a directory.
///
/// An entry is placed in the shard of every eligible token of its name (same
/// tokenizer and eligibility rule as the query side), at most once per shard.
pub struct ShardSetWriter {
    output_dir: PathBuf,
    config: IndexConfig,
    tokenizer: LetterRunTokenizer,
    pending: BTreeMap<ShardKey, Vec<AddressEntry>>,
    max_pending_shards: usize,
    written: BTreeSet<ShardKey>,
    summary: WriteSummary,
}

impl ShardSetWriter {
    /// Creates a writer for `output_dir`, creating the directory if needed.
    pub fn new(output_dir: &Path, config: IndexConfig) -> Result<ShardSetWriter> {
        fs::create_dir_all(output_dir)
            .map_err(|e| Error::io(output_dir.display().to_string(), e))?;
        Ok(ShardSetWriter {
            output_dir: output_dir.to_path_buf(),
            config,
            tokenizer: LetterRunTokenizer::new(),
            pending: BTreeMap::new(),
            max_pending_shards: DEFAULT_MAX_PENDING_SHARDS,
            written: BTreeSet::new(),
            summary: WriteSummary::default(),
        })
    }

    pub fn with_max_pending_shards(mut self, max_pending_shards: usize) -> ShardSetWriter {
        self.max_pending_shards = max_pending_shards;
        self
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Returns the shard keys `name` is indexed under, in token order.
    pub fn shard_keys(&self, name: &str) -> Vec<ShardKey> {
        let mut keys: Vec<ShardKey> = Vec::new();
        for token in self.tokenizer.tokens(name) {
            if let Some(key) = self.config.shard_key(&token) {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
        keys
    }

    /// Adds an entry to the shards of its name.
    pub fn push(&mut self, entry: AddressEntry) -> Result<()> {
        self.summary.entries += 1;
        let keys = self.shard_keys(&entry.name);
        if keys.is_empty() {
            self.summary.unindexed += 1;
            return Ok(());
        }
        for key in keys {
            self.pending.entry(key).or_default().push(entry.clone());
        }
        if self.pending.len() > self.max_pending_shards {
            self.flush()?;
        }
        Ok(())
    }

    /// Appends all pending shards to their files.
    pub fn flush(&mut self) -> Result<()> {
        let pending = std::mem::take(&mut self.pending);
        debug!(
            "flushing {} pending shards after {} entries",
            pending.len(),
            self.summary.entries
        );
        for (key, entries) in pending {
            self.append_shard(&key, entries)?;
            self.written.insert(key);
        }
        Ok(())
    }

    /// Flushes the remaining shards and writes the metadata document.
    pub fn finish(mut self) -> Result<WriteSummary> {
        self.flush()?;
        let path = self.output_dir.join(METADATA_FILE_NAME);
        write_json(&path, &self.config.to_metadata())?;
        self.summary.shards = self.written.len();
        Ok(self.summary)
    }

    fn append_shard(&self, key: &ShardKey, entries: Vec<AddressEntry>) -> Result<()> {
        let path = self.output_dir.join(key.file_name());
        let mut shard: Vec<AddressEntry> = if path.exists() {
            let body = fs::read(&path).map_err(|e| Error::io(path.display().to_string(), e))?;
            serde_json::from_slice(&body)
                .map_err(|e| Error::json(path.display().to_string(), e))?
        } else {
            Vec::new()
        };
        shard.extend(entries);
        write_json(&path, &shard)
    }
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let body = serde_json::to_vec_pretty(value)
        .map_err(|e| Error::json(path.display().to_string(), e))?;
    fs::write(path, body).map_err(|e| Error::io(path.display().to_string(), e))
}
