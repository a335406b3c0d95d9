//! Index configuration, loaded once per session from the shard set's metadata resource.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use osmtext_common::{Result, error::Error, verify_arg, verify_data};

use crate::{
    shard::ShardKey,
    tokenizers::{char_len, char_prefix},
};

/// Name of the metadata resource under the base location.
pub const METADATA_FILE_NAME: &str = "index_metadata.json";

/// Minimum token length used until the metadata has been loaded.
pub const DEFAULT_MIN_TOKEN_LENGTH: usize = 3;

/// Stop words and minimum token length of a shard set.
///
/// A query token is *eligible* to select a shard iff it has at least
/// `min_token_length` characters and is not a stop word. The shard key is the
/// token's first `min_token_length` characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    stop_words: HashSet<String>,
    min_token_length: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            stop_words: HashSet::new(),
            min_token_length: DEFAULT_MIN_TOKEN_LENGTH,
        }
    }
}

impl IndexConfig {
    /// Creates a configuration from stop words and a minimum token length.
    ///
    /// Stop words are lowercased; empty ones are ignored.
    pub fn new<I, S>(stop_words: I, min_token_length: usize) -> Result<IndexConfig>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        verify_arg!(min_token_length, min_token_length >= 1);
        let stop_words = stop_words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Ok(IndexConfig {
            stop_words,
            min_token_length,
        })
    }

    /// Builds the configuration from a parsed metadata document.
    pub fn from_metadata(metadata: IndexMetadata) -> Result<IndexConfig> {
        let token_length = metadata.token_length;
        verify_data!(
            token_length,
            usize::try_from(token_length).is_ok_and(|len| len >= 1),
            "expected a positive integer, got {token_length}"
        );
        IndexConfig::new(metadata.stopwords.into_words(), token_length as usize)
    }

    /// Parses a metadata document from its JSON body.
    ///
    /// `element` names the resource in error messages.
    pub fn from_json(element: &str, body: &[u8]) -> Result<IndexConfig> {
        let metadata: IndexMetadata =
            serde_json::from_slice(body).map_err(|e| Error::json(element, e))?;
        IndexConfig::from_metadata(metadata)
    }

    /// Converts the configuration back to its metadata document, with sorted stop words.
    pub fn to_metadata(&self) -> IndexMetadata {
        let mut words: Vec<String> = self.stop_words.iter().cloned().collect();
        words.sort();
        IndexMetadata {
            stopwords: StopWords::List(words),
            token_length: self.min_token_length as i64,
        }
    }

    pub fn stop_words(&self) -> &HashSet<String> {
        &self.stop_words
    }

    pub fn min_token_length(&self) -> usize {
        self.min_token_length
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    /// Returns `true` if `token` may select a shard.
    pub fn is_eligible(&self, token: &str) -> bool {
        char_len(token) >= self.min_token_length && !self.is_stop_word(token)
    }

    /// Returns the key of the shard `token` selects, or `None` if it is not eligible.
    pub fn shard_key(&self, token: &str) -> Option<ShardKey> {
        self.is_eligible(token)
            .then(|| ShardKey::new(char_prefix(token, self.min_token_length)))
    }
}

/// The `index_metadata.json` document.
///
/// ```json
/// { "stopwords": ["street", "road"], "token_length": 3 }
/// ```
///
/// `stopwords` may also be a single comma-separated string. Both fields are
/// optional and default to no stop words and a token length of 3.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMetadata {
    #[serde(default)]
    pub stopwords: StopWords,
    #[serde(default = "default_token_length")]
    pub token_length: i64,
}

fn default_token_length() -> i64 {
    DEFAULT_MIN_TOKEN_LENGTH as i64
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StopWords {
    List(Vec<String>),
    Joined(String),
}

impl Default for StopWords {
    fn default() -> Self {
        StopWords::List(Vec::new())
    }
}

impl StopWords {
    pub fn into_words(self) -> Vec<String> {
        match self {
            StopWords::List(words) => words,
            StopWords::Joined(joined) => joined.split(',').map(str::to_owned).collect(),
        }
    }
}
