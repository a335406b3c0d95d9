//! Client-side prefix index over a static, sharded set of named geographic points.
//!
//! The index is partitioned into many small JSON files, one per *shard key*:
//! the fixed-length prefix of a name token. A search loads exactly the shard its
//! first eligible query token selects, and keeps only that shard in memory.
//!
//! # Overview
//!
//! - [`IndexSession`] owns the configuration (stop words and token length, loaded
//!   once from `index_metadata.json`), the tokenizer and the resident shard.
//! - [`tokenizers::LetterRunTokenizer`] lowercases text and splits it on every
//!   run of non-letter characters. Queries, candidate names and the shard set
//!   writer all use it, so shard selection and matching stay consistent.
//! - [`write::ShardSetWriter`] produces the shard files and metadata a session
//!   reads.
//!
//! Resources are retrieved through an [`osmtext_fetch::ResourceFetcher`], so the
//! core has no dependency on a particular transport.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use osmtext_fetch::local_fetcher::LocalFsFetcher;
//! use osmtext_index::IndexSession;
//!
//! # async fn run() -> osmtext_common::Result<()> {
//! let session = IndexSession::open("names", Arc::new(LocalFsFetcher::new_unscoped()))?;
//! for entry in session.search("mai st").await? {
//!     println!("{} ({}, {})", entry.name, entry.lat, entry.lon);
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod entry;
pub mod read;
mod shard;
pub mod tokenizers;
pub mod write;

pub use config::{
    DEFAULT_MIN_TOKEN_LENGTH, IndexConfig, IndexMetadata, METADATA_FILE_NAME, StopWords,
};
pub use entry::AddressEntry;
pub use read::{
    query::PreparedQuery,
    session::{IndexSession, SessionState},
};
pub use shard::{SHARD_FILE_EXTENSION, ShardKey, ShardSlot};
pub use tokenizers::{LetterRunTokenizer, Tokenizer};
pub use write::{ShardSetWriter, WriteSummary};
