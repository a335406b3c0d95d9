//! # Shard Set Writer
//!
//! Builds the static resources an [`crate::IndexSession`] consumes: one JSON
//! file per shard key plus the `index_metadata.json` document.
//!
//! ## Usage Flow
//!
//! 1. Create an [`IndexConfig`](crate::IndexConfig) with the stop words and token length.
//! 2. Create a [`ShardSetWriter`] for an output directory.
//! 3. Call [`ShardSetWriter::push`] for every address, e.g. read with [`input::JsonLines`].
//! 4. Call [`ShardSetWriter::finish`] to flush the remaining shards and write the metadata.
//!
//! Shards accumulate in memory and are flushed to disk whenever the number of
//! pending shards exceeds a threshold. Flushing appends to shard files written
//! by earlier flushes, so inputs larger than memory can be processed.

pub mod input;
pub mod writer;

pub use writer::{ShardSetWriter, WriteSummary};
