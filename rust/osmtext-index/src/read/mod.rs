//! Query-time components of the shard set.
//!
//! # Architecture Overview
//!
//! - **Session**: [`session::IndexSession`] owns the configuration, the tokenizer
//!   and the single resident shard, and exposes `search`.
//! - **Query preparation**: [`query::PreparedQuery`] tokenizes a query once and
//!   derives the shard key from its first eligible token.
//! - **Matching**: [`matcher`] filters the resident shard by prefix-matching
//!   every query term against the tokens of each candidate name.
//!
//! Only the first eligible token selects a shard. All non-empty query tokens,
//! including short ones and stop words, take part in matching.

pub mod matcher;
pub mod query;
pub mod session;
