//! "null" fetcher: a no-op implementation of the `ResourceFetcher` trait.

use async_trait::async_trait;

use osmtext_common::Result;

use crate::{FetchResponse, ResourceFetcher};

/// A null implementation of the `ResourceFetcher` trait.
///
/// Every location is reported as not found. Useful for testing the handling
/// of an empty (or entirely sparse) shard set.
pub struct NullFetcher;

#[async_trait]
impl ResourceFetcher for NullFetcher {
    async fn fetch(&self, location: &str) -> Result<FetchResponse> {
        Ok(FetchResponse::not_found(location))
    }
}
