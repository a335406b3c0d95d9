//! *Resource fetcher* abstraction: a transport capable of retrieving the
//! static resources of a shard set (the index metadata and the shard files)
//! by location.
//!
//! The index core never talks to a network or filesystem directly; it is
//! handed an `Arc<dyn ResourceFetcher>` and distinguishes three outcomes of a
//! fetch:
//!
//! - `Ok(response)` with [`FetchStatus::Ok`]: the resource body is available.
//! - `Ok(response)` with any other status: the transport answered cleanly but
//!   the resource is absent (sparse shard space) or refused.
//! - `Err(..)`: the fetch itself could not complete (transport failure).

pub mod local_fetcher;
pub mod location;
pub mod memory_fetcher;
pub mod null_fetcher;

#[cfg(feature = "http")]
pub mod http_fetcher;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use osmtext_common::{Result, error::Error};

pub use location::BaseLocation;

/// The `ResourceFetcher` trait represents a read-only "storage service".
///
/// Implementations must map a cleanly missing resource to
/// [`FetchStatus::NotFound`] rather than to an error, and reserve `Err(..)`
/// for failures of the transport itself.
#[async_trait]
pub trait ResourceFetcher: Send + Sync + 'static {
    /// Retrieves the resource at the given location.
    async fn fetch(&self, location: &str) -> Result<FetchResponse>;
}

/// Status of a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Ok,
    NotFound,
    /// Any other non-success answer, carrying the transport-specific code.
    Status(u16),
}

impl std::fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchStatus::Ok => f.write_str("ok"),
            FetchStatus::NotFound => f.write_str("not found"),
            FetchStatus::Status(code) => write!(f, "status {code}"),
        }
    }
}

/// The answer of a [`ResourceFetcher`].
#[derive(Debug, Clone)]
pub struct FetchResponse {
    location: String,
    status: FetchStatus,
    body: Vec<u8>,
}

impl FetchResponse {
    pub fn ok(location: impl Into<String>, body: Vec<u8>) -> FetchResponse {
        FetchResponse {
            location: location.into(),
            status: FetchStatus::Ok,
            body,
        }
    }

    pub fn not_found(location: impl Into<String>) -> FetchResponse {
        FetchResponse {
            location: location.into(),
            status: FetchStatus::NotFound,
            body: Vec::new(),
        }
    }

    pub fn with_status(location: impl Into<String>, code: u16, body: Vec<u8>) -> FetchResponse {
        FetchResponse {
            location: location.into(),
            status: FetchStatus::Status(code),
            body,
        }
    }

    /// The location this response answers.
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    /// Returns `true` if the resource body is available.
    pub fn is_ok(&self) -> bool {
        self.status == FetchStatus::Ok
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// Parses the body as JSON.
    ///
    /// Fails with `ErrorKind::Json` on a malformed body, regardless of the status.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| Error::json(&self.location, e))
    }
}
