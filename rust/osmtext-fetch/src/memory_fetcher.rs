//! In-memory `ResourceFetcher`, primarily used to exercise index sessions
//! without a filesystem or network.

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
    time::Duration,
};

use async_trait::async_trait;
use serde::Serialize;

use osmtext_common::{Result, error::Error};

use crate::{FetchResponse, ResourceFetcher};

/// A fetcher serving resources from an in-memory map.
///
/// Locations that were never inserted answer `NotFound`. Locations marked with
/// [`MemoryFetcher::fail`] answer with a transport error. Every call is
/// recorded in a request log, in call order.
#[derive(Default)]
pub struct MemoryFetcher {
    resources: Mutex<HashMap<String, FetchResponse>>,
    failing: Mutex<HashSet<String>>,
    requests: Mutex<Vec<String>>,
    latency: Option<Duration>,
}

impl MemoryFetcher {
    pub fn new() -> MemoryFetcher {
        MemoryFetcher::default()
    }

    /// Delays every fetch by `latency` before answering.
    pub fn with_latency(mut self, latency: Duration) -> MemoryFetcher {
        self.latency = Some(latency);
        self
    }

    pub fn insert(&self, location: impl Into<String>, body: impl Into<Vec<u8>>) {
        let location = location.into();
        let response = FetchResponse::ok(location.clone(), body.into());
        self.resources.lock().unwrap().insert(location, response);
    }

    /// Serializes `value` as JSON and serves it at `location`.
    pub fn insert_json<T: Serialize + ?Sized>(
        &self,
        location: impl Into<String>,
        value: &T,
    ) -> Result<()> {
        let location = location.into();
        let body = serde_json::to_vec(value).map_err(|e| Error::json(&location, e))?;
        self.insert(location, body);
        Ok(())
    }

    /// Serves `location` with a non-success status code.
    pub fn insert_status(&self, location: impl Into<String>, code: u16) {
        let location = location.into();
        let response = FetchResponse::with_status(location.clone(), code, Vec::new());
        self.resources.lock().unwrap().insert(location, response);
    }

    /// Makes every subsequent fetch of `location` fail with a transport error.
    pub fn fail(&self, location: impl Into<String>) {
        self.failing.lock().unwrap().insert(location.into());
    }

    /// All requested locations, in call order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of times `location` was requested.
    pub fn request_count(&self, location: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|l| *l == location)
            .count()
    }
}

#[async_trait]
impl ResourceFetcher for MemoryFetcher {
    async fn fetch(&self, location: &str) -> Result<FetchResponse> {
        self.requests.lock().unwrap().push(location.to_string());
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.failing.lock().unwrap().contains(location) {
            return Err(Error::transport(
                location,
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "simulated failure"),
            ));
        }
        let response = self.resources.lock().unwrap().get(location).cloned();
        Ok(response.unwrap_or_else(|| FetchResponse::not_found(location)))
    }
}

#[cfg(test)]
mod tests {
    use crate::{FetchStatus, ResourceFetcher};

    use super::MemoryFetcher;

    #[tokio::test]
    async fn test_memory_fetcher() {
        let fetcher = MemoryFetcher::new();
        fetcher.insert("idx/abc.json", "[]");
        fetcher
            .insert_json("idx/index_metadata.json", &serde_json::json!({"token_length": 3}))
            .unwrap();
        fetcher.insert_status("idx/forbidden.json", 403);
        fetcher.fail("idx/broken.json");

        assert!(fetcher.fetch("idx/abc.json").await.unwrap().is_ok());
        assert!(fetcher.fetch("idx/index_metadata.json").await.unwrap().is_ok());
        assert_eq!(
            fetcher.fetch("idx/zzz.json").await.unwrap().status(),
            FetchStatus::NotFound
        );
        assert_eq!(
            fetcher.fetch("idx/forbidden.json").await.unwrap().status(),
            FetchStatus::Status(403)
        );
        assert!(fetcher.fetch("idx/broken.json").await.unwrap_err().is_transport());

        fetcher.fetch("idx/abc.json").await.unwrap();
        assert_eq!(fetcher.request_count("idx/abc.json"), 2);
        assert_eq!(fetcher.requests().len(), 6);
    }
}
