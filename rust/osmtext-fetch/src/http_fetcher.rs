//! HTTP(S) `ResourceFetcher` backed by `reqwest`, for shard sets served as
//! static files.

use async_trait::async_trait;

use osmtext_common::{Result, error::Error};

use crate::{FetchResponse, ResourceFetcher};

/// Fetches resources with plain `GET` requests.
///
/// `404 Not Found` maps to [`crate::FetchStatus::NotFound`]; other non-success
/// statuses are reported as-is. Connection and body-read failures are
/// transport errors. No timeout is imposed beyond what the supplied client
/// is configured with.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> HttpFetcher {
        HttpFetcher {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> HttpFetcher {
        HttpFetcher { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, location: &str) -> Result<FetchResponse> {
        let response = self
            .client
            .get(location)
            .send()
            .await
            .map_err(|e| Error::transport(location, e))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(FetchResponse::not_found(location));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::transport(location, e))?
            .to_vec();

        if status.is_success() {
            Ok(FetchResponse::ok(location, body))
        } else {
            Ok(FetchResponse::with_status(location, status.as_u16(), body))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    use crate::{FetchStatus, ResourceFetcher};

    use super::HttpFetcher;

    /// Serves a fixed set of shard set resources over HTTP/1.1.
    async fn start_server() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                tokio::spawn(async move {
                    let mut request = Vec::new();
                    let mut buf = [0u8; 1024];
                    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                        let n = socket.read(&mut buf).await.unwrap();
                        if n == 0 {
                            return;
                        }
                        request.extend_from_slice(&buf[..n]);
                    }
                    let request = String::from_utf8_lossy(&request);
                    let path = request.split_whitespace().nth(1).unwrap_or("/");
                    let (status, body) = match path {
                        "/names/index_metadata.json" => ("200 OK", r#"{"token_length": 3}"#),
                        "/names/mai.json" => ("200 OK", "[]"),
                        "/names/private.json" => ("403 Forbidden", "denied"),
                        _ => ("404 Not Found", "missing"),
                    };
                    let response = format!(
                        "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    socket.write_all(response.as_bytes()).await.unwrap();
                    socket.shutdown().await.ok();
                });
            }
        });
        addr
    }

    #[tokio::test]
    async fn test_http_status_mapping() {
        let addr = start_server().await;
        let fetcher = HttpFetcher::new();

        let response = fetcher
            .fetch(&format!("http://{addr}/names/index_metadata.json"))
            .await
            .unwrap();
        assert!(response.is_ok());
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["token_length"], 3);

        let response = fetcher.fetch(&format!("http://{addr}/names/zzz.json")).await.unwrap();
        assert_eq!(response.status(), FetchStatus::NotFound);
        assert!(response.body().is_empty());

        let response = fetcher
            .fetch(&format!("http://{addr}/names/private.json"))
            .await
            .unwrap();
        assert_eq!(response.status(), FetchStatus::Status(403));
        assert_eq!(response.body(), b"denied");
    }

    #[tokio::test]
    async fn test_http_connection_failure_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = HttpFetcher::new()
            .fetch(&format!("http://{addr}/names/mai.json"))
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert!(err.to_string().contains("mai.json"));
    }
}
