use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use osmtext_common::{Result, error::Error};

use crate::{FetchResponse, ResourceFetcher, location::parse_absolute_url};

/// A `LocalFsFetcher` implementation that reads resources from the local filesystem,
/// optionally confined to a specified local path.
///
/// A location is either a host path (`/srv/names/mai.json`, `names/mai.json`)
/// or a `file://` URL. How it is interpreted depends on the local filesystem mode.
///
/// In `Passthrough` mode the location is a path on the host filesystem, and the
/// implementation ensures it stays inside the container directory.
///
/// In `VirtualRoot` mode all locations are treated as relative to the container,
/// which becomes a new "virtual root".
///
/// A missing file is reported as [`crate::FetchStatus::NotFound`]; any other
/// I/O failure is a transport error.
pub struct LocalFsFetcher {
    /// The top-level directory for this fetcher, `None` when unscoped.
    container_path: Option<PathBuf>,
    mode: LocalFsMode,
}

impl LocalFsFetcher {
    /// Creates a new `LocalFsFetcher` confined to the given container directory.
    pub fn new(container_path: &Path, mode: LocalFsMode) -> LocalFsFetcher {
        LocalFsFetcher {
            container_path: Some(container_path.to_path_buf()),
            mode,
        }
    }

    /// Creates a new unscoped `LocalFsFetcher`.
    ///
    /// Locations are used as given, relative paths being resolved against the
    /// current directory. This is what the command-line tool uses when pointed
    /// at a shard set directory.
    pub fn new_unscoped() -> LocalFsFetcher {
        LocalFsFetcher {
            container_path: None,
            mode: LocalFsMode::Passthrough,
        }
    }

    /// Returns the file system path of the fetcher's top-level container, if any.
    pub fn container_path(&self) -> Option<&Path> {
        self.container_path.as_deref()
    }

    /// Converts a location (host path or `file://` URL) to a local filesystem path.
    pub fn location_to_path(&self, location: &str) -> Result<PathBuf> {
        let path = match parse_absolute_url(location) {
            Some(url) if url.scheme() == "file" => url.to_file_path().map_err(|()| {
                Error::invalid_arg("location", format!("'{location}' is not a local file url"))
            })?,
            Some(url) => {
                return Err(Error::invalid_arg(
                    "location",
                    format!("unsupported scheme '{}' for local fetcher", url.scheme()),
                ));
            }
            None => PathBuf::from(location),
        };

        if path.components().any(|c| c == Component::ParentDir) {
            return Err(Error::invalid_arg(
                "location",
                format!("'{location}' contains a parent directory reference"),
            ));
        }

        let Some(container) = &self.container_path else {
            return Ok(path);
        };

        match self.mode {
            LocalFsMode::Passthrough => {
                if path.starts_with(container) {
                    Ok(path)
                } else {
                    Err(Error::invalid_arg(
                        "location",
                        format!(
                            "'{location}' is outside of the local fs container {}",
                            container.display()
                        ),
                    ))
                }
            }
            LocalFsMode::VirtualRoot => {
                let relative: PathBuf = path
                    .components()
                    .filter(|c| matches!(c, Component::Normal(_)))
                    .collect();
                Ok(container.join(relative))
            }
        }
    }
}

#[async_trait]
impl ResourceFetcher for LocalFsFetcher {
    async fn fetch(&self, location: &str) -> Result<FetchResponse> {
        let path = self.location_to_path(location)?;
        match tokio::fs::read(&path).await {
            Ok(body) => Ok(FetchResponse::ok(location, body)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(FetchResponse::not_found(location))
            }
            Err(e) => Err(Error::transport(location, e)),
        }
    }
}

/// Local Filesystem Mode: Defines how the local filesystem `ResourceFetcher`
/// implementation interprets locations. There are two available modes:
///
/// 1. **Passthrough**: Locations are treated as physical paths within the host's namespace.
///    The fetcher ensures these paths are confined within the top-level container.
///
/// 2. **VirtualRoot**: Locations are interpreted as being rooted in the fetcher's
///    top-level container, effectively making this container a new "virtual root".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalFsMode {
    Passthrough,
    VirtualRoot,
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use url::Url;

    use crate::{FetchStatus, ResourceFetcher};

    use super::{LocalFsFetcher, LocalFsMode};

    fn create_temp_fs(mode: LocalFsMode) -> (LocalFsFetcher, TempDir) {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("mai.json"), b"[]").unwrap();
        let fetcher = LocalFsFetcher::new(dir.path(), mode);
        (fetcher, dir)
    }

    #[tokio::test]
    async fn test_local_fs_passthrough_mode() {
        let (fetcher, dir) = create_temp_fs(LocalFsMode::Passthrough);

        let path = dir.path().join("mai.json");
        let response = fetcher.fetch(path.to_str().unwrap()).await.unwrap();
        assert!(response.is_ok());
        assert_eq!(response.body(), b"[]");

        let url = Url::from_file_path(&path).unwrap();
        let response = fetcher.fetch(url.as_str()).await.unwrap();
        assert!(response.is_ok());

        let (_other, dir2) = create_temp_fs(LocalFsMode::Passthrough);
        let outside = dir2.path().join("mai.json");
        assert!(fetcher.fetch(outside.to_str().unwrap()).await.is_err());
    }

    #[tokio::test]
    async fn test_local_fs_virtual_root_mode() {
        let (fetcher, _dir) = create_temp_fs(LocalFsMode::VirtualRoot);

        let response = fetcher.fetch("/mai.json").await.unwrap();
        assert!(response.is_ok());
        let response = fetcher.fetch("mai.json").await.unwrap();
        assert!(response.is_ok());
        assert!(fetcher.fetch("../mai.json").await.is_err());
    }

    #[tokio::test]
    async fn test_local_fs_missing_file_is_not_found() {
        let (fetcher, _dir) = create_temp_fs(LocalFsMode::VirtualRoot);
        let response = fetcher.fetch("zzz.json").await.unwrap();
        assert_eq!(response.status(), FetchStatus::NotFound);
    }

    #[tokio::test]
    async fn test_local_fs_directory_is_transport_failure() {
        let (fetcher, dir) = create_temp_fs(LocalFsMode::VirtualRoot);
        std::fs::create_dir(dir.path().join("sub.json")).unwrap();
        let err = fetcher.fetch("sub.json").await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_unscoped_local_fs() {
        let (_scoped, dir) = create_temp_fs(LocalFsMode::Passthrough);
        let fetcher = LocalFsFetcher::new_unscoped();
        assert!(fetcher.container_path().is_none());
        let path = dir.path().join("mai.json");
        let response = fetcher.fetch(path.to_str().unwrap()).await.unwrap();
        assert!(response.is_ok());
        assert!(fetcher.fetch("https://example.org/mai.json").await.is_err());
    }
}
