//! Storage configuration.

use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use super::{JsonStorage, RemoteStorage, Result, Storage};

/// Where profiles are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory for the JSON backend
    pub root: PathBuf,

    /// Remote store base URL; takes precedence over `root` when set
    pub remote_url: Option<String>,

    /// Remote request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(".ca-journey"),
            remote_url: None,
            timeout_secs: 30,
        }
    }
}

impl StorageConfig {
    /// Open the configured backend.
    pub async fn open(&self) -> Result<Box<dyn Storage>> {
        match &self.remote_url {
            Some(url) => {
                info!("Using remote store at {}", url);
                let storage = RemoteStorage::new(url, Duration::from_secs(self.timeout_secs))?;
                Ok(Box::new(storage))
            }
            None => {
                info!("Using JSON store at {}", self.root.display());
                Ok(Box::new(JsonStorage::new(&self.root).await?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use journey_core::OwnerId;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.root, PathBuf::from(".ca-journey"));
        assert!(config.remote_url.is_none());
        assert_eq!(config.timeout_secs, 30);
    }

    #[tokio::test]
    async fn test_open_json_backend() {
        let dir = TempDir::new().unwrap();
        let config = StorageConfig {
            root: dir.path().join("store"),
            ..Default::default()
        };
        let storage = config.open().await.unwrap();
        assert!(storage.load(&OwnerId::new("anyone")).await.unwrap().is_none());
        assert!(dir.path().join("store").join("profiles").is_dir());
    }

    #[tokio::test]
    async fn test_open_rejects_bad_remote() {
        let config = StorageConfig {
            remote_url: Some("::".to_string()),
            ..Default::default()
        };
        assert!(config.open().await.is_err());
    }
}
