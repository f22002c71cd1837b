//! JSON file storage implementation.
//!
//! Each profile is a pretty-printed JSON document at
//! `<root>/profiles/<owner>.json`.

use std::path::{Path, PathBuf};
use async_trait::async_trait;
use journey_core::{CurriculumProfile, OwnerId};
use tokio::fs;
use tracing::debug;
use super::{Result, Storage, StorageError};

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Create storage rooted at `root`, creating the directories it needs.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join("profiles")).await?;
        Ok(Self { root })
    }

    /// Storage root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn profile_path(&self, owner: &OwnerId) -> Result<PathBuf> {
        let name = owner.as_str();
        if name.is_empty() || name.starts_with('.') || name.contains(['/', '\\']) {
            return Err(StorageError::Other(format!("Invalid owner name: {:?}", name)));
        }
        Ok(self.root.join("profiles").join(format!("{}.json", name)))
    }
}

#[async_trait]
impl Storage for JsonStorage {
    async fn load(&self, owner: &OwnerId) -> Result<Option<CurriculumProfile>> {
        let Some(profile) = read_json::<CurriculumProfile>(&self.profile_path(owner)?).await? else {
            return Ok(None);
        };
        profile.validate()?;
        debug!("Loaded profile for {}", owner);
        Ok(Some(profile))
    }

    async fn save(&mut self, owner: &OwnerId, profile: &CurriculumProfile) -> Result<()> {
        profile.validate()?;
        let path = self.profile_path(owner)?;
        let json = serde_json::to_string_pretty(profile)?;
        fs::write(&path, json.as_bytes()).await?;
        debug!("Saved profile for {} to {}", owner, path.display());
        Ok(())
    }

    async fn list_owners(&self) -> Result<Vec<OwnerId>> {
        let mut owners = Vec::new();
        let mut rd = fs::read_dir(self.root.join("profiles")).await?;
        while let Some(entry) = rd.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                owners.push(OwnerId::new(stem));
            }
        }
        owners.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Ok(owners)
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
