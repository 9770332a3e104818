//! File-based key-value store
//!
//! One file per key inside a data directory. The file holds the raw value
//! string exactly as handed to `set_item`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::trace;

use sw_core::ports::KeyValueStorePort;

pub const STORE_FILE_EXTENSION: &str = "json";

pub struct FileKeyValueStore {
    data_dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// File backing `key`. Characters outside `[A-Za-z0-9._-]` are replaced
    /// with `_`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_stem: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.data_dir
            .join(format!("{file_stem}.{STORE_FILE_EXTENSION}"))
    }

    async fn ensure_data_dir(&self) -> anyhow::Result<()> {
        fs::create_dir_all(&self.data_dir)
            .await
            .with_context(|| format!("Failed to create data dir {}", self.data_dir.display()))
    }
}

#[async_trait]
impl KeyValueStorePort for FileKeyValueStore {
    async fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.path_for(key);
        let present = fs::try_exists(&path)
            .await
            .with_context(|| format!("Failed to stat {}", path.display()))?;
        if !present {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(content))
    }

    async fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.ensure_data_dir().await?;
        let path = self.path_for(key);

        let mut file = fs::File::create(&path)
            .await
            .with_context(|| format!("Failed to create {}", path.display()))?;
        file.write_all(value.as_bytes())
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        file.sync_all()
            .await
            .with_context(|| format!("Failed to sync {}", path.display()))?;

        trace!(key, path = %path.display(), "store item written");
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("Failed to remove {}", path.display())),
        }
    }
}
