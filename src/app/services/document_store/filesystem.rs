//! Directory-backed document store
//!
//! Each document is a pretty-printed UTF-8 JSON file named after its storage
//! key. Writes go to a temporary file in the same directory and are renamed
//! into place, so readers never observe a half-written document.

use super::{DocumentStore, StoredDocument};
use crate::app::models::{QuoteRecord, StorageKey};
use crate::constants::STORAGE_KEY_SUFFIX;
use crate::{Error, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Document store keeping one JSON file per storage key in a directory
#[derive(Debug, Clone)]
pub struct FilesystemStore {
    root: PathBuf,
}

impl FilesystemStore {
    /// Create a store over `root` without touching the filesystem
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a store over `root`, creating the directory if needed
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(root);
        tokio::fs::create_dir_all(&store.root).await.map_err(|e| {
            Error::io(
                format!("Failed to create store directory {}", store.root.display()),
                e,
            )
        })?;
        info!("Opened document store at {}", store.root.display());
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a document id to a path inside the store root
    fn path_for(&self, id: &str) -> Result<PathBuf> {
        let is_plain_name = !id.is_empty()
            && !id.contains(['/', '\\'])
            && id != "."
            && id != ".."
            && id.ends_with(STORAGE_KEY_SUFFIX);

        if !is_plain_name {
            return Err(Error::store(format!("Invalid document id '{}'", id)));
        }

        Ok(self.root.join(id))
    }
}

impl DocumentStore for FilesystemStore {
    async fn put(&self, key: &StorageKey, record: &QuoteRecord) -> Result<StoredDocument> {
        let path = self.path_for(key.as_str())?;
        let json = serde_json::to_string_pretty(record)
            .map_err(|e| Error::json(format!("Failed to serialize {}", key), e))?;

        let root = self.root.clone();
        let target = path.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut temp = tempfile::NamedTempFile::new_in(&root)
                .map_err(|e| Error::io(format!("Failed to create temp file in {}", root.display()), e))?;
            temp.write_all(json.as_bytes())
                .map_err(|e| Error::io("Failed to write document", e))?;
            temp.persist(&target).map_err(|e| {
                Error::io(format!("Failed to move document into {}", target.display()), e.error)
            })?;
            Ok(())
        })
        .await
        .map_err(|e| Error::store(format!("Write task for {} failed: {}", key, e)))??;

        debug!("Stored {}", path.display());
        Ok(StoredDocument {
            name: key.to_string(),
            id: key.to_string(),
        })
    }

    async fn find(&self, query: &str) -> Result<Vec<StoredDocument>> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(Error::io(
                    format!("Failed to list {}", self.root.display()),
                    e,
                ));
            }
        };

        let mut documents = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if !name.ends_with(STORAGE_KEY_SUFFIX) || !name.contains(query) {
                continue;
            }
            if !entry.file_type().await?.is_file() {
                continue;
            }
            documents.push(StoredDocument {
                id: name.clone(),
                name,
            });
        }

        documents.sort_by(|a, b| a.name.cmp(&b.name));
        debug!("Found {} documents matching '{}'", documents.len(), query);
        Ok(documents)
    }

    async fn load(&self, id: &str) -> Result<QuoteRecord> {
        let path = self.path_for(id)?;
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::document_not_found(id));
            }
            Err(e) => return Err(Error::io(format!("Failed to read {}", path.display()), e)),
        };

        serde_json::from_str(&content)
            .map_err(|e| Error::json(format!("Failed to parse document {}", id), e))
    }
}
