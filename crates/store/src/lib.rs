pub mod error;
pub mod stored;

pub use error::ResolveError;
pub use stored::StoredFile;

use anyhow::{Context, Result};
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// Document storage rooted at an upload directory.
///
/// Uploads are written as `<id>_<name>` and registered in an in-memory
/// `id -> path` index, so resolution is an exact lookup for anything stored
/// through this process. Files that were already on disk at startup are only
/// reachable through the substring fallback in [`DocumentStore::resolve`].
pub struct DocumentStore {
    root: PathBuf,
    index: DashMap<String, PathBuf>,
}

impl DocumentStore {
    /// Open a store, creating the upload directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .await
            .with_context(|| format!("failed to create upload directory {:?}", root))?;

        Ok(Self {
            root,
            index: DashMap::new(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist a document and register its identifier.
    pub async fn store(&self, name: &str, content: &str) -> Result<StoredFile> {
        let id = Uuid::new_v4().to_string();
        let file_name = format!("{}_{}", id, stored::sanitize_name(name));
        let path = self.root.join(&file_name);

        fs::write(&path, content)
            .await
            .with_context(|| format!("failed to write document {:?}", path))?;

        self.index.insert(id.clone(), path.clone());
        tracing::info!(file_id = %id, name = %file_name, "stored document");

        Ok(StoredFile {
            id,
            name: name.to_string(),
            path,
        })
    }

    /// Names of all currently stored files, sorted.
    pub async fn list(&self) -> Result<Vec<String>, ResolveError> {
        let mut entries = fs::read_dir(&self.root).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            if entry.path().is_file() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }

        // Directory order is filesystem-dependent; sort so scans are stable.
        names.sort();
        Ok(names)
    }

    /// Resolve a file identifier to the path of its stored document.
    ///
    /// The upload-time index is authoritative. The substring scan only covers
    /// files that predate this process, and it refuses to pick between
    /// multiple matches rather than returning whichever listed first.
    pub async fn resolve(&self, file_id: &str) -> Result<PathBuf, ResolveError> {
        if let Some(path) = self.index.get(file_id) {
            return Ok(path.clone());
        }

        let names = self.list().await?;
        let matches: Vec<&String> = names.iter().filter(|n| n.contains(file_id)).collect();

        match matches.as_slice() {
            [] => Err(ResolveError::NotFound),
            [name] => {
                let path = self.root.join(name);
                self.index.insert(file_id.to_string(), path.clone());
                tracing::debug!(file_id, name = %name, "resolved unindexed file by scan");
                Ok(path)
            }
            _ => {
                tracing::warn!(file_id, count = matches.len(), "ambiguous file identifier");
                Err(ResolveError::Ambiguous {
                    count: matches.len(),
                })
            }
        }
    }

    /// Read the full content of a stored document.
    pub async fn read_content(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read document {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn temp_store() -> DocumentStore {
        let root = std::env::temp_dir().join(format!("store-test-{}", Uuid::new_v4()));
        DocumentStore::open(root).await.unwrap()
    }

    #[tokio::test]
    async fn store_then_resolve_uses_index() {
        let store = temp_store().await;
        let stored = store.store("gatsby.txt", "In my younger years").await.unwrap();

        let path = store.resolve(&stored.id).await.unwrap();
        assert_eq!(path, stored.path);
        assert_eq!(store.read_content(&path).await.unwrap(), "In my younger years");
    }

    #[tokio::test]
    async fn resolve_falls_back_to_unique_substring_match() {
        let store = temp_store().await;
        fs::write(store.root().join("abc123_story.txt"), "text")
            .await
            .unwrap();

        let path = store.resolve("abc123").await.unwrap();
        assert_eq!(path, store.root().join("abc123_story.txt"));

        // The match is backfilled into the index.
        assert!(store.index.contains_key("abc123"));
    }

    #[tokio::test]
    async fn resolve_rejects_ambiguous_match() {
        let store = temp_store().await;
        fs::write(store.root().join("abc_one.txt"), "a").await.unwrap();
        fs::write(store.root().join("abc_two.txt"), "b").await.unwrap();

        let err = store.resolve("abc").await.unwrap_err();
        assert!(matches!(err, ResolveError::Ambiguous { count: 2 }));
    }

    #[tokio::test]
    async fn resolve_unknown_id_is_not_found() {
        let store = temp_store().await;
        fs::write(store.root().join("other.txt"), "x").await.unwrap();

        let err = store.resolve("missing").await.unwrap_err();
        assert!(matches!(err, ResolveError::NotFound));
    }

    #[tokio::test]
    async fn unreadable_listing_is_io_not_not_found() {
        let store = temp_store().await;
        fs::remove_dir_all(store.root()).await.unwrap();

        let err = store.resolve("anything").await.unwrap_err();
        assert!(matches!(err, ResolveError::Io(_)));
    }

    #[tokio::test]
    async fn list_is_sorted() {
        let store = temp_store().await;
        fs::write(store.root().join("b.txt"), "b").await.unwrap();
        fs::write(store.root().join("a.txt"), "a").await.unwrap();

        assert_eq!(store.list().await.unwrap(), vec!["a.txt", "b.txt"]);
    }
}
