// src/store/local.rs
// =============================================================================
// A bucket store backed by the local filesystem.
//
// Layout:
//   <root>/<bucket>/<key>
//
// Buckets are created on first write. Bucket names and keys must be a
// single path component so nothing can be written outside the root.
// =============================================================================

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{ObjectStore, StoredObject};
use crate::error::PersistenceError;

#[derive(Debug, Clone)]
pub struct LocalBucketStore {
    root: PathBuf,
}

impl LocalBucketStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf, PersistenceError> {
        check_component(bucket)?;
        check_component(key)?;
        Ok(self.root.join(bucket).join(key))
    }
}

// Rejects empty names, "." / ".." and anything containing a separator
fn check_component(name: &str) -> Result<(), PersistenceError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\');

    if invalid {
        return Err(PersistenceError::InvalidKey {
            key: name.to_string(),
        });
    }
    Ok(())
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> PersistenceError + '_ {
    move |source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[async_trait]
impl ObjectStore for LocalBucketStore {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
    ) -> Result<StoredObject, PersistenceError> {
        let path = self.object_path(bucket, key)?;
        let dir = self.root.join(bucket);

        tokio::fs::create_dir_all(&dir).await.map_err(io_error(&dir))?;
        tokio::fs::write(&path, &body).await.map_err(io_error(&path))?;
        debug!(bytes = body.len(), "Wrote {}", path.display());

        Ok(StoredObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            location: path.display().to_string(),
        })
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, PersistenceError> {
        let path = self.object_path(bucket, key)?;
        tokio::fs::read(&path).await.map_err(io_error(&path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBucketStore::new(dir.path());

        let stored = store
            .put_object("bucket-1", "notes.txt", b"hello".to_vec())
            .await
            .unwrap();

        assert_eq!(stored.bucket, "bucket-1");
        assert_eq!(stored.key, "notes.txt");
        assert!(dir.path().join("bucket-1").join("notes.txt").exists());
        assert_eq!(store.get_object("bucket-1", "notes.txt").await.unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBucketStore::new(dir.path());

        store.put_object("b", "k", b"first".to_vec()).await.unwrap();
        store.put_object("b", "k", b"second".to_vec()).await.unwrap();

        assert_eq!(store.get_object("b", "k").await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBucketStore::new(dir.path());

        for key in ["", "..", "a/b", "a\\b"] {
            let result = store.put_object("bucket", key, Vec::new()).await;
            assert!(matches!(result, Err(PersistenceError::InvalidKey { .. })), "{key}");
        }
    }

    #[tokio::test]
    async fn test_missing_object_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBucketStore::new(dir.path());

        let result = store.get_object("bucket", "absent.txt").await;
        assert!(matches!(result, Err(PersistenceError::Io { .. })));
    }
}
