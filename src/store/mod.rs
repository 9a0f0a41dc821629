// src/store/mod.rs
// =============================================================================
// This module stores crawl results so they can be indexed later.
//
// The crawler only produces documents. Getting them somewhere durable is
// this module's job:
// - ObjectStore: a bucket/key store (the local filesystem implementation
//   lives in local.rs)
// - persist_documents: writes the document set as a JSON array of strings
// - load_documents: reads it back
// - upload_file: puts a hand-picked .txt or .pdf next to the crawl results
// =============================================================================

mod local;

use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::StoreConfig;
use crate::error::PersistenceError;

pub use local::LocalBucketStore;

/// Where an object ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
    /// Human-readable location, e.g. a file path
    pub location: String,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
    ) -> Result<StoredObject, PersistenceError>;

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, PersistenceError>;
}

/// Encodes documents as a JSON array of strings, indented by one space.
pub fn encode_documents(documents: &[String]) -> Result<Vec<u8>, PersistenceError> {
    let mut body = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut body, formatter);
    documents
        .serialize(&mut serializer)
        .map_err(PersistenceError::Encode)?;
    Ok(body)
}

/// Writes the document set under the configured artifact name.
pub async fn persist_documents<S: ObjectStore + ?Sized>(
    store: &S,
    config: &StoreConfig,
    documents: &[String],
) -> Result<StoredObject, PersistenceError> {
    let body = encode_documents(documents)?;
    let bucket = config.bucket_name();

    let stored = store
        .put_object(&bucket, &config.artifact_name, body)
        .await?;
    info!(
        documents = documents.len(),
        "Successfully put {} to {}", stored.key, stored.bucket
    );
    Ok(stored)
}

/// Reads back a document set written by `persist_documents`.
pub async fn load_documents<S: ObjectStore + ?Sized>(
    store: &S,
    config: &StoreConfig,
) -> Result<Vec<String>, PersistenceError> {
    let bucket = config.bucket_name();
    let body = store.get_object(&bucket, &config.artifact_name).await?;

    serde_json::from_slice(&body).map_err(|source| PersistenceError::Decode {
        path: PathBuf::from(&bucket).join(&config.artifact_name),
        source,
    })
}

/// Uploads a .txt or .pdf file into the bucket.
///
/// The object key is the file name with spaces removed:
///   "/home/me/Return Policy.pdf" -> "ReturnPolicy.pdf"
pub async fn upload_file<S: ObjectStore + ?Sized>(
    store: &S,
    config: &StoreConfig,
    path: &Path,
) -> Result<StoredObject, PersistenceError> {
    let key = upload_key(path)?;

    info!("Uploading file at {}", path.display());
    let body = tokio::fs::read(path)
        .await
        .map_err(|source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    store.put_object(&config.bucket_name(), &key, body).await
}

fn upload_key(path: &Path) -> Result<String, PersistenceError> {
    let unsupported = || PersistenceError::UnsupportedFile {
        path: path.to_path_buf(),
    };

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(unsupported)?;

    let lower = name.to_lowercase();
    if !(lower.ends_with(".txt") || lower.ends_with(".pdf")) {
        return Err(unsupported());
    }

    Ok(name.replace(' ', ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &Path) -> StoreConfig {
        StoreConfig::new(dir, "123456789012")
    }

    #[test]
    fn test_encode_uses_one_space_indent() {
        let documents = vec!["first page".to_string(), "second \"page\"".to_string()];
        let body = encode_documents(&documents).unwrap();
        assert_eq!(
            String::from_utf8(body).unwrap(),
            "[\n \"first page\",\n \"second \\\"page\\\"\"\n]"
        );
    }

    #[test]
    fn test_encode_empty_set() {
        assert_eq!(encode_documents(&[]).unwrap(), b"[]");
    }

    #[tokio::test]
    async fn test_persist_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBucketStore::new(dir.path());
        let config = config_in(dir.path());
        let documents = vec![
            "# Help\n\n* [FAQ](https://a.test/faq)".to_string(),
            "Ünïcödé and\ttabs".to_string(),
        ];

        let stored = persist_documents(&store, &config, &documents).await.unwrap();

        assert_eq!(stored.bucket, "lexgenaistack-source-materials-bucket-123456789012");
        assert_eq!(stored.key, "web-crawl-results.txt");
        assert_eq!(load_documents(&store, &config).await.unwrap(), documents);
    }

    #[tokio::test]
    async fn test_load_rejects_non_json_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBucketStore::new(dir.path());
        let config = config_in(dir.path());
        store
            .put_object(&config.bucket_name(), &config.artifact_name, b"not json".to_vec())
            .await
            .unwrap();

        let result = load_documents(&store, &config).await;
        assert!(matches!(result, Err(PersistenceError::Decode { .. })));
    }

    #[test]
    fn test_upload_key_strips_spaces() {
        let key = upload_key(Path::new("/home/me/Return Policy.PDF")).unwrap();
        assert_eq!(key, "ReturnPolicy.PDF");
    }

    #[test]
    fn test_upload_key_rejects_other_types() {
        let err = upload_key(Path::new("notes.docx")).unwrap_err();
        assert!(matches!(err, PersistenceError::UnsupportedFile { .. }));
    }

    #[tokio::test]
    async fn test_upload_file_into_bucket() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("store hours.txt");
        std::fs::write(&source, "Open 9-5").unwrap();
        let store = LocalBucketStore::new(dir.path().join("buckets"));
        let config = config_in(dir.path());

        let stored = upload_file(&store, &config, &source).await.unwrap();

        assert_eq!(stored.key, "storehours.txt");
        let body = store.get_object(&stored.bucket, "storehours.txt").await.unwrap();
        assert_eq!(body, b"Open 9-5");
    }
}
