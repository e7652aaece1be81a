//! Record Store: whole-document JSON blob persistence
//!
//! Each collection lives under one fixed key as a single UTF-8 JSON array;
//! there is no per-record storage address, no versioning, and no partial
//! document access. The persisted arrays carry no schema version marker, so
//! any future schema evolution must introduce an explicit version field.

use std::future::Future;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// The three persisted collections, each addressed by a fixed storage key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Cities,
    Venues,
    Concerts,
}

impl Collection {
    /// Storage key (relative blob path) for this collection
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Cities => "data/cities.json",
            Collection::Venues => "data/venues.json",
            Collection::Concerts => "data/concerts.json",
        }
    }
}

/// Key-value blob storage for whole-collection JSON documents
///
/// `get` distinguishes *not found* (`Ok(None)`, a legitimately empty
/// collection) from backend failure (`Err(StoreUnavailable)`); callers decide
/// how each is handled.
pub trait BlobStore: Send + Sync {
    /// Fetch the raw JSON document stored under the collection's key
    fn get(&self, collection: Collection) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Overwrite the collection's document in full (no partial write)
    fn put(&self, collection: Collection, body: String) -> impl Future<Output = Result<()>> + Send;
}

/// File-backed blob store rooted at the resolved data folder
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn blob_path(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.key())
    }
}

impl BlobStore for FsBlobStore {
    async fn get(&self, collection: Collection) -> Result<Option<String>> {
        let path = self.blob_path(collection);
        match tokio::fs::read_to_string(&path).await {
            Ok(body) => {
                debug!("Read {} bytes from {}", body.len(), path.display());
                Ok(Some(body))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::StoreUnavailable(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn put(&self, collection: Collection, body: String) -> Result<()> {
        let path = self.blob_path(collection);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::StoreUnavailable(format!(
                    "failed to create {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        tokio::fs::write(&path, &body).await.map_err(|e| {
            Error::StoreUnavailable(format!("failed to write {}: {}", path.display(), e))
        })?;
        debug!("Wrote {} bytes to {}", body.len(), path.display());
        Ok(())
    }
}
