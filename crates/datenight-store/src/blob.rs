//! Storage port for the persisted plan list.
//!
//! The plan store only needs "get a string by key" and "set a string by
//! key". [`FileBlobStore`] keeps one JSON file per key in a directory;
//! [`MemoryBlobStore`] keeps everything in a map and is used by tests and
//! ephemeral sessions.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

use crate::config::blob_path;

/// Errors from a [`BlobStore`] backend.
#[derive(Debug, Error)]
pub enum BlobError {
    #[error("failed to read blob {key:?}: {source}")]
    Read { key: String, source: io::Error },

    #[error("failed to write blob {key:?}: {source}")]
    Write { key: String, source: io::Error },

    #[error("blob backend unavailable: {0}")]
    Unavailable(String),
}

/// Durable key-value storage of opaque string blobs.
pub trait BlobStore: Send + Sync {
    /// Fetch the blob stored under `key`. `Ok(None)` means nothing was stored.
    fn get(&self, key: &str) -> Result<Option<String>, BlobError>;

    /// Replace the blob stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), BlobError>;
}

impl<B: BlobStore + ?Sized> BlobStore for &B {
    fn get(&self, key: &str) -> Result<Option<String>, BlobError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BlobError> {
        (**self).set(key, value)
    }
}

// ---------------------------------------------------------------------------
// File backend
// ---------------------------------------------------------------------------

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, BlobError> {
        let path = blob_path(&self.dir, key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(BlobError::Read {
                key: key.to_owned(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BlobError> {
        let write_err = |source| BlobError::Write {
            key: key.to_owned(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(write_err)?;

        // Write to a sibling file and rename so readers never see a torn blob.
        let path = blob_path(&self.dir, key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(write_err)?;
        std::fs::rename(&tmp, &path).map_err(write_err)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

/// Map-backed store. Contents are lost when the value is dropped.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, BlobError> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|e| BlobError::Unavailable(e.to_string()))?;
        Ok(blobs.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BlobError> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|e| BlobError::Unavailable(e.to_string()))?;
        blobs.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
