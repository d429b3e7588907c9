use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::domain::errors::DomainError;
use crate::domain::ports::ObjectStorage;

fn storage_error(e: io::Error) -> DomainError {
    DomainError::Storage(e.to_string())
}

/// Object storage bucket backed by a directory on the local filesystem.
pub struct LocalObjectStorage {
    root: PathBuf,
}

impl LocalObjectStorage {
    /// Opens (creating if needed) the bucket directory `root/bucket`.
    pub fn open(root: impl AsRef<Path>, bucket: &str) -> Result<Self, DomainError> {
        let root = root.as_ref().join(bucket);
        fs::create_dir_all(&root).map_err(storage_error)?;
        Ok(Self { root })
    }

    /// Maps a storage path onto the bucket directory. Only plain relative
    /// segments are accepted.
    fn resolve(&self, path: &str) -> Result<PathBuf, DomainError> {
        let relative = Path::new(path);
        let plain = !path.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !plain {
            return Err(DomainError::InvalidInput(format!("invalid storage path '{path}'")));
        }
        Ok(self.root.join(relative))
    }
}

impl ObjectStorage for LocalObjectStorage {
    fn put(&self, path: &str, bytes: &[u8]) -> Result<(), DomainError> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(storage_error)?;
        }
        fs::write(target, bytes).map_err(storage_error)?;
        Ok(())
    }

    fn get(&self, path: &str) -> Result<Vec<u8>, DomainError> {
        let target = self.resolve(path)?;
        match fs::read(target) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(DomainError::Storage(format!(
                "Object not found: {path}"
            ))),
            Err(e) => Err(storage_error(e)),
        }
    }

    fn remove(&self, path: &str) -> Result<(), DomainError> {
        let target = self.resolve(path)?;
        match fs::remove_file(target) {
            Ok(()) => Ok(()),
            // Already gone; the caller may still drop the metadata.
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error(e)),
        }
    }
}
