// This is free and unencumbered software released into the public domain.

use crate::shared::OverlayError;
use alloc::borrow::Cow;
use bytes::Bytes;
use std::{
    collections::BTreeMap,
    fs, io,
    path::{Component, Path, PathBuf},
};

/// Read-only namespace of files bundled with the application package.
pub trait AssetStore: dogma::Named {
    /// Returns the full contents of the asset at `path`.
    fn open(&self, path: &str) -> Result<Bytes, OverlayError>;
}

/// Asset store rooted at a directory on the local filesystem.
#[derive(Clone, Debug)]
pub struct DirAssetStore {
    root: PathBuf,
}

impl DirAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, OverlayError> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if path.is_empty() || escapes {
            return Err(OverlayError::asset_not_found(
                path,
                io::Error::new(io::ErrorKind::InvalidInput, "asset path outside of store"),
            ));
        }
        Ok(self.root.join(relative))
    }
}

impl dogma::Named for DirAssetStore {
    fn name(&self) -> Cow<'_, str> {
        "dir".into()
    }
}

impl AssetStore for DirAssetStore {
    fn open(&self, path: &str) -> Result<Bytes, OverlayError> {
        let full = self.resolve(path)?;
        fs::read(&full)
            .map(Bytes::from)
            .map_err(|e| OverlayError::asset_not_found(path, e))
    }
}

/// Asset store backed by in-memory buffers, for hosts that ship their
/// assets some other way.
#[derive(Clone, Debug, Default)]
pub struct MemoryAssetStore {
    files: BTreeMap<String, Bytes>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, data: impl Into<Bytes>) -> Self {
        self.insert(path, data);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, data: impl Into<Bytes>) {
        self.files.insert(path.into(), data.into());
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl dogma::Named for MemoryAssetStore {
    fn name(&self) -> Cow<'_, str> {
        "memory".into()
    }
}

impl AssetStore for MemoryAssetStore {
    fn open(&self, path: &str) -> Result<Bytes, OverlayError> {
        self.files.get(path).cloned().ok_or_else(|| {
            OverlayError::asset_not_found(path, io::Error::from(io::ErrorKind::NotFound))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::ErrorKind;

    #[test]
    fn memory_store_returns_registered_file() {
        let store = MemoryAssetStore::new().with_file("box.obj.uuu", &b"mesh"[..]);
        assert_eq!(store.open("box.obj.uuu").unwrap(), Bytes::from_static(b"mesh"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn memory_store_missing_file_is_asset_error() {
        let err = MemoryAssetStore::new().open("classic_colors.png").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Asset);
    }

    #[test]
    fn dir_store_reads_nested_paths() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sneaker")).unwrap();
        fs::write(dir.path().join("sneaker/texture.jpg"), b"jpeg").unwrap();

        let store = DirAssetStore::new(dir.path());
        assert_eq!(&store.open("sneaker/texture.jpg").unwrap()[..], b"jpeg");
    }

    #[test]
    fn dir_store_rejects_escaping_paths() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirAssetStore::new(dir.path());
        assert!(matches!(
            store.open("../secret.png"),
            Err(OverlayError::AssetNotFound { .. })
        ));
        assert!(store.open("/etc/passwd").is_err());
        assert!(store.open("").is_err());
    }
}
