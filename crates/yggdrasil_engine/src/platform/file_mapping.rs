//! Read-only memory-mapped files

use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// File mapping errors
#[derive(thiserror::Error, Debug)]
pub enum FileMappingError {
    /// The file could not be opened
    #[error("Failed to open {path}: {source}")]
    Open {
        /// Path that was opened
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The file was opened but could not be mapped
    #[error("Failed to map {path}: {source}")]
    Map {
        /// Path that was mapped
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The contents are not valid UTF-8
    #[error("{0} is not valid UTF-8")]
    NotUtf8(PathBuf),
}

/// A whole file mapped read-only into memory
///
/// The view is released when the mapping is dropped.
#[derive(Debug)]
pub struct FileMapping {
    path: PathBuf,
    map: Mmap,
}

impl FileMapping {
    /// Map the file at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FileMappingError> {
        let path = path.as_ref().to_path_buf();

        let file = File::open(&path).map_err(|source| {
            log::error!("Failed to open file {}: {}", path.display(), source);
            FileMappingError::Open { path: path.clone(), source }
        })?;

        // SAFETY: the mapping is read-only; callers must not truncate the file while it is mapped
        let map = unsafe { Mmap::map(&file) }.map_err(|source| {
            log::error!("Failed to map file {}: {}", path.display(), source);
            FileMappingError::Map { path: path.clone(), source }
        })?;

        log::debug!("Mapped {} ({} bytes)", path.display(), map.len());
        Ok(Self { path, map })
    }

    /// Path the mapping was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mapped contents
    pub fn bytes(&self) -> &[u8] {
        &self.map
    }

    /// Mapped contents as text
    pub fn text(&self) -> Result<&str, FileMappingError> {
        std::str::from_utf8(&self.map).map_err(|_| FileMappingError::NotUtf8(self.path.clone()))
    }

    /// Size of the file in bytes
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the file is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
