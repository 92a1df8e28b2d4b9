use crate::error::PersistenceError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// A JSON-array file mirroring one in-memory collection.
///
/// Every write replaces the whole file. The new content goes to a temporary
/// file in the same directory which is then renamed over the target, so
/// readers of the path never see a half-written array.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Replaces the file with `records` as a pretty-printed JSON array.
    ///
    /// Missing parent directories are created.
    pub fn write<T: Serialize>(&self, records: &[T]) -> Result<(), PersistenceError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| PersistenceError::io(dir, e))?;

        let tmp = NamedTempFile::new_in(dir).map_err(|e| PersistenceError::io(dir, e))?;
        let mut writer = BufWriter::new(tmp);
        serde_json::to_writer_pretty(&mut writer, records)
            .map_err(|e| PersistenceError::malformed(&self.path, e))?;
        writer
            .write_all(b"\n")
            .map_err(|e| PersistenceError::io(&self.path, e))?;

        let tmp = writer
            .into_inner()
            .map_err(|e| PersistenceError::io(&self.path, e.into_error()))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| PersistenceError::io(&self.path, e))?;
        tmp.persist(&self.path)
            .map_err(|e| PersistenceError::io(&self.path, e.error))?;
        Ok(())
    }

    /// Reads the whole array, failing on a missing or malformed file.
    pub fn read<T: DeserializeOwned>(&self) -> Result<Vec<T>, PersistenceError> {
        let file = File::open(&self.path).map_err(|e| PersistenceError::io(&self.path, e))?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| PersistenceError::malformed(&self.path, e))
    }

    /// Startup load: a missing or unreadable snapshot yields an empty collection.
    pub fn load_or_empty<T: DeserializeOwned>(&self) -> Vec<T> {
        match self.read() {
            Ok(records) => {
                tracing::debug!(
                    path = %self.path.display(),
                    count = records.len(),
                    "snapshot loaded"
                );
                records
            }
            Err(PersistenceError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                tracing::debug!(path = %self.path.display(), "no snapshot yet, starting empty");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "starting with empty collection"
                );
                Vec::new()
            }
        }
    }
}
