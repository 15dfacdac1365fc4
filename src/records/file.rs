//! JSON file holding the collection.
//!
//! The whole collection is rewritten on every save. Writes go to a sibling
//! `.tmp` file which is synced and then renamed over the target, so the
//! target is always either the old or the new collection.

use crate::error::{RegistryError, Result};
use crate::records::Collection;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Indentation used for the persisted JSON.
const JSON_INDENT: &[u8] = b"    ";

/// What was found when reading the file.
#[derive(Debug)]
pub enum LoadState {
    Loaded(Collection),
    Missing,
    /// The file exists but does not decode as a collection.
    Corrupt(String),
}

/// Reads and writes the collection file at a fixed path.
#[derive(Clone, Debug)]
pub struct RecordFile {
    path: PathBuf,
}

impl RecordFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read and decode the file.
    ///
    /// Missing and undecodable files are reported in the [`LoadState`];
    /// any other I/O failure is an error.
    pub fn load(&self) -> Result<LoadState> {
        let mut buf = Vec::new();
        {
            let mut file = match File::open(&self.path) {
                Ok(file) => file,
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LoadState::Missing),
                Err(e) => return Err(e.into()),
            };
            file.read_to_end(&mut buf)?;
        }

        match serde_json::from_slice::<Collection>(&buf) {
            Ok(collection) => Ok(LoadState::Loaded(collection)),
            Err(e) => Ok(LoadState::Corrupt(e.to_string())),
        }
    }

    /// Write the whole collection and sync it to disk before returning.
    pub fn save(&self, collection: &Collection) -> Result<()> {
        let temp_path = self.temp_path();

        if let Err(e) = Self::write_synced(&temp_path, collection) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        fs::rename(&temp_path, &self.path)?;
        self.sync_parent_dir();
        Ok(())
    }

    fn write_synced(path: &Path, collection: &Collection) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        let mut ser = serde_json::Serializer::with_formatter(
            &mut writer,
            PrettyFormatter::with_indent(JSON_INDENT),
        );
        collection
            .serialize(&mut ser)
            .map_err(|e| RegistryError::Serialization(e.to_string()))?;
        writer.write_all(b"\n")?;

        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        Ok(())
    }

    /// `doctors.json` -> `doctors.json.tmp`
    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Make the rename itself durable. Best-effort.
    #[cfg(unix)]
    fn sync_parent_dir(&self) {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        if let Ok(dir) = File::open(parent) {
            let _ = dir.sync_all();
        }
    }

    #[cfg(not(unix))]
    fn sync_parent_dir(&self) {}
}
