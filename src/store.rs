//! Main Store struct: the doctor roster and the file it is persisted to.

use crate::error::{RegistryError, Result};
use crate::records::{Collection, LoadState, RecordFile};
use crate::types::{Doctor, DoctorId, DoctorUpdate, NewDoctor, Outcome, SortKey};
use fs2::FileExt;
use std::ffi::OsString;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What to do when the registry file exists but cannot be decoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CorruptFilePolicy {
    /// Start with an empty roster in memory. The file is left as it is until
    /// the next successful mutation overwrites it.
    #[default]
    StartEmpty,

    /// Refuse to open.
    Fail,
}

/// Store configuration.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Path of the JSON registry file.
    pub path: PathBuf,

    /// Whether to create the file if it doesn't exist.
    pub create_if_missing: bool,

    /// Handling of an undecodable registry file.
    pub on_corrupt: CorruptFilePolicy,

    /// Take an exclusive lock on `<path>.lock` while the store is open.
    pub lock: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("doctors.json"),
            create_if_missing: true,
            on_corrupt: CorruptFilePolicy::StartEmpty,
            lock: true,
        }
    }
}

impl StoreConfig {
    /// Default config for the given file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}

/// The doctor registry.
///
/// Holds the whole collection in memory. Every mutation writes the full
/// collection back to disk before it returns, so the file and memory agree
/// after each successful call.
pub struct Store {
    /// Store configuration.
    config: StoreConfig,

    /// Lock file for exclusive access.
    _lock_file: Option<File>,

    /// Persisted form of the collection.
    file: RecordFile,

    /// In-memory collection.
    collection: Collection,
}

impl Store {
    /// Open the registry, creating an empty one if there is no file yet.
    pub fn open(config: StoreConfig) -> Result<Self> {
        let file = RecordFile::new(&config.path);
        let existed = file.exists();

        if !existed {
            if !config.create_if_missing {
                return Err(RegistryError::NotInitialized(
                    config.path.display().to_string(),
                ));
            }
            if let Some(parent) = config.path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
        }

        let lock_file = if config.lock {
            Some(Self::acquire_lock(&config.path)?)
        } else {
            None
        };

        let collection = if existed {
            let collection = Self::load_collection(&file, config.on_corrupt)?;
            info!(
                path = %config.path.display(),
                doctors = collection.len(),
                last_id = %collection.last_id,
                "Opened registry"
            );
            collection
        } else {
            let collection = Collection::new();
            file.save(&collection)?;
            info!(path = %config.path.display(), "Created registry");
            collection
        };

        Ok(Self {
            config,
            _lock_file: lock_file,
            file,
            collection,
        })
    }

    /// Discard the in-memory collection and read the file again.
    pub fn reload(&mut self) -> Result<()> {
        self.collection = Self::load_collection(&self.file, self.config.on_corrupt)?;
        Ok(())
    }

    // --- Mutations ---

    /// Assign the next id and persist the counter.
    ///
    /// Fails without changing anything once `last_id` is at `u64::MAX`.
    pub fn generate_id(&mut self) -> Result<DoctorId> {
        let id = self.collection.next_id().ok_or_else(|| {
            RegistryError::Corruption(format!(
                "id counter exhausted at {}",
                self.collection.last_id
            ))
        })?;
        self.persist()?;
        Ok(id)
    }

    /// Add a doctor unless the name is already taken (ignoring case).
    pub fn add(&mut self, input: NewDoctor) -> Result<Outcome> {
        if self.collection.contains_name(&input.name) {
            debug!(name = %input.name, "Rejected duplicate name");
            return Ok(Outcome::DuplicateName);
        }

        let id = self.generate_id()?;
        self.collection.doctors.push(Doctor::from_input(id, input));
        self.persist()?;

        debug!(%id, "Added doctor");
        Ok(Outcome::Added(id))
    }

    /// Change specialization, email or contact of an existing doctor.
    ///
    /// Persists whenever the doctor exists, even if no field changed.
    pub fn update(&mut self, id: DoctorId, update: DoctorUpdate) -> Result<Outcome> {
        let Some(doctor) = self.collection.get_mut(id) else {
            return Ok(Outcome::NotFound);
        };

        update.apply_to(doctor);
        self.persist()?;

        debug!(%id, "Updated doctor");
        Ok(Outcome::Updated)
    }

    /// Remove a doctor. Its id is not handed out again.
    pub fn delete(&mut self, id: DoctorId) -> Result<Outcome> {
        if self.collection.remove(id).is_none() {
            return Ok(Outcome::NotFound);
        }

        self.persist()?;

        debug!(%id, "Deleted doctor");
        Ok(Outcome::Deleted)
    }

    // --- Queries ---

    /// All doctors in the requested order. The stored order is unchanged.
    pub fn list(&self, key: impl Into<SortKey>) -> Vec<Doctor> {
        self.collection.sorted(key.into())
    }

    /// Doctors whose name or specialization contains `keyword`, ignoring
    /// case, in stored order.
    pub fn search(&self, keyword: &str) -> Vec<Doctor> {
        self.collection.search(keyword)
    }

    pub fn get_by_id(&self, id: DoctorId) -> Option<&Doctor> {
        self.collection.get(id)
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// Highest id assigned so far.
    pub fn last_id(&self) -> DoctorId {
        self.collection.last_id
    }

    /// Read-only view of the in-memory collection.
    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// Get the registry file path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    // --- Private Helpers ---

    fn persist(&self) -> Result<()> {
        self.file.save(&self.collection)
    }

    fn load_collection(file: &RecordFile, policy: CorruptFilePolicy) -> Result<Collection> {
        let mut collection = match file.load()? {
            LoadState::Loaded(collection) => collection,
            LoadState::Missing => {
                warn!(path = %file.path().display(), "Registry file vanished, starting empty");
                Collection::new()
            }
            LoadState::Corrupt(reason) => match policy {
                CorruptFilePolicy::StartEmpty => {
                    warn!(
                        path = %file.path().display(),
                        %reason,
                        "Registry file is unreadable, starting empty; it will be overwritten on the next change"
                    );
                    Collection::new()
                }
                CorruptFilePolicy::Fail => {
                    return Err(RegistryError::Corruption(format!(
                        "{}: {}",
                        file.path().display(),
                        reason
                    )));
                }
            },
        };

        if let Some(old) = collection.repair_last_id() {
            warn!(
                stored = %old,
                repaired = %collection.last_id,
                "last_id was behind the highest stored id"
            );
        }

        Ok(collection)
    }

    fn acquire_lock(path: &Path) -> Result<File> {
        let mut lock_path = OsString::from(path.as_os_str());
        lock_path.push(".lock");
        let lock_file = File::create(PathBuf::from(lock_path))?;

        lock_file
            .try_lock_exclusive()
            .map_err(|_| RegistryError::Locked)?;

        Ok(lock_file)
    }
}
