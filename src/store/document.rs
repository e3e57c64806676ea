use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

use crate::store::AttendanceStore;
use crate::utils;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read \"{path}\"")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write \"{path}\"")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode the attendance data")]
    Encode(#[from] serde_json::Error),
}

/// What was found when reading the data file.
#[derive(Debug)]
pub enum LoadOutcome {
    /// There is no data file yet.
    Fresh,
    Loaded(AttendanceStore),
    /// The data file exists, but could not be parsed.
    Corrupt(String),
}

impl LoadOutcome {
    /// Returns the loaded store, a missing or corrupt file results in a fresh store.
    ///
    /// The content of a corrupt file is lost as soon as the store is saved.
    #[must_use]
    pub fn into_store(self) -> AttendanceStore {
        match self {
            Self::Loaded(store) => store,
            Self::Fresh | Self::Corrupt(_) => AttendanceStore::default(),
        }
    }
}

/// The JSON file the [`AttendanceStore`] is persisted to.
///
/// Writes are not atomic and the file is not locked, a crash while writing or
/// a second process writing at the same time can corrupt it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
}

impl Document {
    /// The name of the data file when nothing else is configured.
    pub const DEFAULT_FILE_NAME: &'static str = "monthly.json";

    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the data file.
    ///
    /// Only I/O errors other than a missing file are returned as an error, for example
    /// if the permission to read the file is denied.
    pub fn read(&self) -> Result<LoadOutcome, StoreError> {
        let content = match utils::read(&self.path) {
            Ok(content) => content,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                info!("no data file at \"{}\", starting fresh", self.path.display());
                return Ok(LoadOutcome::Fresh);
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        match AttendanceStore::from_json(&content) {
            Ok(store) => {
                info!("loaded attendance data from \"{}\"", self.path.display());
                Ok(LoadOutcome::Loaded(store))
            }
            Err(error) => {
                warn!(
                    "data file \"{}\" is corrupt and will be replaced: {}",
                    self.path.display(),
                    error
                );
                Ok(LoadOutcome::Corrupt(error.to_string()))
            }
        }
    }

    /// Loads the store, a missing or corrupt data file results in a fresh store.
    pub fn load(&self) -> Result<AttendanceStore, StoreError> {
        self.read().map(LoadOutcome::into_store)
    }

    /// Replaces the content of the data file with the whole store.
    pub fn save(&self, store: &AttendanceStore) -> Result<(), StoreError> {
        let json = store.to_json()?;

        utils::write(&self.path, json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
