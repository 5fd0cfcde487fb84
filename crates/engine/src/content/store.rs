use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parse '{path}' at {field}: {source}")]
    Parse {
        path: PathBuf,
        field: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("encode '{path}': {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("write '{path}' ({stage}): {source}")]
    Write {
        path: PathBuf,
        stage: WriteStage,
        #[source]
        source: io::Error,
    },
    #[error("delete '{path}': {source}")]
    Delete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Step of [`JsonFileStore::save`] that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStage {
    CreateDir,
    Stage,
    Commit,
}

impl fmt::Display for WriteStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CreateDir => "creating parent directory",
            Self::Stage => "writing staging file",
            Self::Commit => "renaming staging file into place",
        };
        f.write_str(name)
    }
}

/// A single JSON document at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFileStore<T> {
    path: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn in_dir(dir: &Path, file_name: &str) -> Self {
        Self::new(dir.join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn load(&self) -> Result<T, StoreError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        let mut deserializer = serde_json::Deserializer::from_str(&raw);
        serde_path_to_error::deserialize::<_, T>(&mut deserializer).map_err(|error| {
            let field = error.path().to_string();
            StoreError::Parse {
                path: self.path.clone(),
                field,
                source: error.into_inner(),
            }
        })
    }

    pub fn save(&self, record: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(record).map_err(|source| StoreError::Encode {
            path: self.path.clone(),
            source,
        })?;
        self.write_staged(&json)?;
        debug!(path = %self.path.display(), bytes = json.len(), "store_written");
        Ok(())
    }

    /// Missing file is not an error.
    pub fn delete(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Delete {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Sibling file the document is written to before it is renamed over
    /// the real path.
    pub fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| OsString::from("store"), ToOwned::to_owned);
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// The rename replaces an existing document in one step, so readers see
    /// either the old or the new contents.
    fn write_staged(&self, json: &str) -> Result<(), StoreError> {
        let failed = |stage| {
            move |source| StoreError::Write {
                path: self.path.clone(),
                stage,
                source,
            }
        };

        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(failed(WriteStage::CreateDir))?;
        }

        let staging = self.staging_path();
        fs::write(&staging, json.as_bytes()).map_err(failed(WriteStage::Stage))?;
        if let Err(source) = fs::rename(&staging, &self.path) {
            if let Err(cleanup) = fs::remove_file(&staging) {
                debug!(path = %staging.display(), error = %cleanup, "staging_file_left_behind");
            }
            return Err(failed(WriteStage::Commit)(source));
        }
        Ok(())
    }
}
