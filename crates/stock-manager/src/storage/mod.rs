//! # Flat-file storage
//!
//! [`Repository`] implementations that keep the product store in a single file.
//!
//! - [`CsvRepository`] - `product_id,name,quantity,price,category` with a header row
//! - [`JsonRepository`] - an object keyed by product id, pretty-printed
//!
//! Both treat a missing file as an empty store and replace the file atomically
//! on every save: the new contents go to a sibling temp file which is then
//! renamed over the target.

pub mod csv_file;
pub mod json_file;

pub use csv_file::CsvRepository;
pub use json_file::JsonRepository;

use crate::model::Product;
use clap::ValueEnum;
use record_actor::{BoxError, Repository};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading or writing the stock file.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be parsed or failed validation.
    #[error("invalid record in {path} ({location}): {message}")]
    InvalidRecord {
        path: PathBuf,
        location: String,
        message: String,
    },

    #[error("failed to encode {path}: {message}")]
    Encode { path: PathBuf, message: String },
}

impl StorageError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn invalid(path: &Path, location: impl Into<String>, message: impl Display) -> Self {
        StorageError::InvalidRecord {
            path: path.to_path_buf(),
            location: location.into(),
            message: message.to_string(),
        }
    }
}

/// On-disk encoding of the stock file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageFormat {
    /// JSON for a `.json` extension, CSV otherwise.
    #[default]
    Auto,
    Csv,
    Json,
}

impl StorageFormat {
    /// Resolves [`StorageFormat::Auto`] against `path`.
    pub fn resolve(self, path: &Path) -> StorageFormat {
        match self {
            StorageFormat::Auto => {
                let is_json = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
                if is_json {
                    StorageFormat::Json
                } else {
                    StorageFormat::Csv
                }
            }
            explicit => explicit,
        }
    }
}

/// A stock file in either supported format.
pub enum FileRepository {
    Csv(CsvRepository),
    Json(JsonRepository),
}

impl FileRepository {
    pub fn path(&self) -> &Path {
        match self {
            FileRepository::Csv(repo) => repo.path(),
            FileRepository::Json(repo) => repo.path(),
        }
    }
}

/// Opens the stock file at `path`, choosing the encoding from `format`.
pub fn open_repository(path: impl Into<PathBuf>, format: StorageFormat) -> FileRepository {
    let path = path.into();
    match format.resolve(&path) {
        StorageFormat::Json => FileRepository::Json(JsonRepository::new(path)),
        _ => FileRepository::Csv(CsvRepository::new(path)),
    }
}

impl Repository<Product> for FileRepository {
    fn load(&self) -> Result<Vec<Product>, BoxError> {
        match self {
            FileRepository::Csv(repo) => repo.load(),
            FileRepository::Json(repo) => repo.load(),
        }
    }

    fn save(&self, items: &[&Product]) -> Result<(), BoxError> {
        match self {
            FileRepository::Csv(repo) => repo.save(items),
            FileRepository::Json(repo) => repo.save(items),
        }
    }
}

/// Reads the whole file, or `None` if it does not exist yet.
fn read_if_exists(path: &Path) -> Result<Option<Vec<u8>>, StorageError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StorageError::io(path, e)),
    }
}

/// Replaces `path` with `bytes` through a temp file in the same directory.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent).map_err(|e| StorageError::io(&parent, e))?;
    let tmp = parent.join(format!(
        ".{}.tmp.{}",
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("stock"),
        std::process::id()
    ));
    {
        let mut file = std::fs::File::create(&tmp).map_err(|e| StorageError::io(&tmp, e))?;
        file.write_all(bytes)
            .map_err(|e| StorageError::io(&tmp, e))?;
        file.sync_all().map_err(|e| StorageError::io(&tmp, e))?;
    }
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(StorageError::io(path, e));
    }
    Ok(())
}
