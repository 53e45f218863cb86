//! Item repository contract and JSON file implementation.
//!
//! # Responsibility
//! - Load the persisted item snapshot once per store lifetime.
//! - Replace the whole snapshot on every save.
//!
//! # Invariants
//! - The file holds one JSON array of `{name, description, contact}` objects.
//! - Load keeps every item parsed before the first decode error.
//! - Save writes a sibling temp file and renames it over the target, so a
//!   failed save never truncates the previous snapshot.
//! - Save only replaces a snapshot that is writable in place, and the
//!   replacement keeps the previous file's permissions.

use crate::model::item::Item;
use log::{error, info, warn};
use serde::de::{DeserializeSeed, Deserializer, SeqAccess, Visitor};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::{NamedTempFile, PersistError};

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for item snapshot reads and writes.
#[derive(Debug)]
pub enum RepoError {
    Io(std::io::Error),
    Serialize(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "item file I/O failed: {err}"),
            Self::Serialize(err) => write!(f, "item serialization failed: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RepoError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

impl From<PersistError> for RepoError {
    fn from(value: PersistError) -> Self {
        Self::Io(value.error)
    }
}

/// How completely the persisted snapshot was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// No snapshot exists yet.
    Missing,
    /// Every record in the snapshot was read.
    Complete,
    /// Reading stopped at a decode error; earlier records were kept.
    Partial { error: String },
}

/// Records recovered from the persisted snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Records in file order.
    pub items: Vec<Item>,
    pub status: LoadStatus,
}

/// Repository interface for whole-snapshot item persistence.
pub trait ItemRepository {
    fn load(&self) -> RepoResult<LoadReport>;
    fn save(&self, items: &[Item]) -> RepoResult<()>;
}

/// JSON-file-backed item repository.
#[derive(Debug, Clone)]
pub struct JsonFileItemRepository {
    path: PathBuf,
}

impl JsonFileItemRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the snapshot file this repository reads and replaces.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl ItemRepository for JsonFileItemRepository {
    fn load(&self) -> RepoResult<LoadReport> {
        let started_at = Instant::now();
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    "event=store_load module=repo status=missing path={}",
                    self.path.display()
                );
                return Ok(LoadReport {
                    items: Vec::new(),
                    status: LoadStatus::Missing,
                });
            }
            Err(err) => {
                error!(
                    "event=store_load module=repo status=error error_code=open_failed path={} error={}",
                    self.path.display(),
                    err
                );
                return Err(err.into());
            }
        };

        let mut items = Vec::new();
        let mut de = serde_json::Deserializer::from_reader(BufReader::new(file));
        let decoded = AppendItems(&mut items)
            .deserialize(&mut de)
            .and_then(|()| de.end());

        let status = match decoded {
            Ok(()) => {
                info!(
                    "event=store_load module=repo status=ok count={} duration_ms={}",
                    items.len(),
                    started_at.elapsed().as_millis()
                );
                LoadStatus::Complete
            }
            Err(err) => {
                warn!(
                    "event=store_load module=repo status=partial count={} duration_ms={} error={}",
                    items.len(),
                    started_at.elapsed().as_millis(),
                    err
                );
                LoadStatus::Partial {
                    error: err.to_string(),
                }
            }
        };

        Ok(LoadReport { items, status })
    }

    fn save(&self, items: &[Item]) -> RepoResult<()> {
        let started_at = Instant::now();
        match write_snapshot(self.parent_dir(), &self.path, items) {
            Ok(()) => {
                info!(
                    "event=store_save module=repo status=ok count={} duration_ms={}",
                    items.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_save module=repo status=error count={} duration_ms={} path={} error={}",
                    items.len(),
                    started_at.elapsed().as_millis(),
                    self.path.display(),
                    err
                );
                Err(err)
            }
        }
    }
}

fn write_snapshot(dir: &Path, target: &Path, items: &[Item]) -> RepoResult<()> {
    let previous_permissions = match OpenOptions::new().append(true).open(target) {
        Ok(file) => Some(file.metadata()?.permissions()),
        Err(err) if err.kind() == ErrorKind::NotFound => None,
        Err(err) => return Err(err.into()),
    };

    // The temp file removes itself on drop if any step below fails.
    let mut temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, items)?;
        writer.flush()?;
    }
    if let Some(permissions) = previous_permissions {
        temp.as_file().set_permissions(permissions)?;
    }
    temp.as_file().sync_all()?;
    temp.persist(target)?;
    Ok(())
}

/// Streams a JSON array into the borrowed vector one element at a time, so
/// the vector still holds the decoded prefix when a later element fails.
struct AppendItems<'a>(&'a mut Vec<Item>);

impl<'de> DeserializeSeed<'de> for AppendItems<'_> {
    type Value = ();

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(self)
    }
}

impl<'de> Visitor<'de> for AppendItems<'_> {
    type Value = ();

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("an array of item objects")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while let Some(item) = seq.next_element::<Item>()? {
            self.0.push(item);
        }
        Ok(())
    }
}
