//! Item store service.
//!
//! # Responsibility
//! - Own the ordered in-memory item sequence for one process.
//! - Persist the full sequence after every mutation.
//! - Provide add, delete-by-position, list and keyword search.
//!
//! # Invariants
//! - Order is insertion order; `add` always appends.
//! - After a successful mutation memory and snapshot hold the same sequence.
//! - After a failed mutation memory is restored to its pre-call state.
//! - `list` and `search` never reload from or write to the repository.
//!
//! Not internally synchronized. Callers sharing a store across threads must
//! guard it with their own lock.

use crate::model::item::Item;
use crate::repo::item_repo::{ItemRepository, LoadStatus, RepoError};
use crate::search::substring::{search_items, SearchHit};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for mutating operations.
#[derive(Debug)]
pub enum StoreError {
    /// Delete position is outside `0..len`; nothing changed.
    NotFound { position: usize, len: usize },
    /// Snapshot write failed; the in-memory change was rolled back.
    Persistence(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { position, len } => {
                write!(f, "no item at position {position} (store holds {len})")
            }
            Self::Persistence(err) => write!(f, "failed to save items: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Persistence(value)
    }
}

/// In-memory item sequence backed by a whole-snapshot repository.
pub struct ItemStore<R: ItemRepository> {
    repo: R,
    items: Vec<Item>,
}

impl<R: ItemRepository> ItemStore<R> {
    /// Creates the store and loads the persisted snapshot once.
    ///
    /// Never fails: a missing snapshot yields an empty store, and a corrupt
    /// or unreadable one is logged and yields whatever was decoded before
    /// the failure.
    pub fn open(repo: R) -> Self {
        let items = match repo.load() {
            Ok(report) => {
                match &report.status {
                    LoadStatus::Missing | LoadStatus::Complete => info!(
                        "event=store_open module=service status=ok count={}",
                        report.items.len()
                    ),
                    LoadStatus::Partial { error } => error!(
                        "event=store_open module=service status=error error_code=snapshot_corrupt recovered={} error={}",
                        report.items.len(),
                        error
                    ),
                }
                report.items
            }
            Err(err) => {
                error!(
                    "event=store_open module=service status=error error_code=snapshot_unreadable recovered=0 error={}",
                    err
                );
                Vec::new()
            }
        };

        Self { repo, items }
    }

    /// Appends `item` as the last record and persists the sequence.
    ///
    /// # Errors
    /// - Returns `Persistence` when the snapshot write fails; the item is
    ///   not kept in memory in that case.
    pub fn add(&mut self, item: Item) -> StoreResult<()> {
        self.items.push(item);
        if let Err(err) = self.repo.save(&self.items) {
            self.items.pop();
            warn!(
                "event=item_add module=service status=rolled_back count={}",
                self.items.len()
            );
            return Err(err.into());
        }

        info!(
            "event=item_add module=service status=ok position={} count={}",
            self.items.len() - 1,
            self.items.len()
        );
        Ok(())
    }

    /// Removes the record at 0-based `position` and persists the sequence.
    ///
    /// Records after `position` shift down by one. Returns the removed item.
    ///
    /// # Errors
    /// - Returns `NotFound` when `position >= len`; nothing changes.
    /// - Returns `Persistence` when the snapshot write fails; the item is
    ///   put back at `position`.
    pub fn delete(&mut self, position: usize) -> StoreResult<Item> {
        if position >= self.items.len() {
            info!(
                "event=item_delete module=service status=not_found position={} count={}",
                position,
                self.items.len()
            );
            return Err(StoreError::NotFound {
                position,
                len: self.items.len(),
            });
        }

        let removed = self.items.remove(position);
        if let Err(err) = self.repo.save(&self.items) {
            self.items.insert(position, removed);
            warn!(
                "event=item_delete module=service status=rolled_back position={} count={}",
                position,
                self.items.len()
            );
            return Err(err.into());
        }

        info!(
            "event=item_delete module=service status=ok position={} count={}",
            position,
            self.items.len()
        );
        Ok(removed)
    }

    /// Returns all records in stored order.
    pub fn list(&self) -> &[Item] {
        &self.items
    }

    /// Returns records matching `keyword` in any field, ignoring case.
    pub fn search(&self, keyword: &str) -> Vec<Item> {
        self.search_hits(keyword)
            .into_iter()
            .map(|hit| hit.item)
            .collect()
    }

    /// Same filter as [`Self::search`], with each hit's store position.
    pub fn search_hits(&self, keyword: &str) -> Vec<SearchHit> {
        search_items(&self.items, keyword)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the backing repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }
}
