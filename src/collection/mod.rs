//! Canonical in-memory collection of application records.
//!
//! There is exactly one collection per session. It is swapped wholesale on
//! every successful fetch; the only in-place change is the removal of a
//! record whose delete the Record Store has already confirmed. Readers get
//! an immutable snapshot, so a replace is never observed half-applied.

use std::{
    collections::HashSet,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::models::{ApplicationRecord, RecordId};
use crate::{log_info, log_warn};

const ENABLE_LOGS: bool = true;

/// Immutable view of the collection at one revision.
#[derive(Debug, Clone, Default)]
pub struct CollectionSnapshot {
    records: Arc<Vec<ApplicationRecord>>,
    revision: u64,
}

impl CollectionSnapshot {
    pub fn records(&self) -> &[ApplicationRecord] {
        &self.records
    }

    /// Bumped on every replace and removal; 0 means never loaded.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, id: &RecordId) -> Option<&ApplicationRecord> {
        self.records.iter().find(|record| record.id.as_ref() == Some(id))
    }
}

#[derive(Clone, Default)]
pub struct ApplicationCollection {
    inner: Arc<RwLock<CollectionSnapshot>>,
}

impl ApplicationCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> CollectionSnapshot {
        self.read().clone()
    }

    pub fn revision(&self) -> u64 {
        self.read().revision
    }

    /// Swaps in a freshly fetched list, keeping the store's order.
    ///
    /// Ids must be unique; a repeated id keeps its first row. Returns the
    /// snapshot that was installed.
    pub fn replace(&self, records: Vec<ApplicationRecord>) -> CollectionSnapshot {
        let records = dedupe_ids(records);
        let mut guard = self.write();
        guard.revision += 1;
        guard.records = Arc::new(records);
        log_info!(
            "Collection replaced at revision {} ({} records)",
            guard.revision,
            guard.records.len()
        );
        guard.clone()
    }

    /// Drops the record with `id`. Returns the new revision, or `None` when
    /// no record carried that id.
    pub fn remove(&self, id: &RecordId) -> Option<u64> {
        let mut guard = self.write();
        if guard.find(id).is_none() {
            return None;
        }

        let remaining: Vec<ApplicationRecord> = guard
            .records
            .iter()
            .filter(|record| record.id.as_ref() != Some(id))
            .cloned()
            .collect();
        guard.records = Arc::new(remaining);
        guard.revision += 1;
        log_info!("Removed record {id} locally at revision {}", guard.revision);
        Some(guard.revision)
    }

    fn read(&self) -> RwLockReadGuard<'_, CollectionSnapshot> {
        match self.inner.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, CollectionSnapshot> {
        match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn dedupe_ids(records: Vec<ApplicationRecord>) -> Vec<ApplicationRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| match &record.id {
            Some(id) if !seen.insert(id.clone()) => {
                log_warn!("Dropping duplicate record id {id} from fetched list");
                false
            }
            _ => true,
        })
        .collect()
}
