use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Local, NaiveDateTime};

use crate::models::{AppliedOn, ApplicationInput, ApplicationRecord, RecordId};

use super::{RecordStore, SyncError};

/// Record Store held in process memory.
///
/// Behaves like the HTTP backend: sequential numeric ids, `lastUpdated`
/// stamped on every write, 404 for unknown ids. Clones share the same rows.
#[derive(Clone, Default)]
pub struct MemoryRecordStore {
    inner: Arc<Mutex<MemoryRows>>,
}

#[derive(Default)]
struct MemoryRows {
    rows: Vec<ApplicationRecord>,
    next_id: i64,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with rows as-is, ids included.
    pub fn with_rows(rows: Vec<ApplicationRecord>) -> Self {
        let next_id = rows
            .iter()
            .filter_map(|row| match row.id {
                Some(RecordId::Numeric(id)) => Some(id),
                _ => None,
            })
            .max()
            .unwrap_or(0);

        Self {
            inner: Arc::new(Mutex::new(MemoryRows { rows, next_id })),
        }
    }

    pub fn rows(&self) -> Vec<ApplicationRecord> {
        self.lock().rows.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryRows> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn not_found(id: &RecordId) -> SyncError {
    SyncError::Server {
        status: 404,
        message: format!("Job Application not found with id: {id}"),
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn apply_input(record: &mut ApplicationRecord, input: &ApplicationInput) {
    record.company = input.company.clone();
    record.position = input.position.clone();
    record.status = Some(input.status.clone());
    record.date_applied = input
        .date_applied
        .map(AppliedOn::Date)
        .unwrap_or(AppliedOn::Missing);
    record.notes = Some(input.notes.clone());
    record.last_updated = Some(now());
}

impl RecordStore for MemoryRecordStore {
    async fn list(&self) -> Result<Vec<ApplicationRecord>, SyncError> {
        Ok(self.rows())
    }

    async fn get(&self, id: &RecordId) -> Result<Option<ApplicationRecord>, SyncError> {
        let guard = self.lock();
        Ok(guard
            .rows
            .iter()
            .find(|row| row.id.as_ref() == Some(id))
            .cloned())
    }

    async fn create(&self, input: &ApplicationInput) -> Result<(), SyncError> {
        let mut guard = self.lock();
        guard.next_id += 1;
        let mut record = ApplicationRecord {
            id: Some(RecordId::Numeric(guard.next_id)),
            company: String::new(),
            position: String::new(),
            status: None,
            date_applied: AppliedOn::Missing,
            notes: None,
            last_updated: None,
        };
        apply_input(&mut record, input);
        guard.rows.push(record);
        Ok(())
    }

    async fn update(&self, id: &RecordId, input: &ApplicationInput) -> Result<(), SyncError> {
        let mut guard = self.lock();
        let record = guard
            .rows
            .iter_mut()
            .find(|row| row.id.as_ref() == Some(id))
            .ok_or_else(|| not_found(id))?;
        apply_input(record, input);
        Ok(())
    }

    async fn delete(&self, id: &RecordId) -> Result<(), SyncError> {
        let mut guard = self.lock();
        let before = guard.rows.len();
        guard.rows.retain(|row| row.id.as_ref() != Some(id));
        if guard.rows.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}
