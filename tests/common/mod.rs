#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Days, NaiveDate};
use tokio::sync::oneshot;

use jobtrack_lib::models::AppliedOn;
use jobtrack_lib::{
    ApplicationInput, ApplicationRecord, ApplicationStatus, MemoryRecordStore, RecordId,
    RecordStore, SyncError,
};

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

pub fn days_ago(days: u64) -> NaiveDate {
    today() - Days::new(days)
}

pub fn record(id: i64, company: &str, status: ApplicationStatus, applied: NaiveDate) -> ApplicationRecord {
    ApplicationRecord {
        id: Some(RecordId::Numeric(id)),
        company: company.to_string(),
        position: "Engineer".to_string(),
        status: Some(status),
        date_applied: AppliedOn::Date(applied),
        notes: None,
        last_updated: None,
    }
}

pub fn input(company: &str, status: ApplicationStatus) -> ApplicationInput {
    ApplicationInput::new(company, "Engineer", status, today())
}

/// Pauses a `list` call after it has read the rows.
pub struct HeldList {
    pub started: oneshot::Receiver<()>,
    pub release: oneshot::Sender<()>,
}

#[derive(Default)]
struct Script {
    list_failures: VecDeque<SyncError>,
    write_failures: VecDeque<SyncError>,
    list_hold: Option<(oneshot::Sender<()>, oneshot::Receiver<()>)>,
    list_calls: usize,
}

/// In-memory store with injectable failures and a gate for in-flight lists.
#[derive(Clone, Default)]
pub struct ScriptedStore {
    pub inner: MemoryRecordStore,
    script: Arc<Mutex<Script>>,
}

impl ScriptedStore {
    pub fn seeded(rows: Vec<ApplicationRecord>) -> Self {
        Self {
            inner: MemoryRecordStore::with_rows(rows),
            script: Arc::default(),
        }
    }

    pub fn fail_next_list(&self, err: SyncError) {
        self.lock().list_failures.push_back(err);
    }

    pub fn fail_next_write(&self, err: SyncError) {
        self.lock().write_failures.push_back(err);
    }

    pub fn hold_next_list(&self) -> HeldList {
        let (started_tx, started) = oneshot::channel();
        let (release, release_rx) = oneshot::channel();
        self.lock().list_hold = Some((started_tx, release_rx));
        HeldList { started, release }
    }

    pub fn list_calls(&self) -> usize {
        self.lock().list_calls
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap()
    }

    fn next_write_failure(&self) -> Option<SyncError> {
        self.lock().write_failures.pop_front()
    }
}

impl RecordStore for ScriptedStore {
    async fn list(&self) -> Result<Vec<ApplicationRecord>, SyncError> {
        let (failure, hold) = {
            let mut script = self.lock();
            script.list_calls += 1;
            (script.list_failures.pop_front(), script.list_hold.take())
        };

        let rows = self.inner.list().await;
        if let Some((started, release)) = hold {
            let _ = started.send(());
            let _ = release.await;
        }

        match failure {
            Some(err) => Err(err),
            None => rows,
        }
    }

    async fn get(&self, id: &RecordId) -> Result<Option<ApplicationRecord>, SyncError> {
        self.inner.get(id).await
    }

    async fn create(&self, input: &ApplicationInput) -> Result<(), SyncError> {
        match self.next_write_failure() {
            Some(err) => Err(err),
            None => self.inner.create(input).await,
        }
    }

    async fn update(&self, id: &RecordId, input: &ApplicationInput) -> Result<(), SyncError> {
        match self.next_write_failure() {
            Some(err) => Err(err),
            None => self.inner.update(id, input).await,
        }
    }

    async fn delete(&self, id: &RecordId) -> Result<(), SyncError> {
        match self.next_write_failure() {
            Some(err) => Err(err),
            None => self.inner.delete(id).await,
        }
    }
}
