use std::sync::Arc;

use chrono::{Local, NaiveDate};
use log::{error, info, warn};
use tokio::sync::{broadcast, Mutex};

use crate::aggregation::AggregateView;
use crate::collection::{ApplicationCollection, CollectionSnapshot};
use crate::export::{project, ExportError, ExportScope, FlatRow};
use crate::models::{ApplicationInput, ApplicationRecord, ApplicationStatus, DateWindow, RecordId};
use crate::sync::{MutationOutcome, RecordStore, SyncClient, SyncError};

use super::{DashboardState, Notice, TrackerEvent};

const EVENT_CAPACITY: usize = 64;

type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// Single owner of the session: the sync client, the shared collection and
/// the dashboard selections.
///
/// Intents may overlap; the dashboard lock is only taken around pure state
/// transitions, never across a network call.
#[derive(Clone)]
pub struct Tracker<S> {
    sync: SyncClient<S>,
    state: Arc<Mutex<DashboardState>>,
    events: broadcast::Sender<TrackerEvent>,
    clock: Clock,
}

impl<S: RecordStore> Tracker<S> {
    pub fn new(store: S, window: DateWindow) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            sync: SyncClient::new(store, ApplicationCollection::new()),
            state: Arc::new(Mutex::new(DashboardState::new(window))),
            events,
            clock: Arc::new(|| Local::now().date_naive()),
        }
    }

    /// Replaces the source of "today" used for date windows.
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TrackerEvent> {
        self.events.subscribe()
    }

    pub fn sync_client(&self) -> &SyncClient<S> {
        &self.sync
    }

    pub fn applications(&self) -> CollectionSnapshot {
        self.sync.collection().snapshot()
    }

    fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    fn emit(&self, event: TrackerEvent) {
        let _ = self.events.send(event);
    }

    fn notify(&self, notice: Notice) {
        warn!("{}", notice.message);
        self.emit(TrackerEvent::Notice(notice));
    }

    async fn settle(&self) -> CollectionSnapshot {
        let snapshot = self.applications();
        let mut state = self.state.lock().await;
        if state.reconcile(&snapshot, self.today()) {
            info!(
                "Active statuses reseeded at revision {} ({} labels)",
                snapshot.revision(),
                state.active.len()
            );
        }
        snapshot
    }

    /// Reloads the collection from the Record Store.
    pub async fn refresh(&self) -> Result<CollectionSnapshot, SyncError> {
        match self.sync.fetch_all().await {
            Ok(installed) => {
                self.settle().await;
                self.emit(TrackerEvent::CollectionReplaced {
                    revision: installed.revision(),
                    len: installed.len(),
                });
                Ok(installed)
            }
            Err(err) => {
                self.notify(Notice::error(format!("Failed to load applications: {err}")));
                Err(err)
            }
        }
    }

    pub async fn fetch_one(&self, id: &RecordId) -> Result<Option<ApplicationRecord>, SyncError> {
        self.sync.fetch_one(id).await
    }

    pub async fn create(&self, input: &ApplicationInput) -> MutationOutcome {
        let outcome = self.sync.create(input).await;
        self.after_mutation(&outcome).await;
        outcome
    }

    /// Updates `id`; once the write is accepted the editing selection is
    /// cleared, whether or not the follow-up refresh succeeded.
    pub async fn update(&self, id: &RecordId, input: &ApplicationInput) -> MutationOutcome {
        let outcome = self.sync.update(id, input).await;
        if outcome.is_written() {
            self.state.lock().await.clear_edit();
        }
        self.after_mutation(&outcome).await;
        outcome
    }

    /// Form submission: updates the record being edited, or creates a new
    /// one when nothing is selected.
    pub async fn submit(&self, input: &ApplicationInput) -> MutationOutcome {
        let editing = self.state.lock().await.editing.clone();
        match editing {
            Some(id) => self.update(&id, input).await,
            None => self.create(input).await,
        }
    }

    pub async fn delete(&self, id: &RecordId) -> Result<(), SyncError> {
        match self.sync.remove(id).await {
            Ok(()) => {
                self.emit(TrackerEvent::RecordRemoved { id: id.clone() });
                {
                    let mut state = self.state.lock().await;
                    if state.editing.as_ref() == Some(id) {
                        state.clear_edit();
                    }
                }
                self.settle().await;
                Ok(())
            }
            Err(err) => {
                self.notify(Notice::error(format!("Failed to delete application: {err}")));
                Err(err)
            }
        }
    }

    async fn after_mutation(&self, outcome: &MutationOutcome) {
        match outcome {
            MutationOutcome::Written { .. } => {
                let snapshot = self.settle().await;
                self.emit(TrackerEvent::CollectionReplaced {
                    revision: snapshot.revision(),
                    len: snapshot.len(),
                });
            }
            MutationOutcome::WrittenButRefreshFailed { .. } => {
                if let Some(message) = outcome.user_message() {
                    self.notify(Notice::warning(message));
                }
            }
            MutationOutcome::WriteFailed { .. } => {
                if let Some(message) = outcome.user_message() {
                    error!("{message}");
                    self.emit(TrackerEvent::Notice(Notice::error(message)));
                }
            }
        }
    }

    /// Selects a record for editing and returns its form prefill. `None`
    /// when the id is not in the current collection.
    pub async fn begin_edit(&self, id: &RecordId) -> Option<ApplicationInput> {
        let snapshot = self.applications();
        let record = snapshot.find(id)?;
        self.state.lock().await.begin_edit(id.clone());
        Some(ApplicationInput::from_record(record))
    }

    pub async fn cancel_edit(&self) {
        self.state.lock().await.clear_edit();
    }

    pub async fn editing(&self) -> Option<RecordId> {
        self.state.lock().await.editing.clone()
    }

    pub async fn window(&self) -> DateWindow {
        self.state.lock().await.window
    }

    pub async fn dashboard(&self) -> AggregateView {
        let snapshot = self.applications();
        let today = self.today();
        let mut state = self.state.lock().await;
        state.reconcile(&snapshot, today);
        state.view(&snapshot, today)
    }

    pub async fn set_window(&self, window: DateWindow) -> AggregateView {
        let snapshot = self.applications();
        let today = self.today();
        let mut state = self.state.lock().await;
        state.set_window(window, &snapshot, today);
        info!("Date window set to {window}");
        state.view(&snapshot, today)
    }

    pub async fn toggle_status(&self, status: &ApplicationStatus) -> AggregateView {
        let snapshot = self.applications();
        let today = self.today();
        let mut state = self.state.lock().await;
        state.toggle_status(status, &snapshot, today);
        state.view(&snapshot, today)
    }

    /// Rows for the spreadsheet writer. An empty selection is an error the
    /// caller shows instead of writing an empty file.
    pub async fn export(&self, scope: ExportScope) -> Result<Vec<FlatRow>, ExportError> {
        let rows = match scope {
            ExportScope::All => project(self.applications().records()),
            ExportScope::Filtered => project(&self.dashboard().await.filtered),
        };

        if rows.is_empty() {
            let err = ExportError::empty(scope);
            self.notify(Notice::warning(err.to_string()));
            return Err(err);
        }
        Ok(rows)
    }
}
