use chrono::NaiveDate;

use crate::aggregation::{ActiveStatusSet, AggregateView};
use crate::collection::CollectionSnapshot;
use crate::models::{ApplicationStatus, DateWindow, RecordId};

/// Mutable dashboard selections, kept apart from the records themselves.
///
/// The active set follows a small state machine: it is reseeded to "every
/// label with records in the window" when the window changes or the
/// collection moves to a new revision, and otherwise only changes through
/// single-label toggles.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub window: DateWindow,
    pub active: ActiveStatusSet,
    pub editing: Option<RecordId>,
    /// Collection revision the active set was last seeded from.
    pub seeded_revision: Option<u64>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(DateWindow::AllTime)
    }
}

impl DashboardState {
    pub fn new(window: DateWindow) -> Self {
        Self {
            window,
            active: ActiveStatusSet::default(),
            editing: None,
            seeded_revision: None,
        }
    }

    fn reseed(&mut self, snapshot: &CollectionSnapshot, today: NaiveDate) {
        self.active = AggregateView::default_active(snapshot.records(), self.window, today);
        self.seeded_revision = Some(snapshot.revision());
    }

    /// Reseeds the active set if the collection changed since the last
    /// seed. Returns whether it did.
    pub fn reconcile(&mut self, snapshot: &CollectionSnapshot, today: NaiveDate) -> bool {
        if self.seeded_revision == Some(snapshot.revision()) {
            return false;
        }
        self.reseed(snapshot, today);
        true
    }

    /// Switches window and always reseeds, even to the same window.
    pub fn set_window(
        &mut self,
        window: DateWindow,
        snapshot: &CollectionSnapshot,
        today: NaiveDate,
    ) {
        self.window = window;
        self.reseed(snapshot, today);
    }

    pub fn toggle_status(
        &mut self,
        status: &ApplicationStatus,
        snapshot: &CollectionSnapshot,
        today: NaiveDate,
    ) {
        self.reconcile(snapshot, today);
        self.active = self.active.toggled(status);
    }

    pub fn begin_edit(&mut self, id: RecordId) {
        self.editing = Some(id);
    }

    pub fn clear_edit(&mut self) {
        self.editing = None;
    }

    pub fn view(&self, snapshot: &CollectionSnapshot, today: NaiveDate) -> AggregateView {
        AggregateView::compute(snapshot.records(), self.window, &self.active, today)
    }
}
