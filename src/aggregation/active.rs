use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::ApplicationStatus;

use super::StatusCounts;

/// Status labels currently included in the chart and its total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActiveStatusSet {
    labels: BTreeSet<ApplicationStatus>,
}

impl ActiveStatusSet {
    /// Every label that has at least one record in `counts`.
    pub fn seeded_from(counts: &StatusCounts) -> Self {
        Self {
            labels: counts.nonzero_labels().cloned().collect(),
        }
    }

    pub fn contains(&self, status: &ApplicationStatus) -> bool {
        self.labels.contains(status)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ApplicationStatus> {
        self.labels.iter()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Adds `status` if absent, removes it if present.
    pub fn toggled(&self, status: &ApplicationStatus) -> Self {
        let mut labels = self.labels.clone();
        if !labels.remove(status) {
            labels.insert(status.clone());
        }
        Self { labels }
    }
}

impl FromIterator<ApplicationStatus> for ActiveStatusSet {
    fn from_iter<I: IntoIterator<Item = ApplicationStatus>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().collect(),
        }
    }
}

/// Single-label symmetric difference on the active set.
pub fn toggle_status(active: &ActiveStatusSet, status: &ApplicationStatus) -> ActiveStatusSet {
    active.toggled(status)
}
