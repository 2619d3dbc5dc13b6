use serde::Serialize;

use crate::models::{ApplicationRecord, ApplicationStatus};

/// Per-label record counts.
///
/// Always holds the five canonical labels (possibly at zero) in canonical
/// order, followed by any other labels in the order they were first seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    entries: Vec<(ApplicationStatus, u64)>,
}

impl Default for StatusCounts {
    fn default() -> Self {
        Self {
            entries: ApplicationStatus::CANONICAL
                .into_iter()
                .map(|status| (status, 0))
                .collect(),
        }
    }
}

impl StatusCounts {
    pub fn get(&self, status: &ApplicationStatus) -> u64 {
        self.entries
            .iter()
            .find(|(label, _)| label == status)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ApplicationStatus, u64)> {
        self.entries.iter().map(|(label, count)| (label, *count))
    }

    pub fn labels(&self) -> impl Iterator<Item = &ApplicationStatus> {
        self.entries.iter().map(|(label, _)| label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Labels with at least one record.
    pub fn nonzero_labels(&self) -> impl Iterator<Item = &ApplicationStatus> {
        self.entries
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(label, _)| label)
    }

    fn increment(&mut self, status: &ApplicationStatus) {
        match self.entries.iter_mut().find(|(label, _)| label == status) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((status.clone(), 1)),
        }
    }
}

/// Counts records per status label. Records without a status, or with a
/// blank label, are skipped.
pub fn count_by_status(records: &[ApplicationRecord]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    let labelled = records
        .iter()
        .filter_map(|record| record.status.as_ref())
        .filter(|status| !status.as_str().trim().is_empty());
    for status in labelled {
        counts.increment(status);
    }
    counts
}
