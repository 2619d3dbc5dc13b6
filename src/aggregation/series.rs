use serde::Serialize;

use crate::models::ApplicationStatus;

use super::{ActiveStatusSet, StatusCounts};

/// One chart slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub label: ApplicationStatus,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesShare {
    pub label: ApplicationStatus,
    pub value: u64,
    pub percent: f64,
}

/// Legend row: every counted label, active or not, with its share of the
/// active total.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    pub label: ApplicationStatus,
    pub count: u64,
    pub percent: f64,
    pub active: bool,
    pub color: &'static str,
}

impl LegendEntry {
    /// `"{count} ({percent:.1}%)"`
    pub fn display_value(&self) -> String {
        format!("{} ({:.1}%)", self.count, self.percent)
    }
}

/// Counts restricted to active labels with a nonzero value, in `counts`
/// order.
pub fn active_series(counts: &StatusCounts, active: &ActiveStatusSet) -> Vec<SeriesPoint> {
    counts
        .iter()
        .filter(|(label, value)| *value > 0 && active.contains(label))
        .map(|(label, value)| SeriesPoint {
            label: label.clone(),
            value,
        })
        .collect()
}

pub fn series_total(series: &[SeriesPoint]) -> u64 {
    series.iter().map(|point| point.value).sum()
}

fn percent_of(value: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * value as f64 / total as f64
    }
}

/// Each slice's share of the series total. A zero total yields 0 rather
/// than NaN.
pub fn percentages(series: &[SeriesPoint]) -> Vec<SeriesShare> {
    let total = series_total(series);
    series
        .iter()
        .map(|point| SeriesShare {
            label: point.label.clone(),
            value: point.value,
            percent: percent_of(point.value, total),
        })
        .collect()
}

pub fn legend(counts: &StatusCounts, active: &ActiveStatusSet) -> Vec<LegendEntry> {
    let active_total = series_total(&active_series(counts, active));
    counts
        .iter()
        .map(|(label, count)| LegendEntry {
            label: label.clone(),
            count,
            percent: percent_of(count, active_total),
            active: active.contains(label),
            color: label.color(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::count_by_status;
    use crate::models::{AppliedOn, ApplicationRecord};

    fn records(statuses: &[&str]) -> Vec<ApplicationRecord> {
        statuses
            .iter()
            .map(|status| ApplicationRecord {
                id: None,
                company: "Acme".into(),
                position: "Engineer".into(),
                status: Some(ApplicationStatus::from(*status)),
                date_applied: AppliedOn::Missing,
                notes: None,
                last_updated: None,
            })
            .collect()
    }

    #[test]
    fn inactive_and_empty_labels_are_left_out() {
        let counts = count_by_status(&records(&["Applied", "Applied", "Offer", "Rejected"]));
        let active: ActiveStatusSet = [
            ApplicationStatus::Applied,
            ApplicationStatus::Offer,
            ApplicationStatus::Wishlist,
        ]
        .into_iter()
        .collect();

        let series = active_series(&counts, &active);
        assert_eq!(
            series,
            vec![
                SeriesPoint { label: ApplicationStatus::Applied, value: 2 },
                SeriesPoint { label: ApplicationStatus::Offer, value: 1 },
            ]
        );
        assert_eq!(series_total(&series), 3);
    }

    #[test]
    fn empty_series_has_no_nan() {
        assert!(percentages(&[]).is_empty());

        let counts = count_by_status(&records(&["Applied"]));
        let entries = legend(&counts, &ActiveStatusSet::default());
        assert!(entries.iter().all(|entry| entry.percent == 0.0));
        assert!(entries.iter().all(|entry| !entry.active));
    }

    #[test]
    fn legend_uses_active_total_for_every_row() {
        let counts = count_by_status(&records(&["Applied", "Applied", "Applied", "Offer"]));
        let active: ActiveStatusSet = [ApplicationStatus::Applied].into_iter().collect();

        let entries = legend(&counts, &active);
        let offer = entries
            .iter()
            .find(|entry| entry.label == ApplicationStatus::Offer)
            .unwrap();
        assert!(!offer.active);
        assert_eq!(offer.display_value(), "1 (33.3%)");

        let applied = &entries[0];
        assert!(applied.active);
        assert_eq!(applied.display_value(), "3 (100.0%)");
        assert_eq!(applied.color, "#3B82F6");
    }
}
