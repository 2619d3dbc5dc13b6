//! Derived dashboard views over the canonical collection.
//!
//! Everything here is a pure function of its inputs. Views are recomputed
//! from scratch whenever the collection, the date window or the active
//! status set changes; nothing is cached between calls.

pub mod active;
pub mod counts;
pub mod filter;
pub mod series;

pub use active::{toggle_status, ActiveStatusSet};
pub use counts::{count_by_status, StatusCounts};
pub use filter::filter_by_window;
pub use series::{
    active_series, legend, percentages, series_total, LegendEntry, SeriesPoint, SeriesShare,
};

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{ApplicationRecord, DateWindow};

/// Everything the dashboard renders for one combination of inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateView {
    pub window: DateWindow,
    pub filtered: Vec<ApplicationRecord>,
    pub counts: StatusCounts,
    pub active: ActiveStatusSet,
    pub series: Vec<SeriesShare>,
    pub active_total: u64,
    pub legend: Vec<LegendEntry>,
}

impl AggregateView {
    pub fn compute(
        records: &[ApplicationRecord],
        window: DateWindow,
        active: &ActiveStatusSet,
        today: NaiveDate,
    ) -> Self {
        let filtered = filter_by_window(records, window, today);
        let counts = count_by_status(&filtered);
        let series = active_series(&counts, active);
        let active_total = series_total(&series);
        let legend = legend(&counts, active);

        Self {
            window,
            filtered,
            active: active.clone(),
            series: percentages(&series),
            active_total,
            legend,
            counts,
        }
    }

    /// Active set a fresh view of these inputs would start from.
    pub fn default_active(
        records: &[ApplicationRecord],
        window: DateWindow,
        today: NaiveDate,
    ) -> ActiveStatusSet {
        ActiveStatusSet::seeded_from(&count_by_status(&filter_by_window(records, window, today)))
    }
}
