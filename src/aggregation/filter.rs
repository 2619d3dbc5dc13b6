use chrono::NaiveDate;

use crate::models::{ApplicationRecord, DateWindow};

/// Records whose applied date falls in `window`, in collection order.
///
/// Rows without a usable date only survive `AllTime`.
pub fn filter_by_window(
    records: &[ApplicationRecord],
    window: DateWindow,
    today: NaiveDate,
) -> Vec<ApplicationRecord> {
    if window == DateWindow::AllTime {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|record| {
            record
                .applied_on()
                .is_some_and(|date| window.contains(date, today))
        })
        .cloned()
        .collect()
}
