mod common;

use proptest::prelude::*;

use common::{days_ago, record, today};
use jobtrack_lib::aggregation::{
    count_by_status, filter_by_window, toggle_status, ActiveStatusSet, AggregateView,
};
use jobtrack_lib::models::AppliedOn;
use jobtrack_lib::{ApplicationRecord, ApplicationStatus, DateWindow, RecordId};

fn status_strategy() -> impl Strategy<Value = Option<ApplicationStatus>> {
    prop_oneof![
        1 => Just(None),
        6 => prop::sample::select(ApplicationStatus::CANONICAL.to_vec()).prop_map(Some),
        1 => "[a-z]{3,8}".prop_map(|label| Some(ApplicationStatus::from(label))),
    ]
}

fn applied_strategy() -> impl Strategy<Value = AppliedOn> {
    prop_oneof![
        8 => (0u64..60).prop_map(|days| AppliedOn::Date(days_ago(days))),
        1 => Just(AppliedOn::Unparsed("someday".into())),
        1 => Just(AppliedOn::Missing),
    ]
}

fn records_strategy() -> impl Strategy<Value = Vec<ApplicationRecord>> {
    prop::collection::vec((status_strategy(), applied_strategy()), 0..40).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(index, (status, date_applied))| ApplicationRecord {
                id: Some(RecordId::Numeric(index as i64 + 1)),
                company: format!("Company {index}"),
                position: "Engineer".into(),
                status,
                date_applied,
                notes: None,
                last_updated: None,
            })
            .collect()
    })
}

fn window_strategy() -> impl Strategy<Value = DateWindow> {
    prop_oneof![
        Just(DateWindow::AllTime),
        Just(DateWindow::Today),
        Just(DateWindow::Yesterday),
        (0u32..90).prop_map(DateWindow::LastNDays),
    ]
}

proptest! {
    #[test]
    fn all_time_keeps_every_record(records in records_strategy()) {
        let filtered = filter_by_window(&records, DateWindow::AllTime, today());
        prop_assert_eq!(filtered, records);
    }

    #[test]
    fn windowed_records_carry_dates_inside_the_window(
        records in records_strategy(),
        window in window_strategy(),
    ) {
        let filtered = filter_by_window(&records, window, today());
        prop_assert!(filtered.len() <= records.len());
        if window != DateWindow::AllTime {
            for row in &filtered {
                let date = row.applied_on();
                prop_assert!(date.is_some());
                prop_assert!(window.contains(date.unwrap(), today()));
            }
        }
    }

    #[test]
    fn counts_cover_every_labelled_record(records in records_strategy()) {
        let counts = count_by_status(&records);
        let labelled = records.iter().filter(|row| row.status.is_some()).count() as u64;
        prop_assert_eq!(counts.total(), labelled);
        for status in ApplicationStatus::CANONICAL.iter() {
            prop_assert!(counts.labels().any(|label| label == status));
        }
    }

    #[test]
    fn shares_sum_to_one_hundred_or_zero(
        records in records_strategy(),
        window in window_strategy(),
        hidden in prop::sample::select(ApplicationStatus::CANONICAL.to_vec()),
    ) {
        let seeded = AggregateView::default_active(&records, window, today());
        let active = toggle_status(&seeded, &hidden);
        let view = AggregateView::compute(&records, window, &active, today());

        let sum: f64 = view.series.iter().map(|share| share.percent).sum();
        if view.active_total == 0 {
            prop_assert!(view.series.is_empty());
        } else {
            prop_assert!((sum - 100.0).abs() < 1e-6, "sum was {}", sum);
        }
        prop_assert!(view.series.iter().all(|share| active.contains(&share.label) && share.value > 0));
    }

    #[test]
    fn toggling_twice_is_identity(
        records in records_strategy(),
        status in status_strategy(),
    ) {
        let status = status.unwrap_or(ApplicationStatus::Wishlist);
        let active = AggregateView::default_active(&records, DateWindow::AllTime, today());
        let twice = toggle_status(&toggle_status(&active, &status), &status);
        prop_assert_eq!(twice, active);
    }

    #[test]
    fn default_active_set_is_the_nonzero_labels(
        records in records_strategy(),
        window in window_strategy(),
    ) {
        let active = AggregateView::default_active(&records, window, today());
        let counts = count_by_status(&filter_by_window(&records, window, today()));
        let expected: ActiveStatusSet = counts.nonzero_labels().cloned().collect();
        prop_assert_eq!(active, expected);
    }
}

#[test]
fn empty_collection_has_nothing_active() {
    let active = AggregateView::default_active(&[], DateWindow::AllTime, today());
    assert!(active.is_empty());

    let view = AggregateView::compute(&[], DateWindow::AllTime, &active, today());
    assert_eq!(view.active_total, 0);
    assert!(view.series.is_empty());
    assert!(view.legend.iter().all(|entry| entry.count == 0 && entry.percent == 0.0));
}

#[test]
fn past_week_excludes_older_applications() {
    let records = vec![
        record(1, "Acme", ApplicationStatus::Applied, today()),
        record(2, "Globex", ApplicationStatus::Offer, days_ago(10)),
    ];
    let window = DateWindow::LastNDays(7);

    let filtered = filter_by_window(&records, window, today());
    assert_eq!(filtered, vec![records[0].clone()]);

    let counts = count_by_status(&filtered);
    assert_eq!(counts.get(&ApplicationStatus::Applied), 1);
    for status in &ApplicationStatus::CANONICAL[1..] {
        assert_eq!(counts.get(status), 0);
    }
}

#[test]
fn toggling_a_zero_count_label_only_changes_membership() {
    let records = vec![record(1, "Acme", ApplicationStatus::Applied, today())];
    let active = AggregateView::default_active(&records, DateWindow::AllTime, today());
    let before = AggregateView::compute(&records, DateWindow::AllTime, &active, today());

    let toggled = toggle_status(&active, &ApplicationStatus::Rejected);
    let after = AggregateView::compute(&records, DateWindow::AllTime, &toggled, today());

    assert_eq!(before.active_total, after.active_total);
    assert_eq!(before.series, after.series);
    assert!(toggled.contains(&ApplicationStatus::Rejected));

    let back = toggle_status(&toggled, &ApplicationStatus::Rejected);
    assert!(!back.contains(&ApplicationStatus::Rejected));
    assert_eq!(back, active);
}
