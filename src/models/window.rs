use std::{fmt, str::FromStr};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Date window used to narrow the dashboard to recent applications.
///
/// Windows are evaluated against "today" at call time and never stored with
/// the records, so the same collection can select differently tomorrow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DateWindow {
    #[default]
    AllTime,
    Today,
    Yesterday,
    LastNDays(u32),
}

impl DateWindow {
    /// Whether `date` falls inside the window ending at `today`.
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            DateWindow::AllTime => true,
            DateWindow::Today => date == today,
            DateWindow::Yesterday => today
                .checked_sub_days(Days::new(1))
                .is_some_and(|yesterday| date == yesterday),
            DateWindow::LastNDays(0) => false,
            DateWindow::LastNDays(n) => {
                let span = Days::new(u64::from(*n) - 1);
                let start = today.checked_sub_days(span).unwrap_or(NaiveDate::MIN);
                start <= date && date <= today
            }
        }
    }

    pub fn key(&self) -> String {
        match self {
            DateWindow::AllTime => "all".into(),
            DateWindow::Today => "today".into(),
            DateWindow::Yesterday => "yesterday".into(),
            DateWindow::LastNDays(n) => format!("last{n}days"),
        }
    }
}

impl FromStr for DateWindow {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "all" | "alltime" => Ok(DateWindow::AllTime),
            "today" => Ok(DateWindow::Today),
            "yesterday" => Ok(DateWindow::Yesterday),
            other => other
                .strip_prefix("last")
                .and_then(|rest| rest.strip_suffix("days"))
                .and_then(|n| n.parse::<u32>().ok())
                .map(DateWindow::LastNDays)
                .ok_or_else(|| format!("unknown date window '{value}'")),
        }
    }
}

impl TryFrom<String> for DateWindow {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DateWindow> for String {
    fn from(window: DateWindow) -> Self {
        window.key()
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateWindow::AllTime => f.write_str("All"),
            DateWindow::Today => f.write_str("Today"),
            DateWindow::Yesterday => f.write_str("Yesterday"),
            DateWindow::LastNDays(n) => write!(f, "Past {n} Days"),
        }
    }
}
