use std::fmt;

use serde::{Deserialize, Serialize};

/// Application status label.
///
/// The five canonical statuses are closed variants; any other label the
/// Record Store hands back is preserved verbatim in `Other` so it can still
/// be counted, toggled and exported.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Interviewing,
    Offer,
    Rejected,
    Wishlist,
    Other(String),
}

impl ApplicationStatus {
    /// Canonical labels, in display order.
    pub const CANONICAL: [ApplicationStatus; 5] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Interviewing,
        ApplicationStatus::Offer,
        ApplicationStatus::Rejected,
        ApplicationStatus::Wishlist,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Interviewing => "Interviewing",
            ApplicationStatus::Offer => "Offer",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Wishlist => "Wishlist",
            ApplicationStatus::Other(label) => label,
        }
    }

    pub fn is_canonical(&self) -> bool {
        !matches!(self, ApplicationStatus::Other(_))
    }

    /// Chart colour for the label. Unknown labels share a neutral grey.
    pub fn color(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "#3B82F6",
            ApplicationStatus::Interviewing => "#8B5CF6",
            ApplicationStatus::Offer => "#22C55E",
            ApplicationStatus::Rejected => "#EF4444",
            ApplicationStatus::Wishlist => "#F59E0B",
            ApplicationStatus::Other(_) => "#9CA3AF",
        }
    }
}

impl From<&str> for ApplicationStatus {
    fn from(value: &str) -> Self {
        match value {
            "Applied" => ApplicationStatus::Applied,
            "Interviewing" => ApplicationStatus::Interviewing,
            "Offer" => ApplicationStatus::Offer,
            "Rejected" => ApplicationStatus::Rejected,
            "Wishlist" => ApplicationStatus::Wishlist,
            other => ApplicationStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for ApplicationStatus {
    fn from(value: String) -> Self {
        match ApplicationStatus::from(value.as_str()) {
            ApplicationStatus::Other(_) => ApplicationStatus::Other(value),
            canonical => canonical,
        }
    }
}

impl From<ApplicationStatus> for String {
    fn from(status: ApplicationStatus) -> Self {
        match status {
            ApplicationStatus::Other(label) => label,
            canonical => canonical.as_str().to_string(),
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
