//! Flat rows handed to the spreadsheet writer.
//!
//! Column order and header names are part of the file format consumers
//! parse; do not reorder.

use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;

use crate::models::ApplicationRecord;

pub const EXPORT_HEADERS: [&str; 7] = [
    "ID",
    "Company",
    "Position",
    "Status",
    "Date Applied",
    "Last Updated",
    "Notes",
];

pub const MISSING_TIMESTAMP: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatRow {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Position")]
    pub position: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Date Applied")]
    pub date_applied: String,
    #[serde(rename = "Last Updated")]
    pub last_updated: String,
    #[serde(rename = "Notes")]
    pub notes: String,
}

impl FlatRow {
    /// Cell values in `EXPORT_HEADERS` order.
    pub fn cells(&self) -> [&str; 7] {
        [
            &self.id,
            &self.company,
            &self.position,
            &self.status,
            &self.date_applied,
            &self.last_updated,
            &self.notes,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    /// The whole collection.
    All,
    /// The dashboard's current date-window selection.
    Filtered,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("No applications to export.")]
    NothingToExport,
    #[error("No applications to export based on current filter.")]
    NothingInFilter,
}

impl ExportError {
    pub fn empty(scope: ExportScope) -> Self {
        match scope {
            ExportScope::All => ExportError::NothingToExport,
            ExportScope::Filtered => ExportError::NothingInFilter,
        }
    }
}

/// en-US `toLocaleString` shape, e.g. `6/1/2025, 2:05:09 PM`.
pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

pub fn project_row(record: &ApplicationRecord) -> FlatRow {
    FlatRow {
        id: record.id.as_ref().map(ToString::to_string).unwrap_or_default(),
        company: record.company.clone(),
        position: record.position.clone(),
        status: record
            .status
            .as_ref()
            .map(|status| status.as_str().to_string())
            .unwrap_or_default(),
        date_applied: record.date_applied.to_string(),
        last_updated: record
            .last_updated
            .as_ref()
            .map(format_timestamp)
            .unwrap_or_else(|| MISSING_TIMESTAMP.to_string()),
        notes: record.notes.clone().unwrap_or_default(),
    }
}

pub fn project(records: &[ApplicationRecord]) -> Vec<FlatRow> {
    records.iter().map(project_row).collect()
}
