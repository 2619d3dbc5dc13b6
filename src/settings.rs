use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::models::DateWindow;

/// Overrides `api_base_url` for this process without touching the file.
pub const API_URL_ENV: &str = "JOBTRACK_API_URL";
/// Settings file used by the binary.
pub const SETTINGS_PATH_ENV: &str = "JOBTRACK_SETTINGS";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/applications";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerSettings {
    pub api_base_url: String,
    pub default_window: DateWindow,
    pub export_sheet_name: String,
    pub export_file_name: String,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            default_window: DateWindow::AllTime,
            export_sheet_name: "Job Applications".into(),
            export_file_name: "JobApplications.xlsx".into(),
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<TrackerSettings>,
    api_url_override: Option<String>,
}

impl SettingsStore {
    /// Loads settings from `path`, falling back to defaults when the file is
    /// missing or not valid JSON. Honors `JOBTRACK_API_URL`.
    pub fn new(path: PathBuf) -> Result<Self> {
        let api_url_override = std::env::var(API_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty());
        Self::with_override(path, api_url_override)
    }

    pub fn with_override(path: PathBuf, api_url_override: Option<String>) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log::warn!(
                    "Ignoring malformed settings in {}: {err}",
                    path.display()
                );
                TrackerSettings::default()
            })
        } else {
            TrackerSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
            api_url_override,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> TrackerSettings {
        self.read().clone()
    }

    /// Effective Record Store URL, environment override first.
    pub fn api_base_url(&self) -> String {
        self.api_url_override
            .clone()
            .unwrap_or_else(|| self.read().api_base_url.clone())
    }

    pub fn default_window(&self) -> DateWindow {
        self.read().default_window
    }

    pub fn update_default_window(&self, window: DateWindow) -> Result<()> {
        let mut guard = self.write();
        guard.default_window = window;
        self.persist(&guard)
    }

    pub fn update_api_base_url(&self, url: impl Into<String>) -> Result<()> {
        let mut guard = self.write();
        guard.api_base_url = url.into();
        self.persist(&guard)
    }

    fn persist(&self, data: &TrackerSettings) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }

    fn read(&self) -> RwLockReadGuard<'_, TrackerSettings> {
        match self.data.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, TrackerSettings> {
        match self.data.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
