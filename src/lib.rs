pub mod aggregation;
pub mod cli;
pub mod collection;
pub mod dashboard;
pub mod export;
pub mod models;
pub mod settings;
pub mod sync;
mod utils;

use std::path::PathBuf;

use anyhow::Context;

pub use collection::{ApplicationCollection, CollectionSnapshot};
pub use dashboard::{Tracker, TrackerEvent};
pub use models::{ApplicationInput, ApplicationRecord, ApplicationStatus, DateWindow, RecordId};
pub use sync::{HttpRecordStore, MemoryRecordStore, MutationOutcome, RecordStore, SyncClient, SyncError};

use settings::{SettingsStore, SETTINGS_PATH_ENV};

const DEFAULT_SETTINGS_FILE: &str = "jobtrack.json";

/// Binary entry point: logging, settings, runtime, then one command.
pub fn run() -> anyhow::Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let settings_path = std::env::var(SETTINGS_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_SETTINGS_FILE));
    let settings = SettingsStore::new(settings_path)?;
    let base_url = settings.api_base_url();
    log::info!("jobtrack starting against {base_url}");

    let command = cli::parse_args(std::env::args().skip(1))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(async {
        let tracker = Tracker::new(HttpRecordStore::new(base_url), settings.default_window());
        cli::execute(&tracker, &settings, command).await
    })
}
