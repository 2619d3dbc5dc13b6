use anyhow::{anyhow, bail, Context, Result};
use log::info;

use crate::{
    dashboard::Tracker,
    export::{ExportScope, EXPORT_HEADERS},
    models::DateWindow,
    settings::SettingsStore,
    sync::RecordStore,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Dashboard(Option<DateWindow>),
    Export(ExportScope, Option<DateWindow>),
    /// Show settings, or change one and write it through.
    Config(Option<SettingChange>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingChange {
    ApiUrl(String),
    DefaultWindow(DateWindow),
}

const USAGE: &str = "usage: jobtrack [list | dashboard [window] | export [all|filtered] [window] \
                     | config [api-url <url> | window <window>]]";

pub fn parse_args<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    let parse_window = |raw: Option<&String>| -> Result<Option<DateWindow>> {
        raw.map(|value| value.parse::<DateWindow>().map_err(|err| anyhow!(err)))
            .transpose()
    };

    match args.first().map(String::as_str) {
        None | Some("list") => Ok(Command::List),
        Some("dashboard") => Ok(Command::Dashboard(parse_window(args.get(1))?)),
        Some("export") => {
            let scope = match args.get(1).map(String::as_str) {
                None | Some("filtered") => ExportScope::Filtered,
                Some("all") => ExportScope::All,
                Some(other) => bail!("unknown export scope '{other}'\n{USAGE}"),
            };
            Ok(Command::Export(scope, parse_window(args.get(2))?))
        }
        Some("config") => {
            let change = match (args.get(1).map(String::as_str), args.get(2)) {
                (None, _) => None,
                (Some("api-url"), Some(url)) => Some(SettingChange::ApiUrl(url.clone())),
                (Some("window"), Some(_)) => {
                    parse_window(args.get(2))?.map(SettingChange::DefaultWindow)
                }
                (Some(other), _) => bail!("cannot set '{other}' this way\n{USAGE}"),
            };
            Ok(Command::Config(change))
        }
        Some(other) => bail!("unknown command '{other}'\n{USAGE}"),
    }
}

pub async fn execute<S: RecordStore>(
    tracker: &Tracker<S>,
    settings: &SettingsStore,
    command: Command,
) -> Result<()> {
    if let Command::Config(change) = command {
        return configure(settings, change);
    }

    tracker
        .refresh()
        .await
        .context("Failed to load applications")?;

    match command {
        Command::List => {
            let snapshot = tracker.applications();
            if snapshot.is_empty() {
                println!("No applications added yet.");
            }
            for record in snapshot.records() {
                println!(
                    "{:<8} {:<24} {:<24} {:<14} {}",
                    record.id.as_ref().map(ToString::to_string).unwrap_or_default(),
                    record.company,
                    record.position,
                    record.status.as_ref().map(|s| s.as_str()).unwrap_or(""),
                    record.date_applied,
                );
            }
        }
        Command::Dashboard(window) => {
            let view = match window {
                Some(window) => tracker.set_window(window).await,
                None => tracker.dashboard().await,
            };
            println!("{}: {} applications", view.window, view.filtered.len());
            for entry in &view.legend {
                let marker = if entry.active { '*' } else { ' ' };
                println!("{marker} {:<14} {}", entry.label.as_str(), entry.display_value());
            }
            println!("Total: {}", view.active_total);
        }
        Command::Export(scope, window) => {
            if let Some(window) = window {
                tracker.set_window(window).await;
            }
            let rows = tracker.export(scope).await?;
            let current = settings.settings();
            info!(
                "Exporting {} rows for sheet '{}' ({})",
                rows.len(),
                current.export_sheet_name,
                current.export_file_name
            );
            let payload = serde_json::json!({
                "sheet": current.export_sheet_name,
                "file": current.export_file_name,
                "headers": EXPORT_HEADERS,
                "rows": rows,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        Command::Config(_) => {}
    }

    Ok(())
}

/// Applies `change`, if any, then prints the effective settings.
pub fn configure(settings: &SettingsStore, change: Option<SettingChange>) -> Result<()> {
    match change {
        Some(SettingChange::ApiUrl(url)) => {
            settings.update_api_base_url(url)?;
            info!("Record Store URL saved to {}", settings.path().display());
        }
        Some(SettingChange::DefaultWindow(window)) => {
            settings.update_default_window(window)?;
            info!("Default window saved to {}", settings.path().display());
        }
        None => {}
    }

    let current = settings.settings();
    println!("settings file: {}", settings.path().display());
    println!("api url:       {}", settings.api_base_url());
    println!("window:        {}", current.default_window.key());
    println!("export:        {} ({})", current.export_file_name, current.export_sheet_name);
    Ok(())
}
