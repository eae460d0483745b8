/// Reading and writing schedule files.
///
/// Schedules are stored as pretty-printed JSON. A loaded template becomes a
/// fresh history baseline; saving never touches the history.
use std::path::Path;

use anyhow::{Context, Result};

use crate::schedule::Schedule;

/// Loads a schedule from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid schedule,
/// including spans that end before they start.
pub fn load_template(path: &Path) -> Result<Schedule> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read template: {}", path.display()))?;
    let schedule: Schedule = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse template: {}", path.display()))?;
    for event in &schedule.events {
        event.time.validate().with_context(|| {
            format!("invalid event '{}' in template: {}", event.title, path.display())
        })?;
    }
    tracing::info!(
        "Loaded template {} ({} events)",
        path.display(),
        schedule.len()
    );
    Ok(schedule)
}

/// Writes `schedule` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_document(path: &Path, schedule: &Schedule) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(schedule).context("failed to serialize schedule")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write file: {}", path.display()))?;
    Ok(())
}
