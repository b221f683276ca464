// SPDX-License-Identifier: MIT
// Copyright (c) 2020 Austin Goudge
// Copyright (c) 2026 StarTuz

pub mod command;
pub mod compose;
pub mod config;
pub mod direct;
pub mod dispatch;
pub mod entry;
pub mod frd;
pub mod gesture;
pub mod preferential;
pub mod response;
pub mod route;

use std::path::{Path, PathBuf};
use thiserror::Error;

pub use command::Command;
pub use compose::{ComposeBuffer, Submission};
pub use config::EdstConfig;
pub use dispatch::{interpret, CommandContext, Interpreter};
pub use entry::{EntryPatch, EntrySnapshot, FlightEntry};
pub use frd::{FrdResolver, StaticFrdResolver};
pub use response::{CommandResult, Intent, RejectKind, Status};

#[derive(Error, Debug)]
pub enum EdstError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid entry snapshot: {0}")]
    InvalidSnapshot(String),
}

pub fn get_config_root() -> PathBuf {
    directories::ProjectDirs::from("org", "edst", "edst-oxide")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".edst"))
}

/// Reads a JSON array of entries as exported by the flight-data feed.
pub fn load_snapshot(path: &Path) -> Result<Vec<FlightEntry>, EdstError> {
    let content = std::fs::read_to_string(path)?;
    let entries: Vec<FlightEntry> = serde_json::from_str(&content)?;

    let mut seen = std::collections::HashSet::new();
    for entry in &entries {
        if entry.aircraft_id.is_empty() {
            return Err(EdstError::InvalidSnapshot(
                "entry without aircraftId".to_string(),
            ));
        }
        if !seen.insert(entry.aircraft_id.as_str()) {
            return Err(EdstError::InvalidSnapshot(format!(
                "duplicate aircraftId {}",
                entry.aircraft_id
            )));
        }
    }

    log::info!("Loaded {} entries from {:?}", entries.len(), path);
    Ok(entries)
}
