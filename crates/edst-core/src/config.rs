// SPDX-License-Identifier: MIT
// Copyright (c) 2020 Austin Goudge
// Copyright (c) 2026 StarTuz

use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::dispatch::{CommandContext, DEFAULT_REMOVAL_TIMEOUT_SECS};
use crate::EdstError;

const CONFIG_FILE: &str = "edst.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdstConfig {
    pub artcc_id: String,
    #[serde(default)]
    pub manual_posting: bool,
    /// Base URL of the flight-data server used for FRD lookups.
    #[serde(default)]
    pub frd_url: Option<String>,
    #[serde(default = "default_removal_timeout")]
    pub removal_timeout_secs: i64,
}

fn default_removal_timeout() -> i64 {
    DEFAULT_REMOVAL_TIMEOUT_SECS
}

impl Default for EdstConfig {
    fn default() -> Self {
        Self {
            artcc_id: "ZOA".to_string(),
            manual_posting: false,
            frd_url: None,
            removal_timeout_secs: DEFAULT_REMOVAL_TIMEOUT_SECS,
        }
    }
}

impl EdstConfig {
    pub fn default_path() -> PathBuf {
        crate::get_config_root().join(CONFIG_FILE)
    }

    /// Loads the config at `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, EdstError> {
        if !path.exists() {
            log::debug!("[Config] {:?} not found, using defaults", path);
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content).map_err(|e| {
            log::error!("[Config] JSON parse error for {:?}: {}", path, e);
            EdstError::Json(e)
        })?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), EdstError> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn context(&self) -> CommandContext {
        let mut context =
            CommandContext::new(self.artcc_id.clone()).with_manual_posting(self.manual_posting);
        match chrono::Duration::try_seconds(self.removal_timeout_secs) {
            Some(timeout) if timeout >= chrono::Duration::zero() => context.removal_timeout = timeout,
            _ => warn!(
                "[Config] removal_timeout_secs {} out of range, using {}",
                self.removal_timeout_secs, DEFAULT_REMOVAL_TIMEOUT_SECS
            ),
        }
        context
    }
}
