// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Persisted user settings

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory name under the home directory holding user configuration
pub const CONFIG_DIR_NAME: &str = ".romshelf";

/// Values that survive restarts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsData {
    /// Index into the sort state list
    pub game_list_sort_index: usize,
}

/// Settings bound to an optional backing file
///
/// Without a path nothing is written, which is what tests use.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    data: SettingsData,
    path: Option<PathBuf>,
}

impl Settings {
    /// Settings that are never written to disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load from `path`, falling back to defaults if it cannot be read
    pub fn load_or_default(path: &Path) -> Self {
        let data = Self::read(path).unwrap_or_else(|e| {
            log::info!("Using default settings (failed to load: {})", e);
            SettingsData::default()
        });
        Self {
            data,
            path: Some(path.to_path_buf()),
        }
    }

    fn read(path: &Path) -> Result<SettingsData, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Write to the backing file, if any
    pub fn save(&self) -> Result<(), ConfigError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let contents = toml::to_string_pretty(&self.data)?;
        std::fs::write(path, contents).map_err(|source| ConfigError::Write {
            path: path.clone(),
            source,
        })
    }

    #[inline(always)]
    pub fn sort_index(&self) -> usize {
        self.data.game_list_sort_index
    }

    /// Change the sort index and persist it
    ///
    /// A failed write is logged; the in-memory value is updated regardless.
    pub fn set_sort_index(&mut self, index: usize) {
        self.data.game_list_sort_index = index;
        if let Err(e) = self.save() {
            log::error!("Failed to save settings: {}", e);
        }
    }

    /// Backing file path
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Per-user configuration directory (`~/.romshelf`)
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_defaults() {
        let mut settings = Settings::in_memory();
        assert_eq!(settings.sort_index(), 0);
        settings.set_sort_index(3);
        assert_eq!(settings.sort_index(), 3);
        assert!(settings.path().is_none());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_or_default(&dir.path().join("settings.toml"));
        assert_eq!(settings.sort_index(), 0);
    }

    #[test]
    fn test_sort_index_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");

        let mut settings = Settings::load_or_default(&path);
        settings.set_sort_index(5);

        let reloaded = Settings::load_or_default(&path);
        assert_eq!(reloaded.sort_index(), 5);
    }

    #[test]
    fn test_broken_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "game_list_sort_index = \"three\"").unwrap();

        let settings = Settings::load_or_default(&path);
        assert_eq!(settings.sort_index(), 0);
    }
}
