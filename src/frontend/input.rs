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

//! Keyboard bindings
//!
//! Maps physical keys to the browser's logical [`Action`]s. Bindings are
//! stored in a TOML file keyed by key name:
//!
//! ```toml
//! [key_mapping]
//! ArrowUp = "up"
//! Enter = "confirm"
//! ```

use crate::core::browser::{Action, InputEvent};
use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use winit::keyboard::KeyCode;

/// Default bindings file name
pub const INPUT_CONFIG_FILE: &str = "input.toml";

/// Input configuration that can be saved/loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Key name to action
    pub key_mapping: HashMap<String, Action>,
}

impl InputConfig {
    /// Create default configuration
    pub fn default_config() -> Self {
        let bindings = [
            // Navigation
            (KeyCode::ArrowUp, Action::Up),
            (KeyCode::KeyW, Action::Up),
            (KeyCode::ArrowDown, Action::Down),
            (KeyCode::KeyS, Action::Down),
            (KeyCode::ArrowLeft, Action::Left),
            (KeyCode::KeyA, Action::Left),
            (KeyCode::ArrowRight, Action::Right),
            (KeyCode::KeyD, Action::Right),
            (KeyCode::PageUp, Action::PageUp),
            (KeyCode::PageDown, Action::PageDown),
            // Accept/back
            (KeyCode::Enter, Action::Confirm),
            (KeyCode::KeyX, Action::Confirm),
            (KeyCode::Escape, Action::Cancel),
            (KeyCode::Backspace, Action::Cancel),
            (KeyCode::KeyZ, Action::Cancel),
            // Sorting
            (KeyCode::KeyQ, Action::PrevSort),
            (KeyCode::KeyE, Action::NextSort),
            // Host screens
            (KeyCode::Tab, Action::Menu),
            (KeyCode::KeyF, Action::FastSelect),
            (KeyCode::Delete, Action::EditMetadata),
            (KeyCode::F5, Action::OpenScraper),
        ];

        let key_mapping = bindings
            .into_iter()
            .map(|(key, action)| (keycode_to_string(key), action))
            .collect();

        Self { key_mapping }
    }

    /// Load configuration from TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Keys that may appear in the bindings file
const KEY_NAMES: &[KeyCode] = &[
    KeyCode::KeyA,
    KeyCode::KeyB,
    KeyCode::KeyC,
    KeyCode::KeyD,
    KeyCode::KeyE,
    KeyCode::KeyF,
    KeyCode::KeyG,
    KeyCode::KeyH,
    KeyCode::KeyI,
    KeyCode::KeyJ,
    KeyCode::KeyK,
    KeyCode::KeyL,
    KeyCode::KeyM,
    KeyCode::KeyN,
    KeyCode::KeyO,
    KeyCode::KeyP,
    KeyCode::KeyQ,
    KeyCode::KeyR,
    KeyCode::KeyS,
    KeyCode::KeyT,
    KeyCode::KeyU,
    KeyCode::KeyV,
    KeyCode::KeyW,
    KeyCode::KeyX,
    KeyCode::KeyY,
    KeyCode::KeyZ,
    KeyCode::Digit0,
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
    KeyCode::ArrowUp,
    KeyCode::ArrowDown,
    KeyCode::ArrowLeft,
    KeyCode::ArrowRight,
    KeyCode::PageUp,
    KeyCode::PageDown,
    KeyCode::Home,
    KeyCode::End,
    KeyCode::Insert,
    KeyCode::Delete,
    KeyCode::Enter,
    KeyCode::Escape,
    KeyCode::Backspace,
    KeyCode::Tab,
    KeyCode::Space,
    KeyCode::ShiftLeft,
    KeyCode::ShiftRight,
    KeyCode::ControlLeft,
    KeyCode::ControlRight,
    KeyCode::AltLeft,
    KeyCode::AltRight,
    KeyCode::F1,
    KeyCode::F2,
    KeyCode::F3,
    KeyCode::F4,
    KeyCode::F5,
    KeyCode::F6,
    KeyCode::F7,
    KeyCode::F8,
    KeyCode::F9,
    KeyCode::F10,
    KeyCode::F11,
    KeyCode::F12,
];

/// Convert KeyCode to a string representation for serialization
pub(crate) fn keycode_to_string(key: KeyCode) -> String {
    format!("{:?}", key)
}

/// Convert string representation back to KeyCode
///
/// Names are the `Debug` form of the variant, e.g. `ArrowUp` or `KeyW`.
pub(crate) fn string_to_keycode(s: &str) -> Option<KeyCode> {
    KEY_NAMES
        .iter()
        .copied()
        .find(|&key| keycode_to_string(key) == s)
}

/// Human readable action name
pub fn action_name(action: Action) -> &'static str {
    match action {
        Action::Confirm => "Confirm",
        Action::Cancel => "Back",
        Action::Left => "Previous system",
        Action::Right => "Next system",
        Action::Up => "Up",
        Action::Down => "Down",
        Action::PageUp => "Page up",
        Action::PageDown => "Page down",
        Action::NextSort => "Next sort",
        Action::PrevSort => "Previous sort",
        Action::Menu => "Menu",
        Action::FastSelect => "Fast select",
        Action::EditMetadata => "Edit game",
        Action::OpenScraper => "Scraper",
    }
}

/// Keyboard to [`Action`] mapping
///
/// Supports customizable key bindings and configuration persistence.
pub struct InputHandler {
    /// KeyCode -> action
    pub(crate) key_mapping: HashMap<KeyCode, Action>,

    /// Configuration path
    pub(crate) config_path: PathBuf,
}

impl InputHandler {
    /// Create an input handler from `config_path`
    ///
    /// Falls back to the default bindings when the file is missing or
    /// invalid. Unknown key names are skipped with a warning.
    pub fn with_config_path(config_path: impl Into<PathBuf>) -> Self {
        let config_path = config_path.into();
        let config = InputConfig::load(&config_path).unwrap_or_else(|e| {
            log::info!("Using default input config (failed to load: {})", e);
            InputConfig::default_config()
        });

        Self::from_config(config, config_path)
    }

    /// Build a handler from an already loaded configuration
    pub fn from_config(config: InputConfig, config_path: impl Into<PathBuf>) -> Self {
        let mut key_mapping = HashMap::new();
        for (key_str, action) in config.key_mapping {
            if let Some(key) = string_to_keycode(&key_str) {
                key_mapping.insert(key, action);
            } else {
                log::warn!("Unknown key code in config: {}", key_str);
            }
        }

        Self {
            key_mapping,
            config_path: config_path.into(),
        }
    }

    /// Translate a key press or release
    ///
    /// Returns `None` for unmapped keys.
    pub fn handle_keyboard(&self, key: KeyCode, pressed: bool) -> Option<InputEvent> {
        self.key_mapping
            .get(&key)
            .map(|&action| InputEvent { action, pressed })
    }

    /// Bind `key` to `action`, replacing any previous binding of that key
    pub fn set_key_mapping(&mut self, key: KeyCode, action: Action) {
        self.key_mapping.insert(key, action);
    }

    pub fn remove_key_mapping(&mut self, key: KeyCode) {
        self.key_mapping.remove(&key);
    }

    pub fn key_mapping(&self) -> &HashMap<KeyCode, Action> {
        &self.key_mapping
    }

    /// Actions no key is bound to
    ///
    /// Shown as a warning in the bindings window; an unbound confirm or
    /// cancel makes the browser unusable from the keyboard.
    pub fn unbound_actions(&self) -> Vec<Action> {
        Action::ALL
            .into_iter()
            .filter(|action| !self.key_mapping.values().any(|bound| bound == action))
            .collect()
    }

    /// Save current configuration to file
    pub fn save_config(&self) -> Result<(), ConfigError> {
        let key_mapping = self
            .key_mapping
            .iter()
            .map(|(&key, &action)| (keycode_to_string(key), action))
            .collect();

        InputConfig { key_mapping }.save(&self.config_path)
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Every action with the keys bound to it, in [`Action::ALL`] order
    ///
    /// Keys are sorted by name for stable display.
    pub fn get_action_mappings(&self) -> Vec<(Action, Vec<KeyCode>)> {
        Action::ALL
            .into_iter()
            .map(|action| {
                let mut keys: Vec<KeyCode> = self
                    .key_mapping
                    .iter()
                    .filter(|&(_, &bound)| bound == action)
                    .map(|(&key, _)| key)
                    .collect();
                keys.sort_by_key(|&key| keycode_to_string(key));
                (action, keys)
            })
            .collect()
    }
}
