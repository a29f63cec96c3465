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

//! Theme lookup and visual parameters
//!
//! Themes are TOML files. Lookup order for a system:
//!
//! 1. `<config dir>/<system name>/theme.toml`
//! 2. `<system start path>/theme.toml`
//! 3. `<config dir>/theme.toml`
//!
//! If none exists the browser runs in simple (list only) mode with default
//! parameters. Offsets and sizes are fractions of the screen size.

use crate::core::error::ConfigError;
use crate::core::library::SystemConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const THEME_FILE: &str = "theme.toml";

/// Visual parameters of a theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    /// Hide the system name header
    pub hide_header: bool,
    /// Center list entries horizontally
    pub list_centered: bool,
    /// Left edge of the list
    pub list_offset_x: f32,
    /// Text inset inside the list
    pub list_text_offset_x: f32,
    /// Anchor position of the game image
    pub game_image_offset_x: f32,
    pub game_image_offset_y: f32,
    /// Bounding size of the game image (0 keeps the aspect ratio)
    pub game_image_width: f32,
    pub game_image_height: f32,
    /// Anchor point within the image, `0.0..=1.0`
    pub game_image_origin_x: f32,
    pub game_image_origin_y: f32,
    /// Show every image in an auto-scrolling stack
    pub game_images_multi: bool,
    /// Allow images in the stack to be scaled up
    pub game_images_upscale: bool,
    /// Gap between stacked images
    pub game_image_space: f32,
    /// Shown when a game has no usable image
    pub image_not_found_path: String,
    /// Colors as `0xRRGGBBAA`
    pub primary_color: u32,
    pub secondary_color: u32,
    pub selector_color: u32,
    pub selected_color: u32,
    pub description_color: u32,
    pub header_color: u32,
    /// Length of the confirmation sound, reported by the audio layer
    pub select_sound_length_ms: u32,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            hide_header: false,
            list_centered: false,
            list_offset_x: 0.5,
            list_text_offset_x: 0.005,
            game_image_offset_x: 0.25,
            game_image_offset_y: 0.1,
            game_image_width: 0.5,
            game_image_height: 0.0,
            game_image_origin_x: 0.5,
            game_image_origin_y: 0.0,
            game_images_multi: false,
            game_images_upscale: false,
            game_image_space: 0.01,
            image_not_found_path: String::new(),
            primary_color: 0x0000FFFF,
            secondary_color: 0x00FF00FF,
            selector_color: 0x000000FF,
            selected_color: 0x00000000,
            description_color: 0x0000FFFF,
            header_color: 0xFF0000FF,
            select_sound_length_ms: 0,
        }
    }
}

/// A resolved theme
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Theme {
    /// File the settings came from (`None` means defaults)
    pub source: Option<PathBuf>,
    pub settings: ThemeSettings,
}

impl Theme {
    /// Resolve and load the theme for `system`
    ///
    /// A theme that fails to parse is logged and replaced by defaults, the
    /// same as a missing one.
    pub fn for_system(config_dir: Option<&Path>, system: &SystemConfig) -> Self {
        let Some(path) = resolve_theme_file(config_dir, system) else {
            log::debug!("No theme for system '{}'", system.name);
            return Self::default();
        };

        match load_theme_file(&path) {
            Ok(settings) => {
                log::info!("Using theme {}", path.display());
                Self {
                    source: Some(path),
                    settings,
                }
            }
            Err(e) => {
                log::error!("Failed to load theme {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Whether detailed mode is available at all
    #[inline(always)]
    pub fn supports_detail(&self) -> bool {
        self.source.is_some()
    }
}

/// First existing theme file in lookup order
pub fn resolve_theme_file(config_dir: Option<&Path>, system: &SystemConfig) -> Option<PathBuf> {
    let mut candidates = Vec::with_capacity(3);
    if let Some(dir) = config_dir {
        candidates.push(dir.join(&system.name).join(THEME_FILE));
    }
    candidates.push(system.path.join(THEME_FILE));
    if let Some(dir) = config_dir {
        candidates.push(dir.join(THEME_FILE));
    }

    candidates.into_iter().find(|path| path.is_file())
}

/// Parse a theme file
pub fn load_theme_file(path: &Path) -> Result<ThemeSettings, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system_at(path: &Path) -> SystemConfig {
        SystemConfig {
            name: "snes".to_string(),
            path: path.to_path_buf(),
            ..SystemConfig::default()
        }
    }

    #[test]
    fn test_resolution_order() {
        let config = tempfile::tempdir().unwrap();
        let start = tempfile::tempdir().unwrap();
        let system = system_at(start.path());

        assert_eq!(resolve_theme_file(Some(config.path()), &system), None);

        let global = config.path().join(THEME_FILE);
        std::fs::write(&global, "").unwrap();
        assert_eq!(
            resolve_theme_file(Some(config.path()), &system),
            Some(global)
        );

        let bundled = start.path().join(THEME_FILE);
        std::fs::write(&bundled, "").unwrap();
        assert_eq!(
            resolve_theme_file(Some(config.path()), &system),
            Some(bundled.clone())
        );

        std::fs::create_dir(config.path().join("snes")).unwrap();
        let user = config.path().join("snes").join(THEME_FILE);
        std::fs::write(&user, "").unwrap();
        assert_eq!(resolve_theme_file(Some(config.path()), &system), Some(user));

        // Without a config dir only the bundled theme is a candidate
        assert_eq!(resolve_theme_file(None, &system), Some(bundled));
    }

    #[test]
    fn test_missing_theme_falls_back_to_defaults() {
        let start = tempfile::tempdir().unwrap();
        let theme = Theme::for_system(None, &system_at(start.path()));
        assert!(!theme.supports_detail());
        assert_eq!(theme.settings, ThemeSettings::default());
    }

    #[test]
    fn test_partial_theme_keeps_defaults() {
        let start = tempfile::tempdir().unwrap();
        std::fs::write(
            start.path().join(THEME_FILE),
            "game_images_multi = true\nimage_not_found_path = \"/img/none.png\"\n",
        )
        .unwrap();

        let theme = Theme::for_system(None, &system_at(start.path()));
        assert!(theme.supports_detail());
        assert!(theme.settings.game_images_multi);
        assert_eq!(theme.settings.image_not_found_path, "/img/none.png");
        assert_eq!(theme.settings.list_offset_x, 0.5);
    }

    #[test]
    fn test_broken_theme_falls_back_to_defaults() {
        let start = tempfile::tempdir().unwrap();
        std::fs::write(start.path().join(THEME_FILE), "list_offset_x = \"wide\"").unwrap();

        let theme = Theme::for_system(None, &system_at(start.path()));
        assert!(!theme.supports_detail());
    }
}
