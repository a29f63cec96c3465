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

//! Configured systems and their game trees
//!
//! A system is one emulated platform: a start directory scanned for games, a
//! launch command, and optional screenshot directories. Systems are listed in
//! a `systems.toml`:
//!
//! ```toml
//! [[system]]
//! name = "snes"
//! full_name = "Super Nintendo"
//! path = "/roms/snes"
//! extensions = [".sfc", ".smc"]
//! command = "snes9x %ROM%"
//! screenshot_dir = "/roms/snes/screenshots"
//! emulator_screenshot_dump_dir = "/home/me/.snes9x/screenshots"
//! ```

use super::{GameMetadata, LibraryTree, NodeId};
use crate::core::error::{self, BrowserError, ConfigError, LibraryError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Name of the per-system metadata sidecar
const GAMELIST_FILE: &str = "gamelist.toml";

/// One `[[system]]` entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Short name, used for theme lookup
    pub name: String,
    /// Name shown in the header
    #[serde(default)]
    pub full_name: String,
    /// Directory scanned for games
    pub path: PathBuf,
    /// Accepted file extensions including the dot (case-insensitive)
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Launch command; `%ROM%`, `%BASENAME%` and `%ROM_RAW%` are substituted
    #[serde(default)]
    pub command: String,
    /// Where imported screenshots are kept
    #[serde(default)]
    pub screenshot_dir: Option<PathBuf>,
    /// Where the emulator writes screenshots
    #[serde(default)]
    pub emulator_screenshot_dump_dir: Option<PathBuf>,
}

impl SystemConfig {
    /// Header name, falling back to the short name
    pub fn display_name(&self) -> &str {
        if self.full_name.is_empty() {
            &self.name
        } else {
            &self.full_name
        }
    }

    fn accepts(&self, path: &Path) -> bool {
        let Some(ext) = path.extension() else {
            return false;
        };
        let ext = format!(".{}", ext.to_string_lossy());
        self.extensions
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(&ext))
    }
}

/// Contents of `systems.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemsConfig {
    #[serde(default, rename = "system")]
    pub systems: Vec<SystemConfig>,
}

impl SystemsConfig {
    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }
}

/// Load `systems.toml` and scan every system it lists
///
/// Systems that fail to scan are logged and skipped.
///
/// # Arguments
///
/// * `path` - Path to `systems.toml`
///
/// # Returns
///
/// - `Ok(systems)` with at least one system
/// - `Err(BrowserError::Config)` if the file cannot be read or parsed
/// - `Err(BrowserError::NoSystems)` if no listed system could be loaded
///
/// # Example
///
/// ```no_run
/// use romshelf::core::library::load_systems;
///
/// let systems = load_systems("systems.toml".as_ref())?;
/// println!("{} systems", systems.len());
/// # Ok::<(), romshelf::BrowserError>(())
/// ```
pub fn load_systems(path: &Path) -> error::Result<Vec<SystemData>> {
    let config = SystemsConfig::load(path)?;
    let systems: Vec<_> = config
        .systems
        .into_iter()
        .filter_map(|system| {
            let name = system.name.clone();
            SystemData::load(system)
                .map_err(|e| log::error!("Failed to load system '{}': {}", name, e))
                .ok()
        })
        .collect();

    if systems.is_empty() {
        return Err(BrowserError::NoSystems);
    }
    Ok(systems)
}

/// A game entry in `gamelist.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameListEntry {
    /// Path relative to the system start directory
    pub path: PathBuf,
    /// When the game was last selected in the list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_selected: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub metadata: GameMetadata,
}

/// Selection stamp of a folder in `gamelist.toml`
///
/// The start directory itself is stored with an empty path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderListEntry {
    /// Path relative to the system start directory
    pub path: PathBuf,
    pub last_selected: DateTime<Utc>,
}

/// Contents of `gamelist.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameList {
    #[serde(default, rename = "folder", skip_serializing_if = "Vec::is_empty")]
    pub folders: Vec<FolderListEntry>,
    #[serde(default, rename = "game")]
    pub games: Vec<GameListEntry>,
}

/// A system with its scanned game tree
#[derive(Debug, Clone)]
pub struct SystemData {
    config: SystemConfig,
    tree: LibraryTree,
}

impl SystemData {
    /// Wrap an already built tree
    pub fn from_tree(config: SystemConfig, tree: LibraryTree) -> Self {
        Self { config, tree }
    }

    /// Scan the start directory and merge `gamelist.toml` if present
    ///
    /// Directories become folders, files with an accepted extension become
    /// games named after their file stem. Folders without any game are
    /// dropped.
    pub fn load(config: SystemConfig) -> Result<Self, LibraryError> {
        if !config.path.is_dir() {
            return Err(LibraryError::MissingStartPath(config.path.clone()));
        }

        let mut tree = LibraryTree::new(&config.name, config.path.clone());
        let root = tree.root();
        let mut visited = HashSet::new();
        if let Ok(start) = config.path.canonicalize() {
            visited.insert(start);
        }
        populate_folder(&config, &mut tree, root, &config.path, &mut visited)?;
        tree.prune_empty_folders();

        let mut system = Self { config, tree };
        system.merge_gamelist();

        log::info!(
            "Loaded system '{}' with {} games",
            system.config.name,
            system.tree.game_count()
        );
        Ok(system)
    }

    #[inline(always)]
    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    #[inline(always)]
    pub fn tree(&self) -> &LibraryTree {
        &self.tree
    }

    #[inline(always)]
    pub fn tree_mut(&mut self) -> &mut LibraryTree {
        &mut self.tree
    }

    /// Root folder id
    #[inline(always)]
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Location of the metadata sidecar
    pub fn gamelist_path(&self) -> PathBuf {
        self.config.path.join(GAMELIST_FILE)
    }

    /// Merge metadata and selection stamps from the sidecar onto the tree
    ///
    /// Entries for files that were not scanned are ignored. A missing or
    /// broken sidecar only logs.
    pub fn merge_gamelist(&mut self) {
        let path = self.gamelist_path();
        if !path.exists() {
            return;
        }

        let list: GameList = match std::fs::read_to_string(&path)
            .map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })
            .and_then(|contents| toml::from_str(&contents).map_err(ConfigError::from))
        {
            Ok(list) => list,
            Err(e) => {
                log::warn!("Ignoring game list for '{}': {}", self.config.name, e);
                return;
            }
        };

        let index = self.tree.path_index();
        let resolve = |relative: &Path| {
            if relative.as_os_str().is_empty() {
                Some(self.tree.root())
            } else {
                index.get(&self.config.path.join(relative)).copied()
            }
        };

        let mut stamps = Vec::new();
        for entry in list.folders {
            match resolve(&entry.path) {
                Some(id) => stamps.push((id, entry.last_selected)),
                None => log::debug!("Game list folder '{}' is gone", entry.path.display()),
            }
        }

        let mut games = Vec::new();
        for entry in list.games {
            match resolve(&entry.path) {
                Some(id) => games.push((id, entry)),
                None => log::debug!("Game list entry '{}' has no file", entry.path.display()),
            }
        }

        for (id, at) in stamps {
            if let Some(node) = self.tree.node_mut(id) {
                node.last_selected = Some(at);
            }
        }
        for (id, entry) in games {
            if let Some(name) = &entry.metadata.name {
                self.tree.rename(id, name);
            }
            if let Some(meta) = self.tree.game_mut(id) {
                *meta = entry.metadata;
            }
            if let Some(node) = self.tree.node_mut(id) {
                node.last_selected = entry.last_selected;
            }
        }
    }

    fn relative_path<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.config.path).unwrap_or(path)
    }

    /// Write the sidecar
    ///
    /// Holds every game with metadata or a selection stamp, and every
    /// stamped folder including the start directory.
    pub fn save_gamelist(&self) -> Result<(), ConfigError> {
        let mut list = GameList::default();
        for id in self.tree.node_ids() {
            let Some(node) = self.tree.node(id) else {
                continue;
            };
            let relative = self.relative_path(&node.path).to_path_buf();
            match node.metadata() {
                Some(meta) if !meta.is_default() || node.last_selected.is_some() => {
                    list.games.push(GameListEntry {
                        path: relative,
                        last_selected: node.last_selected,
                        metadata: meta.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    if let Some(at) = node.last_selected {
                        list.folders.push(FolderListEntry {
                            path: relative,
                            last_selected: at,
                        });
                    }
                }
            }
        }
        list.folders.sort_by(|a, b| a.path.cmp(&b.path));
        list.games.sort_by(|a, b| a.path.cmp(&b.path));

        let path = self.gamelist_path();
        let contents = toml::to_string_pretty(&list)?;
        std::fs::write(&path, contents).map_err(|source| ConfigError::Write { path, source })
    }
}

/// Add the contents of `dir` below `folder`
///
/// `visited` holds canonical directories already scanned; a directory reached
/// twice (symlink loops, links to a sibling) is skipped.
fn populate_folder(
    config: &SystemConfig,
    tree: &mut LibraryTree,
    folder: NodeId,
    dir: &Path,
    visited: &mut HashSet<PathBuf>,
) -> Result<(), LibraryError> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    entries.sort();

    for path in entries {
        let hidden = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with('.'));
        if hidden {
            continue;
        }

        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        if path.is_dir() {
            // Keep the screenshot store out of the listing
            if config.screenshot_dir.as_deref() == Some(path.as_path()) {
                continue;
            }
            match path.canonicalize() {
                Ok(canonical) if visited.insert(canonical.clone()) => {}
                Ok(_) => {
                    log::warn!("Skipping {}: directory already scanned", path.display());
                    continue;
                }
                Err(e) => {
                    log::warn!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            }
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or(stem);
            let child = tree.add_folder(folder, &name, path.clone())?;
            populate_folder(config, tree, child, &path, visited)?;
        } else if config.accepts(&path) {
            tree.add_game(folder, &stem, path.clone(), GameMetadata::default())?;
        }
    }
    Ok(())
}
