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

//! Post-launch screenshot import
//!
//! After a game exits, screenshots the emulator wrote into its dump directory
//! are moved into the system's screenshot directory and renamed to
//! `<game base name>-<n><ext>`. Existing files are never overwritten: `n`
//! starts at 0 and is bumped past every name that is already taken.

use crate::core::library::SystemConfig;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Files in `dir` last modified at or after `since`
///
/// The result is sorted by path; generated screenshot names usually sort
/// chronologically. An unreadable directory yields nothing.
pub fn new_files_since(dir: &Path, since: SystemTime) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("Cannot scan {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .metadata()
                .ok()
                .filter(|meta| meta.is_file())
                .and_then(|meta| meta.modified().ok())
                .is_some_and(|modified| modified >= since)
        })
        .map(|entry| entry.path())
        .collect();
    files.sort();
    files
}

/// Move `files` into `dest_dir` as `<base_name>-<n><ext>`
///
/// The counter carries over between files, so one batch never reuses a
/// number. Files that cannot be moved are logged and skipped.
///
/// # Returns
///
/// Destination paths of the files that were moved, in input order
pub fn move_and_rename_files(files: &[PathBuf], base_name: &str, dest_dir: &Path) -> Vec<PathBuf> {
    if let Err(e) = std::fs::create_dir_all(dest_dir) {
        log::error!("Cannot create {}: {}", dest_dir.display(), e);
        return Vec::new();
    }

    let mut moved = Vec::with_capacity(files.len());
    let mut number: u32 = 0;

    for src in files {
        let ext = src
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let dest = loop {
            let candidate = dest_dir.join(format!("{}-{}{}", base_name, number, ext));
            number += 1;
            if !candidate.exists() {
                break candidate;
            }
        };

        log::debug!("Moving screenshot {} to {}", src.display(), dest.display());
        match move_file(src, &dest) {
            Ok(()) => moved.push(dest),
            Err(e) => log::error!("Failed to move screenshot {}: {}", src.display(), e),
        }
    }
    moved
}

/// Rename, falling back to copy + remove across filesystems
fn move_file(src: &Path, dest: &Path) -> std::io::Result<()> {
    if std::fs::rename(src, dest).is_ok() {
        return Ok(());
    }
    std::fs::copy(src, dest)?;
    std::fs::remove_file(src)
}

/// Import screenshots the emulator wrote since `since`
///
/// Does nothing unless both screenshot directories are configured.
///
/// # Arguments
///
/// * `system` - Supplies `emulator_screenshot_dump_dir` and `screenshot_dir`
/// * `base_name` - Game file stem used to name the imported files
/// * `since` - Launch time; older dump files are left alone
///
/// # Returns
///
/// Paths of the imported files, ready to be appended to the game's images
///
/// # Example
///
/// ```
/// use romshelf::core::library::SystemConfig;
/// use romshelf::core::screenshot::import_fresh_screenshots;
/// use std::time::SystemTime;
///
/// let system = SystemConfig::default();
/// let imported = import_fresh_screenshots(&system, "mario", SystemTime::now());
/// assert!(imported.is_empty());
/// ```
pub fn import_fresh_screenshots(
    system: &SystemConfig,
    base_name: &str,
    since: SystemTime,
) -> Vec<PathBuf> {
    let (Some(dump_dir), Some(screenshot_dir)) = (
        system.emulator_screenshot_dump_dir.as_deref(),
        system.screenshot_dir.as_deref(),
    ) else {
        return Vec::new();
    };

    let fresh = new_files_since(dump_dir, since);
    if fresh.is_empty() {
        return Vec::new();
    }

    log::info!(
        "Found {} new screenshots for game {}",
        fresh.len(),
        base_name
    );
    move_and_rename_files(&fresh, base_name, screenshot_dir)
}
