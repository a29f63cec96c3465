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

//! Game launch seam
//!
//! The browser does not know how an emulator is started. It hands the game to
//! a [`GameLauncher`] once the launch effect has run its course and blocks
//! until the launcher returns.

use crate::core::error::LaunchError;
use crate::core::library::{LibraryNode, SystemConfig};

/// Starts a game and returns once it has exited
pub trait GameLauncher {
    fn launch(&mut self, system: &SystemConfig, game: &LibraryNode) -> Result<(), LaunchError>;
}

/// Expand the placeholders of a launch command
///
/// - `%ROM%`: game path, shell-quoted
/// - `%BASENAME%`: file stem of the game
/// - `%ROM_RAW%`: game path as is
pub fn expand_command(command: &str, game: &LibraryNode) -> String {
    let raw = game.path.to_string_lossy();
    let quoted = format!("\"{}\"", raw.replace('"', "\\\""));
    command
        .replace("%ROM_RAW%", &raw)
        .replace("%ROM%", &quoted)
        .replace("%BASENAME%", &game.base_name())
}
