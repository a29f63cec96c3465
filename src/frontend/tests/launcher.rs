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

//! Unit tests for CommandLauncher

use crate::core::error::LaunchError;
use crate::core::launcher::GameLauncher;
use crate::core::library::{GameMetadata, LibraryTree, SystemConfig};
use crate::frontend::launcher::CommandLauncher;
use std::path::Path;

fn launch(command: &str, game_path: &Path) -> Result<(), LaunchError> {
    let mut tree = LibraryTree::new("snes", "/roms/snes");
    let root = tree.root();
    let id = tree
        .add_game(root, "Game", game_path, GameMetadata::default())
        .unwrap();
    let system = SystemConfig {
        name: "snes".to_string(),
        command: command.to_string(),
        ..SystemConfig::default()
    };
    CommandLauncher::new().launch(&system, tree.node(id).unwrap())
}

#[test]
fn test_missing_command() {
    let err = launch("  ", Path::new("/roms/snes/game.sfc")).unwrap_err();
    assert!(matches!(err, LaunchError::NoCommand(name) if name == "snes"));
}

#[cfg(unix)]
#[test]
fn test_command_receives_game_path() {
    let dir = tempfile::tempdir().unwrap();
    let game = dir.path().join("My Game.sfc");
    std::fs::write(&game, b"rom").unwrap();
    let out = dir.path().join("out.txt");

    let command = format!("cat %ROM% > \"{}\"", out.display());
    launch(&command, &game).unwrap();
    assert_eq!(std::fs::read(&out).unwrap(), b"rom");
}

#[cfg(unix)]
#[test]
fn test_failing_command() {
    let err = launch("exit 3", Path::new("/roms/snes/game.sfc")).unwrap_err();
    assert!(matches!(err, LaunchError::ExitStatus(3)));
}
