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

//! Emulator process launcher

use crate::core::error::LaunchError;
use crate::core::launcher::{expand_command, GameLauncher};
use crate::core::library::{LibraryNode, SystemConfig};
use std::process::{Command, ExitStatus};

/// Runs the system's launch command through the platform shell and waits
/// for it to exit
#[derive(Debug, Default)]
pub struct CommandLauncher;

impl CommandLauncher {
    pub fn new() -> Self {
        Self
    }

    fn shell(command: &str) -> Command {
        if cfg!(windows) {
            let mut shell = Command::new("cmd");
            shell.arg("/C").arg(command);
            shell
        } else {
            let mut shell = Command::new("sh");
            shell.arg("-c").arg(command);
            shell
        }
    }
}

impl GameLauncher for CommandLauncher {
    fn launch(&mut self, system: &SystemConfig, game: &LibraryNode) -> Result<(), LaunchError> {
        if system.command.trim().is_empty() {
            return Err(LaunchError::NoCommand(system.name.clone()));
        }

        let command = expand_command(&system.command, game);
        log::info!("Running: {}", command);

        let status = Self::shell(&command)
            .status()
            .map_err(|source| LaunchError::Spawn {
                command: command.clone(),
                source,
            })?;

        check_status(status)
    }
}

fn check_status(status: ExitStatus) -> Result<(), LaunchError> {
    if status.success() {
        return Ok(());
    }
    // Killed by a signal when there is no code
    Err(LaunchError::ExitStatus(status.code().unwrap_or(-1)))
}
