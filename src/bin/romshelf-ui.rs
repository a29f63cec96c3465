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

//! romshelf UI entry point
//!
//! Opens the game browser window. Configuration lives in `~/.romshelf`
//! unless overridden on the command line.
//!
//! Hotkeys:
//! - F1: Key bindings
//! - F11: Toggle fullscreen

use clap::Parser;
use romshelf::core::settings::user_config_dir;
use romshelf::frontend::input::INPUT_CONFIG_FILE;
use romshelf::frontend::{Application, StartupConfig};
use std::path::PathBuf;
use winit::event_loop::EventLoop;

#[derive(Parser)]
#[command(name = "romshelf-ui")]
#[command(author, version, about = "Game library browser and launcher for emulators")]
struct Args {
    /// Systems file (default: ~/.romshelf/systems.toml)
    #[arg(long)]
    systems: Option<PathBuf>,

    /// Settings file (default: ~/.romshelf/settings.toml)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Key bindings file (default: ~/.romshelf/input.toml)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Start in fullscreen mode
    #[arg(long, short = 'f')]
    fullscreen: bool,
}

/// Ask for a systems file when the configured one is missing
fn pick_systems_file(default: PathBuf) -> PathBuf {
    if default.is_file() {
        return default;
    }
    log::warn!("{} not found", default.display());

    rfd::FileDialog::new()
        .add_filter("Systems", &["toml"])
        .set_title("Select systems file")
        .pick_file()
        .unwrap_or(default)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG may come from a .env file
    dotenvy::dotenv().ok();
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting romshelf...");

    let args = Args::parse();
    let config_dir = user_config_dir();
    let in_config_dir = |name: &str| {
        config_dir
            .as_ref()
            .map(|dir| dir.join(name))
            .unwrap_or_else(|| PathBuf::from(name))
    };

    let systems_path = match args.systems {
        Some(path) => path,
        None => pick_systems_file(in_config_dir("systems.toml")),
    };
    let settings_path = args.settings.or_else(|| Some(in_config_dir("settings.toml")));
    let input_path = args.input.unwrap_or_else(|| in_config_dir(INPUT_CONFIG_FILE));
    log::info!("Systems file: {}", systems_path.display());

    let event_loop = EventLoop::new()?;

    let mut app = Application::new(StartupConfig {
        systems_path,
        settings_path,
        input_path,
        config_dir,
        fullscreen: args.fullscreen,
    });

    log::info!("Running event loop...");
    event_loop.run_app(&mut app)?;

    Ok(())
}
