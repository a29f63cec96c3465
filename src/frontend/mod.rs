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

//! Frontend module
//!
//! Window management and drawing for the browser. winit drives the event
//! loop, wgpu owns the GPU and egui paints the list, the detail pane and the
//! host windows (menu, fast select, metadata editor).
//!
//! # Architecture
//!
//! - [`Application`]: event loop handler owning the window and the browser
//! - [`renderer`]: wgpu context and the egui-backed texture backend
//! - [`frame_timer`]: frame clock producing per-tick deltas
//! - [`input`]: keyboard to [`Action`](crate::core::browser::Action) mapping
//! - [`launcher`]: runs emulator commands through the system shell
//! - [`ui`]: egui panels
//!
//! # Example
//!
//! ```no_run
//! use romshelf::frontend::{Application, StartupConfig};
//! use winit::event_loop::EventLoop;
//!
//! let event_loop = EventLoop::new().unwrap();
//! let mut app = Application::new(StartupConfig {
//!     systems_path: "systems.toml".into(),
//!     settings_path: None,
//!     input_path: "input.toml".into(),
//!     config_dir: None,
//!     fullscreen: false,
//! });
//! event_loop.run_app(&mut app).unwrap();
//! ```

pub mod app;
pub mod frame_timer;
pub mod input;
pub mod launcher;
pub mod renderer;
pub mod ui;

#[cfg(test)]
mod tests;

pub use app::{Application, StartupConfig};
pub use frame_timer::FrameTimer;
pub use input::InputHandler;
pub use launcher::CommandLauncher;
pub use renderer::RenderContext;
