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

//! romshelf: a themeable game library browser for emulators
//!
//! # Architecture
//!
//! - [`core`]: library model, sorting, navigation, detail layout, launch
//!   effects and the texture cache. No windowing dependencies.
//! - [`frontend`]: winit/wgpu/egui shell that renders the core's view state
//!   and starts emulators.
//!
//! # Example
//!
//! ```no_run
//! use romshelf::core::browser::BrowserController;
//! use romshelf::core::geometry::Vec2;
//! use romshelf::core::library::load_systems;
//! use romshelf::core::settings::Settings;
//! use romshelf::core::texture::{FileSystemSource, TextureCache};
//! # use romshelf::core::texture::{GpuTextureId, TextureBackend};
//! # use std::{cell::RefCell, rc::Rc};
//! # struct NoGpu;
//! # impl TextureBackend for NoGpu {
//! #     fn upload(&mut self, _: u32, _: u32, _: &[u8]) -> Option<GpuTextureId> { None }
//! #     fn release(&mut self, _: GpuTextureId) {}
//! #     fn bind(&mut self, _: GpuTextureId) {}
//! # }
//! # let backend = Rc::new(RefCell::new(NoGpu));
//!
//! let systems = load_systems("systems.toml".as_ref())?;
//! let cache = TextureCache::new(backend, Rc::new(FileSystemSource));
//! let browser = BrowserController::new(
//!     systems,
//!     Settings::in_memory(),
//!     None,
//!     cache,
//!     Vec2::new(1280.0, 720.0),
//! );
//! # Ok::<(), romshelf::BrowserError>(())
//! ```
//!
//! # Error Handling
//!
//! Component operations return their own error type, such as
//! [`core::error::LibraryError`] or [`core::error::ConfigError`]. Entry
//! points that span components, like
//! [`core::library::load_systems`] and
//! [`core::browser::BrowserController::delete_game`], return
//! [`core::error::Result<T>`], an alias for `Result<T, BrowserError>` that
//! wraps those component errors.

pub mod core;
pub mod frontend;

// Re-export commonly used types
pub use core::error::{BrowserError, Result};
