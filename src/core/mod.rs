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

//! Browser core
//!
//! Everything here is independent of windowing and rendering. The frontend
//! feeds [`browser::BrowserController`] logical input and per-frame deltas and
//! draws the view state it exposes.

pub mod browser;
pub mod detail;
pub mod effect;
pub mod error;
pub mod geometry;
pub mod launcher;
pub mod library;
pub mod screenshot;
pub mod settings;
pub mod texture;
pub mod theme;
