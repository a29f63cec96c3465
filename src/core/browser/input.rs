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

//! Logical input consumed by the browser
//!
//! Device mapping lives in the frontend; the browser only sees [`Action`]s
//! being pressed and released.

use serde::{Deserialize, Serialize};

/// Logical browser action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Confirm,
    Cancel,
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    NextSort,
    PrevSort,
    Menu,
    FastSelect,
    /// Raw key: edit or delete the selected game
    EditMetadata,
    /// Raw key: open the scraper
    OpenScraper,
}

impl Action {
    /// Every action, in declaration order
    pub const ALL: [Action; 14] = [
        Action::Confirm,
        Action::Cancel,
        Action::Left,
        Action::Right,
        Action::Up,
        Action::Down,
        Action::PageUp,
        Action::PageDown,
        Action::NextSort,
        Action::PrevSort,
        Action::Menu,
        Action::FastSelect,
        Action::EditMetadata,
        Action::OpenScraper,
    ];

    /// List movement step, `None` for non-directional actions
    pub fn scroll_step(self) -> Option<i32> {
        match self {
            Action::Up => Some(-1),
            Action::Down => Some(1),
            Action::PageUp => Some(-PAGE_STEP),
            Action::PageDown => Some(PAGE_STEP),
            _ => None,
        }
    }

    /// Held-key flag for directional actions
    pub fn nav_key(self) -> Option<NavKeys> {
        match self {
            Action::Up => Some(NavKeys::UP),
            Action::Down => Some(NavKeys::DOWN),
            Action::PageUp => Some(NavKeys::PAGE_UP),
            Action::PageDown => Some(NavKeys::PAGE_DOWN),
            _ => None,
        }
    }
}

/// Entries skipped by page up/down
pub const PAGE_STEP: i32 = 10;

bitflags::bitflags! {
    /// Directional keys currently held
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct NavKeys: u8 {
        const UP = 0b0000_0001;
        const DOWN = 0b0000_0010;
        const PAGE_UP = 0b0000_0100;
        const PAGE_DOWN = 0b0000_1000;
    }
}

/// One press or release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub action: Action,
    pub pressed: bool,
}

impl InputEvent {
    #[inline(always)]
    pub const fn press(action: Action) -> Self {
        Self {
            action,
            pressed: true,
        }
    }

    #[inline(always)]
    pub const fn release(action: Action) -> Self {
        Self {
            action,
            pressed: false,
        }
    }
}
