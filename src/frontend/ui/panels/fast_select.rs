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

//! Fast select window
//!
//! A letter picker: up/down or left/right cycle through `A..=Z`, confirm
//! jumps to the first entry starting with the letter.

use crate::core::browser::Action;

const LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Letter picker state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FastSelect {
    index: usize,
}

impl FastSelect {
    /// Open on `letter`, or on `A` if it is not a Latin letter
    pub fn new(letter: Option<char>) -> Self {
        let index = letter
            .map(|c| c.to_ascii_uppercase())
            .and_then(|c| LETTERS.iter().position(|&l| char::from(l) == c))
            .unwrap_or(0);
        Self { index }
    }

    #[inline(always)]
    pub fn letter(&self) -> char {
        char::from(LETTERS[self.index])
    }

    /// Apply a pressed action; returns the letter to jump to on confirm
    pub fn handle_action(&mut self, action: Action) -> Option<char> {
        let len = LETTERS.len();
        match action {
            Action::Left | Action::Up => self.index = (self.index + len - 1) % len,
            Action::Right | Action::Down => self.index = (self.index + 1) % len,
            Action::Confirm => return Some(self.letter()),
            _ => {}
        }
        None
    }

    pub fn render(&self, ctx: &egui::Context) {
        egui::Window::new("Fast Select")
            .collapsible(false)
            .resizable(false)
            .title_bar(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label("Jump to");
                    ui.label(
                        egui::RichText::new(self.letter().to_string())
                            .size(64.0)
                            .strong(),
                    );
                });
            });
    }
}
