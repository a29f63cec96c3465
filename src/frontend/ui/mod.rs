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

//! UI module
//!
//! Draws the browser view state with egui and hosts the windows the browser
//! asks for: main menu, fast select, metadata editor and key bindings.

pub mod panels;

use crate::core::browser::{Action, BrowserController};
use crate::core::library::{GameMetadata, NodeId};
use crate::frontend::frame_timer::FrameTimer;
use crate::frontend::input::{action_name, keycode_to_string, InputHandler};
use crate::frontend::renderer::EguiTextureBackend;
use panels::fast_select::FastSelect;
use panels::metadata_editor::{EditorOutcome, MetadataEditor};
use std::cell::RefCell;

/// Convert a `0xRRGGBBAA` theme color
pub fn theme_color(rgba: u32) -> egui::Color32 {
    let [r, g, b, a] = rgba.to_be_bytes();
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// UI state management
///
/// Tracks which host windows are open. While any of them is, browser input
/// is routed to the window instead.
pub struct UiState {
    /// Main menu
    pub show_menu: bool,
    /// Key bindings window
    pub show_input_config: bool,
    /// About dialog
    pub show_about: bool,
    /// Show FPS and sort in a bottom bar
    pub show_status_bar: bool,
    /// Letter picker
    pub fast_select: Option<FastSelect>,
    /// Metadata editor for one game
    pub editor: Option<MetadataEditor>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            show_menu: false,
            show_input_config: false,
            show_about: false,
            show_status_bar: false,
            fast_select: None,
            editor: None,
        }
    }

    /// Whether a window currently owns keyboard input
    pub fn has_modal(&self) -> bool {
        self.show_menu
            || self.show_input_config
            || self.show_about
            || self.fast_select.is_some()
            || self.editor.is_some()
    }

    /// Close the topmost window
    pub fn close_modal(&mut self) {
        if self.editor.take().is_some() || self.fast_select.take().is_some() {
            return;
        }
        if self.show_about {
            self.show_about = false;
        } else if self.show_input_config {
            self.show_input_config = false;
        } else {
            self.show_menu = false;
        }
    }

    /// Open the metadata editor for `id`
    pub fn open_editor(&mut self, browser: &BrowserController, id: NodeId) {
        let Some(node) = browser.tree().and_then(|tree| tree.node(id)) else {
            log::warn!("Edit requested for missing node {:?}", id);
            return;
        };
        if let Some(metadata) = node.metadata() {
            self.editor = Some(MetadataEditor::new(id, &node.name, metadata));
        }
    }

    /// Route a pressed action to the topmost window
    pub fn handle_action(&mut self, action: Action) -> ModalInput {
        if let Some(fast_select) = &mut self.fast_select {
            if let Some(letter) = fast_select.handle_action(action) {
                self.fast_select = None;
                return ModalInput::Jump(letter);
            }
            if action == Action::Cancel {
                self.fast_select = None;
            }
            return ModalInput::Consumed;
        }

        // Text fields own the keyboard; only cancel is honored
        if action == Action::Cancel {
            self.close_modal();
        }
        ModalInput::Consumed
    }

    /// Render the complete UI
    pub fn render(
        &mut self,
        ctx: &egui::Context,
        browser: &BrowserController,
        textures: &RefCell<EguiTextureBackend>,
        input_handler: &InputHandler,
        frame_timer: &FrameTimer,
    ) -> UiAction {
        let mut action = UiAction::None;

        panels::browser_view::render_browser_view(ctx, browser, textures);

        if self.show_status_bar {
            panels::status_bar::render_status_bar(ctx, browser, frame_timer);
        }

        if self.show_menu {
            action = action.merge(panels::main_menu::render_main_menu(ctx, self, browser));
        }

        if let Some(fast_select) = &self.fast_select {
            fast_select.render(ctx);
        }

        if let Some(editor) = &mut self.editor {
            match editor.render(ctx) {
                EditorOutcome::None => {}
                EditorOutcome::Save(id, metadata) => {
                    action = action.merge(UiAction::SaveMetadata(id, metadata));
                    self.editor = None;
                }
                EditorOutcome::Delete(id) => {
                    action = action.merge(UiAction::DeleteGame(id));
                    self.editor = None;
                }
                EditorOutcome::Close => self.editor = None,
            }
        }

        if self.show_input_config {
            self.render_input_config(ctx, input_handler);
        }

        if self.show_about {
            self.render_about_dialog(ctx);
        }

        action
    }

    /// Render the key bindings window
    fn render_input_config(&mut self, ctx: &egui::Context, input_handler: &InputHandler) {
        egui::Window::new("Key Bindings")
            .default_width(400.0)
            .collapsible(false)
            .show(ctx, |ui| {
                for (action, keys) in input_handler.get_action_mappings() {
                    ui.horizontal(|ui| {
                        ui.label(format!("{:16}", action_name(action)));
                        let keys_str = keys
                            .iter()
                            .map(|&k| keycode_to_string(k))
                            .collect::<Vec<_>>()
                            .join(", ");
                        ui.label(keys_str);
                    });
                }

                let unbound = input_handler.unbound_actions();
                if !unbound.is_empty() {
                    ui.separator();
                    let names = unbound
                        .iter()
                        .map(|&a| action_name(a))
                        .collect::<Vec<_>>()
                        .join(", ");
                    ui.colored_label(egui::Color32::YELLOW, format!("Unbound: {}", names));
                }

                ui.separator();
                ui.label("Configuration file:");
                ui.label(input_handler.config_path().display().to_string());
                ui.label("Edit this file to change key bindings.");

                ui.separator();
                if ui.button("Close").clicked() {
                    self.show_input_config = false;
                }
            });
    }

    /// Render the about dialog
    fn render_about_dialog(&mut self, ctx: &egui::Context) {
        egui::Window::new("About romshelf")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading("romshelf");
                ui.separator();
                ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                ui.label("Copyright 2025 itsakeyfut");
                ui.separator();
                ui.label("A themeable game library browser for emulators");
                ui.separator();
                ui.label("Licensed under the Apache License, Version 2.0");
                ui.separator();
                if ui.button("Close").clicked() {
                    self.show_about = false;
                }
            });
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Actions that can be triggered from the UI
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// No action
    None,
    /// Switch to sort state `index`
    SetSort(usize),
    /// Re-read every image from disk
    ReloadImages,
    /// Toggle fullscreen
    ToggleFullscreen,
    /// Store edited metadata
    SaveMetadata(NodeId, GameMetadata),
    /// Remove a game from the library and delete its file
    DeleteGame(NodeId),
    /// Exit the application
    Exit,
}

impl UiAction {
    /// Merge two actions, preferring non-None actions
    pub fn merge(self, other: UiAction) -> UiAction {
        match (self, other) {
            (UiAction::None, action) => action,
            (action, UiAction::None) => action,
            (action, _) => action, // First action takes precedence
        }
    }
}

/// Outcome of routing a key to an open window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalInput {
    /// Consumed by the window
    Consumed,
    /// Window asked for a fast-select jump
    Jump(char),
}
