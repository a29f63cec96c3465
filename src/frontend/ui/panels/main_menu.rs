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

//! Main menu window

use crate::core::browser::BrowserController;
use crate::core::library::SORT_STATES;
use crate::frontend::ui::{UiAction, UiState};

/// Render the main menu
///
/// Returns a UiAction if the user triggered one.
pub fn render_main_menu(
    ctx: &egui::Context,
    ui_state: &mut UiState,
    browser: &BrowserController,
) -> UiAction {
    let mut action = UiAction::None;

    egui::Window::new("Main Menu")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.heading("Sort games by");
            let current = browser.sort_index();
            for (index, state) in SORT_STATES.iter().enumerate() {
                if ui.selectable_label(index == current, state.label).clicked() {
                    action = UiAction::SetSort(index);
                }
            }

            ui.separator();
            if ui.button("Reload images").clicked() {
                action = UiAction::ReloadImages;
            }
            if ui.button("Toggle fullscreen (F11)").clicked() {
                action = UiAction::ToggleFullscreen;
            }
            ui.checkbox(&mut ui_state.show_status_bar, "Status bar");
            if ui.button("Key bindings (F1)").clicked() {
                ui_state.show_input_config = true;
            }
            if ui.button("About").clicked() {
                ui_state.show_about = true;
            }

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Close").clicked() {
                    ui_state.show_menu = false;
                }
                if ui.button("Quit").clicked() {
                    action = UiAction::Exit;
                }
            });
        });

    action
}
