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

//! Status bar panel
//!
//! Bottom bar with the active sort, the entry count and frame timing.

use crate::core::browser::BrowserController;
use crate::frontend::frame_timer::FrameTimer;

/// Render the status bar
pub fn render_status_bar(ctx: &egui::Context, browser: &BrowserController, frame_timer: &FrameTimer) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(format!("Sort: {}", browser.sort_state().label));
            ui.separator();

            ui.label(format!("{} entries", browser.entries().len()));
            ui.separator();

            ui.label(format!("FPS: {:.1}", frame_timer.fps()));
            ui.separator();

            ui.label(format!("Frame: {:.2}ms", frame_timer.frame_time_ms()));

            if browser.is_locked() {
                ui.separator();
                ui.colored_label(egui::Color32::YELLOW, "LAUNCHING");
            }
        });
    });
}
