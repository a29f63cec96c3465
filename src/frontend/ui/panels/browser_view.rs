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

//! Browser view
//!
//! Paints the header, game list and detail pane from the browser's view
//! state. Everything goes on one background layer whose transform carries the
//! launch zoom and the system slide; the launch fade is a black overlay on
//! top.

use crate::core::browser::BrowserController;
use crate::core::detail::{DetailView, GameDetail, GameImages, PlacedImage, HEADER_HEIGHT};
use crate::core::geometry::{Rect, Vec2};
use crate::core::theme::ThemeSettings;
use crate::frontend::renderer::EguiTextureBackend;
use crate::frontend::ui::theme_color;
use egui::emath::TSTransform;
use egui::{Align2, Color32, FontId, LayerId, Order, Painter};
use std::cell::RefCell;

/// Row height as a fraction of the screen height
const ROW_HEIGHT: f32 = 0.045;

/// Header font size as a fraction of the screen height
const HEADER_FONT: f32 = 0.055;

/// Detail text font size as a fraction of the screen height
const DETAIL_FONT: f32 = 0.028;

fn to_egui_rect(rect: Rect) -> egui::Rect {
    egui::Rect::from_min_size(
        egui::pos2(rect.pos.x, rect.pos.y),
        egui::vec2(rect.size.x, rect.size.y),
    )
}

/// Layer transform for the current launch and slide state
///
/// A point `p` lands at `screen_center + (p - center) * zoom`, shifted by the
/// slide offset.
pub fn view_transform(browser: &BrowserController) -> TSTransform {
    let frame = browser.effect_frame();
    let screen = browser.screen();
    let screen_center = screen * 0.5;
    let slide = browser.slide().offset() * screen.x;

    let translation = screen_center - frame.center * frame.zoom + Vec2::new(slide, 0.0);
    TSTransform::new(egui::vec2(translation.x, translation.y), frame.zoom)
}

/// Render the browser and its launch overlay
pub fn render_browser_view(
    ctx: &egui::Context,
    browser: &BrowserController,
    textures: &RefCell<EguiTextureBackend>,
) {
    let layer = LayerId::new(Order::Background, egui::Id::new("browser_view"));
    ctx.set_transform_layer(layer, view_transform(browser));
    let painter = ctx.layer_painter(layer);
    let screen = browser.screen();

    let Some(view) = browser.detail().view() else {
        painter.text(
            egui::pos2(screen.x * 0.5, screen.y * 0.5),
            Align2::CENTER_CENTER,
            "No systems found",
            FontId::proportional(screen.y * HEADER_FONT),
            Color32::WHITE,
        );
        return;
    };
    let theme = &browser.theme().settings;

    if let Some(header) = browser.header() {
        painter.text(
            egui::pos2(screen.x * 0.5, screen.y * HEADER_HEIGHT * 0.5),
            Align2::CENTER_CENTER,
            header,
            FontId::proportional(screen.y * HEADER_FONT),
            theme_color(theme.header_color),
        );
    }

    render_list(&painter, browser, view, theme);

    if browser.detail().pane_visible() {
        if let Some(game) = &view.game {
            render_game(&painter, browser, game, theme, textures);
        }
    }

    let fade = browser.effect_frame().fade;
    if fade > 0.0 {
        let overlay = ctx.layer_painter(LayerId::new(Order::Foreground, egui::Id::new("launch_fade")));
        overlay.rect_filled(
            egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(screen.x, screen.y)),
            0.0,
            Color32::from_black_alpha((fade * 255.0).round() as u8),
        );
    }
}

/// First visible row so that `selected` stays roughly centered
pub fn first_visible_row(selected: usize, len: usize, visible: usize) -> usize {
    if visible == 0 || len <= visible {
        return 0;
    }
    selected
        .saturating_sub(visible / 2)
        .min(len - visible)
}

fn render_list(painter: &Painter, browser: &BrowserController, view: &DetailView, theme: &ThemeSettings) {
    let Some(tree) = browser.tree() else {
        return;
    };
    let list = view.list;
    let row_height = browser.screen().y * ROW_HEIGHT;
    let font = FontId::proportional(row_height * 0.8);
    let entries = browser.entries();
    let selected = browser.cursor().selected();

    let visible = (list.rect.size.y / row_height).floor() as usize;
    let first = first_visible_row(selected, entries.len(), visible);

    for (row, &id) in entries.iter().enumerate().skip(first).take(visible) {
        let top = list.rect.pos.y + (row - first) as f32 * row_height;
        let row_rect = egui::Rect::from_min_size(
            egui::pos2(list.rect.pos.x, top),
            egui::vec2(list.rect.size.x, row_height),
        );

        let is_selected = row == selected;
        if is_selected {
            painter.rect_filled(row_rect, 0.0, theme_color(theme.selector_color));
        }

        let color = if is_selected && theme.selected_color & 0xFF != 0 {
            theme_color(theme.selected_color)
        } else if tree.is_folder(id) {
            theme_color(theme.secondary_color)
        } else {
            theme_color(theme.primary_color)
        };

        let (pos, align) = if list.centered {
            (row_rect.center(), Align2::CENTER_CENTER)
        } else {
            (
                egui::pos2(row_rect.left() + list.text_offset_x, row_rect.center().y),
                Align2::LEFT_CENTER,
            )
        };
        painter.text(pos, align, tree.name(id), font.clone(), color);
    }
}

/// Bind `image` and look up its egui texture
fn bound_texture(image: &PlacedImage, textures: &RefCell<EguiTextureBackend>) -> Option<egui::TextureId> {
    if !image.is_visible() || !image.texture.bind() {
        return None;
    }
    let backend = textures.borrow();
    backend.bound().and_then(|id| backend.egui_texture(id))
}

fn paint_image(painter: &Painter, image: &PlacedImage, rect: Rect, textures: &RefCell<EguiTextureBackend>) {
    if let Some(texture) = bound_texture(image, textures) {
        painter.image(
            texture,
            to_egui_rect(rect),
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            Color32::WHITE,
        );
    }
}

fn render_game(
    painter: &Painter,
    browser: &BrowserController,
    game: &GameDetail,
    theme: &ThemeSettings,
    textures: &RefCell<EguiTextureBackend>,
) {
    match &game.images {
        GameImages::Single(image) => paint_image(painter, image, image.rect, textures),
        GameImages::Stack { rect, images } => {
            // Scroll so the current image sits at the top of the stack
            let index = browser.detail().scroll().index();
            let scroll = images
                .get(index)
                .map_or(0.0, |image| image.rect.pos.y - rect.pos.y);
            let clipped = painter.with_clip_rect(to_egui_rect(*rect));
            for image in images {
                let mut placed = image.rect;
                placed.pos.y -= scroll;
                paint_image(&clipped, image, placed, textures);
            }
        }
    }

    let screen = browser.screen();
    let font = FontId::proportional(screen.y * DETAIL_FONT);
    let color = theme_color(theme.description_color);
    let stars = (game.rating * 5.0).round() as usize;

    let text = format!(
        "Rating: {}{}\nReleased: {}\nLast played: {}\nTimes played: {}\n\n{}",
        "*".repeat(stars),
        "-".repeat(5 - stars.min(5)),
        game.release_date_text,
        game.last_played_text,
        game.times_played,
        game.description
    );
    let galley = painter.layout(text, font, color, game.text_rect.size.x.max(1.0));
    let text_clip = painter.with_clip_rect(to_egui_rect(game.text_rect));
    text_clip.galley(
        egui::pos2(game.text_rect.pos.x, game.text_rect.pos.y),
        galley,
        color,
    );
}
