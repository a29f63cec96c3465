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

//! Detail pane view-state
//!
//! [`present`] turns the current selection and theme into a [`DetailView`]:
//! list placement, and for a selected game its text, images and their screen
//! rectangles. The renderer only draws what it is given.
//!
//! The view is "simple" (list only) unless a theme file was found and some
//! game of the system has an image.

mod layout;
#[cfg(test)]
mod tests;

pub use layout::{fit_width, format_date, format_relative, resize_to};

use crate::core::geometry::{Rect, Vec2};
use crate::core::library::{GameMetadata, LibraryTree, NodeId};
use crate::core::texture::{TextureCache, TextureHandle};
use crate::core::theme::Theme;
use chrono::{DateTime, NaiveDate, Utc};

/// Height of the header strip above the list, as a fraction of the screen
pub const HEADER_HEIGHT: f32 = 0.08;

/// Left edge of the description column, as a fraction of the screen
const DESCRIPTION_X: f32 = 0.03;

/// Gap between the image and the description (px)
const DESCRIPTION_GAP: f32 = 12.0;

/// Time before a multi-image stack starts scrolling (ms)
pub const AUTO_SCROLL_DELAY_MS: u32 = 1500;

/// Time each image stays on top once scrolling (ms)
pub const AUTO_SCROLL_STEP_MS: u32 = 500;

/// Where and how the game list is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListLayout {
    pub rect: Rect,
    pub centered: bool,
    /// Text inset from the left edge (px)
    pub text_offset_x: f32,
}

/// An image with its placement
#[derive(Debug, Clone)]
pub struct PlacedImage {
    pub texture: TextureHandle,
    pub rect: Rect,
}

impl PlacedImage {
    /// Zero-size or unloaded images are not drawn
    pub fn is_visible(&self) -> bool {
        !self.rect.is_empty() && self.texture.is_loaded()
    }
}

/// Game image presentation
#[derive(Debug, Clone)]
pub enum GameImages {
    /// One image resized into the theme's box
    Single(PlacedImage),
    /// Every image, stacked vertically inside `rect`
    Stack {
        rect: Rect,
        /// Positions are relative to the top of the stack before scrolling
        images: Vec<PlacedImage>,
    },
}

impl GameImages {
    /// Area covered by the images
    pub fn rect(&self) -> Rect {
        match self {
            Self::Single(image) => image.rect,
            Self::Stack { rect, .. } => *rect,
        }
    }
}

/// Everything shown for the selected game
#[derive(Debug, Clone)]
pub struct GameDetail {
    pub description: String,
    /// `0.0..=1.0`
    pub rating: f32,
    pub release_date: Option<NaiveDate>,
    pub release_date_text: String,
    pub last_played: Option<DateTime<Utc>>,
    pub last_played_text: String,
    pub times_played: u32,
    pub images: GameImages,
    /// Column holding the text below the images
    pub text_rect: Rect,
}

/// Complete pane state
#[derive(Debug, Clone)]
pub struct DetailView {
    pub detailed: bool,
    pub list: ListLayout,
    /// Anchor box of the game image area (detailed mode only)
    pub image_area: Option<Rect>,
    /// `None` for folders, empty folders and simple mode
    pub game: Option<GameDetail>,
}

impl DetailView {
    /// Point the launch effect zooms into
    ///
    /// The image area's center in detailed mode, the list's in simple mode.
    pub fn focus_point(&self) -> Vec2 {
        match (&self.game, self.image_area) {
            (Some(game), _) if self.detailed => game.images.rect().center(),
            (None, Some(area)) if self.detailed => area.center(),
            _ => self.list.rect.center(),
        }
    }
}

/// Inputs of [`present`]
#[derive(Clone, Copy)]
pub struct DetailContext<'a> {
    pub tree: &'a LibraryTree,
    pub selection: Option<NodeId>,
    pub theme: &'a Theme,
    /// Screen size in pixels
    pub screen: Vec2,
    pub now: DateTime<Utc>,
}

/// Whether the detailed layout applies
pub fn is_detailed(tree: &LibraryTree, theme: &Theme) -> bool {
    theme.supports_detail() && tree.has_any_image()
}

/// Compute the pane state for `ctx`
///
/// Textures are requested from `cache` so the view holds them alive while it
/// is shown.
pub fn present(ctx: &DetailContext<'_>, cache: &mut TextureCache) -> DetailView {
    let settings = &ctx.theme.settings;
    let (w, h) = (ctx.screen.x, ctx.screen.y);
    let top = HEADER_HEIGHT * h;
    let detailed = is_detailed(ctx.tree, ctx.theme);

    if !detailed {
        return DetailView {
            detailed,
            list: ListLayout {
                rect: Rect::new(Vec2::new(0.0, top), Vec2::new(w, h - top)),
                centered: true,
                text_offset_x: 0.0,
            },
            image_area: None,
            game: None,
        };
    }

    let list_x = settings.list_offset_x * w;
    let list = ListLayout {
        rect: Rect::new(Vec2::new(list_x, top), Vec2::new(w - list_x, h - top)),
        centered: settings.list_centered,
        text_offset_x: settings.list_text_offset_x * w,
    };
    let image_area = Rect::new(
        Vec2::new(
            settings.game_image_offset_x * w,
            settings.game_image_offset_y * h,
        ),
        Vec2::new(settings.game_image_width * w, settings.game_image_height * h),
    );

    let game = ctx
        .selection
        .and_then(|id| ctx.tree.game(id))
        .map(|meta| game_detail(ctx, meta, image_area, cache));

    DetailView {
        detailed,
        list,
        image_area: Some(image_area),
        game,
    }
}

fn game_detail(
    ctx: &DetailContext<'_>,
    meta: &GameMetadata,
    area: Rect,
    cache: &mut TextureCache,
) -> GameDetail {
    let settings = &ctx.theme.settings;
    let images = if settings.game_images_multi {
        stack_images(ctx, meta, area, cache)
    } else {
        single_image(ctx, meta, area, cache)
    };

    // Text starts below the image's nominal box, ignoring its origin
    let image_height = match &images {
        GameImages::Single(image) => image.rect.size.y,
        GameImages::Stack { rect, .. } => rect.size.y,
    };
    let text_y = area.pos.y + image_height + DESCRIPTION_GAP;
    let text_rect = Rect::new(
        Vec2::new(DESCRIPTION_X * ctx.screen.x, text_y),
        Vec2::new(
            ((settings.list_offset_x - DESCRIPTION_X) * ctx.screen.x).max(0.0),
            (ctx.screen.y - text_y).max(0.0),
        ),
    );

    GameDetail {
        description: meta.desc.clone(),
        rating: meta.rating,
        release_date: meta.release_date,
        release_date_text: format_date(meta.release_date),
        last_played: meta.last_played,
        last_played_text: format_relative(meta.last_played, ctx.now),
        times_played: meta.times_played,
        images,
        text_rect,
    }
}

/// First image, else the not-found image, else an invisible placeholder
fn single_image(
    ctx: &DetailContext<'_>,
    meta: &GameMetadata,
    area: Rect,
    cache: &mut TextureCache,
) -> GameImages {
    let settings = &ctx.theme.settings;
    let texture = meta
        .images
        .first()
        .map(|path| cache.get(path))
        .filter(|texture| texture.is_loaded())
        .or_else(|| {
            if settings.image_not_found_path.is_empty() {
                None
            } else {
                Some(cache.get(&settings.image_not_found_path))
            }
        })
        .unwrap_or_else(|| cache.get(""));

    let size = resize_to(texture.size(), area.size);
    let origin = Vec2::new(settings.game_image_origin_x, settings.game_image_origin_y);
    let pos = area.pos - Vec2::new(size.x * origin.x, size.y * origin.y);

    GameImages::Single(PlacedImage {
        texture,
        rect: Rect::new(pos, size),
    })
}

/// Every loadable image stacked top to bottom
fn stack_images(
    ctx: &DetailContext<'_>,
    meta: &GameMetadata,
    area: Rect,
    cache: &mut TextureCache,
) -> GameImages {
    let settings = &ctx.theme.settings;
    let space = settings.game_image_space * ctx.screen.y;

    let mut textures: Vec<TextureHandle> = meta
        .images
        .iter()
        .map(|path| cache.get(path))
        .filter(|texture| texture.is_loaded())
        .collect();
    if textures.is_empty() && !settings.image_not_found_path.is_empty() {
        textures.push(cache.get(&settings.image_not_found_path));
    }

    let mut images = Vec::with_capacity(textures.len());
    let mut y = 0.0;
    let mut widest: f32 = 0.0;
    for texture in textures {
        let size = fit_width(texture.size(), area.size.x, settings.game_images_upscale);
        if size.y <= 0.0 {
            continue;
        }
        images.push(PlacedImage {
            texture,
            rect: Rect::new(Vec2::new(area.pos.x, area.pos.y + y), size),
        });
        y += size.y + space;
        widest = widest.max(size.x);
    }
    let content_height = (y - space).max(0.0);

    let size = Vec2::new(
        if area.size.x > 0.0 { area.size.x } else { widest },
        if area.size.y > 0.0 { area.size.y } else { content_height },
    );
    GameImages::Stack {
        rect: Rect::new(area.pos, size),
        images,
    }
}

/// Auto-scroll position of a multi-image stack
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StackScroll {
    elapsed_ms: u32,
    index: usize,
}

impl StackScroll {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance by `delta_ms` over a stack of `count` images
    ///
    /// After [`AUTO_SCROLL_DELAY_MS`] the top image changes every
    /// [`AUTO_SCROLL_STEP_MS`], wrapping to the first one.
    pub fn update(&mut self, delta_ms: u32, count: usize) {
        if count < 2 {
            self.index = 0;
            return;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
        if self.elapsed_ms < AUTO_SCROLL_DELAY_MS {
            return;
        }
        let steps = (self.elapsed_ms - AUTO_SCROLL_DELAY_MS) / AUTO_SCROLL_STEP_MS;
        self.index = steps as usize % count;
    }

    /// Image currently at the top of the stack
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Holds the current [`DetailView`] and its visibility
///
/// Hiding keeps the content so the pane can come back without recomputing.
#[derive(Debug, Clone)]
pub struct DetailPresenter {
    view: Option<DetailView>,
    hidden: bool,
    scroll: StackScroll,
}

impl Default for DetailPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailPresenter {
    pub fn new() -> Self {
        Self {
            view: None,
            hidden: false,
            scroll: StackScroll::default(),
        }
    }

    /// Recompute the view and show it
    pub fn refresh(&mut self, ctx: &DetailContext<'_>, cache: &mut TextureCache) {
        self.view = Some(present(ctx, cache));
        self.hidden = false;
        self.scroll.reset();
    }

    /// Remove the pane from display, keeping its content
    pub fn hide(&mut self) {
        self.hidden = true;
    }

    #[inline(always)]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Last computed view
    #[inline(always)]
    pub fn view(&self) -> Option<&DetailView> {
        self.view.as_ref()
    }

    /// Whether the game pane should be drawn now
    pub fn pane_visible(&self) -> bool {
        !self.hidden
            && self
                .view
                .as_ref()
                .is_some_and(|view| view.detailed && view.game.is_some())
    }

    /// Point the launch effect zooms into
    pub fn focus_point(&self, screen: Vec2) -> Vec2 {
        self.view
            .as_ref()
            .map(DetailView::focus_point)
            .unwrap_or(screen * 0.5)
    }

    #[inline(always)]
    pub fn scroll(&self) -> StackScroll {
        self.scroll
    }

    /// Advance the stack auto-scroll
    pub fn update(&mut self, delta_ms: u32) {
        let count = match self.view.as_ref().and_then(|view| view.game.as_ref()) {
            Some(GameDetail {
                images: GameImages::Stack { images, .. },
                ..
            }) => images.len(),
            _ => 0,
        };
        if !self.hidden {
            self.scroll.update(delta_ms, count);
        }
    }
}
