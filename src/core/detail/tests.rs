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

//! Unit tests for the detail pane

use super::*;
use crate::core::texture::testing::{cache_with, MemorySource};
use crate::core::theme::ThemeSettings;
use chrono::TimeZone;
use std::path::PathBuf;

const SCREEN: Vec2 = Vec2::new(640.0, 480.0);

fn assert_near(actual: Vec2, expected: Vec2) {
    assert!(
        (actual.x - expected.x).abs() < 1e-3 && (actual.y - expected.y).abs() < 1e-3,
        "{:?} != {:?}",
        actual,
        expected
    );
}

struct Fixture {
    tree: LibraryTree,
    game: NodeId,
    bare_game: NodeId,
    folder: NodeId,
}

fn fixture(images: &[&str]) -> Fixture {
    let mut tree = LibraryTree::new("snes", "/roms/snes");
    let root = tree.root();
    let game = tree
        .add_game(
            root,
            "Zelda",
            "/roms/snes/zelda.sfc",
            GameMetadata {
                desc: "Link to the past".to_string(),
                rating: 0.8,
                release_date: NaiveDate::from_ymd_opt(1991, 11, 21),
                images: images.iter().map(|s| s.to_string()).collect(),
                ..GameMetadata::default()
            },
        )
        .unwrap();
    let bare_game = tree
        .add_game(root, "Contra", "/roms/snes/contra.sfc", GameMetadata::default())
        .unwrap();
    let folder = tree.add_folder(root, "Hacks", "/roms/snes/hacks").unwrap();
    tree.add_game(folder, "Hack", "/roms/snes/hacks/hack.sfc", GameMetadata::default())
        .unwrap();
    Fixture {
        tree,
        game,
        bare_game,
        folder,
    }
}

fn themed(settings: ThemeSettings) -> Theme {
    Theme {
        source: Some(PathBuf::from("/themes/theme.toml")),
        settings,
    }
}

fn source() -> MemorySource {
    MemorySource::default()
        .with_png("cover.png", 4, 2)
        .with_png("shot.png", 8, 8)
        .with_png("none.png", 2, 2)
}

fn ctx<'a>(tree: &'a LibraryTree, selection: NodeId, theme: &'a Theme) -> DetailContext<'a> {
    DetailContext {
        tree,
        selection: Some(selection),
        theme,
        screen: SCREEN,
        now: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

#[test]
fn test_simple_mode_without_theme() {
    let fx = fixture(&["cover.png"]);
    let theme = Theme::default();
    let (mut cache, _) = cache_with(source());

    let view = present(&ctx(&fx.tree, fx.game, &theme), &mut cache);
    assert!(!view.detailed);
    assert!(view.game.is_none());
    assert!(view.list.centered);
    assert_eq!(view.list.rect.pos.x, 0.0);
    assert_eq!(view.focus_point(), view.list.rect.center());
}

#[test]
fn test_simple_mode_without_any_image() {
    let fx = fixture(&[]);
    let theme = themed(ThemeSettings::default());
    let (mut cache, _) = cache_with(source());

    let view = present(&ctx(&fx.tree, fx.game, &theme), &mut cache);
    assert!(!view.detailed);
    assert!(view.game.is_none());
}

#[test]
fn test_image_in_subfolder_enables_detail() {
    let mut fx = fixture(&[]);
    let nested = fx.tree.children(fx.folder)[0];
    fx.tree.game_mut(nested).unwrap().images.push("cover.png".to_string());
    let theme = themed(ThemeSettings::default());
    let (mut cache, _) = cache_with(source());

    let view = present(&ctx(&fx.tree, fx.bare_game, &theme), &mut cache);
    assert!(view.detailed);
}

#[test]
fn test_single_image_layout() {
    let fx = fixture(&["cover.png"]);
    let theme = themed(ThemeSettings::default());
    let (mut cache, _) = cache_with(source());

    let view = present(&ctx(&fx.tree, fx.game, &theme), &mut cache);
    assert!(view.detailed);
    assert_eq!(view.list.rect.pos.x, 320.0);

    let game = view.game.as_ref().unwrap();
    assert_eq!(game.description, "Link to the past");
    assert_eq!(game.release_date_text, "1991-11-21");
    assert_eq!(game.last_played_text, "never");

    let GameImages::Single(image) = &game.images else {
        panic!("expected a single image");
    };
    assert_eq!(image.texture.path(), "cover.png");
    // 4x2 resized to 320 wide, horizontally centered on x = 160
    assert_eq!(image.rect, Rect::new(Vec2::new(0.0, 48.0), Vec2::new(320.0, 160.0)));
    assert!(image.is_visible());
    assert_near(game.text_rect.pos, Vec2::new(19.2, 220.0));
    assert_eq!(view.focus_point(), image.rect.center());
}

#[test]
fn test_missing_image_uses_not_found() {
    let fx = fixture(&["cover.png"]);
    let theme = themed(ThemeSettings {
        image_not_found_path: "none.png".to_string(),
        ..ThemeSettings::default()
    });
    let (mut cache, _) = cache_with(source());

    let view = present(&ctx(&fx.tree, fx.bare_game, &theme), &mut cache);
    let game = view.game.unwrap();
    let GameImages::Single(image) = &game.images else {
        panic!("expected a single image");
    };
    assert_eq!(image.texture.path(), "none.png");
    assert_eq!(image.rect.size, Vec2::new(320.0, 320.0));
}

#[test]
fn test_unreadable_image_falls_back() {
    let fx = fixture(&["missing.png"]);
    // Another game carries a real image so the system stays detailed
    let mut tree = fx.tree.clone();
    tree.game_mut(fx.bare_game).unwrap().images.push("cover.png".to_string());
    let theme = themed(ThemeSettings {
        image_not_found_path: "none.png".to_string(),
        ..ThemeSettings::default()
    });
    let (mut cache, _) = cache_with(source());

    let view = present(&ctx(&tree, fx.game, &theme), &mut cache);
    let game = view.game.unwrap();
    let GameImages::Single(image) = &game.images else {
        panic!("expected a single image");
    };
    assert_eq!(image.texture.path(), "none.png");
}

#[test]
fn test_missing_image_without_not_found_is_invisible() {
    let fx = fixture(&["cover.png"]);
    let theme = themed(ThemeSettings::default());
    let (mut cache, _) = cache_with(source());

    let view = present(&ctx(&fx.tree, fx.bare_game, &theme), &mut cache);
    let game = view.game.unwrap();
    let GameImages::Single(image) = &game.images else {
        panic!("expected a single image");
    };
    assert_eq!(image.texture.path(), "");
    assert_eq!(image.rect.size, Vec2::ZERO);
    assert!(!image.is_visible());
}

#[test]
fn test_multi_image_stack() {
    let fx = fixture(&["cover.png", "missing.png", "shot.png"]);
    let theme = themed(ThemeSettings {
        game_images_multi: true,
        ..ThemeSettings::default()
    });
    let (mut cache, _) = cache_with(source());

    let view = present(&ctx(&fx.tree, fx.game, &theme), &mut cache);
    let GameImages::Stack { rect, images } = &view.game.as_ref().unwrap().images else {
        panic!("expected a stack");
    };
    assert_eq!(images.len(), 2);
    // No upscaling: native sizes, 4.8 px apart
    assert_eq!(images[0].rect, Rect::new(Vec2::new(160.0, 48.0), Vec2::new(4.0, 2.0)));
    assert_near(images[1].rect.pos, Vec2::new(160.0, 54.8));
    assert_eq!(images[1].rect.size, Vec2::new(8.0, 8.0));
    assert_eq!(rect.size.x, 320.0);
    assert!((rect.size.y - 14.8).abs() < 1e-4);
    assert_eq!(view.focus_point(), rect.center());
}

#[test]
fn test_multi_image_upscale() {
    let fx = fixture(&["cover.png"]);
    let theme = themed(ThemeSettings {
        game_images_multi: true,
        game_images_upscale: true,
        ..ThemeSettings::default()
    });
    let (mut cache, _) = cache_with(source());

    let view = present(&ctx(&fx.tree, fx.game, &theme), &mut cache);
    let game = view.game.unwrap();
    let GameImages::Stack { images, .. } = &game.images else {
        panic!("expected a stack");
    };
    assert_eq!(images[0].rect.size, Vec2::new(320.0, 160.0));
}

#[test]
fn test_folder_selection_has_no_game_pane() {
    let fx = fixture(&["cover.png"]);
    let theme = themed(ThemeSettings::default());
    let (mut cache, _) = cache_with(source());

    let view = present(&ctx(&fx.tree, fx.folder, &theme), &mut cache);
    assert!(view.detailed);
    assert!(view.game.is_none());
    assert_eq!(view.focus_point(), view.image_area.unwrap().center());
}

#[test]
fn test_view_keeps_texture_alive() {
    let fx = fixture(&["cover.png"]);
    let theme = themed(ThemeSettings::default());
    let (mut cache, backend) = cache_with(source());

    let mut presenter = DetailPresenter::new();
    presenter.refresh(&ctx(&fx.tree, fx.game, &theme), &mut cache);
    assert!(cache.is_live("cover.png"));

    presenter.refresh(&ctx(&fx.tree, fx.game, &theme), &mut cache);
    assert_eq!(backend.borrow().uploads, 1);
}

#[test]
fn test_hide_keeps_content() {
    let fx = fixture(&["cover.png"]);
    let theme = themed(ThemeSettings::default());
    let (mut cache, _) = cache_with(source());

    let mut presenter = DetailPresenter::new();
    assert!(!presenter.pane_visible());
    presenter.refresh(&ctx(&fx.tree, fx.game, &theme), &mut cache);
    assert!(presenter.pane_visible());

    presenter.hide();
    assert!(presenter.is_hidden());
    assert!(!presenter.pane_visible());
    assert!(presenter.view().unwrap().game.is_some());

    presenter.refresh(&ctx(&fx.tree, fx.game, &theme), &mut cache);
    assert!(presenter.pane_visible());
}

#[test]
fn test_stack_scroll() {
    let mut scroll = StackScroll::default();
    scroll.update(1000, 3);
    assert_eq!(scroll.index(), 0);
    scroll.update(500, 3);
    assert_eq!(scroll.index(), 0);
    scroll.update(500, 3);
    assert_eq!(scroll.index(), 1);
    scroll.update(1000, 3);
    assert_eq!(scroll.index(), 0);

    scroll.update(10_000, 1);
    assert_eq!(scroll.index(), 0);
}
