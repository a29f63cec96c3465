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

//! Unit tests for the library model

use super::*;
use crate::core::error::{BrowserError, ConfigError};
use chrono::TimeZone;
use proptest::prelude::*;

const RATING_ASC: usize = 2;
const RATING_DESC: usize = 3;
const PLAYED_LEAST: usize = 4;
const PLAYED_MOST_RECENTLY: usize = 7;

fn game(rating: f32, times_played: u32) -> GameMetadata {
    GameMetadata {
        rating,
        times_played,
        ..GameMetadata::default()
    }
}

fn names(tree: &LibraryTree, folder: NodeId) -> Vec<String> {
    tree.children(folder)
        .iter()
        .map(|&id| tree.name(id).to_string())
        .collect()
}

fn sample_tree() -> LibraryTree {
    let mut tree = LibraryTree::new("snes", "/roms/snes");
    let root = tree.root();
    tree.add_game(root, "zelda", "/roms/snes/zelda.sfc", game(0.9, 3))
        .unwrap();
    tree.add_game(root, "Contra", "/roms/snes/Contra.sfc", game(0.5, 10))
        .unwrap();
    tree.add_game(root, "mario", "/roms/snes/mario.sfc", game(0.7, 0))
        .unwrap();
    tree
}

#[test]
fn test_sort_by_name_is_case_insensitive() {
    let mut tree = sample_tree();
    let root = tree.root();

    tree.sort_folder(root, 0).unwrap();
    assert_eq!(names(&tree, root), ["Contra", "mario", "zelda"]);

    tree.sort_folder(root, 1).unwrap();
    assert_eq!(names(&tree, root), ["zelda", "mario", "Contra"]);
}

#[test]
fn test_sort_by_rating() {
    let mut tree = sample_tree();
    let root = tree.root();

    tree.sort_folder(root, RATING_ASC).unwrap();
    assert_eq!(names(&tree, root), ["Contra", "mario", "zelda"]);

    tree.sort_folder(root, RATING_DESC).unwrap();
    assert_eq!(names(&tree, root), ["zelda", "mario", "Contra"]);
}

#[test]
fn test_sort_by_times_played() {
    let mut tree = sample_tree();
    let root = tree.root();

    tree.sort_folder(root, PLAYED_LEAST).unwrap();
    assert_eq!(names(&tree, root), ["mario", "zelda", "Contra"]);
}

#[test]
fn test_sort_by_last_played_never_played_first() {
    let mut tree = sample_tree();
    let root = tree.root();
    let ids = tree.children(root).to_vec();
    tree.game_mut(ids[0]).unwrap().last_played = Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
    tree.game_mut(ids[1]).unwrap().last_played = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

    tree.sort_folder(root, PLAYED_MOST_RECENTLY).unwrap();
    assert_eq!(names(&tree, root), ["Contra", "zelda", "mario"]);
}

#[test]
fn test_rating_ties_break_by_name() {
    let mut tree = LibraryTree::new("snes", "/roms/snes");
    let root = tree.root();
    tree.add_game(root, "b", "/b", game(0.5, 0)).unwrap();
    tree.add_game(root, "a", "/a", game(0.5, 0)).unwrap();
    tree.add_game(root, "c", "/c", game(0.1, 0)).unwrap();

    tree.sort_folder(root, RATING_ASC).unwrap();
    assert_eq!(names(&tree, root), ["c", "a", "b"]);

    tree.sort_folder(root, RATING_DESC).unwrap();
    assert_eq!(names(&tree, root), ["b", "a", "c"]);
}

#[test]
fn test_sort_only_touches_one_folder() {
    let mut tree = LibraryTree::new("snes", "/roms/snes");
    let root = tree.root();
    let sub = tree.add_folder(root, "rpg", "/roms/snes/rpg").unwrap();
    tree.add_game(sub, "z", "/z", GameMetadata::default()).unwrap();
    tree.add_game(sub, "a", "/a", GameMetadata::default()).unwrap();

    tree.sort_folder(root, 0).unwrap();
    assert_eq!(names(&tree, sub), ["z", "a"]);
}

#[test]
fn test_sort_game_is_error() {
    let mut tree = sample_tree();
    let id = tree.children(tree.root())[0];
    assert!(matches!(
        tree.sort_folder(id, 0),
        Err(LibraryError::NotAFolder(_))
    ));
}

#[test]
fn test_add_to_game_is_error() {
    let mut tree = sample_tree();
    let id = tree.children(tree.root())[0];
    assert!(tree.add_game(id, "x", "/x", GameMetadata::default()).is_err());
}

#[test]
fn test_sort_index_cycling() {
    let mut index = 0;
    for _ in 0..SORT_STATES.len() {
        index = next_sort_index(index);
    }
    assert_eq!(index, 0);

    assert_eq!(previous_sort_index(0), SORT_STATES.len() - 1);
    assert_eq!(next_sort_index(SORT_STATES.len() - 1), 0);
    assert_eq!(normalize_sort_index(42), 0);
}

#[test]
fn test_mark_selected_stamps_ancestors() {
    let mut tree = LibraryTree::new("snes", "/roms/snes");
    let root = tree.root();
    let sub = tree.add_folder(root, "rpg", "/rpg").unwrap();
    let id = tree.add_game(sub, "ff", "/rpg/ff.sfc", GameMetadata::default()).unwrap();
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    tree.mark_selected(id, at);

    assert_eq!(tree.node(id).unwrap().last_selected, Some(at));
    assert_eq!(tree.node(sub).unwrap().last_selected, Some(at));
    assert_eq!(tree.node(root).unwrap().last_selected, Some(at));
}

#[test]
fn test_most_recently_selected() {
    let mut tree = sample_tree();
    let root = tree.root();
    assert_eq!(tree.most_recently_selected(root), 0);

    let ids = tree.children(root).to_vec();
    tree.mark_selected(ids[2], Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    tree.mark_selected(ids[1], Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());
    assert_eq!(tree.most_recently_selected(root), 2);
}

#[test]
fn test_remove_subtree() {
    let mut tree = LibraryTree::new("snes", "/roms/snes");
    let root = tree.root();
    let sub = tree.add_folder(root, "rpg", "/rpg").unwrap();
    let inner = tree.add_game(sub, "ff", "/rpg/ff.sfc", GameMetadata::default()).unwrap();
    let outer = tree.add_game(root, "mario", "/mario.sfc", GameMetadata::default()).unwrap();

    tree.remove(sub).unwrap();

    assert!(!tree.contains(sub));
    assert!(!tree.contains(inner));
    assert!(tree.contains(outer));
    assert_eq!(tree.children(root), [outer]);
    assert!(matches!(tree.remove(root), Err(LibraryError::RootRemoval)));
    assert!(matches!(tree.remove(sub), Err(LibraryError::UnknownNode(_))));
}

#[test]
fn test_prune_empty_folders() {
    let mut tree = LibraryTree::new("snes", "/roms/snes");
    let root = tree.root();
    let empty = tree.add_folder(root, "empty", "/empty").unwrap();
    let nested = tree.add_folder(empty, "nested", "/empty/nested").unwrap();
    let full = tree.add_folder(root, "full", "/full").unwrap();
    tree.add_game(full, "g", "/full/g.sfc", GameMetadata::default()).unwrap();

    tree.prune_empty_folders();

    assert!(!tree.contains(empty));
    assert!(!tree.contains(nested));
    assert!(tree.contains(full));
    assert_eq!(tree.game_count(), 1);
}

#[test]
fn test_has_any_image_searches_subfolders() {
    let mut tree = LibraryTree::new("snes", "/roms/snes");
    let root = tree.root();
    let sub = tree.add_folder(root, "rpg", "/rpg").unwrap();
    let id = tree.add_game(sub, "ff", "/rpg/ff.sfc", GameMetadata::default()).unwrap();
    assert!(!tree.has_any_image());

    tree.game_mut(id).unwrap().images.push("/img/ff.png".to_string());
    assert!(tree.has_any_image());
}

#[test]
fn test_base_name() {
    let tree = sample_tree();
    let id = tree.children(tree.root())[1];
    assert_eq!(tree.node(id).unwrap().base_name(), "Contra");
}

#[test]
fn test_ensure_sorted_resorts_after_insert() {
    let mut tree = sample_tree();
    let root = tree.root();
    tree.ensure_sorted(root, 0).unwrap();
    tree.add_game(root, "alpha", "/alpha.sfc", GameMetadata::default())
        .unwrap();

    tree.ensure_sorted(root, 0).unwrap();
    assert_eq!(names(&tree, root)[0], "alpha");
}

#[test]
fn test_system_scan_and_gamelist_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let start = dir.path();
    std::fs::create_dir(start.join("rpg")).unwrap();
    std::fs::create_dir(start.join("empty")).unwrap();
    std::fs::write(start.join("mario.sfc"), b"").unwrap();
    std::fs::write(start.join("readme.txt"), b"").unwrap();
    std::fs::write(start.join("rpg").join("ff.SFC"), b"").unwrap();

    let config = SystemConfig {
        name: "snes".to_string(),
        path: start.to_path_buf(),
        extensions: vec![".sfc".to_string()],
        ..SystemConfig::default()
    };
    let mut system = SystemData::load(config.clone()).unwrap();

    let tree = system.tree();
    assert_eq!(tree.game_count(), 2);
    assert_eq!(names(tree, tree.root()), ["mario", "rpg"]);

    let mario = tree.find_by_path(&start.join("mario.sfc")).unwrap();
    let meta = system.tree_mut().game_mut(mario).unwrap();
    meta.rating = 0.8;
    meta.images.push("/img/mario.png".to_string());
    system.save_gamelist().unwrap();

    let reloaded = SystemData::load(config).unwrap();
    let mario = reloaded.tree().find_by_path(&start.join("mario.sfc")).unwrap();
    let meta = reloaded.tree().game(mario).unwrap();
    assert_eq!(meta.rating, 0.8);
    assert_eq!(meta.images, ["/img/mario.png"]);
}

#[test]
fn test_selection_stamps_survive_reload() {
    let dir = tempfile::tempdir().unwrap();
    let start = dir.path();
    std::fs::create_dir(start.join("rpg")).unwrap();
    std::fs::write(start.join("alpha.sfc"), b"").unwrap();
    std::fs::write(start.join("zed.sfc"), b"").unwrap();
    std::fs::write(start.join("rpg").join("ff.sfc"), b"").unwrap();

    let config = SystemConfig {
        name: "snes".to_string(),
        path: start.to_path_buf(),
        extensions: vec![".sfc".to_string()],
        ..SystemConfig::default()
    };
    let mut system = SystemData::load(config.clone()).unwrap();
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let ff = system.tree().find_by_path(&start.join("rpg").join("ff.sfc")).unwrap();
    system.tree_mut().mark_selected(ff, at);
    system.save_gamelist().unwrap();

    let mut reloaded = SystemData::load(config).unwrap();
    let tree = reloaded.tree_mut();
    let root = tree.root();
    assert_eq!(tree.node(root).unwrap().last_selected, Some(at));

    // Listing order is [alpha, rpg, zed]; the stamped folder is restored
    tree.sort_folder(root, 0).unwrap();
    assert_eq!(tree.most_recently_selected(root), 1);
    let rpg = tree.children(root)[1];
    assert_eq!(tree.node(rpg).unwrap().last_selected, Some(at));
    let ff = tree.children(rpg)[0];
    assert_eq!(tree.node(ff).unwrap().last_selected, Some(at));
    assert!(tree.game(ff).unwrap().is_default());
}

#[cfg(unix)]
#[test]
fn test_scan_survives_symlink_loop() {
    let dir = tempfile::tempdir().unwrap();
    let start = dir.path();
    std::fs::create_dir(start.join("rpg")).unwrap();
    std::fs::write(start.join("mario.sfc"), b"").unwrap();
    std::fs::write(start.join("rpg").join("ff.sfc"), b"").unwrap();
    std::os::unix::fs::symlink(start, start.join("rpg").join("again")).unwrap();
    std::os::unix::fs::symlink(start.join("rpg"), start.join("rpg-link")).unwrap();

    let config = SystemConfig {
        name: "snes".to_string(),
        path: start.to_path_buf(),
        extensions: vec![".sfc".to_string()],
        ..SystemConfig::default()
    };
    let system = SystemData::load(config).unwrap();

    // Each directory is scanned once
    assert_eq!(system.tree().game_count(), 2);
}

#[test]
fn test_path_index() {
    let tree = sample_tree();
    let index = tree.path_index();
    assert_eq!(index.len(), tree.node_ids().count());
    for id in tree.node_ids() {
        assert_eq!(index[&tree.node(id).unwrap().path], id);
    }
}

#[test]
fn test_system_missing_start_path() {
    let config = SystemConfig {
        name: "nes".to_string(),
        path: PathBuf::from("/definitely/not/here"),
        ..SystemConfig::default()
    };
    assert!(matches!(
        SystemData::load(config),
        Err(LibraryError::MissingStartPath(_))
    ));
}

#[test]
fn test_systems_config_parse() {
    let config: SystemsConfig = toml::from_str(
        r#"
        [[system]]
        name = "snes"
        full_name = "Super Nintendo"
        path = "/roms/snes"
        extensions = [".sfc"]
        command = "snes9x %ROM%"

        [[system]]
        name = "nes"
        path = "/roms/nes"
        "#,
    )
    .unwrap();

    assert_eq!(config.systems.len(), 2);
    assert_eq!(config.systems[0].display_name(), "Super Nintendo");
    assert_eq!(config.systems[1].display_name(), "nes");
    assert_eq!(config.systems[1].screenshot_dir, None);
}

#[test]
fn test_load_systems_skips_broken_entries() {
    let dir = tempfile::tempdir().unwrap();
    let roms = dir.path().join("snes");
    std::fs::create_dir(&roms).unwrap();
    std::fs::write(roms.join("mario.sfc"), b"").unwrap();
    let path = dir.path().join("systems.toml");
    std::fs::write(
        &path,
        format!(
            r#"
            [[system]]
            name = "gone"
            path = '{}'

            [[system]]
            name = "snes"
            path = '{}'
            extensions = [".sfc"]
            "#,
            dir.path().join("missing").display(),
            roms.display()
        ),
    )
    .unwrap();

    let systems = load_systems(&path).unwrap();
    assert_eq!(systems.len(), 1);
    assert_eq!(systems[0].name(), "snes");
    assert_eq!(systems[0].tree().game_count(), 1);
}

#[test]
fn test_load_systems_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("systems.toml");
    assert!(matches!(
        load_systems(&path),
        Err(BrowserError::Config(ConfigError::Read { .. }))
    ));

    let broken = "[[system]]\nname = \"nes\"\npath = \"/definitely/not/here\"\n";
    std::fs::write(&path, broken).unwrap();
    assert!(matches!(
        load_systems(&path),
        Err(BrowserError::NoSystems)
    ));
}

proptest! {
    #[test]
    fn prop_descending_is_reverse_of_ascending(
        ratings in proptest::collection::vec(0.0f32..1.0, 0..32),
        kind in 0usize..4,
    ) {
        let mut tree = LibraryTree::new("sys", "/sys");
        let root = tree.root();
        for (i, rating) in ratings.iter().enumerate() {
            let meta = GameMetadata {
                rating: *rating,
                times_played: (i % 3) as u32,
                ..GameMetadata::default()
            };
            tree.add_game(root, &format!("game{}", i % 5), format!("/g{}", i), meta).unwrap();
        }

        tree.sort_folder(root, kind * 2).unwrap();
        let ascending = tree.children(root).to_vec();
        tree.sort_folder(root, kind * 2 + 1).unwrap();
        let mut descending = tree.children(root).to_vec();
        descending.reverse();

        prop_assert_eq!(ascending, descending);
    }
}
