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

//! Browsing session
//!
//! [`BrowserController`] owns the loaded systems and drives navigation:
//! entering and leaving folders, switching systems, changing the sort order,
//! and launching games through the launch effect.
//!
//! # Per-frame flow
//!
//! ```text
//! input(event)*  ->  tick(delta_ms, launcher)  ->  draw from accessors
//! ```
//!
//! Input is fully processed before [`tick`](BrowserController::tick)
//! advances the list cursor, the detail pane, and the effects. While a launch
//! effect runs every input event is consumed and ignored.
//!
//! Things the browser cannot do itself (sounds, menus, metadata editing) are
//! queued as [`BrowserRequest`]s for the host.

mod cursor;
mod input;

pub use cursor::{ListCursor, SCROLL_DELAY_MS, SCROLL_REPEAT_MS};
pub use input::{Action, InputEvent, NavKeys, PAGE_STEP};

use crate::core::detail::{is_detailed, DetailContext, DetailPresenter};
use crate::core::effect::{
    launch_duration, EffectEvent, EffectFrame, LaunchEffectSequencer, SlideTransition,
};
use crate::core::error::LibraryError;
use crate::core::geometry::Vec2;
use crate::core::launcher::GameLauncher;
use crate::core::library::{
    next_sort_index, normalize_sort_index, previous_sort_index, GameMetadata, LibraryTree, NodeId,
    SortState, SystemData, SORT_STATES,
};
use crate::core::screenshot::import_fresh_screenshots;
use crate::core::settings::Settings;
use crate::core::texture::TextureCache;
use crate::core::theme::Theme;
use chrono::Utc;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Sound the host should play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Select,
    Back,
    Scroll,
}

/// Work handed to the host UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserRequest {
    PlaySound(Sound),
    OpenMenu,
    /// Open fast select, starting at the letter of the current selection
    OpenFastSelect(Option<char>),
    /// Edit (or delete) this game; answer with
    /// [`update_metadata`](BrowserController::update_metadata) or
    /// [`remove_game`](BrowserController::remove_game)
    EditMetadata(NodeId),
    OpenScraper,
}

/// Sort cycling direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Next,
    Previous,
}

/// Where the browser currently is inside a system
#[derive(Debug, Clone, PartialEq, Eq)]
struct Session {
    system: usize,
    folder: NodeId,
    back_stack: Vec<NodeId>,
}

/// Navigation state machine over all systems
pub struct BrowserController {
    systems: Vec<SystemData>,
    /// `None` only when no system is configured
    session: Option<Session>,
    sort_index: usize,
    settings: Settings,
    config_dir: Option<PathBuf>,
    theme: Theme,
    cursor: ListCursor,
    held: NavKeys,
    cache: TextureCache,
    detail: DetailPresenter,
    effect: LaunchEffectSequencer,
    /// Game the running launch effect belongs to
    launching: Option<NodeId>,
    slide: SlideTransition,
    screen: Vec2,
    requests: VecDeque<BrowserRequest>,
    /// Current system uses the detailed layout
    detailed: bool,
    /// Selection stamps changed since the sidecar was last written
    selection_dirty: bool,
}

impl BrowserController {
    /// Start a session
    ///
    /// The system whose root was selected most recently becomes active. An
    /// empty `systems` list is accepted; every operation then logs an error
    /// and does nothing.
    ///
    /// # Arguments
    ///
    /// * `systems` - Loaded systems, in header order
    /// * `settings` - Persisted settings; supplies the sort index
    /// * `config_dir` - User configuration directory searched for themes
    /// * `cache` - Texture cache used for detail images
    /// * `screen` - Screen size used for layout
    ///
    /// # Example
    ///
    /// ```
    /// use romshelf::core::browser::BrowserController;
    /// use romshelf::core::geometry::Vec2;
    /// use romshelf::core::settings::Settings;
    /// use romshelf::core::texture::{FileSystemSource, GpuTextureId, TextureBackend, TextureCache};
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    ///
    /// struct NoGpu;
    ///
    /// impl TextureBackend for NoGpu {
    ///     fn upload(&mut self, _w: u32, _h: u32, _rgba: &[u8]) -> Option<GpuTextureId> {
    ///         None
    ///     }
    ///     fn release(&mut self, _id: GpuTextureId) {}
    ///     fn bind(&mut self, _id: GpuTextureId) {}
    /// }
    ///
    /// let cache = TextureCache::new(Rc::new(RefCell::new(NoGpu)), Rc::new(FileSystemSource));
    /// let browser = BrowserController::new(
    ///     Vec::new(),
    ///     Settings::in_memory(),
    ///     None,
    ///     cache,
    ///     Vec2::new(1280.0, 720.0),
    /// );
    /// assert!(browser.selected().is_none());
    /// ```
    pub fn new(
        systems: Vec<SystemData>,
        settings: Settings,
        config_dir: Option<PathBuf>,
        cache: TextureCache,
        screen: Vec2,
    ) -> Self {
        let sort_index = normalize_sort_index(settings.sort_index());
        let mut browser = Self {
            systems,
            session: None,
            sort_index,
            settings,
            config_dir,
            theme: Theme::default(),
            cursor: ListCursor::new(),
            held: NavKeys::empty(),
            cache,
            detail: DetailPresenter::new(),
            effect: LaunchEffectSequencer::new(),
            launching: None,
            slide: SlideTransition::default(),
            screen,
            requests: VecDeque::new(),
            detailed: false,
            selection_dirty: false,
        };

        let index = most_recent_system(&browser.systems);
        browser.set_system(index);
        browser
    }

    /// Make system `index` current, wrapping out-of-range values
    ///
    /// Clears the back stack and reloads the theme and listing.
    fn set_system(&mut self, index: i64) {
        if self.systems.is_empty() {
            log::error!("No systems found");
            return;
        }

        // Leaving a system writes its selection stamps
        if self.session.is_some() {
            self.save_selection();
        }

        let index = index.rem_euclid(self.systems.len() as i64) as usize;
        let system = &self.systems[index];
        self.theme = Theme::for_system(self.config_dir.as_deref(), system.config());
        self.detailed = is_detailed(system.tree(), &self.theme);
        self.session = Some(Session {
            system: index,
            folder: system.root(),
            back_stack: Vec::new(),
        });
        log::info!("Browsing system '{}'", system.name());

        self.update_list();
        self.refresh_detail();
    }

    /// Sort the current folder if needed and restore its selection
    fn update_list(&mut self) {
        let sort_index = self.sort_index;
        let Some((system, folder)) = self.current_mut() else {
            return;
        };
        let tree = system.tree_mut();
        if let Err(e) = tree.ensure_sorted(folder, sort_index) {
            log::error!("Failed to sort folder: {}", e);
        }
        let len = tree.children(folder).len();
        let restored = tree.most_recently_selected(folder);

        self.cursor.stop_scrolling();
        self.cursor.set_len(len);
        self.cursor.select(restored);
    }

    /// Recompute the detail pane from the current selection
    pub fn refresh_detail(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let tree = self.systems[session.system].tree();
        let selection = tree.children(session.folder).get(self.cursor.selected()).copied();
        let ctx = DetailContext {
            tree,
            selection,
            theme: &self.theme,
            screen: self.screen,
            now: Utc::now(),
        };
        self.detail.refresh(&ctx, &mut self.cache);
    }

    fn current_mut(&mut self) -> Option<(&mut SystemData, NodeId)> {
        let session = self.session.as_ref()?;
        let folder = session.folder;
        Some((&mut self.systems[session.system], folder))
    }

    /// Stamp the selection and its ancestors as used now
    fn stamp_selection(&mut self) {
        let Some(id) = self.selected() else {
            return;
        };
        if let Some((system, _)) = self.current_mut() {
            system.tree_mut().mark_selected(id, Utc::now());
            self.selection_dirty = true;
        }
    }

    /// Re-evaluate the layout mode after images were added or removed
    fn update_detailed(&mut self) {
        self.detailed = match self.tree() {
            Some(tree) => is_detailed(tree, &self.theme),
            None => false,
        };
    }

    /// Write the current system's sidecar if selection stamps changed
    ///
    /// Called when leaving a system; the host calls it once more on exit.
    pub fn save_selection(&mut self) {
        if !self.selection_dirty {
            return;
        }
        if let Some(system) = self.current_system() {
            save_gamelist(system);
        }
        self.selection_dirty = false;
    }

    /// Handle one input event
    ///
    /// Returns whether the event was consumed. Everything is consumed while
    /// locked; releases still clear held keys so nothing sticks afterwards.
    pub fn input(&mut self, event: InputEvent) -> bool {
        if self.is_locked() {
            if !event.pressed {
                if let Some(key) = event.action.nav_key() {
                    self.held.remove(key);
                    self.cursor.release();
                }
            }
            return true;
        }
        if self.session.is_none() {
            log::error!("No systems found");
            return false;
        }

        let action = event.action;
        let pressed = event.pressed;

        if let Some(step) = action.scroll_step() {
            if pressed {
                if self.cursor.press(step) {
                    self.on_selection_moved();
                }
            } else {
                self.cursor.release();
            }
        }

        match action {
            Action::EditMetadata if pressed => {
                if let Some(id) = self.selected().filter(|&id| !self.is_folder(id)) {
                    self.requests.push_back(BrowserRequest::EditMetadata(id));
                }
                return true;
            }
            Action::OpenScraper if pressed => {
                self.requests.push_back(BrowserRequest::OpenScraper);
                return true;
            }
            Action::Confirm if pressed && !self.cursor.is_empty() => {
                self.requests.push_back(BrowserRequest::PlaySound(Sound::Select));
                self.stamp_selection();
                self.enter();
                return true;
            }
            Action::Cancel if pressed && self.back_depth() > 0 => {
                self.back();
                self.requests.push_back(BrowserRequest::PlaySound(Sound::Back));
                return true;
            }
            Action::Right if pressed && self.systems.len() > 1 => {
                self.select_system(1);
                return true;
            }
            Action::Left if pressed && self.systems.len() > 1 => {
                self.select_system(-1);
                return true;
            }
            Action::NextSort if pressed => {
                self.change_sort(SortDirection::Next);
                return true;
            }
            Action::PrevSort if pressed => {
                self.change_sort(SortDirection::Previous);
                return true;
            }
            Action::Menu if pressed => {
                self.requests.push_back(BrowserRequest::OpenMenu);
                return true;
            }
            Action::FastSelect if pressed => {
                let letter = self
                    .selected()
                    .and_then(|id| self.tree().map(|tree| tree.name(id)))
                    .and_then(|name| name.chars().next());
                let request = BrowserRequest::OpenFastSelect(letter);
                self.requests.push_back(request);
                return true;
            }
            _ => {}
        }

        // The pane is hidden while scrolling and rebuilt once every
        // directional key is released
        if let Some(key) = action.nav_key() {
            if pressed {
                self.held.insert(key);
            } else {
                self.held.remove(key);
            }
            if self.is_detailed() {
                if pressed {
                    self.detail.hide();
                } else if self.held.is_empty() {
                    self.refresh_detail();
                }
                return true;
            }
            if !pressed {
                self.refresh_detail();
            }
            return true;
        }

        false
    }

    fn on_selection_moved(&mut self) {
        self.stamp_selection();
        self.requests.push_back(BrowserRequest::PlaySound(Sound::Scroll));
        if !self.is_detailed() {
            self.refresh_detail();
        }
    }

    /// Open the selected folder or launch the selected game
    ///
    /// Entering a folder pushes the current one on the back stack and
    /// restores the folder's most recently selected entry.
    ///
    /// # Example
    ///
    /// ```
    /// use romshelf::core::browser::BrowserController;
    /// use romshelf::core::geometry::Vec2;
    /// use romshelf::core::library::{GameMetadata, LibraryTree, SystemConfig, SystemData};
    /// use romshelf::core::settings::Settings;
    /// use romshelf::core::texture::{FileSystemSource, GpuTextureId, TextureBackend, TextureCache};
    /// # use std::{cell::RefCell, rc::Rc};
    /// # struct NoGpu;
    /// # impl TextureBackend for NoGpu {
    /// #     fn upload(&mut self, _: u32, _: u32, _: &[u8]) -> Option<GpuTextureId> { None }
    /// #     fn release(&mut self, _: GpuTextureId) {}
    /// #     fn bind(&mut self, _: GpuTextureId) {}
    /// # }
    /// # let cache = TextureCache::new(Rc::new(RefCell::new(NoGpu)), Rc::new(FileSystemSource));
    ///
    /// let mut tree = LibraryTree::new("snes", "/roms/snes");
    /// let rpg = tree.add_folder(tree.root(), "rpg", "/roms/snes/rpg")?;
    /// tree.add_game(rpg, "ff", "/roms/snes/rpg/ff.sfc", GameMetadata::default())?;
    /// let system = SystemData::from_tree(SystemConfig::default(), tree);
    ///
    /// let mut browser =
    ///     BrowserController::new(vec![system], Settings::in_memory(), None, cache, Vec2::new(640.0, 480.0));
    /// browser.enter();
    /// assert_eq!(browser.back_depth(), 1);
    /// assert!(browser.back());
    /// assert!(!browser.back());
    /// # Ok::<(), romshelf::core::error::LibraryError>(())
    /// ```
    pub fn enter(&mut self) {
        let Some(selected) = self.selected() else {
            return;
        };
        if !self.is_folder(selected) {
            self.launch();
            return;
        }

        if let Some(session) = self.session.as_mut() {
            session.back_stack.push(session.folder);
            session.folder = selected;
        }
        self.update_list();
        self.refresh_detail();
    }

    /// Return to the previous folder
    ///
    /// # Returns
    ///
    /// `false` when the back stack is empty; nothing changes in that case.
    pub fn back(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let Some(folder) = session.back_stack.pop() else {
            return false;
        };
        session.folder = folder;
        self.update_list();
        self.refresh_detail();
        true
    }

    /// Switch `delta` systems forward (negative: backward)
    ///
    /// Does nothing unless more than one system exists. Starts a slide in the
    /// direction of `delta`, and stamps the new system so it is restored on
    /// the next start.
    ///
    /// # Arguments
    ///
    /// * `delta` - Systems to move; the index wraps at both ends
    pub fn select_system(&mut self, delta: i32) {
        if self.systems.is_empty() {
            log::error!("No systems found");
            return;
        }
        if self.systems.len() < 2 {
            return;
        }
        let current = self.session.as_ref().map(|s| s.system).unwrap_or(0) as i64;
        self.set_system(current + i64::from(delta));
        self.slide.start(delta);

        if let Some((system, _)) = self.current_mut() {
            let root = system.root();
            system.tree_mut().mark_selected(root, Utc::now());
            self.selection_dirty = true;
        }
    }

    /// Cycle the sort order, re-sort the current folder and persist the index
    ///
    /// # Arguments
    ///
    /// * `direction` - [`SortDirection::Next`] or [`SortDirection::Previous`];
    ///   both wrap around the eight sort states
    pub fn change_sort(&mut self, direction: SortDirection) {
        if self.session.is_none() {
            log::error!("No systems found");
            return;
        }
        let index = match direction {
            SortDirection::Next => next_sort_index(self.sort_index),
            SortDirection::Previous => previous_sort_index(self.sort_index),
        };
        self.set_sort_index(index);
    }

    /// Apply `SORT_STATES[index]` (out-of-range indices become 0)
    pub fn set_sort_index(&mut self, index: usize) {
        let index = normalize_sort_index(index);
        if index != self.sort_index {
            self.sort_index = index;
            if let Some((system, folder)) = self.current_mut() {
                if let Err(e) = system.tree_mut().sort_folder(folder, index) {
                    log::error!("Failed to sort folder: {}", e);
                }
            }
            log::info!("Sort order is {}", SORT_STATES[index].label);
            self.update_list();
            self.refresh_detail();
        }
        self.settings.set_sort_index(index);
    }

    /// Start launching the selected game
    ///
    /// Folders are ignored. Locks input until the effect is back to idle.
    /// The effect lasts `max(select sound length, 800)` ms; the game itself
    /// is started by [`tick`](Self::tick) once the zoom completes.
    pub fn launch(&mut self) {
        let Some(selected) = self.selected() else {
            return;
        };
        if self.is_folder(selected) || self.is_locked() {
            return;
        }

        self.cursor.stop_scrolling();
        let duration = launch_duration(self.theme.settings.select_sound_length_ms);
        if self.effect.start(duration) {
            self.launching = Some(selected);
            log::debug!("Launch effect started ({} ms)", duration);
        }
    }

    /// Jump to the first entry whose name starts with `letter`
    ///
    /// Returns whether a matching entry was found.
    pub fn fast_select(&mut self, letter: char) -> bool {
        let Some(tree) = self.tree() else {
            return false;
        };
        let Some(folder) = self.folder() else {
            return false;
        };
        let wanted = letter.to_lowercase().collect::<String>();
        let found = tree.children(folder).iter().position(|&id| {
            tree.name(id)
                .chars()
                .next()
                .is_some_and(|c| c.to_lowercase().collect::<String>() == wanted)
        });

        match found {
            Some(index) => {
                self.cursor.stop_scrolling();
                self.cursor.select(index);
                self.stamp_selection();
                self.refresh_detail();
                true
            }
            None => false,
        }
    }

    /// Replace a game's metadata in the current system
    ///
    /// The sidecar is rewritten and the listing refreshed.
    pub fn update_metadata(&mut self, id: NodeId, metadata: GameMetadata) -> Result<(), LibraryError> {
        let Some((system, _)) = self.current_mut() else {
            return Err(LibraryError::UnknownNode(id));
        };
        let tree = system.tree_mut();
        if !tree.contains(id) {
            return Err(LibraryError::UnknownNode(id));
        }
        let name = metadata.name.clone();
        let meta = tree.game_mut(id).ok_or(LibraryError::NotAGame(id))?;
        *meta = metadata;
        if let Some(name) = name {
            tree.rename(id, &name);
        }
        if let Some(parent) = tree.node(id).and_then(|node| node.parent) {
            tree.invalidate_order(parent);
        }
        save_gamelist(system);
        self.selection_dirty = false;

        self.update_detailed();
        self.update_list();
        self.refresh_detail();
        Ok(())
    }

    /// Remove a game from the current system
    ///
    /// Returns the game's file path; deleting the file is up to the caller.
    pub fn remove_game(&mut self, id: NodeId) -> Result<PathBuf, LibraryError> {
        let Some((system, _)) = self.current_mut() else {
            return Err(LibraryError::UnknownNode(id));
        };
        let tree = system.tree_mut();
        let node = tree.node(id).ok_or(LibraryError::UnknownNode(id))?;
        if node.is_folder() {
            return Err(LibraryError::NotAGame(id));
        }
        let path = node.path.clone();
        tree.remove(id)?;
        save_gamelist(system);
        self.selection_dirty = false;
        log::info!("Removed game {}", path.display());

        self.update_detailed();
        self.update_list();
        self.refresh_detail();
        Ok(path)
    }

    /// Remove a game from the current system and delete its file
    ///
    /// # Returns
    ///
    /// - `Ok(path)` of the deleted file
    /// - `Err(BrowserError::Library)` if `id` is not a game of this system
    /// - `Err(BrowserError::Io)` if the file could not be deleted; the game
    ///   is already gone from the listing and the sidecar at that point
    pub fn delete_game(&mut self, id: NodeId) -> crate::core::error::Result<PathBuf> {
        let path = self.remove_game(id)?;
        std::fs::remove_file(&path)?;
        log::info!("Deleted {}", path.display());
        Ok(path)
    }

    /// Advance time by `delta_ms`
    ///
    /// Runs list auto-repeat, the detail stack scroll, the system slide and
    /// the launch effect. When the launch animation ends the game is started
    /// through `launcher`; this call blocks until it returns.
    pub fn tick(&mut self, delta_ms: u32, launcher: &mut dyn GameLauncher) {
        if !self.is_locked() && self.cursor.update(delta_ms) {
            self.on_selection_moved();
        }
        self.slide.update(delta_ms);
        self.detail.update(delta_ms);

        let screen_center = self.screen * 0.5;
        let target = self.detail.focus_point(self.screen);
        match self.effect.update(delta_ms, screen_center, target) {
            EffectEvent::LaunchDue => {
                self.run_launch(launcher);
                self.effect.finish_launch();
            }
            EffectEvent::Finished => {
                self.launching = None;
                log::debug!("Launch effect finished");
            }
            EffectEvent::None => {}
        }
    }

    /// Start the game, then record stats and import screenshots
    fn run_launch(&mut self, launcher: &mut dyn GameLauncher) {
        let Some(id) = self.launching else {
            return;
        };
        let Some((system, _)) = self.current_mut() else {
            return;
        };
        let Some(game) = system.tree().node(id).cloned() else {
            log::warn!("Launched game no longer exists");
            return;
        };

        let since = SystemTime::now();
        log::info!("Launching '{}'", game.name);
        if let Err(e) = launcher.launch(system.config(), &game) {
            log::error!("Failed to launch '{}': {}", game.name, e);
            self.refresh_detail();
            return;
        }

        let screenshots = import_fresh_screenshots(system.config(), &game.base_name(), since);
        let tree = system.tree_mut();
        if let Some(meta) = tree.game_mut(id) {
            meta.record_play(Utc::now());
            meta.images
                .extend(screenshots.iter().map(|path| path.to_string_lossy().into_owned()));
        }
        if let Some(parent) = game.parent {
            tree.invalidate_order(parent);
        }
        save_gamelist(system);
        self.selection_dirty = false;

        self.update_detailed();
        self.refresh_detail();
    }

    /// Update the screen size used for layout
    pub fn set_screen_size(&mut self, screen: Vec2) {
        if self.screen != screen {
            self.screen = screen;
            self.refresh_detail();
        }
    }

    /// Take all pending requests
    pub fn drain_requests(&mut self) -> Vec<BrowserRequest> {
        self.requests.drain(..).collect()
    }

    #[inline(always)]
    pub fn is_locked(&self) -> bool {
        self.effect.is_locked()
    }

    /// Whether the detailed layout is active for the current system
    #[inline(always)]
    pub fn is_detailed(&self) -> bool {
        self.detailed
    }

    fn is_folder(&self, id: NodeId) -> bool {
        self.tree().is_some_and(|tree| tree.is_folder(id))
    }

    #[inline(always)]
    pub fn systems(&self) -> &[SystemData] {
        &self.systems
    }

    pub fn system_index(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.system)
    }

    pub fn current_system(&self) -> Option<&SystemData> {
        self.system_index().map(|index| &self.systems[index])
    }

    /// Tree of the current system
    pub fn tree(&self) -> Option<&LibraryTree> {
        self.current_system().map(SystemData::tree)
    }

    /// Folder being listed
    pub fn folder(&self) -> Option<NodeId> {
        self.session.as_ref().map(|s| s.folder)
    }

    /// Entries of the current folder in display order
    pub fn entries(&self) -> &[NodeId] {
        match (self.tree(), self.folder()) {
            (Some(tree), Some(folder)) => tree.children(folder),
            _ => &[],
        }
    }

    /// Selected entry of the current folder
    pub fn selected(&self) -> Option<NodeId> {
        self.entries().get(self.cursor.selected()).copied()
    }

    /// Number of folders on the back stack
    pub fn back_depth(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.back_stack.len())
    }

    #[inline(always)]
    pub fn cursor(&self) -> &ListCursor {
        &self.cursor
    }

    #[inline(always)]
    pub fn sort_index(&self) -> usize {
        self.sort_index
    }

    pub fn sort_state(&self) -> SortState {
        SORT_STATES[self.sort_index]
    }

    #[inline(always)]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[inline(always)]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Header text, `None` when the theme hides it
    pub fn header(&self) -> Option<&str> {
        if self.theme.settings.hide_header {
            return None;
        }
        self.current_system().map(|system| system.config().display_name())
    }

    #[inline(always)]
    pub fn detail(&self) -> &DetailPresenter {
        &self.detail
    }

    #[inline(always)]
    pub fn effect(&self) -> &LaunchEffectSequencer {
        &self.effect
    }

    /// Camera parameters for this frame
    pub fn effect_frame(&self) -> EffectFrame {
        self.effect
            .frame()
            .unwrap_or_else(|| EffectFrame::identity(self.screen * 0.5))
    }

    #[inline(always)]
    pub fn slide(&self) -> &SlideTransition {
        &self.slide
    }

    #[inline(always)]
    pub fn screen(&self) -> Vec2 {
        self.screen
    }

    #[inline(always)]
    pub fn config_dir(&self) -> Option<&Path> {
        self.config_dir.as_deref()
    }

    /// Texture cache, e.g. for reloading after GPU context loss
    #[inline(always)]
    pub fn texture_cache_mut(&mut self) -> &mut TextureCache {
        &mut self.cache
    }
}

/// Index of the system whose root was selected most recently
///
/// Ties go to the lowest index; without any stamp the first system wins.
pub fn most_recent_system(systems: &[SystemData]) -> i64 {
    let mut best: Option<(usize, chrono::DateTime<Utc>)> = None;
    for (index, system) in systems.iter().enumerate() {
        let stamp = system
            .tree()
            .node(system.root())
            .and_then(|root| root.last_selected);
        if let Some(at) = stamp {
            if best.is_none_or(|(_, best_at)| at > best_at) {
                best = Some((index, at));
            }
        }
    }
    best.map_or(0, |(index, _)| index as i64)
}

fn save_gamelist(system: &SystemData) {
    if let Err(e) = system.save_gamelist() {
        log::error!("Failed to save game list for '{}': {}", system.name(), e);
    }
}
