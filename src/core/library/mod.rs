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

//! Game library model
//!
//! A system's games form a tree of folders and games. Nodes are stored in an
//! arena ([`LibraryTree`]) and addressed by [`NodeId`], which stays valid
//! across sorting and across removal of unrelated nodes.
//!
//! # Example
//!
//! ```
//! use romshelf::core::library::{GameMetadata, LibraryTree, SORT_STATES};
//!
//! let mut tree = LibraryTree::new("snes", "/roms/snes");
//! let root = tree.root();
//! tree.add_game(root, "Zelda", "/roms/snes/zelda.sfc", GameMetadata::default()).unwrap();
//! tree.add_game(root, "Contra", "/roms/snes/contra.sfc", GameMetadata::default()).unwrap();
//!
//! tree.sort_folder(root, 0).unwrap();
//! let names: Vec<_> = tree.children(root).iter().map(|&id| tree.name(id)).collect();
//! assert_eq!(names, ["Contra", "Zelda"]);
//! # assert_eq!(SORT_STATES[0].label, "file name, ascending");
//! ```

mod metadata;
mod sort;
mod system;
#[cfg(test)]
mod tests;

pub use metadata::GameMetadata;
pub use sort::{
    next_sort_index, normalize_sort_index, previous_sort_index, SortKind, SortState, SORT_STATES,
};
pub use system::{
    load_systems, FolderListEntry, GameList, GameListEntry, SystemConfig, SystemData,
    SystemsConfig,
};

use crate::core::error::LibraryError;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Stable handle to a node in a [`LibraryTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// Folder payload
#[derive(Debug, Clone, Default)]
pub struct FolderData {
    /// Children in display order
    pub children: Vec<NodeId>,
    /// Index into [`SORT_STATES`] the children were last sorted with
    sorted_with: Option<usize>,
}

/// What a node is
#[derive(Debug, Clone)]
pub enum NodeKind {
    Folder(FolderData),
    Game(GameMetadata),
}

/// A folder or game
#[derive(Debug, Clone)]
pub struct LibraryNode {
    /// Display name
    pub name: String,
    /// Filesystem path
    pub path: PathBuf,
    /// Containing folder (`None` for the root)
    pub parent: Option<NodeId>,
    /// When the node was last selected (`None` if never)
    pub last_selected: Option<DateTime<Utc>>,
    pub kind: NodeKind,
}

impl LibraryNode {
    #[inline(always)]
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder(_))
    }

    /// Game metadata, `None` for folders
    #[inline(always)]
    pub fn metadata(&self) -> Option<&GameMetadata> {
        match &self.kind {
            NodeKind::Game(meta) => Some(meta),
            NodeKind::Folder(_) => None,
        }
    }

    /// File stem of the path (name used for screenshot files)
    pub fn base_name(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.name.clone())
    }
}

/// Arena-backed folder/game tree of one system
#[derive(Debug, Clone)]
pub struct LibraryTree {
    nodes: Vec<Option<LibraryNode>>,
    root: NodeId,
}

impl LibraryTree {
    /// Create a tree holding only an empty root folder
    pub fn new(root_name: &str, root_path: impl Into<PathBuf>) -> Self {
        let root = LibraryNode {
            name: root_name.to_string(),
            path: root_path.into(),
            parent: None,
            last_selected: None,
            kind: NodeKind::Folder(FolderData::default()),
        };
        Self {
            nodes: vec![Some(root)],
            root: NodeId(0),
        }
    }

    /// Root folder id
    #[inline(always)]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a live node
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&LibraryNode> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> Option<&mut LibraryNode> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Check whether `id` refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Display name, empty for unknown ids
    pub fn name(&self, id: NodeId) -> &str {
        self.node(id).map(|node| node.name.as_str()).unwrap_or("")
    }

    /// Change the display name of a node
    pub fn rename(&mut self, id: NodeId, name: &str) {
        if let Some(node) = self.node_mut(id) {
            node.name = name.to_string();
        }
        if let Some(parent) = self.node(id).and_then(|node| node.parent) {
            self.invalidate_order(parent);
        }
    }

    /// Check whether `id` is a live folder
    pub fn is_folder(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(LibraryNode::is_folder)
    }

    /// Children of a folder, empty for games and unknown ids
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.node(id).map(|node| &node.kind) {
            Some(NodeKind::Folder(folder)) => &folder.children,
            _ => &[],
        }
    }

    /// Metadata of a game
    pub fn game(&self, id: NodeId) -> Option<&GameMetadata> {
        self.node(id).and_then(LibraryNode::metadata)
    }

    /// Mutable metadata of a game
    pub fn game_mut(&mut self, id: NodeId) -> Option<&mut GameMetadata> {
        match self.node_mut(id).map(|node| &mut node.kind) {
            Some(NodeKind::Game(meta)) => Some(meta),
            _ => None,
        }
    }

    /// Add a subfolder to `parent`
    pub fn add_folder(
        &mut self,
        parent: NodeId,
        name: &str,
        path: impl Into<PathBuf>,
    ) -> Result<NodeId, LibraryError> {
        self.insert(parent, name, path.into(), NodeKind::Folder(FolderData::default()))
    }

    /// Add a game to `parent`
    pub fn add_game(
        &mut self,
        parent: NodeId,
        name: &str,
        path: impl Into<PathBuf>,
        metadata: GameMetadata,
    ) -> Result<NodeId, LibraryError> {
        self.insert(parent, name, path.into(), NodeKind::Game(metadata))
    }

    fn insert(
        &mut self,
        parent: NodeId,
        name: &str,
        path: PathBuf,
        kind: NodeKind,
    ) -> Result<NodeId, LibraryError> {
        if !self.contains(parent) {
            return Err(LibraryError::UnknownNode(parent));
        }
        if !self.is_folder(parent) {
            return Err(LibraryError::NotAFolder(parent));
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(LibraryNode {
            name: name.to_string(),
            path,
            parent: Some(parent),
            last_selected: None,
            kind,
        }));

        if let Some(NodeKind::Folder(folder)) = self.node_mut(parent).map(|node| &mut node.kind) {
            folder.children.push(id);
            folder.sorted_with = None;
        }
        Ok(id)
    }

    /// Reorder a folder's direct children by `SORT_STATES[sort_index]`
    ///
    /// Only this folder is touched; subfolders keep their own order.
    pub fn sort_folder(&mut self, folder: NodeId, sort_index: usize) -> Result<(), LibraryError> {
        let sort_index = normalize_sort_index(sort_index);
        let state = SORT_STATES[sort_index];

        let mut children = match self.node_mut(folder).map(|node| &mut node.kind) {
            Some(NodeKind::Folder(data)) => std::mem::take(&mut data.children),
            Some(NodeKind::Game(_)) => return Err(LibraryError::NotAFolder(folder)),
            None => return Err(LibraryError::UnknownNode(folder)),
        };

        children.sort_by(|&a, &b| match (self.node(a), self.node(b)) {
            (Some(node_a), Some(node_b)) => state.compare((a, node_a), (b, node_b)),
            _ => a.cmp(&b),
        });

        if let Some(NodeKind::Folder(data)) = self.node_mut(folder).map(|node| &mut node.kind) {
            data.children = children;
            data.sorted_with = Some(sort_index);
        }
        Ok(())
    }

    /// Sort a folder unless it is already in `sort_index` order
    pub fn ensure_sorted(&mut self, folder: NodeId, sort_index: usize) -> Result<(), LibraryError> {
        let sort_index = normalize_sort_index(sort_index);
        match self.node(folder).map(|node| &node.kind) {
            Some(NodeKind::Folder(data)) if data.sorted_with == Some(sort_index) => Ok(()),
            _ => self.sort_folder(folder, sort_index),
        }
    }

    /// Forget the cached order of a folder (its children's keys changed)
    pub fn invalidate_order(&mut self, folder: NodeId) {
        if let Some(NodeKind::Folder(data)) = self.node_mut(folder).map(|node| &mut node.kind) {
            data.sorted_with = None;
        }
    }

    /// Stamp `id` and all its ancestors as selected at `at`
    pub fn mark_selected(&mut self, id: NodeId, at: DateTime<Utc>) {
        let mut current = Some(id);
        while let Some(node) = current.and_then(|id| self.node_mut(id)) {
            node.last_selected = Some(at);
            current = node.parent;
        }
    }

    /// Child of `folder` with the most recent selection stamp
    ///
    /// Returns the position within the listing; `0` when nothing was ever
    /// selected. Ties keep the earlier position.
    pub fn most_recently_selected(&self, folder: NodeId) -> usize {
        let mut best: Option<(usize, DateTime<Utc>)> = None;
        for (index, &child) in self.children(folder).iter().enumerate() {
            if let Some(at) = self.node(child).and_then(|node| node.last_selected) {
                if best.is_none_or(|(_, best_at)| at > best_at) {
                    best = Some((index, at));
                }
            }
        }
        best.map(|(index, _)| index).unwrap_or(0)
    }

    /// Remove a node and its whole subtree
    ///
    /// The root cannot be removed.
    pub fn remove(&mut self, id: NodeId) -> Result<(), LibraryError> {
        let parent = self
            .node(id)
            .ok_or(LibraryError::UnknownNode(id))?
            .parent
            .ok_or(LibraryError::RootRemoval)?;

        if let Some(NodeKind::Folder(folder)) = self.node_mut(parent).map(|node| &mut node.kind) {
            folder.children.retain(|&child| child != id);
        }

        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.get_mut(next.0).and_then(Option::take) {
                if let NodeKind::Folder(folder) = node.kind {
                    pending.extend(folder.children);
                }
            }
        }
        Ok(())
    }

    /// Recursively remove folders that contain no games
    pub fn prune_empty_folders(&mut self) {
        let mut empty = Vec::new();
        self.collect_empty(self.root, &mut empty);
        for id in empty {
            // Nested empties may already be gone with their parent
            if self.contains(id) {
                let _ = self.remove(id);
            }
        }
    }

    fn collect_empty(&self, folder: NodeId, out: &mut Vec<NodeId>) -> bool {
        let mut has_game = false;
        for &child in self.children(folder) {
            if self.is_folder(child) {
                if self.collect_empty(child, out) {
                    has_game = true;
                }
            } else {
                has_game = true;
            }
        }
        if !has_game && folder != self.root {
            out.push(folder);
        }
        has_game
    }

    /// Depth-first ids of every game under `folder`
    pub fn games_under(&self, folder: NodeId) -> Vec<NodeId> {
        let mut games = Vec::new();
        let mut pending = vec![folder];
        while let Some(next) = pending.pop() {
            for &child in self.children(next) {
                if self.is_folder(child) {
                    pending.push(child);
                } else {
                    games.push(child);
                }
            }
        }
        games
    }

    /// Number of games in the whole tree
    pub fn game_count(&self) -> usize {
        self.games_under(self.root).len()
    }

    /// Check whether any game in the tree has an image attached
    pub fn has_any_image(&self) -> bool {
        self.games_under(self.root)
            .into_iter()
            .any(|id| self.game(id).is_some_and(GameMetadata::has_image))
    }

    /// Ids of every live node, root first
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_some())
            .map(|(index, _)| NodeId(index))
    }

    /// Map from filesystem path to node, built in one pass
    pub fn path_index(&self) -> HashMap<PathBuf, NodeId> {
        self.node_ids()
            .filter_map(|id| self.node(id).map(|node| (node.path.clone(), id)))
            .collect()
    }

    /// Find a game by its filesystem path
    pub fn find_by_path(&self, path: &Path) -> Option<NodeId> {
        self.games_under(self.root)
            .into_iter()
            .find(|&id| self.node(id).is_some_and(|node| node.path == path))
    }
}
