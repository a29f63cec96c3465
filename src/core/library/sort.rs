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

//! Sort policies for folder listings
//!
//! A [`SortState`] pairs a comparator with a direction and a label. The
//! browser cycles through [`SORT_STATES`] by index; the index is what gets
//! persisted.
//!
//! # Tie breaking
//!
//! Every comparator falls back to the case-insensitive display name and then
//! to the node id, so the order is total. Descending reverses the whole key,
//! which makes a descending listing the exact mirror of the ascending one.

use super::{LibraryNode, NodeId, NodeKind};
use std::cmp::Ordering;

/// Comparator selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKind {
    /// Display name, case-insensitive
    FileName,
    /// Metadata rating
    Rating,
    /// Launch counter
    TimesPlayed,
    /// Last launch timestamp (never played sorts first)
    LastPlayed,
}

/// A named comparator and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub kind: SortKind,
    pub ascending: bool,
    pub label: &'static str,
}

impl SortState {
    pub const fn new(kind: SortKind, ascending: bool, label: &'static str) -> Self {
        Self {
            kind,
            ascending,
            label,
        }
    }

    /// Compare two nodes under this policy
    pub fn compare(&self, a: (NodeId, &LibraryNode), b: (NodeId, &LibraryNode)) -> Ordering {
        let ordering = compare_nodes(self.kind, a, b);
        if self.ascending {
            ordering
        } else {
            ordering.reverse()
        }
    }
}

/// All selectable sort states, in cycling order
pub const SORT_STATES: [SortState; 8] = [
    SortState::new(SortKind::FileName, true, "file name, ascending"),
    SortState::new(SortKind::FileName, false, "file name, descending"),
    SortState::new(SortKind::Rating, true, "rating, ascending"),
    SortState::new(SortKind::Rating, false, "rating, descending"),
    SortState::new(SortKind::TimesPlayed, true, "played least often"),
    SortState::new(SortKind::TimesPlayed, false, "played most often"),
    SortState::new(SortKind::LastPlayed, true, "played least recently"),
    SortState::new(SortKind::LastPlayed, false, "played most recently"),
];

/// Index of the sort state after `index`, wrapping to the first
#[inline]
pub fn next_sort_index(index: usize) -> usize {
    (normalize_sort_index(index) + 1) % SORT_STATES.len()
}

/// Index of the sort state before `index`, wrapping to the last
#[inline]
pub fn previous_sort_index(index: usize) -> usize {
    let index = normalize_sort_index(index);
    (index + SORT_STATES.len() - 1) % SORT_STATES.len()
}

/// Clamp a persisted index into range (out-of-range means the first state)
#[inline]
pub fn normalize_sort_index(index: usize) -> usize {
    if index < SORT_STATES.len() {
        index
    } else {
        0
    }
}

fn compare_nodes(kind: SortKind, (a_id, a): (NodeId, &LibraryNode), (b_id, b): (NodeId, &LibraryNode)) -> Ordering {
    let primary = match kind {
        SortKind::FileName => Ordering::Equal,
        SortKind::Rating => rating(a).total_cmp(&rating(b)),
        SortKind::TimesPlayed => times_played(a).cmp(&times_played(b)),
        SortKind::LastPlayed => last_played(a).cmp(&last_played(b)),
    };

    primary
        .then_with(|| compare_names(&a.name, &b.name))
        .then_with(|| a_id.cmp(&b_id))
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

// Folders carry no metadata and sort as unrated, never played.

fn rating(node: &LibraryNode) -> f32 {
    match &node.kind {
        NodeKind::Game(meta) => meta.rating,
        NodeKind::Folder(_) => 0.0,
    }
}

fn times_played(node: &LibraryNode) -> u32 {
    match &node.kind {
        NodeKind::Game(meta) => meta.times_played,
        NodeKind::Folder(_) => 0,
    }
}

fn last_played(node: &LibraryNode) -> Option<chrono::DateTime<chrono::Utc>> {
    match &node.kind {
        NodeKind::Game(meta) => meta.last_played,
        NodeKind::Folder(_) => None,
    }
}
