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

//! Per-game metadata record

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Metadata attached to every game
///
/// Stored in the per-system `gamelist.toml` sidecar. Every field is optional
/// on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameMetadata {
    /// Display name override (falls back to the file stem)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Free-form description
    #[serde(skip_serializing_if = "String::is_empty")]
    pub desc: String,

    /// Release date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,

    /// Rating in `0.0..=1.0`
    pub rating: f32,

    /// When the game was last launched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_played: Option<DateTime<Utc>>,

    /// How often the game was launched
    pub times_played: u32,

    /// Image paths, cover art first, imported screenshots appended
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl GameMetadata {
    /// Check whether at least one image is attached
    #[inline(always)]
    pub fn has_image(&self) -> bool {
        !self.images.is_empty()
    }

    /// Record a launch at `now`
    pub fn record_play(&mut self, now: DateTime<Utc>) {
        self.times_played = self.times_played.saturating_add(1);
        self.last_played = Some(now);
    }

    /// Check whether every field is at its default
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
