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

//! Metadata editor window
//!
//! Edits the name, description, rating and release date of one game, or
//! deletes it after a second confirmation.

use crate::core::library::{GameMetadata, NodeId};
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// What the editor asks the application to do
#[derive(Debug, Clone, PartialEq)]
pub enum EditorOutcome {
    None,
    Save(NodeId, GameMetadata),
    Delete(NodeId),
    Close,
}

/// Editable copy of a game's metadata
#[derive(Debug, Clone)]
pub struct MetadataEditor {
    id: NodeId,
    original: GameMetadata,
    /// Name shown in the list when the editor opened
    node_name: String,
    name: String,
    desc: String,
    rating: f32,
    release_date: String,
    error: Option<String>,
    confirm_delete: bool,
}

impl MetadataEditor {
    pub fn new(id: NodeId, name: &str, metadata: &GameMetadata) -> Self {
        Self {
            id,
            original: metadata.clone(),
            node_name: name.to_string(),
            name: name.to_string(),
            desc: metadata.desc.clone(),
            rating: metadata.rating,
            release_date: metadata
                .release_date
                .map(|date| date.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            error: None,
            confirm_delete: false,
        }
    }

    #[inline(always)]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Build the metadata to store
    ///
    /// Fields the editor does not show (play stats, images) are kept, and so
    /// is the name override unless the name was changed. An empty date
    /// clears it; anything else must be `YYYY-MM-DD`.
    pub fn build(&self) -> Result<GameMetadata, String> {
        let release_date = match self.release_date.trim() {
            "" => None,
            text => Some(
                NaiveDate::parse_from_str(text, DATE_FORMAT)
                    .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", text))?,
            ),
        };
        let name = self.name.trim();

        Ok(GameMetadata {
            name: if name.is_empty() || name == self.node_name {
                self.original.name.clone()
            } else {
                Some(name.to_string())
            },
            desc: self.desc.clone(),
            rating: self.rating.clamp(0.0, 1.0),
            release_date,
            ..self.original.clone()
        })
    }

    pub fn render(&mut self, ctx: &egui::Context) -> EditorOutcome {
        let mut outcome = EditorOutcome::None;

        egui::Window::new("Edit Game")
            .collapsible(false)
            .default_width(420.0)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                egui::Grid::new("metadata_fields")
                    .num_columns(2)
                    .show(ui, |ui| {
                        ui.label("Name");
                        ui.text_edit_singleline(&mut self.name);
                        ui.end_row();

                        ui.label("Rating");
                        ui.add(egui::Slider::new(&mut self.rating, 0.0..=1.0));
                        ui.end_row();

                        ui.label("Release date");
                        ui.text_edit_singleline(&mut self.release_date);
                        ui.end_row();
                    });

                ui.label("Description");
                ui.text_edit_multiline(&mut self.desc);

                if let Some(error) = &self.error {
                    ui.colored_label(egui::Color32::RED, error);
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        match self.build() {
                            Ok(metadata) => outcome = EditorOutcome::Save(self.id, metadata),
                            Err(e) => self.error = Some(e),
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        outcome = EditorOutcome::Close;
                    }

                    let delete_label = if self.confirm_delete {
                        "Really delete?"
                    } else {
                        "Delete game"
                    };
                    let delete = egui::Button::new(
                        egui::RichText::new(delete_label).color(egui::Color32::LIGHT_RED),
                    );
                    if ui.add(delete).clicked() {
                        if self.confirm_delete {
                            outcome = EditorOutcome::Delete(self.id);
                        } else {
                            self.confirm_delete = true;
                        }
                    }
                });
            });

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::library::LibraryTree;

    fn editor(metadata: GameMetadata) -> MetadataEditor {
        let mut tree = LibraryTree::new("snes", "/roms/snes");
        let root = tree.root();
        let id = tree
            .add_game(root, "Zelda", "/roms/snes/zelda.sfc", metadata.clone())
            .unwrap();
        MetadataEditor::new(id, "Zelda", &metadata)
    }

    #[test]
    fn test_keeps_hidden_fields() {
        let metadata = GameMetadata {
            desc: "old".to_string(),
            times_played: 7,
            images: vec!["cover.png".to_string()],
            ..GameMetadata::default()
        };
        let built = editor(metadata.clone()).build().unwrap();
        assert_eq!(built.times_played, 7);
        assert_eq!(built.images, metadata.images);
        assert_eq!(built.desc, "old");
        assert_eq!(built.name, None);
    }

    #[test]
    fn test_name_override() {
        let mut e = editor(GameMetadata::default());
        e.name = "  ".to_string();
        assert_eq!(e.build().unwrap().name, None);

        e.name = "Zelda III".to_string();
        assert_eq!(e.build().unwrap().name.as_deref(), Some("Zelda III"));
    }

    #[test]
    fn test_release_date() {
        let mut e = editor(GameMetadata {
            release_date: NaiveDate::from_ymd_opt(1991, 11, 21),
            ..GameMetadata::default()
        });
        assert_eq!(e.release_date, "1991-11-21");

        e.release_date = "1992-08-13".to_string();
        assert_eq!(
            e.build().unwrap().release_date,
            NaiveDate::from_ymd_opt(1992, 8, 13)
        );

        e.release_date = String::new();
        assert_eq!(e.build().unwrap().release_date, None);

        e.release_date = "13/08/1992".to_string();
        assert!(e.build().is_err());
    }

    #[test]
    fn test_rating_clamped() {
        let mut e = editor(GameMetadata::default());
        e.rating = 1.5;
        assert_eq!(e.build().unwrap().rating, 1.0);
    }
}
