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

//! In-memory texture backend and resource source for tests

use super::{GpuTextureId, ResourceSource, SharedBackend, TextureBackend, TextureCache};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::io::Cursor;
use std::rc::Rc;

/// Backend that records every call instead of touching a GPU
#[derive(Default)]
pub(crate) struct RecordingBackend {
    next_id: u64,
    pub uploads: usize,
    pub releases: Vec<GpuTextureId>,
    pub binds: usize,
    live: HashSet<GpuTextureId>,
}

impl RecordingBackend {
    /// Textures uploaded and not yet released
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl TextureBackend for RecordingBackend {
    fn upload(&mut self, width: u32, height: u32, rgba: &[u8]) -> Option<GpuTextureId> {
        assert_eq!(rgba.len(), (width * height * 4) as usize);
        self.next_id += 1;
        self.uploads += 1;
        let id = GpuTextureId(self.next_id);
        self.live.insert(id);
        Some(id)
    }

    fn release(&mut self, id: GpuTextureId) {
        assert!(self.live.remove(&id), "double release of {:?}", id);
        self.releases.push(id);
    }

    fn bind(&mut self, id: GpuTextureId) {
        assert!(self.live.contains(&id));
        self.binds += 1;
    }
}

#[derive(Default)]
pub(crate) struct MemorySource {
    pub files: HashMap<String, Vec<u8>>,
}

impl ResourceSource for MemorySource {
    fn file_data(&self, path: &str) -> std::io::Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::NotFound))
    }
}

pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 0, 255]));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

impl MemorySource {
    /// Add a solid PNG of the given size under `path`
    pub fn with_png(mut self, path: &str, width: u32, height: u32) -> Self {
        self.files.insert(path.to_string(), png_bytes(width, height));
        self
    }
}

/// Cache over a recording backend and `source`
pub(crate) fn cache_with(source: MemorySource) -> (TextureCache, Rc<RefCell<RecordingBackend>>) {
    let backend = Rc::new(RefCell::new(RecordingBackend::default()));
    let shared: SharedBackend = backend.clone();
    (TextureCache::new(shared, Rc::new(source)), backend)
}
