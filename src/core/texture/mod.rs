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

//! Texture cache
//!
//! Maps image paths to lazily uploaded, reference-counted GPU textures.
//!
//! # Ownership
//!
//! Callers hold strong [`TextureHandle`]s. The cache only keeps [`Weak`]
//! observers, so an entry is destroyed (and its GPU texture released) as soon
//! as the last caller drops its handle. Requesting the same path again while a
//! handle is alive returns the same resource without a second upload.
//!
//! The GPU itself sits behind the [`TextureBackend`] trait and file access
//! behind [`ResourceSource`], so the cache can run headless in tests.
//!
//! # Example
//!
//! ```no_run
//! use romshelf::core::texture::{FileSystemSource, TextureBackend, TextureCache};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! fn show(backend: Rc<RefCell<dyn TextureBackend>>) {
//!     let mut cache = TextureCache::new(backend, Rc::new(FileSystemSource));
//!     let cover = cache.get("/roms/snes/images/zelda.png");
//!     if cover.is_loaded() {
//!         cover.bind();
//!     }
//! }
//! ```

mod resource;
#[cfg(test)]
pub(crate) mod testing;

pub use resource::{decode_rgba8, TextureResource};

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Strong reference to a cached texture
pub type TextureHandle = Rc<TextureResource>;

/// Backend shared between the cache and every resource it creates
pub type SharedBackend = Rc<RefCell<dyn TextureBackend>>;

/// Opaque identifier of a texture living on the GPU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GpuTextureId(pub u64);

/// GPU side of the texture cache
///
/// Implemented by the wgpu renderer in the frontend and by in-memory fakes in
/// tests. All calls happen on the UI thread.
pub trait TextureBackend {
    /// Upload a tightly packed RGBA8 image, returning its id
    ///
    /// Returns `None` if the GPU refused the upload.
    fn upload(&mut self, width: u32, height: u32, rgba: &[u8]) -> Option<GpuTextureId>;

    /// Release a previously uploaded texture
    fn release(&mut self, id: GpuTextureId);

    /// Make the texture current for the next draw
    fn bind(&mut self, id: GpuTextureId);
}

/// Source of raw resource bytes
pub trait ResourceSource {
    /// Read the complete contents of `path`
    fn file_data(&self, path: &str) -> std::io::Result<Vec<u8>>;
}

/// [`ResourceSource`] reading straight from the filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSystemSource;

impl ResourceSource for FileSystemSource {
    fn file_data(&self, path: &str) -> std::io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// Path-keyed registry of live textures
pub struct TextureCache {
    backend: SharedBackend,
    source: Rc<dyn ResourceSource>,
    /// Non-owning observers keyed by path
    entries: HashMap<String, Weak<TextureResource>>,
    /// Every resource handed out, including uncached placeholders
    reloadables: Vec<Weak<TextureResource>>,
}

impl TextureCache {
    /// Create an empty cache
    pub fn new(backend: SharedBackend, source: Rc<dyn ResourceSource>) -> Self {
        Self {
            backend,
            source,
            entries: HashMap::new(),
            reloadables: Vec::new(),
        }
    }

    /// Get the texture for `path`
    ///
    /// An empty path yields a fresh placeholder that is never cached; its load
    /// is a no-op but it still receives [`invalidate_all`](Self::invalidate_all)
    /// and [`reload_all`](Self::reload_all) notifications.
    ///
    /// For other paths a live entry is shared. Otherwise the image is decoded
    /// and uploaded now; a decode failure still returns a (zero-size) handle.
    ///
    /// # Arguments
    ///
    /// * `path` - Image path as known to the [`ResourceSource`]
    ///
    /// # Returns
    ///
    /// A strong handle. The GPU texture lives until the last handle for
    /// `path` is dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use romshelf::core::texture::{GpuTextureId, ResourceSource, TextureBackend, TextureCache};
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
    /// struct NoFiles;
    ///
    /// impl ResourceSource for NoFiles {
    ///     fn file_data(&self, _path: &str) -> std::io::Result<Vec<u8>> {
    ///         Err(std::io::ErrorKind::NotFound.into())
    ///     }
    /// }
    ///
    /// let mut cache = TextureCache::new(Rc::new(RefCell::new(NoGpu)), Rc::new(NoFiles));
    /// let missing = cache.get("cover.png");
    /// assert_eq!(missing.size(), (0, 0));
    /// assert!(Rc::ptr_eq(&missing, &cache.get("cover.png")));
    /// ```
    pub fn get(&mut self, path: &str) -> TextureHandle {
        self.purge_expired();

        if path.is_empty() {
            let texture = Rc::new(TextureResource::placeholder(
                self.backend.clone(),
                self.source.clone(),
            ));
            self.reloadables.push(Rc::downgrade(&texture));
            return texture;
        }

        if let Some(texture) = self.entries.get(path).and_then(Weak::upgrade) {
            return texture;
        }

        let backend = self.backend.clone();
        let source = self.source.clone();
        let texture = Rc::new(TextureResource::load(path, backend, source));
        let weak = Rc::downgrade(&texture);
        self.entries.insert(path.to_string(), weak.clone());
        self.reloadables.push(weak);
        texture
    }

    /// Check whether a live entry exists for `path`
    pub fn is_live(&self, path: &str) -> bool {
        self.entries
            .get(path)
            .is_some_and(|entry| entry.strong_count() > 0)
    }

    /// Number of live cached (non-placeholder) entries
    pub fn live_count(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.strong_count() > 0)
            .count()
    }

    /// Release the GPU side of every live texture
    ///
    /// Called when the GPU context is lost. Handles stay valid and report
    /// unloaded until [`reload_all`](Self::reload_all).
    pub fn invalidate_all(&mut self) {
        self.purge_expired();
        let mut count = 0;
        for texture in self.reloadables.iter().filter_map(Weak::upgrade) {
            texture.unload();
            count += 1;
        }
        log::info!("Invalidated {} textures", count);
    }

    /// Decode and upload every live texture again
    pub fn reload_all(&mut self) {
        self.purge_expired();
        let mut count = 0;
        for texture in self.reloadables.iter().filter_map(Weak::upgrade) {
            texture.reload();
            count += 1;
        }
        log::info!("Reloaded {} textures", count);
    }

    /// Drop observers whose resource is gone
    fn purge_expired(&mut self) {
        self.entries.retain(|_, entry| entry.strong_count() > 0);
        self.reloadables.retain(|entry| entry.strong_count() > 0);
    }
}
