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

//! A single cached texture

use super::{GpuTextureId, ResourceSource, SharedBackend};
use crate::core::error::TextureError;
use std::cell::Cell;
use std::rc::Rc;

/// Decode encoded image bytes into a tightly packed RGBA8 buffer
///
/// # Returns
///
/// `(width, height, pixels)` with `pixels.len() == width * height * 4`
pub fn decode_rgba8(data: &[u8]) -> Result<(u32, u32, Vec<u8>), image::ImageError> {
    let rgba = image::load_from_memory(data)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok((width, height, rgba.into_raw()))
}

/// Texture loaded from an image path
///
/// Holds at most one GPU texture at a time. The texture is released on
/// [`unload`](Self::unload) or drop, whichever comes first.
pub struct TextureResource {
    path: String,
    backend: SharedBackend,
    source: Rc<dyn ResourceSource>,
    gpu: Cell<Option<GpuTextureId>>,
    size: Cell<(u32, u32)>,
}

impl TextureResource {
    /// Create a resource and load it immediately
    pub(super) fn load(path: &str, backend: SharedBackend, source: Rc<dyn ResourceSource>) -> Self {
        let texture = Self {
            path: path.to_string(),
            backend,
            source,
            gpu: Cell::new(None),
            size: Cell::new((0, 0)),
        };
        texture.reload();
        texture
    }

    /// Create an empty-path resource whose load does nothing
    pub(super) fn placeholder(backend: SharedBackend, source: Rc<dyn ResourceSource>) -> Self {
        Self::load("", backend, source)
    }

    /// Decode and upload again from the original path
    ///
    /// Any previously held GPU texture is released first. Failures are logged
    /// and leave the resource unloaded with a zero size.
    pub fn reload(&self) {
        if self.path.is_empty() {
            return;
        }

        self.unload();
        self.size.set((0, 0));

        match self.upload() {
            Ok((id, width, height)) => {
                self.gpu.set(Some(id));
                self.size.set((width, height));
            }
            Err(e) => {
                log::error!("Could not initialize texture: {}", e);
            }
        }
    }

    fn upload(&self) -> Result<(GpuTextureId, u32, u32), TextureError> {
        let data = self
            .source
            .file_data(&self.path)
            .map_err(|source| TextureError::Read {
                path: self.path.clone(),
                source,
            })?;

        let (width, height, rgba) = decode_rgba8(&data).map_err(|source| TextureError::Decode {
            path: self.path.clone(),
            source,
        })?;

        let id = self
            .backend
            .borrow_mut()
            .upload(width, height, &rgba)
            .ok_or_else(|| TextureError::Upload(self.path.clone()))?;

        log::debug!("Uploaded texture '{}' ({}x{})", self.path, width, height);
        Ok((id, width, height))
    }

    /// Release the GPU texture
    ///
    /// Idempotent: only the first call after a successful load reaches the
    /// backend. The recorded size is kept so layout stays stable until the
    /// next reload.
    pub fn unload(&self) {
        if let Some(id) = self.gpu.take() {
            self.backend.borrow_mut().release(id);
        }
    }

    /// Bind the texture for drawing
    ///
    /// # Returns
    ///
    /// `false` (after logging an error) if there is no GPU texture to bind
    pub fn bind(&self) -> bool {
        match self.gpu.get() {
            Some(id) => {
                self.backend.borrow_mut().bind(id);
                true
            }
            None => {
                log::error!("Tried to bind uninitialized texture '{}'!", self.path);
                false
            }
        }
    }

    /// Source path (empty for placeholders)
    #[inline(always)]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Pixel dimensions, `(0, 0)` when the image is unavailable
    #[inline(always)]
    pub fn size(&self) -> (u32, u32) {
        self.size.get()
    }

    /// GPU texture id, if loaded
    #[inline(always)]
    pub fn gpu_id(&self) -> Option<GpuTextureId> {
        self.gpu.get()
    }

    /// Check whether a GPU texture is currently held
    #[inline(always)]
    pub fn is_loaded(&self) -> bool {
        self.gpu.get().is_some()
    }
}

impl Drop for TextureResource {
    fn drop(&mut self) {
        self.unload();
    }
}

impl std::fmt::Debug for TextureResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureResource")
            .field("path", &self.path)
            .field("gpu", &self.gpu.get())
            .field("size", &self.size.get())
            .finish()
    }
}
