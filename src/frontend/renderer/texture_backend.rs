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

//! wgpu texture backend
//!
//! Uploads decoded RGBA8 images for the texture cache and registers them with
//! the egui renderer so the UI can draw them by [`egui::TextureId`].

use crate::core::texture::{GpuTextureId, TextureBackend};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Why an upload was refused before reaching the GPU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadRejection {
    /// Width or height is zero
    Empty,
    /// Larger than the device allows
    TooLarge { max: u32 },
    /// Pixel buffer does not match `width * height * 4`
    SizeMismatch { expected: usize, actual: usize },
}

/// Validate an upload against the device limits
pub fn check_upload(
    width: u32,
    height: u32,
    rgba: &[u8],
    max_dimension: u32,
) -> Result<(), UploadRejection> {
    if width == 0 || height == 0 {
        return Err(UploadRejection::Empty);
    }
    if width > max_dimension || height > max_dimension {
        return Err(UploadRejection::TooLarge { max: max_dimension });
    }
    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(UploadRejection::SizeMismatch {
            expected,
            actual: rgba.len(),
        });
    }
    Ok(())
}

struct UploadedTexture {
    texture: wgpu::Texture,
    egui_id: egui::TextureId,
}

/// [`TextureBackend`] backed by wgpu textures
///
/// The egui renderer is shared with the application, which uses it to draw
/// each frame.
pub struct EguiTextureBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    renderer: Rc<RefCell<egui_wgpu::Renderer>>,
    textures: HashMap<GpuTextureId, UploadedTexture>,
    next_id: u64,
    /// Last texture bound, for diagnostics
    bound: Option<GpuTextureId>,
}

impl EguiTextureBackend {
    pub fn new(
        device: wgpu::Device,
        queue: wgpu::Queue,
        renderer: Rc<RefCell<egui_wgpu::Renderer>>,
    ) -> Self {
        Self {
            device,
            queue,
            renderer,
            textures: HashMap::new(),
            next_id: 1,
            bound: None,
        }
    }

    /// egui handle of an uploaded texture
    pub fn egui_texture(&self, id: GpuTextureId) -> Option<egui::TextureId> {
        self.textures.get(&id).map(|uploaded| uploaded.egui_id)
    }

    /// Number of textures currently on the GPU
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    #[inline(always)]
    pub fn bound(&self) -> Option<GpuTextureId> {
        self.bound
    }

    fn create_texture(&self, width: u32, height: u32, rgba: &[u8]) -> wgpu::Texture {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Library Image"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            texture.as_image_copy(),
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4), // 4 bytes per RGBA pixel
                rows_per_image: Some(height),
            },
            size,
        );

        texture
    }
}

impl TextureBackend for EguiTextureBackend {
    fn upload(&mut self, width: u32, height: u32, rgba: &[u8]) -> Option<GpuTextureId> {
        let max = self.device.limits().max_texture_dimension_2d;
        if let Err(rejection) = check_upload(width, height, rgba, max) {
            log::error!("Refusing texture upload ({}x{}): {:?}", width, height, rejection);
            return None;
        }

        let texture = self.create_texture(width, height, rgba);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let egui_id = self.renderer.borrow_mut().register_native_texture(
            &self.device,
            &view,
            wgpu::FilterMode::Linear,
        );

        let id = GpuTextureId(self.next_id);
        self.next_id += 1;
        self.textures.insert(id, UploadedTexture { texture, egui_id });
        Some(id)
    }

    fn release(&mut self, id: GpuTextureId) {
        let Some(uploaded) = self.textures.remove(&id) else {
            log::warn!("Release of unknown texture {:?}", id);
            return;
        };
        self.renderer.borrow_mut().free_texture(&uploaded.egui_id);
        uploaded.texture.destroy();
        if self.bound == Some(id) {
            self.bound = None;
        }
    }

    fn bind(&mut self, id: GpuTextureId) {
        // egui draws by texture id, binding only records the selection
        if self.textures.contains_key(&id) {
            self.bound = Some(id);
        } else {
            log::error!("Bind of unknown texture {:?}", id);
        }
    }
}
