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

//! wgpu rendering context
//!
//! Owns the GPU device, queue and window surface shared by the egui renderer
//! and the texture backend.

use std::sync::Arc;
use winit::window::Window;

/// wgpu rendering context
pub struct RenderContext {
    /// wgpu device for creating GPU resources
    pub device: wgpu::Device,
    /// Command queue for submitting GPU commands
    pub queue: wgpu::Queue,
    /// Surface for rendering to the window
    pub surface: wgpu::Surface<'static>,
    /// Surface configuration (format, size, present mode, etc.)
    pub surface_config: wgpu::SurfaceConfiguration,
}

impl RenderContext {
    /// Create a rendering context for `window`
    ///
    /// # Errors
    ///
    /// Returns an error if no suitable GPU adapter is found, device creation
    /// fails, or the surface reports no usable format.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use winit::window::Window;
    /// use romshelf::frontend::renderer::RenderContext;
    ///
    /// async fn create_context(window: Arc<Window>) {
    ///     let context = RenderContext::new(&window).await.unwrap();
    /// }
    /// ```
    pub async fn new(window: &Arc<Window>) -> Result<Self, String> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| format!("Failed to create surface: {}", e))?;

        // The browser is light work; prefer the integrated GPU
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| format!("Failed to find suitable GPU adapter: {}", e))?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("romshelf Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                experimental_features: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| format!("Failed to create device: {}", e))?;

        let surface_caps = surface.get_capabilities(&adapter);

        // Prefer an sRGB format so image colors come out unchanged
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or("Surface reports no texture formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo, // V-sync
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &surface_config);

        log::info!(
            "Initialized wgpu context: {}x{}, format: {:?}",
            size.width,
            size.height,
            surface_format
        );

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
        })
    }

    /// Reconfigure the surface after a window resize
    ///
    /// Zero sizes (minimized windows) are ignored.
    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.surface_config.width = new_width;
            self.surface_config.height = new_height;
            self.surface.configure(&self.device, &self.surface_config);
            log::debug!("Resized surface to {}x{}", new_width, new_height);
        }
    }

    /// Surface size in physical pixels
    pub fn size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }
}
