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

//! romshelf application
//!
//! Owns the window, the rendering context and the browser, and drives the
//! browser from winit events: keys become logical input, every frame ticks
//! the browser and draws its view state with egui.

use crate::core::browser::{BrowserController, BrowserRequest};
use crate::core::geometry::Vec2;
use crate::core::library::load_systems;
use crate::core::settings::Settings;
use crate::core::texture::{FileSystemSource, SharedBackend, TextureCache};
use crate::frontend::frame_timer::FrameTimer;
use crate::frontend::input::InputHandler;
use crate::frontend::launcher::CommandLauncher;
use crate::frontend::renderer::{EguiTextureBackend, RenderContext};
use crate::frontend::ui::panels::fast_select::FastSelect;
use crate::frontend::ui::{ModalInput, UiAction, UiState};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

/// Where the application reads its configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// `systems.toml`
    pub systems_path: PathBuf,
    /// Persisted settings; `None` keeps them in memory only
    pub settings_path: Option<PathBuf>,
    /// Key bindings file
    pub input_path: PathBuf,
    /// User configuration directory, searched for themes
    pub config_dir: Option<PathBuf>,
    /// Open borderless fullscreen
    pub fullscreen: bool,
}

/// Window size in egui points
fn screen_size(window: &Window) -> Vec2 {
    let size = window.inner_size();
    let scale = window.scale_factor() as f32;
    Vec2::new(size.width as f32 / scale, size.height as f32 / scale)
}

/// romshelf application
pub struct Application {
    /// The application window
    window: Option<Arc<Window>>,
    /// wgpu rendering context
    render_context: Option<RenderContext>,
    /// egui context for UI
    egui_ctx: egui::Context,
    /// egui-winit state for event handling
    egui_state: Option<egui_winit::State>,
    /// egui-wgpu renderer, shared with the texture backend
    egui_renderer: Option<Rc<RefCell<egui_wgpu::Renderer>>>,
    /// GPU side of the texture cache
    textures: Option<Rc<RefCell<EguiTextureBackend>>>,
    /// Browser session, created once the GPU is up
    browser: Option<BrowserController>,
    startup: StartupConfig,
    /// Frame clock driving browser ticks
    frame_timer: FrameTimer,
    /// Keyboard bindings
    input_handler: InputHandler,
    launcher: CommandLauncher,
    /// Host windows
    ui_state: UiState,
    /// Exit requested flag
    exit_requested: bool,
}

impl Application {
    /// Create the application; the window and browser are created on resume
    ///
    /// # Example
    ///
    /// ```no_run
    /// use romshelf::frontend::{Application, StartupConfig};
    /// use winit::event_loop::EventLoop;
    ///
    /// let event_loop = EventLoop::new().unwrap();
    /// let mut app = Application::new(StartupConfig {
    ///     systems_path: "systems.toml".into(),
    ///     settings_path: None,
    ///     input_path: "input.toml".into(),
    ///     config_dir: None,
    ///     fullscreen: false,
    /// });
    /// event_loop.run_app(&mut app).unwrap();
    /// ```
    pub fn new(startup: StartupConfig) -> Self {
        let input_handler = InputHandler::with_config_path(&startup.input_path);

        Self {
            window: None,
            render_context: None,
            egui_ctx: egui::Context::default(),
            egui_state: None,
            egui_renderer: None,
            textures: None,
            browser: None,
            startup,
            frame_timer: FrameTimer::new(60),
            input_handler,
            launcher: CommandLauncher::new(),
            ui_state: UiState::new(),
            exit_requested: false,
        }
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&mut self) {
        if let Some(window) = &self.window {
            if window.fullscreen().is_some() {
                window.set_fullscreen(None);
                log::info!("Switched to windowed mode");
            } else {
                window.set_fullscreen(Some(winit::window::Fullscreen::Borderless(None)));
                log::info!("Switched to fullscreen mode");
            }
        }
    }

    /// Create the window, GPU context and browser session
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), String> {
        let mut window_attributes = Window::default_attributes()
            .with_title("romshelf")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
            .with_resizable(true);
        if self.startup.fullscreen {
            window_attributes = window_attributes
                .with_fullscreen(Some(winit::window::Fullscreen::Borderless(None)));
        }

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .map_err(|e| format!("Failed to create window: {}", e))?,
        );

        let render_context = pollster::block_on(RenderContext::new(&window))?;

        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let egui_renderer = Rc::new(RefCell::new(egui_wgpu::Renderer::new(
            &render_context.device,
            render_context.surface_config.format,
            egui_wgpu::RendererOptions::default(),
        )));

        let textures = Rc::new(RefCell::new(EguiTextureBackend::new(
            render_context.device.clone(),
            render_context.queue.clone(),
            egui_renderer.clone(),
        )));
        let backend: SharedBackend = textures.clone();
        let cache = TextureCache::new(backend, Rc::new(FileSystemSource));

        let systems = match load_systems(&self.startup.systems_path) {
            Ok(systems) => systems,
            Err(e) => {
                log::error!(
                    "Failed to load systems from {}: {}",
                    self.startup.systems_path.display(),
                    e
                );
                Vec::new()
            }
        };
        let settings = match &self.startup.settings_path {
            Some(path) => Settings::load_or_default(path),
            None => Settings::in_memory(),
        };
        let browser = BrowserController::new(
            systems,
            settings,
            self.startup.config_dir.clone(),
            cache,
            screen_size(&window),
        );

        window.request_redraw();
        self.window = Some(window);
        self.render_context = Some(render_context);
        self.egui_state = Some(egui_state);
        self.egui_renderer = Some(egui_renderer);
        self.textures = Some(textures);
        self.browser = Some(browser);

        log::info!("Application initialized successfully");
        Ok(())
    }

    /// Route one key event
    fn handle_key(&mut self, key_code: KeyCode, pressed: bool) {
        // Hotkeys (only on press)
        if pressed {
            match key_code {
                KeyCode::F11 => {
                    self.toggle_fullscreen();
                    return;
                }
                KeyCode::F1 => {
                    self.ui_state.show_input_config = !self.ui_state.show_input_config;
                    return;
                }
                _ => {}
            }
        }

        let Some(event) = self.input_handler.handle_keyboard(key_code, pressed) else {
            return;
        };
        let Some(browser) = self.browser.as_mut() else {
            return;
        };

        // Releases always reach the browser so held keys cannot get stuck
        if !event.pressed {
            browser.input(event);
            return;
        }

        if self.ui_state.has_modal() {
            if let ModalInput::Jump(letter) = self.ui_state.handle_action(event.action) {
                if !browser.fast_select(letter) {
                    log::debug!("No entry starting with '{}'", letter);
                }
            }
            return;
        }

        browser.input(event);
        self.handle_requests();
    }

    /// Act on everything the browser asked for
    fn handle_requests(&mut self) {
        let Some(browser) = self.browser.as_mut() else {
            return;
        };

        for request in browser.drain_requests() {
            match request {
                // Audio output is not part of the browser
                BrowserRequest::PlaySound(sound) => log::debug!("Sound cue: {:?}", sound),
                BrowserRequest::OpenMenu => self.ui_state.show_menu = true,
                BrowserRequest::OpenFastSelect(letter) => {
                    self.ui_state.fast_select = Some(FastSelect::new(letter));
                }
                BrowserRequest::EditMetadata(id) => self.ui_state.open_editor(browser, id),
                BrowserRequest::OpenScraper => {
                    log::info!("Scraper requested, but no scraper is configured");
                }
            }
        }
    }

    /// Handle UI action
    fn handle_ui_action(&mut self, action: UiAction) {
        if action == UiAction::ToggleFullscreen {
            self.toggle_fullscreen();
            return;
        }
        if action == UiAction::Exit {
            self.exit_requested = true;
            log::info!("Exit requested from UI");
            return;
        }

        let Some(browser) = self.browser.as_mut() else {
            return;
        };
        match action {
            UiAction::SetSort(index) => browser.set_sort_index(index),
            UiAction::ReloadImages => {
                let cache = browser.texture_cache_mut();
                cache.invalidate_all();
                cache.reload_all();
                browser.refresh_detail();
                log::info!("Reloaded images");
            }
            UiAction::SaveMetadata(id, metadata) => {
                if let Err(e) = browser.update_metadata(id, metadata) {
                    log::error!("Failed to update metadata: {}", e);
                }
            }
            UiAction::DeleteGame(id) => {
                if let Err(e) = browser.delete_game(id) {
                    log::error!("Failed to delete game: {}", e);
                }
            }
            UiAction::None | UiAction::ToggleFullscreen | UiAction::Exit => {}
        }
        self.handle_requests();
    }

    /// Render a frame
    fn render(&mut self) -> Result<(), String> {
        let window = self.window.as_ref().ok_or("Window not initialized")?;
        let render_context = self
            .render_context
            .as_mut()
            .ok_or("Render context not initialized")?;
        let egui_state = self
            .egui_state
            .as_mut()
            .ok_or("egui state not initialized")?;
        let egui_renderer = self
            .egui_renderer
            .as_ref()
            .ok_or("egui renderer not initialized")?;
        let textures = self
            .textures
            .as_ref()
            .ok_or("Texture backend not initialized")?;
        let browser = self.browser.as_ref().ok_or("Browser not initialized")?;

        // Get the next frame, handling common surface errors gracefully
        let output = match render_context.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                // Reconfigure the surface to the current size and skip this frame
                let (width, height) = render_context.size();
                render_context.resize(width, height);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timeout while acquiring frame");
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return Err("Surface out of memory while acquiring frame".to_string());
            }
            Err(e) => {
                log::error!("Unexpected surface error: {:?}", e);
                return Err(format!("Failed to get surface texture: {:?}", e));
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let raw_input = egui_state.take_egui_input(window);
        let ui_state = &mut self.ui_state;
        let input_handler = &self.input_handler;
        let frame_timer = &self.frame_timer;

        let mut ui_action = UiAction::None;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            ui_action = ui_state.render(ctx, browser, textures, input_handler, frame_timer);
        });

        egui_state.handle_platform_output(window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let mut egui_renderer = egui_renderer.borrow_mut();
        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(
                &render_context.device,
                &render_context.queue,
                *id,
                image_delta,
            );
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [
                render_context.surface_config.width,
                render_context.surface_config.height,
            ],
            pixels_per_point: window.scale_factor() as f32,
        };

        let mut encoder =
            render_context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Render Encoder"),
                });

        egui_renderer.update_buffers(
            &render_context.device,
            &render_context.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Forget lifetime to make render pass 'static as required by egui-wgpu 0.33
            let mut render_pass = render_pass.forget_lifetime();
            egui_renderer.render(&mut render_pass, &tris, &screen_descriptor);
        }

        render_context
            .queue
            .submit(std::iter::once(encoder.finish()));

        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }
        drop(egui_renderer);

        output.present();

        // Handle UI actions after all borrows are released
        self.handle_ui_action(ui_action);

        Ok(())
    }
}

impl ApplicationHandler for Application {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            log::error!("Failed to start: {}", e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        // Let egui handle the event first
        if let (Some(egui_state), Some(window)) = (&mut self.egui_state, &self.window) {
            let response = egui_state.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(render_context) = &mut self.render_context {
                    render_context.resize(physical_size.width, physical_size.height);
                }
                if let (Some(browser), Some(window)) = (&mut self.browser, &self.window) {
                    browser.set_screen_size(screen_size(window));
                }
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                if let (Some(browser), Some(window)) = (&mut self.browser, &self.window) {
                    browser.set_screen_size(screen_size(window));
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                // The browser runs its own auto-repeat
                if event.repeat {
                    return;
                }
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    self.handle_key(key_code, event.state.is_pressed());
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.render() {
                    log::error!("Render error: {}", e);
                    event_loop.exit();
                }
            }
            _ => {}
        }

        if self.exit_requested {
            log::info!("Exiting application");
            event_loop.exit();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(browser) = &mut self.browser {
            browser.save_selection();
        }
        log::info!("Application exiting");
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.frame_timer.should_run_frame() {
            let delta_ms = self.frame_timer.tick();

            // Blocks while a launched game runs
            if let Some(browser) = &mut self.browser {
                browser.tick(delta_ms, &mut self.launcher);
            }
            self.handle_requests();

            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }

        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Wake up at the next frame time instead of busy-waiting
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.frame_timer.next_frame_instant()));
    }
}
