//! Wavefield - procedural terrain with pillars, a player marker and
//! wave-animated water, explored with a fly camera.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowId},
};

use wavefield::camera::FlyCamera;
use wavefield::cli::Args;
use wavefield::input::KeyboardState;
use wavefield::params::RenderConfig;
use wavefield::rendering::{FrameUniforms, RenderSystem};
use wavefield::scene::Scene;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation state
    scene: Scene,
    camera: FlyCamera,
    keyboard: KeyboardState,

    // Configuration
    render_config: RenderConfig,

    // Time tracking
    last_frame: Instant,
}

impl App {
    fn new(scene: Scene, camera: FlyCamera, render_config: RenderConfig) -> Self {
        Self {
            window: None,
            render_system: None,
            scene,
            camera,
            keyboard: KeyboardState::default(),
            render_config,
            last_frame: Instant::now(),
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        let window_attributes = Window::default_attributes()
            .with_title("Wavefield")
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        // Mouse look wants raw motion with the cursor kept in the window
        if let Err(e) = window
            .set_cursor_grab(CursorGrabMode::Confined)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
        {
            warn!("Cursor grab unavailable: {}", e);
        }
        window.set_cursor_visible(false);

        let render_system = match pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &self.scene,
            &self.render_config,
        )) {
            Ok(render_system) => render_system,
            Err(e) => {
                error!("Failed to initialize renderer: {}", e);
                event_loop.exit();
                return;
            }
        };

        let (width, height) = render_system.size();
        self.render_config.window_width = width;
        self.render_config.window_height = height;

        info!("WASD + mouse to fly, scroll to zoom, IJKL to move the player, ESC to quit");

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.last_frame = Instant::now();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state,
                        physical_key: PhysicalKey::Code(code),
                        ..
                    },
                ..
            } => {
                if code == KeyCode::Escape && state == ElementState::Pressed {
                    event_loop.exit();
                } else {
                    self.keyboard.set(code, state == ElementState::Pressed);
                }
            }
            WindowEvent::Focused(false) => self.keyboard.clear(),
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 20.0,
                };
                self.camera.process_scroll(lines);
            }
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.camera.process_mouse(dx as f32, dy as f32);
        }
    }
}

impl App {
    fn resize(&mut self, width: u32, height: u32) {
        let Some(render_system) = self.render_system.as_mut() else {
            return;
        };
        if width == 0 || height == 0 {
            return; // Minimized
        }
        render_system.resize(width, height);
        self.render_config.window_width = width;
        self.render_config.window_height = height;
    }

    /// Advance the simulation and render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        if self.render_system.is_none() {
            return;
        }

        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        for movement in self.keyboard.camera_movements() {
            self.camera.process_keyboard(movement, dt);
        }
        for movement in self.keyboard.player_movements() {
            self.scene.move_player(movement, dt);
        }
        self.scene.update(dt, &self.camera);

        let (view_proj, camera_pos) = self.camera.create_view_proj_matrix(&self.render_config);
        let uniforms = FrameUniforms::new(
            view_proj,
            camera_pos,
            self.scene.time_s(),
            &self.scene.lights,
            self.scene.wave.uniform(),
        );

        let Some(render_system) = self.render_system.as_ref() else {
            return;
        };
        render_system.update_frame(&uniforms);
        render_system.update_objects(&self.scene);

        match render_system.render(&self.scene) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = render_system.size();
                self.resize(width, height);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("Surface out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => warn!("Render error: {:?}", e),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let render_config = args.render_config();
    let scene_params = args.scene_params();

    let scene =
        Scene::new(&scene_params, render_config.draw_mode).context("failed to build scene")?;
    let camera = FlyCamera::new(&scene_params.camera);

    let mut app = App::new(scene, camera, render_config);
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.run_app(&mut app)?;

    Ok(())
}
