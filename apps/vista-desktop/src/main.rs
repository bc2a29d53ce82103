use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use egui::Context as EguiContext;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use vista_camera::{CameraController, Settings};
use vista_common::{Clock, SystemClock, TextureMix};
use vista_input::{Action, ActionEdges, Bindings, HeldActions, InputState};
use vista_render::RenderView;
use vista_render_wgpu::{Scene, SceneRenderer, checkerboard, load_or_checkerboard};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{
    DeviceEvent, ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent,
};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

mod keymap;

/// Scroll pixels that count as one wheel line on touchpads.
const PIXELS_PER_SCROLL_LINE: f64 = 20.0;

/// Longest frame step fed to the controller, so a stall does not teleport the camera.
const MAX_FRAME_SECONDS: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SceneArg {
    Triangle,
    Quad,
    Cubes,
}

impl From<SceneArg> for Scene {
    fn from(arg: SceneArg) -> Self {
        match arg {
            SceneArg::Triangle => Scene::Triangle,
            SceneArg::Quad => Scene::Quad,
            SceneArg::Cubes => Scene::Cubes,
        }
    }
}

/// Where mouse-look samples come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LookSource {
    /// Raw device motion; keeps working while the cursor is locked.
    Raw,
    /// Absolute cursor positions inside the window.
    Cursor,
}

#[derive(Parser)]
#[command(name = "vista-desktop", about = "Run a rendering exercise in a window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Exercise to run
    #[arg(long, value_enum, default_value_t = SceneArg::Cubes)]
    scene: SceneArg,

    /// JSON settings file (controller tunables and key bindings)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding container.jpg and awesomeface.png
    #[arg(long, default_value = "./textures")]
    textures: PathBuf,

    /// Mouse-look sample source
    #[arg(long, value_enum, default_value_t = LookSource::Raw)]
    look: LookSource,
}

/// Application state.
struct AppState {
    scene: Scene,
    camera: CameraController,
    bindings: Bindings,
    input: InputState,
    mix: TextureMix,
    look: LookSource,
    show_hud: bool,
    mouse_captured: bool,
    aspect: f32,
    clock: SystemClock,
    last_frame: f64,
}

impl AppState {
    fn new(scene: Scene, settings: Settings, look: LookSource) -> Self {
        let clock = SystemClock::new();
        Self {
            scene,
            camera: CameraController::new(settings.controller),
            bindings: settings.bindings,
            input: InputState::new(),
            mix: TextureMix::default(),
            look,
            show_hud: false,
            mouse_captured: false,
            aspect: 800.0 / 600.0,
            last_frame: clock.now_seconds(),
            clock,
        }
    }

    /// Apply one frame of input. Returns `false` once quit was requested.
    fn update(&mut self, now: f64, dt: f32) -> bool {
        if self.input.pressed(Action::Quit) {
            return false;
        }
        if self.input.pressed(Action::ToggleHud) {
            self.show_hud = !self.show_hud;
        }
        if self.input.held(Action::MixUp) {
            self.mix.adjust(TextureMix::STEP);
        }
        if self.input.held(Action::MixDown) {
            self.mix.adjust(-TextureMix::STEP);
        }
        self.camera.update(&self.input, now, dt);
        true
    }

    fn handle_key(&mut self, code: KeyCode, pressed: bool) {
        if let Some(key) = keymap::to_key(code) {
            self.input.handle_key(&self.bindings, key, pressed);
        }
    }

    fn view(&self) -> RenderView {
        RenderView::capture(&self.camera, self.mix, self.aspect)
    }

    /// Mouse look only makes sense in scenes drawn through the camera.
    fn can_capture(&self) -> bool {
        self.scene.uses_camera()
    }

    fn draw_ui(&mut self, ctx: &EguiContext, wireframe_supported: bool) {
        if !self.show_hud {
            return;
        }

        egui::SidePanel::left("hud")
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.heading("Goat Coder");
                ui.label(format!("Scene: {}", self.scene.name()));
                ui.separator();

                let p = self.camera.position();
                let o = self.camera.orientation();
                ui.label(format!("Position: ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z));
                ui.label(format!("Yaw: {:.1}  Pitch: {:.1}", o.yaw, o.pitch));
                ui.label(format!("FOV: {:.1}", self.camera.fov().degrees()));
                ui.label(format!(
                    "Jump: {} ({:.2})",
                    if self.camera.jump().is_active() {
                        "airborne"
                    } else {
                        "grounded"
                    },
                    self.camera.jump_offset()
                ));
                ui.label(format!("Polygon mode: {:?}", self.camera.polygon_mode()));
                if !wireframe_supported {
                    ui.small("wireframe unavailable on this adapter");
                }
                ui.separator();

                let mut mix = self.mix.value();
                if ui
                    .add(egui::Slider::new(&mut mix, 0.0..=1.0).text("Texture mix"))
                    .changed()
                {
                    self.mix = TextureMix::new(mix);
                }
                if ui.button("Reset camera").clicked() {
                    self.camera.reset();
                }

                ui.separator();
                ui.small("RMB: Look | WASD: Move | Shift: Sprint | Space: Jump");
                ui.small("Tab: Wireframe | Up/Down: Mix | F1: HUD | Esc: Quit");
            });
    }
}

/// Window, device and per-window render state, created on resume.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: SceneRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(
        event_loop: &ActiveEventLoop,
        scene: Scene,
        textures: &Path,
        egui_ctx: &EguiContext,
    ) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("Goat Coder")
            .with_inner_size(PhysicalSize::new(800u32, 600));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("vista_device"),
                required_features: adapter.features() & wgpu::Features::POLYGON_MODE_LINE,
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("failed to create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let images = if scene.is_textured() {
            [
                load_or_checkerboard(textures.join("container.jpg"), false),
                load_or_checkerboard(textures.join("awesomeface.png"), true),
            ]
        } else {
            let blank = checkerboard(1, 1, [255; 4], [255; 4]);
            [blank.clone(), blank]
        };

        let renderer = SceneRenderer::new(
            &device,
            &queue,
            surface_format,
            config.width,
            config.height,
            scene,
            [&images[0], &images[1]],
        );

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.config.width = new_size.width.max(1);
        self.config.height = new_size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    fn set_cursor_captured(&self, captured: bool, look: LookSource) {
        if captured {
            let (first, second) = match look {
                LookSource::Raw => (CursorGrabMode::Locked, CursorGrabMode::Confined),
                LookSource::Cursor => (CursorGrabMode::Confined, CursorGrabMode::Locked),
            };
            let grabbed = self
                .window
                .set_cursor_grab(first)
                .or_else(|_| self.window.set_cursor_grab(second));
            if let Err(e) = grabbed {
                tracing::warn!("cursor grab unavailable: {e}");
            }
        } else if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::None) {
            tracing::warn!("failed to release cursor: {e}");
        }
        self.window.set_cursor_visible(!captured);
    }

    /// Draw the scene and the HUD on top.
    fn draw(&mut self, state: &mut AppState, egui_ctx: &EguiContext) {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let target = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer
            .render(&self.device, &self.queue, &target, &state.view());

        let wireframe_supported = self.renderer.supports_wireframe();
        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = egui_ctx.run(raw_input, |ctx| {
            state.draw_ui(ctx, wireframe_supported);
        });

        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &target,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        output.present();
    }
}

struct VistaApp {
    state: AppState,
    textures: PathBuf,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
}

impl VistaApp {
    fn new(state: AppState, textures: PathBuf) -> Self {
        Self {
            state,
            textures,
            gpu: None,
            egui_ctx: EguiContext::default(),
        }
    }
}

impl ApplicationHandler for VistaApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match Gpu::new(event_loop, self.state.scene, &self.textures, &self.egui_ctx) {
            Ok(gpu) => {
                self.state.aspect = gpu.aspect();
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("failed to initialize graphics: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
        if response.consumed {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                gpu.resize(new_size);
                self.state.aspect = gpu.aspect();
            }
            WindowEvent::Focused(false) => {
                self.state.input.clear();
                if self.state.mouse_captured {
                    self.state.mouse_captured = false;
                    gpu.set_cursor_captured(false, self.state.look);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::MouseInput {
                button: MouseButton::Right,
                state: ElementState::Pressed,
                ..
            } if self.state.can_capture() => {
                self.state.mouse_captured = !self.state.mouse_captured;
                self.state.camera.reset_mouse();
                gpu.set_cursor_captured(self.state.mouse_captured, self.state.look);
                tracing::debug!(captured = self.state.mouse_captured, "mouse capture");
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.state.mouse_captured && self.state.look == LookSource::Cursor {
                    self.state
                        .camera
                        .apply_cursor_position(position.x as f32, position.y as f32);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => (p.y / PIXELS_PER_SCROLL_LINE) as f32,
                };
                self.state.camera.apply_scroll(lines);
            }
            WindowEvent::RedrawRequested => {
                let now = self.state.clock.now_seconds();
                let dt = (now - self.state.last_frame).min(MAX_FRAME_SECONDS) as f32;
                self.state.last_frame = now;

                if !self.state.update(now, dt) {
                    tracing::info!("quit requested");
                    event_loop.exit();
                    return;
                }

                gpu.draw(&mut self.state, &self.egui_ctx);
                self.state.input.end_frame();
                gpu.window.request_redraw();
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.state.mouse_captured && self.state.look == LookSource::Raw {
                self.state
                    .camera
                    .apply_mouse_delta(delta.0 as f32, delta.1 as f32);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    let scene = Scene::from(cli.scene);
    tracing::info!("vista-desktop starting with the {} scene", scene.name());

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = VistaApp::new(AppState::new(scene, settings, cli.look), cli.textures);
    event_loop.run_app(&mut app)?;

    Ok(())
}
