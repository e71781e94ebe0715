use anyhow::Result;
use clap::Parser;
use egui::Context as EguiContext;
use mapwalk_input::{InputState, Key};
use mapwalk_kernel::Scene;
use mapwalk_render::FrameLoop;
use mapwalk_render_wgpu::{Gpu, WgpuCanvas};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "mapwalk-desktop", about = "Mapwalk desktop demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 400)]
    height: u32,
}

/// Map a host key code onto the movement vocabulary. Unmapped keys are
/// dropped before they reach the input state.
fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::ArrowUp | KeyCode::KeyW => Some(Key::Forward),
        KeyCode::ArrowDown | KeyCode::KeyS => Some(Key::Backward),
        KeyCode::ArrowLeft | KeyCode::KeyA => Some(Key::TurnLeft),
        KeyCode::ArrowRight | KeyCode::KeyD => Some(Key::TurnRight),
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Some(Key::Boost),
        _ => None,
    }
}

/// Application state.
struct AppState {
    input: InputState,
    frame_loop: FrameLoop,
    show_overlay: bool,
}

impl AppState {
    fn new(width: u32, height: u32) -> Self {
        let (w, h) = (width as f32, height as f32);
        Self {
            input: InputState::new(),
            frame_loop: FrameLoop::new(Scene::demo(w, h), w, h),
            show_overlay: true,
        }
    }

    fn handle_key(&mut self, code: KeyCode, pressed: bool) {
        if let Some(key) = map_key(code) {
            if pressed {
                self.input.press(key);
            } else {
                self.input.release(key);
            }
            return;
        }

        if pressed && code == KeyCode::F1 {
            self.show_overlay = !self.show_overlay;
        }
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.show_overlay {
            return;
        }

        let player = self.frame_loop.scene.player;
        egui::SidePanel::left("pose")
            .default_width(200.0)
            .show(ctx, |ui| {
                ui.heading("Mapwalk");
                ui.separator();
                ui.label(format!("Frame: {}", self.frame_loop.frame()));
                ui.label(format!("Position: ({:.1}, {:.1})", player.x, player.y));
                ui.label(format!("Angle: {:.3} rad", player.angle));
                ui.label(format!("Speed: {:.0}", player.speed));
                ui.separator();

                ui.heading("Keys");
                for (key, name) in [
                    (Key::Forward, "Forward"),
                    (Key::Backward, "Backward"),
                    (Key::TurnLeft, "Turn left"),
                    (Key::TurnRight, "Turn right"),
                    (Key::Boost, "Boost"),
                ] {
                    let held = self.input.is_pressed(key);
                    ui.label(format!("{name}: {}", if held { "held" } else { "-" }));
                }

                ui.separator();
                ui.small("Arrows/WASD: Move | Shift: Boost | F1: Toggle overlay");
            });
    }
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    canvas: Option<WgpuCanvas>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    size: PhysicalSize<u32>,
}

impl GpuApp {
    fn new(width: u32, height: u32) -> Self {
        Self {
            state: AppState::new(width, height),
            window: None,
            gpu: None,
            canvas: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
            size: PhysicalSize::new(width, height),
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Mapwalk")
            .with_inner_size(self.size);
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let gpu = match Gpu::new(window.clone()) {
            Ok(gpu) => gpu,
            Err(e) => {
                tracing::error!("failed to initialize GPU: {e}");
                event_loop.exit();
                return;
            }
        };

        let canvas = WgpuCanvas::new(gpu.device(), gpu.surface_format());

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer =
            egui_wgpu::Renderer::new(gpu.device(), gpu.surface_format(), None, 1, false);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.canvas = Some(canvas);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            let response = egui_winit.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(code, key_state == ElementState::Pressed);
            }
            WindowEvent::RedrawRequested => {
                let (Some(gpu), Some(canvas), Some(window)) =
                    (&self.gpu, &mut self.canvas, &self.window)
                else {
                    return;
                };

                self.state.frame_loop.advance(&self.state.input, canvas);

                let output = match gpu.current_texture() {
                    Ok(t) => t,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        gpu.reconfigure();
                        return;
                    }
                    Err(e) => {
                        tracing::error!("surface error: {e}");
                        return;
                    }
                };

                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                canvas.render(gpu, &view);

                let raw_input = self
                    .egui_winit
                    .as_mut()
                    .unwrap()
                    .take_egui_input(window);
                let full_output = self.egui_ctx.run(raw_input, |ctx| {
                    self.state.draw_ui(ctx);
                });

                self.egui_winit.as_mut().unwrap().handle_platform_output(
                    window,
                    full_output.platform_output,
                );

                let paint_jobs = self
                    .egui_ctx
                    .tessellate(full_output.shapes, full_output.pixels_per_point);

                let (width, height) = gpu.surface_size();
                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [width, height],
                    pixels_per_point: full_output.pixels_per_point,
                };

                {
                    let egui_renderer = self.egui_renderer.as_mut().unwrap();
                    for (id, image_delta) in &full_output.textures_delta.set {
                        egui_renderer.update_texture(gpu.device(), gpu.queue(), *id, image_delta);
                    }
                    let mut encoder =
                        gpu.device()
                            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                                label: Some("egui_encoder"),
                            });
                    egui_renderer.update_buffers(
                        gpu.device(),
                        gpu.queue(),
                        &mut encoder,
                        &paint_jobs,
                        &screen_descriptor,
                    );
                    {
                        let mut pass = encoder
                            .begin_render_pass(&wgpu::RenderPassDescriptor {
                                label: Some("egui_pass"),
                                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                                    view: &view,
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
                        egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
                    }
                    gpu.queue().submit(std::iter::once(encoder.finish()));
                    for id in &full_output.textures_delta.free {
                        egui_renderer.free_texture(id);
                    }
                }

                output.present();
                window.request_redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!(width = cli.width, height = cli.height, "mapwalk-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(cli.width, cli.height);
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_map_to_movement_keys() {
        assert_eq!(map_key(KeyCode::ArrowUp), Some(Key::Forward));
        assert_eq!(map_key(KeyCode::ArrowDown), Some(Key::Backward));
        assert_eq!(map_key(KeyCode::ArrowLeft), Some(Key::TurnLeft));
        assert_eq!(map_key(KeyCode::ArrowRight), Some(Key::TurnRight));
    }

    #[test]
    fn wasd_mirrors_the_arrows() {
        assert_eq!(map_key(KeyCode::KeyW), map_key(KeyCode::ArrowUp));
        assert_eq!(map_key(KeyCode::KeyS), map_key(KeyCode::ArrowDown));
        assert_eq!(map_key(KeyCode::KeyA), map_key(KeyCode::ArrowLeft));
        assert_eq!(map_key(KeyCode::KeyD), map_key(KeyCode::ArrowRight));
    }

    #[test]
    fn either_shift_is_boost() {
        assert_eq!(map_key(KeyCode::ShiftLeft), Some(Key::Boost));
        assert_eq!(map_key(KeyCode::ShiftRight), Some(Key::Boost));
    }

    #[test]
    fn unmapped_keys_are_dropped() {
        assert_eq!(map_key(KeyCode::Space), None);
        assert_eq!(map_key(KeyCode::Escape), None);
        assert_eq!(map_key(KeyCode::KeyQ), None);
    }

    #[test]
    fn key_events_drive_the_input_state() {
        let mut state = AppState::new(640, 400);
        state.handle_key(KeyCode::ArrowUp, true);
        assert!(state.input.is_pressed(Key::Forward));
        state.handle_key(KeyCode::ArrowUp, false);
        assert!(!state.input.is_pressed(Key::Forward));
    }

    #[test]
    fn f1_toggles_the_overlay() {
        let mut state = AppState::new(640, 400);
        assert!(state.show_overlay);
        state.handle_key(KeyCode::F1, true);
        assert!(!state.show_overlay);
        state.handle_key(KeyCode::F1, false);
        assert!(!state.show_overlay);
        state.handle_key(KeyCode::F1, true);
        assert!(state.show_overlay);
    }
}
