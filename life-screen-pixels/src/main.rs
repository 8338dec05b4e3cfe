#![deny(clippy::all)]
#![forbid(unsafe_code)]

use error_iter::ErrorIter as _;
use life_grid::{GRID_HEIGHT, GRID_WIDTH, Random};
use life_screen::{LifeScreen, MonoCanvas, TriggerKeys};
use pixels::wgpu::Color;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::error::EventLoopError;
use winit::event::{ElementState, KeyEvent, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

const TIME_STEP_MILLIS: u64 = 100;
const CELL_PIXEL_WIDTH: u32 = 8;
const BACKGROUND_COLOR: Color = Color::BLACK;

const LIVE_RGBA: [u8; 4] = [0xff, 0xff, 0xff, 0xff];
const DEAD_RGBA: [u8; 4] = [0x00, 0x00, 0x00, 0xff];

fn main() -> Result<(), EventLoopError> {
    env_logger::init();

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    event_loop.run_app(&mut AppEventHandler::new())
}

struct App {
    screen: LifeScreen,
    triggers: TriggerKeys<KeyCode>,
    window: Arc<Window>,
    pixels: Pixels<'static>,
    next_update: Instant,
}

impl App {
    fn new(event_loop: &ActiveEventLoop) -> Self {
        let window = Arc::new(Self::build_window(event_loop));
        let pixels = Self::build_pixels(&window);
        Self {
            screen: LifeScreen::new(Random::new()),
            triggers: TriggerKeys::new(KeyCode::KeyR, KeyCode::Space),
            window,
            pixels,
            next_update: Instant::now(),
        }
    }

    fn build_window(event_loop: &ActiveEventLoop) -> Window {
        let size = LogicalSize::new(
            (GRID_WIDTH as u32 * CELL_PIXEL_WIDTH) as f64,
            (GRID_HEIGHT as u32 * CELL_PIXEL_WIDTH) as f64,
        );
        let window_attributes = Window::default_attributes()
            .with_title("life")
            .with_inner_size(size)
            .with_visible(false);
        event_loop.create_window(window_attributes).unwrap()
    }

    fn build_pixels(window: &Arc<Window>) -> Pixels<'static> {
        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        PixelsBuilder::new(GRID_WIDTH as u32, GRID_HEIGHT as u32, surface_texture)
            .clear_color(BACKGROUND_COLOR)
            .build()
            .unwrap()
    }

    fn on_create(&mut self) {
        self.screen.initialize();
        self.window.request_redraw();
        self.window.set_visible(true);
    }

    fn on_time_step(&mut self) {
        self.screen.advance();
        self.window.request_redraw();

        while self.next_update < Instant::now() {
            self.next_update += Duration::from_millis(TIME_STEP_MILLIS);
        }
    }

    fn on_key_press(&mut self, code: KeyCode) -> bool {
        let consumed = self.triggers.on_key_press(&code, &mut self.screen);
        if consumed {
            self.window.request_redraw();
        }
        consumed
    }

    fn on_redraw(&mut self) -> Result<(), pixels::Error> {
        let mut canvas = FrameCanvas {
            frame: self.pixels.frame_mut(),
            width: GRID_WIDTH,
        };
        self.screen.render(&mut canvas);
        self.pixels.render()
    }

    fn on_resize(&mut self, width: u32, height: u32) -> Result<(), pixels::TextureError> {
        self.pixels.resize_surface(width, height)
    }
}

/// Projects the monochrome grid onto the RGBA frame of the `pixels` buffer.
struct FrameCanvas<'a> {
    frame: &'a mut [u8],
    width: usize,
}

impl MonoCanvas for FrameCanvas<'_> {
    fn clear(&mut self) {
        for pixel in self.frame.chunks_exact_mut(4) {
            pixel.copy_from_slice(&DEAD_RGBA);
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        let offset = 4 * (y * self.width + x);
        let rgba = if on { LIVE_RGBA } else { DEAD_RGBA };
        self.frame[offset..offset + 4].copy_from_slice(&rgba);
    }
}

struct AppEventHandler {
    app: Option<App>,
}

impl AppEventHandler {
    fn new() -> Self {
        Self { app: None }
    }

    fn app(&mut self) -> &mut App {
        self.app.as_mut().unwrap()
    }
}

impl ApplicationHandler for AppEventHandler {
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause {
            self.app().on_time_step();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_none() {
            let mut app = App::new(event_loop);
            app.on_create();
            self.app = Some(app);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Err(err) = self.app().on_resize(size.width, size.height) {
                    log_error("pixels.resize_surface", err);
                    event_loop.exit();
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if !self.app().on_key_press(code) {
                    match code {
                        KeyCode::Escape | KeyCode::KeyQ => {
                            event_loop.exit();
                        }
                        _ => (),
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.app().on_redraw() {
                    log_error("pixels.render", err);
                    event_loop.exit();
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(app) = self.app.as_ref() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(app.next_update));
        }
    }
}

fn log_error<E: std::error::Error + 'static>(method_name: &str, err: E) {
    log::error!("{method_name}() failed: {err}");
    for source in err.sources().skip(1) {
        log::error!("  caused by: {source}");
    }
}
