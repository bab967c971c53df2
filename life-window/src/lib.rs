#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Live window that shows a [`World`] one grid cell per texture pixel and
//! advances it on a fixed timer.

use life_grid::World;
use log::{error, info};
use pixels::wgpu::Color;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, KeyEvent, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

const CELL_PIXEL_WIDTH: u32 = 12;
const BACKGROUND_COLOR: Color = Color::BLACK;
const WINDOW_TITLE: &str = "Conway's Game of Life";

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("event loop failed: {0}")]
    EventLoop(#[from] EventLoopError),

    #[error("could not create window: {0}")]
    Os(#[from] OsError),

    #[error("pixel surface failed: {0}")]
    Pixels(#[from] pixels::Error),

    #[error("could not resize pixel surface: {0}")]
    Texture(#[from] pixels::TextureError),
}

/// Runs the window until the user closes it. The world is updated once per
/// `time_step` until it has been updated `frames` times, after which the last
/// generation stays on screen.
pub fn animate<W: World>(world: W, time_step: Duration, frames: u64) -> Result<(), WindowError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let mut handler = AppEventHandler::new(world, time_step, frames);
    event_loop.run_app(&mut handler)?;
    match handler.failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct App {
    window: Arc<Window>,
    pixels: Pixels<'static>,
}

impl App {
    fn new<W: World>(event_loop: &ActiveEventLoop, world: &W) -> Result<Self, WindowError> {
        let window = Arc::new(Self::build_window(event_loop, world)?);
        let pixels = Self::build_pixels(&window, world)?;
        Ok(Self { window, pixels })
    }

    fn build_window<W: World>(event_loop: &ActiveEventLoop, world: &W) -> Result<Window, OsError> {
        let grid = world.grid();
        let window_attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(
                grid.width() * CELL_PIXEL_WIDTH,
                grid.height() * CELL_PIXEL_WIDTH,
            ))
            .with_visible(false);
        event_loop.create_window(window_attributes)
    }

    fn build_pixels<W: World>(
        window: &Arc<Window>,
        world: &W,
    ) -> Result<Pixels<'static>, pixels::Error> {
        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        PixelsBuilder::new(world.grid().width(), world.grid().height(), surface_texture)
            .clear_color(BACKGROUND_COLOR)
            .build()
    }

    fn on_create(&mut self) {
        self.window.request_redraw();
        self.window.set_visible(true);
    }

    fn on_resize(&mut self, width: u32, height: u32) -> Result<(), WindowError> {
        if width > 0 && height > 0 {
            self.pixels.resize_surface(width, height)?;
        }
        Ok(())
    }

    fn on_redraw<W: World>(&mut self, world: &W) -> Result<(), WindowError> {
        let screen = self.pixels.frame_mut();
        debug_assert_eq!(screen.len(), 4 * world.grid().num_cells());

        for (cell, pixel) in world.grid().cells_iter().zip(screen.chunks_exact_mut(4)) {
            pixel.copy_from_slice(&cell.color_rgba());
        }
        self.pixels.render()?;
        Ok(())
    }
}

struct AppEventHandler<W: World> {
    world: W,
    app: Option<App>,
    time_step: Duration,
    next_update: Instant,
    frames_left: u64,
    failure: Option<WindowError>,
}

impl<W: World> AppEventHandler<W> {
    fn new(world: W, time_step: Duration, frames: u64) -> Self {
        Self {
            world,
            app: None,
            time_step,
            next_update: Instant::now(),
            frames_left: frames,
            failure: None,
        }
    }

    /// Does nothing until the window exists, so no generation goes unseen.
    fn on_time_step(&mut self) {
        let Some(app) = &self.app else {
            return;
        };
        if self.frames_left == 0 {
            return;
        }
        self.world.update();
        self.frames_left -= 1;
        if self.frames_left == 0 {
            info!("all frames shown; close the window to exit");
        }
        app.window.request_redraw();
        self.next_update = next_deadline(self.next_update, self.time_step, Instant::now());
    }

    fn control_flow(&self) -> ControlFlow {
        if self.app.is_some() && self.frames_left > 0 {
            ControlFlow::WaitUntil(self.next_update)
        } else {
            ControlFlow::Wait
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: WindowError) {
        error!("{err}");
        self.failure = Some(err);
        event_loop.exit();
    }
}

impl<W: World> ApplicationHandler for AppEventHandler<W> {
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause {
            self.on_time_step();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }
        match App::new(event_loop, &self.world) {
            Ok(mut app) => {
                app.on_create();
                self.app = Some(app);
                self.next_update = Instant::now() + self.time_step;
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Released,
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape | KeyCode::KeyQ | KeyCode::KeyX => {
                    event_loop.exit();
                }
                _ => (),
            },
            WindowEvent::Resized(size) => {
                if let Some(app) = self.app.as_mut()
                    && let Err(err) = app.on_resize(size.width, size.height)
                {
                    self.fail(event_loop, err);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(app) = self.app.as_mut()
                    && let Err(err) = app.on_redraw(&self.world)
                {
                    self.fail(event_loop, err);
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(self.control_flow());
    }
}

/// The first multiple of `time_step` after `deadline` that is not in the past.
/// Skips missed steps instead of replaying them; a zero step means "now".
fn next_deadline(deadline: Instant, time_step: Duration, now: Instant) -> Instant {
    if time_step.is_zero() {
        return now;
    }
    let mut next = deadline;
    while next < now {
        next += time_step;
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_grid::{Grid, Simulation};

    fn handler(time_step: Duration, frames: u64) -> AppEventHandler<Simulation> {
        let grid = Grid::new(5, 5, |row, col| row == 2 && (1..4).contains(&col)).unwrap();
        AppEventHandler::new(Simulation::new(grid), time_step, frames)
    }

    #[test]
    fn no_updates_before_the_window_exists() {
        let mut handler = handler(Duration::from_millis(16), 3);
        assert_eq!(handler.control_flow(), ControlFlow::Wait);

        handler.on_time_step();
        assert_eq!(handler.world.generation(), 0);
        assert_eq!(handler.frames_left, 3);
    }

    #[test]
    fn zero_time_step_does_not_spin() {
        let start = Instant::now();
        let now = start + Duration::from_secs(1);
        assert_eq!(next_deadline(start, Duration::ZERO, now), now);
    }

    #[test]
    fn deadline_skips_missed_steps() {
        let start = Instant::now();
        let step = Duration::from_millis(10);
        let now = start + Duration::from_millis(35);
        assert_eq!(next_deadline(start, step, now), start + Duration::from_millis(40));
        assert_eq!(next_deadline(now, step, start), now);
    }
}
