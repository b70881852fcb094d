//! # Application Shell
//!
//! The winit plumbing around the interaction core: window lifecycle, event
//! routing into the dispatcher, the engaged-mode pointer grab, and the
//! per-frame tick driven by redraw requests. Rendering itself is an
//! external concern; the shell only keeps the scene state settled for
//! whoever draws it.

use std::sync::Arc;
use std::time::Instant;

use log::{error, info, warn};
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowAttributes},
};

use crate::interaction::{PointerTarget, SceneDispatcher};
use crate::picking::ndc_from_viewport;
use crate::scene::Scene;

/// Errors surfaced by the application shell. Everything below the shell is
/// policy, not failure, and never errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

pub struct DoorstepApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    scene: Scene,
    dispatcher: SceneDispatcher,
    viewport: (f32, f32),
    last_frame: Option<Instant>,
}

impl DoorstepApp {
    /// Create a new Doorstep application with the default scene
    pub fn new() -> Result<Self, AppError> {
        let event_loop = EventLoop::new()?;

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                scene: Scene::new(1200.0 / 800.0),
                dispatcher: SceneDispatcher::new(),
                viewport: (1200.0, 800.0),
                last_frame: None,
            },
        })
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) -> Result<(), AppError> {
        let _ = env_logger::try_init();
        info!("starting doorstep");

        let event_loop = self.event_loop.take().expect("Event loop already consumed");
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self.app_state)?;

        Ok(())
    }
}

impl AppState {
    /// Enter or leave first-person mode, keeping the OS pointer grab in
    /// step with the dispatcher's engaged flag. Grab failure leaves the
    /// app in browse mode rather than half-engaged.
    fn set_engaged(&mut self, engaged: bool) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        if engaged {
            let grabbed = window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
            match grabbed {
                Ok(()) => {
                    window.set_cursor_visible(false);
                    self.dispatcher.set_engaged(true);
                }
                Err(err) => warn!("pointer grab unavailable: {err}"),
            }
        } else {
            if let Err(err) = window.set_cursor_grab(CursorGrabMode::None) {
                warn!("failed to release pointer grab: {err}");
            }
            window.set_cursor_visible(true);
            self.dispatcher.set_engaged(false);
        }
    }

    fn apply_cursor(&self) {
        if let Some(window) = self.window.as_ref() {
            window.set_cursor(self.dispatcher.cursor());
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match event_loop.create_window(
            WindowAttributes::default()
                .with_title("doorstep")
                .with_inner_size(winit::dpi::LogicalSize::new(1200, 800)),
        ) {
            Ok(window) => {
                let window_handle = Arc::new(window);
                let (width, height): (u32, u32) = window_handle.inner_size().into();
                self.viewport = (width as f32, height as f32);
                self.scene.camera.resize_projection(width, height);
                self.window = Some(window_handle);
                info!("window created at {width}x{height}");
            }
            Err(err) => error!("failed to create window: {err}"),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        if self.window.is_none() {
            return;
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state,
                        ..
                    },
                ..
            } => {
                let pressed = state == ElementState::Pressed;
                if matches!(key_code, KeyCode::Escape) {
                    if pressed {
                        if self.dispatcher.is_engaged() {
                            self.set_engaged(false);
                        } else {
                            self.dispatcher.destroy(&mut self.scene);
                            event_loop.exit();
                        }
                    }
                } else {
                    self.dispatcher.on_key(key_code, pressed);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let ndc = ndc_from_viewport(
                    (position.x as f32, position.y as f32),
                    self.viewport,
                );
                self.dispatcher.on_pointer_move(&mut self.scene, ndc);
                self.apply_cursor();
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                match state {
                    ElementState::Pressed => {
                        if self.dispatcher.is_engaged() {
                            self.set_engaged(false);
                        } else if self.dispatcher.on_pointer_down(&mut self.scene)
                            == PointerTarget::Miss
                        {
                            // Nothing interactive under the pointer: the
                            // click claims the pointer for look control
                            self.set_engaged(true);
                        }
                    }
                    ElementState::Released => {
                        self.dispatcher.on_pointer_up(&mut self.scene);
                    }
                }
                self.apply_cursor();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if width > 0 && height > 0 {
                    self.viewport = (width as f32, height as f32);
                    self.scene.camera.resize_projection(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                self.dispatcher.destroy(&mut self.scene);
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let delta_time = self
                    .last_frame
                    .map(|last| (now - last).as_secs_f32())
                    .unwrap_or(1.0 / 60.0);
                self.last_frame = Some(now);

                self.dispatcher.update(&mut self.scene, delta_time);
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.dispatcher.on_look(&mut self.scene, delta);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
