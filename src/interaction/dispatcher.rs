//! # Interaction Dispatcher
//!
//! Routes pointer events to the right subsystem: rays are tested against
//! the door handle first, then the frame slats; hits drive the gesture
//! state machine, misses fall through to hover-cursor updates or reset the
//! interaction flag. Movement and look pass straight to the player
//! controller while first-person mode is engaged.

use cgmath::{Vector2, Vector3, Zero};
use winit::keyboard::KeyCode;
use winit::window::CursorIcon;

use super::door_controller::DoorController;
use super::player_controller::PlayerController;
use crate::collision::CollisionWorld;
use crate::picking::{screen_to_ray, Plane};
use crate::scene::door::DoorDimension;
use crate::scene::highlight::{
    lerp_color, pulse_intensity, Tintable, HANDLE_BASE_COLOR, HANDLE_HIGHLIGHT_COLOR,
};
use crate::scene::Scene;

/// What a pointer-down landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Handle,
    Frame,
    Miss,
}

pub struct SceneDispatcher {
    pub door_controller: DoorController,
    pub player_controller: PlayerController,
    collision: CollisionWorld,
    /// Fixed plane resize drags are projected onto: normal along the view
    /// axis, through the origin
    resize_plane: Plane,
    pulse_time: f32,
    cursor: CursorIcon,
    last_ndc: Vector2<f32>,
}

impl SceneDispatcher {
    pub fn new() -> Self {
        Self {
            door_controller: DoorController::new(),
            player_controller: PlayerController::default(),
            collision: CollisionWorld::default(),
            resize_plane: Plane::new(Vector3::unit_z(), 0.0),
            pulse_time: 0.0,
            cursor: CursorIcon::Default,
            last_ndc: Vector2::zero(),
        }
    }

    /// The cursor the window should currently show
    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    pub fn is_engaged(&self) -> bool {
        self.player_controller.is_engaged()
    }

    pub fn set_engaged(&mut self, engaged: bool) {
        self.player_controller.set_engaged(engaged);
    }

    pub fn on_key(&mut self, key_code: KeyCode, pressed: bool) {
        self.player_controller.process_keyboard(key_code, pressed);
    }

    /// Relative pointer motion; look input while engaged
    pub fn on_look(&mut self, scene: &mut Scene, delta: (f64, f64)) {
        self.player_controller
            .process_mouse_motion(&mut scene.camera, delta);
    }

    /// Pointer pressed at the last known position. Hit priority: handle,
    /// then frame; a miss clears the sticky interaction flag so the idle
    /// pulse can resume.
    pub fn on_pointer_down(&mut self, scene: &mut Scene) -> PointerTarget {
        if self.player_controller.is_engaged() {
            return PointerTarget::Miss;
        }

        let ray = screen_to_ray(self.last_ndc, &scene.camera);

        if scene.door.intersect_handle(&ray).is_some() {
            self.door_controller.start_rotating(&scene.door, self.last_ndc);
            self.cursor = CursorIcon::Grabbing;
            return PointerTarget::Handle;
        }

        if let Some((slat_index, _)) = scene.door.intersect_frame(&ray) {
            if self.door_controller.is_open(&scene.door) {
                self.cursor = CursorIcon::NotAllowed;
                return PointerTarget::Frame;
            }

            // The wider slat spans the opening and drags its height; the
            // narrow uprights drag the width
            let slat = &scene.door.frame_parts()[slat_index];
            let dimension = if slat.size.x > slat.size.y {
                DoorDimension::Height
            } else {
                DoorDimension::Width
            };
            self.door_controller
                .start_resizing(&scene.door, dimension, self.last_ndc);
            self.cursor = CursorIcon::Grabbing;
            return PointerTarget::Frame;
        }

        self.door_controller.reset_interaction();
        PointerTarget::Miss
    }

    /// Pointer moved to a new normalized device coordinate
    pub fn on_pointer_move(&mut self, scene: &mut Scene, ndc: Vector2<f32>) {
        self.last_ndc = ndc;
        if self.player_controller.is_engaged() {
            return;
        }

        if self.door_controller.is_dragging_handle() {
            self.door_controller.handle_drag(&mut scene.door, ndc.x);
        } else if self.door_controller.is_resizing() {
            let ray = screen_to_ray(ndc, &scene.camera);
            if let Some(point) = self.resize_plane.intersect_ray(&ray) {
                // Measure in the door's own frame so the wall placement
                // doesn't leak into the size math
                let anchor = scene.door.position();
                let local = Vector2::new(point.x - anchor.x, point.y - anchor.y);
                self.door_controller
                    .handle_resize(&mut scene.door, &mut scene.house, local);
            }
        } else {
            self.update_hover_cursor(scene);
        }
    }

    /// Pointer released: the only way a drag session ends
    pub fn on_pointer_up(&mut self, scene: &mut Scene) {
        if self.player_controller.is_engaged() {
            return;
        }
        self.door_controller.stop_dragging();
        self.cursor = CursorIcon::Default;
        scene.door.handle_mut().clear_tint();
    }

    /// Hit-test driven cursor feedback; mutates nothing but the cursor
    fn update_hover_cursor(&mut self, scene: &Scene) {
        let ray = screen_to_ray(self.last_ndc, &scene.camera);

        self.cursor = if scene.door.intersect_handle(&ray).is_some() {
            if self.door_controller.is_dragging_handle() {
                CursorIcon::Grabbing
            } else {
                CursorIcon::Grab
            }
        } else if scene.door.intersect_frame(&ray).is_some() {
            if self.door_controller.is_open(&scene.door) {
                CursorIcon::NotAllowed
            } else if self.door_controller.is_resizing() {
                CursorIcon::Grabbing
            } else {
                CursorIcon::Grab
            }
        } else {
            CursorIcon::Default
        };
    }

    /// Per-frame tick. Movement resolves first, then the idle pulse, so a
    /// frame's render always sees both settled.
    pub fn update(&mut self, scene: &mut Scene, delta_time: f32) {
        self.player_controller
            .update(&mut scene.camera, &self.collision, &scene.house);

        scene.update(delta_time);

        self.pulse_time += delta_time;
        self.update_handle_highlight(scene);
    }

    /// The handle pulses only while the door is closed, idle and has never
    /// been interacted with this session
    fn update_handle_highlight(&mut self, scene: &mut Scene) {
        if self.door_controller.is_open(&scene.door)
            || self.door_controller.is_dragging_handle()
            || self.door_controller.is_interacted()
        {
            scene.door.handle_mut().clear_tint();
            return;
        }

        let intensity = pulse_intensity(self.pulse_time);
        let color = lerp_color(HANDLE_BASE_COLOR, HANDLE_HIGHLIGHT_COLOR, intensity);
        scene.door.handle_mut().set_tint(color);
    }

    /// Teardown: end any drag, restore the handle to its resting color and
    /// drop out of first-person mode.
    pub fn destroy(&mut self, scene: &mut Scene) {
        self.door_controller.stop_dragging();
        self.player_controller.set_engaged(false);
        scene.door.handle_mut().clear_tint();
        self.cursor = CursorIcon::Default;
    }
}

impl Default for SceneDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
