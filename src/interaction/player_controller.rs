//! # First-Person Movement
//!
//! Converts key intents and pointer-look into camera motion, resolved one
//! horizontal axis at a time through the collision engine so the agent
//! slides along walls instead of sticking to them.

use cgmath::{InnerSpace, Vector2, Vector3};
use log::debug;
use winit::keyboard::KeyCode;

use crate::camera::first_person::FirstPersonCamera;
use crate::collision::CollisionWorld;
use crate::scene::house::House;

/// The viewpoint's fixed height above the ground
pub const EYE_HEIGHT: f32 = 1.7;

/// Movement tuning, public so callers can adjust feel
#[derive(Debug, Clone, Copy)]
pub struct MovementSettings {
    /// World units per frame at full intent
    pub move_speed: f32,
    /// Radians of look per pointer count
    pub mouse_sensitivity: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            move_speed: 0.1,
            mouse_sensitivity: 0.002,
        }
    }
}

pub struct PlayerController {
    pub settings: MovementSettings,
    engaged: bool,
    move_forward: bool,
    move_backward: bool,
    move_left: bool,
    move_right: bool,
    /// Half-extents of the agent's collision box (a 0.5 x 1.7 x 0.5 body)
    half_extents: Vector3<f32>,
}

impl PlayerController {
    pub fn new(settings: MovementSettings) -> Self {
        Self {
            settings,
            engaged: false,
            move_forward: false,
            move_backward: false,
            move_left: false,
            move_right: false,
            half_extents: Vector3::new(0.25, 0.85, 0.25),
        }
    }

    pub fn process_keyboard(&mut self, key_code: KeyCode, pressed: bool) {
        match key_code {
            KeyCode::KeyW => self.move_forward = pressed,
            KeyCode::KeyS => self.move_backward = pressed,
            KeyCode::KeyA => self.move_left = pressed,
            KeyCode::KeyD => self.move_right = pressed,
            _ => (),
        }
    }

    /// Relative pointer motion while engaged turns the camera
    pub fn process_mouse_motion(&mut self, camera: &mut FirstPersonCamera, delta: (f64, f64)) {
        if !self.engaged {
            return;
        }
        camera.add_look(
            delta.0 as f32 * self.settings.mouse_sensitivity,
            delta.1 as f32 * self.settings.mouse_sensitivity,
        );
    }

    /// Engaging routes pointer motion to look; disengaging also drops any
    /// held movement intent, the only cancellation path there is.
    pub fn set_engaged(&mut self, engaged: bool) {
        if self.engaged != engaged {
            debug!("first-person mode {}", if engaged { "engaged" } else { "released" });
        }
        self.engaged = engaged;
        if !engaged {
            self.move_forward = false;
            self.move_backward = false;
            self.move_left = false;
            self.move_right = false;
        }
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    pub fn half_extents(&self) -> Vector3<f32> {
        self.half_extents
    }

    /// Per-frame movement resolution. Lateral and forward components are
    /// applied and collision-tested separately; a blocked axis reverts
    /// alone, so motion continues along the other (wall sliding).
    pub fn update(
        &mut self,
        camera: &mut FirstPersonCamera,
        collision: &CollisionWorld,
        house: &House,
    ) {
        if !self.engaged {
            return;
        }

        let mut direction = Vector2::new(
            (self.move_left as i32 - self.move_right as i32) as f32,
            (self.move_forward as i32 - self.move_backward as i32) as f32,
        );
        if direction.magnitude2() > 0.0 {
            direction = direction.normalize();
        }

        let lateral_speed = direction.x * self.settings.move_speed;
        let forward_speed = direction.y * self.settings.move_speed;

        // Camera-local axes; the lateral axis is horizontal even when the
        // view is pitched
        let forward = camera.forward();
        let lateral_axis = camera.up.cross(forward).normalize();

        let mut position = camera.position;

        let lateral_step = position + lateral_axis * lateral_speed;
        if collision.test_agent_position(house, lateral_step, self.half_extents) {
            position = lateral_step;
        }

        let forward_step = position + forward * forward_speed;
        if collision.test_agent_position(house, forward_step, self.half_extents) {
            position = forward_step;
        }

        // Vertical input never exists; pin the eye height every frame
        position.y = EYE_HEIGHT;
        camera.position = position;
    }
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new(MovementSettings::default())
    }
}
