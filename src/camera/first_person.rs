use cgmath::{perspective, EuclideanSpace, InnerSpace, Matrix4, Point3, Rad, Vector3};

use super::Camera;

/// Pitch is kept strictly inside the poles so the look direction never
/// becomes parallel to the world up axis.
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - f32::EPSILON;

/// First-person viewpoint: a world position with yaw/pitch look angles.
///
/// Yaw 0 / pitch 0 looks down negative Z. The projection parameters exist
/// only so pointer rays can be unprojected through the same matrix a
/// renderer would use.
#[derive(Debug, Clone, Copy)]
pub struct FirstPersonCamera {
    pub position: Vector3<f32>,
    pub yaw: f32,
    pub pitch: f32,
    pub up: Vector3<f32>,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera for FirstPersonCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.position);
        let view = Matrix4::look_to_rh(eye, self.forward(), self.up);
        let proj = perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl FirstPersonCamera {
    pub fn new(position: Vector3<f32>, aspect: f32) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            up: Vector3::unit_y(),
            aspect,
            fovy: Rad(std::f32::consts::PI / 4.0),
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    /// The normalized look direction derived from yaw and pitch.
    pub fn forward(&self) -> Vector3<f32> {
        Vector3::new(
            -self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Accumulate relative pointer motion into the look angles.
    ///
    /// Deltas are expected pre-scaled by the caller's sensitivity. Positive
    /// dx looks right, positive dy looks down, matching raw pointer motion.
    pub fn add_look(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx;
        self.pitch = (self.pitch - dy).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_default_looks_down_negative_z() {
        let camera = FirstPersonCamera::new(Vector3::new(0.0, 1.7, 0.0), 1.0);
        let forward = camera.forward();
        assert!(forward.x.abs() < 1e-6);
        assert!(forward.y.abs() < 1e-6);
        assert!((forward.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_pitch_clamped_at_poles() {
        let mut camera = FirstPersonCamera::new(Vector3::new(0.0, 1.7, 0.0), 1.0);
        camera.add_look(0.0, -10.0);
        assert!(camera.pitch <= PITCH_LIMIT);
        camera.add_look(0.0, 20.0);
        assert!(camera.pitch >= -PITCH_LIMIT);

        // Even fully pitched, forward never degenerates to a zero vector
        let forward = camera.forward();
        assert!(forward.magnitude() > 0.9);
    }

    #[test]
    fn test_yaw_turns_left_for_negative_dx() {
        let mut camera = FirstPersonCamera::new(Vector3::new(0.0, 1.7, 0.0), 1.0);
        camera.add_look(-std::f32::consts::FRAC_PI_2, 0.0);
        let forward = camera.forward();
        // Quarter turn from -Z lands on -X
        assert!((forward.x + 1.0).abs() < 1e-6);
        assert!(forward.z.abs() < 1e-6);
    }
}
