//! Decorative prop animation: two bodies orbiting the yard center with an
//! eased vertical bob, half a turn apart.
//!
//! The animation drives anything that can be positioned; it dispatches
//! through the capability traits below rather than caring what kind of
//! body it is moving.

use cgmath::{Rad, Vector3};

use super::node::Node;

const ORBIT_SPEED: f32 = 2.0;
const ORBIT_RADIUS: f32 = 2.5;
const ORBIT_HEIGHT: f32 = 1.0;
const VERTICAL_SPEED: f32 = 1.0;
const VERTICAL_AMPLITUDE: f32 = 0.8;

/// Capability of a body that can be placed in the world
pub trait Positionable {
    fn set_position(&mut self, position: Vector3<f32>);
}

/// A positionable body that also advances internal animation state
pub trait AnimatedPositionable: Positionable {
    fn update(&mut self, delta_time: f32);
}

/// A decorative body: a transform and a self-spin rate, nothing more.
/// The renderer decides what it looks like.
#[derive(Debug, Clone, Copy)]
pub struct Prop {
    pub node: Node,
    pub spin_speed: f32,
}

impl Prop {
    pub fn new(spin_speed: f32) -> Self {
        Self {
            node: Node::default(),
            spin_speed,
        }
    }
}

impl Positionable for Prop {
    fn set_position(&mut self, position: Vector3<f32>) {
        self.node.translation = position;
    }
}

impl AnimatedPositionable for Prop {
    fn update(&mut self, delta_time: f32) {
        self.node.rotation_y += Rad(self.spin_speed * delta_time);
    }
}

/// Orbit driver for a pair of positionable bodies
pub struct OrbitAnimation {
    time: f32,
    vertical_time: f32,
}

impl OrbitAnimation {
    pub fn new() -> Self {
        Self {
            time: 0.0,
            vertical_time: 0.0,
        }
    }

    /// Smoothstep-like easing that lingers near the extremes
    fn cubic_bezier(t: f32) -> f32 {
        let (p0, p1, p2, p3) = (0.0, 0.05, 0.95, 1.0);
        let u = 1.0 - t;
        u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
    }

    fn vertical_offset(&self, phase_offset: f32) -> f32 {
        let phase = (self.vertical_time + phase_offset) % (2.0 * std::f32::consts::PI);
        let t = Self::cubic_bezier(phase.sin().abs());
        (t - 0.5) * VERTICAL_AMPLITUDE
    }

    /// Advance the orbit and reposition both bodies, half a turn apart
    pub fn update(
        &mut self,
        delta_time: f32,
        leader: &mut dyn Positionable,
        follower: &mut dyn Positionable,
    ) {
        self.time += ORBIT_SPEED * delta_time;
        self.vertical_time += VERTICAL_SPEED * delta_time;

        leader.set_position(Vector3::new(
            self.time.cos() * ORBIT_RADIUS,
            ORBIT_HEIGHT + self.vertical_offset(0.0),
            self.time.sin() * ORBIT_RADIUS,
        ));

        let opposite = self.time + std::f32::consts::PI;
        follower.set_position(Vector3::new(
            opposite.cos() * ORBIT_RADIUS,
            ORBIT_HEIGHT + self.vertical_offset(std::f32::consts::PI),
            opposite.sin() * ORBIT_RADIUS,
        ));
    }
}

impl Default for OrbitAnimation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    #[test]
    fn test_bodies_stay_on_the_orbit_radius() {
        let mut orbit = OrbitAnimation::new();
        let mut a = Prop::new(0.6);
        let mut b = Prop::new(0.0);

        for _ in 0..100 {
            orbit.update(0.016, &mut a, &mut b);
            let horizontal =
                cgmath::Vector2::new(a.node.translation.x, a.node.translation.z).magnitude();
            assert!((horizontal - ORBIT_RADIUS).abs() < 1e-3);
        }
    }

    #[test]
    fn test_bodies_are_half_a_turn_apart() {
        let mut orbit = OrbitAnimation::new();
        let mut a = Prop::new(0.0);
        let mut b = Prop::new(0.0);
        orbit.update(0.25, &mut a, &mut b);

        assert!((a.node.translation.x + b.node.translation.x).abs() < 1e-4);
        assert!((a.node.translation.z + b.node.translation.z).abs() < 1e-4);
    }

    #[test]
    fn test_vertical_bob_stays_within_amplitude() {
        let mut orbit = OrbitAnimation::new();
        let mut a = Prop::new(0.0);
        let mut b = Prop::new(0.0);

        for _ in 0..500 {
            orbit.update(0.016, &mut a, &mut b);
            assert!((a.node.translation.y - ORBIT_HEIGHT).abs() <= VERTICAL_AMPLITUDE / 2.0 + 1e-4);
        }
    }

    #[test]
    fn test_prop_spins_on_update() {
        let mut prop = Prop::new(0.5);
        prop.update(2.0);
        assert!((prop.node.rotation_y.0 - 1.0).abs() < 1e-6);
    }
}
