use crate::camera::first_person::FirstPersonCamera;
use crate::interaction::player_controller::EYE_HEIGHT;
use cgmath::Vector3;

use super::animation::{AnimatedPositionable, OrbitAnimation, Prop};
use super::door::Door;
use super::house::House;
use super::yard::Yard;

/// The whole interactive scene: viewpoint, house with its door, yard
/// bounds and the decorative orbiters.
pub struct Scene {
    pub camera: FirstPersonCamera,
    pub house: House,
    pub door: Door,
    pub yard: Yard,
    pub props: [Prop; 2],
    orbit: OrbitAnimation,
}

impl Scene {
    /// Creates the default scene: agent standing in the yard facing the
    /// house front, door closed.
    pub fn new(aspect: f32) -> Self {
        let house = House::new();
        let door = Door::new(house.door_anchor());

        Self {
            camera: FirstPersonCamera::new(Vector3::new(0.0, EYE_HEIGHT, 8.0), aspect),
            house,
            door,
            yard: Yard::default(),
            props: [Prop::new(0.6), Prop::new(0.0)],
            orbit: OrbitAnimation::new(),
        }
    }

    /// Advance the decorative animation. Interaction and movement run in
    /// the dispatcher; this only moves content that never affects them.
    pub fn update(&mut self, delta_time: f32) {
        let [leader, follower] = &mut self.props;
        self.orbit.update(delta_time, leader, follower);
        for prop in &mut self.props {
            prop.update(delta_time);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_starts_closed_and_inside_the_yard() {
        let scene = Scene::new(1.5);
        assert_eq!(scene.door.rotation(), 0.0);
        assert!(!scene.house.is_cutout());
        assert!(scene.camera.position.z.abs() < scene.yard.usable_half_side());
    }

    #[test]
    fn test_update_moves_props() {
        let mut scene = Scene::new(1.5);
        let before = scene.props[0].node.translation;
        scene.update(0.5);
        assert_ne!(before, scene.props[0].node.translation);
    }
}
