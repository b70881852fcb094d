//! # Collision Engine
//!
//! A discrete "would this position be valid" test: the agent's box must
//! not overlap the house and must stay inside the fenced yard. There is no
//! sweeping — callers probe each axis of motion separately to get sliding
//! behavior along blocked walls.

use cgmath::Vector3;

use crate::picking::Aabb;
use crate::scene::house::House;
use crate::scene::yard::Yard;

/// Pure collision queries against the static scene
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionWorld {
    pub yard: Yard,
}

impl CollisionWorld {
    pub fn new(yard: Yard) -> Self {
        Self { yard }
    }

    /// True if an agent box centered at `center` is a valid position:
    /// outside the house and inside the fence margin on both horizontal
    /// axes. The house bounds are recomputed on every call because a door
    /// resize may have regenerated the wall since the last query.
    pub fn test_agent_position(
        &self,
        house: &House,
        center: Vector3<f32>,
        half_extents: Vector3<f32>,
    ) -> bool {
        let agent = Aabb::from_center_half_extents(center, half_extents);
        let obstacle = house.world_aabb();

        if agent.intersects(&obstacle) {
            return false;
        }

        // Fence bounds, checked per horizontal axis with the footprint
        // radius so the agent's edge, not its center, stays inside
        let limit = self.yard.usable_half_side();
        let radius = half_extents.x;

        if center.x - radius < -limit || center.x + radius > limit {
            return false;
        }
        if center.z - radius < -limit || center.z + radius > limit {
            return false;
        }

        true
    }
}
