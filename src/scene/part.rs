use cgmath::{Matrix4, Vector3};

use super::highlight::Tintable;
use crate::picking::{Aabb, Hit, Ray};

/// A box-shaped interactive surface belonging to a scene entity.
///
/// Parts carry no vertex data; they are the bounding geometry and hit-test
/// surface a renderer would dress up. Each part is owned by exactly one
/// entity and positioned by a local offset inside that entity's node.
#[derive(Debug, Clone)]
pub struct Part {
    pub label: &'static str,
    /// Full extents of the box
    pub size: Vector3<f32>,
    /// Center offset in the owning node's local space
    pub offset: Vector3<f32>,
    base_color: [f32; 3],
    tint: Option<[f32; 3]>,
}

impl Part {
    pub fn new(
        label: &'static str,
        size: Vector3<f32>,
        offset: Vector3<f32>,
        base_color: [f32; 3],
    ) -> Self {
        Self {
            label,
            size,
            offset,
            base_color,
            tint: None,
        }
    }

    /// Bounding box in the owning node's local space
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_center_half_extents(self.offset, self.size / 2.0)
    }

    /// Bounding box in world space, given the owning node's current matrix.
    /// Recomputed on every call; never cached across frames.
    pub fn world_aabb(&self, node_world: &Matrix4<f32>) -> Aabb {
        self.local_aabb().transform(node_world)
    }

    /// Ray test against the part's world-space bounds
    pub fn intersect_ray(&self, node_world: &Matrix4<f32>, ray: &Ray) -> Option<Hit> {
        self.world_aabb(node_world).intersect_ray(ray).map(|distance| Hit {
            distance,
            point: ray.point_at(distance),
        })
    }
}

impl Tintable for Part {
    fn base_color(&self) -> [f32; 3] {
        self.base_color
    }

    fn color(&self) -> [f32; 3] {
        self.tint.unwrap_or(self.base_color)
    }

    fn set_tint(&mut self, color: [f32; 3]) {
        self.tint = Some(color);
    }

    fn clear_tint(&mut self) {
        self.tint = None;
    }
}
