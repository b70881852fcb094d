//! # Ray Casting and Bounding Geometry
//!
//! This module provides the geometry-query substrate used by the interaction
//! layer: rays cast from the camera through the pointer, axis-aligned
//! bounding boxes for hit tests and collision, and the fixed plane the
//! resize gesture projects onto.
//!
//! ## How it works
//!
//! 1. **Pointer to NDC**: Convert viewport pixel coordinates to normalized
//!    device coordinates (-1 to 1)
//! 2. **NDC to Ray**: Unproject through the inverse view-projection matrix
//!    to get a world-space ray
//! 3. **Intersection**: Test the ray against part bounding boxes (slab
//!    method) or against the resize plane

use cgmath::{ElementWise, InnerSpace, Matrix4, SquareMatrix, Vector2, Vector3, Vector4, Zero};

use crate::camera::first_person::FirstPersonCamera;
use crate::camera::Camera;

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vector3<f32>,
    /// Maximum corner of the bounding box
    pub max: Vector3<f32>,
}

impl Aabb {
    /// Create a new AABB
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Create an AABB from a center point and half-extents
    pub fn from_center_half_extents(center: Vector3<f32>, half_extents: Vector3<f32>) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Create an AABB enclosing a set of points
    pub fn from_points(points: &[Vector3<f32>]) -> Self {
        if points.is_empty() {
            return Self::new(Vector3::zero(), Vector3::zero());
        }

        let mut min = points[0];
        let mut max = points[0];

        for p in points.iter().skip(1) {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Self::new(min, max)
    }

    /// Smallest box enclosing both `self` and `other`
    pub fn union(&self, other: &Aabb) -> Self {
        Self::new(
            Vector3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            Vector3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        )
    }

    /// Box-box overlap test. Touching boxes count as overlapping.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Test ray-AABB intersection (slab method)
    /// Returns the distance to intersection point, or None if no intersection
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let t1 = Vector3::new(
            t_min.x.min(t_max.x),
            t_min.y.min(t_max.y),
            t_min.z.min(t_max.z),
        );
        let t2 = Vector3::new(
            t_min.x.max(t_max.x),
            t_min.y.max(t_max.y),
            t_min.z.max(t_max.z),
        );

        let t_near = t1.x.max(t1.y.max(t1.z));
        let t_far = t2.x.min(t2.y.min(t2.z));

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }

    /// Apply a transformation matrix to the AABB
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        // Transform all 8 corners and compute new bounds
        let corners = [
            Vector3::new(self.min.x, self.min.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.min.z),
            Vector3::new(self.min.x, self.max.y, self.min.z),
            Vector3::new(self.min.x, self.min.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.max.z),
            Vector3::new(self.min.x, self.max.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.max.z),
        ];

        let mut transformed = Vec::with_capacity(8);
        for corner in &corners {
            let homogeneous = Vector4::new(corner.x, corner.y, corner.z, 1.0);
            let t = matrix * homogeneous;
            transformed.push(Vector3::new(t.x / t.w, t.y / t.w, t.z / t.w));
        }

        Self::from_points(&transformed)
    }
}

/// An infinite plane in constant-normal form: `normal . p + constant = 0`
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    pub normal: Vector3<f32>,
    pub constant: f32,
}

impl Plane {
    pub fn new(normal: Vector3<f32>, constant: f32) -> Self {
        Self {
            normal: normal.normalize(),
            constant,
        }
    }

    /// Intersect a ray with the plane, returning the world-space hit point.
    /// Rays parallel to the plane or pointing away from it return None.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<Vector3<f32>> {
        let denominator = self.normal.dot(ray.direction);
        if denominator.abs() < f32::EPSILON {
            return None;
        }

        let t = -(self.normal.dot(ray.origin) + self.constant) / denominator;
        if t < 0.0 {
            return None;
        }

        Some(ray.point_at(t))
    }
}

/// Result of a ray test against an interactive surface
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    /// Distance from ray origin to intersection point
    pub distance: f32,
    /// World space intersection point
    pub point: Vector3<f32>,
}

/// Convert viewport pixel coordinates to normalized device coordinates.
///
/// Matches the usual screen convention: x right, y down in pixels; the
/// returned NDC has y up, both axes in -1 to 1.
pub fn ndc_from_viewport(position: (f32, f32), viewport: (f32, f32)) -> Vector2<f32> {
    let (x, y) = position;
    let (width, height) = viewport;
    Vector2::new((2.0 * x) / width - 1.0, 1.0 - (2.0 * y) / height)
}

/// Cast a ray from the camera through a normalized device coordinate.
pub fn screen_to_ray(ndc: Vector2<f32>, camera: &FirstPersonCamera) -> Ray {
    let view_proj = camera.build_view_projection_matrix();
    let inv_view_proj = view_proj.invert().unwrap_or(Matrix4::from_scale(1.0));

    // Unproject a point on the near plane and one on the far plane
    let near_point = Vector4::new(ndc.x, ndc.y, -1.0, 1.0);
    let far_point = Vector4::new(ndc.x, ndc.y, 1.0, 1.0);

    let world_near = inv_view_proj * near_point;
    let world_far = inv_view_proj * far_point;

    let near_3d = Vector3::new(
        world_near.x / world_near.w,
        world_near.y / world_near.w,
        world_near.z / world_near.w,
    );
    let far_3d = Vector3::new(
        world_far.x / world_far.w,
        world_far.y / world_far.w,
        world_far.z / world_far.w,
    );

    Ray::new(near_3d, far_3d - near_3d)
}
