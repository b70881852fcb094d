//! # Door Entity
//!
//! The door is two subtrees: a rotating pivot that owns the leaf body and
//! the handle, and a static node that owns the four frame slats. The pivot
//! sits at the leaf's left edge, so rotation swings the leaf about its
//! hinge, and every resize recomputes the pivot offset so the hinge stays
//! put while the leaf grows or shrinks to the right.

use cgmath::{Rad, Vector3};

use super::highlight::HANDLE_BASE_COLOR;
use super::node::Node;
use super::part::Part;
use crate::picking::{Hit, Ray};

/// Smallest size either dimension may reach
pub const MIN_DOOR_SIZE: f32 = 0.5;
/// Largest width the wall opening supports
pub const MAX_DOOR_WIDTH: f32 = 3.6;
/// Largest height the wall opening supports
pub const MAX_DOOR_HEIGHT: f32 = 4.2;
/// How far the door swings open, in radians
pub const MAX_OPEN_ANGLE: f32 = 0.8 * std::f32::consts::PI;
/// Rotation magnitude above which the door counts as open
pub const OPEN_EPSILON: f32 = 1e-3;

const DOOR_THICKNESS: f32 = 0.1;
/// Gap between the leaf body and the opening on every side
const BODY_GAP: f32 = 0.05;
const FRAME_WIDTH: f32 = 0.2;
const FRAME_THICKNESS: f32 = 0.05;
/// Handle placement as a fraction of the width, measured from the hinge
const HANDLE_HINGE_RATIO: f32 = 0.9;

const FRAME_COLOR: [f32; 3] = [0.427, 0.298, 0.255];

/// Which door dimension a resize gesture drags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorDimension {
    Width,
    Height,
}

impl DoorDimension {
    /// Per-dimension maximum size
    pub fn max_size(self) -> f32 {
        match self {
            DoorDimension::Width => MAX_DOOR_WIDTH,
            DoorDimension::Height => MAX_DOOR_HEIGHT,
        }
    }
}

pub struct Door {
    width: f32,
    height: f32,
    rotation: f32,
    /// Center of the closed leaf on the wall, in world space
    position: Vector3<f32>,
    /// Hinge node; owns the leaf body and the handle
    pivot: Node,
    body: Part,
    handle: Part,
    /// Static node; owns the frame slats, which never swing with the leaf
    frame_node: Node,
    frame: Vec<Part>,
}

impl Door {
    pub fn new(position: Vector3<f32>) -> Self {
        let mut door = Self {
            width: 2.0,
            height: 3.0,
            rotation: 0.0,
            position,
            pivot: Node::new(position),
            body: Part::new(
                "door-body",
                Vector3::new(1.0, 1.0, DOOR_THICKNESS),
                Vector3::new(0.0, 0.0, 0.0),
                HANDLE_BASE_COLOR,
            ),
            handle: Part::new(
                "door-handle",
                Vector3::new(0.2, 0.2, 0.3),
                Vector3::new(0.0, 0.0, 0.0),
                HANDLE_BASE_COLOR,
            ),
            frame_node: Node::new(position),
            frame: Vec::new(),
        };
        door.rebuild();
        door
    }

    /// Recompute all derived geometry from the current width and height.
    /// The hinge stays at the leaf's left edge; the leaf hangs off the
    /// pivot toward +X.
    fn rebuild(&mut self) {
        self.pivot.translation = self.position + Vector3::new(-self.width / 2.0, 0.0, 0.0);
        self.pivot.rotation_y = Rad(self.rotation);

        self.body.size = Vector3::new(
            self.width - 2.0 * BODY_GAP,
            self.height - 2.0 * BODY_GAP,
            DOOR_THICKNESS,
        );
        self.body.offset = Vector3::new(self.width / 2.0, 0.0, 0.0);

        self.handle.offset =
            Vector3::new(self.width * HANDLE_HINGE_RATIO, 0.0, DOOR_THICKNESS);

        self.frame_node.translation = self.position;
        self.rebuild_frame();
    }

    fn rebuild_frame(&mut self) {
        let total_width = self.width + FRAME_WIDTH * 2.0;
        let z_offset = -FRAME_THICKNESS / 2.0;

        let horizontal = Vector3::new(total_width, FRAME_WIDTH, FRAME_THICKNESS);
        let vertical = Vector3::new(FRAME_WIDTH, self.height, FRAME_THICKNESS);
        let y_edge = self.height / 2.0 + FRAME_WIDTH / 2.0;
        let x_edge = self.width / 2.0 + FRAME_WIDTH / 2.0;

        self.frame.clear();
        self.frame.push(Part::new(
            "frame-top",
            horizontal,
            Vector3::new(0.0, y_edge, z_offset),
            FRAME_COLOR,
        ));
        self.frame.push(Part::new(
            "frame-bottom",
            horizontal,
            Vector3::new(0.0, -y_edge, z_offset),
            FRAME_COLOR,
        ));
        self.frame.push(Part::new(
            "frame-left",
            vertical,
            Vector3::new(-x_edge, 0.0, z_offset),
            FRAME_COLOR,
        ));
        self.frame.push(Part::new(
            "frame-right",
            vertical,
            Vector3::new(x_edge, 0.0, z_offset),
            FRAME_COLOR,
        ));
    }

    pub fn set_rotation(&mut self, angle: f32) {
        self.rotation = angle;
        self.pivot.rotation_y = Rad(angle);
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn max_open_angle(&self) -> f32 {
        MAX_OPEN_ANGLE
    }

    /// Apply an already-clamped size to one dimension and rebuild the
    /// dependent geometry: leaf body, handle placement, frame slats and the
    /// pivot offset that keeps the hinge fixed.
    pub fn resize(&mut self, dimension: DoorDimension, size: f32) {
        match dimension {
            DoorDimension::Width => self.width = size,
            DoorDimension::Height => self.height = size,
        }
        self.rebuild();
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    /// World X of the hinge; stable across resizes
    pub fn hinge_x(&self) -> f32 {
        self.pivot.translation.x
    }

    /// True when both dimensions have reached their maxima and the wall
    /// should carry a full-size cutout
    pub fn at_max_size(&self) -> bool {
        self.width >= MAX_DOOR_WIDTH && self.height >= MAX_DOOR_HEIGHT
    }

    /// The leaf body surface; not interactive, exposed for rendering
    pub fn body(&self) -> &Part {
        &self.body
    }

    pub fn handle(&self) -> &Part {
        &self.handle
    }

    pub fn handle_mut(&mut self) -> &mut Part {
        &mut self.handle
    }

    pub fn frame_parts(&self) -> &[Part] {
        &self.frame
    }

    /// Ray test against the handle surface
    pub fn intersect_handle(&self, ray: &Ray) -> Option<Hit> {
        self.handle.intersect_ray(&self.pivot.local_matrix(), ray)
    }

    /// Ray test against the frame slats; returns the closest hit slat
    pub fn intersect_frame(&self, ray: &Ray) -> Option<(usize, Hit)> {
        let world = self.frame_node.local_matrix();
        let mut closest: Option<(usize, Hit)> = None;
        for (i, slat) in self.frame.iter().enumerate() {
            if let Some(hit) = slat.intersect_ray(&world, ray) {
                if closest
                    .as_ref()
                    .map_or(true, |(_, best)| hit.distance < best.distance)
                {
                    closest = Some((i, hit));
                }
            }
        }
        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;

    fn door() -> Door {
        Door::new(Vector3::new(0.0, 3.0, 0.06))
    }

    #[test]
    fn test_hinge_stays_fixed_across_resizes() {
        let mut door = door();
        let hinge_before = door.hinge_x();
        assert!((hinge_before + 1.0).abs() < 1e-6);

        door.resize(DoorDimension::Width, 3.0);
        // Hinge moves to the new left edge: still the leaf's left edge,
        // which for a centered opening shifts with the half-width
        assert!((door.hinge_x() + 1.5).abs() < 1e-6);

        // Rotation state survives a resize
        door.set_rotation(-1.0);
        door.resize(DoorDimension::Height, 4.0);
        assert!((door.rotation() + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_handle_tracks_width_proportionally() {
        let mut door = door();
        assert!((door.handle().offset.x - 1.8).abs() < 1e-6);

        door.resize(DoorDimension::Width, 3.0);
        assert!((door.handle().offset.x - 2.7).abs() < 1e-6);
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut door = door();
        door.resize(DoorDimension::Width, 2.5);
        let body_first = door.body().size;
        let hinge_first = door.hinge_x();

        door.resize(DoorDimension::Width, 2.5);
        assert_eq!(door.body().size, body_first);
        assert_eq!(door.hinge_x(), hinge_first);
    }

    #[test]
    fn test_at_max_size_needs_both_dimensions() {
        let mut door = door();
        assert!(!door.at_max_size());

        door.resize(DoorDimension::Width, MAX_DOOR_WIDTH);
        assert!(!door.at_max_size());

        door.resize(DoorDimension::Height, MAX_DOOR_HEIGHT);
        assert!(door.at_max_size());
    }

    #[test]
    fn test_frame_slat_aspect_identifies_dimension() {
        let door = door();
        let slats = door.frame_parts();

        // Horizontal slats are wider than tall; they drag the height
        assert!(slats[0].size.x > slats[0].size.y);
        assert!(slats[1].size.x > slats[1].size.y);
        // Vertical slats are taller than wide; they drag the width
        assert!(slats[2].size.x < slats[2].size.y);
        assert!(slats[3].size.x < slats[3].size.y);
    }

    #[test]
    fn test_handle_raycast_straight_on() {
        let door = door();
        // Handle sits right of center at 0.4 * width, on the door's face
        let ray = Ray::new(Vector3::new(0.8, 3.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(door.intersect_handle(&ray).is_some());

        // Swing the door open; the handle leaves the wall plane
        let mut open = Door::new(Vector3::new(0.0, 3.0, 0.06));
        open.set_rotation(-MAX_OPEN_ANGLE);
        assert!(open.intersect_handle(&ray).is_none());
    }

    #[test]
    fn test_frame_raycast_prefers_closest_slat() {
        let door = door();
        // Straight at the left slat center
        let x = -(door.width() / 2.0 + 0.1);
        let ray = Ray::new(Vector3::new(x, 3.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
        let (index, _) = door.intersect_frame(&ray).expect("slat hit");
        assert_eq!(door.frame_parts()[index].label, "frame-left");
    }
}
