//! # Door Gesture State Machine
//!
//! Owns the drag session for the door: rotating the leaf by its handle or
//! resizing one dimension by a frame slat. Pointer deltas arrive in
//! normalized device coordinates; all clamping lives here so the door
//! entity only ever sees valid values.

use cgmath::Vector2;
use log::debug;

use crate::scene::door::{Door, DoorDimension, MIN_DOOR_SIZE, OPEN_EPSILON};
use crate::scene::house::House;

/// Raw rotation from a pointer-X delta, clamped so the door never swings
/// past fully open nor back through fully closed.
pub fn calculate_rotation_angle(drag_delta: f32, max_open_angle: f32, start_rotation: f32) -> f32 {
    let raw_angle = drag_delta * max_open_angle;
    clamp_rotation_angle(raw_angle, max_open_angle, start_rotation)
}

/// Clamp a rotation delta relative to the rotation at drag start: the
/// final angle `start_rotation + delta` always lands in
/// `[-max_angle, 0]`.
pub fn clamp_rotation_angle(angle: f32, max_angle: f32, start_rotation: f32) -> f32 {
    (-max_angle - start_rotation).max((-start_rotation).min(angle))
}

/// New door size from a resize-plane intersection projected onto the drag
/// axis, measured in the door's own frame
pub fn calculate_new_size(dimension: DoorDimension, point: Vector2<f32>) -> f32 {
    let coordinate = match dimension {
        DoorDimension::Width => point.x,
        DoorDimension::Height => point.y,
    };
    (coordinate * 2.0).abs()
}

pub fn clamp_size(size: f32, min: f32, max: f32) -> f32 {
    max.min(min.max(size))
}

/// What an active drag is doing
#[derive(Debug, Clone, Copy)]
pub enum DragKind {
    Rotate {
        /// Leaf rotation the moment the drag began
        start_rotation: f32,
    },
    Resize {
        dimension: DoorDimension,
    },
}

/// Transient record of an in-progress drag. At most one exists at a time;
/// starting a new drag replaces (and thereby ends) the old session.
#[derive(Debug, Clone, Copy)]
pub struct DragSession {
    pub kind: DragKind,
    /// Pointer NDC at drag start
    pub start: Vector2<f32>,
}

pub struct DoorController {
    session: Option<DragSession>,
    /// Sticky until reset: has the user dragged anything this session
    interacted: bool,
    rotate_sensitivity: f32,
}

impl DoorController {
    pub fn new() -> Self {
        Self {
            session: None,
            interacted: false,
            rotate_sensitivity: 1.0,
        }
    }

    /// Begin a handle drag, capturing the rotation it starts from
    pub fn start_rotating(&mut self, door: &Door, pointer: Vector2<f32>) {
        debug!("rotate drag started at ndc x {:.3}", pointer.x);
        self.session = Some(DragSession {
            kind: DragKind::Rotate {
                start_rotation: door.rotation(),
            },
            start: pointer,
        });
        self.interacted = true;
    }

    /// Begin a frame drag on one dimension. Refused while the door is
    /// open; the door must be closed flat before its opening can change.
    pub fn start_resizing(
        &mut self,
        door: &Door,
        dimension: DoorDimension,
        pointer: Vector2<f32>,
    ) -> bool {
        if self.is_open(door) {
            return false;
        }
        debug!("resize drag started on {:?}", dimension);
        self.session = Some(DragSession {
            kind: DragKind::Resize { dimension },
            start: pointer,
        });
        self.interacted = true;
        true
    }

    pub fn stop_dragging(&mut self) {
        if self.session.take().is_some() {
            debug!("drag ended");
        }
    }

    /// Feed pointer X to an active rotate drag
    pub fn handle_drag(&mut self, door: &mut Door, pointer_x: f32) {
        let Some(DragSession {
            kind: DragKind::Rotate { start_rotation },
            start,
        }) = self.session
        else {
            return;
        };

        let drag_delta = (pointer_x - start.x) * self.rotate_sensitivity;
        let clamped = calculate_rotation_angle(drag_delta, door.max_open_angle(), start_rotation);
        door.set_rotation(start_rotation + clamped);
    }

    /// Feed a resize-plane intersection (door-local coordinates) to an
    /// active resize drag. Every accepted resize also asks the house to
    /// bring its wall in line with the new opening.
    pub fn handle_resize(&mut self, door: &mut Door, house: &mut House, point: Vector2<f32>) {
        let Some(DragSession {
            kind: DragKind::Resize { dimension },
            ..
        }) = self.session
        else {
            return;
        };

        let size = clamp_size(
            calculate_new_size(dimension, point),
            MIN_DOOR_SIZE,
            dimension.max_size(),
        );
        door.resize(dimension, size);
        house.regenerate_walls(door.width(), door.height(), door.at_max_size());
    }

    /// Rotation magnitude over the threshold counts as open
    pub fn is_open(&self, door: &Door) -> bool {
        door.rotation().abs() > OPEN_EPSILON
    }

    pub fn is_dragging_handle(&self) -> bool {
        matches!(
            self.session,
            Some(DragSession {
                kind: DragKind::Rotate { .. },
                ..
            })
        )
    }

    pub fn is_resizing(&self) -> bool {
        matches!(
            self.session,
            Some(DragSession {
                kind: DragKind::Resize { .. },
                ..
            })
        )
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_interacted(&self) -> bool {
        self.interacted
    }

    pub fn reset_interaction(&mut self) {
        self.interacted = false;
    }
}

impl Default for DoorController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::door::{MAX_DOOR_WIDTH, MAX_OPEN_ANGLE};
    use cgmath::Vector3;

    fn door() -> Door {
        Door::new(Vector3::new(0.0, 3.0, 0.06))
    }

    fn house() -> House {
        House::new()
    }

    #[test]
    fn test_rotation_clamps_at_full_open() {
        let mut door = door();
        let mut controller = DoorController::new();

        controller.start_rotating(&door, Vector2::new(0.0, 0.0));
        // A huge leftward drag produces a raw angle of about -3.0
        controller.handle_drag(&mut door, -3.0 / MAX_OPEN_ANGLE);

        assert!((door.rotation() + MAX_OPEN_ANGLE).abs() < 1e-5);
    }

    #[test]
    fn test_rotation_never_reverses_past_closed() {
        let mut door = door();
        let mut controller = DoorController::new();

        controller.start_rotating(&door, Vector2::new(0.0, 0.0));
        controller.handle_drag(&mut door, 2.0);
        assert_eq!(door.rotation(), 0.0);
    }

    #[test]
    fn test_reopening_from_a_partially_open_start() {
        let mut door = door();
        let mut controller = DoorController::new();

        // First drag leaves the door half open
        controller.start_rotating(&door, Vector2::new(0.0, 0.0));
        controller.handle_drag(&mut door, -0.5);
        controller.stop_dragging();
        let half_open = door.rotation();
        assert!(half_open < 0.0 && half_open > -MAX_OPEN_ANGLE);

        // Second drag can close it fully but not push it positive
        controller.start_rotating(&door, Vector2::new(0.0, 0.0));
        controller.handle_drag(&mut door, 3.0);
        assert_eq!(door.rotation(), 0.0);

        // And from closed it can still swing all the way open again
        controller.handle_drag(&mut door, -3.0);
        assert!((door.rotation() + MAX_OPEN_ANGLE).abs() < 1e-5);
    }

    #[test]
    fn test_random_drag_sequences_stay_clamped() {
        use rand::Rng;
        let mut rng = rand::rng();

        let mut door = door();
        let mut controller = DoorController::new();

        for _ in 0..50 {
            controller.start_rotating(&door, Vector2::new(rng.random_range(-1.0..1.0), 0.0));
            for _ in 0..20 {
                controller.handle_drag(&mut door, rng.random_range(-2.0..2.0));
                assert!(door.rotation() <= 1e-6);
                assert!(door.rotation() >= -MAX_OPEN_ANGLE - 1e-6);
            }
            controller.stop_dragging();
        }
    }

    #[test]
    fn test_resize_clamps_to_dimension_maximum() {
        let mut door = door();
        let mut house = house();
        let mut controller = DoorController::new();

        controller.start_resizing(&door, DoorDimension::Width, Vector2::new(0.0, 0.0));
        // Requesting width 5.0 via a plane hit at x = 2.5
        controller.handle_resize(&mut door, &mut house, Vector2::new(2.5, 0.0));
        assert_eq!(door.width(), MAX_DOOR_WIDTH);
    }

    #[test]
    fn test_resize_clamps_to_minimum() {
        let mut door = door();
        let mut house = house();
        let mut controller = DoorController::new();

        controller.start_resizing(&door, DoorDimension::Height, Vector2::new(0.0, 0.0));
        controller.handle_resize(&mut door, &mut house, Vector2::new(0.0, 0.1));
        assert_eq!(door.height(), MIN_DOOR_SIZE);
    }

    #[test]
    fn test_resize_to_same_value_is_idempotent() {
        let mut door = door();
        let mut house = house();
        let mut controller = DoorController::new();

        controller.start_resizing(&door, DoorDimension::Width, Vector2::new(0.0, 0.0));
        controller.handle_resize(&mut door, &mut house, Vector2::new(1.4, 0.0));
        let width_first = door.width();
        let panels_first: Vec<_> =
            house.panels().iter().map(|p| (p.size, p.offset)).collect();

        controller.handle_resize(&mut door, &mut house, Vector2::new(1.4, 0.0));
        assert_eq!(door.width(), width_first);
        let panels_second: Vec<_> =
            house.panels().iter().map(|p| (p.size, p.offset)).collect();
        assert_eq!(panels_first, panels_second);
    }

    #[test]
    fn test_resize_at_both_maxima_cuts_the_wall_out() {
        let mut door = door();
        let mut house = house();
        let mut controller = DoorController::new();

        controller.start_resizing(&door, DoorDimension::Width, Vector2::new(0.0, 0.0));
        controller.handle_resize(&mut door, &mut house, Vector2::new(5.0, 0.0));
        assert!(!house.is_cutout());
        controller.stop_dragging();

        controller.start_resizing(&door, DoorDimension::Height, Vector2::new(0.0, 0.0));
        controller.handle_resize(&mut door, &mut house, Vector2::new(0.0, 5.0));
        assert!(house.is_cutout());
        assert_eq!(house.panels().len(), 4);

        // Shrinking either dimension reverts to a solid wall
        controller.handle_resize(&mut door, &mut house, Vector2::new(0.0, 1.0));
        assert!(!house.is_cutout());
        assert_eq!(house.panels().len(), 1);
    }

    #[test]
    fn test_resize_refused_while_open() {
        let mut door = door();
        let mut controller = DoorController::new();
        door.set_rotation(-0.5);

        assert!(!controller.start_resizing(&door, DoorDimension::Width, Vector2::new(0.0, 0.0)));
        assert!(controller.session().is_none());
    }

    #[test]
    fn test_tiny_rotation_does_not_count_as_open() {
        let mut door = door();
        let controller = DoorController::new();

        door.set_rotation(-0.0005);
        assert!(!controller.is_open(&door));
        door.set_rotation(-0.002);
        assert!(controller.is_open(&door));
    }

    #[test]
    fn test_only_one_session_exists_at_a_time() {
        let mut door = door();
        let mut controller = DoorController::new();

        controller.start_rotating(&door, Vector2::new(0.2, 0.0));
        assert!(controller.is_dragging_handle());

        // An overlapping down event replaces the session outright
        controller.start_resizing(&door, DoorDimension::Width, Vector2::new(0.0, 0.0));
        assert!(controller.is_resizing());
        assert!(!controller.is_dragging_handle());
        assert!(controller.session().is_some());
    }

    #[test]
    fn test_interacted_flag_is_sticky_until_reset() {
        let mut door = door();
        let mut controller = DoorController::new();
        assert!(!controller.is_interacted());

        controller.start_rotating(&door, Vector2::new(0.0, 0.0));
        controller.stop_dragging();
        assert!(controller.is_interacted());

        controller.reset_interaction();
        assert!(!controller.is_interacted());
    }

    #[test]
    fn test_drag_without_session_is_a_no_op() {
        let mut door = door();
        let mut house = house();
        let mut controller = DoorController::new();

        controller.handle_drag(&mut door, -1.0);
        assert_eq!(door.rotation(), 0.0);

        controller.handle_resize(&mut door, &mut house, Vector2::new(2.0, 0.0));
        assert_eq!(door.width(), 2.0);
    }
}
