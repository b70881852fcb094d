//! # Interaction Layer
//!
//! The three controllers that turn input events into scene mutation: the
//! door gesture state machine, the first-person movement controller and
//! the dispatcher that decides which of them a pointer event belongs to.

pub mod dispatcher;
pub mod door_controller;
pub mod player_controller;

// Re-export main types
pub use dispatcher::{PointerTarget, SceneDispatcher};
pub use door_controller::{DoorController, DragKind, DragSession};
pub use player_controller::{MovementSettings, PlayerController};
