//! # Scene Entities
//!
//! The entity layer the interaction core manipulates: a transform-tree
//! node type, box-shaped interactive parts, the door and house entities,
//! the yard bounds and the decorative prop animation. Entities own their
//! parts outright; the renderer is an external consumer of their bounding
//! geometry.

pub mod animation;
pub mod door;
pub mod highlight;
pub mod house;
pub mod node;
pub mod part;
pub mod scene;
pub mod yard;

// Re-export main types
pub use door::{Door, DoorDimension};
pub use house::House;
pub use node::Node;
pub use part::Part;
pub use scene::Scene;
pub use yard::Yard;
