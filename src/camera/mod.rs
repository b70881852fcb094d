pub mod first_person;

// Re-export main types
pub use first_person::FirstPersonCamera;

use cgmath::Matrix4;

pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}
