// src/lib.rs
//! Doorstep
//!
//! A first-person walkthrough of a fenced yard with an interactive door,
//! built on winit and cgmath. Walk with WASD and pointer look, drag the
//! door handle to swing it open, drag the frame slats to resize it; the
//! house wall follows the opening. Rendering is an external collaborator
//! that consumes the scene's bounding geometry.

pub mod app;
pub mod camera;
pub mod collision;
pub mod interaction;
pub mod picking;
pub mod scene;

// Re-export main types for convenience
pub use app::DoorstepApp;

/// Creates a default Doorstep application instance
pub fn default() -> anyhow::Result<DoorstepApp> {
    Ok(DoorstepApp::new()?)
}
