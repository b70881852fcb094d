use cgmath::{Matrix4, Rad, Vector3, Zero};

/// A transform in the scene hierarchy: a translation plus a rotation about
/// the world Y axis.
///
/// Every rotatable subtree has exactly one owning pivot node; parts hang off
/// it through their local offsets, so there is no shared mutable transform
/// state anywhere in the scene.
#[derive(Debug, Clone, Copy)]
pub struct Node {
    pub translation: Vector3<f32>,
    pub rotation_y: Rad<f32>,
}

impl Node {
    pub fn new(translation: Vector3<f32>) -> Self {
        Self {
            translation,
            rotation_y: Rad(0.0),
        }
    }

    /// Local-to-world matrix. Rotation is applied before translation, so a
    /// pivot placed at a hinge rotates its children about that hinge.
    pub fn local_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.translation) * Matrix4::from_angle_y(self.rotation_y)
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new(Vector3::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    #[test]
    fn test_rotation_happens_about_the_node_origin() {
        let mut node = Node::new(Vector3::new(5.0, 0.0, 0.0));
        node.rotation_y = Rad(std::f32::consts::FRAC_PI_2);

        // A child one unit along +X swings to -Z of the pivot, not of the world
        let child = node.local_matrix() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!((child.x - 5.0).abs() < 1e-5);
        assert!((child.z + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_identity_by_default() {
        let node = Node::default();
        let p = node.local_matrix() * Vector4::new(1.0, 2.0, 3.0, 1.0);
        assert!((p.x - 1.0).abs() < 1e-6);
        assert!((p.y - 2.0).abs() < 1e-6);
        assert!((p.z - 3.0).abs() < 1e-6);
    }
}
