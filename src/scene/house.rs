use cgmath::Vector3;

use super::node::Node;
use super::part::Part;
use crate::picking::Aabb;

pub const HOUSE_WIDTH: f32 = 8.0;
pub const HOUSE_HEIGHT: f32 = 6.0;
pub const WALL_THICKNESS: f32 = 0.1;

const WALL_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// The static house structure the agent collides with.
///
/// Only the front wall matters to the core: it is either one solid panel
/// with the door rendered over it, or — once the door has been resized to
/// its maximum on both dimensions — four segments bordering a full-size
/// opening. The decorative roof, window and supports are content the
/// renderer owns and contribute nothing to collision.
pub struct House {
    node: Node,
    panels: Vec<Part>,
    cutout: bool,
}

impl House {
    pub fn new() -> Self {
        let mut house = Self {
            node: Node::new(Vector3::new(0.0, HOUSE_HEIGHT / 2.0, 0.0)),
            panels: Vec::new(),
            cutout: false,
        };
        house.build_solid_wall();
        house
    }

    /// Where the door's leaf center sits: the middle of the front wall,
    /// just proud of its surface.
    pub fn door_anchor(&self) -> Vector3<f32> {
        Vector3::new(0.0, HOUSE_HEIGHT / 2.0, WALL_THICKNESS / 2.0 + 0.01)
    }

    /// Rebuild the wall to match the door opening. A cutout is used only
    /// when the door has reached its maximum footprint; any smaller door
    /// sits in front of a single solid panel.
    pub fn regenerate_walls(&mut self, opening_width: f32, opening_height: f32, cutout: bool) {
        if cutout {
            self.build_cutout_wall(opening_width, opening_height);
        } else {
            self.build_solid_wall();
        }
        self.cutout = cutout;
    }

    fn build_solid_wall(&mut self) {
        self.panels.clear();
        self.panels.push(Part::new(
            "wall",
            Vector3::new(HOUSE_WIDTH, HOUSE_HEIGHT, WALL_THICKNESS),
            Vector3::new(0.0, 0.0, 0.0),
            WALL_COLOR,
        ));
    }

    /// Four segments around the opening. The door is vertically centered on
    /// the wall, so every border has nonzero thickness while the opening is
    /// smaller than the wall itself.
    fn build_cutout_wall(&mut self, opening_width: f32, opening_height: f32) {
        let side_width = (HOUSE_WIDTH - opening_width) / 2.0;
        let band_height = (HOUSE_HEIGHT - opening_height) / 2.0;
        let x_center = (opening_width + side_width) / 2.0;
        let y_center = (opening_height + band_height) / 2.0;

        self.panels.clear();
        self.panels.push(Part::new(
            "wall-left",
            Vector3::new(side_width, HOUSE_HEIGHT, WALL_THICKNESS),
            Vector3::new(-x_center, 0.0, 0.0),
            WALL_COLOR,
        ));
        self.panels.push(Part::new(
            "wall-right",
            Vector3::new(side_width, HOUSE_HEIGHT, WALL_THICKNESS),
            Vector3::new(x_center, 0.0, 0.0),
            WALL_COLOR,
        ));
        self.panels.push(Part::new(
            "wall-top",
            Vector3::new(opening_width, band_height, WALL_THICKNESS),
            Vector3::new(0.0, y_center, 0.0),
            WALL_COLOR,
        ));
        self.panels.push(Part::new(
            "wall-bottom",
            Vector3::new(opening_width, band_height, WALL_THICKNESS),
            Vector3::new(0.0, -y_center, 0.0),
            WALL_COLOR,
        ));
    }

    pub fn is_cutout(&self) -> bool {
        self.cutout
    }

    pub fn panels(&self) -> &[Part] {
        &self.panels
    }

    /// World bounds of the wall, recomputed from the current panels on
    /// every call. A resize may have regenerated the wall since the last
    /// query, so nothing is cached.
    pub fn world_aabb(&self) -> Aabb {
        let world = self.node.local_matrix();
        let mut bounds: Option<Aabb> = None;
        for panel in &self.panels {
            let aabb = panel.world_aabb(&world);
            bounds = Some(match bounds {
                Some(b) => b.union(&aabb),
                None => aabb,
            });
        }
        // A house always has at least one panel
        bounds.unwrap_or(Aabb::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0)))
    }
}

impl Default for House {
    fn default() -> Self {
        Self::new()
    }
}
