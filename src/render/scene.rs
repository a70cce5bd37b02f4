use glam::{Mat4, Vec2, Vec3};
use tracing::trace;

use crate::camera::Camera;
use crate::gallery::Image;

use super::{CLEAR_COLOR, FrameStats, RenderBackend};

/// A textured plane in the scene graph.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub id: usize,
    pub size: Vec2,
    pub position: Vec3,
    pub visible: bool,
    pub texture_size: (u32, u32),
}

/// Headless 3D scene: keeps the node graph and projects it through the
/// camera each frame.
#[derive(Debug)]
pub struct Scene3D {
    width: u32,
    height: u32,
    clear_color: [f32; 4],
    nodes: Vec<SceneNode>,
    view_proj: Mat4,
    frame: u64,
}

impl Scene3D {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            clear_color: CLEAR_COLOR,
            nodes: Vec::new(),
            view_proj: Camera::new(width, height).projection(),
            frame: 0,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    // Any part of the plane inside the clip volume counts as drawn.
    fn in_view(&self, node: &SceneNode) -> bool {
        let half = node.size / 2.0;
        let corners = [
            node.position + Vec3::new(-half.x, -half.y, 0.0),
            node.position + Vec3::new(half.x, -half.y, 0.0),
            node.position + Vec3::new(-half.x, half.y, 0.0),
            node.position + Vec3::new(half.x, half.y, 0.0),
        ];
        let ndc: Vec<Vec3> = corners
            .iter()
            .map(|c| self.view_proj * c.extend(1.0))
            .filter(|clip| clip.w > 0.0)
            .map(|clip| clip.truncate() / clip.w)
            .collect();
        if ndc.is_empty() {
            return false;
        }
        let min_x = ndc.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
        let max_x = ndc.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
        let min_y = ndc.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_y = ndc.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
        max_x >= -1.0 && min_x <= 1.0 && max_y >= -1.0 && min_y <= 1.0
    }
}

impl RenderBackend for Scene3D {
    fn add_to_scene(&mut self, node: SceneNode) {
        trace!(id = node.id, x = node.position.x, "scene node added");
        self.nodes.push(node);
    }

    fn set_camera(&mut self, camera: &Camera) {
        self.view_proj = camera.projection() * camera.view();
    }

    fn render(&mut self, images: &[Image]) -> FrameStats {
        for (node, img) in self.nodes.iter_mut().zip(images) {
            node.position = img.position;
            node.visible = img.visible;
        }
        let mut stats = FrameStats {
            frame: self.frame,
            ..FrameStats::default()
        };
        for node in self.nodes.iter().filter(|n| n.visible) {
            if self.in_view(node) {
                stats.drawn += 1;
            } else {
                stats.culled += 1;
            }
        }
        self.frame += 1;
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: usize, x: f32) -> SceneNode {
        SceneNode {
            id,
            size: Vec2::new(40.0, 30.0),
            position: Vec3::new(x, 0.0, 0.0),
            visible: true,
            texture_size: (40, 30),
        }
    }

    #[test]
    fn clears_to_opaque_black_at_requested_size() {
        let scene = Scene3D::new(640, 480);
        assert_eq!(scene.size(), (640, 480));
        assert_eq!(scene.clear_color(), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn culls_nodes_outside_the_frustum() {
        let mut scene = Scene3D::new(800, 600);
        scene.add_to_scene(node(0, 0.0));
        scene.add_to_scene(node(1, 10_000.0));
        scene.set_camera(&Camera::new(800, 600));
        let stats = scene.render(&[]);
        assert_eq!((stats.drawn, stats.culled), (1, 1));
        assert_eq!(scene.render(&[]).frame, 1);
    }
}
