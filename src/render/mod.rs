//! Rendering strategies a gallery can draw through.
//!
//! The strategy is picked once at construction from the resolved platform
//! and never swapped afterwards.

mod degraded;
mod scene;

pub use degraded::Degraded2D;
pub use scene::{Scene3D, SceneNode};

use crate::camera::Camera;
use crate::gallery::Image;
use crate::platform::Platform;

/// Opaque black.
pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Counts from the most recent frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frame: u64,
    pub drawn: usize,
    pub culled: usize,
}

pub trait RenderBackend {
    /// Insert a positioned, sized node for a newly accepted image.
    fn add_to_scene(&mut self, node: SceneNode);
    fn set_camera(&mut self, camera: &Camera);
    /// Draw one frame, syncing node transforms from `images`.
    fn render(&mut self, images: &[Image]) -> FrameStats;
}

pub enum Renderer {
    Rendered3D(Scene3D),
    Degraded2D(Degraded2D),
}

impl Renderer {
    pub fn for_platform(platform: Platform, width: u32, height: u32) -> Self {
        if platform.supports_3d() {
            Self::Rendered3D(Scene3D::new(width, height))
        } else {
            Self::Degraded2D(Degraded2D::new(width, height))
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded2D(_))
    }

    fn backend(&mut self) -> &mut dyn RenderBackend {
        match self {
            Self::Rendered3D(scene) => scene,
            Self::Degraded2D(display) => display,
        }
    }
}

impl RenderBackend for Renderer {
    fn add_to_scene(&mut self, node: SceneNode) {
        self.backend().add_to_scene(node);
    }

    fn set_camera(&mut self, camera: &Camera) {
        self.backend().set_camera(camera);
    }

    fn render(&mut self, images: &[Image]) -> FrameStats {
        self.backend().render(images)
    }
}
