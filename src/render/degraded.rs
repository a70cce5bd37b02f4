use crate::camera::Camera;
use crate::gallery::Image;

use super::{FrameStats, RenderBackend, SceneNode};

/// Fallback display without a 3D context: shows the first image only.
#[derive(Debug)]
pub struct Degraded2D {
    width: u32,
    height: u32,
    shown: Option<SceneNode>,
    frame: u64,
}

impl Degraded2D {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            shown: None,
            frame: 0,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn shown(&self) -> Option<&SceneNode> {
        self.shown.as_ref()
    }
}

impl RenderBackend for Degraded2D {
    fn add_to_scene(&mut self, node: SceneNode) {
        if self.shown.is_none() {
            self.shown = Some(node);
        }
    }

    // no camera: the single image is always drawn full-frame
    fn set_camera(&mut self, _camera: &Camera) {}

    fn render(&mut self, _images: &[Image]) -> FrameStats {
        let stats = FrameStats {
            frame: self.frame,
            drawn: usize::from(self.shown.is_some()),
            culled: 0,
        };
        self.frame += 1;
        stats
    }
}
