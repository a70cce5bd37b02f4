//! Camera clamping and zoom-driven mode detection.
//!
//! Both steps are pure over their inputs: [`clamp_camera`] only touches the
//! camera and [`detect_transition`] only reads, returning the change for
//! [`GalleryState::apply_transition`] to commit.

use crate::camera::{Camera, FOV_NARROW, FOV_WIDE};

use super::state::{GalleryState, Mode};

/// A mode change decided from the clamped camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeTransition {
    EnterGallery,
    EnterFocal { focal: usize },
}

/// Keep the camera inside the ranges valid for `mode`.
pub fn clamp_camera(camera: &mut Camera, mode: Mode, extent: f32) {
    if mode == Mode::Gallery {
        camera.position.x = camera.position.x.clamp(0.0, extent.max(0.0));
        // the overview is a flat strip
        camera.position.y = 0.0;
    }
    camera.fov = camera.fov.clamp(FOV_NARROW, FOV_WIDE);
}

/// Decide whether the (already clamped) zoom crosses a mode threshold.
pub fn detect_transition(camera: &Camera, state: &GalleryState) -> Option<ModeTransition> {
    if state.len() <= 1 {
        return None;
    }
    if camera.fov >= FOV_WIDE {
        (state.mode() != Mode::Gallery).then_some(ModeTransition::EnterGallery)
    } else if camera.fov <= FOV_NARROW && state.mode() == Mode::Gallery {
        nearest_image(state, camera.position.x).map(|focal| ModeTransition::EnterFocal { focal })
    } else {
        None
    }
}

/// Id of the image whose x is closest to `x`; equal distances keep the lower id.
pub fn nearest_image(state: &GalleryState, x: f32) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for img in state.images() {
        let dist = (x - img.position.x).abs();
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((img.id, dist)),
        }
    }
    best.map(|(id, _)| id)
}
