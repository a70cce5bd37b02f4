//! Pointer/touch input that drives the shared camera.

use glam::Vec2;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::trace;

use crate::camera::Camera;

/// Mutates the camera from user input once per tick, before the gallery's
/// own bounds and mode logic runs.
pub trait InputController {
    fn update(&mut self, camera: &mut Camera);
}

/// Raw input delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer drag in screen pixels.
    Drag { dx: f32, dy: f32 },
    /// Wheel steps; positive zooms out.
    Wheel { delta: f32 },
    /// Two-finger pinch; `scale > 1` spreads fingers apart (zoom in).
    Pinch { scale: f32 },
}

/// Cloneable sender the host feeds pointer events through.
#[derive(Debug, Clone)]
pub struct PointerHandle(UnboundedSender<PointerEvent>);

impl PointerHandle {
    /// Returns `false` once the controller has been dropped.
    pub fn send(&self, event: PointerEvent) -> bool {
        self.0.send(event).is_ok()
    }
}

const WHEEL_FOV_STEP: f32 = 2.5;

/// Reference controller: drag pans, wheel and pinch zoom by changing fov.
#[derive(Debug)]
pub struct PointerController {
    container: String,
    multitouch: bool,
    viewport_height: f32,
    events: UnboundedReceiver<PointerEvent>,
}

impl PointerController {
    pub fn new(container: &str, multitouch: bool, viewport_height: u32) -> (Self, PointerHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = Self {
            container: container.to_owned(),
            multitouch,
            viewport_height: viewport_height.max(1) as f32,
            events: rx,
        };
        (controller, PointerHandle(tx))
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    // World units covered by one screen pixel on the image plane (z = 0).
    fn world_per_pixel(&self, camera: &Camera) -> f32 {
        let visible_height = 2.0 * camera.position.z.abs() * (camera.fov.to_radians() / 2.0).tan();
        visible_height / self.viewport_height
    }

    fn apply(&self, camera: &mut Camera, event: PointerEvent) {
        match event {
            PointerEvent::Drag { dx, dy } => {
                let pan = Vec2::new(dx, dy) * self.world_per_pixel(camera);
                // content follows the pointer
                camera.position.x -= pan.x;
                camera.position.y += pan.y;
            }
            PointerEvent::Wheel { delta } => {
                camera.fov += delta * WHEEL_FOV_STEP;
            }
            PointerEvent::Pinch { scale } => {
                if self.multitouch && scale.is_finite() && scale > 0.0 {
                    camera.fov /= scale;
                }
            }
        }
    }
}

impl InputController for PointerController {
    fn update(&mut self, camera: &mut Camera) {
        while let Ok(event) = self.events.try_recv() {
            trace!(container = %self.container, ?event, "pointer input");
            self.apply(camera, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_and_pinch_change_fov() {
        let (mut ctl, handle) = PointerController::new("gallery", true, 600);
        let mut cam = Camera::new(800, 600);
        cam.fov = 40.0;
        assert!(handle.send(PointerEvent::Wheel { delta: 2.0 }));
        ctl.update(&mut cam);
        assert_eq!(cam.fov, 45.0);
        handle.send(PointerEvent::Pinch { scale: 1.5 });
        ctl.update(&mut cam);
        assert!((cam.fov - 30.0).abs() < 1e-4);
    }

    #[test]
    fn pinch_ignored_without_multitouch() {
        let (mut ctl, handle) = PointerController::new("gallery", false, 600);
        let mut cam = Camera::new(800, 600);
        handle.send(PointerEvent::Pinch { scale: 2.0 });
        ctl.update(&mut cam);
        assert_eq!(cam.fov, crate::camera::FOV_WIDE);
    }

    #[test]
    fn drag_pans_opposite_to_pointer() {
        let (mut ctl, handle) = PointerController::new("gallery", true, 600);
        let mut cam = Camera::new(800, 600);
        handle.send(PointerEvent::Drag { dx: 10.0, dy: 0.0 });
        ctl.update(&mut cam);
        assert!(cam.position.x < 0.0);
        assert_eq!(cam.position.y, 0.0);
    }
}
