use glam::{Mat4, Vec3};

/// Field of view at which the gallery is fully zoomed out.
pub const FOV_WIDE: f32 = 75.0;
/// Field of view at which the gallery is fully zoomed in.
pub const FOV_NARROW: f32 = 20.0;

const START_DISTANCE: f32 = 400.0;
const NEAR: f32 = 0.1;
const FAR: f32 = 1000.0;

/// Perspective camera shared between the input controller and the gallery.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Camera pulled back from the origin, looking down -z at the image strip.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, START_DISTANCE),
            fov: FOV_WIDE,
            aspect: width.max(1) as f32 / height.max(1) as f32,
            near: NEAR,
            far: FAR,
        }
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view(&self) -> Mat4 {
        let target = Vec3::new(self.position.x, self.position.y, 0.0);
        Mat4::look_at_rh(self.position, target, Vec3::Y)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(1, 1)
    }
}
