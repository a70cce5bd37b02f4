use glam::Vec3;

use super::bounds::ModeTransition;

/// Whether the viewer shows one image or the whole strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Focal,
    Gallery,
}

/// Multi-tick animation currently playing, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDirection {
    None,
    ToGallery,
    FromGallery,
}

/// One accepted image and its place in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub id: usize,
    pub source: String,
    pub width: u32,
    pub height: u32,
    /// Current, possibly animated, position.
    pub position: Vec3,
    /// Packed position assigned by the layout engine.
    pub home: Vec3,
    pub visible: bool,
}

impl Image {
    pub fn half_width(&self) -> f32 {
        self.width as f32 / 2.0
    }
}

/// Aggregate owned by a gallery instance.
///
/// Images are only ever appended, so an image id doubles as its index and
/// the focal image is stored as an id.
#[derive(Debug, Clone)]
pub struct GalleryState {
    pub(super) images: Vec<Image>,
    pub(super) extent: f32,
    pub(super) mode: Mode,
    pub(super) focal: Option<usize>,
    pub(super) direction: TransitionDirection,
    pub(super) frames: i32,
    /// Outward animation steps currently applied to non-focal images.
    pub(super) spread: i32,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self::new()
    }
}

impl GalleryState {
    pub fn new() -> Self {
        Self {
            images: Vec::new(),
            extent: 0.0,
            mode: Mode::Focal,
            focal: None,
            direction: TransitionDirection::None,
            frames: 0,
            spread: 0,
        }
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn image(&self, id: usize) -> Option<&Image> {
        self.images.get(id)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Rightmost packed x-coordinate.
    pub fn extent(&self) -> f32 {
        self.extent
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn direction(&self) -> TransitionDirection {
        self.direction
    }

    pub fn frame_counter(&self) -> i32 {
        self.frames
    }

    pub fn focal(&self) -> Option<&Image> {
        self.focal.and_then(|id| self.images.get(id))
    }

    pub fn focal_id(&self) -> Option<usize> {
        self.focal
    }

    pub fn visible_count(&self) -> usize {
        self.images.iter().filter(|img| img.visible).count()
    }

    /// Commit a detected mode change. Mode and direction always move together.
    pub fn apply_transition(&mut self, transition: ModeTransition) {
        match transition {
            ModeTransition::EnterGallery => {
                self.mode = Mode::Gallery;
                for img in &mut self.images {
                    img.visible = true;
                }
                self.direction = TransitionDirection::ToGallery;
                self.frames = super::animation::FRAME_BUDGET;
            }
            ModeTransition::EnterFocal { focal } => {
                self.focal = Some(focal);
                self.mode = Mode::Focal;
                self.direction = TransitionDirection::FromGallery;
                self.frames = 0;
            }
        }
    }

    /// Outward displacement an image with `id` carries under the current spread.
    pub(super) fn displacement_for(&self, id: usize) -> f32 {
        let Some(focal) = self.focal else {
            return 0.0;
        };
        let step = self.spread as f32 * super::animation::OFFSET;
        match id.cmp(&focal) {
            std::cmp::Ordering::Less => -step,
            std::cmp::Ordering::Greater => step,
            std::cmp::Ordering::Equal => 0.0,
        }
    }
}
