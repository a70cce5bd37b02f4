use glam::Vec3;
use tracing::debug;

use crate::events::LoadedImage;

use super::state::{GalleryState, Image, Mode};

/// Gap left between the edges of neighbouring images.
pub const GALLERY_DIST: f32 = 100.0;

/// Packed x for an image of `half_width` following `prev`.
pub fn next_x(prev: &Image, half_width: f32) -> f32 {
    prev.home.x + prev.half_width() + half_width + GALLERY_DIST
}

/// Append a released image to the strip and return its id.
///
/// The second image switches the gallery to overview mode unless
/// `allow_overview` is false (the degraded single-image display).
pub fn accept(state: &mut GalleryState, loaded: &LoadedImage, allow_overview: bool) -> usize {
    let id = state.images.len();
    let width = loaded.request.width;
    let half_width = width as f32 / 2.0;

    let home = match state.images.last() {
        Some(prev) => Vec3::new(next_x(prev, half_width), 0.0, 0.0),
        None => Vec3::ZERO,
    };

    if id == 0 {
        state.focal = Some(0);
    } else if id == 1 && allow_overview {
        state.mode = Mode::Gallery;
    }
    state.extent = home.x;

    let visible = id == 0 || state.mode == Mode::Gallery;
    let mut position = home;
    position.x += state.displacement_for(id);

    debug!(id, source = %loaded.request.source, x = home.x, visible, "image placed");
    state.images.push(Image {
        id,
        source: loaded.request.source.clone(),
        width,
        height: loaded.request.height,
        position,
        home,
        visible,
    });
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::LoadRequest;
    use crate::gallery::state::TransitionDirection;

    fn loaded(w: u32) -> LoadedImage {
        LoadedImage::placeholder(LoadRequest::new("x.png", w, 50))
    }

    #[test]
    fn first_image_sits_at_origin_in_focal_mode() {
        let mut state = GalleryState::new();
        assert_eq!(accept(&mut state, &loaded(300), true), 0);
        assert_eq!(state.images()[0].position, Vec3::ZERO);
        assert_eq!(state.extent(), 0.0);
        assert_eq!(state.mode(), Mode::Focal);
        assert_eq!(state.focal_id(), Some(0));
        assert_eq!(state.direction(), TransitionDirection::None);
    }

    #[test]
    fn packs_by_half_widths_plus_gap() {
        let mut state = GalleryState::new();
        accept(&mut state, &loaded(200), true);
        accept(&mut state, &loaded(100), true);
        accept(&mut state, &loaded(60), true);
        let xs: Vec<f32> = state.images().iter().map(|i| i.position.x).collect();
        // 0; 0 + 100 + 50 + 100; 250 + 50 + 30 + 100
        assert_eq!(xs, vec![0.0, 250.0, 430.0]);
        assert_eq!(state.extent(), 430.0);
        assert!(state.images().iter().all(|i| i.position.y == 0.0 && i.position.z == 0.0));
    }

    #[test]
    fn second_image_forces_overview() {
        let mut state = GalleryState::new();
        accept(&mut state, &loaded(10), true);
        accept(&mut state, &loaded(10), true);
        assert_eq!(state.mode(), Mode::Gallery);
        assert_eq!(state.direction(), TransitionDirection::None);
        assert_eq!(state.visible_count(), 2);
    }

    #[test]
    fn degraded_display_stays_on_first_image() {
        let mut state = GalleryState::new();
        accept(&mut state, &loaded(10), false);
        accept(&mut state, &loaded(10), false);
        assert_eq!(state.mode(), Mode::Focal);
        assert_eq!(state.visible_count(), 1);
    }
}
