//! Linear slide of the strip around the focal image.

use super::state::{GalleryState, TransitionDirection};

/// Distance every non-focal image travels per tick.
pub const OFFSET: f32 = 50.0;
/// Ticks a transition takes from start to finish.
pub const FRAME_BUDGET: i32 = 60;

/// Advance any in-progress transition by one tick.
///
/// Returns the direction that finished on this tick, if one did.
pub fn step(state: &mut GalleryState) -> Option<TransitionDirection> {
    match state.direction {
        TransitionDirection::None => None,
        TransitionDirection::ToGallery => {
            shift(state, OFFSET);
            state.spread -= 1;
            state.frames -= 1;
            if state.frames <= 0 {
                state.frames = 0;
                state.direction = TransitionDirection::None;
                settle(state);
                return Some(TransitionDirection::ToGallery);
            }
            None
        }
        TransitionDirection::FromGallery => {
            shift(state, -OFFSET);
            state.spread += 1;
            state.frames += 1;
            if state.frames >= FRAME_BUDGET {
                state.frames = FRAME_BUDGET;
                let focal = state.focal;
                for img in &mut state.images {
                    if Some(img.id) != focal {
                        img.visible = false;
                    }
                }
                state.direction = TransitionDirection::None;
                return Some(TransitionDirection::FromGallery);
            }
            None
        }
    }
}

/// Move lower ids by `+delta` and higher ids by `-delta`, relative to the focal image.
fn shift(state: &mut GalleryState, delta: f32) {
    let Some(focal) = state.focal else {
        return;
    };
    for img in &mut state.images {
        if img.id < focal {
            img.position.x += delta;
        } else if img.id > focal {
            img.position.x -= delta;
        }
    }
}

// An interrupted zoom-in leaves a residual spread; snap the strip back to its packing.
fn settle(state: &mut GalleryState) {
    if state.spread != 0 {
        tracing::debug!(spread = state.spread, "re-packing strip after interrupted transition");
    }
    for img in &mut state.images {
        img.position = img.home;
    }
    state.spread = 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{LoadRequest, LoadedImage};
    use crate::gallery::bounds::ModeTransition;
    use crate::gallery::layout;
    use crate::gallery::state::Mode;

    fn strip(n: usize) -> GalleryState {
        let mut state = GalleryState::new();
        for i in 0..n {
            let req = LoadRequest::new(format!("img-{i}"), 40, 30);
            layout::accept(&mut state, &LoadedImage::placeholder(req), true);
        }
        state
    }

    #[test]
    fn idle_step_is_a_no_op() {
        let mut state = strip(3);
        let before = state.images().to_vec();
        assert_eq!(step(&mut state), None);
        assert_eq!(state.images(), &before[..]);
    }

    #[test]
    fn from_gallery_spreads_and_hides_after_budget() {
        let mut state = strip(3);
        state.apply_transition(ModeTransition::EnterFocal { focal: 1 });
        for _ in 0..FRAME_BUDGET - 1 {
            assert_eq!(step(&mut state), None);
        }
        assert_eq!(state.visible_count(), 3);
        assert_eq!(step(&mut state), Some(TransitionDirection::FromGallery));

        let travel = FRAME_BUDGET as f32 * OFFSET;
        let xs: Vec<f32> = state.images().iter().map(|i| i.position.x).collect();
        assert_eq!(xs, vec![-travel, 140.0, 280.0 + travel]);
        assert_eq!(state.visible_count(), 1);
        assert!(state.image(1).is_some_and(|img| img.visible));
        assert_eq!(state.frame_counter(), FRAME_BUDGET);
        assert_eq!(state.direction(), TransitionDirection::None);
    }

    #[test]
    fn to_gallery_counter_starts_at_budget_and_restores_packing() {
        let mut state = strip(3);
        state.apply_transition(ModeTransition::EnterFocal { focal: 1 });
        while step(&mut state).is_none() {}

        state.apply_transition(ModeTransition::EnterGallery);
        assert_eq!(state.frame_counter(), FRAME_BUDGET);
        assert_eq!(state.mode(), Mode::Gallery);

        let mut ticks = 0;
        loop {
            let focal_x = state.image(1).map(|i| i.position.x);
            let done = step(&mut state);
            ticks += 1;
            assert_eq!(state.image(1).map(|i| i.position.x), focal_x);
            if done.is_some() {
                break;
            }
        }
        assert_eq!(ticks, FRAME_BUDGET);
        let xs: Vec<f32> = state.images().iter().map(|i| i.position.x).collect();
        assert_eq!(xs, vec![0.0, 140.0, 280.0]);
        assert_eq!(state.frame_counter(), 0);
    }

    #[test]
    fn interrupted_zoom_in_still_settles_on_packing() {
        let mut state = strip(3);
        state.apply_transition(ModeTransition::EnterFocal { focal: 0 });
        for _ in 0..10 {
            step(&mut state);
        }
        state.apply_transition(ModeTransition::EnterGallery);
        while step(&mut state).is_none() {}
        let xs: Vec<f32> = state.images().iter().map(|i| i.position.x).collect();
        assert_eq!(xs, vec![0.0, 140.0, 280.0]);
        assert_eq!(state.visible_count(), 3);
    }
}
