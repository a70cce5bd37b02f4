pub mod camera;
pub mod config;
pub mod error;
pub mod events;
pub mod gallery;
pub mod input;
pub mod platform;
pub mod render;
pub mod tasks {
    pub mod loader;
}

pub use gallery::{Collaborators, Gallery};
