pub mod capability;

pub use capability::{CapabilityProbe, FixedProbe, GpuProbe, resolve_platform};

use std::fmt;

use serde::Deserialize;

/// Rendering path a gallery draws through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    /// Hardware-accelerated 3D.
    Webgl,
    /// Software-rasterised 3D.
    Canvas,
    /// Plain single-image display.
    Image,
}

impl Platform {
    pub fn supports_3d(self) -> bool {
        matches!(self, Self::Webgl | Self::Canvas)
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Webgl => "webgl",
            Self::Canvas => "canvas",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
