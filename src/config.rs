use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::error::Error;
use crate::events::LoadRequest;
use crate::gallery::LoadFailurePolicy;
use crate::platform::Platform;

/// Host viewport the renderer defaults to when no explicit size is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Construction options recognised by a gallery instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GalleryOptions {
    /// Rendering path; probed from the host when absent.
    #[serde(default)]
    pub platform: Option<Platform>,
    /// Mount handle the renderer attaches to. Required.
    #[serde(default)]
    pub container: Option<String>,
    #[serde(default = "GalleryOptions::default_multitouch")]
    pub multitouch: bool,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub on_load_error: LoadFailurePolicy,
}

/// Options after defaults and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub platform: Option<Platform>,
    pub container: String,
    pub multitouch: bool,
    pub width: u32,
    pub height: u32,
    pub on_load_error: LoadFailurePolicy,
}

impl GalleryOptions {
    const fn default_multitouch() -> bool {
        true
    }

    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: Some(container.into()),
            ..Self::default()
        }
    }

    /// Fill in defaults from `viewport` and check required fields.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] when the container is missing or
    /// blank, or a dimension is zero.
    pub fn resolve(&self, viewport: Viewport) -> Result<ResolvedOptions, Error> {
        let container = match self.container.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => {
                return Err(Error::Configuration(
                    "a container to mount the gallery in is required".into(),
                ));
            }
        };
        let width = self.width.unwrap_or(viewport.width);
        let height = self.height.unwrap_or(viewport.height);
        if width == 0 || height == 0 {
            return Err(Error::Configuration(format!(
                "renderer size must be non-zero, got {width}x{height}"
            )));
        }
        Ok(ResolvedOptions {
            platform: self.platform,
            container,
            multitouch: self.multitouch,
            width,
            height,
            on_load_error: self.on_load_error,
        })
    }
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            platform: None,
            container: None,
            multitouch: Self::default_multitouch(),
            width: None,
            height: None,
            on_load_error: LoadFailurePolicy::default(),
        }
    }
}

/// Top-level YAML configuration for the gallery binary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Configuration {
    #[serde(flatten)]
    pub gallery: GalleryOptions,
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default = "Configuration::default_tick_rate_hz")]
    pub tick_rate_hz: u32,
    /// Directory relative image sources are resolved against.
    #[serde(default)]
    pub image_root: Option<PathBuf>,
    #[serde(default)]
    pub images: Vec<LoadRequest>,
}

impl Configuration {
    const fn default_tick_rate_hz() -> u32 {
        60
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let cfg: Self = serde_yaml::from_str(&text).map_err(Error::from)?;
        Ok(cfg)
    }

    /// Check values that serde cannot.
    pub fn validated(self) -> Result<Self> {
        self.gallery.resolve(self.viewport)?;
        ensure!(
            (1..=1000).contains(&self.tick_rate_hz),
            "tick-rate-hz must be between 1 and 1000"
        );
        for img in &self.images {
            ensure!(
                !img.source.trim().is_empty(),
                "image sources must not be blank"
            );
            ensure!(
                img.width > 0 && img.height > 0,
                "image {} must have a non-zero width and height",
                img.source
            );
        }
        Ok(self)
    }
}
