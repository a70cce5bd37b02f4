use tracing::{debug, warn};

use super::Platform;
use crate::error::Error;

/// Reports which 3D rendering path the host can offer.
pub trait CapabilityProbe {
    /// # Errors
    /// Returns [`Error::UnsupportedRenderingContext`] when no 3D context exists.
    fn detect(&self) -> Result<Platform, Error>;
}

/// Asks wgpu for an adapter: hardware adapters map to [`Platform::Webgl`],
/// CPU rasterisers to [`Platform::Canvas`].
#[derive(Debug, Default, Clone, Copy)]
pub struct GpuProbe;

impl CapabilityProbe for GpuProbe {
    fn detect(&self) -> Result<Platform, Error> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            force_fallback_adapter: false,
            compatible_surface: None,
        }))
        .map_err(|err| Error::UnsupportedRenderingContext(err.to_string()))?;

        let info = adapter.get_info();
        debug!(adapter = %info.name, backend = ?info.backend, device = ?info.device_type, "gpu adapter found");
        Ok(match info.device_type {
            wgpu::DeviceType::Cpu => Platform::Canvas,
            _ => Platform::Webgl,
        })
    }
}

/// Probe with a predetermined answer; `None` behaves like a host without 3D.
#[derive(Debug, Clone, Copy)]
pub struct FixedProbe(pub Option<Platform>);

impl CapabilityProbe for FixedProbe {
    fn detect(&self) -> Result<Platform, Error> {
        match self.0 {
            Some(Platform::Image) | None => Err(Error::UnsupportedRenderingContext(
                "host reports no 3D context".into(),
            )),
            Some(platform) => Ok(platform),
        }
    }
}

/// Use the requested platform, otherwise probe once and fall back to the
/// plain image display if no 3D context exists.
pub fn resolve_platform(requested: Option<Platform>, probe: &dyn CapabilityProbe) -> Platform {
    if let Some(platform) = requested {
        return platform;
    }
    match probe.detect() {
        Ok(platform) => platform,
        Err(err) => {
            warn!("{err}; falling back to single-image display");
            Platform::Image
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_platform_skips_probe() {
        assert_eq!(
            resolve_platform(Some(Platform::Canvas), &FixedProbe(None)),
            Platform::Canvas
        );
    }

    #[test]
    fn missing_context_degrades_to_image() {
        assert_eq!(resolve_platform(None, &FixedProbe(None)), Platform::Image);
        assert_eq!(
            resolve_platform(None, &FixedProbe(Some(Platform::Webgl))),
            Platform::Webgl
        );
    }
}
