use thiserror::Error;

/// Library error type for gallery operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Construction options are unusable (missing container, zero-sized renderer).
    #[error("invalid gallery configuration: {0}")]
    Configuration(String),

    /// No 3D rendering context is available on this host.
    #[error("no 3D rendering context available: {0}")]
    UnsupportedRenderingContext(String),

    /// An enqueued image failed to load.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// YAML/serde configuration error.
    #[error(transparent)]
    Config(#[from] serde_yaml::Error),

    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Why a single image fetch did not produce an image.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("failed to read {source_uri}: {message}")]
    Io { source_uri: String, message: String },

    #[error("failed to decode {source_uri}: {message}")]
    Decode { source_uri: String, message: String },

    #[error("unsupported image source {0}")]
    UnsupportedSource(String),

    #[error("fetch task for {0} did not complete")]
    Join(String),
}
