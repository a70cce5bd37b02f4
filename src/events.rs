use crate::error::LoadError;
use crate::gallery::{Mode, TransitionDirection};

/// Host request to add an image to the gallery.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LoadRequest {
    pub source: String,
    pub width: u32,
    pub height: u32,
}

impl LoadRequest {
    pub fn new(source: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            source: source.into(),
            width,
            height,
        }
    }
}

/// Handle identifying one queue entry; issued in submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(pub u64);

/// Decoded texture for a request, ready to hand to the layout engine.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub request: LoadRequest,
    pub texture_width: u32,
    pub texture_height: u32,
    pub pixels: Vec<u8>,
}

impl LoadedImage {
    /// An image with no decoded pixels, sized only by its request.
    pub fn placeholder(request: LoadRequest) -> Self {
        Self {
            texture_width: request.width,
            texture_height: request.height,
            request,
            pixels: Vec::new(),
        }
    }
}

/// Emitted by a fetch task when it resolves.
#[derive(Debug)]
pub struct LoadCompleted {
    pub ticket: Ticket,
    pub result: Result<LoadedImage, LoadError>,
}

/// Observable gallery activity for hosts that subscribe.
#[derive(Debug, Clone, PartialEq)]
pub enum GalleryEvent {
    ImageAccepted { id: usize, source: String, x: f32 },
    ModeChanged { mode: Mode, direction: TransitionDirection, focal: Option<usize> },
    TransitionFinished(TransitionDirection),
    LoadFailed { source: String, error: LoadError },
    /// The head of the load queue failed and is holding back later images.
    QueueStalled { source: String, waiting: usize },
}
