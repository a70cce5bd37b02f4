//! The gallery instance and its per-tick cycle.

pub mod animation;
pub mod bounds;
pub mod layout;
pub mod queue;
mod state;

pub use bounds::ModeTransition;
pub use queue::{LoadFailurePolicy, LoadQueue};
pub use state::{GalleryState, Image, Mode, TransitionDirection};

use std::sync::Arc;

use glam::Vec2;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, trace, warn};

use crate::camera::{Camera, FOV_NARROW, FOV_WIDE};
use crate::config::{GalleryOptions, ResolvedOptions, Viewport};
use crate::error::{Error, LoadError};
use crate::events::{GalleryEvent, LoadCompleted, LoadRequest, LoadedImage, Ticket};
use crate::input::InputController;
use crate::platform::{CapabilityProbe, Platform, resolve_platform};
use crate::render::{FrameStats, RenderBackend, Renderer, SceneNode};
use crate::tasks::loader::{Fetcher, spawn_fetch};

/// Host-provided pieces a gallery talks to.
pub struct Collaborators {
    pub probe: Box<dyn CapabilityProbe>,
    pub fetcher: Arc<dyn Fetcher>,
    pub controls: Box<dyn InputController>,
    /// Runtime fetches are spawned on; taken from the current context when `None`.
    pub runtime: Option<Handle>,
}

pub struct Gallery {
    options: ResolvedOptions,
    platform: Platform,
    state: GalleryState,
    queue: LoadQueue,
    camera: Camera,
    controls: Box<dyn InputController>,
    renderer: Renderer,
    fetcher: Arc<dyn Fetcher>,
    runtime: Option<Handle>,
    completions_tx: UnboundedSender<LoadCompleted>,
    completions_rx: UnboundedReceiver<LoadCompleted>,
    subscriber: Option<UnboundedSender<GalleryEvent>>,
    last_frame: FrameStats,
}

impl Gallery {
    /// Build a gallery, resolving the platform once.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] if `options` lack a container or size.
    /// A missing 3D context is not an error: the gallery degrades to a
    /// single-image display.
    pub fn new(
        options: &GalleryOptions,
        viewport: Viewport,
        parts: Collaborators,
    ) -> Result<Self, Error> {
        let options = options.resolve(viewport)?;
        let platform = resolve_platform(options.platform, parts.probe.as_ref());
        let mut renderer = Renderer::for_platform(platform, options.width, options.height);
        let runtime = parts.runtime.or_else(|| Handle::try_current().ok());
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        info!(
            container = %options.container,
            %platform,
            width = options.width,
            height = options.height,
            multitouch = options.multitouch,
            "gallery created"
        );

        let camera = Camera::new(options.width, options.height);
        renderer.set_camera(&camera);

        Ok(Self {
            queue: LoadQueue::new(options.on_load_error),
            options,
            platform,
            state: GalleryState::new(),
            camera,
            controls: parts.controls,
            renderer,
            fetcher: parts.fetcher,
            runtime,
            completions_tx,
            completions_rx,
            subscriber: None,
            last_frame: FrameStats::default(),
        })
    }

    /// Receive [`GalleryEvent`]s from now on; replaces any earlier subscriber.
    pub fn subscribe(&mut self) -> UnboundedReceiver<GalleryEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscriber = Some(tx);
        rx
    }

    /// Queue an image and start fetching it. Never blocks.
    ///
    /// Without a tokio runtime the entry stays pending until the host calls
    /// [`Gallery::complete_load`] itself.
    pub fn enqueue(&mut self, request: LoadRequest) -> Ticket {
        let ticket = self.queue.enqueue(request.clone());
        debug!(?ticket, source = %request.source, "image enqueued");
        match &self.runtime {
            Some(runtime) => spawn_fetch(
                runtime,
                Arc::clone(&self.fetcher),
                ticket,
                request,
                self.completions_tx.clone(),
            ),
            None => warn!(
                ?ticket,
                "no async runtime available; waiting for host to complete the load"
            ),
        }
        ticket
    }

    /// Record a finished fetch and release any images now at the head of the queue.
    pub fn complete_load(&mut self, ticket: Ticket, result: Result<LoadedImage, LoadError>) {
        let failure = result.as_ref().err().cloned();
        let source = self.queue.source_of(ticket).unwrap_or_default().to_owned();
        if !self.queue.complete(ticket, result) {
            debug!(?ticket, "ignoring completion for unknown or settled ticket");
            return;
        }
        if let Some(error) = failure {
            warn!(?ticket, %error, "image failed to load");
            self.emit(GalleryEvent::LoadFailed { source, error });
        }
        self.drain_queue();
    }

    fn drain_queue(&mut self) {
        let drained = self.queue.drain();
        for request in &drained.skipped {
            debug!(source = %request.source, "skipped failed image");
        }
        if let Some(stall) = drained.stalled {
            warn!(source = %stall.source, waiting = stall.waiting, "load queue stalled on failed image");
            self.emit(GalleryEvent::QueueStalled {
                source: stall.source,
                waiting: stall.waiting,
            });
        }
        for loaded in drained.released {
            self.accept(loaded);
        }
    }

    fn accept(&mut self, loaded: LoadedImage) {
        let mode_before = self.state.mode();
        let allow_overview = !self.renderer.is_degraded();
        let id = layout::accept(&mut self.state, &loaded, allow_overview);
        let Some(img) = self.state.image(id) else {
            return;
        };
        let node = SceneNode {
            id,
            size: Vec2::new(img.width as f32, img.height as f32),
            position: img.position,
            visible: img.visible,
            texture_size: (loaded.texture_width, loaded.texture_height),
        };
        let event = GalleryEvent::ImageAccepted {
            id,
            source: img.source.clone(),
            x: img.home.x,
        };
        self.renderer.add_to_scene(node);
        self.emit(event);
        if self.state.mode() != mode_before {
            info!(images = self.state.len(), "second image arrived; showing overview");
            self.emit(GalleryEvent::ModeChanged {
                mode: self.state.mode(),
                direction: self.state.direction(),
                focal: self.state.focal_id(),
            });
        }
    }

    /// Per-frame entry point: input, bounds, mode detection, animation, render.
    pub fn update(&mut self) -> FrameStats {
        while let Ok(LoadCompleted { ticket, result }) = self.completions_rx.try_recv() {
            self.complete_load(ticket, result);
        }

        self.controls.update(&mut self.camera);

        if self.renderer.is_degraded() {
            self.camera.fov = self.camera.fov.clamp(FOV_NARROW, FOV_WIDE);
        } else {
            bounds::clamp_camera(&mut self.camera, self.state.mode(), self.state.extent());
            if let Some(transition) = bounds::detect_transition(&self.camera, &self.state) {
                self.state.apply_transition(transition);
                // entering the overview also bounds the pan on this same tick
                bounds::clamp_camera(&mut self.camera, self.state.mode(), self.state.extent());
                debug!(?transition, x = self.camera.position.x, "mode transition");
                self.emit(GalleryEvent::ModeChanged {
                    mode: self.state.mode(),
                    direction: self.state.direction(),
                    focal: self.state.focal_id(),
                });
            }
            if let Some(finished) = animation::step(&mut self.state) {
                debug!(?finished, "transition finished");
                self.emit(GalleryEvent::TransitionFinished(finished));
            }
        }

        self.renderer.set_camera(&self.camera);
        self.last_frame = self.renderer.render(self.state.images());
        trace!(
            frame = self.last_frame.frame,
            drawn = self.last_frame.drawn,
            mode = ?self.state.mode(),
            "tick"
        );
        self.last_frame
    }

    fn emit(&mut self, event: GalleryEvent) {
        if let Some(tx) = &self.subscriber {
            if tx.send(event).is_err() {
                self.subscriber = None;
            }
        }
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Camera the input controller shares; hosts without a controller may drive it directly.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn options(&self) -> &ResolvedOptions {
        &self.options
    }

    /// Requests not yet handed to the layout engine.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn last_frame(&self) -> FrameStats {
        self.last_frame
    }
}
