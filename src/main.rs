//! Binary entrypoint: drives a gallery headlessly from a YAML config.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::{ArgAction, Parser};
use tokio_util::sync::CancellationToken;
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use zoom_gallery::config::Configuration;
use zoom_gallery::input::{PointerController, PointerEvent};
use zoom_gallery::platform::GpuProbe;
use zoom_gallery::tasks::loader::FileFetcher;
use zoom_gallery::{Collaborators, Gallery};

#[derive(Debug, Parser)]
#[command(name = "zoom-gallery", version, about = "Zoomable image gallery driver")]
struct Cli {
    /// Path to YAML config
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Stop after this many ticks (runs until Ctrl-C when omitted)
    #[arg(long, value_name = "N")]
    ticks: Option<u64>,

    /// Comma-separated input steps: in, out, pan:<pixels>
    #[arg(long = "zoom-script", value_name = "STEPS", value_delimiter = ',')]
    zoom_script: Vec<ScriptStep>,

    /// Ticks between scripted input steps
    #[arg(long = "step-ticks", value_name = "N", default_value_t = 90)]
    step_ticks: u64,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy)]
enum ScriptStep {
    ZoomIn,
    ZoomOut,
    Pan(f32),
}

impl ScriptStep {
    fn event(self) -> PointerEvent {
        match self {
            Self::ZoomIn => PointerEvent::Wheel { delta: -30.0 },
            Self::ZoomOut => PointerEvent::Wheel { delta: 30.0 },
            Self::Pan(dx) => PointerEvent::Drag { dx, dy: 0.0 },
        }
    }
}

impl FromStr for ScriptStep {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "in" => Ok(Self::ZoomIn),
            "out" => Ok(Self::ZoomOut),
            other => {
                let px = other
                    .strip_prefix("pan:")
                    .ok_or_else(|| anyhow!("unknown script step '{other}'"))?;
                Ok(Self::Pan(px.parse().with_context(|| format!("bad pan amount '{px}'"))?))
            }
        }
    }
}

fn init_tracing(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("zoom_gallery={level}").parse()?)
        .add_directive("wgpu=warn".parse()?)
        .add_directive("naga=warn".parse()?);
    fmt().with_env_filter(filter).with_target(true).compact().init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let cfg = Configuration::from_yaml_file(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?
        .validated()
        .context("invalid configuration values")?;

    let image_root = cfg
        .image_root
        .clone()
        .or_else(|| cli.config.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    let resolved = cfg.gallery.resolve(cfg.viewport)?;
    let (controller, pointer) =
        PointerController::new(&resolved.container, resolved.multitouch, resolved.height);

    let mut gallery = Gallery::new(
        &cfg.gallery,
        cfg.viewport,
        Collaborators {
            probe: Box::new(GpuProbe),
            fetcher: Arc::new(FileFetcher::with_root(image_root)),
            controls: Box::new(controller),
            runtime: None,
        },
    )?;
    let mut events = gallery.subscribe();
    for request in cfg.images.iter().cloned() {
        gallery.enqueue(request);
    }

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!("ctrl-c handler failed: {err}");
                return;
            }
            info!("ctrl-c received; stopping");
            cancel.cancel();
        });
    }

    let mut interval =
        tokio::time::interval(Duration::from_secs_f64(1.0 / f64::from(cfg.tick_rate_hz)));
    let step_ticks = cli.step_ticks.max(1);
    let mut tick: u64 = 0;
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {}
        }

        if tick % step_ticks == 0 {
            let idx = usize::try_from(tick / step_ticks).unwrap_or(usize::MAX);
            if let Some(step) = cli.zoom_script.get(idx) {
                info!(?step, tick, "scripted input");
                pointer.send(step.event());
            }
        }

        gallery.update();
        while let Ok(event) = events.try_recv() {
            info!(?event, "gallery event");
        }

        tick += 1;
        if cli.ticks.is_some_and(|limit| tick >= limit) {
            break;
        }
    }

    let state = gallery.state();
    info!(
        ticks = tick,
        images = state.len(),
        queued = gallery.queued(),
        mode = ?state.mode(),
        "gallery stopped"
    );
    Ok(())
}
