//! Headless tube ride.
//!
//! Runs the rig for a fixed number of frames against a render surface that
//! logs camera poses. MIDI input can be replayed from a recorded session:
//!
//! ```text
//! tubeflight --frames 1200 --fps 60
//! tubeflight --config rig.json --replay session.json
//! RUST_LOG=tubeflight=debug tubeflight --spline PipeSpline
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing::{info, warn};

use tubeflight::animation::Viewport;
use tubeflight::geometry::SplineKind;
use tubeflight::input::{VirtualBackend, VirtualInput};
use tubeflight::{RenderSurface, Rig, RigConfig, SceneView};

/// Flies a camera through a tube swept along a catalog spline.
#[derive(Parser)]
#[command(name = "tubeflight", version, about, long_about = None)]
struct Cli {
    /// Rig configuration (JSON). Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Device mapping file, overriding the configured one.
    #[arg(long)]
    mapping: Option<PathBuf>,

    /// Spline to start on, overriding the configured one.
    #[arg(long)]
    spline: Option<SplineKind>,

    /// Number of frames to run.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Simulated frame rate.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Recorded MIDI session to feed through the device mapping.
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Log the camera pose every this many frames.
    #[arg(long, default_value_t = 60)]
    log_every: u64,
}

/// One recorded MIDI message.
#[derive(Debug, Deserialize)]
struct ReplayMessage {
    device: String,
    bytes: Vec<u8>,
    frame: u64,
}

/// Render surface that reports what would be drawn.
struct LogSurface {
    every: u64,
    viewport: Viewport,
}

impl RenderSurface for LogSurface {
    fn render(&mut self, view: &SceneView<'_>) {
        if self.every == 0 || view.frame % self.every != 0 {
            return;
        }
        let p = view.pose.position;
        let f = view.camera.forward();
        info!(
            frame = view.frame,
            t = format_args!("{:.4}", view.pose.t),
            position = format_args!("({:.2}, {:.2}, {:.2})", p.x, p.y, p.z),
            forward = format_args!("({:.3}, {:.3}, {:.3})", f.x, f.y, f.z),
            fov = view.camera.fov,
            scale = view.scale,
            vertices = view.mesh.vertex_count(),
            helper = view.helper.is_some(),
            "frame"
        );
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        info!(width = viewport.width, height = viewport.height, "surface resized");
    }
}

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for tubeflight.
    // Override with RUST_LOG env var (e.g. RUST_LOG=tubeflight=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("tubeflight=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RigConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RigConfig::default(),
    };
    if let Some(mapping) = cli.mapping.clone() {
        config.mapping_path = Some(mapping);
    }
    if let Some(spline) = cli.spline {
        config.initial_spline = spline;
    }
    anyhow::ensure!(
        cli.fps.is_finite() && cli.fps > 0.0,
        "--fps must be positive"
    );

    let mut rig = Rig::new(&config).context("building rig")?;
    let mut surface = LogSurface {
        every: cli.log_every,
        viewport: config.viewport,
    };
    rig.resize(config.viewport, &mut surface);

    let (replay, input) = match &cli.replay {
        Some(path) => {
            let replay = load_replay(path)?;
            let (backend, input) = VirtualBackend::new(vec![config.preferred_device.clone()]);
            rig.connect_midi(&config, Box::new(backend));
            if let Some(midi) = rig.midi_mut() {
                if !midi.wait_for_device(Duration::from_secs(1)) {
                    warn!("replay device did not connect");
                }
            }
            (replay, Some(input))
        }
        None => {
            info!("no MIDI session to replay, MIDI input off");
            (Vec::new(), None)
        }
    };

    let dt = 1.0 / cli.fps;
    for frame in 0..cli.frames {
        if let Some(input) = &input {
            deliver(input, &replay, frame);
        }
        rig.tick(dt, &mut surface);
    }

    let pose = rig.pose();
    println!(
        "{} frames on {} ({} tube builds, t = {:.4}, {}x{})",
        cli.frames,
        rig.parameters().spline(),
        rig.rebuild_count(),
        pose.t,
        surface.viewport.width,
        surface.viewport.height,
    );
    Ok(())
}

fn load_replay(path: &Path) -> Result<Vec<ReplayMessage>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading replay {}", path.display()))?;
    let mut messages: Vec<ReplayMessage> =
        serde_json::from_str(&text).with_context(|| format!("parsing replay {}", path.display()))?;
    messages.sort_by_key(|m| m.frame);
    info!(messages = messages.len(), "replay loaded");
    Ok(messages)
}

fn deliver(input: &VirtualInput, replay: &[ReplayMessage], frame: u64) {
    let start = replay.partition_point(|m| m.frame < frame);
    for message in replay[start..].iter().take_while(|m| m.frame == frame) {
        if !input.send(&message.device, &message.bytes) {
            warn!(device = %message.device, frame, "replay device not open");
        }
    }
}
