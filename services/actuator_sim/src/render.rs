//! Renderer collaborator
//!
//! The render side never touches controller state directly: each tick it
//! takes the published pose from the [`SimulationContext`] and hands a
//! [`RenderFrame`] to a [`Renderer`]. Ticks are time-paced and independent
//! of record arrival.

use crate::context::SimulationContext;
use actuator_config::{RenderConfig, WorkspaceConfig};
use actuator_network::IngestStatsSnapshot;
use actuator_types::workspace::{
    DEFAULT_ACTUATOR_HEIGHT, DEFAULT_ACTUATOR_TOP_RADIUS, DEFAULT_PLATE_THICKNESS,
};
use actuator_types::ActuatorPose;
use anyhow::Result;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

/// Static scene geometry: a base plate with a truncated-cone actuator on it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneDescription {
    pub plate_size_x: f64,
    pub plate_size_y: f64,
    pub plate_thickness: f64,
    pub actuator_base_radius: f64,
    pub actuator_top_radius: f64,
    pub actuator_height: f64,
}

impl SceneDescription {
    pub fn from_config(workspace: &WorkspaceConfig) -> Self {
        Self {
            plate_size_x: workspace.plate_size_x,
            plate_size_y: workspace.plate_size_y,
            plate_thickness: DEFAULT_PLATE_THICKNESS,
            actuator_base_radius: workspace.actuator_radius,
            actuator_top_radius: DEFAULT_ACTUATOR_TOP_RADIUS,
            actuator_height: DEFAULT_ACTUATOR_HEIGHT,
        }
    }
}

impl Default for SceneDescription {
    fn default() -> Self {
        Self::from_config(&WorkspaceConfig::default())
    }
}

/// What a renderer gets to draw on one tick
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame {
    pub index: u64,
    pub pose: ActuatorPose,
    /// Present on frames where an ingest summary is due
    pub stats: Option<IngestStatsSnapshot>,
}

pub trait Renderer: Send {
    fn render(&mut self, frame: &RenderFrame) -> Result<()>;
}

/// Headless renderer that reports the scene through `tracing`
pub struct TracingRenderer {
    scene: SceneDescription,
    last_pose: Option<ActuatorPose>,
}

impl TracingRenderer {
    pub fn new(scene: SceneDescription) -> Self {
        Self {
            scene,
            last_pose: None,
        }
    }
}

impl Renderer for TracingRenderer {
    fn render(&mut self, frame: &RenderFrame) -> Result<()> {
        if self.last_pose.is_none() {
            debug!(
                plate_x = self.scene.plate_size_x,
                plate_y = self.scene.plate_size_y,
                plate_thickness = self.scene.plate_thickness,
                base_radius = self.scene.actuator_base_radius,
                top_radius = self.scene.actuator_top_radius,
                height = self.scene.actuator_height,
                "Scene ready"
            );
        }

        if self.last_pose != Some(frame.pose) {
            info!(frame = frame.index, pose = %frame.pose, "🎯 Actuator moved");
            self.last_pose = Some(frame.pose);
        } else {
            trace!(frame = frame.index, "Pose unchanged");
        }

        if let Some(stats) = frame.stats {
            info!(
                connections = stats.connections_accepted,
                applied = stats.records_applied,
                discarded = stats.records_discarded,
                limit_hits = stats.limit_hits,
                acks = stats.acks_sent,
                bytes = stats.bytes_received,
                "📊 Ingest stats"
            );
        }

        Ok(())
    }
}

/// Fixed-period driver for a [`Renderer`]
pub struct RenderLoop<R> {
    context: SimulationContext,
    renderer: R,
    period: Duration,
    stats_interval_frames: u64,
}

impl<R: Renderer> RenderLoop<R> {
    pub fn new(context: SimulationContext, renderer: R, config: &RenderConfig) -> Self {
        Self {
            context,
            renderer,
            period: config.period(),
            stats_interval_frames: config.stats_interval_frames,
        }
    }

    /// Render until the context's running flag clears.
    ///
    /// The flag is checked between frames, so a frame in progress always
    /// completes. Returns the number of frames rendered.
    pub async fn run(mut self) -> u64 {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(period_ms = self.period.as_millis() as u64, "🖥️ Render loop started");

        let mut frames: u64 = 0;
        while self.context.is_running() {
            ticker.tick().await;
            if !self.context.is_running() {
                break;
            }

            let frame = RenderFrame {
                index: frames,
                pose: self.context.pose.current(),
                stats: self.stats_due(frames).then(|| self.context.stats.snapshot()),
            };

            if let Err(e) = self.renderer.render(&frame) {
                warn!(frame = frames, error = %e, "Render failed");
            }
            frames += 1;
        }

        info!(frames, "Render loop stopped");
        frames
    }

    fn stats_due(&self, frame: u64) -> bool {
        self.stats_interval_frames > 0 && frame > 0 && frame % self.stats_interval_frames == 0
    }
}
