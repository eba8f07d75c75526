//! Position Controller
//!
//! Owns the actuator pose and hop animation. Every processed record:
//!
//! 1. moves X and Y by the scaled delta, rejecting each axis independently
//!    when the candidate leaves the workspace
//! 2. starts a hop when the raw trigger exceeds the threshold and no hop is
//!    running, anchored at the current z
//! 3. advances a running hop by one frame
//! 4. publishes the resulting pose as a single value

use crate::context::PoseHandle;
use crate::hop::HopAnimator;
use actuator_config::SimulationConfig;
use actuator_network::DeltaSink;
use actuator_types::{ActuatorPose, ApplyOutcome, DeltaRecord, HopParams, HopPhase, HopState, Workspace};
use tracing::{debug, info};

pub struct PositionController {
    workspace: Workspace,
    hop: HopAnimator,
    delta_scale: f64,
    pose: ActuatorPose,
    published: PoseHandle,
}

impl PositionController {
    /// Start at the world origin with no hop running
    pub fn new(
        workspace: Workspace,
        hop_params: HopParams,
        delta_scale: f64,
        published: PoseHandle,
    ) -> Self {
        let pose = ActuatorPose::ORIGIN;
        published.publish(pose);

        Self {
            workspace,
            hop: HopAnimator::new(hop_params),
            delta_scale,
            pose,
            published,
        }
    }

    pub fn from_config(config: &SimulationConfig, published: PoseHandle) -> Self {
        Self::new(
            config.workspace.to_workspace(),
            config.hop.to_params(),
            config.motion.delta_scale,
            published,
        )
    }

    pub fn pose(&self) -> ActuatorPose {
        self.pose
    }

    pub fn hop_state(&self) -> HopState {
        self.hop.state()
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn delta_scale(&self) -> f64 {
        self.delta_scale
    }

    /// Apply one delta and commit the next pose.
    ///
    /// `dx` and `dy` are multiplied by `scale`; `trigger_signal` is compared
    /// against the hop threshold unscaled.
    pub fn apply_delta(
        &mut self,
        dx: f64,
        dy: f64,
        trigger_signal: f64,
        scale: f64,
    ) -> ApplyOutcome {
        let mut next = self.pose;

        let candidate_x = self.pose.x + dx * scale;
        let limit_x = !candidate_x.is_finite() || self.workspace.exceeds_x(candidate_x);
        if !limit_x {
            next.x = candidate_x;
        }

        let candidate_y = self.pose.y + dy * scale;
        let limit_y = !candidate_y.is_finite() || self.workspace.exceeds_y(candidate_y);
        if !limit_y {
            next.y = candidate_y;
        }

        if limit_x || limit_y {
            info!(
                candidate_x,
                candidate_y,
                limit_x,
                limit_y,
                "🚧 Workspace limit hit"
            );
        }

        let hop_started = self.hop.try_trigger(trigger_signal, next.z);
        if hop_started {
            info!(trigger = trigger_signal, anchor_z = next.z, "🦘 Hop started");
        }

        let hop = match self.hop.advance() {
            Some(frame) => {
                next.z = frame.z;
                if frame.phase == HopPhase::Idle {
                    info!(z = frame.z, "🛬 Hop landed");
                }
                frame.phase
            }
            None => HopPhase::Idle,
        };

        self.pose = next;
        self.published.publish(next);
        debug!(pose = %next, ?hop, "Pose committed");

        ApplyOutcome {
            pose: next,
            limit_x,
            limit_y,
            hop_started,
            hop,
        }
    }
}

impl DeltaSink for PositionController {
    fn apply(&mut self, record: DeltaRecord) -> ApplyOutcome {
        let scale = self.delta_scale;
        self.apply_delta(record.dx, record.dy, record.trigger, scale)
    }
}
