//! Result of applying one delta record

use crate::{ActuatorPose, HopPhase};

/// What a single delta application did to the actuator.
///
/// The ingest listener only looks at [`ApplyOutcome::limit_hit`] to decide
/// whether to acknowledge; the rest feeds logging and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApplyOutcome {
    /// Pose committed by this update
    pub pose: ActuatorPose,
    /// X move was rejected by the workspace clamp
    pub limit_x: bool,
    /// Y move was rejected by the workspace clamp
    pub limit_y: bool,
    /// A hop was triggered by this record
    pub hop_started: bool,
    /// Hop phase of the frame applied by this record
    pub hop: HopPhase,
}

impl ApplyOutcome {
    pub fn limit_hit(&self) -> bool {
        self.limit_x || self.limit_y
    }
}
