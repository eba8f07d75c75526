//! Hop animation parameters and state
//!
//! A hop is a message-paced vertical ramp: `interval` frames up, `interval`
//! frames down, measured from the z recorded when the hop was triggered.

/// Raw (unscaled) trigger value that must be exceeded to start a hop
pub const DEFAULT_HOP_THRESHOLD: f64 = 13.0;

/// Frames spent ascending; the full hop lasts twice as long
pub const DEFAULT_HOP_INTERVAL: u32 = 4;

/// Z offset added per frame (scene units)
pub const DEFAULT_HOP_STEP: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HopParams {
    pub threshold: f64,
    pub interval: u32,
    pub step: f64,
}

impl HopParams {
    /// Ramp frames in a hop; the record after the last one lands it
    pub fn total_frames(&self) -> u32 {
        self.interval.saturating_mul(2)
    }

    /// Whether a raw trigger signal starts a hop
    pub fn is_triggered_by(&self, signal: f64) -> bool {
        signal > self.threshold
    }

    /// Z offset from the anchor for a given frame
    pub fn offset(&self, frame: u32) -> f64 {
        if frame < self.interval {
            f64::from(frame) * self.step
        } else {
            f64::from(self.total_frames().saturating_sub(frame)) * self.step
        }
    }
}

impl Default for HopParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_HOP_THRESHOLD,
            interval: DEFAULT_HOP_INTERVAL,
            step: DEFAULT_HOP_STEP,
        }
    }
}

/// Mutable hop bookkeeping owned by the position controller.
///
/// `frame_count` is only meaningful while `active`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HopState {
    pub active: bool,
    pub anchor_z: f64,
    pub frame_count: u32,
}

/// Where the hop is after a record has been processed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HopPhase {
    Idle,
    Ascending { frame: u32 },
    Descending { frame: u32 },
}

impl HopPhase {
    pub fn is_active(&self) -> bool {
        !matches!(self, HopPhase::Idle)
    }
}
