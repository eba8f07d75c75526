//! Hop animator
//!
//! Drives [`HopState`] one frame per processed record. A trigger while a hop
//! is running is ignored; the hop always plays out to the end and lands back
//! on the z it started from.

use actuator_types::{HopParams, HopPhase, HopState};

/// Z produced by one animation step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HopFrame {
    pub z: f64,
    pub phase: HopPhase,
}

#[derive(Debug, Clone)]
pub struct HopAnimator {
    params: HopParams,
    state: HopState,
}

impl HopAnimator {
    pub fn new(params: HopParams) -> Self {
        Self {
            params,
            state: HopState::default(),
        }
    }

    pub fn state(&self) -> HopState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Start a hop anchored at `z` if `signal` exceeds the threshold and no
    /// hop is running. Returns whether a hop started.
    pub fn try_trigger(&mut self, signal: f64, z: f64) -> bool {
        if self.state.active || !self.params.is_triggered_by(signal) {
            return false;
        }

        self.state = HopState {
            active: true,
            anchor_z: z,
            frame_count: 0,
        };
        true
    }

    /// Advance one frame. `None` when no hop is running.
    ///
    /// Frames `0..total_frames()` ramp up and down; the record after the
    /// last ramp frame deactivates the hop and returns the anchor z exactly,
    /// so no rounding residue is left behind.
    pub fn advance(&mut self) -> Option<HopFrame> {
        if !self.state.active {
            return None;
        }

        let frame = self.state.frame_count;
        if frame >= self.params.total_frames() {
            self.state.active = false;
            return Some(HopFrame {
                z: self.state.anchor_z,
                phase: HopPhase::Idle,
            });
        }
        self.state.frame_count = frame + 1;

        let phase = if frame < self.params.interval {
            HopPhase::Ascending { frame }
        } else {
            HopPhase::Descending { frame }
        };

        Some(HopFrame {
            z: self.state.anchor_z + self.params.offset(frame),
            phase,
        })
    }
}

impl Default for HopAnimator {
    fn default() -> Self {
        Self::new(HopParams::default())
    }
}
