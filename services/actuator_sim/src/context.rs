//! Shared simulation state
//!
//! Everything both loops need is carried in a [`SimulationContext`] handed to
//! each of them at startup.

use actuator_network::IngestStats;
use actuator_types::ActuatorPose;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Published actuator pose.
///
/// Single writer (the position controller), any number of readers. A pose is
/// replaced as a whole under the write lock, so readers see it either fully
/// before or fully after a delta application.
#[derive(Debug, Clone, Default)]
pub struct PoseHandle {
    inner: Arc<RwLock<ActuatorPose>>,
}

impl PoseHandle {
    pub fn new(pose: ActuatorPose) -> Self {
        Self {
            inner: Arc::new(RwLock::new(pose)),
        }
    }

    /// Latest committed pose
    pub fn current(&self) -> ActuatorPose {
        *self.inner.read()
    }

    pub fn publish(&self, pose: ActuatorPose) {
        *self.inner.write() = pose;
    }
}

/// Handles shared by the ingest task and the render loop
#[derive(Debug, Clone)]
pub struct SimulationContext {
    pub pose: PoseHandle,
    pub stats: Arc<IngestStats>,
    running: Arc<AtomicBool>,
}

impl SimulationContext {
    pub fn new() -> Self {
        Self {
            pose: PoseHandle::new(ActuatorPose::ORIGIN),
            stats: Arc::new(IngestStats::new()),
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Ask the render loop to stop after its current frame
    pub fn request_shutdown(&self) {
        self.running.store(false, Ordering::Release);
    }
}

impl Default for SimulationContext {
    fn default() -> Self {
        Self::new()
    }
}
