//! Actuator pose in scene units

use std::fmt;

/// Current position of the actuator (the cylinder) in scene units.
///
/// Published as a whole snapshot; readers never hold a reference into the
/// controller's working copy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActuatorPose {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ActuatorPose {
    /// World origin, the pose at controller start
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for ActuatorPose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4}, {:.4})", self.x, self.y, self.z)
    }
}
