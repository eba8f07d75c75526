//! Workspace bounds
//!
//! The actuator stands on a square base plate. Its centre may travel until
//! the footprint would overhang the plate edge, so the clamp limit on each
//! axis is `plate_size / 2 - actuator_radius`. Z is never clamped.

/// Base plate edge length along X (scene units)
pub const DEFAULT_PLATE_SIZE_X: f64 = 0.8;

/// Base plate edge length along Y (scene units)
pub const DEFAULT_PLATE_SIZE_Y: f64 = 0.8;

/// Base plate thickness, only used by the scene description
pub const DEFAULT_PLATE_THICKNESS: f64 = 0.01;

/// Cylinder base radius; doubles as the footprint radius for clamping
pub const DEFAULT_ACTUATOR_RADIUS: f64 = 0.12;

/// Cylinder top radius, only used by the scene description
pub const DEFAULT_ACTUATOR_TOP_RADIUS: f64 = 0.08;

/// Cylinder height, only used by the scene description
pub const DEFAULT_ACTUATOR_HEIGHT: f64 = 0.12;

/// Planar clamp boundary for the actuator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Workspace {
    pub half_extent_x: f64,
    pub half_extent_y: f64,
    pub actuator_radius: f64,
}

impl Workspace {
    /// Derive the workspace from the base plate size and actuator footprint
    pub fn from_plate(plate_size_x: f64, plate_size_y: f64, actuator_radius: f64) -> Self {
        Self {
            half_extent_x: plate_size_x / 2.0,
            half_extent_y: plate_size_y / 2.0,
            actuator_radius,
        }
    }

    /// Largest allowed |x|
    pub fn limit_x(&self) -> f64 {
        self.half_extent_x - self.actuator_radius
    }

    /// Largest allowed |y|
    pub fn limit_y(&self) -> f64 {
        self.half_extent_y - self.actuator_radius
    }

    pub fn exceeds_x(&self, x: f64) -> bool {
        x.abs() > self.limit_x()
    }

    pub fn exceeds_y(&self, y: f64) -> bool {
        y.abs() > self.limit_y()
    }

    /// Whether a planar position satisfies both axis limits
    pub fn contains(&self, x: f64, y: f64) -> bool {
        !self.exceeds_x(x) && !self.exceeds_y(y)
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::from_plate(
            DEFAULT_PLATE_SIZE_X,
            DEFAULT_PLATE_SIZE_Y,
            DEFAULT_ACTUATOR_RADIUS,
        )
    }
}
