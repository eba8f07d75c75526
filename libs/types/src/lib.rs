//! # Actuator Types
//!
//! Shared data model for the network-driven actuator simulation.
//!
//! ## Contents
//!
//! - **Pose**: [`ActuatorPose`], the position of the cylinder in scene units
//! - **Workspace**: [`Workspace`], the clamp boundary derived from the base plate
//!   and the actuator footprint
//! - **Hop**: [`HopParams`], [`HopState`] and [`HopPhase`] describing the scripted
//!   vertical ramp animation
//! - **Protocol**: wire constants and [`DeltaRecord`] parsing for the ingest stream
//! - **Outcome**: [`ApplyOutcome`], what a single delta application produced
//!
//! ## Quick Start
//!
//! ```rust
//! use actuator_types::{DeltaRecord, Workspace};
//!
//! let record: DeltaRecord = "100,0,0".parse().unwrap();
//! assert_eq!(record.dx, 100.0);
//!
//! let workspace = Workspace::default();
//! assert!(!workspace.exceeds_x(0.1));
//! ```

pub mod hop;
pub mod outcome;
pub mod pose;
pub mod protocol;
pub mod workspace;

pub use hop::{HopParams, HopPhase, HopState};
pub use outcome::ApplyOutcome;
pub use pose::ActuatorPose;
pub use protocol::{DeltaRecord, RecordError};
pub use workspace::Workspace;
