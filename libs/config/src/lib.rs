//! # Actuator Simulation Configuration
//!
//! Every tunable of the simulation lives in [`SimulationConfig`]. The
//! compiled-in defaults reproduce the demo exactly (port 9999, 0.8 × 0.8
//! plate, 0.12 actuator radius, 0.001 delta scale, hop threshold 13 over
//! 2 × 4 frames of 0.01, 50 ms render period); files and environment
//! variables can override them.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use actuator_config::load_config;
//!
//! let config = load_config().unwrap();
//! let workspace = config.workspace.to_workspace();
//! println!("clamp limit x = {}", workspace.limit_x());
//! ```

pub mod simulation_config;

pub use simulation_config::{
    load_config, HopConfig, IngestConfig, MotionConfig, RenderConfig, SimulationConfig,
    WorkspaceConfig, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, ENV_PREFIX,
};
