//! # Actuator Simulation Service
//!
//! Two loops share one actuator pose:
//!
//! ```text
//! TCP client ──records──▶ TcpIngestListener ──▶ PositionController ──publish──▶ PoseHandle
//!      ▲                                              │                            │
//!      └──────────── "hitlimit" on clamp ◀────────────┘                            ▼
//!                                                              RenderLoop ──▶ Renderer
//! ```
//!
//! The ingest task is the only writer of the pose; the render loop reads a
//! published snapshot on every tick.

pub mod context;
pub mod controller;
pub mod hop;
pub mod logging;
pub mod render;

pub use context::{PoseHandle, SimulationContext};
pub use controller::PositionController;
pub use hop::{HopAnimator, HopFrame};
pub use render::{RenderFrame, RenderLoop, Renderer, SceneDescription, TracingRenderer};
