//! Simulation Configuration Module
//!
//! Loads [`SimulationConfig`] from three layers, later ones winning:
//!
//! 1. compiled-in defaults ([`SimulationConfig::default`])
//! 2. a TOML file: the path in `ACTUATOR_CONFIG_PATH`, otherwise
//!    `configs/actuator.toml` when it exists
//! 3. environment variables with the `ACTUATOR__` prefix, nested keys
//!    separated by `__` (e.g. `ACTUATOR__INGEST__PORT=10000`)

use actuator_types::hop::{DEFAULT_HOP_INTERVAL, DEFAULT_HOP_STEP, DEFAULT_HOP_THRESHOLD};
use actuator_types::protocol::{
    DEFAULT_BACKLOG, DEFAULT_BIND_HOST, DEFAULT_DELTA_SCALE, DEFAULT_PORT, MAX_RECORD_LEN,
};
use actuator_types::workspace::{
    DEFAULT_ACTUATOR_RADIUS, DEFAULT_PLATE_SIZE_X, DEFAULT_PLATE_SIZE_Y,
};
use actuator_types::{HopParams, Workspace};
use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "ACTUATOR_CONFIG_PATH";

/// Config file picked up when present and no explicit path is given
pub const DEFAULT_CONFIG_PATH: &str = "configs/actuator.toml";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "ACTUATOR";

/// Default render period (milliseconds)
pub const DEFAULT_RENDER_PERIOD_MS: u64 = 50;

/// Frames between ingest statistics summaries in the render log (5 s at 50 ms)
pub const DEFAULT_STATS_INTERVAL_FRAMES: u64 = 100;

/// Complete simulation configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SimulationConfig {
    pub ingest: IngestConfig,
    pub workspace: WorkspaceConfig,
    pub motion: MotionConfig,
    pub hop: HopConfig,
    pub render: RenderConfig,
    /// Fallback filter when `RUST_LOG` is unset
    pub log_level: String,
}

/// TCP ingest listener settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct IngestConfig {
    pub bind_host: String,
    pub port: u16,
    pub backlog: u32,
    /// Longest accepted record in bytes
    pub max_record_len: usize,
}

/// Base plate and actuator footprint
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct WorkspaceConfig {
    pub plate_size_x: f64,
    pub plate_size_y: f64,
    pub actuator_radius: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MotionConfig {
    /// Multiplier from raw delta units to scene units
    pub delta_scale: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct HopConfig {
    pub threshold: f64,
    pub interval: u32,
    pub step: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RenderConfig {
    pub period_ms: u64,
    /// Log an ingest statistics summary every N frames, 0 disables it
    pub stats_interval_frames: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ingest: IngestConfig::default(),
            workspace: WorkspaceConfig::default(),
            motion: MotionConfig::default(),
            hop: HopConfig::default(),
            render: RenderConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            bind_host: DEFAULT_BIND_HOST.to_string(),
            port: DEFAULT_PORT,
            backlog: DEFAULT_BACKLOG,
            max_record_len: MAX_RECORD_LEN,
        }
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            plate_size_x: DEFAULT_PLATE_SIZE_X,
            plate_size_y: DEFAULT_PLATE_SIZE_Y,
            actuator_radius: DEFAULT_ACTUATOR_RADIUS,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            delta_scale: DEFAULT_DELTA_SCALE,
        }
    }
}

impl Default for HopConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_HOP_THRESHOLD,
            interval: DEFAULT_HOP_INTERVAL,
            step: DEFAULT_HOP_STEP,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            period_ms: DEFAULT_RENDER_PERIOD_MS,
            stats_interval_frames: DEFAULT_STATS_INTERVAL_FRAMES,
        }
    }
}

impl IngestConfig {
    /// Socket address the listener binds to
    pub fn bind_address(&self) -> Result<SocketAddr> {
        let host: IpAddr = self
            .bind_host
            .parse()
            .with_context(|| format!("Invalid ingest bind host {:?}", self.bind_host))?;
        Ok(SocketAddr::new(host, self.port))
    }
}

impl WorkspaceConfig {
    pub fn to_workspace(&self) -> Workspace {
        Workspace::from_plate(self.plate_size_x, self.plate_size_y, self.actuator_radius)
    }
}

impl HopConfig {
    pub fn to_params(&self) -> HopParams {
        HopParams {
            threshold: self.threshold,
            interval: self.interval,
            step: self.step,
        }
    }
}

impl RenderConfig {
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}

impl SimulationConfig {
    /// Load configuration from defaults, an optional file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Config::try_from(&SimulationConfig::default())
            .context("Failed to build default configuration")?;

        let mut builder = Config::builder().add_source(defaults);

        match path {
            Some(path) => {
                info!("Loading actuator config: {:?}", path);
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_PATH);
                if fallback.exists() {
                    info!("Loading actuator config: {:?}", fallback);
                    builder = builder.add_source(File::from(fallback));
                } else {
                    debug!("No config file at {:?}, using defaults", fallback);
                }
            }
        }

        // Override with environment variables (ACTUATOR__ prefix)
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config: SimulationConfig = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values the controller or listener cannot run with
    pub fn validate(&self) -> Result<()> {
        self.ingest.bind_address()?;
        if self.ingest.backlog == 0 {
            bail!("ingest.backlog must be at least 1");
        }
        if self.ingest.max_record_len == 0 {
            bail!("ingest.max_record_len must be at least 1");
        }

        let ws = &self.workspace;
        if !(ws.plate_size_x > 0.0 && ws.plate_size_y > 0.0) {
            bail!(
                "workspace plate size must be positive, got {} x {}",
                ws.plate_size_x,
                ws.plate_size_y
            );
        }
        if !(ws.actuator_radius >= 0.0) {
            bail!("workspace.actuator_radius must be non-negative");
        }
        let workspace = ws.to_workspace();
        if !(workspace.limit_x() > 0.0 && workspace.limit_y() > 0.0) {
            bail!(
                "actuator radius {} leaves no room on a {} x {} plate",
                ws.actuator_radius,
                ws.plate_size_x,
                ws.plate_size_y
            );
        }

        if !(self.motion.delta_scale.is_finite() && self.motion.delta_scale > 0.0) {
            bail!("motion.delta_scale must be a positive number");
        }

        if self.hop.interval == 0 {
            bail!("hop.interval must be at least 1");
        }
        if !(self.hop.step.is_finite() && self.hop.step > 0.0) {
            bail!("hop.step must be a positive number");
        }
        if !self.hop.threshold.is_finite() {
            bail!("hop.threshold must be finite");
        }

        if self.render.period_ms == 0 {
            bail!("render.period_ms must be at least 1");
        }

        Ok(())
    }
}

/// Load configuration using `ACTUATOR_CONFIG_PATH` when set
pub fn load_config() -> Result<SimulationConfig> {
    let explicit = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
    SimulationConfig::load(explicit.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_match_demo_constants() {
        let config = SimulationConfig::default();
        assert_eq!(
            config.ingest.bind_address().unwrap(),
            "0.0.0.0:9999".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(config.ingest.backlog, 5);
        assert_eq!(config.ingest.max_record_len, 256);
        assert_eq!(config.motion.delta_scale, 0.001);
        assert_eq!(config.hop.to_params(), HopParams::default());
        assert_eq!(config.workspace.to_workspace(), Workspace::default());
        assert_eq!(config.render.period(), Duration::from_millis(50));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_file_overrides() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("actuator.toml");

        let config_content = r#"
log_level = "debug"

[ingest]
port = 10001

[hop]
threshold = 20.0
interval = 6
"#;

        fs::write(&config_path, config_content).unwrap();

        let config = SimulationConfig::load(Some(&config_path)).unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.ingest.port, 10001);
        assert_eq!(config.hop.threshold, 20.0);
        assert_eq!(config.hop.interval, 6);
        // Untouched values keep their defaults
        assert_eq!(config.ingest.backlog, 5);
        assert_eq!(config.hop.step, 0.01);
        assert_eq!(config.workspace, WorkspaceConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(SimulationConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_invalid_file_values_rejected() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("actuator.toml");
        fs::write(&config_path, "[workspace]\nactuator_radius = 0.5\n").unwrap();

        let err = SimulationConfig::load(Some(&config_path)).unwrap_err();
        assert!(err.to_string().contains("leaves no room"));
    }

    #[test]
    fn test_validate_rejects_degenerate_values() {
        let mut config = SimulationConfig::default();
        config.hop.interval = 0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.motion.delta_scale = 0.0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.render.period_ms = 0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.ingest.bind_host = "not-an-ip".to_string();
        assert!(config.validate().is_err());
    }
}
