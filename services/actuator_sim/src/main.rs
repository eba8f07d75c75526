//! Actuator simulation binary
//!
//! Binds the ingest listener (fail fast), then runs the ingest task and the
//! render loop until Ctrl+C.

use actuator_config::load_config;
use actuator_network::{TcpIngestConfig, TcpIngestListener};
use actuator_sim::logging::init_logging;
use actuator_sim::{PositionController, RenderLoop, SceneDescription, SimulationContext, TracingRenderer};
use anyhow::{anyhow, Context, Result};
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config().context("Failed to load actuator configuration")?;
    init_logging(&config.log_level)?;

    info!("🚀 Starting actuator simulation");

    let context = SimulationContext::new();

    let ingest_config = TcpIngestConfig {
        bind_address: config.ingest.bind_address()?,
        backlog: config.ingest.backlog,
        max_record_len: config.ingest.max_record_len,
    };
    let listener = match TcpIngestListener::bind(ingest_config, context.stats.clone()) {
        Ok(listener) => listener,
        Err(e) => {
            let e = anyhow::Error::new(e).context("Failed to start ingest listener");
            error!(error = ?e, "❌ Startup failed");
            return Err(e);
        }
    };

    let mut controller = PositionController::from_config(&config, context.pose.clone());
    info!(
        limit_x = controller.workspace().limit_x(),
        limit_y = controller.workspace().limit_y(),
        scale = controller.delta_scale(),
        hop_threshold = config.hop.threshold,
        "✅ Position controller ready"
    );

    let mut ingest_task = tokio::spawn(async move { listener.run(&mut controller).await });

    let renderer = TracingRenderer::new(SceneDescription::from_config(&config.workspace));
    let render_task = tokio::spawn(RenderLoop::new(context.clone(), renderer, &config.render).run());

    info!("Actuator simulation running. Press Ctrl+C to stop.");

    let ingest_failure = tokio::select! {
        result = signal::ctrl_c() => {
            result.context("Failed to listen for shutdown signal")?;
            info!("Shutting down actuator simulation");
            None
        }
        result = &mut ingest_task => {
            let failure = match result {
                Ok(Ok(())) => anyhow!("Ingest listener exited"),
                Ok(Err(e)) => anyhow::Error::new(e).context("Ingest listener failed"),
                Err(e) => anyhow::Error::new(e).context("Ingest task panicked"),
            };
            error!(error = %failure, "Stopping actuator simulation");
            Some(failure)
        }
    };

    context.request_shutdown();
    let frames = render_task.await.context("Render task panicked")?;
    ingest_task.abort();

    info!(frames, "👋 Actuator simulation stopped");

    match ingest_failure {
        Some(failure) => Err(failure),
        None => Ok(()),
    }
}
