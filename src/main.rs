use anyhow::Result;
use clap::Parser;
use program_finder::{api, ServerConfig};
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = ServerConfig::parse();

    // ─── 1) init logging ─────────────────────────────────────────────
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(cfg.log_level.parse().unwrap_or(Level::INFO.into())),
        )
        .init();

    // ─── 2) resolve config ───────────────────────────────────────────
    let addr = cfg.socket_addr()?;
    if !cfg.data_path.exists() {
        warn!(
            path = %cfg.data_path.display(),
            "dataset not found at startup; it is re-read on every request"
        );
    }
    let state = Arc::new(api::ApiState::from_config(&cfg));

    // ─── 3) serve ────────────────────────────────────────────────────
    info!(
        data_path = %cfg.data_path.display(),
        time_mode = ?cfg.time_mode,
        strict_load = cfg.strict_load,
        "starting program API"
    );
    info!("Programs endpoint: GET http://{}/api/programs", addr);

    warp::serve(api::routes(state)).run(addr).await;

    Ok(())
}
