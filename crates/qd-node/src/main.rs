//! # Quorum-DAO Node
//!
//! Runs the governance runtime and serves JSON-lines commands on stdin,
//! replies on stdout. Logs go to stderr; set `RUST_LOG` to filter them.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use qd_node::{serve, GovernanceRuntime, NodeConfig};
use shared_types::SystemClock;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = NodeConfig::from_env().context("loading node configuration")?;
    info!(
        chain_id = config.chain.chain_id,
        safety_period_secs = config.governance.safety_period_secs,
        "starting Quorum-DAO node"
    );

    let (runtime, handle) = GovernanceRuntime::new(&config, Arc::new(SystemClock));
    let task = runtime.spawn();

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    let interrupted = tokio::select! {
        served = serve(&handle, stdin, stdout) => {
            let answered = served.context("serving stdin")?;
            info!(answered, "input closed");
            false
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("waiting for Ctrl+C")?;
            warn!("interrupted");
            true
        }
    };

    drop(handle);
    task.await.context("runtime task panicked")?;
    info!("node stopped");

    if interrupted {
        // A pending blocking read on stdin would keep the tokio runtime alive.
        std::process::exit(0);
    }
    Ok(())
}
