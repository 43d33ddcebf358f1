//! Opt-in tracing setup
//!
//! The engine emits structured events (phase transitions, degraded
//! construction, collaborator failures) through `tracing`; host
//! applications usually install their own subscriber. This helper wires
//! a stderr subscriber for standalone use.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a stderr subscriber honoring `RUST_LOG`, defaulting to
/// warnings from this crate only
pub fn init_logging() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "askbox=warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {}", e))?;

    Ok(())
}
