//! Venture Risk Analyzer — Binary Entrypoint
//! Boots the Axum HTTP server: assessment routes plus the Prometheus
//! exposition endpoint, on one configurable listener.
//!
//! See `README.md` for quickstart and endpoint reference.

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const ENV_BIND_ADDR: &str = "RISK_BIND_ADDR";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:9000";

/// Compact tracing output; `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("venture_risk_analyzer=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();

    init_tracing();

    let router = venture_risk_analyzer::app();

    let addr = std::env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "risk analyzer listening");
    axum::serve(listener, router).await?;

    Ok(())
}
