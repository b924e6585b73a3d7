use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use clinic_core::config::{downstream_policy_from_env_value, latency_from_env_value};
use clinic_core::{DEFAULT_REST_ADDR, PortalConfig, SlotWindow};

/// Main entry point for the clinic portal mock backend
///
/// Resolves configuration once, builds the router and serves it until Ctrl-C.
///
/// # Environment Variables
/// - `CLINIC_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `CLINIC_LATENCY_MS`: simulated latency, `MIN-MAX` or a single value, `0` disables
///   (default: "600-1000")
/// - `CLINIC_CLEAR_DOWNSTREAM`: clear later booking selections when an earlier one changes
///   (default: false). Booking sessions are driven by the `clinic` CLI; the server only
///   validates and reports the value.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinic_run=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Arc::new(PortalConfig::new(
        latency_from_env_value(std::env::var("CLINIC_LATENCY_MS").ok())?,
        downstream_policy_from_env_value(std::env::var("CLINIC_CLEAR_DOWNSTREAM").ok())?,
        SlotWindow::default(),
    ));
    let rest_addr = std::env::var("CLINIC_REST_ADDR").unwrap_or_else(|_| DEFAULT_REST_ADDR.into());

    tracing::info!(
        "booking sessions use downstream policy {:?}",
        cfg.downstream_policy()
    );
    let latency = cfg.latency();
    if latency.is_disabled() {
        tracing::info!("simulated latency disabled");
    } else {
        tracing::info!(
            "simulated latency {}-{} ms",
            latency.min_ms(),
            latency.max_ms()
        );
    }

    let app = api_rest::router(AppState::new(cfg)?);

    tracing::info!("++ Starting clinic portal REST on {}", rest_addr);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("shutting down");
        })
        .await?;

    Ok(())
}
