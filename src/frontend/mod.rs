pub mod context;
pub mod http;
pub mod server_state;


use context::FrontendContext;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::shared::config::CONFIG;

pub async fn start_all() -> anyhow::Result<()> {
    let shutdown = CancellationToken::new();
    let ctx = FrontendContext::from_config(&CONFIG, shutdown.clone()).await?;

    let state = std::sync::Arc::clone(&ctx.server_state);
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!(target: "snel_search::frontend", "Shutdown signal received"),
            Err(e) => {
                warn!(target: "snel_search::frontend", error = %e, "Failed to listen for shutdown signal");
                return;
            }
        }
        state.signal_shutdown();
        signal_token.cancel();
    });

    http::listener::run_http_server(ctx).await
}
