use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};

use crate::frontend::context::FrontendContext;
use crate::shared::config::CONFIG;

use super::handler::handle_request;

const LOG_TARGET: &str = "snel_search::http";
const DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

pub async fn run_http_server(ctx: Arc<FrontendContext>) -> anyhow::Result<()> {
    let addr: SocketAddr = CONFIG.server.http_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    serve(listener, ctx, CONFIG.server.keep_alive, CONFIG.server.max_connections).await
}

/// Accept loop over an already bound listener. Returns once the context's
/// shutdown token fires and in-flight requests drained (or timed out).
pub async fn serve(
    listener: TcpListener,
    ctx: Arc<FrontendContext>,
    keep_alive: bool,
    max_connections: usize,
) -> anyhow::Result<()> {
    info!(target: LOG_TARGET, addr = %listener.local_addr()?, "HTTP server running");

    // 0 means unlimited
    let connection_semaphore =
        (max_connections > 0).then(|| Arc::new(Semaphore::new(max_connections)));

    loop {
        let permit = match &connection_semaphore {
            Some(semaphore) => tokio::select! {
                _ = ctx.shutdown.cancelled() => break,
                acquired = Arc::clone(semaphore).acquire_owned() => match acquired {
                    Ok(permit) => Some(permit),
                    Err(_) => break,
                },
            },
            None => None,
        };

        let accept_result = tokio::select! {
            _ = ctx.shutdown.cancelled() => {
                info!(target: LOG_TARGET, "HTTP server shutting down, stopping accept loop");
                break;
            }
            result = listener.accept() => result,
        };

        let (stream, peer_addr) = match accept_result {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(target: LOG_TARGET, error = %e, "Failed to accept HTTP connection");
                continue;
            }
        };
        debug!(target: LOG_TARGET, peer = %peer_addr, "Accepted connection");
        let io = TokioIo::new(stream);
        let ctx = Arc::clone(&ctx);

        tokio::spawn(async move {
            let mut builder = hyper::server::conn::http1::Builder::new();
            builder.keep_alive(keep_alive);

            let service = service_fn(move |req: Request<Incoming>| {
                handle_request(req, Arc::clone(&ctx))
            });
            if let Err(err) = builder.serve_connection(io, service).await {
                if !err.is_incomplete_message() && !err.is_canceled() {
                    warn!(target: LOG_TARGET, error = %err, "Error serving connection");
                }
            }
            // released when the connection closes
            drop(permit);
        });
    }

    ctx.server_state.signal_shutdown();
    let deadline = Instant::now() + DRAIN_TIMEOUT;
    while ctx.server_state.in_flight_count() > 0 && Instant::now() < deadline {
        sleep(Duration::from_millis(50)).await;
    }
    info!(
        target: LOG_TARGET,
        remaining = ctx.server_state.in_flight_count(),
        "HTTP server shutdown complete"
    );
    Ok(())
}
