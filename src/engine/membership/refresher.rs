use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::engine::selector::WorkerSelector;
use crate::engine::transport::WorkerTransport;
use crate::engine::types::{WorkerId, WorkerRecord};

const LOG_TARGET: &str = "snel_search::membership";

/// Periodically probes the known workers and pushes the reachable set into
/// the selector. The selector itself never polls.
pub struct MembershipRefresher {
    selector: Arc<WorkerSelector>,
    transport: Arc<dyn WorkerTransport>,
    workers: Vec<WorkerRecord>,
    interval: Duration,
}

impl MembershipRefresher {
    pub fn new(
        selector: Arc<WorkerSelector>,
        transport: Arc<dyn WorkerTransport>,
        workers: Vec<WorkerRecord>,
        interval: Duration,
    ) -> Self {
        Self {
            selector,
            transport,
            workers,
            interval,
        }
    }

    /// One probe round. Returns the workers that answered.
    pub async fn refresh_once(&self) -> Vec<WorkerId> {
        self.selector
            .ranked_pool()
            .refresh(self.workers.iter().copied());

        let probes = self.workers.iter().map(|record| {
            let transport = Arc::clone(&self.transport);
            let id = record.id;
            async move { (id, transport.is_reachable(id).await) }
        });

        let reachable: Vec<WorkerId> = join_all(probes)
            .await
            .into_iter()
            .filter_map(|(id, up)| up.then_some(id))
            .collect();

        if reachable.is_empty() {
            warn!(
                target: LOG_TARGET,
                known = self.workers.len(),
                "No reachable workers, keeping previous selection state"
            );
        } else {
            info!(
                target: LOG_TARGET,
                known = self.workers.len(),
                reachable = reachable.len(),
                "Membership refreshed"
            );
        }

        self.selector.resync(&reachable);
        reachable
    }

    /// Runs `refresh_once` on every tick until `shutdown` fires.
    pub fn spawn(self: Arc<Self>, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // first tick completes immediately; startup already ran a round
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        info!(target: LOG_TARGET, "Membership refresher stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        self.refresh_once().await;
                    }
                }
            }
        })
    }
}
