use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::command::handlers::search::QueryCoordinator;
use crate::command::handlers::search::dispatch::{FanoutExecutor, QueryExecutor};
use crate::engine::membership::MembershipRefresher;
use crate::engine::selector::{RankedPool, WorkerSelector};
use crate::engine::tools::ToolFieldTable;
use crate::engine::transport::{HttpWorkerTransport, WorkerTransport};
use crate::engine::types::{WorkerId, WorkerRecord};
use crate::frontend::server_state::ServerState;
use crate::shared::config::Settings;

pub struct FrontendContext {
    pub coordinator: Arc<QueryCoordinator>,
    pub server_state: Arc<ServerState>,
    /// Parent of every per-request token; cancelled on shutdown
    pub shutdown: CancellationToken,
}

impl FrontendContext {
    pub fn new(coordinator: Arc<QueryCoordinator>, shutdown: CancellationToken) -> Arc<Self> {
        Arc::new(Self {
            coordinator,
            server_state: Arc::new(ServerState::new()),
            shutdown,
        })
    }

    /// Wires the selector, transport and executor from settings, runs a first
    /// membership round and leaves the refresher running until `shutdown`.
    pub async fn from_config(
        settings: &Settings,
        shutdown: CancellationToken,
    ) -> anyhow::Result<Arc<Self>> {
        ToolFieldTable::global().validate()?;

        let records: Vec<WorkerRecord> = settings.workers.iter().map(|w| w.record()).collect();
        let addresses: HashMap<WorkerId, String> = settings
            .workers
            .iter()
            .map(|w| (WorkerId(w.id), w.addr.clone()))
            .collect();

        let pool = Arc::new(RankedPool::with_records(records.iter().copied()));
        let selector = Arc::new(WorkerSelector::new(pool, settings.selector.max_workers));
        let transport: Arc<dyn WorkerTransport> = Arc::new(HttpWorkerTransport::new(
            addresses,
            settings.query.worker_timeout(),
        ));

        let refresher = Arc::new(MembershipRefresher::new(
            Arc::clone(&selector),
            Arc::clone(&transport),
            records,
            settings.selector.resync_interval(),
        ));
        let reachable = refresher.refresh_once().await;
        refresher.spawn(shutdown.clone());

        info!(
            target: "snel_search::frontend",
            known = settings.workers.len(),
            reachable = reachable.len(),
            workers_per_query = settings.query.workers_per_query,
            "Search engine wired"
        );

        let executor: Arc<dyn QueryExecutor> = Arc::new(FanoutExecutor::new(
            selector,
            transport,
            settings.query.workers_per_query,
        ));

        Ok(Self::new(
            Arc::new(QueryCoordinator::new(executor)),
            shutdown,
        ))
    }
}
