use crate::engine::selector::{RankedPool, WorkerSelector};
use crate::engine::types::{WorkerId, WorkerRecord};
use std::sync::Arc;

pub struct SelectorFactory {
    workers: Vec<WorkerRecord>,
    max_workers: usize,
    seed: u64,
    resync: bool,
}

impl SelectorFactory {
    pub fn new() -> Self {
        Self {
            workers: (1..=5)
                .map(|id| WorkerRecord::new(WorkerId(id), f64::from(id) / 10.0))
                .collect(),
            max_workers: 100,
            seed: 42,
            resync: true,
        }
    }

    pub fn with_workers(mut self, ranks: &[(u32, f64)]) -> Self {
        self.workers = ranks
            .iter()
            .map(|(id, rank)| WorkerRecord::new(WorkerId(*id), *rank))
            .collect();
        self
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Leaves the selector without any reachable workers.
    pub fn without_resync(mut self) -> Self {
        self.resync = false;
        self
    }

    pub fn records(&self) -> Vec<WorkerRecord> {
        self.workers.clone()
    }

    pub fn create(self) -> Arc<WorkerSelector> {
        let pool = Arc::new(RankedPool::with_records(self.workers.iter().copied()));
        let selector = Arc::new(WorkerSelector::with_seed(pool, self.max_workers, self.seed));
        if self.resync {
            let reachable: Vec<WorkerId> = self.workers.iter().map(|w| w.id).collect();
            selector.resync(&reachable);
        }
        selector
    }
}
