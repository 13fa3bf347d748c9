use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::engine::types::{WorkerId, WorkerRecord};

/// Every known worker with its rank. Ranks are computed elsewhere and pushed
/// in through `refresh`.
#[derive(Debug, Default)]
pub struct RankedPool {
    ranks: RwLock<HashMap<WorkerId, f64>>,
}

impl RankedPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = WorkerRecord>) -> Self {
        let pool = Self::new();
        pool.refresh(records);
        pool
    }

    /// Replaces the known worker set with `records`.
    pub fn refresh(&self, records: impl IntoIterator<Item = WorkerRecord>) {
        let ranks: HashMap<WorkerId, f64> = records
            .into_iter()
            .map(|record| (record.id, record.rank))
            .collect();
        debug!(target: "snel_search::selector", workers = ranks.len(), "Ranked pool refreshed");
        *self.ranks.write() = ranks;
    }

    pub fn rank_of(&self, id: WorkerId) -> Option<f64> {
        self.ranks.read().get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.ranks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.read().is_empty()
    }

    /// The `k` best reachable workers, best first. Ties break on the lower id;
    /// workers without a known rank sort after every ranked one.
    pub fn top_k(&self, reachable: &[WorkerId], k: usize) -> Vec<WorkerId> {
        let ranks = self.ranks.read();
        let mut seen = HashSet::with_capacity(reachable.len());
        let mut ranked: Vec<(WorkerId, f64)> = reachable
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .map(|id| (id, ranks.get(&id).copied().unwrap_or(f64::NEG_INFINITY)))
            .collect();

        ranked.sort_by(|(a_id, a_rank), (b_id, b_rank)| {
            b_rank.total_cmp(a_rank).then_with(|| a_id.cmp(b_id))
        });
        ranked.truncate(k);
        ranked.into_iter().map(|(id, _)| id).collect()
    }
}
