use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::engine::errors::SelectionError;
use crate::engine::types::WorkerId;

use super::ranked_pool::RankedPool;

const LOG_TARGET: &str = "snel_search::selector";

pub const DEFAULT_MAX_WORKERS: usize = 100;

/// Point-in-time copy of the selector state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorSnapshot {
    pub candidates: Vec<WorkerId>,
    pub draw_set: Vec<WorkerId>,
    pub reachable: Vec<WorkerId>,
}

struct SelectorState {
    /// Top-K reachable workers, best first
    candidates: Vec<WorkerId>,
    /// Workers not yet drawn in the current cycle
    draw_set: Vec<WorkerId>,
    /// Last non-empty reachable set seen by `resync`
    reachable: Vec<WorkerId>,
    rng: StdRng,
}

impl SelectorState {
    fn resync(&mut self, pool: &RankedPool, max_workers: usize, reachable: &[WorkerId]) {
        if reachable.is_empty() {
            return;
        }

        self.reachable = reachable.to_vec();
        self.candidates = pool.top_k(reachable, max_workers);

        if !self.draw_set.is_empty() {
            let keep: HashSet<WorkerId> = self.candidates.iter().copied().collect();
            self.draw_set.retain(|id| keep.contains(id));
        }

        if self.draw_set.is_empty() {
            self.draw_set = self.candidates.clone();
        }
    }

    fn refill_if_empty(&mut self, pool: &RankedPool, max_workers: usize) -> Result<(), SelectionError> {
        if self.draw_set.is_empty() {
            let reachable = self.reachable.clone();
            debug!(target: LOG_TARGET, reachable = reachable.len(), "Draw set exhausted, refilling");
            self.resync(pool, max_workers, &reachable);
        }

        if self.draw_set.is_empty() {
            return Err(SelectionError::ExhaustedPool);
        }
        Ok(())
    }

    fn draw(&mut self, pool: &RankedPool, max_workers: usize) -> Result<WorkerId, SelectionError> {
        self.refill_if_empty(pool, max_workers)?;
        let index = self.rng.gen_range(0..self.draw_set.len());
        Ok(self.draw_set.swap_remove(index))
    }

    /// Like `draw`, but never returns a worker in `exclude`. `None` when every
    /// worker left in the draw set is excluded.
    fn draw_excluding(
        &mut self,
        pool: &RankedPool,
        max_workers: usize,
        exclude: &[WorkerId],
    ) -> Result<Option<WorkerId>, SelectionError> {
        self.refill_if_empty(pool, max_workers)?;

        let eligible: Vec<usize> = (0..self.draw_set.len())
            .filter(|&i| !exclude.contains(&self.draw_set[i]))
            .collect();
        if eligible.is_empty() {
            return Ok(None);
        }

        let index = eligible[self.rng.gen_range(0..eligible.len())];
        Ok(Some(self.draw_set.swap_remove(index)))
    }
}

/// Hands out workers from the top-K of the ranked pool, never repeating a
/// worker until the current cycle is used up.
///
/// Shared by every in-flight query; `resync` and `draw` run under one lock.
pub struct WorkerSelector {
    pool: Arc<RankedPool>,
    max_workers: usize,
    state: Mutex<SelectorState>,
}

impl WorkerSelector {
    pub fn new(pool: Arc<RankedPool>, max_workers: usize) -> Self {
        Self::with_rng(pool, max_workers, StdRng::from_entropy())
    }

    /// Deterministic selector, for tests and reproducible runs.
    pub fn with_seed(pool: Arc<RankedPool>, max_workers: usize, seed: u64) -> Self {
        Self::with_rng(pool, max_workers, StdRng::seed_from_u64(seed))
    }

    fn with_rng(pool: Arc<RankedPool>, max_workers: usize, rng: StdRng) -> Self {
        Self {
            pool,
            max_workers,
            state: Mutex::new(SelectorState {
                candidates: Vec::new(),
                draw_set: Vec::new(),
                reachable: Vec::new(),
                rng,
            }),
        }
    }

    pub fn ranked_pool(&self) -> &Arc<RankedPool> {
        &self.pool
    }

    /// Recomputes the candidate pool from `reachable`. Workers that dropped out
    /// leave the current draw set; newcomers wait for the next cycle. An empty
    /// `reachable` means "no update" and keeps the current state.
    pub fn resync(&self, reachable: &[WorkerId]) {
        if reachable.is_empty() {
            warn!(target: LOG_TARGET, "Resync called with empty reachable set, keeping current state");
            return;
        }

        let mut state = self.state.lock();
        state.resync(&self.pool, self.max_workers, reachable);

        info!(
            target: LOG_TARGET,
            reachable = reachable.len(),
            candidates = state.candidates.len(),
            draw_set = state.draw_set.len(),
            "Worker selector resynced"
        );
    }

    /// Removes one uniformly chosen worker from the draw set, refilling the
    /// set from the last-known reachable workers when it is empty.
    pub fn draw(&self) -> Result<WorkerId, SelectionError> {
        let mut state = self.state.lock();
        let worker = state.draw(&self.pool, self.max_workers)?;
        debug!(target: LOG_TARGET, worker = %worker, remaining = state.draw_set.len(), "Worker drawn");
        Ok(worker)
    }

    /// Draws up to `count` distinct workers in one critical section. A refill
    /// partway through skips workers already picked for this call, so the
    /// result holds `min(count, candidates)` workers.
    pub fn draw_many(&self, count: usize) -> Result<Vec<WorkerId>, SelectionError> {
        let mut state = self.state.lock();
        let mut picked: Vec<WorkerId> = Vec::with_capacity(count);

        while picked.len() < count {
            match state.draw_excluding(&self.pool, self.max_workers, &picked) {
                Ok(Some(worker)) => picked.push(worker),
                Ok(None) => break,
                Err(e) if picked.is_empty() => return Err(e),
                Err(_) => break,
            }
        }

        debug!(
            target: LOG_TARGET,
            requested = count,
            drawn = picked.len(),
            remaining = state.draw_set.len(),
            "Workers drawn"
        );
        Ok(picked)
    }

    pub fn snapshot(&self) -> SelectorSnapshot {
        let state = self.state.lock();
        SelectorSnapshot {
            candidates: state.candidates.clone(),
            draw_set: state.draw_set.clone(),
            reachable: state.reachable.clone(),
        }
    }
}
