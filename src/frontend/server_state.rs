use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Server-wide state: shutdown flag and in-flight request tracking
#[derive(Clone, Default)]
pub struct ServerState {
    shutdown: Arc<AtomicBool>,
    in_flight: Arc<AtomicUsize>,
}

impl ServerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the server is shutting down
    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    /// Signals that the server should start shutting down
    pub fn signal_shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
    }

    /// Marks one request as in flight until the returned guard is dropped.
    /// Streaming responses carry the guard inside their body.
    pub fn track(&self) -> InFlightGuard {
        self.in_flight.fetch_add(1, Ordering::Relaxed);
        InFlightGuard {
            in_flight: Arc::clone(&self.in_flight),
        }
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }
}

pub struct InFlightGuard {
    in_flight: Arc<AtomicUsize>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::Relaxed);
    }
}
