pub mod ranked_pool;
pub mod worker_selector;


pub use ranked_pool::RankedPool;
pub use worker_selector::{SelectorSnapshot, WorkerSelector};
