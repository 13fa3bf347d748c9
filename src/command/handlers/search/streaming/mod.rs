mod event;
mod guard;
mod relay;

#[cfg(test)]
mod event_test;

pub use event::FramedEvent;
pub use guard::guard_execution;
pub use relay::StreamRelay;
