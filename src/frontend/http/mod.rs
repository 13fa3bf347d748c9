pub mod body;
pub mod dispatcher;
pub mod handler;
pub mod json_request;
pub mod listener;

#[cfg(test)]
mod dispatcher_test;
