//! Presence server HTTP/WebSocket surface.

mod handler;
mod runner;
mod signal;
pub mod state;

pub use runner::run;
