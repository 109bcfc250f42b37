//! CLI presence client for Hiroba.
//!
//! Connects to a presence server over WebSocket, joins one space and bridges
//! two worlds: a blocking `rustyline` prompt where the user types movement
//! commands, and the async socket where presence events arrive.

pub mod args;
pub mod command;
pub mod error;
pub mod runner;

// Re-export the client entry point
pub use runner::run_client;
