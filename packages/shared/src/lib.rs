//! Shared utilities for the Hiroba workspace.
//!
//! Small pieces used by both the presence server and the CLI client:
//! tracing setup and JST time helpers.

pub mod logger;
pub mod time;
