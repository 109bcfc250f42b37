//! Real-time presence server for shared 2D virtual spaces.
//!
//! Clients connect over WebSocket, authenticate with a platform-issued
//! token, and join one space. From then on the server is the authority on
//! who is present where: joins, cardinal-step movement and departures are
//! validated here and fanned out to the other occupants of the same space.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod registry;
pub mod session;
pub mod ui;
pub mod usecase;

// Re-export the server entry point
pub use ui::run;
