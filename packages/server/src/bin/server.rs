//! Presence server for shared 2D virtual spaces.
//!
//! Accepts WebSocket connections, authenticates join tokens and relays
//! presence events between the occupants of each space.
//!
//! Run with:
//! ```not_rust
//! JWT_SECRET=secret cargo run --bin hiroba-server
//! ```

use clap::Parser;

use hiroba_server::config::ServerConfig;
use hiroba_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    // Run the server
    if let Err(e) = hiroba_server::run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
