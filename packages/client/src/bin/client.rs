//! Interactive presence client for Hiroba spaces.
//!
//! Joins a space on a presence server and walks around it from the
//! terminal, printing what the other occupants do.
//!
//! Run with:
//! ```not_rust
//! HIROBA_TOKEN=... cargo run --bin hiroba-client -- --space default
//! ```

use clap::Parser;

use hiroba_client::args::ClientArgs;
use hiroba_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = ClientArgs::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    // Run the client
    if let Err(e) = hiroba_client::run_client(args).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
