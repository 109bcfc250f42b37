//! Client configuration.

use clap::Parser;

/// Command-line configuration for the presence client
#[derive(Debug, Parser)]
#[command(
    name = "hiroba-client",
    about = "Interactive presence client for Hiroba spaces"
)]
pub struct ClientArgs {
    /// WebSocket URL of the presence server
    #[arg(long, default_value = "ws://127.0.0.1:3001/ws")]
    pub server: String,

    /// Space to join
    #[arg(long, default_value = "default")]
    pub space: String,

    /// Platform-issued join token
    #[arg(long, env = "HIROBA_TOKEN", hide_env_values = true)]
    pub token: String,
}
