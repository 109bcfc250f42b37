//! Server configuration.

use clap::Parser;

/// Command-line configuration for the presence server
#[derive(Debug, Parser)]
#[command(
    name = "hiroba-server",
    about = "Real-time presence server for shared 2D spaces"
)]
pub struct ServerConfig {
    /// Address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 3001)]
    pub port: u16,

    /// Secret used to verify platform-issued join tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Space id the directory should recognize (repeatable)
    #[arg(long = "space", default_values_t = [String::from("default")])]
    pub spaces: Vec<String>,
}

impl ServerConfig {
    /// Get the address string to bind the listener to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
