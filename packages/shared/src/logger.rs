//! Tracing subscriber setup shared by the server and client binaries.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// The default filter enables `default_level` for the calling binary and the
/// server library; setting `RUST_LOG` replaces it entirely.
///
/// # Arguments
///
/// * `bin_name` - Binary name (hyphens allowed; translated to a filter target)
/// * `default_level` - Level used when `RUST_LOG` is not set
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(bin_name, default_level)));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::debug!("Logger initialized for '{}'", bin_name);
}

/// Build the fallback filter directives for a binary.
fn default_directives(bin_name: &str, default_level: &str) -> String {
    format!(
        "{target}={level},hiroba_server={level},tower_http=info",
        target = bin_name.replace('-', "_"),
        level = default_level,
    )
}
