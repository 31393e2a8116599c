//! Tracing setup shared by both binaries.

use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber. Stdout stays reserved for program output
/// (menu text, JSON, or the MCP protocol). `RUST_LOG` overrides `default_filter`.
pub fn init(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}
