//! Tracing setup for the command-line tool.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when neither `RUST_LOG` nor `MODE_ROUTER_LOG` is set.
pub const DEFAULT_FILTER: &str = "mode_router=info";

/// Build the log filter.
///
/// `RUST_LOG` wins, then `MODE_ROUTER_LOG`, then `level`. A bare level such
/// as `debug` is scoped to this crate; anything containing `=` is used as a
/// full directive.
pub fn build_filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("MODE_ROUTER_LOG"))
        .unwrap_or_else(|_| match level {
            Some(level) if level.contains('=') => EnvFilter::new(level),
            Some(level) => EnvFilter::new(format!("mode_router={level}")),
            None => EnvFilter::new(DEFAULT_FILTER),
        })
}

/// Install a compact stderr subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init_tracing(level: Option<&str>) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(build_filter(level))
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init()?;

    Ok(())
}
