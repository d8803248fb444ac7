//! Logging initialization: human-readable lines on stdout.

use tracing_subscriber::{
    EnvFilter,
    fmt::format::Writer,
    fmt::time::FormatTime,
};

/// Local wall-clock time in `YYYY-MM-DD HH:MM:SS` for log lines.
struct ChronoLocal;

impl FormatTime for ChronoLocal {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let t = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        write!(w, "{t}")
    }
}

/// Initializes the global tracing subscriber.
///
/// Log level comes from `RUST_LOG` (e.g. `info`, `debug`); default `info`.
pub fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(ChronoLocal)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {e}"))?;

    Ok(())
}
