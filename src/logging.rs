use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes logging: human-readable console output plus a JSON file log
/// under `logs/` that serves as the audit trail for migration runs.
pub fn init_logging() {
    let _ = fs::create_dir_all("logs");

    // Daily-rotated file log, written off-thread
    let file_appender = tracing_appender::rolling::daily("logs", "scrubber.log");
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().json().with_writer(file_writer);
    let console_layer = fmt::layer().with_writer(std::io::stdout);

    let filter = EnvFilter::from_default_env()
        .add_directive("contact_scrubber=info".parse().unwrap());

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    // The guard must outlive main or buffered log lines are dropped on exit
    std::mem::forget(_guard);
}
