//! Logging Infrastructure
//!
//! Structured logging setup for simulation runs.

use tracing_subscriber::EnvFilter;

/// Initialize the logger
pub fn init_logger(level: &str) {
    init_logger_with_file(level, None);
}

/// Initialize the logger with optional daily rolling file output
pub fn init_logger_with_file(level: &str, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let path = std::path::Path::new(dir);
        if path.exists() {
            let file_appender = tracing_appender::rolling::daily(dir, "sim-engine");
            subscriber.with_writer(file_appender).init();
            return;
        }
    }

    subscriber.init();
}
