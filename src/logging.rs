use crate::config::{AppConfig, LogRotation};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default filter when `RUST_LOG` is unset: the configured level, with
/// connection-pool chatter from the HTTP client kept at `warn`.
pub fn default_filter(config: &AppConfig) -> String {
    format!("{},hyper_util=warn,reqwest=warn", config.log_level)
}

pub fn init_logging(config: &AppConfig) -> WorkerGuard {
    let file_appender = match config.rotation {
        LogRotation::Hourly => tracing_appender::rolling::hourly(&config.log_dir, &config.log_file),
        LogRotation::Daily => tracing_appender::rolling::daily(&config.log_dir, &config.log_file),
        LogRotation::Never => tracing_appender::rolling::never(&config.log_dir, &config.log_file),
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(config)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.use_json {
        let file_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_writer(non_blocking)
            .with_ansi(false);
        registry.with(file_layer).init();
    } else {
        let file_layer = fmt::layer()
            .with_target(false)
            .with_writer(non_blocking)
            .with_ansi(false);
        let stdout_layer = fmt::layer().with_target(false).with_ansi(true);
        registry.with(file_layer).with(stdout_layer).init();
    }

    guard
}
