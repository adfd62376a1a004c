use std::path::PathBuf;
use tracing_appender::{
    non_blocking,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Console logging on stderr, plus an optional daily JSON log file.
///
/// `RUST_LOG` overrides the console level. Must be called once per process.
pub fn init_logger(component: &str, is_dev: bool, enable_file: bool) {
    let default_level = if is_dev { "debug" } else { "warn" };
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(is_dev)
        .with_ansi(is_dev)
        .with_filter(console_filter);

    let file_layer = enable_file.then(|| {
        let file_name = format!("rust_app_{component}.log");
        let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir(is_dev), file_name);
        let (file_writer, guard) = non_blocking(file_appender);

        // The writer must outlive every span; leak the guard for the process lifetime.
        std::mem::forget(guard);

        fmt::layer()
            .with_writer(file_writer)
            .with_ansi(false)
            .json()
            .with_filter(EnvFilter::new("info"))
    });

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

fn log_dir(is_dev: bool) -> PathBuf {
    if is_dev {
        return PathBuf::from("./logs");
    }

    dirs::data_local_dir()
        .map(|dir| dir.join("clinic-desktop").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}
