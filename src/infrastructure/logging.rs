//! Logging system configuration and initialization
//!
//! This module provides the logging setup with:
//! - File logging with startup rotation
//! - Configuration file based log level control
//! - Structured JSON logging (optional)
//! - Console and file output support
//! - Log files stored under the app data directory

use anyhow::{Result, anyhow};
use chrono::Local;
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::infrastructure::config::ConfigManager;

// Re-export LoggingConfig from config module
pub use crate::infrastructure::config::LoggingConfig;

/// File the current session writes to
const LOG_FILE_NAME: &str = "manga-desk.log";

// Global guard to keep the non-blocking log writer alive
static LOG_GUARDS: Lazy<Mutex<Vec<tracing_appender::non_blocking::WorkerGuard>>> =
    Lazy::new(|| Mutex::new(Vec::new()));

/// Wall-clock time formatter for log lines
struct LocalTimeFormatter;

impl FormatTime for LocalTimeFormatter {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Get the log directory under the app data directory
pub fn get_log_directory() -> PathBuf {
    ConfigManager::get_app_data_dir()
        .map(|dir| dir.join("logs"))
        .unwrap_or_else(|_| PathBuf::from("logs"))
}

/// Initialize the logging system with default configuration
pub fn init_logging() -> Result<()> {
    let config = LoggingConfig::default();
    init_logging_with_config(config)
}

/// Rotate an existing log file by renaming it with its last-write timestamp.
///
/// Returns the rotated file name, or `None` when there was nothing to rotate.
fn rotate_existing_log_file(log_dir: &Path, log_file_name: &str) -> Result<Option<String>> {
    let log_file_path = log_dir.join(log_file_name);

    if !log_file_path.exists() {
        return Ok(None);
    }

    let metadata = std::fs::metadata(&log_file_path)
        .map_err(|e| anyhow!("Failed to get log file metadata: {e}"))?;

    let file_time = metadata
        .created()
        .or_else(|_| metadata.modified())
        .unwrap_or_else(|_| std::time::SystemTime::now());

    let datetime: chrono::DateTime<Local> = file_time.into();
    let file_stem = log_file_name.trim_end_matches(".log");
    let timestamped_name = format!("{file_stem}.{}.log", datetime.format("%Y%m%dT%H%M%S"));
    let timestamped_path = log_dir.join(&timestamped_name);

    std::fs::rename(&log_file_path, &timestamped_path).map_err(|e| {
        anyhow!(
            "Failed to rotate log file {} to {}: {e}",
            log_file_path.display(),
            timestamped_path.display()
        )
    })?;

    Ok(Some(timestamped_name))
}

/// Delete every rotated log file, keeping only the current one.
fn remove_rotated_log_files(log_dir: &Path) {
    let Ok(entries) = std::fs::read_dir(log_dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.ends_with(".log") && name != LOG_FILE_NAME {
            if let Err(e) = std::fs::remove_file(&path) {
                warn!("Failed to remove old log file {:?}: {}", path, e);
            }
        }
    }
}

/// Filter built from the configured level, used when `RUST_LOG` is absent.
///
/// The level string comes from the user-edited config file; a malformed one
/// loses the crate directive but never fails the filter setup.
fn config_env_filter(config: &LoggingConfig) -> EnvFilter {
    let mut filter = EnvFilter::new(&config.level);

    // Suppress runtime internals unless TRACE level is specifically requested
    if !config.level.to_lowercase().contains("trace") {
        filter = filter
            .add_directive("tokio=info".parse().unwrap())
            .add_directive("runtime=warn".parse().unwrap());

        match format!("manga_desk={}", config.level).parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => warn!(
                "Invalid log level '{}' in config, keeping the base filter: {e}",
                config.level
            ),
        }
    }

    filter
}

/// Initialize logging with custom configuration
///
/// Sets up filters that keep dependency chatter out of the log unless TRACE
/// is requested.
///
/// # Environment Variable Override
/// `RUST_LOG` takes precedence over the configured level:
/// ```bash
/// # Watch runtime scheduling while keeping the app at debug
/// RUST_LOG="debug,tokio=debug" cargo run
/// ```
pub fn init_logging_with_config(config: LoggingConfig) -> Result<()> {
    let log_dir = get_log_directory();

    std::fs::create_dir_all(&log_dir)
        .map_err(|e| anyhow!("Failed to create log directory {log_dir:?}: {e}"))?;

    // Previous session's file either rotates to a timestamped name or, when
    // only the latest is kept, replaces every rotated copy.
    let rotated = rotate_existing_log_file(&log_dir, LOG_FILE_NAME)?;
    if config.keep_only_latest {
        remove_rotated_log_files(&log_dir);
    }

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| config_env_filter(&config));

    let registry = Registry::default().with(env_filter);

    match (config.file_output, config.console_output) {
        (true, true) => {
            let file_appender = rolling::never(&log_dir, LOG_FILE_NAME);
            let (file_writer, file_guard) = non_blocking(file_appender);

            // Park the guard so the writer thread outlives this call
            LOG_GUARDS.lock().unwrap().push(file_guard);

            if config.json_format {
                let file_layer = fmt::Layer::new()
                    .json()
                    .with_writer(file_writer)
                    .with_timer(LocalTimeFormatter)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false);
                let console_layer = fmt::Layer::new()
                    .with_writer(std::io::stdout)
                    .with_timer(LocalTimeFormatter)
                    .with_target(false);

                registry.with(file_layer).with(console_layer).init();
            } else {
                // File layer with minimal formatting (time + level + message only)
                let file_layer = fmt::Layer::new()
                    .with_writer(file_writer)
                    .with_timer(LocalTimeFormatter)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .with_ansi(false);
                let console_layer = fmt::Layer::new()
                    .with_writer(std::io::stdout)
                    .with_timer(LocalTimeFormatter)
                    .with_target(false);

                registry.with(file_layer).with(console_layer).init();
            }
        }
        (true, false) => {
            let file_appender = rolling::never(&log_dir, LOG_FILE_NAME);
            let (file_writer, file_guard) = non_blocking(file_appender);

            LOG_GUARDS.lock().unwrap().push(file_guard);

            if config.json_format {
                let file_layer = fmt::Layer::new()
                    .json()
                    .with_writer(file_writer)
                    .with_timer(LocalTimeFormatter)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false);

                registry.with(file_layer).init();
            } else {
                let file_layer = fmt::Layer::new()
                    .with_writer(file_writer)
                    .with_timer(LocalTimeFormatter)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .with_ansi(false);

                registry.with(file_layer).init();
            }
        }
        (false, true) => {
            let console_layer = fmt::Layer::new()
                .with_writer(std::io::stdout)
                .with_timer(LocalTimeFormatter)
                .with_target(false);

            registry.with(console_layer).init();
        }
        (false, false) => {
            return Err(anyhow!("No logging output configured"));
        }
    }

    info!("Logging system initialized");
    info!("Log directory: {:?}", log_dir);
    info!("Log level: {}", config.level);
    info!("JSON format: {}", config.json_format);
    info!("Console output: {}", config.console_output);
    info!("File output: {}", config.file_output);
    if let Some(rotated_name) = rotated {
        info!("Rotated previous log file to: {}", rotated_name);
    }

    Ok(())
}
