use crate::config::LoggingConfig;
use std::{
    io::{IsTerminal, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::Level;
use tracing_subscriber::fmt;

use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};

fn parse_tracing_level(s: &str) -> Option<Level> {
    match s.to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        "off" | "none" => None,
        _ => Some(Level::INFO),
    }
}

// -------- rotating writer for the file sink --------

#[derive(Clone)]
struct RotWriter(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl<'a> fmt::MakeWriter<'a> for RotWriter {
    type Writer = RotWriterHandle;
    fn make_writer(&'a self) -> Self::Writer {
        RotWriterHandle(self.0.clone())
    }
}

#[derive(Clone)]
struct RotWriterHandle(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl Write for RotWriterHandle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.lock().unwrap().flush()
    }
}

/// Resolve a log file path against `base_dir`; absolute paths are kept as-is.
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

/// Create a rotating writer, ensuring the parent directory exists.
fn create_rotating_writer(
    log_path: &Path,
    max_bytes: usize,
) -> Result<RotWriter, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let rot = FileRotate::new(
        log_path,
        AppendTimestamp::default(FileLimit::Age(chrono::Duration::days(1))),
        ContentLimit::BytesSurpassed(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None,
    );

    Ok(RotWriter(Arc::new(Mutex::new(rot))))
}

/// Initialize tracing from a logging configuration: a console layer plus an
/// optional JSON file layer with size-based rotation. Relative file paths are
/// resolved against `base_dir`. Safe to call more than once; later calls are
/// no-ops.
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};

    // Bridge `log` → `tracing` before installing the subscriber.
    let _ = tracing_log::LogTracer::init();

    let ansi = std::io::stdout().is_terminal();

    let console_filter = parse_tracing_level(&cfg.console_level)
        .map(LevelFilter::from_level)
        .unwrap_or(LevelFilter::OFF);

    let console_layer = fmt::layer()
        .with_ansi(ansi)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(console_filter);

    let file_layer = if cfg.file.trim().is_empty() {
        None
    } else {
        let log_path = resolve_log_path(&cfg.file, base_dir);
        let max_bytes = cfg.max_size_mb.unwrap_or(100).saturating_mul(1024 * 1024);

        match create_rotating_writer(&log_path, max_bytes as usize) {
            Ok(writer) => {
                let file_filter = parse_tracing_level(&cfg.file_level)
                    .map(LevelFilter::from_level)
                    .unwrap_or(LevelFilter::OFF);

                Some(
                    fmt::layer()
                        .json()
                        .with_ansi(false)
                        .with_target(true)
                        .with_level(true)
                        .with_timer(fmt::time::UtcTime::rfc_3339())
                        .with_writer(writer)
                        .with_filter(file_filter),
                )
            }
            Err(e) => {
                eprintln!(
                    "Failed to initialize log file '{}': {}",
                    log_path.to_string_lossy(),
                    e
                );
                None
            }
        }
    };

    let _ = Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Plain console logging at INFO, for early startup paths with no config yet.
pub fn init_default_logging() {
    let _ = fmt()
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .try_init();
}
