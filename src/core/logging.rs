//! Logging setup.
//!
//! The TUI owns the terminal, so logs go to a daily-rolling JSON file under
//! `<data_dir>/logs`. `log` macros are bridged into `tracing`, and rolled
//! files from earlier days are gzip-compressed in the background.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "budstech-admin.log";

/// Initialize file logging for TUI mode.
///
/// No stdout layer is installed; ratatui is in raw/alternate-screen mode.
/// Returns a `WorkerGuard` which must be kept alive for the duration of the
/// application so buffered logs are flushed on shutdown.
pub fn init_tui(data_dir: &Path) -> WorkerGuard {
    let log_dir = data_dir.join("logs");
    let (non_blocking, guard) = file_writer(&log_dir);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_filter(env_filter);

    // No stdout layer: TUI owns the terminal
    if let Err(e) = tracing_subscriber::registry().with(file_layer).try_init() {
        eprintln!("Failed to install tracing subscriber: {}", e);
    }

    // The registry may already have bridged `log` during init.
    if tracing_log::LogTracer::init().is_err() {
        log::debug!("log -> tracing bridge already installed");
    }

    let log_dir_clone = log_dir.clone();
    std::thread::spawn(move || {
        compress_old_logs(&log_dir_clone);
    });

    log::info!(
        "Logging initialized. Writing to: {:?} (daily rolling)",
        log_dir.join(LOG_FILE_PREFIX)
    );

    guard
}

/// Background writer onto the daily log in `log_dir`. Lines are only
/// guaranteed on disk once the guard is dropped.
fn file_writer(log_dir: &Path) -> (NonBlocking, WorkerGuard) {
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    tracing_appender::non_blocking(file_appender)
}

/// Whether `name` is a rolled log from a day other than `today` (`YYYY-MM-DD`).
fn is_stale_log(name: &str, today: &str) -> bool {
    name.starts_with(&format!("{LOG_FILE_PREFIX}."))
        && !name.ends_with(today)
        && !name.ends_with(".gz")
}

/// Compress rolled log files from previous days.
fn compress_old_logs(log_dir: &Path) -> usize {
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let mut compressed = 0;

    let Ok(entries) = fs::read_dir(log_dir) else {
        return 0;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !is_stale_log(name, &today) {
            continue;
        }
        match compress_file(&path) {
            Ok(()) => {
                log::info!("Compressed old log: {:?}", path);
                compressed += 1;
            }
            Err(e) => log::warn!("Failed to compress old log {:?}: {}", path, e),
        }
    }

    compressed
}

fn compress_file(path: &Path) -> io::Result<()> {
    let file = fs::File::open(path)?;
    let mut reader = io::BufReader::new(file);

    let mut gz_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No filename"))?
        .to_os_string();
    gz_name.push(".gz");
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No parent directory"))?;
    let gz_path: PathBuf = parent.join(gz_name);

    // Skip if already exists
    if gz_path.exists() {
        return Ok(());
    }

    let output = fs::File::create(&gz_path)?;
    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)?;
    Ok(())
}
