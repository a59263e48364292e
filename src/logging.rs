//! Structured JSONL logging plus human-readable stderr output.
//!
//! - **JSONL to file** (`<data dir>/logs/sticky-notes.jsonl`), one object per line
//! - **Compact to stderr** for whoever launched the process
//!
//! ```rust,ignore
//! let _guard = sticky_notes::logging::init(&config.data_dir().join("logs"));
//! tracing::info!(note_id = %id, "Note created");
//! ```
//!
//! Each JSONL line looks like:
//! ```json
//! {"timestamp":"2026-01-05T10:30:45.123Z","level":"INFO","target":"sticky_notes::window::controller","fields":{"message":"Note window opened","window_id":"1"}}
//! ```

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use time::format_description::FormatItem;
use time::macros::format_description;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_FILE_NAME: &str = "sticky-notes.jsonl";

const DEFAULT_FILTER: &str = "info";

/// UTC, millisecond precision: `2026-01-05T10:30:45.123Z`
const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

/// Keep alive for the life of the program. Dropping it flushes the log file.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

pub fn log_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE_NAME)
}

/// Install the global subscriber.
///
/// Never fails: if the log file cannot be opened, file output is discarded
/// and stderr still works. A second call leaves the first subscriber in place.
pub fn init(log_dir: &Path) -> LoggingGuard {
    if let Err(e) = fs::create_dir_all(log_dir) {
        eprintln!("[LOGGING] Failed to create log directory: {}", e);
    }

    let path = log_path(log_dir);
    let file: Box<dyn Write + Send> = match OpenOptions::new().create(true).append(true).open(&path)
    {
        Ok(file) => Box::new(file),
        Err(e) => {
            eprintln!("[LOGGING] Failed to open {}: {}", path.display(), e);
            Box::new(std::io::sink())
        }
    };

    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file);

    // RUST_LOG overrides
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let json_layer = fmt::layer()
        .json()
        .with_writer(non_blocking_file)
        .with_timer(fmt::time::UtcTime::new(TIMESTAMP_FORMAT))
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::NONE);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .compact();

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(stderr_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(
            event_type = "app_lifecycle",
            action = "started",
            log_path = %path.display(),
            "Logging initialized"
        );
    }

    LoggingGuard {
        _file_guard: file_guard,
    }
}
