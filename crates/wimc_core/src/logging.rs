//! Logging bootstrap for the client core.
//!
//! # Responsibility
//! - Start size-rotated file logs once per process.
//! - Capture panics as single-line log events with attachment content redacted.
//!
//! # Invariants
//! - Events carry ids, entity names, statuses and timings only; entity
//!   payloads and attachment content are never logged.
//! - Init is idempotent for identical arguments and rejects reconfiguration.
//! - Initialization never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info, LevelFilter};
use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;
use std::any::Any;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "whereismycomic";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;
const BUILD_MODE: &str = if cfg!(debug_assertions) {
    "debug"
} else {
    "release"
};

/// Runs of base64 long enough to be attachment content rather than an id.
static BASE64_BLOB_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9+/]{64,}={0,2}").expect("valid base64 blob regex"));

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();
static PANIC_HOOK_INSTALLED: OnceCell<()> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    log_dir: PathBuf,
    _handle: LoggerHandle,
}

/// Starts file logging at `level` under the absolute directory `log_dir`.
///
/// Returns a human-readable message on failure.
///
/// # Errors
/// - `level` is not one of `trace|debug|info|warn|error`.
/// - `log_dir` is empty, relative, or cannot be created.
/// - Logging is already active with a different level or directory.
/// - The logger backend fails to start.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let level = normalize_level(level)?;
    let log_dir = normalize_log_dir(log_dir)?;

    if let Some(state) = LOGGING_STATE.get() {
        return state.ensure_matches(level, &log_dir);
    }

    let state = LOGGING_STATE.get_or_try_init(|| start_logger(level, &log_dir))?;
    state.ensure_matches(level, &log_dir)
}

impl LoggingState {
    fn ensure_matches(&self, level: &str, log_dir: &Path) -> Result<(), String> {
        if self.log_dir != log_dir {
            return Err(format!(
                "logging already initialized at `{}`; refusing to switch to `{}`",
                self.log_dir.display(),
                log_dir.display()
            ));
        }
        if self.level != level {
            return Err(format!(
                "logging already initialized with level `{}`; refusing to switch to `{}`",
                self.level, level
            ));
        }
        Ok(())
    }
}

fn start_logger(level: &'static str, log_dir: &Path) -> Result<LoggingState, String> {
    std::fs::create_dir_all(log_dir).map_err(|err| {
        format!(
            "failed to create log directory `{}`: {err}",
            log_dir.display()
        )
    })?;

    let handle = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    install_panic_hook_once();

    info!(
        "event=client_start module=core status=ok platform={} build_mode={} version={} level={} log_dir={}",
        std::env::consts::OS,
        BUILD_MODE,
        env!("CARGO_PKG_VERSION"),
        level,
        log_dir.display()
    );

    Ok(LoggingState {
        level,
        log_dir: log_dir.to_path_buf(),
        _handle: handle,
    })
}

/// Returns the default log level for current build mode.
///
/// - `debug` builds -> `debug`
/// - `release` builds -> `info`
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    let trimmed = level.trim();
    trimmed
        .parse::<LevelFilter>()
        .ok()
        .and_then(level_name)
        .ok_or_else(|| {
            format!("unsupported log level `{trimmed}`; expected trace|debug|info|warn|error")
        })
}

fn level_name(filter: LevelFilter) -> Option<&'static str> {
    match filter {
        LevelFilter::Trace => Some("trace"),
        LevelFilter::Debug => Some("debug"),
        LevelFilter::Info => Some("info"),
        LevelFilter::Warn => Some("warn"),
        LevelFilter::Error => Some("error"),
        LevelFilter::Off => None,
    }
}

fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(log_dir.trim());
    if path.as_os_str().is_empty() {
        return Err("log directory cannot be empty".to_string());
    }
    if path.is_relative() {
        return Err(format!(
            "log directory must be an absolute path, got `{}`",
            path.display()
        ));
    }
    Ok(path)
}

fn install_panic_hook_once() {
    PANIC_HOOK_INSTALLED.get_or_init(|| {
        let previous_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let location = panic_info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_else(|| "unknown".to_string());
            error!(
                "event=panic_captured module=core status=error location={} payload={}",
                location,
                redact_payload(&payload_text(panic_info.payload()))
            );
            previous_hook(panic_info);
        }));
    });
}

fn payload_text(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string())
}

/// Collapses whitespace, masks base64 attachment content and caps the length.
fn redact_payload(text: &str) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let masked = BASE64_BLOB_RE.replace_all(&single_line, |caps: &regex::Captures<'_>| {
        format!("<base64 {} chars>", caps[0].len())
    });
    if masked.chars().count() <= MAX_PANIC_PAYLOAD_CHARS {
        return masked.into_owned();
    }
    let mut capped = masked
        .chars()
        .take(MAX_PANIC_PAYLOAD_CHARS)
        .collect::<String>();
    capped.push_str("...");
    capped
}

#[cfg(test)]
mod tests {
    use super::{init_logging, normalize_level, normalize_log_dir, redact_payload};

    #[test]
    fn levels_parse_case_insensitively_and_reject_off() {
        assert_eq!(normalize_level("INFO").expect("INFO should parse"), "info");
        assert_eq!(normalize_level(" Warn ").expect("Warn should parse"), "warn");
        assert!(normalize_level("off").is_err());
        assert!(normalize_level("verbose").is_err());
    }

    #[test]
    fn log_dir_must_be_absolute_and_non_empty() {
        let error = normalize_log_dir("logs/dev").expect_err("relative paths must be rejected");
        assert!(error.contains("absolute"));
        assert!(normalize_log_dir("   ").is_err());
    }

    #[test]
    fn redaction_masks_thumbnail_content() {
        let thumbnail = "iVBORw0KGgo".repeat(10);
        let redacted = redact_payload(&format!("bad comic\nthumbnail={thumbnail}"));
        assert_eq!(redacted, "bad comic thumbnail=<base64 110 chars>");
    }

    #[test]
    fn redaction_caps_long_text() {
        let redacted = redact_payload(&"word ".repeat(100));
        assert!(redacted.ends_with("..."));
        assert_eq!(redacted.chars().count(), super::MAX_PANIC_PAYLOAD_CHARS + 3);
    }

    #[test]
    fn init_logging_is_idempotent_for_same_config_and_rejects_conflicts() {
        let log_dir = tempfile::tempdir().expect("temp dir should be created");
        let second_dir = tempfile::tempdir().expect("temp dir should be created");
        let log_dir_str = log_dir.path().to_str().expect("utf-8 temp path");
        let second_dir_str = second_dir.path().to_str().expect("utf-8 temp path");

        init_logging("info", log_dir_str).expect("first init should succeed");
        init_logging("info", log_dir_str).expect("same config should be idempotent");

        let level_error =
            init_logging("debug", log_dir_str).expect_err("level conflict should fail");
        assert!(level_error.contains("refusing to switch"));

        let dir_error =
            init_logging("info", second_dir_str).expect_err("directory conflict should fail");
        assert!(dir_error.contains("refusing to switch"));

        init_logging("INFO", log_dir_str).expect("original config stays active");
    }
}
