//! Console logging bootstrap.
//!
//! # Invariants
//! - Initialization happens at most once per page; repeating it with the
//!   same level is a no-op, a different level is rejected.
//! - Initialization never panics.

use log::{Level, LevelFilter, Log, Metadata, Record};
use once_cell::sync::OnceCell;

use super::error::{Result, UiError};

const LOG_PREFIX: &str = "[netrun-site-ui]";

static LOGGER: OnceCell<&'static ConsoleLogger> = OnceCell::new();

struct ConsoleLogger {
    level: LevelFilter,
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record.level(), record.target(), &record.args().to_string());
        emit(record.level(), &line);
    }

    fn flush(&self) {}
}

fn format_record(level: Level, target: &str, message: &str) -> String {
    format!("{LOG_PREFIX} {level:<5} {target}: {message}")
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    use wasm_bindgen::JsValue;
    use web_sys::console;

    let value = JsValue::from_str(line);
    match level {
        Level::Error => console::error_1(&value),
        Level::Warn => console::warn_1(&value),
        Level::Info => console::info_1(&value),
        Level::Debug | Level::Trace => console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{line}");
}

/// Installs the console logger at `level` (`off`, `error`, `warn`, `info`,
/// `debug`, `trace`; case-insensitive).
///
/// # Errors
/// - Unsupported level string.
/// - Logging already initialized with a different level.
/// - Another `log` implementation was installed first.
pub fn init_logging(level: &str) -> Result<()> {
    let level = parse_level(level)?;

    install_once(&LOGGER, level, |logger| {
        log::set_logger(logger).map_err(|err| UiError::Logging(err.to_string()))
    })?;
    log::set_max_level(level);
    Ok(())
}

/// Records the logger in `cell` only once `set` has accepted it, so a
/// failed registration leaves the cell empty and a retry tries again.
fn install_once(
    cell: &OnceCell<&'static ConsoleLogger>,
    level: LevelFilter,
    set: impl FnOnce(&'static ConsoleLogger) -> Result<()>,
) -> Result<()> {
    if let Some(existing) = cell.get() {
        if existing.level == level {
            return Ok(());
        }
        return Err(UiError::Logging(format!(
            "logging already initialized at `{}`; refusing to switch to `{}`",
            existing.level, level
        )));
    }

    cell.get_or_try_init(|| -> Result<&'static ConsoleLogger> {
        let logger: &'static ConsoleLogger = Box::leak(Box::new(ConsoleLogger { level }));
        set(logger)?;
        Ok(logger)
    })?;
    Ok(())
}

fn parse_level(level: &str) -> Result<LevelFilter> {
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| UiError::Logging(format!("unsupported log level `{level}`")))
}
