//! Console Logger
//!
//! `log` backend for WASM front ends. Records are written to the browser
//! console with the matching console method per level. On native targets
//! (tests, tooling) the same lines go to stderr.

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Logger that prefixes every record with a timestamp and the app name
pub struct ConsoleLogger {
    app_name: String,
    level: LevelFilter,
}

impl ConsoleLogger {
    pub fn new(app_name: impl Into<String>, level: LevelFilter) -> Self {
        Self {
            app_name: app_name.into(),
            level,
        }
    }

    fn format_record(&self, record: &Record) -> String {
        let time = chrono::Local::now().format("%H:%M:%S%.3f").to_string();
        format_line(&time, &self.app_name, record.level(), record.target(), &record.args().to_string())
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        write_line(record.level(), &self.format_record(record));
    }

    fn flush(&self) {}
}

/// Build one output line: `[time][app][LEVEL][target] message`
pub fn format_line(time: &str, app_name: &str, level: Level, target: &str, message: &str) -> String {
    format!("[{}][{}][{}][{}] {}", time, app_name, level, target, message)
}

/// Parse a level name ("error", "warn", "info", "debug", "trace", "off").
/// Unknown names fall back to `Info`.
pub fn parse_level(name: &str) -> LevelFilter {
    name.trim().parse().unwrap_or(LevelFilter::Info)
}

#[cfg(target_arch = "wasm32")]
fn write_line(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        Level::Info => web_sys::console::info_1(&value),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_line(_level: Level, line: &str) {
    eprintln!("{}", line);
}

/// Install the console logger as the global `log` backend
pub fn init_logger(app_name: &str, level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(ConsoleLogger::new(app_name, level)))?;
    log::set_max_level(level);
    Ok(())
}
