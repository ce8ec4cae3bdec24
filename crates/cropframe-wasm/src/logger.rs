//! `log` backend that forwards records to the browser console.
//!
//! The core crate logs through the `log` facade; installing [`ConsoleLogger`]
//! makes those records visible in DevTools with the matching console level.

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Forwards `log` records to `console.error/warn/info/debug`.
pub struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = format_record(record.level(), record.target(), &record.args().to_string());
        write_console(record.level(), &message);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: Level, message: &str) {
    use wasm_bindgen::JsValue;
    use web_sys::console;

    let value = JsValue::from_str(message);
    match level {
        Level::Error => console::error_1(&value),
        Level::Warn => console::warn_1(&value),
        Level::Info => console::info_1(&value),
        Level::Debug | Level::Trace => console::debug_1(&value),
    }
}

// Console imports only exist on wasm32; native builds (tests) discard records.
#[cfg(not(target_arch = "wasm32"))]
fn write_console(_level: Level, _message: &str) {}

/// Install the console logger. Later calls only adjust the level.
pub fn install(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_err() {
        log::debug!("console logger already installed");
    }
    log::set_max_level(level);
}

/// Parse a level name as accepted by `set_log_level`.
pub(crate) fn level_from_name(name: &str) -> Option<LevelFilter> {
    match name.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

fn format_record(level: Level, target: &str, message: &str) -> String {
    format!("[{} {}] {}", level, target, message)
}
