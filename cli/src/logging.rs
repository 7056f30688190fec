//! JSON-lines logs on stderr, one object per event.

use std::io::Write;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct LogEvent<'a> {
    level: &'a str,
    event: &'a str,
    message: &'a str,
    timestamp_ms: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<Value>,
}

fn render(level: Level, event: &str, message: &str, metadata: Option<Value>) -> String {
    let entry = LogEvent {
        level: level_name(level),
        event,
        message,
        timestamp_ms: chrono::Utc::now().timestamp_millis(),
        metadata,
    };

    serde_json::to_string(&entry).unwrap_or_else(|err| {
        format!(
            "{{\"level\":\"error\",\"event\":\"logging_failure\",\"message\":\"failed to serialise log\",\"error\":\"{err}\"}}"
        )
    })
}

fn level_name(level: Level) -> &'static str {
    match level {
        Level::Error => "error",
        Level::Warn => "warn",
        Level::Info => "info",
        Level::Debug => "debug",
        Level::Trace => "trace",
    }
}

fn emit(level: Level, event: &str, message: &str, metadata: Option<Value>) {
    let line = render(level, event, message, metadata);
    let _ = writeln!(std::io::stderr().lock(), "{line}");
}

/// `log` backend; the record target becomes the event name.
struct JsonLogger {
    level: LevelFilter,
}

impl Log for JsonLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            emit(record.level(), record.target(), &record.args().to_string(), None);
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

pub fn init(verbose: bool) -> Result<(), SetLoggerError> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    log::set_boxed_logger(Box::new(JsonLogger { level }))?;
    log::set_max_level(level);
    Ok(())
}

fn emit_if_enabled(level: Level, event: &str, message: &str, metadata: Value) {
    if log::log_enabled!(target: event, level) {
        emit(level, event, message, Some(metadata));
    }
}

pub fn info(event: &str, message: &str, metadata: Value) {
    emit_if_enabled(Level::Info, event, message, metadata);
}

pub fn warn(event: &str, message: &str, metadata: Value) {
    emit_if_enabled(Level::Warn, event, message, metadata);
}

pub fn error(event: &str, message: &str, metadata: Value) {
    emit_if_enabled(Level::Error, event, message, metadata);
}

pub fn metadata_from_pairs(pairs: &[(&str, Value)]) -> Value {
    let mut obj = serde_json::Map::with_capacity(pairs.len());
    for (key, value) in pairs {
        obj.insert((*key).to_string(), value.clone());
    }
    Value::Object(obj)
}
