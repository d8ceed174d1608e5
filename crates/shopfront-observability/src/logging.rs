//! Request-scoped structured logging.
//!
//! Every entry carries the request id and, when known, the route or server
//! function that produced it. Spin forwards stderr to its log files, so the
//! default sink writes one JSON object per line there. Tests swap in
//! [`LogSink::memory`] and inspect what was logged.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use serde::Serialize;
use serde_json::Value;

use crate::RequestId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Environment variable holding the minimum level (`debug`, `info`, ...).
pub const LOG_LEVEL_VAR: &str = "SHOPFRONT_LOG_LEVEL";
/// Environment variable selecting `json` or `human` output.
pub const LOG_FORMAT_VAR: &str = "SHOPFRONT_LOG_FORMAT";

impl LogLevel {
    /// Case-insensitive level name; `warning` is accepted for `warn`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One emitted log line.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    /// Extra key/value pairs, flattened into the JSON object.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
    /// Microseconds since the logger was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_us: Option<u64>,
}

impl LogEntry {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }

    /// `[LEVEL] message (Nus) | k=v k=v`, fields in key order.
    pub fn to_human(&self) -> String {
        let mut line = format!("[{}] {}", self.level, self.message);
        if let Some(us) = self.elapsed_us {
            line += &format!(" ({}us)", us);
        }
        if !self.fields.is_empty() {
            let pairs: Vec<String> = self
                .fields
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect();
            line += " | ";
            line += &pairs.join(" ");
        }
        line
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub enum LogFormat {
    #[default]
    Json,
    /// Readable lines for local `spin up` sessions.
    Human,
}

impl LogFormat {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "human" | "text" => Some(Self::Human),
            _ => None,
        }
    }
}

/// Destination of log entries.
#[derive(Debug, Clone, Default)]
pub enum LogSink {
    #[default]
    Stderr,
    /// Collects entries for later inspection.
    Memory(Arc<Mutex<Vec<LogEntry>>>),
}

impl LogSink {
    pub fn memory() -> Self {
        Self::Memory(Arc::default())
    }

    /// What a memory sink has collected so far. Always empty for stderr.
    pub fn entries(&self) -> Vec<LogEntry> {
        match self {
            Self::Stderr => Vec::new(),
            Self::Memory(store) => store.lock().map(|v| v.clone()).unwrap_or_default(),
        }
    }

    fn write(&self, entry: LogEntry, format: LogFormat) {
        match self {
            Self::Stderr => match format {
                LogFormat::Json => eprintln!("{}", entry.to_json()),
                LogFormat::Human => eprintln!("{}", entry.to_human()),
            },
            Self::Memory(store) => {
                if let Ok(mut entries) = store.lock() {
                    entries.push(entry);
                }
            }
        }
    }
}

/// Logger bound to one request.
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    request_id: RequestId,
    route: Option<String>,
    started: Instant,
    min_level: LogLevel,
    format: LogFormat,
    sink: LogSink,
}

impl StructuredLogger {
    pub fn new(request_id: RequestId) -> Self {
        Self {
            request_id,
            route: None,
            started: Instant::now(),
            min_level: LogLevel::Info,
            format: LogFormat::default(),
            sink: LogSink::default(),
        }
    }

    /// Logger for a new request on `route`, with a generated request id and
    /// level and format taken from the environment.
    pub fn for_route(route: impl Into<String>) -> Self {
        Self::new(RequestId::generate())
            .with_route(route)
            .with_env_settings(|key| std::env::var(key).ok())
    }

    /// Apply `SHOPFRONT_LOG_LEVEL` and `SHOPFRONT_LOG_FORMAT` from `lookup`.
    /// Unset or unknown values keep the current setting.
    pub fn with_env_settings(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(level) = lookup(LOG_LEVEL_VAR).as_deref().and_then(LogLevel::parse) {
            self.min_level = level;
        }
        if let Some(format) = lookup(LOG_FORMAT_VAR).as_deref().and_then(LogFormat::parse) {
            self.format = format;
        }
        self
    }

    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_sink(mut self, sink: LogSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    /// Start an entry at `level`. Nothing is written until
    /// [`LogBuilder::emit`].
    pub fn entry(&self, level: LogLevel, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder {
            logger: self,
            level,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn debug_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.entry(LogLevel::Debug, message)
    }

    pub fn info_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.entry(LogLevel::Info, message)
    }

    pub fn warn_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.entry(LogLevel::Warn, message)
    }

    pub fn error_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.entry(LogLevel::Error, message)
    }

    fn write(&self, level: LogLevel, message: String, fields: BTreeMap<String, Value>) {
        if level < self.min_level {
            return;
        }
        let entry = LogEntry {
            level,
            message,
            request_id: self.request_id.to_string(),
            route: self.route.clone(),
            fields,
            elapsed_us: Some(self.started.elapsed().as_micros() as u64),
        };
        self.sink.write(entry, self.format);
    }
}

/// Fluent builder returned by [`StructuredLogger::entry`] and friends.
#[must_use = "call emit() to write the entry"]
pub struct LogBuilder<'a> {
    logger: &'a StructuredLogger,
    level: LogLevel,
    message: String,
    fields: BTreeMap<String, Value>,
}

impl LogBuilder<'_> {
    fn insert(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn field(self, key: &str, value: impl Into<String>) -> Self {
        self.insert(key, Value::String(value.into()))
    }

    /// Skipped when `value` is `None`.
    pub fn field_opt(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.field(key, v),
            None => self,
        }
    }

    pub fn field_i64(self, key: &str, value: i64) -> Self {
        self.insert(key, Value::from(value))
    }

    pub fn field_bool(self, key: &str, value: bool) -> Self {
        self.insert(key, Value::Bool(value))
    }

    pub fn emit(self) {
        self.logger.write(self.level, self.message, self.fields);
    }
}
