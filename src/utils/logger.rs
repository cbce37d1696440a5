use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Log output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text format with timestamp, level, target, and message
    Text,
    /// JSON format with structured fields: timestamp, level, target, message
    Json,
}

impl LogFormat {
    /// Parses a format string from environment or returns the default Text format
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use fpkit::utils::logger::LogFormat;
    ///
    /// assert_eq!(LogFormat::from_env_or_default(), LogFormat::Text); // default
    /// std::env::set_var("FPKIT_LOG_FORMAT", "json");
    /// assert_eq!(LogFormat::from_env_or_default(), LogFormat::Json);
    /// ```
    pub fn from_env_or_default() -> Self {
        std::env::var("FPKIT_LOG_FORMAT")
            .ok()
            .and_then(|s| Self::parse(&s))
            .unwrap_or(LogFormat::Text)
    }

    /// Parses `text` or `json`, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "json" => Some(LogFormat::Json),
            "text" => Some(LogFormat::Text),
            _ => None,
        }
    }
}

/// In-memory sink for formatted log lines.
///
/// Cloning shares the underlying buffer, so a test can keep one handle while the
/// subscriber writes through another.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    lines: Arc<Mutex<Vec<String>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a formatted line.
    ///
    /// A buffer poisoned by a panicking writer is recovered rather than skipped.
    pub fn push(&self, line: String) {
        self.buffer().push(line);
    }

    /// Returns a snapshot of every captured line.
    pub fn lines(&self) -> Vec<String> {
        self.buffer().clone()
    }

    /// Returns `true` if any captured line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.buffer().iter().any(|line| line.contains(needle))
    }

    pub fn clear(&self) {
        self.buffer().clear();
    }

    fn buffer(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Tracing layer that formats every event into a [`LogCapture`].
pub struct CaptureLayer {
    capture: LogCapture,
    format: LogFormat,
}

impl CaptureLayer {
    /// Creates a new `CaptureLayer` writing to `capture` in the given format.
    pub fn new(capture: LogCapture, format: LogFormat) -> Self {
        CaptureLayer { capture, format }
    }
}

impl<S> tracing_subscriber::Layer<S> for CaptureLayer
where
    S: tracing::Subscriber,
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        let message = format_log_event(event, metadata.level(), metadata, self.format);
        self.capture.push(message);
    }
}

#[cfg(feature = "datetime")]
fn timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S%.3f")
        .to_string()
}

#[cfg(not(feature = "datetime"))]
fn timestamp() -> String {
    let since_epoch = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:03}", since_epoch.as_secs(), since_epoch.subsec_millis())
}

/// Formats a tracing event into a log line using the specified format.
///
/// Events without a message field are rendered as `[no message]`.
pub fn format_log_event(
    event: &tracing::Event<'_>,
    level: &tracing::Level,
    metadata: &tracing::Metadata<'_>,
    format: LogFormat,
) -> String {
    let timestamp = timestamp();
    let target = metadata.target();

    let mut visitor = LogVisitor::default();
    event.record(&mut visitor);

    let message = if visitor.message.is_empty() {
        "[no message]".to_string()
    } else {
        visitor.message
    };

    match format {
        LogFormat::Text => format!("[{}] {} [{}] {}", timestamp, level, target, message),
        LogFormat::Json => serde_json::json!({
            "timestamp": timestamp,
            "level": level.to_string(),
            "target": target,
            "message": message,
        })
        .to_string(),
    }
}

/// A visitor that extracts the message from a tracing event.
#[derive(Default)]
struct LogVisitor {
    message: String,
}

impl tracing::field::Visit for LogVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        }
    }
}

/// Runs `f` with every toolkit log record routed into `capture`.
///
/// The `log` records emitted by the toolkit are bridged into tracing and handled by
/// a thread-local subscriber, so concurrent tests do not see each other's lines.
///
/// # Examples
///
/// ```no_run
/// use fpkit::utils::logger::{with_capture, LogCapture, LogFormat};
///
/// let capture = LogCapture::new();
/// with_capture(&capture, LogFormat::Text, || log::info!("hello"));
/// assert!(capture.contains("hello"));
/// ```
pub fn with_capture<T>(capture: &LogCapture, format: LogFormat, f: impl FnOnce() -> T) -> T {
    let _ = tracing_log::LogTracer::init();

    let subscriber = tracing_subscriber::registry().with(CaptureLayer::new(capture.clone(), format));
    tracing::subscriber::with_default(subscriber, f)
}

/// Initializes the global tracing subscriber with console output and env filter.
///
/// Sets up:
/// - `fmt::layer()` for console output with targets, files and line numbers
/// - `EnvFilter` from `RUST_LOG`, defaulting to `info`
/// - the log-to-tracing bridge so the toolkit's `log` records are visible
///
/// This function is safe to call multiple times. If a global subscriber is already
/// set, it returns `Ok(())` (idempotent).
pub fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    use tracing_log::LogTracer;
    use tracing_subscriber::fmt;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let format = LogFormat::from_env_or_default();

    let _ = LogTracer::init();

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_file(true).with_line_number(true))
            .try_init(),
        LogFormat::Json => registry.with(fmt::layer().json().with_target(true)).try_init(),
    };

    if let Err(e) = result {
        // Another subscriber won the race; keep it and report success.
        eprintln!(
            "Tracing subscriber already initialized or failed to initialize: {:?}",
            e
        );
    }
    Ok(())
}
