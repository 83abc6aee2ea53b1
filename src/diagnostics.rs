//! Diagnostics sinks and logging setup
//!
//! Classifiers report swallowed errors through an injected [`Diagnostics`]
//! sink instead of a process-wide logger. [`TracingDiagnostics`] forwards to
//! `tracing`; [`MemoryDiagnostics`] keeps entries in memory so callers can
//! assert on them.

use std::fmt;
use std::sync::{Mutex, MutexGuard};

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{self, FormatEvent, FormatFields};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

use crate::error::ClassifyError;
use crate::types::Operation;

/// Receives errors that a classifier recovered from
pub trait Diagnostics: Send + Sync {
    /// Called exactly once per failed compatibility-form operation
    fn operation_failed(&self, operation: Operation, error: &ClassifyError);
}

/// Human-readable line for a failed operation
pub fn failure_message(operation: Operation, error: &ClassifyError) -> String {
    format!("Error in {operation}: {error}")
}

/// Forwards failures to `tracing` at ERROR level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn operation_failed(&self, operation: Operation, error: &ClassifyError) {
        tracing::error!("{}", failure_message(operation, error));
    }
}

/// A captured diagnostic
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticEntry {
    pub level: Level,
    pub operation: Operation,
    pub kind: &'static str,
    pub message: String,
}

/// In-memory diagnostics sink
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    entries: Mutex<Vec<DiagnosticEntry>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all captured entries
    pub fn entries(&self) -> Vec<DiagnosticEntry> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<DiagnosticEntry>> {
        // A panic while holding the lock cannot leave the Vec half-written
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn operation_failed(&self, operation: Operation, error: &ClassifyError) {
        self.lock().push(DiagnosticEntry {
            level: Level::ERROR,
            operation,
            kind: error.kind(),
            message: failure_message(operation, error),
        });
    }
}

// ============================================================================
// Log formatting
// ============================================================================

/// Formats events as `YYYY-MM-DD HH:MM:SS,mmm - LEVEL - message`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogLineFormat;

impl<S, N> FormatEvent<S, N> for LogLineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f");
        write!(writer, "{} - {} - ", timestamp, event.metadata().level())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Install the global subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over `default_directive`. Returns `false` if a
/// global subscriber was already installed.
pub fn init_logging(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .event_format(LogLineFormat)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_memory_diagnostics_capture() {
        let sink = MemoryDiagnostics::new();
        assert!(sink.is_empty());

        let err = ClassifyError::EmptyInput(Operation::DetectFixation);
        sink.operation_failed(Operation::DetectFixation, &err);

        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, Level::ERROR);
        assert_eq!(entries[0].operation, Operation::DetectFixation);
        assert_eq!(entries[0].kind, "empty_input");
        assert!(entries[0].message.contains("detect_fixation"));

        sink.clear();
        assert_eq!(sink.len(), 0);
    }

    #[test]
    fn test_tracing_diagnostics_line_format() {
        let buffer = SharedBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .event_format(LogLineFormat)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let err = ClassifyError::EmptyInput(Operation::AnalyzePupillometry);
            TracingDiagnostics.operation_failed(Operation::AnalyzePupillometry, &err);
        });

        let output = buffer.contents();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 1);

        let parts: Vec<&str> = lines[0].splitn(3, " - ").collect();
        assert_eq!(parts.len(), 3);
        let (seconds, millis) = parts[0].split_once(',').unwrap();
        assert!(chrono::NaiveDateTime::parse_from_str(seconds, "%Y-%m-%d %H:%M:%S").is_ok());
        assert_eq!(millis.len(), 3);
        assert_eq!(parts[1], "ERROR");
        assert_eq!(
            parts[2],
            "Error in analyze_pupillometry: Empty input: analyze_pupillometry received no samples"
        );
    }
}
