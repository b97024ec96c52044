//! Load outcome reporting.
//!
//! Loading is the only part of the crate that touches the outside world, so it is the only part
//! that reports. Outcomes go to an [`IngestionObserver`]; the crate ships a stderr logger, an
//! append-only file logger and a fan-out combinator.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::IngestionError;

use super::unified::IngestionFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (the load failed on bad input).
    Error,
    /// Critical error (I/O and other infrastructure failures).
    Critical,
}

impl IngestionSeverity {
    /// Classify a load failure.
    ///
    /// I/O failures (directly or wrapped by the delimited-text reader) are critical; malformed or
    /// mis-shaped input is an error.
    pub fn of(error: &IngestionError) -> Self {
        match error {
            IngestionError::Io(_) => IngestionSeverity::Critical,
            IngestionError::Csv(err) => match err.kind() {
                csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
                _ => IngestionSeverity::Error,
            },
            IngestionError::Json(err) if err.is_io() => IngestionSeverity::Critical,
            IngestionError::Json(_) | IngestionError::SchemaMismatch { .. } => IngestionSeverity::Error,
        }
    }
}

/// Context about a load attempt.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    /// The input path.
    pub path: PathBuf,
    /// Format used to read it.
    pub format: IngestionFormat,
}

/// Stats reported on a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionStats {
    /// Number of loaded rows.
    pub rows: usize,
    /// Number of columns in the resulting schema.
    pub columns: usize,
}

/// Observer interface for load outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait IngestionObserver: Send + Sync {
    /// Called when a load succeeds.
    fn on_success(&self, _ctx: &IngestionContext, _stats: IngestionStats) {}

    /// Called when a load fails.
    fn on_failure(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _error: &IngestionError) {}

    /// Called when a load failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Forwards every callback to each wrapped observer, in order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn IngestionObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn IngestionObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompositeObserver({} observers)", self.observers.len())
    }
}

impl IngestionObserver for CompositeObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.observers.iter().for_each(|o| o.on_success(ctx, stats));
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.observers.iter().for_each(|o| o.on_failure(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.observers.iter().for_each(|o| o.on_alert(ctx, severity, error));
    }
}

/// One load outcome as a single log line, shared by the line-oriented observers.
enum LoadEvent<'a> {
    Loaded(&'a IngestionContext, IngestionStats),
    Failed(&'a IngestionContext, IngestionSeverity, &'a IngestionError),
    Alert(&'a IngestionContext, IngestionSeverity, &'a IngestionError),
}

impl fmt::Display for LoadEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (label, ctx) = match self {
            LoadEvent::Loaded(ctx, _) => ("ok", ctx),
            LoadEvent::Failed(ctx, ..) => ("fail", ctx),
            LoadEvent::Alert(ctx, ..) => ("ALERT", ctx),
        };
        write!(f, "{label} format={:?} path={}", ctx.format, ctx.path.display())?;
        match self {
            LoadEvent::Loaded(_, stats) => write!(f, " rows={} columns={}", stats.rows, stats.columns),
            LoadEvent::Failed(_, severity, error) | LoadEvent::Alert(_, severity, error) => {
                write!(f, " severity={severity:?} err={error}")
            }
        }
    }
}

/// Logs load events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl StdErrObserver {
    fn emit(&self, event: LoadEvent<'_>) {
        eprintln!("[tabular-reshaper] {event}");
    }
}

impl IngestionObserver for StdErrObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.emit(LoadEvent::Loaded(ctx, stats));
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.emit(LoadEvent::Failed(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.emit(LoadEvent::Alert(ctx, severity, error));
    }
}

/// Appends load events, one timestamped line each, to a log file.
///
/// The file is opened on the first event and kept open. Logging is best-effort: open and write
/// failures are dropped so they never turn a successful load into a failed one.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl FileObserver {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file: Mutex::new(None),
        }
    }

    fn emit(&self, event: LoadEvent<'_>) {
        let Ok(mut slot) = self.file.lock() else {
            return;
        };
        if slot.is_none() {
            *slot = OpenOptions::new().create(true).append(true).open(&self.path).ok();
        }
        if let Some(file) = slot.as_mut() {
            let _ = writeln!(file, "{} {event}", unix_ts());
        }
    }
}

impl IngestionObserver for FileObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.emit(LoadEvent::Loaded(ctx, stats));
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.emit(LoadEvent::Failed(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.emit(LoadEvent::Alert(ctx, severity, error));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
