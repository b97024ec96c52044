//! Unified ingestion entrypoint.
//!
//! Most callers should use [`ingest_from_path`], which loads a file into an in-memory
//! [`crate::types::DataSet`].
//!
//! - If [`IngestionOptions::format`] is `None`, the format is inferred from the file extension.
//! - If [`IngestionOptions::coerce_numbers`] is set, numeric-looking cells become numbers.
//! - If an [`super::observability::IngestionObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, Schema};

use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};
use super::{csv, json};

/// Supported ingestion formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionFormat {
    /// Comma-separated values.
    Csv,
    /// Tab-separated values.
    Tsv,
    /// JSON array-of-objects or NDJSON.
    Json,
}

impl IngestionFormat {
    /// Parse an ingestion format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "tsv" | "tab" => Some(Self::Tsv),
            "json" | "ndjson" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Options controlling unified ingestion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// If `None`, auto-detect format from file extension.
    pub format: Option<IngestionFormat>,
    /// If set, keep only these columns, in this order.
    ///
    /// Delimited input must have every column in its header. JSON resolves dot paths into nested
    /// objects and reads absent keys as null.
    pub schema: Option<Schema>,
    /// Replace numeric-looking cells with numbers after loading.
    pub coerce_numbers: bool,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("schema", &self.schema)
            .field("coerce_numbers", &self.coerce_numbers)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            schema: None,
            coerce_numbers: false,
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Unified ingestion entry point for path-based sources.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ## CSV (auto-detect by extension), then coerce numbers
///
/// ```no_run
/// use tabular_reshaper::ingestion::{ingest_from_path, IngestionOptions};
///
/// # fn main() -> Result<(), tabular_reshaper::IngestionError> {
/// let opts = IngestionOptions {
///     coerce_numbers: true,
///     ..Default::default()
/// };
/// let ds = ingest_from_path("scores.csv", &opts)?;
/// println!("rows={} columns={:?}", ds.row_count(), ds.schema.columns);
/// # Ok(())
/// # }
/// ```
///
/// ## JSON with a column selection (nested field paths)
///
/// ```no_run
/// use tabular_reshaper::ingestion::{ingest_from_path, IngestionOptions};
/// use tabular_reshaper::types::Schema;
///
/// # fn main() -> Result<(), tabular_reshaper::IngestionError> {
/// let opts = IngestionOptions {
///     schema: Some(Schema::new(["id", "user.name"])),
///     ..Default::default()
/// };
/// let ds = ingest_from_path("events.ndjson", &opts)?;
/// println!("rows={}", ds.row_count());
/// # Ok(())
/// # }
/// ```
///
/// ## Observability (stderr logging + alert threshold)
///
/// ```no_run
/// use std::sync::Arc;
///
/// use tabular_reshaper::ingestion::{
///     ingest_from_path, IngestionFormat, IngestionOptions, IngestionSeverity, StdErrObserver,
/// };
///
/// let opts = IngestionOptions {
///     format: Some(IngestionFormat::Tsv),
///     observer: Some(Arc::new(StdErrObserver)),
///     alert_at_or_above: IngestionSeverity::Critical,
///     ..Default::default()
/// };
///
/// // Missing files are treated as Critical and will trigger `on_alert` at this threshold.
/// let _err = ingest_from_path("does_not_exist", &opts).unwrap_err();
/// ```
pub fn ingest_from_path(path: impl AsRef<Path>, options: &IngestionOptions) -> IngestionResult<DataSet> {
    let path = path.as_ref();
    let fmt = match options.format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };

    let ctx = IngestionContext {
        path: path.to_path_buf(),
        format: fmt,
    };

    let schema = options.schema.as_ref();
    let mut result = match fmt {
        IngestionFormat::Csv => csv::ingest_csv_from_path(path, schema),
        IngestionFormat::Tsv => csv::ingest_tsv_from_path(path, schema),
        IngestionFormat::Json => json::ingest_json_from_path(path, schema),
    };

    if options.coerce_numbers {
        if let Ok(ds) = result.as_mut() {
            ds.coerce_numbers_in_place();
        }
    }

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(ds) => obs.on_success(
                &ctx,
                IngestionStats {
                    rows: ds.row_count(),
                    columns: ds.schema.len(),
                },
            ),
            Err(e) => {
                let sev = IngestionSeverity::of(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn infer_format_from_path(path: &Path) -> IngestionResult<IngestionFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| IngestionError::SchemaMismatch {
            message: format!(
                "cannot infer format: path has no extension ({})",
                path.display()
            ),
        })?;

    IngestionFormat::from_extension(ext).ok_or_else(|| IngestionError::SchemaMismatch {
        message: format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ),
    })
}

/// An owned load request, for callers that queue loads and run them later.
#[derive(Clone)]
pub struct IngestionRequest {
    /// Path to the input file.
    pub path: PathBuf,
    /// Options controlling ingestion.
    pub options: IngestionOptions,
}

impl fmt::Debug for IngestionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionRequest")
            .field("path", &self.path)
            .field("options", &self.options)
            .finish()
    }
}

impl IngestionRequest {
    /// Execute the request by calling [`ingest_from_path`].
    pub fn run(&self) -> IngestionResult<DataSet> {
        ingest_from_path(&self.path, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::{infer_format_from_path, IngestionFormat, IngestionOptions};
    use std::path::Path;

    #[test]
    fn format_from_extension_is_case_insensitive() {
        assert_eq!(IngestionFormat::from_extension("CSV"), Some(IngestionFormat::Csv));
        assert_eq!(IngestionFormat::from_extension("tab"), Some(IngestionFormat::Tsv));
        assert_eq!(IngestionFormat::from_extension("ndjson"), Some(IngestionFormat::Json));
        assert_eq!(IngestionFormat::from_extension("parquet"), None);
    }

    #[test]
    fn infer_format_requires_known_extension() {
        assert_eq!(
            infer_format_from_path(Path::new("data/scores.tsv")).unwrap(),
            IngestionFormat::Tsv
        );
        let err = infer_format_from_path(Path::new("data/scores")).unwrap_err();
        assert!(err.to_string().contains("path has no extension"));
        let err = infer_format_from_path(Path::new("scores.xlsx")).unwrap_err();
        assert!(err.to_string().contains("extension 'xlsx'"));
    }

    #[test]
    fn default_options_do_not_coerce() {
        let opts = IngestionOptions::default();
        assert!(!opts.coerce_numbers);
        assert!(opts.schema.is_none());
        assert!(format!("{opts:?}").contains("observer_set: false"));
    }
}
