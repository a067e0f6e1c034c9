//! Per-batch processing pipeline.
//!
//! One batch = one CSV file in, one JSON report out. [`process_batch`]
//! is the single fallible boundary: whatever happens inside, the caller
//! always gets a definitive [`BatchResult`], so one failing batch never
//! prevents the next from being attempted.

use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};
use telemetry_core::error::{ProcessorError, Result};
use telemetry_core::metrics::calculate_metrics;
use telemetry_core::models::MetricsReport;
use telemetry_core::validator;
use tracing::debug;

use crate::reader;

/// Suffix appended to the input stem to form the report file name.
const REPORT_SUFFIX: &str = "_processed.json";

// ── Public types ──────────────────────────────────────────────────────────────

/// Terminal status of one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    Success,
    Error,
}

/// The envelope returned for every batch and, on success, written out
/// as the report artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    /// File name of the input batch.
    pub input_file: String,
    /// File name of the written report (success only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,
    /// ISO-8601 local timestamp of this processing run.
    pub processed_at: String,
    /// Terminal status of the batch.
    pub status: BatchStatus,
    /// Number of readings that passed validation.
    pub records_processed: usize,
    /// Number of rows rejected (parse failures and range rejections).
    pub records_invalid: usize,
    /// Human-readable failure description (error status only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Aggregate metrics (success only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsReport>,
}

impl BatchResult {
    /// Whether the batch completed and a report was written.
    pub fn is_success(&self) -> bool {
        self.status == BatchStatus::Success
    }
}

// ── Batch processing ──────────────────────────────────────────────────────────

/// Process one batch file end to end.
///
/// Reads `input`, validates every row, aggregates the valid readings
/// and writes the report into `output_dir` (created if absent). All
/// failures are converted into an error-status result here; this
/// function itself never fails.
pub fn process_batch(input: &Path, output_dir: &Path) -> BatchResult {
    let input_file = input
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| input.display().to_string());
    let processed_at = Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string();

    match run_batch(input, output_dir, &input_file, &processed_at) {
        Ok(result) => result,
        Err(err) => {
            let records_invalid = match &err {
                ProcessorError::AllRecordsInvalid { invalid } => *invalid,
                _ => 0,
            };
            BatchResult {
                input_file,
                output_file: None,
                processed_at,
                status: BatchStatus::Error,
                records_processed: 0,
                records_invalid,
                error: Some(err.to_string()),
                metrics: None,
            }
        }
    }
}

// ── Internal implementation ───────────────────────────────────────────────────

/// The fallible interior of [`process_batch`].
///
/// Returns the success result after the report has been written; any
/// [`ProcessorError`] bubbles up to be converted at the boundary.
fn run_batch(
    input: &Path,
    output_dir: &Path,
    input_file: &str,
    processed_at: &str,
) -> Result<BatchResult> {
    let raw = reader::read_raw_records(input)?;

    let mut readings = Vec::with_capacity(raw.records.len());
    let mut invalid = raw.undecodable;
    for (index, record) in raw.records.iter().enumerate() {
        match validator::validate(record) {
            Ok(reading) => readings.push(reading),
            Err(reason) => {
                // Header is line 1, so data row N sits on line N+1.
                debug!("Rejected row {}:{}: {}", input.display(), index + 2, reason);
                invalid += 1;
            }
        }
    }

    if readings.is_empty() {
        return Err(ProcessorError::AllRecordsInvalid { invalid });
    }

    let metrics = calculate_metrics(&readings);

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let output_file = format!("{}{}", stem, REPORT_SUFFIX);

    let result = BatchResult {
        input_file: input_file.to_string(),
        output_file: Some(output_file.clone()),
        processed_at: processed_at.to_string(),
        status: BatchStatus::Success,
        records_processed: readings.len(),
        records_invalid: invalid,
        error: None,
        metrics: Some(metrics),
    };

    write_report(&result, &output_dir.join(&output_file))?;

    debug!(
        "Batch {}: {} valid, {} invalid",
        input.display(),
        result.records_processed,
        result.records_invalid,
    );

    Ok(result)
}

/// Serialize `result` as pretty-printed JSON at `path`, creating parent
/// directories as needed.
fn write_report(result: &BatchResult, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ProcessorError::ReportWrite {
            path: path.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(path, json).map_err(|source| ProcessorError::ReportWrite {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
