//! CSV batch discovery and row loading.
//!
//! Finds `.csv` files under the intake directory and reads their rows
//! into [`RawRecord`]s. Rows the CSV layer itself cannot decode (ragged
//! rows, broken quoting) are counted, not fatal; the batch only fails
//! on conditions that prevent reading the file at all.

use std::path::{Path, PathBuf};

use telemetry_core::error::{ProcessorError, Result};
use telemetry_core::models::RawRecord;
use tracing::{debug, warn};

// ── Discovery ─────────────────────────────────────────────────────────────────

/// Find all `.csv` files recursively under `intake_dir`, sorted by path.
pub fn find_csv_files(intake_dir: &Path) -> Vec<PathBuf> {
    if !intake_dir.exists() {
        warn!("Intake directory does not exist: {}", intake_dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(intake_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "csv")
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

// ── Row loading ───────────────────────────────────────────────────────────────

/// The rows of one batch file.
#[derive(Debug, Default)]
pub struct RawBatch {
    /// Rows that deserialized into the expected column shape.
    pub records: Vec<RawRecord>,
    /// Rows the CSV layer could not decode at all.
    pub undecodable: usize,
}

/// Read every data row of `path` into a [`RawBatch`].
///
/// The first row is treated as a header naming the columns. Returns
/// [`ProcessorError::InputNotFound`] when the file is absent and
/// [`ProcessorError::CsvRead`] when it cannot be opened; individual
/// undecodable rows are tallied and skipped.
pub fn read_raw_records(path: &Path) -> Result<RawBatch> {
    if !path.exists() {
        return Err(ProcessorError::InputNotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|source| ProcessorError::CsvRead {
            path: path.to_path_buf(),
            source,
        })?;

    let mut batch = RawBatch::default();
    for (index, row) in reader.deserialize::<RawRecord>().enumerate() {
        match row {
            Ok(record) => batch.records.push(record),
            Err(e) => {
                // Header is line 1, so data row N sits on line N+1.
                debug!(
                    "Undecodable row at {}:{}: {}",
                    path.display(),
                    index + 2,
                    e
                );
                batch.undecodable += 1;
            }
        }
    }

    debug!(
        "File {}: {} rows decoded, {} undecodable",
        path.display(),
        batch.records.len(),
        batch.undecodable,
    );

    Ok(batch)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
