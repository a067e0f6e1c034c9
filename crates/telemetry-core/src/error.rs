use std::path::PathBuf;
use thiserror::Error;

/// Batch-level errors produced by the telemetry processor.
///
/// Row-level problems never appear here; a row that fails to parse or
/// validate is counted and skipped, not raised. These variants are the
/// conditions that terminate one batch.
#[derive(Error, Debug)]
pub enum ProcessorError {
    /// The input file is absent; surfaced before any read attempt.
    #[error("Input file does not exist: {0}")]
    InputNotFound(PathBuf),

    /// The CSV file could not be opened or went bad mid-read.
    #[error("Failed to read CSV {path}: {source}")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Every row in the batch was rejected; carries the rejected count
    /// so the error result can still report it.
    #[error("All records invalid")]
    AllRecordsInvalid { invalid: usize },

    /// The report artifact could not be written.
    #[error("Failed to write report {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A report failed to serialize.
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the processor crates.
pub type Result<T> = std::result::Result<T, ProcessorError>;
