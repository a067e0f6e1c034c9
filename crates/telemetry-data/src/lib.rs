//! Ingestion and pipeline layer for the solar telemetry processor.
//!
//! Responsible for discovering CSV batches in the intake directory,
//! reading their rows, running validation and aggregation, and writing
//! the per-batch JSON report.

pub mod pipeline;
pub mod reader;

pub use telemetry_core as core;
