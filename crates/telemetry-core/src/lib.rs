//! Core domain logic for the solar telemetry processor.
//!
//! Pure, I/O-free building blocks: the record model, physical-range
//! validation, metrics aggregation, timestamp parsing, CLI settings and
//! the shared error taxonomy. Everything that touches the filesystem
//! lives in `telemetry-data`.

pub mod error;
pub mod metrics;
pub mod models;
pub mod settings;
pub mod timestamps;
pub mod validator;
