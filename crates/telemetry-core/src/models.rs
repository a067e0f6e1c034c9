use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One CSV row as it comes off the wire, before any coercion.
///
/// Every field is optional text: a short row, a missing column or a
/// blank cell all deserialize cleanly and are rejected later by the
/// validator instead of faulting the batch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    /// Panel voltage in volts, as written in the CSV.
    #[serde(default)]
    pub voltage: Option<String>,
    /// Panel current in amperes, as written in the CSV.
    #[serde(default)]
    pub current: Option<String>,
    /// Panel temperature in degrees Celsius, as written in the CSV.
    #[serde(default)]
    pub temperature: Option<String>,
    /// Instantaneous power in watts, as written in the CSV.
    #[serde(default)]
    pub power: Option<String>,
    /// ISO-8601 sample timestamp text.
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// A validated, fully-typed sensor sample.
///
/// Only the validator constructs these; once built they are never
/// mutated. The timestamp is naive: hour bucketing truncates the
/// literal wall-clock time with no timezone normalisation.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    /// Panel voltage in volts.
    pub voltage: f64,
    /// Panel current in amperes.
    pub current: f64,
    /// Panel temperature in degrees Celsius.
    pub temperature: f64,
    /// Instantaneous power in watts.
    pub power: f64,
    /// Sample timestamp (naive wall-clock time).
    pub timestamp: NaiveDateTime,
}

/// Descriptive statistics for one sensor field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    /// Arithmetic mean over all readings.
    pub avg: f64,
    /// Smallest observed value.
    pub min: f64,
    /// Largest observed value.
    pub max: f64,
}

/// Voltage statistics carry a dispersion figure on top of [`FieldStats`].
///
/// The report schema gives `std` to voltage only; the other fields ship
/// plain avg/min/max blocks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoltageStats {
    /// Arithmetic mean over all readings.
    pub avg: f64,
    /// Smallest observed value.
    pub min: f64,
    /// Largest observed value.
    pub max: f64,
    /// Sample standard deviation (n−1); 0 when only one reading exists.
    pub std: f64,
}

/// Aggregate metrics computed over one batch of validated readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Voltage statistics, including standard deviation.
    pub voltage: VoltageStats,
    /// Current statistics.
    pub current: FieldStats,
    /// Temperature statistics.
    pub temperature: FieldStats,
    /// Total energy over the batch in kilowatt-hours.
    pub total_energy_kwh: f64,
    /// ISO-8601 hour-truncated timestamp of the hour with the highest
    /// mean power.
    pub peak_power_hour: String,
}
