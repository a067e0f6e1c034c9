//! Physical-range validation of raw sensor rows.
//!
//! Converts a [`RawRecord`] into a typed [`SensorReading`] or a
//! [`RejectReason`]. The contract is total: missing fields, non-numeric
//! text and out-of-range values are all ordinary rejections, never
//! panics.

use thiserror::Error;

use crate::models::{RawRecord, SensorReading};
use crate::timestamps;

/// Plausible panel voltage band in volts.
pub const VOLTAGE_RANGE: (f64, f64) = (18.0, 32.0);
/// Plausible panel current band in amperes.
pub const CURRENT_RANGE: (f64, f64) = (0.0, 12.0);
/// Plausible panel temperature band in degrees Celsius.
pub const TEMPERATURE_RANGE: (f64, f64) = (-10.0, 80.0);

// ── RejectReason ──────────────────────────────────────────────────────────────

/// Why a single row was excluded from aggregation.
///
/// Every variant counts equally as one invalid record at the batch
/// level; the distinction only feeds per-row debug logging.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RejectReason {
    /// The named column is absent or blank.
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// The named column holds text that does not parse as a float.
    #[error("field `{0}` is not numeric: \"{1}\"")]
    NonNumeric(&'static str, String),

    /// The named column parsed but falls outside its physical range.
    #[error("field `{0}` out of range: {1}")]
    OutOfRange(&'static str, f64),

    /// The timestamp column does not parse as ISO-8601.
    #[error("unparseable timestamp: \"{0}\"")]
    BadTimestamp(String),
}

// ── Validation ────────────────────────────────────────────────────────────────

/// Validate one raw row against the physical ranges.
///
/// All rules must hold for acceptance:
/// * 18 ≤ voltage ≤ 32
/// * 0 ≤ current ≤ 12
/// * -10 ≤ temperature ≤ 80
/// * power ≥ 0
///
/// Numeric text may carry surrounding whitespace. The rules are
/// independent, so the first failing field reported is an
/// implementation detail, not a contract.
pub fn validate(raw: &RawRecord) -> Result<SensorReading, RejectReason> {
    let voltage = numeric_field("voltage", raw.voltage.as_deref())?;
    if !(VOLTAGE_RANGE.0..=VOLTAGE_RANGE.1).contains(&voltage) {
        return Err(RejectReason::OutOfRange("voltage", voltage));
    }

    let current = numeric_field("current", raw.current.as_deref())?;
    if !(CURRENT_RANGE.0..=CURRENT_RANGE.1).contains(&current) {
        return Err(RejectReason::OutOfRange("current", current));
    }

    let temperature = numeric_field("temperature", raw.temperature.as_deref())?;
    if !(TEMPERATURE_RANGE.0..=TEMPERATURE_RANGE.1).contains(&temperature) {
        return Err(RejectReason::OutOfRange("temperature", temperature));
    }

    let power = numeric_field("power", raw.power.as_deref())?;
    // Written so that NaN fails the comparison and is rejected.
    if !(power >= 0.0) {
        return Err(RejectReason::OutOfRange("power", power));
    }

    let ts_text = raw
        .timestamp
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or(RejectReason::MissingField("timestamp"))?;
    let timestamp = timestamps::parse(ts_text)
        .ok_or_else(|| RejectReason::BadTimestamp(ts_text.to_string()))?;

    Ok(SensorReading {
        voltage,
        current,
        temperature,
        power,
        timestamp,
    })
}

/// Coerce one optional text field to a float.
///
/// Blank and absent cells are both reported as missing; anything else
/// goes through the standard float parse after trimming.
fn numeric_field(name: &'static str, value: Option<&str>) -> Result<f64, RejectReason> {
    let text = value.ok_or(RejectReason::MissingField(name))?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(RejectReason::MissingField(name));
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| RejectReason::NonNumeric(name, text.to_string()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
