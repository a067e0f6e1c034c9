//! Metrics aggregation over validated sensor readings.
//!
//! Produces the per-field statistics blocks, the energy integral and
//! the peak-power hour for one batch. Callers guarantee a non-empty
//! input slice; the pipeline never invokes this on zero readings.

use chrono::NaiveDateTime;

use crate::models::{FieldStats, MetricsReport, SensorReading, VoltageStats};
use crate::timestamps;

/// Fixed sampling cadence of the source data, in hours: one sample
/// every 5 minutes. A property of the telemetry feed, not derived from
/// the timestamps.
const SAMPLE_INTERVAL_HOURS: f64 = 5.0 / 60.0;

// ── Public API ────────────────────────────────────────────────────────────────

/// Compute the full metrics report for one batch.
///
/// `readings` must be non-empty and is consumed in input order; the
/// peak-hour tie-break depends on which hour appears first in the
/// sequence.
pub fn calculate_metrics(readings: &[SensorReading]) -> MetricsReport {
    debug_assert!(
        !readings.is_empty(),
        "calculate_metrics requires at least one reading"
    );

    let voltages: Vec<f64> = readings.iter().map(|r| r.voltage).collect();
    let currents: Vec<f64> = readings.iter().map(|r| r.current).collect();
    let temperatures: Vec<f64> = readings.iter().map(|r| r.temperature).collect();

    let voltage_avg = mean(&voltages);

    MetricsReport {
        voltage: VoltageStats {
            avg: voltage_avg,
            min: min(&voltages),
            max: max(&voltages),
            std: sample_std(&voltages, voltage_avg),
        },
        current: field_stats(&currents),
        temperature: field_stats(&temperatures),
        total_energy_kwh: total_energy_kwh(readings),
        peak_power_hour: peak_power_hour(readings)
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string(),
    }
}

/// Sum the energy contributions of all readings, in kWh.
///
/// Each reading is treated as an instantaneous power sample held for
/// one full 5-minute interval (left-rectangle integration).
pub fn total_energy_kwh(readings: &[SensorReading]) -> f64 {
    readings
        .iter()
        .map(|r| r.power * SAMPLE_INTERVAL_HOURS / 1000.0)
        .sum()
}

/// Find the hour bucket with the highest mean power.
///
/// Buckets are keyed by hour-truncated timestamp and kept in
/// first-seen order; a later bucket only wins with a strictly greater
/// mean, so ties go to the earlier-seen hour.
pub fn peak_power_hour(readings: &[SensorReading]) -> NaiveDateTime {
    debug_assert!(!readings.is_empty());

    let mut buckets: Vec<(NaiveDateTime, PowerBucket)> = Vec::new();
    for reading in readings {
        let hour = timestamps::truncate_to_hour(reading.timestamp);
        match buckets.iter_mut().find(|(key, _)| *key == hour) {
            Some((_, bucket)) => bucket.add(reading.power),
            None => {
                let mut bucket = PowerBucket::default();
                bucket.add(reading.power);
                buckets.push((hour, bucket));
            }
        }
    }

    let mut peak = buckets[0].0;
    let mut highest_avg = f64::NEG_INFINITY;
    for (hour, bucket) in &buckets {
        let avg = bucket.mean();
        if avg > highest_avg {
            highest_avg = avg;
            peak = *hour;
        }
    }
    peak
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Running power total for one hour bucket.
#[derive(Debug, Default)]
struct PowerBucket {
    sum: f64,
    count: usize,
}

impl PowerBucket {
    fn add(&mut self, power: f64) {
        self.sum += power;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

fn field_stats(values: &[f64]) -> FieldStats {
    FieldStats {
        avg: mean(values),
        min: min(values),
        max: max(values),
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Sample standard deviation with Bessel's correction (divisor n−1).
///
/// Defined as 0 for a single value; the degenerate case is a policy,
/// not a statistically meaningful deviation.
fn sample_std(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reading(ts: &str, power: f64) -> SensorReading {
        SensorReading {
            voltage: 24.0,
            current: 6.0,
            temperature: 35.0,
            power,
            timestamp: crate::timestamps::parse(ts).unwrap(),
        }
    }

    fn reading_with_voltage(ts: &str, voltage: f64) -> SensorReading {
        SensorReading {
            voltage,
            ..reading(ts, 150.0)
        }
    }

    fn hour(y: i32, mo: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    // ── field statistics ─────────────────────────────────────────────────────

    #[test]
    fn test_avg_min_max_over_batch() {
        let readings = vec![
            reading_with_voltage("2024-06-01T10:00:00", 22.0),
            reading_with_voltage("2024-06-01T10:05:00", 24.0),
            reading_with_voltage("2024-06-01T10:10:00", 26.0),
        ];
        let report = calculate_metrics(&readings);

        assert!((report.voltage.avg - 24.0).abs() < 1e-12);
        assert_eq!(report.voltage.min, 22.0);
        assert_eq!(report.voltage.max, 26.0);
    }

    #[test]
    fn test_voltage_std_is_zero_for_single_reading() {
        let readings = vec![reading("2024-06-01T10:00:00", 150.0)];
        let report = calculate_metrics(&readings);
        assert_eq!(report.voltage.std, 0.0);
    }

    #[test]
    fn test_voltage_std_uses_bessel_correction() {
        // Values 22, 24, 26: sample variance = (4 + 0 + 4) / 2 = 4.
        let readings = vec![
            reading_with_voltage("2024-06-01T10:00:00", 22.0),
            reading_with_voltage("2024-06-01T10:05:00", 24.0),
            reading_with_voltage("2024-06-01T10:10:00", 26.0),
        ];
        let report = calculate_metrics(&readings);
        assert!((report.voltage.std - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_current_and_temperature_have_no_std() {
        // Schema-level: only the voltage block carries `std`.
        let readings = vec![reading("2024-06-01T10:00:00", 150.0)];
        let value = serde_json::to_value(calculate_metrics(&readings)).unwrap();
        assert!(value["voltage"].get("std").is_some());
        assert!(value["current"].get("std").is_none());
        assert!(value["temperature"].get("std").is_none());
    }

    // ── energy integration ───────────────────────────────────────────────────

    #[test]
    fn test_total_energy_for_identical_readings() {
        // N readings of P watts → N * P * (5/60) / 1000 kWh.
        let readings: Vec<SensorReading> = (0..12)
            .map(|i| reading(&format!("2024-06-01T10:{:02}:00", i * 5), 200.0))
            .collect();
        let expected = 12.0 * 200.0 * (5.0 / 60.0) / 1000.0;
        assert!((total_energy_kwh(&readings) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_energy_is_left_rectangle_not_trapezoidal() {
        // Two samples, 0 W then 100 W: left-rectangle sums both samples
        // independently; a trapezoidal rule would yield half as much for
        // the ramp.
        let readings = vec![
            reading("2024-06-01T10:00:00", 0.0),
            reading("2024-06-01T10:05:00", 100.0),
        ];
        let expected = (0.0 + 100.0) * (5.0 / 60.0) / 1000.0;
        assert!((total_energy_kwh(&readings) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_zero_power_contributes_no_energy() {
        let readings = vec![reading("2024-06-01T10:00:00", 0.0)];
        assert_eq!(total_energy_kwh(&readings), 0.0);
    }

    // ── peak power hour ──────────────────────────────────────────────────────

    #[test]
    fn test_peak_hour_picks_highest_average() {
        // H1 averages 10 W (two samples), H2 averages 20 W, then more H1.
        let readings = vec![
            reading("2024-06-01T10:00:00", 10.0),
            reading("2024-06-01T11:00:00", 20.0),
            reading("2024-06-01T10:30:00", 10.0),
        ];
        assert_eq!(peak_power_hour(&readings), hour(2024, 6, 1, 11));
    }

    #[test]
    fn test_peak_hour_tie_keeps_first_seen() {
        let readings = vec![
            reading("2024-06-01T10:00:00", 15.0),
            reading("2024-06-01T11:00:00", 15.0),
        ];
        assert_eq!(peak_power_hour(&readings), hour(2024, 6, 1, 10));
    }

    #[test]
    fn test_peak_hour_uses_mean_not_sum() {
        // H1 has many small samples summing past H2's single large one;
        // the mean still favours H2.
        let readings = vec![
            reading("2024-06-01T10:00:00", 30.0),
            reading("2024-06-01T10:05:00", 30.0),
            reading("2024-06-01T10:10:00", 30.0),
            reading("2024-06-01T11:00:00", 50.0),
        ];
        assert_eq!(peak_power_hour(&readings), hour(2024, 6, 1, 11));
    }

    #[test]
    fn test_peak_hour_buckets_span_days() {
        let readings = vec![
            reading("2024-06-01T23:55:00", 10.0),
            reading("2024-06-02T00:05:00", 20.0),
        ];
        assert_eq!(peak_power_hour(&readings), hour(2024, 6, 2, 0));
    }

    #[test]
    fn test_peak_hour_formatted_in_report() {
        let readings = vec![reading("2024-06-01T10:42:17", 150.0)];
        let report = calculate_metrics(&readings);
        assert_eq!(report.peak_power_hour, "2024-06-01T10:00:00");
    }

    // ── idempotence ──────────────────────────────────────────────────────────

    #[test]
    fn test_same_input_yields_identical_report() {
        let readings = vec![
            reading("2024-06-01T10:00:00", 120.0),
            reading("2024-06-01T10:05:00", 130.0),
            reading("2024-06-01T11:00:00", 90.0),
        ];
        assert_eq!(calculate_metrics(&readings), calculate_metrics(&readings));
    }
}
