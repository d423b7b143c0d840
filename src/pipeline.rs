//! Unit conversion, windowed retention, and export records.
//!
//! The pipeline turns raw telemetry frames (device ticks and ADC counts)
//! into physical measurements, conditions the current through the active
//! filter, and maintains three downstream views:
//!
//! - a time/current series trimmed to a rolling 300-second window,
//! - a voltage/current series capped at the 600 most recent points,
//! - an append-only record log for export.
//!
//! Records are never mutated after creation; only the two series drop old
//! entries. Nothing in this module can fail.

use crate::filter::FilterManager;
use crate::types::{TelemetryFrame, TelemetryRecord};

/// ADC counts per volt of the measurement front-end.
pub const ADC_PER_VOLT: f64 = 1240.9091;
/// Reference voltage in volts.
pub const REF_VOLT: f64 = 1.5;
/// Device tick to seconds divisor.
pub const TIME_GAIN: f64 = 1000.0;
/// Current conversion gain, volts per milliampere.
pub const GLUCOSE_GAIN: f64 = 0.2;

/// Rolling retention window of the time/current series, in seconds.
pub const TIME_SPAN_SECS: f64 = 300.0;
/// Point cap of the voltage/current series.
pub const MAX_VOLTAGE_POINTS: usize = 600;

/// Time/current pairs retained for a rolling time window.
#[derive(Debug, Default)]
pub struct TimeSeries {
    points: Vec<(f64, f64)>,
}

impl TimeSeries {
    /// Append a point, then drop every point older than the window behind
    /// the latest one. The lower bound is floored at zero; time does not go
    /// negative.
    fn push(&mut self, seconds: f64, current: f64) {
        self.points.push((seconds, current));
        let min_t = (seconds - TIME_SPAN_SECS).max(0.0);
        self.points.retain(|p| p.0 >= min_t);
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn clear(&mut self) {
        self.points.clear();
    }
}

/// Voltage/current pairs capped at a fixed number of recent points.
#[derive(Debug, Default)]
pub struct VoltageSeries {
    points: Vec<(f64, f64)>,
}

impl VoltageSeries {
    fn push(&mut self, voltage: f64, current: f64) {
        self.points.push((voltage, current));
        if self.points.len() > MAX_VOLTAGE_POINTS {
            let excess = self.points.len() - MAX_VOLTAGE_POINTS;
            self.points.drain(..excess);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn clear(&mut self) {
        self.points.clear();
    }
}

/// Converts raw telemetry frames into calibrated, filtered measurements.
pub struct MeasurementPipeline {
    filter: FilterManager,
    filter_enabled: bool,
    time_series: TimeSeries,
    voltage_series: VoltageSeries,
    records: Vec<TelemetryRecord>,
}

impl Default for MeasurementPipeline {
    fn default() -> Self {
        Self::with_filter(FilterManager::default())
    }
}

impl MeasurementPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(filter: FilterManager) -> Self {
        Self {
            filter,
            filter_enabled: true,
            time_series: TimeSeries::default(),
            voltage_series: VoltageSeries::default(),
            records: Vec::new(),
        }
    }

    /// Process one telemetry frame into a record.
    ///
    /// The record is appended to the log (all numeric fields rounded to 4
    /// decimals) and both derived series are updated and trimmed.
    pub fn process(&mut self, frame: &TelemetryFrame) -> TelemetryRecord {
        let seconds = frame.seconds / TIME_GAIN;
        let current_raw = adc_to_current(frame.glucose);
        let voltage = REF_VOLT - frame.volt / ADC_PER_VOLT;

        let current = if self.filter_enabled {
            self.filter.process(current_raw)
        } else {
            current_raw
        };

        self.time_series.push(seconds, current);
        self.voltage_series.push(voltage, current);

        let record = TelemetryRecord {
            seconds: round4(seconds),
            current_ma: round4(current),
            voltage_v: round4(voltage),
            receive_time: frame.receive_time.clone(),
        };
        self.records.push(record.clone());
        record
    }

    /// Enable or disable filtering.
    ///
    /// An actual toggle resets the filter's internal state so filtered and
    /// unfiltered history never mix inside a stateful filter.
    pub fn set_filter_enabled(&mut self, enabled: bool) {
        if self.filter_enabled != enabled {
            self.filter_enabled = enabled;
            self.filter.reset();
        }
    }

    pub fn filter_enabled(&self) -> bool {
        self.filter_enabled
    }

    /// Access the filter for reconfiguration (variant, window, noise terms).
    pub fn filter_mut(&mut self) -> &mut FilterManager {
        &mut self.filter
    }

    pub fn time_series(&self) -> &TimeSeries {
        &self.time_series
    }

    pub fn voltage_series(&self) -> &VoltageSeries {
        &self.voltage_series
    }

    /// The full record log, in processing order.
    pub fn records(&self) -> &[TelemetryRecord] {
        &self.records
    }

    /// Clear both series, the record log, and the filter state.
    pub fn reset(&mut self) {
        self.time_series.clear();
        self.voltage_series.clear();
        self.records.clear();
        self.filter.reset();
    }
}

/// ADC counts to sensor current in milliamperes.
fn adc_to_current(adc_value: f64) -> f64 {
    let voltage = (adc_value - REF_VOLT * ADC_PER_VOLT) / ADC_PER_VOLT;
    voltage / GLUCOSE_GAIN
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
