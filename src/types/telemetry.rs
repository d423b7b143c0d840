//! Waveform samples, telemetry frames, and export records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One waveform sample from the high-rate signal path.
///
/// Samples carry no timestamp; arrival order defines the time axis. The
/// binary protocol produces 16-bit two's-complement values, the raw-text
/// path produces whatever the device printed, so the common currency is f32.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveformSample {
    pub value: f32,
}

impl WaveformSample {
    pub fn new(value: f32) -> Self {
        Self { value }
    }
}

impl From<i16> for WaveformSample {
    fn from(raw: i16) -> Self {
        Self { value: raw as f32 }
    }
}

/// One decoded telemetry frame, before unit conversion.
///
/// `seconds`, `glucose`, and `volt` are the raw device fields (`Seconds` is
/// in device ticks, the other two are ADC counts). Fields absent from the
/// wire object default to 0.0. `receive_time` is attached by the receiving
/// layer; it is not part of the wire bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryFrame {
    pub seconds: f64,
    pub glucose: f64,
    pub volt: f64,
    pub receive_time: String,
}

impl TelemetryFrame {
    /// Extract a frame from a decoded JSON object, attaching `receive_time`.
    ///
    /// Extraction is lenient: missing or non-numeric fields become 0.0, so a
    /// frame that carries only some of the expected keys still produces a
    /// record instead of halting the stream.
    pub fn from_value(value: &Value, receive_time: impl Into<String>) -> Self {
        Self {
            seconds: field_f64(value, "Seconds"),
            glucose: field_f64(value, "Glucose"),
            volt: field_f64(value, "Volt"),
            receive_time: receive_time.into(),
        }
    }
}

fn field_f64(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

/// The unit of export: one fully converted measurement.
///
/// Records are appended to the pipeline's log and never mutated afterwards.
/// Serialized field names match the export shape consumed by external
/// writers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    /// Elapsed time in seconds.
    pub seconds: f64,

    /// Sensor current in milliamperes (filtered when filtering is enabled).
    #[serde(rename = "current_mA")]
    pub current_ma: f64,

    /// Working-electrode voltage in volts.
    #[serde(rename = "voltage_V")]
    pub voltage_v: f64,

    /// Wall-clock receive time, display/export only.
    pub receive_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn frame_extraction_reads_expected_fields() {
        let obj = json!({"Seconds": 1500.0, "Glucose": 1861.36, "Volt": 620.45});
        let frame = TelemetryFrame::from_value(&obj, "12:00:00.000");

        assert_eq!(frame.seconds, 1500.0);
        assert_eq!(frame.glucose, 1861.36);
        assert_eq!(frame.volt, 620.45);
        assert_eq!(frame.receive_time, "12:00:00.000");
    }

    #[test]
    fn frame_extraction_defaults_missing_fields_to_zero() {
        let obj = json!({"Seconds": 42.0, "Label": "not a number"});
        let frame = TelemetryFrame::from_value(&obj, "");

        assert_eq!(frame.seconds, 42.0);
        assert_eq!(frame.glucose, 0.0);
        assert_eq!(frame.volt, 0.0);
    }

    #[test]
    fn record_serializes_with_export_field_names() {
        let record = TelemetryRecord {
            seconds: 1.5,
            current_ma: 0.25,
            voltage_v: 1.0,
            receive_time: "12:00:00.000".to_string(),
        };

        let text = serde_json::to_string(&record).expect("serializable");
        assert!(text.contains("\"current_mA\":0.25"));
        assert!(text.contains("\"voltage_V\":1.0"));
        assert!(text.contains("\"receive_time\":\"12:00:00.000\""));
    }

    #[test]
    fn sample_from_signed_raw_value() {
        assert_eq!(WaveformSample::from(-100i16).value, -100.0);
        assert_eq!(WaveformSample::from(32767i16).value, 32767.0);
    }
}
