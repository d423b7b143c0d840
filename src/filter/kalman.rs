//! One-dimensional scalar Kalman filter.

use super::SignalFilter;

const INITIAL_COVARIANCE: f64 = 0.1;

/// Scalar Kalman filter for a single-channel signal.
///
/// `q` is the process noise, `r` the measurement noise. The estimate is
/// seeded with the first sample, which passes through unchanged; every
/// subsequent sample runs one predict/update cycle.
#[derive(Debug)]
pub struct KalmanFilter1D {
    q: f64,
    r: f64,
    /// Current estimate; `None` until the first sample seeds it.
    estimate: Option<f64>,
    /// Current estimate error covariance.
    covariance: f64,
}

impl KalmanFilter1D {
    pub fn new(q: f64, r: f64) -> Self {
        Self { q, r, estimate: None, covariance: INITIAL_COVARIANCE }
    }
}

impl SignalFilter for KalmanFilter1D {
    fn apply(&mut self, value: f64) -> f64 {
        let Some(previous) = self.estimate else {
            self.estimate = Some(value);
            return value;
        };

        // Predict
        let predicted_covariance = self.covariance + self.q;

        // Update
        let gain = predicted_covariance / (predicted_covariance + self.r);
        let estimate = previous + gain * (value - previous);
        self.covariance = (1.0 - gain) * predicted_covariance;
        self.estimate = Some(estimate);
        estimate
    }

    fn reset(&mut self) {
        self.estimate = None;
        self.covariance = INITIAL_COVARIANCE;
    }
}
