//! Filter selection and reconfiguration.

use super::{
    FilterKind, KalmanFilter1D, MedianFilter, MovingAverageFilter, NoFilter, SignalFilter,
};

/// Defaults matching the glucose front-end's tuning.
const DEFAULT_WINDOW: usize = 5;
const DEFAULT_KALMAN_Q: f64 = 0.01;
const DEFAULT_KALMAN_R: f64 = 0.1;

/// Owner of exactly one active filter instance.
///
/// The manager remembers the construction parameters (window size, Kalman
/// noise terms) so the variant can be switched independently of its tuning.
/// Changing the variant or any parameter rebuilds the active filter, which
/// discards its internal state: filters never carry history across a
/// reconfiguration.
pub struct FilterManager {
    kind: FilterKind,
    window_size: usize,
    kalman_q: f64,
    kalman_r: f64,
    filter: Box<dyn SignalFilter>,
}

impl Default for FilterManager {
    fn default() -> Self {
        Self::new(FilterKind::Kalman, DEFAULT_WINDOW, DEFAULT_KALMAN_Q, DEFAULT_KALMAN_R)
    }
}

impl FilterManager {
    pub fn new(kind: FilterKind, window_size: usize, kalman_q: f64, kalman_r: f64) -> Self {
        let filter = build_filter(kind, window_size, kalman_q, kalman_r);
        Self { kind, window_size, kalman_q, kalman_r, filter }
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    /// Switch the active variant, discarding prior state.
    pub fn set_kind(&mut self, kind: FilterKind) {
        self.kind = kind;
        self.rebuild();
    }

    /// Change the window size; rebuilds windowed variants.
    pub fn set_window_size(&mut self, window_size: usize) {
        self.window_size = window_size;
        if matches!(self.kind, FilterKind::MovingAverage | FilterKind::Median) {
            self.rebuild();
        }
    }

    /// Change the Kalman noise terms; rebuilds the Kalman variant.
    pub fn set_kalman_params(&mut self, q: f64, r: f64) {
        self.kalman_q = q;
        self.kalman_r = r;
        if self.kind == FilterKind::Kalman {
            self.rebuild();
        }
    }

    /// Condition a single value through the active filter.
    pub fn process(&mut self, value: f64) -> f64 {
        self.filter.apply(value)
    }

    /// Reset the active filter's internal state.
    pub fn reset(&mut self) {
        self.filter.reset();
    }

    fn rebuild(&mut self) {
        self.filter = build_filter(self.kind, self.window_size, self.kalman_q, self.kalman_r);
    }
}

fn build_filter(
    kind: FilterKind,
    window_size: usize,
    kalman_q: f64,
    kalman_r: f64,
) -> Box<dyn SignalFilter> {
    match kind {
        FilterKind::None => Box::new(NoFilter),
        FilterKind::MovingAverage => Box::new(MovingAverageFilter::new(window_size)),
        FilterKind::Median => Box::new(MedianFilter::new(window_size)),
        FilterKind::Kalman => Box::new(KalmanFilter1D::new(kalman_q, kalman_r)),
    }
}
