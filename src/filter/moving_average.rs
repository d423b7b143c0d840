//! Sliding-window arithmetic mean.

use std::collections::VecDeque;

use super::SignalFilter;

/// Moving-average filter over the `window` most recent values.
#[derive(Debug)]
pub struct MovingAverageFilter {
    window: usize,
    buffer: VecDeque<f64>,
}

impl MovingAverageFilter {
    pub fn new(window: usize) -> Self {
        Self { window: window.max(1), buffer: VecDeque::new() }
    }
}

impl SignalFilter for MovingAverageFilter {
    fn apply(&mut self, value: f64) -> f64 {
        self.buffer.push_back(value);
        if self.buffer.len() > self.window {
            self.buffer.pop_front();
        }
        self.buffer.iter().sum::<f64>() / self.buffer.len() as f64
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warmup_averages_partial_window() {
        let mut filter = MovingAverageFilter::new(3);
        let out: Vec<f64> = [1.0, 2.0, 3.0, 4.0].iter().map(|v| filter.apply(*v)).collect();
        assert_eq!(out, vec![1.0, 1.5, 2.0, 3.0]);
    }

    #[test]
    fn reset_forgets_history() {
        let mut filter = MovingAverageFilter::new(3);
        filter.apply(100.0);
        filter.apply(200.0);
        filter.reset();
        assert_eq!(filter.apply(4.0), 4.0);
    }

    #[test]
    fn window_of_one_tracks_input() {
        let mut filter = MovingAverageFilter::new(1);
        assert_eq!(filter.apply(5.0), 5.0);
        assert_eq!(filter.apply(-5.0), -5.0);
    }
}
