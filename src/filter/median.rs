//! Sliding-window median.

use std::collections::VecDeque;

use super::SignalFilter;

/// Median filter over the `window` most recent values.
///
/// Even-sized windows return the element at index `len / 2` of the ascending
/// sort rather than interpolating between the two middle values.
#[derive(Debug)]
pub struct MedianFilter {
    window: usize,
    buffer: VecDeque<f64>,
}

impl MedianFilter {
    pub fn new(window: usize) -> Self {
        Self { window: window.max(1), buffer: VecDeque::new() }
    }
}

impl SignalFilter for MedianFilter {
    fn apply(&mut self, value: f64) -> f64 {
        self.buffer.push_back(value);
        if self.buffer.len() > self.window {
            self.buffer.pop_front();
        }

        let mut sorted: Vec<f64> = self.buffer.iter().copied().collect();
        sorted.sort_by(f64::total_cmp);
        sorted[sorted.len() / 2]
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_window_returns_middle_element() {
        let mut filter = MedianFilter::new(3);
        filter.apply(5.0);
        filter.apply(1.0);
        assert_eq!(filter.apply(3.0), 3.0);
    }

    #[test]
    fn even_size_uses_upper_of_the_two_middles() {
        let mut filter = MedianFilter::new(4);
        filter.apply(1.0);
        filter.apply(2.0);
        filter.apply(3.0);
        // four values [1,2,3,4] sorted, index 4/2 = 2 -> 3.0
        assert_eq!(filter.apply(4.0), 3.0);
    }

    #[test]
    fn spikes_are_suppressed() {
        let mut filter = MedianFilter::new(3);
        filter.apply(10.0);
        filter.apply(10.0);
        assert_eq!(filter.apply(1000.0), 10.0);
    }

    #[test]
    fn window_slides_over_old_values() {
        let mut filter = MedianFilter::new(3);
        for v in [1.0, 2.0, 3.0, 9.0] {
            filter.apply(v);
        }
        // window now [2, 3, 9]
        assert_eq!(filter.apply(9.0), 9.0);
    }
}
