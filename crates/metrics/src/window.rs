//! Bounded FIFO window of recent response times.

use std::collections::VecDeque;

/// Most recent `capacity` response times, oldest evicted first.
#[derive(Debug, Clone)]
pub struct ResponseTimeWindow {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl ResponseTimeWindow {
    /// A zero capacity is bumped to 1 so the window always holds the latest sample.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Add a sample. NaN, infinite and negative readings are stored as 0.
    pub fn push(&mut self, response_time_ms: f64) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        let sample = if response_time_ms.is_finite() {
            response_time_ms.max(0.0)
        } else {
            0.0
        };
        self.samples.push_back(sample);
    }

    /// Mean of the samples currently held, 0 when empty
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
