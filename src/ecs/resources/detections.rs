use std::collections::VecDeque;

use bevy_ecs::resource::Resource;
use serde::{Deserialize, Serialize};

/// A recorded screen crossing. `x` is always the screen's x-position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub x: f64,
    pub y: f64,
}

/// Binned intensity derived from the current detection sequence.
///
/// Never stored — recomputed on demand, so it can never drift out of sync
/// with the detections it summarizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Histogram {
    /// One count per equal-height bin, spanning `0..y_extent` top to bottom.
    pub counts: Vec<u32>,
    /// Largest bin count, for normalization by a consumer.
    pub max_count: u32,
}

/// Bounded history of screen crossings.
///
/// Holds the most recent `capacity` detections in insertion order; the
/// oldest entry is evicted first once the bound is reached.
#[derive(Resource, Debug, Clone)]
pub struct DetectionLog {
    screen_x: f64,
    y_extent: f64,
    capacity: usize,
    detections: VecDeque<Detection>,
}

impl DetectionLog {
    pub fn new(screen_x: f64, y_extent: f64, capacity: usize) -> Self {
        Self {
            screen_x,
            y_extent,
            capacity,
            detections: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a screen crossing at height `y`, evicting the oldest entry if
    /// the log is full. `len() <= capacity` holds after every call.
    pub fn record(&mut self, y: f64) {
        if self.detections.len() == self.capacity {
            self.detections.pop_front();
        }
        self.detections.push_back(Detection {
            x: self.screen_x,
            y,
        });
    }

    /// Partition the screen's y-extent into `num_bins` equal-height bins and
    /// count the current detections per bin.
    pub fn histogram(&self, num_bins: usize) -> Histogram {
        let mut counts = vec![0u32; num_bins];
        if num_bins > 0 {
            let bin_height = self.y_extent / num_bins as f64;
            for d in &self.detections {
                let idx = ((d.y.max(0.0) / bin_height) as usize).min(num_bins - 1);
                counts[idx] += 1;
            }
        }
        let max_count = counts.iter().copied().max().unwrap_or(0);
        Histogram { counts, max_count }
    }

    /// Drop all recorded detections. Live particles, counters, and the
    /// observer mode are untouched.
    pub fn reset(&mut self) {
        self.detections.clear();
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Detection> {
        self.detections.iter()
    }
}
