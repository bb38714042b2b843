//! Simulation clock
//!
//! Driven by the host's animation timestamp. Host clocks are not guaranteed
//! to be monotonic, so a regressing timestamp is held at the last value.

use serde::{Deserialize, Serialize};

/// Monotonic simulation time in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimClock {
    current: f32,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last accepted time
    #[inline]
    pub fn now(&self) -> f32 {
        self.current
    }

    /// Feed a host timestamp, returning the (non-decreasing) simulation time
    pub fn advance(&mut self, timestamp: f32) -> f32 {
        if !timestamp.is_finite() {
            log::debug!("Ignoring non-finite timestamp {}", timestamp);
        } else if timestamp >= self.current {
            self.current = timestamp;
        } else {
            log::debug!(
                "Clock went backwards ({} -> {}), holding",
                self.current,
                timestamp
            );
        }
        self.current
    }
}
