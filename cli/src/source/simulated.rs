//! Synthetic charge/discharge cycle used when no live battery is available.
//!
//! Each tick either charges by one percent until full or discharges by a
//! tenth of a percent until the low threshold, producing a slow sawtooth
//! between 20% and 100%. Time estimates are left untouched.

use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};
use tracing::trace;

use super::SourceHandle;
use crate::status::{BatteryStatus, StatusStore};

const CHARGE_STEP: f64 = 1.0;
const DISCHARGE_STEP: f64 = 0.1;
const FULL_LEVEL: f64 = 100.0;
const LOW_LEVEL: f64 = 20.0;

/// Advance the simulated battery by one tick.
pub fn advance(status: &mut BatteryStatus) {
    if status.charging {
        status.level = (status.level + CHARGE_STEP).min(FULL_LEVEL);
        if status.level >= FULL_LEVEL {
            status.charging = false;
        }
    } else {
        status.level = round_tenth(status.level - DISCHARGE_STEP).max(0.0);
        if status.level <= LOW_LEVEL {
            status.charging = true;
        }
    }
}

// Keeps repeated 0.1 steps on exact tenths.
fn round_tenth(level: f64) -> f64 {
    (level * 10.0).round() / 10.0
}

#[derive(Debug, Clone)]
pub struct Simulator {
    period: Duration,
}

impl Simulator {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Start ticking. The first tick lands one full period after start.
    pub fn start(self, store: &StatusStore) -> SourceHandle {
        let store = store.clone();
        let period = self.period;
        let first_tick = Instant::now() + period;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(first_tick, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                store.update(advance);
                let status = store.snapshot();
                trace!(
                    level = status.level,
                    charging = status.charging,
                    "Simulated battery tick"
                );
            }
        });

        SourceHandle::new(task)
    }
}
