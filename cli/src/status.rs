//! Observable battery status record.

use std::sync::Arc;
use std::time::Duration;

use batstat_platform::BatteryReading;
use tokio::sync::watch;

use crate::config::SimulationConfig;

/// Current battery state as shown to consumers.
#[derive(Debug, Clone, PartialEq)]
pub struct BatteryStatus {
    /// Charge percentage, always within 0-100.
    pub level: f64,
    pub charging: bool,
    /// Time until full. `None` means unknown or not charging.
    pub charging_time: Option<Duration>,
    /// Time until empty. `None` means unknown or charging.
    pub discharging_time: Option<Duration>,
    /// Set once a live hardware source is attached.
    pub is_supported: bool,
}

impl Default for BatteryStatus {
    fn default() -> Self {
        Self::from_simulation(&SimulationConfig::default())
    }
}

impl BatteryStatus {
    /// Placeholder values shown before (or instead of) a live source.
    ///
    /// The level is kept on a tenth of a percent, the simulator's step size.
    pub fn from_simulation(config: &SimulationConfig) -> Self {
        Self {
            level: (config.initial_level.clamp(0.0, 100.0) * 10.0).round() / 10.0,
            charging: config.initial_charging,
            charging_time: None,
            discharging_time: config.initial_discharging_time(),
            is_supported: false,
        }
    }

    /// Mirror a hardware reading. The level is rounded to a whole percent.
    pub fn apply_reading(&mut self, reading: &BatteryReading) {
        self.level = (f64::from(reading.level) * 100.0).round().clamp(0.0, 100.0);
        self.charging = reading.charging;
        self.charging_time = reading.charging_time;
        self.discharging_time = reading.discharging_time;
    }

    /// The time estimate that applies to the current charging state.
    pub fn time_remaining(&self) -> Option<Duration> {
        if self.charging {
            self.charging_time
        } else {
            self.discharging_time
        }
    }

    pub fn source_label(&self) -> &'static str {
        if self.is_supported {
            "live"
        } else {
            "simulated"
        }
    }
}

/// Owner of the battery status; consumers subscribe for changes.
#[derive(Debug, Clone)]
pub struct StatusStore {
    tx: Arc<watch::Sender<BatteryStatus>>,
}

impl StatusStore {
    pub fn new(initial: BatteryStatus) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    pub fn snapshot(&self) -> BatteryStatus {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BatteryStatus> {
        self.tx.subscribe()
    }

    /// Mutate the status in place. Subscribers are only woken when the
    /// status actually changed; returns whether it did.
    pub fn update<F>(&self, modify: F) -> bool
    where
        F: FnOnce(&mut BatteryStatus),
    {
        self.tx.send_if_modified(|status| {
            let before = status.clone();
            modify(status);
            *status != before
        })
    }
}
