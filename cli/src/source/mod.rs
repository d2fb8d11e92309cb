//! Battery sources feeding the status store.
//!
//! A [`BatterySource`] is picked once at startup: the live hardware source
//! when the host capability hands out a battery, otherwise the simulator.
//! Starting a source yields a [`SourceHandle`] that stops it when cancelled
//! or dropped.

mod live;
mod simulated;
#[cfg(test)]
pub mod testing;

pub use live::LiveSource;
pub use simulated::Simulator;

use batstat_platform::BatteryCapability;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::SimulationConfig;
use crate::status::StatusStore;

/// Running source task.
#[derive(Debug)]
pub struct SourceHandle {
    task: JoinHandle<()>,
}

impl SourceHandle {
    fn new(task: JoinHandle<()>) -> Self {
        Self { task }
    }

    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for SourceHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Live,
    Simulated,
}

pub enum BatterySource {
    Live(LiveSource),
    Simulated(Simulator),
}

impl BatterySource {
    /// Request a live battery from `capability`, falling back to the simulator
    /// when the capability is absent or the request fails.
    pub async fn select<C>(capability: Option<C>, simulation: &SimulationConfig) -> Self
    where
        C: BatteryCapability,
    {
        let simulator = || BatterySource::Simulated(Simulator::new(simulation.tick_interval()));

        let Some(capability) = capability else {
            warn!("Battery API not supported, using simulated data");
            return simulator();
        };

        match capability.request().await {
            Ok(handle) => {
                debug!("Battery handle acquired");
                BatterySource::Live(LiveSource::new(handle))
            }
            Err(e) => {
                warn!(error = %e, "Battery API not supported, using simulated data");
                simulator()
            }
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            BatterySource::Live(_) => SourceKind::Live,
            BatterySource::Simulated(_) => SourceKind::Simulated,
        }
    }

    pub fn start(self, store: &StatusStore) -> SourceHandle {
        match self {
            BatterySource::Live(source) => source.start(store),
            BatterySource::Simulated(simulator) => {
                debug!(
                    period_secs = simulator.period().as_secs(),
                    "Starting battery simulator"
                );
                simulator.start(store)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use batstat_platform::BatteryReading;

    use super::testing::{FakeBattery, FakeCapability};
    use super::*;

    fn battery() -> FakeBattery {
        FakeBattery::new(BatteryReading {
            level: 0.3,
            charging: true,
            charging_time: Some(Duration::from_secs(2400)),
            discharging_time: None,
        })
    }

    #[tokio::test]
    async fn test_select_live_when_request_succeeds() {
        let config = SimulationConfig::default();
        let source = BatterySource::select(Some(FakeCapability::with(battery())), &config).await;
        assert_eq!(source.kind(), SourceKind::Live);
    }

    #[tokio::test]
    async fn test_select_simulated_when_capability_absent() {
        let source =
            BatterySource::select(None::<FakeCapability>, &SimulationConfig::default()).await;
        assert_eq!(source.kind(), SourceKind::Simulated);
    }

    #[tokio::test]
    async fn test_select_simulated_when_request_fails() {
        let config = SimulationConfig::default();
        let source = BatterySource::select(Some(FakeCapability::failing()), &config).await;
        assert_eq!(source.kind(), SourceKind::Simulated);
    }

    #[tokio::test]
    async fn test_simulator_uses_configured_period() {
        let config = SimulationConfig {
            tick_secs: 7,
            ..SimulationConfig::default()
        };
        match BatterySource::select(None::<FakeCapability>, &config).await {
            BatterySource::Simulated(simulator) => {
                assert_eq!(simulator.period(), Duration::from_secs(7))
            }
            BatterySource::Live(_) => panic!("expected simulated source"),
        }
    }

    #[tokio::test]
    async fn test_cancel_finishes_task() {
        let store = StatusStore::new(Default::default());
        let handle = Simulator::new(Duration::from_secs(1)).start(&store);
        assert!(!handle.is_finished());

        handle.cancel();
        for _ in 0..10 {
            if handle.is_finished() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(handle.is_finished());
    }
}
