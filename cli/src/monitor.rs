use batstat_platform::{BatteryCapability, HostBattery};
use tokio::sync::watch;
use tracing::debug;

use crate::config::{SimulationConfig, UserConfig};
use crate::source::{BatterySource, SourceHandle, SourceKind};
use crate::status::{BatteryStatus, StatusStore};

/// Owns the battery status and the source keeping it current.
pub struct BatteryMonitor {
    store: StatusStore,
    kind: SourceKind,
    source: SourceHandle,
}

impl BatteryMonitor {
    /// Detect the host battery (unless simulation is forced) and start.
    pub async fn from_config(config: &UserConfig) -> Self {
        let capability = if config.force_simulation {
            debug!("Simulation forced, skipping host battery detection");
            None
        } else {
            HostBattery::detect(config.poll_interval())
        };

        Self::start(capability, &config.simulation).await
    }

    pub async fn start<C>(capability: Option<C>, simulation: &SimulationConfig) -> Self
    where
        C: BatteryCapability,
    {
        let store = StatusStore::new(BatteryStatus::from_simulation(simulation));
        let source = BatterySource::select(capability, simulation).await;
        let kind = source.kind();
        let source = source.start(&store);

        Self {
            store,
            kind,
            source,
        }
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn snapshot(&self) -> BatteryStatus {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<BatteryStatus> {
        self.store.subscribe()
    }

    pub fn shutdown(self) {
        debug!(
            kind = ?self.kind,
            finished = self.source.is_finished(),
            "Stopping battery source"
        );
        self.source.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use batstat_platform::{BatteryEvent, BatteryReading};
    use tokio::time::Instant;

    use super::*;
    use crate::source::testing::{FakeBattery, FakeCapability};

    #[tokio::test(start_paused = true)]
    async fn test_fallback_without_capability_runs_simulator() {
        let monitor =
            BatteryMonitor::start(None::<FakeCapability>, &SimulationConfig::default()).await;
        assert_eq!(monitor.kind(), SourceKind::Simulated);

        let before = monitor.snapshot();
        assert!(!before.is_supported);

        let mut rx = monitor.subscribe();
        let started = Instant::now();
        rx.changed().await.unwrap();

        let after = rx.borrow_and_update().clone();
        assert!(started.elapsed() >= Duration::from_secs(30));
        assert!(!after.is_supported);
        assert_ne!(after.level, before.level);
        assert_eq!(after.level, 84.9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fallback_when_request_fails() {
        let monitor =
            BatteryMonitor::start(Some(FakeCapability::failing()), &SimulationConfig::default())
                .await;
        assert_eq!(monitor.kind(), SourceKind::Simulated);

        let mut rx = monitor.subscribe();
        let started = Instant::now();
        rx.changed().await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(30));
        let status = monitor.snapshot();
        assert!(!status.is_supported);
        assert_eq!(status.level, 84.9);
    }

    #[tokio::test]
    async fn test_live_battery_marks_supported() {
        let battery = FakeBattery::new(BatteryReading {
            level: 0.995,
            charging: false,
            charging_time: None,
            discharging_time: Some(Duration::from_secs(30000)),
        });
        let monitor = BatteryMonitor::start(
            Some(FakeCapability::with(battery.clone())),
            &SimulationConfig::default(),
        )
        .await;

        assert_eq!(monitor.kind(), SourceKind::Live);
        let status = monitor.snapshot();
        assert!(status.is_supported);
        assert_eq!(status.level, 100.0);

        let mut rx = monitor.subscribe();
        battery.push(
            BatteryReading {
                level: 0.98,
                charging: false,
                charging_time: None,
                discharging_time: Some(Duration::from_secs(29000)),
            },
            BatteryEvent::DischargingTimeChange,
        );
        rx.changed().await.unwrap();
        assert_eq!(
            rx.borrow_and_update().discharging_time,
            Some(Duration::from_secs(29000))
        );
    }

    #[tokio::test]
    async fn test_forced_simulation_skips_host() {
        let config = UserConfig {
            force_simulation: true,
            ..UserConfig::default()
        };
        let monitor = BatteryMonitor::from_config(&config).await;
        assert_eq!(monitor.kind(), SourceKind::Simulated);
        assert!(!monitor.snapshot().is_supported);
        monitor.shutdown();
    }
}
