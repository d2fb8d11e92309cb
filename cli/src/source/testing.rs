//! In-memory battery capability for exercising source selection.

use std::future::Future;
use std::sync::{Arc, Mutex};

use batstat_platform::{
    BatteryCapability, BatteryEvent, BatteryHandle, BatteryReading, SourceError,
};
use tokio::sync::broadcast;

#[derive(Debug, Clone)]
pub struct FakeBattery {
    reading: Arc<Mutex<BatteryReading>>,
    events: broadcast::Sender<BatteryEvent>,
}

impl FakeBattery {
    pub fn new(reading: BatteryReading) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            reading: Arc::new(Mutex::new(reading)),
            events,
        }
    }

    /// Replace the reading and notify listeners.
    pub fn push(&self, reading: BatteryReading, event: BatteryEvent) {
        *self.reading.lock().unwrap() = reading;
        let _ = self.events.send(event);
    }
}

impl BatteryHandle for FakeBattery {
    fn reading(&self) -> BatteryReading {
        *self.reading.lock().unwrap()
    }

    fn events(&self) -> broadcast::Receiver<BatteryEvent> {
        self.events.subscribe()
    }
}

/// A capability whose request either yields the battery or fails.
pub struct FakeCapability {
    battery: Option<FakeBattery>,
}

impl FakeCapability {
    pub fn with(battery: FakeBattery) -> Self {
        Self {
            battery: Some(battery),
        }
    }

    pub fn failing() -> Self {
        Self { battery: None }
    }
}

impl BatteryCapability for FakeCapability {
    type Handle = FakeBattery;

    fn request(self) -> impl Future<Output = batstat_platform::Result<FakeBattery>> + Send {
        async move { self.battery.ok_or(SourceError::NoBattery) }
    }
}
