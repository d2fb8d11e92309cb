//! Battery capability backed by the host operating system.

use std::future::Future;
use std::thread;
use std::time::Duration;

use starship_battery::units::time::second;
use starship_battery::{Battery, Manager};
use tokio::sync::{broadcast, oneshot, watch};
use tracing::{debug, info, trace, warn};

use crate::battery::{
    changed_events, BatteryCapability, BatteryEvent, BatteryHandle, BatteryReading,
};
use crate::error::{Result, SourceError};
use crate::types::ChargeState;

const EVENT_CAPACITY: usize = 16;

/// The host battery capability.
///
/// Only exists when the platform battery backend can be created.
#[derive(Debug, Clone)]
pub struct HostBattery {
    poll_interval: Duration,
}

impl HostBattery {
    /// Check the host for a battery backend.
    pub fn detect(poll_interval: Duration) -> Option<Self> {
        match Manager::new() {
            Ok(_) => Some(Self { poll_interval }),
            Err(e) => {
                debug!(error = %e, "Battery backend not available");
                None
            }
        }
    }
}

impl BatteryCapability for HostBattery {
    type Handle = LiveBattery;

    fn request(self) -> impl Future<Output = Result<LiveBattery>> + Send {
        async move {
            let (ready_tx, ready_rx) = oneshot::channel();
            let poll_interval = self.poll_interval;

            thread::Builder::new()
                .name("batstat-battery".to_string())
                .spawn(move || poll_battery(poll_interval, ready_tx))
                .map_err(|e| SourceError::Unavailable(e.to_string()))?;

            ready_rx.await.map_err(|_| SourceError::PollerGone)?
        }
    }
}

/// Handle to the first battery reported by the host.
///
/// Dropping the handle stops the background poller after its next wake-up.
#[derive(Debug)]
pub struct LiveBattery {
    readings: watch::Receiver<BatteryReading>,
    events: broadcast::Sender<BatteryEvent>,
}

impl BatteryHandle for LiveBattery {
    fn reading(&self) -> BatteryReading {
        *self.readings.borrow()
    }

    fn events(&self) -> broadcast::Receiver<BatteryEvent> {
        self.events.subscribe()
    }
}

fn open_first_battery() -> Result<(Manager, Battery)> {
    let manager = Manager::new()?;
    let battery = manager
        .batteries()?
        .next()
        .ok_or(SourceError::NoBattery)??;
    Ok((manager, battery))
}

fn poll_battery(poll_interval: Duration, ready: oneshot::Sender<Result<LiveBattery>>) {
    let (manager, mut battery) = match open_first_battery() {
        Ok(opened) => opened,
        Err(e) => {
            let _ = ready.send(Err(e));
            return;
        }
    };

    let mut current = read_battery(&battery);
    let (reading_tx, reading_rx) = watch::channel(current);
    let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);

    let handle = LiveBattery {
        readings: reading_rx,
        events: event_tx.clone(),
    };
    if ready.send(Ok(handle)).is_err() {
        return;
    }

    info!(
        vendor = battery.vendor().unwrap_or("unknown"),
        model = battery.model().unwrap_or("unknown"),
        "Attached to host battery"
    );

    loop {
        thread::sleep(poll_interval);

        if reading_tx.is_closed() {
            debug!("Battery handle dropped, stopping poller");
            break;
        }

        if let Err(e) = manager.refresh(&mut battery) {
            warn!(error = %e, "Failed to refresh battery");
            continue;
        }

        let events = track_reading(&mut current, read_battery(&battery));
        if events.is_empty() {
            continue;
        }

        reading_tx.send_replace(current);
        for event in events {
            trace!(event = event.label(), "Battery changed");
            let _ = event_tx.send(event);
        }
    }
}

/// Store `next` in `current` if it differs, returning the events to publish.
fn track_reading(current: &mut BatteryReading, next: BatteryReading) -> Vec<BatteryEvent> {
    let events = changed_events(current, &next);
    if !events.is_empty() {
        *current = next;
    }
    events
}

fn read_battery(battery: &Battery) -> BatteryReading {
    to_reading(
        ChargeState::from(battery.state()),
        battery.state_of_charge().get::<starship_battery::units::ratio::percent>(),
        battery.time_to_full().map(|t| t.get::<second>()),
        battery.time_to_empty().map(|t| t.get::<second>()),
    )
}

/// Only the estimate matching the charge direction is kept.
fn to_reading(
    state: ChargeState,
    percent: f32,
    time_to_full_secs: Option<f32>,
    time_to_empty_secs: Option<f32>,
) -> BatteryReading {
    let charging = state.is_charging();

    BatteryReading {
        level: (percent / 100.0).clamp(0.0, 1.0),
        charging,
        charging_time: time_to_full_secs
            .filter(|_| charging)
            .and_then(seconds_to_duration),
        discharging_time: time_to_empty_secs
            .filter(|_| !charging)
            .and_then(seconds_to_duration),
    }
}

fn seconds_to_duration(secs: f32) -> Option<Duration> {
    if secs.is_finite() && secs > 0.0 {
        Some(Duration::from_secs(secs as u64))
    } else {
        None
    }
}
