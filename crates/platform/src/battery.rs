//! Battery capability traits and types.

use std::future::Future;
use std::time::Duration;

use tokio::sync::broadcast;

use crate::error::Result;

/// Battery values as read from a live handle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BatteryReading {
    /// Charge level as a fraction (0.0-1.0).
    pub level: f32,

    /// Whether the battery is currently charging.
    pub charging: bool,

    /// Estimated time until fully charged. `None` when unknown or not charging.
    pub charging_time: Option<Duration>,

    /// Estimated time until empty. `None` when unknown or charging.
    pub discharging_time: Option<Duration>,
}

/// Kind of change a live handle notifies about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatteryEvent {
    ChargingChange,
    LevelChange,
    ChargingTimeChange,
    DischargingTimeChange,
}

impl BatteryEvent {
    pub const ALL: [BatteryEvent; 4] = [
        BatteryEvent::ChargingChange,
        BatteryEvent::LevelChange,
        BatteryEvent::ChargingTimeChange,
        BatteryEvent::DischargingTimeChange,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BatteryEvent::ChargingChange => "chargingchange",
            BatteryEvent::LevelChange => "levelchange",
            BatteryEvent::ChargingTimeChange => "chargingtimechange",
            BatteryEvent::DischargingTimeChange => "dischargingtimechange",
        }
    }
}

/// Level differences smaller than this are not reported as a change.
const LEVEL_EPSILON: f32 = 0.0005;

/// Returns the events describing how `next` differs from `prev`.
///
/// Events come out in [`BatteryEvent::ALL`] order.
pub fn changed_events(prev: &BatteryReading, next: &BatteryReading) -> Vec<BatteryEvent> {
    let mut events = Vec::new();
    if prev.charging != next.charging {
        events.push(BatteryEvent::ChargingChange);
    }
    if (prev.level - next.level).abs() > LEVEL_EPSILON {
        events.push(BatteryEvent::LevelChange);
    }
    if prev.charging_time != next.charging_time {
        events.push(BatteryEvent::ChargingTimeChange);
    }
    if prev.discharging_time != next.discharging_time {
        events.push(BatteryEvent::DischargingTimeChange);
    }
    events
}

/// A live battery obtained from a [`BatteryCapability`].
pub trait BatteryHandle: Send + 'static {
    /// The most recent values known for this battery.
    fn reading(&self) -> BatteryReading;

    /// Subscribe to change notifications.
    ///
    /// The receiver sees every [`BatteryEvent`] kind; the channel closes
    /// when the underlying source goes away.
    fn events(&self) -> broadcast::Receiver<BatteryEvent>;
}

/// Host-provided ability to query device power state.
pub trait BatteryCapability {
    type Handle: BatteryHandle;

    /// Request a handle to the device battery.
    fn request(self) -> impl Future<Output = Result<Self::Handle>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn reading(level: f32, charging: bool) -> BatteryReading {
        BatteryReading {
            level,
            charging,
            charging_time: None,
            discharging_time: Some(Duration::from_secs(3600)),
        }
    }

    #[test]
    fn test_identical_readings_have_no_events() {
        let r = reading(0.5, false);
        assert!(changed_events(&r, &r).is_empty());
    }

    #[test]
    fn test_single_field_changes() {
        let prev = reading(0.5, false);

        let mut next = prev;
        next.level = 0.49;
        assert_eq!(changed_events(&prev, &next), vec![BatteryEvent::LevelChange]);

        let mut next = prev;
        next.charging_time = Some(Duration::from_secs(600));
        assert_eq!(
            changed_events(&prev, &next),
            vec![BatteryEvent::ChargingTimeChange]
        );
    }

    #[test]
    fn test_plugging_in_reports_all_changes_in_order() {
        let prev = reading(0.5, false);
        let next = BatteryReading {
            level: 0.51,
            charging: true,
            charging_time: Some(Duration::from_secs(1800)),
            discharging_time: None,
        };
        assert_eq!(changed_events(&prev, &next), BatteryEvent::ALL.to_vec());
    }

    #[test]
    fn test_level_jitter_is_ignored() {
        let prev = reading(0.5, false);
        let next = reading(0.5001, false);
        assert!(changed_events(&prev, &next).is_empty());
    }

    #[test]
    fn test_event_labels() {
        let labels: Vec<_> = BatteryEvent::ALL.iter().map(|e| e.label()).collect();
        assert_eq!(
            labels,
            vec![
                "chargingchange",
                "levelchange",
                "chargingtimechange",
                "dischargingtimechange"
            ]
        );
    }
}
