use batstat_platform::BatteryHandle;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, trace};

use super::SourceHandle;
use crate::status::StatusStore;

/// Mirrors a hardware battery handle into the status store.
pub struct LiveSource {
    handle: Box<dyn BatteryHandle>,
}

impl LiveSource {
    pub fn new(handle: impl BatteryHandle) -> Self {
        Self {
            handle: Box::new(handle),
        }
    }

    /// Copy the current reading, then re-copy it on every change notification.
    pub fn start(self, store: &StatusStore) -> SourceHandle {
        let mut events = self.handle.events();

        store.update(|status| {
            status.is_supported = true;
            status.apply_reading(&self.handle.reading());
        });

        let status = store.snapshot();
        info!(
            level = status.level,
            charging = status.charging,
            "Live battery source attached"
        );

        let store = store.clone();
        let handle = self.handle;
        let task = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        trace!(event = event.label(), "Battery event");
                        mirror(&store, handle.as_ref());
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(skipped, "Missed battery events, resyncing");
                        mirror(&store, handle.as_ref());
                    }
                    Err(RecvError::Closed) => {
                        debug!("Battery event stream closed");
                        break;
                    }
                }
            }
        });

        SourceHandle::new(task)
    }
}

fn mirror(store: &StatusStore, handle: &dyn BatteryHandle) {
    let reading = handle.reading();
    store.update(|status| status.apply_reading(&reading));
}
