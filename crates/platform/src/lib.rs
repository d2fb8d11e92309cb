//! Host battery capability for batstat.
//!
//! This crate defines the [`BatteryCapability`] / [`BatteryHandle`] seam a
//! live battery source is reached through, and [`HostBattery`], the
//! implementation backed by the operating system via `starship-battery`.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use batstat_platform::{BatteryCapability, BatteryHandle, HostBattery};
//!
//! if let Some(host) = HostBattery::detect(Duration::from_secs(5)) {
//!     let battery = host.request().await?;
//!     println!("Level: {:.0}%", battery.reading().level * 100.0);
//! }
//! ```

mod battery;
mod error;
mod host;
mod types;

pub use battery::{changed_events, BatteryCapability, BatteryEvent, BatteryHandle, BatteryReading};
pub use error::{Result, SourceError};
pub use host::{HostBattery, LiveBattery};
pub use types::ChargeState;
