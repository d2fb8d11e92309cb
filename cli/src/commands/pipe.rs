use color_eyre::eyre::Result;
use serde_json::{json, Value};

use crate::config::UserConfig;
use crate::display::{battery_icon, format_time_remaining};
use crate::monitor::BatteryMonitor;
use crate::status::BatteryStatus;

pub async fn run(config: &UserConfig, samples: u32, compact: bool) -> Result<()> {
    let monitor = BatteryMonitor::from_config(config).await;
    let mut rx = monitor.subscribe();
    let mut counter = 0u32;

    loop {
        let doc = status_document(&rx.borrow_and_update());

        if compact {
            println!("{}", serde_json::to_string(&doc)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }

        counter += 1;
        if samples > 0 && counter >= samples {
            break;
        }

        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    monitor.shutdown();
    Ok(())
}

fn status_document(status: &BatteryStatus) -> Value {
    json!({
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "source": status.source_label(),
        "battery": {
            "level": status.level,
            "charging": status.charging,
            "charging_time_secs": status.charging_time.map(|d| d.as_secs()),
            "discharging_time_secs": status.discharging_time.map(|d| d.as_secs()),
            "time_remaining": format_time_remaining(status.time_remaining()),
            "icon": battery_icon(status.level, status.charging),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_document_fields() {
        let doc = status_document(&BatteryStatus::default());

        assert_eq!(doc["source"], "simulated");
        assert_eq!(
            doc["battery"],
            json!({
                "level": 85.0,
                "charging": false,
                "charging_time_secs": null,
                "discharging_time_secs": 14400,
                "time_remaining": "4:00",
                "icon": "🔋",
            })
        );
        assert!(doc["timestamp"].as_str().is_some());
    }
}
