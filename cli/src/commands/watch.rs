use color_eyre::eyre::Result;
use tracing::debug;

use crate::config::UserConfig;
use crate::display::status_line;
use crate::monitor::BatteryMonitor;

pub async fn run(config: &UserConfig) -> Result<()> {
    let monitor = BatteryMonitor::from_config(config).await;
    let mut rx = monitor.subscribe();

    println!("{}", status_line(&rx.borrow_and_update()));

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                println!("{}", status_line(&rx.borrow_and_update()));
            }
            _ = tokio::signal::ctrl_c() => {
                debug!("Interrupted, stopping");
                break;
            }
        }
    }

    monitor.shutdown();
    Ok(())
}
