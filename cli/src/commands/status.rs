use color_eyre::eyre::Result;

use crate::config::UserConfig;
use crate::display::{battery_icon, format_level, format_time_remaining, status_line};
use crate::monitor::BatteryMonitor;

pub async fn run(config: &UserConfig, verbose: bool) -> Result<()> {
    let monitor = BatteryMonitor::from_config(config).await;
    let status = monitor.snapshot();
    monitor.shutdown();

    if !verbose {
        println!("{}", status_line(&status));
        return Ok(());
    }

    println!("Source:          {}", status.source_label());
    println!(
        "Level:           {} {}",
        battery_icon(status.level, status.charging),
        format_level(status.level)
    );
    println!("Charging:        {}", status.charging);
    println!(
        "Until full:      {}",
        format_time_remaining(status.charging_time)
    );
    println!(
        "Until empty:     {}",
        format_time_remaining(status.discharging_time)
    );

    Ok(())
}
