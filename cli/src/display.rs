use std::time::Duration;

use crate::status::BatteryStatus;

/// Shown when no time estimate is available.
pub const TIME_PLACEHOLDER: &str = "--";

const ICON_CHARGED: &str = "🔋";
const ICON_LOW: &str = "🪫";

/// Format a time estimate as `H:MM` (one hour or more) or `M min`.
pub fn format_time_remaining(remaining: Option<Duration>) -> String {
    let secs = match remaining {
        Some(d) if !d.is_zero() => d.as_secs(),
        _ => return TIME_PLACEHOLDER.to_string(),
    };

    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;

    if hours > 0 {
        format!("{}:{:02}", hours, minutes)
    } else {
        format!("{} min", minutes)
    }
}

/// Glyph for the battery state.
///
/// Charging always wins. Above 50% and while charging share one glyph, the
/// two lower bands share the other.
#[allow(clippy::if_same_then_else)]
pub fn battery_icon(level: f64, charging: bool) -> &'static str {
    if charging {
        return ICON_CHARGED;
    }

    if level > 75.0 {
        ICON_CHARGED
    } else if level > 50.0 {
        ICON_CHARGED
    } else if level > 25.0 {
        ICON_LOW
    } else {
        ICON_LOW
    }
}

/// Whole levels print without a decimal, simulated tenths keep theirs.
pub fn format_level(level: f64) -> String {
    if level.fract() == 0.0 {
        format!("{:.0}%", level)
    } else {
        format!("{:.1}%", level)
    }
}

pub fn status_line(status: &BatteryStatus) -> String {
    let state = if status.charging {
        "charging"
    } else {
        "discharging"
    };

    format!(
        "{} {} {} · {} remaining · {}",
        battery_icon(status.level, status.charging),
        format_level(status.level),
        state,
        format_time_remaining(status.time_remaining()),
        status.source_label()
    )
}
