//! Human-readable uptime.

const MS_PER_SECOND: u64 = 1000;
const SECONDS_PER_MINUTE: u64 = 60;
const MINUTES_PER_HOUR: u64 = 60;
const HOURS_PER_DAY: u64 = 24;

/// Format a millisecond duration as `2d 3h 5m 10s`.
///
/// Leading units that are zero are omitted. Once a unit is shown every
/// smaller unit is shown too, and seconds always are.
pub fn format_uptime(ms: u64) -> String {
    let seconds = ms / MS_PER_SECOND;
    let minutes = seconds / SECONDS_PER_MINUTE;
    let hours = minutes / MINUTES_PER_HOUR;
    let days = hours / HOURS_PER_DAY;

    let seconds = seconds % SECONDS_PER_MINUTE;
    if days > 0 {
        format!(
            "{}d {}h {}m {}s",
            days,
            hours % HOURS_PER_DAY,
            minutes % MINUTES_PER_HOUR,
            seconds
        )
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes % MINUTES_PER_HOUR, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
