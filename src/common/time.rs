use chrono::{DateTime, Utc};

/// Renders a past instant relative to `now`, the way the client displays
/// message and conversation timestamps.
pub fn format_relative(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(then);
    let minutes = delta.num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes} minute{} ago", plural(minutes));
    }
    let hours = delta.num_hours();
    if hours < 24 {
        return format!("{hours} hour{} ago", plural(hours));
    }
    let days = delta.num_days();
    if days < 7 {
        return format!("{days} day{} ago", plural(days));
    }
    then.format("%b %-d, %Y").to_string()
}

fn plural(n: i64) -> &'static str {
    if n == 1 { "" } else { "s" }
}
