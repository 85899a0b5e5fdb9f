use std::time::Duration;

/// Elapsed time as `H:MM:SS`, hours unpadded and unbounded.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;
    format!("{}:{:02}:{:02}", hours, mins, secs)
}

/// Coarse relative age: seconds under a minute, minutes under an hour,
/// hours beyond that. Negative ages (clock skew) read as `0 sec ago`.
pub fn format_age(delta_secs: i64) -> String {
    let delta = delta_secs.max(0);
    if delta < 60 {
        format!("{} sec ago", delta)
    } else if delta < 3600 {
        format!("{} min ago", delta / 60)
    } else {
        format!("{} h ago", delta / 3600)
    }
}
