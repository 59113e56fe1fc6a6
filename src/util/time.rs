//! Timing and rate formatting for worker summaries

use std::time::Duration;

/// Scale steps shared by durations (from nanoseconds) and rates
const DURATION_UNITS: [(f64, &str); 3] = [(1e9, "s"), (1e6, "ms"), (1e3, "us")];
const RATE_UNITS: [(f64, &str); 3] = [(1e9, "G"), (1e6, "M"), (1e3, "K")];

/// Pick the largest unit `value` reaches, or `None` below the smallest one
fn scaled(value: f64, units: &[(f64, &'static str)]) -> Option<(f64, &'static str)> {
    units
        .iter()
        .find(|(scale, _)| value >= *scale)
        .map(|&(scale, suffix)| (value / scale, suffix))
}

/// Format a duration in human-readable form
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use primepulse::util::time::format_duration;
///
/// assert_eq!(format_duration(Duration::from_nanos(500)), "500ns");
/// assert_eq!(format_duration(Duration::from_micros(2500)), "2.50ms");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    match scaled(nanos as f64, &DURATION_UNITS) {
        Some((value, unit)) => format!("{:.2}{}", value, unit),
        None => format!("{}ns", nanos),
    }
}

/// Candidates tested per second, formatted for the summary table
///
/// A worker that tested nothing, or finished below timer resolution, has no
/// meaningful rate and shows `-`.
///
/// ```
/// use std::time::Duration;
/// use primepulse::util::time::format_rate;
///
/// assert_eq!(format_rate(1500, Duration::from_secs(1)), "1.50K");
/// assert_eq!(format_rate(10, Duration::ZERO), "-");
/// ```
pub fn format_rate(candidates: usize, elapsed: Duration) -> String {
    let seconds = elapsed.as_secs_f64();
    if candidates == 0 || seconds <= 0.0 {
        return "-".to_string();
    }

    let rate = candidates as f64 / seconds;
    match scaled(rate, &RATE_UNITS) {
        Some((value, suffix)) => format!("{:.2}{}", value, suffix),
        None => format!("{:.0}", rate),
    }
}
