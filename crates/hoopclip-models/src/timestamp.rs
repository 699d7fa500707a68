//! Time formatting helpers for shot and clip timestamps.

/// Round seconds to two decimals, the precision shot timestamps are reported at.
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format seconds as `M:SS`, or `H:MM:SS` once past the hour.
///
/// # Examples
/// ```
/// use hoopclip_models::timestamp::format_clock;
/// assert_eq!(format_clock(75.4), "1:15");
/// assert_eq!(format_clock(3725.0), "1:02:05");
/// ```
pub fn format_clock(total_secs: f64) -> String {
    let total = total_secs.max(0.0).floor() as u64;
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_hundredths() {
        assert_eq!(round_hundredths(55.0 / 30.0), 1.83);
        assert_eq!(round_hundredths(200.0 / 3.0), 66.67);
        assert_eq!(round_hundredths(0.0), 0.0);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(9.99), "0:09");
        assert_eq!(format_clock(600.0), "10:00");
        assert_eq!(format_clock(-3.0), "0:00");
    }
}
