/// Utility helpers for the player view

/// Format seconds as `m:ss`. Zero, negative and non-finite values read `00:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "00:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Width of the filled part of the progress bar, in percent.
pub fn progress_percent(fraction: f64) -> f64 {
    if fraction.is_finite() {
        (fraction * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Turn a click's x offset inside the progress bar into a 0-1 fraction.
pub fn click_fraction(offset_x: f64, width: f64) -> Option<f64> {
    if !offset_x.is_finite() || !width.is_finite() || width <= 0.0 {
        return None;
    }
    Some((offset_x / width).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(f64::NAN), "00:00");
        assert_eq!(format_time(-4.0), "00:00");
        assert_eq!(format_time(9.7), "0:09");
        assert_eq!(format_time(61.0), "1:01");
        assert_eq!(format_time(754.2), "12:34");
    }

    #[test]
    fn percent_is_clamped() {
        assert_eq!(progress_percent(0.5), 50.0);
        assert_eq!(progress_percent(1.4), 100.0);
        assert_eq!(progress_percent(f64::INFINITY), 0.0);
    }

    #[test]
    fn click_fraction_needs_a_width() {
        assert_eq!(click_fraction(150.0, 300.0), Some(0.5));
        assert_eq!(click_fraction(400.0, 300.0), Some(1.0));
        assert_eq!(click_fraction(-5.0, 300.0), Some(0.0));
        assert_eq!(click_fraction(10.0, 0.0), None);
    }
}
