// Small presentation helpers shared by the components.

/// Whole seconds left on the splash, rounded down like the progress label.
pub fn splash_seconds_remaining(progress: f64, duration_ms: f64) -> u32 {
    let total = duration_ms / 1000.0;
    let left = total - progress.clamp(0.0, 100.0) / 100.0 * total;
    left.floor().max(0.0) as u32
}

pub fn splash_label(progress: f64, duration_ms: f64) -> String {
    if progress < 100.0 {
        format!(
            "{} seconds remaining...",
            splash_seconds_remaining(progress, duration_ms)
        )
    } else {
        "Loading game...".to_string()
    }
}

pub fn pct(v: f64) -> String {
    format!("{:.2}%", v)
}

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splash_countdown_label() {
        assert_eq!(splash_label(0.0, 10_000.0), "10 seconds remaining...");
        assert_eq!(splash_label(5.0, 10_000.0), "9 seconds remaining...");
        assert_eq!(splash_label(99.9, 10_000.0), "0 seconds remaining...");
        assert_eq!(splash_label(100.0, 10_000.0), "Loading game...");
    }

    #[test]
    fn pct_formats_style_values() {
        assert_eq!(pct(37.5), "37.50%");
    }
}
