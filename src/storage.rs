// Best-score persistence in localStorage.

use crate::config::HIGH_SCORE_KEY;

/// Anything that isn't a plain non-negative integer reads as zero.
pub fn parse_high_score(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else { return 0 };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }
    match trimmed.parse::<u32>() {
        Ok(v) => v,
        Err(e) => {
            log::warn!("ignoring stored high score {raw:?}: {e}");
            0
        }
    }
}

pub fn load_high_score() -> u32 {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            if let Ok(raw) = store.get_item(HIGH_SCORE_KEY) {
                return parse_high_score(raw.as_deref());
            }
        }
    }
    log::warn!("localStorage unavailable, high score starts at 0");
    0
}

pub fn save_high_score(score: u32) {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            if store.set_item(HIGH_SCORE_KEY, &score.to_string()).is_err() {
                log::warn!("could not persist high score {score}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_or_blank_is_zero() {
        assert_eq!(parse_high_score(None), 0);
        assert_eq!(parse_high_score(Some("")), 0);
        assert_eq!(parse_high_score(Some("  ")), 0);
    }

    #[test]
    fn reads_plain_integers() {
        assert_eq!(parse_high_score(Some("42")), 42);
        assert_eq!(parse_high_score(Some(" 7\n")), 7);
    }

    #[test]
    fn malformed_values_fall_back() {
        for raw in ["-3", "12abc", "1e3", "NaN", "99999999999999"] {
            assert_eq!(parse_high_score(Some(raw)), 0, "{raw}");
        }
    }
}
