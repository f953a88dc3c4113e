/// Round countdown. Remaining seconds come from elapsed time rather than a
/// per-tick decrement.
#[derive(Debug, Clone)]
pub struct RoundClock {
    pub started_at: f64,
    pub total_secs: u32,
    pub remaining_secs: u32,
    pub countdown_cued: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTick {
    pub remaining_secs: u32,
    /// Set on the single tick where the low-time warning should sound.
    pub countdown_due: bool,
    pub expired: bool,
}

impl RoundClock {
    pub fn new(total_secs: u32) -> Self {
        Self {
            started_at: 0.0,
            total_secs,
            remaining_secs: total_secs,
            countdown_cued: false,
        }
    }

    pub fn start(now: f64, total_secs: u32) -> Self {
        Self {
            started_at: now,
            ..Self::new(total_secs)
        }
    }

    pub fn ends_at(&self) -> f64 {
        self.started_at + self.total_secs as f64 * 1000.0
    }

    pub fn update(&mut self, now: f64, cue_at_secs: u32) -> RoundTick {
        let elapsed_secs = ((now - self.started_at).max(0.0) / 1000.0).floor() as u64;
        let remaining = (self.total_secs as u64).saturating_sub(elapsed_secs) as u32;
        self.remaining_secs = remaining;
        let countdown_due = !self.countdown_cued && remaining > 0 && remaining <= cue_at_secs;
        if countdown_due {
            self.countdown_cued = true;
        }
        RoundTick {
            remaining_secs: remaining,
            countdown_due,
            expired: remaining == 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_by_elapsed_seconds() {
        let mut r = RoundClock::start(10_000.0, 30);
        assert_eq!(r.update(10_999.0, 10).remaining_secs, 30);
        assert_eq!(r.update(11_000.0, 10).remaining_secs, 29);
        let t = r.update(40_000.0, 10);
        assert_eq!(t.remaining_secs, 0);
        assert!(t.expired);
    }

    #[test]
    fn countdown_cue_fires_once() {
        let mut r = RoundClock::start(0.0, 30);
        let mut fired = 0;
        let mut at = None;
        for ms in (0..30_000).step_by(50) {
            let t = r.update(ms as f64, 10);
            if t.countdown_due {
                fired += 1;
                at = Some(t.remaining_secs);
            }
        }
        assert_eq!(fired, 1);
        assert_eq!(at, Some(10));
    }

    #[test]
    fn countdown_cue_survives_a_skipped_second() {
        let mut r = RoundClock::start(0.0, 30);
        assert!(!r.update(19_500.0, 10).countdown_due); // 11 left
        let t = r.update(21_200.0, 10); // 9 left, never saw 10
        assert!(t.countdown_due);
        assert!(!r.update(22_000.0, 10).countdown_due);
    }

    #[test]
    fn no_cue_when_expiring_in_one_jump() {
        let mut r = RoundClock::start(0.0, 30);
        let t = r.update(60_000.0, 10);
        assert!(t.expired);
        assert!(!t.countdown_due);
    }
}
