// Splash countdown, derived from elapsed wall-clock time so a slow event loop
// delays redraws but never stretches the splash.
#[derive(Default, Debug, Clone)]
pub struct SplashClock {
    pub started_at: Option<f64>,
    /// 0..=100
    pub progress: f64,
    pub autoplay_requested: bool,
}

impl SplashClock {
    pub fn begin(&mut self, now: f64) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub fn elapsed(&self, now: f64) -> f64 {
        self.started_at.map_or(0.0, |t| (now - t).max(0.0))
    }

    /// Recompute progress; returns true once the splash has run its course.
    pub fn update(&mut self, now: f64, duration_ms: f64) -> bool {
        if self.started_at.is_none() {
            return false;
        }
        self.progress = if duration_ms <= 0.0 {
            100.0
        } else {
            (self.elapsed(now) / duration_ms * 100.0).min(100.0)
        };
        self.progress >= 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_until_begun() {
        let mut s = SplashClock::default();
        assert!(!s.update(50_000.0, 10_000.0));
        assert_eq!(s.progress, 0.0);
    }

    #[test]
    fn progress_tracks_wall_clock() {
        let mut s = SplashClock::default();
        s.begin(1_000.0);
        assert!(!s.update(3_500.0, 10_000.0));
        assert_eq!(s.progress, 25.0);
        // a late tick jumps straight to completion
        assert!(s.update(40_000.0, 10_000.0));
        assert_eq!(s.progress, 100.0);
    }

    #[test]
    fn begin_is_sticky() {
        let mut s = SplashClock::default();
        s.begin(0.0);
        s.begin(5_000.0);
        assert_eq!(s.started_at, Some(0.0));
    }
}
