// Game session state machine. No browser access: the shell supplies the clock
// and input and carries out the returned `Effect`s.

use std::fmt;

use rand::Rng;

use crate::config::GameConfig;
use crate::state::{AttackAnim, RoundClock, SplashClock, Target};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Splash,
    Idle,
    Running,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackKind {
    Primary,
    Secondary,
}

impl AttackKind {
    pub fn cue(self) -> Cue {
        match self {
            AttackKind::Primary => Cue::AttackPrimary,
            AttackKind::Secondary => Cue::AttackSecondary,
        }
    }

    pub fn effect_text(self) -> &'static str {
        match self {
            AttackKind::Primary => "POW!",
            AttackKind::Secondary => "SLAP!",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AttackKind::Primary => "Punch",
            AttackKind::Secondary => "Sandal",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    AttackPrimary,
    AttackSecondary,
    SessionStart,
    SessionEnd,
    Milestone,
    Countdown,
    AmbientLoop,
    IntroLoop,
}

impl Cue {
    pub const ALL: [Cue; 8] = [
        Cue::AttackPrimary,
        Cue::AttackSecondary,
        Cue::SessionStart,
        Cue::SessionEnd,
        Cue::Milestone,
        Cue::Countdown,
        Cue::AmbientLoop,
        Cue::IntroLoop,
    ];

    pub fn is_loop(self) -> bool {
        matches!(self, Cue::AmbientLoop | Cue::IntroLoop)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
}

impl Notice {
    fn new(title: &str, body: String) -> Self {
        Self {
            title: title.to_string(),
            body,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Celebration {
    /// Milestone burst.
    Minor,
    /// New high score burst.
    Major,
}

/// Side effect requested by the session. Order within a batch matters.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    PlayCue(Cue),
    StartLoop(Cue),
    /// Stop, rewind and play again from the start.
    RestartLoop(Cue),
    StopLoop(Cue),
    Notify(Notice),
    Celebrate(Celebration),
    PersistHighScore(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackRejected {
    NotRunning,
    InFlight,
}

impl fmt::Display for AttackRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttackRejected::NotRunning => write!(f, "no round in progress"),
            AttackRejected::InFlight => write!(f, "previous attack still animating"),
        }
    }
}

impl std::error::Error for AttackRejected {}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HitTally {
    pub primary: u32,
    pub secondary: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundResult {
    pub score: u32,
    pub hits: HitTally,
    pub new_high_score: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PendingMilestone {
    due_at: f64,
    value: u32,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    phase: Phase,
    score: u32,
    high_score: u32,
    hits: HitTally,
    splash: SplashClock,
    round: RoundClock,
    target: Target,
    next_reposition_at: f64,
    attack: Option<AttackAnim>,
    milestones: Vec<PendingMilestone>,
    last_result: Option<RoundResult>,
}

impl GameSession {
    pub fn new(config: GameConfig, high_score: u32) -> Self {
        let round = RoundClock::new(config.session_secs);
        Self {
            config,
            phase: Phase::Splash,
            score: 0,
            high_score,
            hits: HitTally::default(),
            splash: SplashClock::default(),
            round,
            target: Target::default(),
            next_reposition_at: 0.0,
            attack: None,
            milestones: Vec::new(),
            last_result: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn score(&self) -> u32 {
        self.score
    }
    pub fn high_score(&self) -> u32 {
        self.high_score
    }
    #[cfg(test)]
    pub fn hits(&self) -> HitTally {
        self.hits
    }
    pub fn time_remaining_secs(&self) -> u32 {
        self.round.remaining_secs
    }
    pub fn splash_progress(&self) -> f64 {
        self.splash.progress
    }
    pub fn target(&self) -> Target {
        self.target
    }
    pub fn current_swing(&self) -> Option<&AttackAnim> {
        self.attack.as_ref()
    }
    #[cfg(test)]
    pub fn is_animating(&self) -> bool {
        self.attack.is_some()
    }
    pub fn last_result(&self) -> Option<RoundResult> {
        self.last_result
    }

    pub fn begin_splash(&mut self, now: f64) {
        if self.phase == Phase::Splash {
            self.splash.begin(now);
        }
    }

    pub fn skip_splash(&mut self) -> Vec<Effect> {
        if self.phase != Phase::Splash {
            return Vec::new();
        }
        log::info!(
            "splash skipped at {:.0}%",
            self.splash.progress.clamp(0.0, 100.0)
        );
        self.phase = Phase::Idle;
        vec![
            Effect::StopLoop(Cue::IntroLoop),
            Effect::StopLoop(Cue::AmbientLoop),
        ]
    }

    pub fn start(&mut self, now: f64) -> Vec<Effect> {
        if self.phase != Phase::Idle {
            return Vec::new();
        }
        self.phase = Phase::Running;
        self.score = 0;
        self.hits = HitTally::default();
        self.round = RoundClock::start(now, self.config.session_secs);
        self.next_reposition_at = now + self.config.reposition_period_ms;
        self.attack = None;
        self.milestones.clear();
        self.last_result = None;
        log::info!("round started ({}s)", self.config.session_secs);
        vec![
            Effect::PlayCue(Cue::SessionStart),
            Effect::RestartLoop(Cue::AmbientLoop),
        ]
    }

    pub fn attack(&mut self, kind: AttackKind, now: f64) -> Result<(), AttackRejected> {
        if self.phase != Phase::Running {
            return Err(AttackRejected::NotRunning);
        }
        if self.attack.is_some() {
            return Err(AttackRejected::InFlight);
        }
        let points = self.config.points_for(kind);
        self.attack = Some(AttackAnim::new(kind, now, self.target, points));
        Ok(())
    }

    /// Run every deadline that has come due by `now`.
    pub fn advance<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R) -> Vec<Effect> {
        let mut fx = Vec::new();
        match self.phase {
            Phase::Splash => self.advance_splash(now, &mut fx),
            Phase::Running => self.advance_round(now, rng, &mut fx),
            Phase::Idle => {}
        }
        fx
    }

    fn advance_splash(&mut self, now: f64, fx: &mut Vec<Effect>) {
        if self.splash.started_at.is_none() {
            return;
        }
        if !self.splash.autoplay_requested
            && self.splash.elapsed(now) >= self.config.splash_autoplay_delay_ms
        {
            self.splash.autoplay_requested = true;
            fx.push(Effect::StartLoop(Cue::IntroLoop));
        }
        if self.splash.update(now, self.config.splash_duration_ms) {
            log::info!("splash finished");
            self.phase = Phase::Idle;
            fx.push(Effect::StopLoop(Cue::IntroLoop));
        }
    }

    fn advance_round<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R, fx: &mut Vec<Effect>) {
        // Nothing scheduled past the final whistle is allowed to happen.
        let horizon = now.min(self.round.ends_at());

        self.advance_attack(horizon, fx);

        let mut i = 0;
        while i < self.milestones.len() {
            if self.milestones[i].due_at <= horizon {
                let m = self.milestones.remove(i);
                fx.push(Effect::Celebrate(Celebration::Minor));
                fx.push(Effect::PlayCue(Cue::Milestone));
                fx.push(Effect::Notify(Notice::new(
                    "Milestone reached!",
                    format!("You've landed {} hits!", m.value),
                )));
            } else {
                i += 1;
            }
        }

        let tick = self.round.update(now, self.config.countdown_cue_at_secs);
        if tick.countdown_due {
            fx.push(Effect::PlayCue(Cue::Countdown));
        }
        if tick.expired {
            self.end(fx);
            return;
        }

        let mut slot_due = false;
        while self.next_reposition_at <= horizon {
            self.next_reposition_at += self.config.reposition_period_ms;
            slot_due = true;
        }
        if slot_due && self.attack.is_none() {
            self.target = Target::random(
                rng,
                self.config.target_min_pct,
                self.config.target_max_pct,
            );
        }
    }

    fn advance_attack(&mut self, horizon: f64, fx: &mut Vec<Effect>) {
        let Some(anim) = self.attack.as_mut() else {
            return;
        };
        if !anim.hit && anim.hit_at(self.config.hit_delay_ms) <= horizon {
            anim.hit = true;
            let before = self.score;
            self.score = self.score.saturating_add(anim.points);
            match anim.kind {
                AttackKind::Primary => self.hits.primary += 1,
                AttackKind::Secondary => self.hits.secondary += 1,
            }
            fx.push(Effect::PlayCue(anim.kind.cue()));
            let step = self.config.milestone_step;
            if before / step < self.score / step {
                self.milestones.push(PendingMilestone {
                    due_at: anim.hit_at(self.config.hit_delay_ms) + self.config.milestone_delay_ms,
                    value: self.score / step * step,
                });
            }
        }
        if anim.clear_at(self.config.attack_clear_ms) <= horizon {
            self.attack = None;
        }
    }

    fn end(&mut self, fx: &mut Vec<Effect>) {
        if let Some(anim) = self.attack.take() {
            if !anim.hit {
                log::debug!("round expired mid-swing, {:?} discarded", anim.kind);
            }
        }
        self.milestones.clear();
        self.phase = Phase::Idle;
        self.round.remaining_secs = 0;
        fx.push(Effect::PlayCue(Cue::SessionEnd));
        fx.push(Effect::StopLoop(Cue::AmbientLoop));

        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
            fx.push(Effect::PersistHighScore(self.score));
            fx.push(Effect::Celebrate(Celebration::Major));
            fx.push(Effect::Notify(Notice::new(
                "New High Score!",
                format!("You set a new record with {} points!", self.score),
            )));
        } else {
            fx.push(Effect::Notify(Notice::new(
                "Game Over!",
                format!("You scored {} points!", self.score),
            )));
        }
        log::info!("round over: score={} high={}", self.score, self.high_score);
        self.last_result = Some(RoundResult {
            score: self.score,
            hits: self.hits,
            new_high_score,
        });
    }
}
