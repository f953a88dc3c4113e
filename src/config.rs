// Game tunables, overridable from the `#game-config` JSON block in index.html,
// plus the static asset manifest.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::model::{AttackKind, Cue};

/// localStorage key holding the best score as a decimal string.
pub const HIGH_SCORE_KEY: &str = "punchGameHighScore";

/// DOM id of the optional JSON override block.
pub const CONFIG_ELEMENT_ID: &str = "game-config";

pub const PRIMARY_WEAPON_IMG: &str = "/fist.png";
pub const SECONDARY_WEAPON_IMG: &str = "/sandal.png";
pub const TARGET_PORTRAIT_IMG: &str = "/target-portrait.png";

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CelebrationPreset {
    pub particle_count: u32,
    /// Cone width in degrees, centred on straight up.
    pub spread_deg: f64,
    /// Vertical launch origin as a fraction of the viewport height.
    pub origin_y: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub splash_duration_ms: f64,
    pub splash_tick_ms: u32,
    /// Delay before the splash tries the intro loop on its own.
    pub splash_autoplay_delay_ms: f64,
    pub session_secs: u32,
    pub countdown_cue_at_secs: u32,
    /// Driver period while a round is running.
    pub running_tick_ms: u32,
    pub reposition_period_ms: f64,
    pub target_min_pct: f64,
    pub target_max_pct: f64,
    pub hit_delay_ms: f64,
    pub attack_clear_ms: f64,
    pub milestone_delay_ms: f64,
    pub milestone_step: u32,
    pub primary_points: u32,
    pub secondary_points: u32,
    pub audio_retry_delay_ms: u32,
    pub sound_preview_delay_ms: u32,
    pub toast_lifetime_ms: u32,
    pub minor_celebration: CelebrationPreset,
    pub major_celebration: CelebrationPreset,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            splash_duration_ms: 10_000.0,
            splash_tick_ms: 100,
            splash_autoplay_delay_ms: 500.0,
            session_secs: 30,
            countdown_cue_at_secs: 10,
            running_tick_ms: 50,
            reposition_period_ms: 2_000.0,
            target_min_pct: 20.0,
            target_max_pct: 80.0,
            hit_delay_ms: 300.0,
            attack_clear_ms: 1_000.0,
            milestone_delay_ms: 500.0,
            milestone_step: 10,
            primary_points: 1,
            secondary_points: 2,
            audio_retry_delay_ms: 100,
            sound_preview_delay_ms: 100,
            toast_lifetime_ms: 4_000,
            minor_celebration: CelebrationPreset {
                particle_count: 100,
                spread_deg: 70.0,
                origin_y: 0.6,
            },
            major_celebration: CelebrationPreset {
                particle_count: 200,
                spread_deg: 160.0,
                origin_y: 0.6,
            },
        }
    }
}

impl GameConfig {
    /// Parse an override document; missing fields keep their defaults.
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let cfg: GameConfig =
            serde_json::from_str(raw).context("game-config block is not valid JSON")?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.session_secs > 0, "session_secs must be positive");
        anyhow::ensure!(self.milestone_step > 0, "milestone_step must be positive");
        anyhow::ensure!(
            self.target_min_pct < self.target_max_pct,
            "target range is empty ({}..{})",
            self.target_min_pct,
            self.target_max_pct
        );
        anyhow::ensure!(
            self.reposition_period_ms > 0.0,
            "reposition_period_ms must be positive"
        );
        anyhow::ensure!(self.hit_delay_ms >= 0.0, "hit_delay_ms must not be negative");
        anyhow::ensure!(
            self.milestone_delay_ms >= 0.0,
            "milestone_delay_ms must not be negative"
        );
        anyhow::ensure!(
            self.splash_duration_ms > 0.0,
            "splash_duration_ms must be positive"
        );
        anyhow::ensure!(
            self.splash_tick_ms > 0 && self.running_tick_ms > 0,
            "driver ticks must be positive"
        );
        anyhow::ensure!(
            self.hit_delay_ms < self.attack_clear_ms,
            "attack must clear after it hits"
        );
        Ok(())
    }

    /// Read the embedded override block, falling back to defaults.
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        match raw {
            Some(raw) if !raw.trim().is_empty() => match Self::from_json(&raw) {
                Ok(cfg) => {
                    if cfg != Self::default() {
                        log::info!("game config overrides applied");
                    }
                    cfg
                }
                Err(e) => {
                    log::warn!("ignoring game config overrides: {e:#}");
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }

    pub fn points_for(&self, kind: AttackKind) -> u32 {
        match kind {
            AttackKind::Primary => self.primary_points,
            AttackKind::Secondary => self.secondary_points,
        }
    }
}

/// Playback settings for one cue.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CueSettings {
    pub path: &'static str,
    pub volume: f64,
    pub looping: bool,
}

pub fn cue_settings(cue: Cue) -> CueSettings {
    let (path, volume, looping) = match cue {
        Cue::AttackPrimary => ("/punch-sound.mp3", 1.0, false),
        Cue::AttackSecondary => ("/sandal-sound.mp3", 1.0, false),
        Cue::SessionStart => ("/game-start.mp3", 0.5, false),
        Cue::SessionEnd => ("/game-over.mp3", 0.5, false),
        Cue::Milestone => ("/milestone.mp3", 0.5, false),
        Cue::Countdown => ("/countdown.mp3", 0.4, false),
        Cue::AmbientLoop => ("/background-music.mp3", 0.3, true),
        Cue::IntroLoop => ("/splash-audio.mp3", 0.4, true),
    };
    CueSettings {
        path,
        volume,
        looping,
    }
}
