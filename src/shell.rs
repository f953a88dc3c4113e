// Glue between the pure session and the browser: owns the session, the audio
// engine, the RNG and the transient overlays, and carries out effects.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::audio::AudioEngine;
use crate::audio::html::HtmlCuePlayer;
use crate::components::arena::SwingView;
use crate::components::confetti::Burst;
use crate::components::toast::Toast;
use crate::config::GameConfig;
use crate::model::{AttackKind, Celebration, Cue, Effect, GameSession, Phase};
use crate::storage;

pub struct Shell {
    pub session: GameSession,
    /// Created on mount, dropped on teardown.
    pub audio: Option<AudioEngine<HtmlCuePlayer>>,
    pub rng: StdRng,
    pub toasts: Vec<Toast>,
    pub bursts: Vec<Burst>,
    next_id: u64,
}

impl Shell {
    pub fn new(config: GameConfig, high_score: u32) -> Self {
        Self {
            session: GameSession::new(config, high_score),
            audio: None,
            rng: StdRng::from_entropy(),
            toasts: Vec::new(),
            bursts: Vec::new(),
            next_id: 0,
        }
    }

    pub fn mount_audio(&mut self) {
        if self.audio.is_none() {
            let retry = self.session.config().audio_retry_delay_ms;
            self.audio = Some(AudioEngine::new(HtmlCuePlayer::new(retry)));
        }
    }

    pub fn sound_enabled(&self) -> bool {
        self.audio.as_ref().is_none_or(|a| a.sound_enabled())
    }

    pub fn is_playing(&self, cue: Cue) -> bool {
        self.audio.as_ref().is_some_and(|a| a.is_playing(cue))
    }

    /// Unlock on a user gesture. During the splash this also brings in the
    /// intro loop, since that's the first moment it can sound. Returns whether
    /// audio is unlocked afterwards.
    pub fn gesture(&mut self) -> bool {
        let in_splash = self.session.phase() == Phase::Splash;
        let Some(audio) = self.audio.as_mut() else {
            return false;
        };
        if audio.unlock() && in_splash {
            audio.start_loop(Cue::IntroLoop);
        }
        audio.is_unlocked()
    }

    pub fn enable_intro_audio(&mut self) {
        self.gesture();
        if self.session.phase() == Phase::Splash {
            if let Some(audio) = self.audio.as_mut() {
                audio.start_loop(Cue::IntroLoop);
            }
        }
    }

    pub fn skip_splash(&mut self, now: f64) {
        self.gesture();
        let fx = self.session.skip_splash();
        self.apply(fx, now);
    }

    pub fn start(&mut self, now: f64) {
        self.gesture();
        let fx = self.session.start(now);
        self.apply(fx, now);
    }

    pub fn attack(&mut self, kind: AttackKind, now: f64) {
        self.gesture();
        if let Err(e) = self.session.attack(kind, now) {
            log::debug!("{kind:?} ignored: {e}");
        }
    }

    /// Returns the new sound state.
    pub fn toggle_sound(&mut self) -> bool {
        self.gesture();
        self.audio.as_mut().is_none_or(|a| a.toggle_sound())
    }

    pub fn play_preview(&mut self) {
        if let Some(audio) = self.audio.as_mut() {
            audio.play(Cue::Milestone);
        }
    }

    pub fn toggle_music(&mut self) {
        self.gesture();
        if let Some(audio) = self.audio.as_mut() {
            audio.toggle_background_music();
        }
    }

    pub fn tick(&mut self, now: f64) {
        let fx = self.session.advance(now, &mut self.rng);
        self.apply(fx, now);
        self.toasts.retain(|t| t.expires_at > now);
        self.bursts.retain(|b| b.expires_at > now);
    }

    pub fn swing_view(&self) -> Option<SwingView> {
        self.session.current_swing().map(|a| SwingView {
            kind: a.kind,
            travel_to: a.travel_to,
            effect_text: a.effect_text(),
        })
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn apply(&mut self, fx: Vec<Effect>, now: f64) {
        for effect in fx {
            match effect {
                Effect::PlayCue(cue) => {
                    if let Some(a) = self.audio.as_mut() {
                        a.play(cue);
                    }
                }
                Effect::StartLoop(cue) => {
                    if let Some(a) = self.audio.as_mut() {
                        a.start_loop(cue);
                    }
                }
                Effect::RestartLoop(cue) => {
                    if let Some(a) = self.audio.as_mut() {
                        a.restart_loop(cue);
                    }
                }
                Effect::StopLoop(cue) => {
                    if let Some(a) = self.audio.as_mut() {
                        a.stop(cue);
                    }
                }
                Effect::Notify(notice) => {
                    let id = self.next_id();
                    let lifetime = self.session.config().toast_lifetime_ms as f64;
                    self.toasts.push(Toast {
                        id,
                        notice,
                        expires_at: now + lifetime,
                    });
                }
                Effect::Celebrate(kind) => {
                    let id = self.next_id();
                    let preset = match kind {
                        Celebration::Minor => self.session.config().minor_celebration,
                        Celebration::Major => self.session.config().major_celebration,
                    };
                    let burst = Burst::new(id, preset, now, &mut self.rng);
                    self.bursts.push(burst);
                }
                Effect::PersistHighScore(score) => storage::save_high_score(score),
            }
        }
    }
}
