// Audio engine: one per page, every cue gated by `AudioPolicy::permits`.
// The `<audio>` element backend is in `html`; tests use an in-memory player.

pub mod html;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::model::Cue;

/// Low-level sink for cue playback.
pub trait CuePlayer {
    /// Play a one-shot cue on a fresh copy so overlapping hits don't cut each
    /// other off.
    fn play_overlapping(&mut self, cue: Cue);
    /// Play a looping cue from position zero. The player calls
    /// [`LoopRejected::report`] if the browser refuses playback.
    fn start_loop(&mut self, cue: Cue, rejected: LoopRejected);
    /// Pause and rewind.
    fn stop(&mut self, cue: Cue);
    /// Play-then-pause every cue so later programmatic playback is allowed.
    fn prime(&mut self);
    /// Wake the output context if the browser suspended it.
    fn resume_output(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AudioPolicy {
    pub sound_enabled: bool,
    pub unlocked: bool,
}

impl Default for AudioPolicy {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            unlocked: false,
        }
    }
}

impl AudioPolicy {
    pub fn permits(&self) -> bool {
        self.sound_enabled && self.unlocked
    }
}

/// Loops the engine believes are sounding, keyed by the start that began them.
type LoopTable = Rc<RefCell<HashMap<Cue, u64>>>;

/// Handed to the player with each loop start; reporting it forgets that start.
pub struct LoopRejected {
    loops: Weak<RefCell<HashMap<Cue, u64>>>,
    cue: Cue,
    start: u64,
}

impl LoopRejected {
    pub fn report(self) {
        let Some(loops) = self.loops.upgrade() else {
            return;
        };
        let mut loops = loops.borrow_mut();
        // a later restart owns the slot now
        if loops.get(&self.cue) == Some(&self.start) {
            loops.remove(&self.cue);
            log::warn!("{:?} loop was refused by the browser", self.cue);
        }
    }
}

pub struct AudioEngine<P: CuePlayer> {
    player: P,
    policy: AudioPolicy,
    loops_playing: LoopTable,
    starts: u64,
}

impl<P: CuePlayer> AudioEngine<P> {
    pub fn new(player: P) -> Self {
        Self {
            player,
            policy: AudioPolicy::default(),
            loops_playing: Rc::new(RefCell::new(HashMap::new())),
            starts: 0,
        }
    }

    pub fn sound_enabled(&self) -> bool {
        self.policy.sound_enabled
    }

    pub fn is_unlocked(&self) -> bool {
        self.policy.unlocked
    }

    pub fn is_playing(&self, cue: Cue) -> bool {
        self.loops_playing.borrow().contains_key(&cue)
    }

    /// Must be called from a genuine user gesture. Returns true the first time.
    pub fn unlock(&mut self) -> bool {
        if self.policy.unlocked {
            return false;
        }
        self.player.prime();
        self.player.resume_output();
        self.policy.unlocked = true;
        log::info!("audio unlocked");
        true
    }

    pub fn play(&mut self, cue: Cue) -> bool {
        if cue.is_loop() {
            return self.start_loop(cue);
        }
        if !self.policy.permits() {
            return false;
        }
        self.player.play_overlapping(cue);
        true
    }

    /// Start a loop unless it is already running.
    pub fn start_loop(&mut self, cue: Cue) -> bool {
        if !self.policy.permits() || self.is_playing(cue) {
            return false;
        }
        self.starts += 1;
        self.loops_playing.borrow_mut().insert(cue, self.starts);
        let rejected = LoopRejected {
            loops: Rc::downgrade(&self.loops_playing),
            cue,
            start: self.starts,
        };
        self.player.start_loop(cue, rejected);
        true
    }

    /// Stop then start again from the top.
    pub fn restart_loop(&mut self, cue: Cue) -> bool {
        self.stop(cue);
        self.start_loop(cue)
    }

    pub fn stop(&mut self, cue: Cue) {
        self.player.stop(cue);
        self.loops_playing.borrow_mut().remove(&cue);
    }

    /// Flip the master switch. Turning it off silences every loop.
    pub fn toggle_sound(&mut self) -> bool {
        self.policy.sound_enabled = !self.policy.sound_enabled;
        if !self.policy.sound_enabled {
            let playing: Vec<Cue> = self.loops_playing.borrow().keys().copied().collect();
            for cue in playing {
                self.stop(cue);
            }
        }
        log::debug!("sound enabled: {}", self.policy.sound_enabled);
        self.policy.sound_enabled
    }

    /// Returns whether the background loop is playing afterwards.
    pub fn toggle_background_music(&mut self) -> bool {
        if self.is_playing(Cue::AmbientLoop) {
            self.stop(Cue::AmbientLoop);
            false
        } else if self.policy.permits() {
            self.restart_loop(Cue::AmbientLoop)
        } else {
            false
        }
    }
}

impl<P: CuePlayer> Drop for AudioEngine<P> {
    fn drop(&mut self) {
        for cue in Cue::ALL {
            self.player.stop(cue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Play(Cue),
        Loop(Cue),
        Stop(Cue),
        Prime,
        Resume,
    }

    #[derive(Clone, Default)]
    struct Recorder {
        calls: Rc<RefCell<Vec<Call>>>,
        pending: Rc<RefCell<Vec<LoopRejected>>>,
    }

    impl Recorder {
        fn take(&self) -> Vec<Call> {
            std::mem::take(&mut *self.calls.borrow_mut())
        }

        /// Browser refuses every loop started so far.
        fn refuse_pending(&self) {
            let pending = std::mem::take(&mut *self.pending.borrow_mut());
            for rejected in pending {
                rejected.report();
            }
        }
    }

    impl CuePlayer for Recorder {
        fn play_overlapping(&mut self, cue: Cue) {
            self.calls.borrow_mut().push(Call::Play(cue));
        }
        fn start_loop(&mut self, cue: Cue, rejected: LoopRejected) {
            self.calls.borrow_mut().push(Call::Loop(cue));
            self.pending.borrow_mut().push(rejected);
        }
        fn stop(&mut self, cue: Cue) {
            self.calls.borrow_mut().push(Call::Stop(cue));
        }
        fn prime(&mut self) {
            self.calls.borrow_mut().push(Call::Prime);
        }
        fn resume_output(&mut self) {
            self.calls.borrow_mut().push(Call::Resume);
        }
    }

    fn unlocked() -> (AudioEngine<Recorder>, Recorder) {
        let rec = Recorder::default();
        let mut engine = AudioEngine::new(rec.clone());
        engine.unlock();
        rec.take();
        (engine, rec)
    }

    #[test]
    fn silent_until_unlocked() {
        let rec = Recorder::default();
        let mut engine = AudioEngine::new(rec.clone());
        assert!(!engine.play(Cue::Countdown));
        assert!(!engine.start_loop(Cue::IntroLoop));
        assert!(rec.take().is_empty());
    }

    #[test]
    fn unlock_only_once() {
        let rec = Recorder::default();
        let mut engine = AudioEngine::new(rec.clone());
        assert!(!engine.is_unlocked());
        assert!(engine.unlock());
        assert!(!engine.unlock());
        assert!(engine.is_unlocked());
        assert_eq!(rec.take(), vec![Call::Prime, Call::Resume]);
    }

    #[test]
    fn loops_are_idempotent() {
        let (mut engine, rec) = unlocked();
        assert!(engine.start_loop(Cue::IntroLoop));
        assert!(!engine.start_loop(Cue::IntroLoop));
        assert_eq!(rec.take(), vec![Call::Loop(Cue::IntroLoop)]);
    }

    #[test]
    fn refused_loop_can_be_retried() {
        let (mut engine, rec) = unlocked();
        assert!(engine.start_loop(Cue::IntroLoop));
        assert!(engine.is_playing(Cue::IntroLoop));
        rec.refuse_pending();
        assert!(!engine.is_playing(Cue::IntroLoop));
        assert!(engine.start_loop(Cue::IntroLoop));
        assert!(engine.is_playing(Cue::IntroLoop));
        assert_eq!(
            rec.take(),
            vec![Call::Loop(Cue::IntroLoop), Call::Loop(Cue::IntroLoop)]
        );
    }

    #[test]
    fn stale_refusal_leaves_restarted_loop_alone() {
        let (mut engine, rec) = unlocked();
        engine.start_loop(Cue::AmbientLoop);
        let first = std::mem::take(&mut *rec.pending.borrow_mut());
        engine.restart_loop(Cue::AmbientLoop);
        for rejected in first {
            rejected.report();
        }
        assert!(engine.is_playing(Cue::AmbientLoop));
        assert!(!engine.toggle_background_music());
    }

    #[test]
    fn refused_music_shows_as_stopped() {
        let (mut engine, rec) = unlocked();
        assert!(engine.toggle_background_music());
        rec.refuse_pending();
        assert!(!engine.is_playing(Cue::AmbientLoop));
        assert!(engine.toggle_background_music());
    }

    #[test]
    fn refusal_after_drop_is_harmless() {
        let (mut engine, rec) = unlocked();
        engine.start_loop(Cue::IntroLoop);
        drop(engine);
        rec.refuse_pending();
    }

    #[test]
    fn restart_rewinds_before_playing() {
        let (mut engine, rec) = unlocked();
        engine.start_loop(Cue::AmbientLoop);
        rec.take();
        assert!(engine.restart_loop(Cue::AmbientLoop));
        assert_eq!(
            rec.take(),
            vec![Call::Stop(Cue::AmbientLoop), Call::Loop(Cue::AmbientLoop)]
        );
    }

    #[test]
    fn muting_stops_music_and_blocks_cues() {
        let (mut engine, rec) = unlocked();
        engine.start_loop(Cue::AmbientLoop);
        rec.take();
        assert!(!engine.toggle_sound());
        assert!(!engine.is_playing(Cue::AmbientLoop));
        assert_eq!(rec.take(), vec![Call::Stop(Cue::AmbientLoop)]);

        assert!(!engine.play(Cue::AttackPrimary));
        assert!(!engine.toggle_background_music());
        assert!(rec.take().is_empty());

        assert!(engine.toggle_sound());
        assert!(engine.play(Cue::AttackPrimary));
        assert_eq!(rec.take(), vec![Call::Play(Cue::AttackPrimary)]);
    }

    #[test]
    fn music_toggle_round_trip() {
        let (mut engine, rec) = unlocked();
        assert!(engine.toggle_background_music());
        assert!(!engine.toggle_background_music());
        assert_eq!(
            rec.take(),
            vec![
                Call::Stop(Cue::AmbientLoop),
                Call::Loop(Cue::AmbientLoop),
                Call::Stop(Cue::AmbientLoop)
            ]
        );
    }

    #[test]
    fn drop_silences_everything() {
        let (engine, rec) = unlocked();
        drop(engine);
        let calls = rec.take();
        assert_eq!(calls.len(), Cue::ALL.len());
        assert!(calls.iter().all(|c| matches!(c, Call::Stop(_))));
    }
}
