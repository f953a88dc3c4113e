// `<audio>` element backend plus an AudioContext kept around only to coax
// browsers into honouring autoplay after the first gesture.

use std::collections::HashMap;

use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{AudioContext, AudioContextState, HtmlAudioElement};

use super::{CuePlayer, LoopRejected};
use crate::config::cue_settings;
use crate::model::Cue;

pub struct HtmlCuePlayer {
    cues: HashMap<Cue, HtmlAudioElement>,
    output: Option<AudioContext>,
    retry_delay_ms: u32,
}

impl HtmlCuePlayer {
    pub fn new(retry_delay_ms: u32) -> Self {
        let mut cues = HashMap::new();
        if web_sys::window().is_none() {
            log::warn!("no window, audio disabled");
            return Self {
                cues,
                output: None,
                retry_delay_ms,
            };
        }
        for cue in Cue::ALL {
            let settings = cue_settings(cue);
            match HtmlAudioElement::new_with_src(settings.path) {
                Ok(el) => {
                    el.set_volume(settings.volume);
                    el.set_loop(settings.looping);
                    cues.insert(cue, el);
                }
                Err(e) => log::warn!("could not load {}: {:?}", settings.path, e),
            }
        }
        let output = match AudioContext::new() {
            Ok(ctx) => Some(ctx),
            Err(e) => {
                log::warn!("AudioContext unavailable: {:?}", e);
                None
            }
        };
        Self {
            cues,
            output,
            retry_delay_ms,
        }
    }
}

fn copy_of(el: &HtmlAudioElement, cue: Cue) -> Option<HtmlAudioElement> {
    let node = el.clone_node_with_deep(true).ok()?;
    let copy = node.dyn_into::<HtmlAudioElement>().ok()?;
    copy.set_volume(cue_settings(cue).volume);
    Some(copy)
}

fn watch(label: &'static str, cue: Cue, promise: Result<js_sys::Promise, wasm_bindgen::JsValue>) {
    match promise {
        Ok(p) => spawn_local(async move {
            if let Err(e) = JsFuture::from(p).await {
                log::debug!("{label} {cue:?} rejected: {e:?}");
            }
        }),
        Err(e) => log::debug!("{label} {cue:?} failed: {e:?}"),
    }
}

impl CuePlayer for HtmlCuePlayer {
    fn play_overlapping(&mut self, cue: Cue) {
        let Some(source) = self.cues.get(&cue).cloned() else {
            return;
        };
        let delay = self.retry_delay_ms;
        let first = copy_of(&source, cue).unwrap_or_else(|| source.clone());
        let attempt = first.play();
        spawn_local(async move {
            let err = match attempt {
                Ok(p) => match JsFuture::from(p).await {
                    Ok(_) => return,
                    Err(e) => e,
                },
                Err(e) => e,
            };
            log::warn!("{cue:?} playback rejected, retrying: {err:?}");
            TimeoutFuture::new(delay).await;
            source.set_current_time(0.0);
            match source.play() {
                Ok(p) => {
                    if let Err(e) = JsFuture::from(p).await {
                        log::warn!("{cue:?} retry failed: {e:?}");
                    }
                }
                Err(e) => log::warn!("{cue:?} retry failed: {e:?}"),
            }
        });
    }

    fn start_loop(&mut self, cue: Cue, rejected: LoopRejected) {
        let Some(el) = self.cues.get(&cue) else {
            rejected.report();
            return;
        };
        el.set_current_time(0.0);
        match el.play() {
            Ok(p) => spawn_local(async move {
                if let Err(e) = JsFuture::from(p).await {
                    log::debug!("loop {cue:?} rejected: {e:?}");
                    rejected.report();
                }
            }),
            Err(e) => {
                log::debug!("loop {cue:?} failed: {e:?}");
                rejected.report();
            }
        }
    }

    fn stop(&mut self, cue: Cue) {
        if let Some(el) = self.cues.get(&cue) {
            let _ = el.pause();
            el.set_current_time(0.0);
        }
    }

    fn prime(&mut self) {
        for (cue, el) in &self.cues {
            watch("prime", *cue, el.play());
            let _ = el.pause();
            el.set_current_time(0.0);
        }
    }

    fn resume_output(&mut self) {
        let Some(ctx) = &self.output else { return };
        if ctx.state() != AudioContextState::Suspended {
            return;
        }
        match ctx.resume() {
            Ok(p) => spawn_local(async move {
                match JsFuture::from(p).await {
                    Ok(_) => log::debug!("AudioContext resumed"),
                    Err(e) => log::warn!("AudioContext resume failed: {e:?}"),
                }
            }),
            Err(e) => log::warn!("AudioContext resume failed: {e:?}"),
        }
    }
}
