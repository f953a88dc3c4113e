use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::{Interval, Timeout};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{
    arena::Arena, confetti::ConfettiLayer, hud::Hud, idle_panel::IdlePanel,
    splash_screen::SplashScreen, toast::ToastStack,
};
use crate::config::GameConfig;
use crate::model::{AttackKind, Cue, Phase};
use crate::shell::Shell;
use crate::storage;
use crate::util::now_ms;

const IDLE_TICK_MS: u32 = 250;
const GESTURE_EVENTS: [&str; 3] = ["click", "touchstart", "keydown"];

#[function_component(App)]
pub fn app() -> Html {
    let shell = use_mut_ref(|| Shell::new(GameConfig::load(), storage::load_high_score()));
    let redraw = use_force_update();
    let preview = use_mut_ref(|| None::<Timeout>);

    // Mount: build the audio engine, start the splash clock, and listen for
    // the first gesture anywhere on the page until audio is unlocked.
    {
        let shell = shell.clone();
        let redraw = redraw.clone();
        use_effect_with((), move |_| {
            {
                let mut sh = shell.borrow_mut();
                sh.mount_audio();
                sh.session.begin_splash(now_ms());
            }
            let listeners: Rc<RefCell<Vec<EventListener>>> = Rc::default();
            if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
                let mut attached = listeners.borrow_mut();
                for name in GESTURE_EVENTS {
                    let shell = shell.clone();
                    let redraw = redraw.clone();
                    let listeners = listeners.clone();
                    attached.push(EventListener::new(&doc, name, move |_| {
                        let unlocked = shell.borrow_mut().gesture();
                        if unlocked {
                            // can't drop a listener while it is running
                            let listeners = listeners.clone();
                            spawn_local(async move { listeners.borrow_mut().clear() });
                        }
                        redraw.force_update();
                    }));
                }
            }
            move || {
                listeners.borrow_mut().clear();
                // dropping the engine pauses and rewinds every cue
                shell.borrow_mut().audio = None;
            }
        });
    }

    let phase = shell.borrow().session.phase();

    // Driver: one interval per phase, replaced whenever the phase changes.
    {
        let shell = shell.clone();
        let redraw = redraw.clone();
        use_effect_with(phase, move |phase| {
            let period = {
                let sh = shell.borrow();
                let cfg = sh.session.config();
                match phase {
                    Phase::Splash => cfg.splash_tick_ms,
                    Phase::Running => cfg.running_tick_ms,
                    Phase::Idle => IDLE_TICK_MS,
                }
            };
            log::debug!("driver {phase:?} every {period}ms");
            let interval = Interval::new(period, move || {
                shell.borrow_mut().tick(now_ms());
                redraw.force_update();
            });
            move || drop(interval)
        });
    }

    // Pending sound preview must not outlive the component.
    {
        let preview = preview.clone();
        use_effect_with((), move |_| move || drop(preview.borrow_mut().take()));
    }

    let action = |f: fn(&mut Shell, f64)| {
        let shell = shell.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: ()| {
            f(&mut shell.borrow_mut(), now_ms());
            redraw.force_update();
        })
    };
    let on_interact = action(|sh, _| {
        sh.gesture();
    });
    let on_enable_audio = action(|sh, _| sh.enable_intro_audio());
    let on_skip = action(Shell::skip_splash);
    let on_start = action(Shell::start);
    let on_toggle_music = action(|sh, _| sh.toggle_music());
    let on_attack = {
        let shell = shell.clone();
        let redraw = redraw.clone();
        Callback::from(move |kind: AttackKind| {
            shell.borrow_mut().attack(kind, now_ms());
            redraw.force_update();
        })
    };
    let on_toggle_sound = {
        let shell = shell.clone();
        let redraw = redraw.clone();
        let preview = preview.clone();
        Callback::from(move |_: ()| {
            let enabled = shell.borrow_mut().toggle_sound();
            let delay = shell.borrow().session.config().sound_preview_delay_ms;
            *preview.borrow_mut() = enabled.then(|| {
                let shell = shell.clone();
                Timeout::new(delay, move || shell.borrow_mut().play_preview())
            });
            redraw.force_update();
        })
    };

    let sh = shell.borrow();
    let session = &sh.session;
    let cfg = session.config();

    if phase == Phase::Splash {
        return html! {
            <SplashScreen
                progress={session.splash_progress()}
                duration_ms={cfg.splash_duration_ms}
                audio_playing={sh.is_playing(Cue::IntroLoop)}
                {on_interact}
                {on_enable_audio}
                {on_skip}
            />
        };
    }

    let running = phase == Phase::Running;
    html! {
        <>
            <div style="width:100%; max-width:672px; margin:0 auto; padding:24px; background:#fff; border-radius:12px; box-shadow:0 2px 12px rgba(0,0,0,0.1); display:flex; flex-direction:column; align-items:center; box-sizing:border-box;">
                <Hud
                    score={session.score()}
                    high_score={session.high_score()}
                    time_remaining={running.then(|| session.time_remaining_secs())}
                    sound_enabled={sh.sound_enabled()}
                    music_playing={sh.is_playing(Cue::AmbientLoop)}
                    {on_toggle_sound}
                    {on_toggle_music}
                />
                <div style="position:relative; width:100%; height:400px; border:2px solid #e5e7eb; border-radius:8px; overflow:hidden; background:#eff6ff;">
                    if running {
                        <Arena target={session.target()} swing={sh.swing_view()} {on_attack} />
                    } else {
                        <IdlePanel
                            high_score={session.high_score()}
                            session_secs={cfg.session_secs}
                            last_result={session.last_result()}
                            start={on_start}
                        />
                    }
                </div>
                if running {
                    <div style="margin-top:16px; text-align:center;">
                        <p style="margin:0;">{"Click the fist or the sandal to attack!"}</p>
                        <p style="margin:4px 0 0 0; font-size:13px; opacity:0.6;">
                            { format!("Punch = {} point, Sandal = {} points", cfg.primary_points, cfg.secondary_points) }
                        </p>
                    </div>
                }
            </div>
            <ToastStack toasts={sh.toasts.clone()} />
            <ConfettiLayer bursts={sh.bursts.clone()} />
        </>
    }
}
