use yew::prelude::*;

use crate::util::{pct, splash_label};

#[derive(Properties, PartialEq, Clone)]
pub struct SplashScreenProps {
    pub progress: f64,
    pub duration_ms: f64,
    pub audio_playing: bool,
    /// Any click on the backdrop counts as the audio gesture.
    pub on_interact: Callback<()>,
    pub on_enable_audio: Callback<()>,
    pub on_skip: Callback<()>,
}

#[function_component(SplashScreen)]
pub fn splash_screen(props: &SplashScreenProps) -> Html {
    let backdrop_cb = {
        let cb = props.on_interact.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let enable_cb = {
        let cb = props.on_enable_audio.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            cb.emit(())
        })
    };
    let skip_cb = {
        let cb = props.on_skip.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            cb.emit(())
        })
    };
    html! {
        <div onclick={backdrop_cb} style="position:fixed; inset:0; display:flex; align-items:center; justify-content:center; background:#000; z-index:50; padding:16px;">
            <div style="text-align:center; max-width:420px; width:100%;">
                <h1 style="margin:0 0 16px 0; font-size:40px; color:#dc2626;">{"Punch Game"}</h1>
                <h2 style="margin:0 0 28px 0; font-size:20px; color:#ef4444;">{"Get ready to swing"}</h2>
                <div style="width:100%; max-width:256px; height:12px; background:#1f2937; border-radius:999px; overflow:hidden; margin:0 auto 16px auto;">
                    <div style={format!("height:100%; background:#dc2626; transition:width 300ms ease-out; width:{};", pct(props.progress))}></div>
                </div>
                <p style="margin:8px 0; color:#f87171; font-size:14px;">{ splash_label(props.progress, props.duration_ms) }</p>
                <div style="margin-top:20px; display:flex; flex-direction:column; gap:10px; align-items:center;">
                    if !props.audio_playing {
                        <button onclick={enable_cb}>{"Enable Audio"}</button>
                    }
                    <button onclick={skip_cb}>{"Skip to Game"}</button>
                </div>
                if props.audio_playing {
                    <p style="margin-top:14px; color:#4ade80; font-size:14px;">{"✓ Audio playing"}</p>
                }
            </div>
        </div>
    }
}
