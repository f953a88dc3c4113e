use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct HudProps {
    pub score: u32,
    pub high_score: u32,
    /// Only shown while a round is running.
    pub time_remaining: Option<u32>,
    pub sound_enabled: bool,
    pub music_playing: bool,
    pub on_toggle_sound: Callback<()>,
    pub on_toggle_music: Callback<()>,
}

#[function_component]
pub fn Hud(props: &HudProps) -> Html {
    let value_style = "font-size:20px; font-weight:700; font-variant-numeric:tabular-nums;";
    let sound_cb = {
        let cb = props.on_toggle_sound.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let music_cb = {
        let cb = props.on_toggle_music.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    html! {
        <div style="display:flex; justify-content:space-between; align-items:center; width:100%; margin-bottom:16px; gap:12px; flex-wrap:wrap;">
            <div style={value_style}>{ format!("Score: {}", props.score) }</div>
            <div style={value_style}>{ format!("High Score: {}", props.high_score) }</div>
            if let Some(t) = props.time_remaining {
                <div style={value_style}>{ format!("Time: {}s", t) }</div>
            }
            <div style="display:flex; gap:8px;">
                <button onclick={sound_cb} title={if props.sound_enabled { "Mute sounds" } else { "Enable sounds" }}>
                    { if props.sound_enabled { "🔊" } else { "🔇" } }
                </button>
                if props.sound_enabled {
                    <button onclick={music_cb} style="font-size:12px;" title={if props.music_playing { "Stop music" } else { "Play music" }}>
                        { if props.music_playing { "Stop Music" } else { "Play Music" } }
                    </button>
                }
            </div>
        </div>
    }
}
