use yew::prelude::*;

use crate::config::TARGET_PORTRAIT_IMG;
use crate::model::RoundResult;

#[derive(Properties, PartialEq, Clone)]
pub struct IdlePanelProps {
    pub high_score: u32,
    pub session_secs: u32,
    pub last_result: Option<RoundResult>,
    pub start: Callback<()>,
}

#[function_component]
pub fn IdlePanel(props: &IdlePanelProps) -> Html {
    let start_cb = props.start.clone();
    let start_btn = Callback::from(move |_: MouseEvent| start_cb.emit(()));
    let label = if props.high_score > 0 { "Play Again" } else { "Start Game" };
    html! {
        <div style="display:flex; flex-direction:column; align-items:center; justify-content:center; height:100%; text-align:center; padding:0 16px;">
            <img src={TARGET_PORTRAIT_IMG} alt="Target" style="width:160px; height:160px; object-fit:contain; margin-bottom:16px;" />
            <h2 style="margin:0 0 12px 0; font-size:24px;">{"Punch Game"}</h2>
            <p style="margin:0 0 16px 0;">{ format!("Use the punch or the sandal to land as many hits as you can in {} seconds!", props.session_secs) }</p>
            if let Some(r) = props.last_result {
                <p style="margin:0 0 12px 0; opacity:0.8;">
                    { format!("Last round: {} points ({} punches, {} sandals){}", r.score, r.hits.primary, r.hits.secondary, if r.new_high_score { " - new record!" } else { "" }) }
                </p>
            }
            <button onclick={start_btn} style="padding:10px 24px; font-size:18px;">{ label }</button>
            <p style="margin-top:16px; font-size:13px; opacity:0.6;">{"Click the sound button to hear game sounds!"}</p>
        </div>
    }
}
