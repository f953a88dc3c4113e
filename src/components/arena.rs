use yew::prelude::*;

use crate::config::{PRIMARY_WEAPON_IMG, SECONDARY_WEAPON_IMG, TARGET_PORTRAIT_IMG};
use crate::model::AttackKind;
use crate::state::Target;
use crate::util::pct;

/// Render-side copy of an in-flight attack.
#[derive(Clone, Debug, PartialEq)]
pub struct SwingView {
    pub kind: AttackKind,
    pub travel_to: Target,
    pub effect_text: Option<&'static str>,
}

#[derive(Properties, PartialEq, Clone)]
pub struct ArenaProps {
    pub target: Target,
    pub swing: Option<SwingView>,
    pub on_attack: Callback<AttackKind>,
}

fn weapon_img(kind: AttackKind) -> &'static str {
    match kind {
        AttackKind::Primary => PRIMARY_WEAPON_IMG,
        AttackKind::Secondary => SECONDARY_WEAPON_IMG,
    }
}

#[function_component]
pub fn Arena(props: &ArenaProps) -> Html {
    let animating = props.swing.is_some();
    let weapon_button = |kind: AttackKind, side: &str, points: &str| {
        let cb = props.on_attack.clone();
        let onclick = Callback::from(move |_: MouseEvent| cb.emit(kind));
        let dimmed = props.swing.as_ref().is_some_and(|s| s.kind == kind);
        html! {
            <div {onclick} style={format!("position:absolute; {side}:16px; top:50%; transform:translateY(-50%); cursor:pointer; z-index:10; text-align:center;")}>
                <img src={weapon_img(kind)} alt={kind.label()} style={format!("width:80px; height:80px; object-fit:contain; opacity:{};", if dimmed { 0.5 } else { 1.0 })} />
                <p style="margin:8px 0 0 0; font-weight:700;">{ format!("{} ({})", kind.label(), points) }</p>
            </div>
        }
    };
    let target_transform = match props.swing.as_ref().map(|s| s.kind) {
        Some(AttackKind::Primary) => "translateX(20px) rotate(10deg) scale(0.9)",
        Some(AttackKind::Secondary) => "translateX(-20px) rotate(-10deg) scale(0.9)",
        None => "translateX(0) rotate(0) scale(1)",
    };
    html! {
        <>
            { weapon_button(AttackKind::Primary, "left", "1pt") }
            { weapon_button(AttackKind::Secondary, "right", "2pts") }
            if let Some(swing) = props.swing.clone() {
                <div style={format!("position:absolute; z-index:20; left:{}; top:{}; transform:translate(-50%, -50%) scale(1.2); transition:all 300ms ease-in-out;", pct(swing.travel_to.x), pct(swing.travel_to.y))}>
                    <img src={weapon_img(swing.kind)} alt={swing.kind.label()} class="weapon-hit"
                        style={format!("width:80px; height:80px; object-fit:contain;{}", if swing.kind == AttackKind::Secondary { " rotate:45deg;" } else { "" })} />
                </div>
            }
            <div style={format!("position:absolute; left:{}; top:{}; transform:translate(-50%, -50%); transition:all 300ms ease-in-out;", pct(props.target.x), pct(props.target.y))}>
                <img src={TARGET_PORTRAIT_IMG} alt="Target"
                    style={format!("width:128px; height:128px; object-fit:contain; transition:all 300ms; filter:brightness({}); transform:{};", if animating { 0.8 } else { 1.0 }, target_transform)} />
                if let Some(text) = props.swing.as_ref().and_then(|s| s.effect_text) {
                    <div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center;">
                        <div class="bounce" style="font-size:36px; font-weight:800; color:#dc2626;">{ text }</div>
                    </div>
                }
            </div>
        </>
    }
}
