use yew::prelude::*;

use crate::model::Notice;

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
    pub expires_at: f64,
}

#[derive(Properties, PartialEq, Clone)]
pub struct ToastStackProps {
    pub toasts: Vec<Toast>,
}

#[function_component]
pub fn ToastStack(props: &ToastStackProps) -> Html {
    if props.toasts.is_empty() {
        return html! {};
    }
    html! {
        <div style="position:fixed; bottom:16px; right:16px; display:flex; flex-direction:column; gap:8px; z-index:60; max-width:320px;">
            { for props.toasts.iter().map(|t| html! {
                <div key={t.id} style="background:#161b22; color:#e6edf3; border:1px solid #30363d; border-radius:8px; padding:10px 14px; box-shadow:0 4px 12px rgba(0,0,0,0.4);">
                    <div style="font-weight:600; margin-bottom:2px;">{ t.notice.title.clone() }</div>
                    <div style="font-size:13px; opacity:0.85;">{ t.notice.body.clone() }</div>
                </div>
            }) }
        </div>
    }
}
