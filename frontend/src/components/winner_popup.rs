use shared::{Segment, SegmentDisplay};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct WinnerPopupProps {
    pub winner: Option<Segment>,
    pub display: Option<SegmentDisplay>,
    pub on_close: Callback<()>,
}

#[function_component(WinnerPopup)]
pub fn winner_popup(props: &WinnerPopupProps) -> Html {
    let Some(winner) = &props.winner else {
        return html! {};
    };

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let label = props
        .display
        .as_ref()
        .map(|d| d.label.clone())
        .unwrap_or_else(|| format!("Lot #{}", winner.id));
    let color = props
        .display
        .as_ref()
        .map(|d| d.color.clone())
        .unwrap_or_else(|| "#FFD700".to_string());
    let headline = if winner.is_bonus() {
        "🎉 BONUS ! 🎉"
    } else {
        "🎉 Félicitations ! 🎉"
    };

    html! {
        <div class="modal-backdrop" onclick={on_close.clone()}>
            <div class="winner-popup" style={format!("border-color: {}", color)}>
                <h2>{headline}</h2>
                <p class="winner-label">{"Vous avez gagné : "}<strong>{label}</strong></p>
                <button class="winner-close" onclick={on_close}>{"Fermer"}</button>
            </div>
        </div>
    }
}
