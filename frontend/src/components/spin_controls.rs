use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SpinControlsProps {
    pub spinning: bool,
    pub save_pending: bool,
    pub disabled: bool,
    pub on_spin: Callback<()>,
}

#[function_component(SpinControls)]
pub fn spin_controls(props: &SpinControlsProps) -> Html {
    let onclick = {
        let on_spin = props.on_spin.clone();
        Callback::from(move |_: MouseEvent| on_spin.emit(()))
    };

    let label = if props.spinning {
        "La roue tourne..."
    } else if props.save_pending {
        "Réessayer l'enregistrement"
    } else {
        "Tourner la roue !"
    };

    html! {
        <div class="spin-controls">
            <button
                class={classes!("spin-button", props.spinning.then_some("spinning"))}
                disabled={props.spinning || props.disabled}
                {onclick}
            >
                {label}
            </button>
        </div>
    }
}
