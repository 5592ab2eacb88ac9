use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::hooks::use_prize_wheel::ScenarioOption;

#[derive(Properties, PartialEq)]
pub struct ScenarioPickerProps {
    pub scenarios: Vec<ScenarioOption>,
    pub selected: String,
    pub disabled: bool,
    pub on_change: Callback<String>,
}

#[function_component(ScenarioPicker)]
pub fn scenario_picker(props: &ScenarioPickerProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_change.emit(select.value());
        })
    };

    if props.scenarios.len() < 2 {
        return html! {};
    }

    html! {
        <div class="scenario-picker">
            <label for="scenario-select">{"Animation : "}</label>
            <select id="scenario-select" {onchange} disabled={props.disabled}>
                { for props.scenarios.iter().map(|scenario| html! {
                    <option
                        value={scenario.id.clone()}
                        selected={scenario.id == props.selected}
                    >
                        {scenario.name.clone()}
                    </option>
                }) }
            </select>
        </div>
    }
}
