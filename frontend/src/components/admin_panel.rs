use shared::{SegmentKind, StockLine, StockReport};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AdminPanelProps {
    pub report: Option<StockReport>,
    pub days: Vec<u32>,
    /// Day switches and resets are refused while a spin is in flight
    pub locked: bool,
    pub on_select_day: Callback<u32>,
    pub on_reset: Callback<()>,
    pub on_close: Callback<()>,
}

fn quota_cell(line: &StockLine) -> String {
    match (line.kind, line.daily_quota) {
        (SegmentKind::Bonus, _) | (_, None) => "∞".to_string(),
        (SegmentKind::Lot, Some(quota)) => quota.to_string(),
    }
}

fn remaining_cell(line: &StockLine) -> String {
    line.remaining_today
        .map(|remaining| remaining.to_string())
        .unwrap_or_else(|| "∞".to_string())
}

/// Hidden operator view: stock table, day switch and reset
#[function_component(AdminPanel)]
pub fn admin_panel(props: &AdminPanelProps) -> Html {
    let confirming_reset = use_state(|| false);

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let on_reset_request = {
        let confirming_reset = confirming_reset.clone();
        Callback::from(move |_: MouseEvent| confirming_reset.set(true))
    };

    let on_reset_cancel = {
        let confirming_reset = confirming_reset.clone();
        Callback::from(move |_: MouseEvent| confirming_reset.set(false))
    };

    let on_reset_confirm = {
        let confirming_reset = confirming_reset.clone();
        let on_reset = props.on_reset.clone();
        Callback::from(move |_: MouseEvent| {
            confirming_reset.set(false);
            on_reset.emit(());
        })
    };

    let Some(report) = &props.report else {
        return html! {
            <div class="admin-panel">
                <p>{"Aucun stock chargé"}</p>
                <button onclick={on_close}>{"Fermer"}</button>
            </div>
        };
    };

    let day_buttons = props.days.iter().map(|&day| {
        let on_select_day = props.on_select_day.clone();
        let onclick = Callback::from(move |_: MouseEvent| on_select_day.emit(day));
        html! {
            <button
                class={classes!("day-button", (day == report.day).then_some("active"))}
                disabled={props.locked}
                {onclick}
            >
                {format!("Jour {}", day)}
            </button>
        }
    });

    html! {
        <div class="modal-backdrop">
            <div class="admin-panel">
                <div class="admin-header">
                    <h2>{format!("Stock {} : jour {}", report.scenario_id, report.day)}</h2>
                    <button class="admin-close" onclick={on_close}>{"×"}</button>
                </div>

                if report.lots_exhausted {
                    <p class="admin-warning">{"Tous les lots du jour sont épuisés : seul le bonus peut sortir."}</p>
                }

                <table class="stock-table">
                    <thead>
                        <tr>
                            <th>{"Lot"}</th>
                            <th>{"Quota/jour"}</th>
                            <th>{"Gagnés aujourd'hui"}</th>
                            <th>{"Restants"}</th>
                            <th>{"Total"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for report.lines.iter().map(|line| html! {
                            <tr class={classes!((line.remaining_today == Some(0)).then_some("exhausted"))}>
                                <td>{line.label.clone()}</td>
                                <td>{quota_cell(line)}</td>
                                <td>{line.awarded_today.to_string()}</td>
                                <td>{remaining_cell(line)}</td>
                                <td>{line.awarded_total.to_string()}</td>
                            </tr>
                        }) }
                    </tbody>
                </table>

                <div class="admin-days">{ for day_buttons }</div>

                <div class="admin-reset">
                    if *confirming_reset {
                        <span>{"Effacer tout le stock de cette animation ?"}</span>
                        <button class="danger" onclick={on_reset_confirm}>{"Oui, réinitialiser"}</button>
                        <button onclick={on_reset_cancel}>{"Annuler"}</button>
                    } else {
                        <button class="danger" disabled={props.locked} onclick={on_reset_request}>
                            {"Réinitialiser le stock"}
                        </button>
                    }
                </div>
            </div>
        </div>
    }
}
