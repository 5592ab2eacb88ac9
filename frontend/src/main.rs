use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::admin_panel::AdminPanel;
use components::scenario_picker::ScenarioPicker;
use components::spin_controls::SpinControls;
use components::wheel_canvas::WheelCanvas;
use components::winner_popup::WinnerPopup;
use hooks::use_admin_gesture::use_admin_gesture;
use hooks::use_prize_wheel::use_prize_wheel;

#[function_component(App)]
fn app() -> Html {
    let wheel = use_prize_wheel();
    let admin = use_admin_gesture(None);

    let winner_display = wheel
        .winner
        .as_ref()
        .and_then(|winner| wheel.snapshot.display(winner.id).cloned());
    let busy = wheel.spinning || wheel.save_pending;

    html! {
        <div class="app-container">
            // Invisible admin target in the top-left corner
            <div class="admin-corner" onclick={admin.on_corner_click.clone()} />

            <header class="app-header">
                <h1>{"🎡 Roue de la Fortune"}</h1>
                <p class="scenario-name">{wheel.snapshot.scenario_name.clone()}</p>
            </header>

            <ScenarioPicker
                scenarios={wheel.scenarios.clone()}
                selected={wheel.selected_scenario.clone()}
                disabled={busy}
                on_change={wheel.on_select_scenario.clone()}
            />

            <div class="wheel-container">
                <WheelCanvas
                    wheel={wheel.snapshot.wheel.clone()}
                    displays={wheel.snapshot.displays.clone()}
                    rotation={wheel.rotation}
                />
            </div>

            <SpinControls
                spinning={wheel.spinning}
                save_pending={wheel.save_pending}
                disabled={wheel.snapshot.wheel.is_empty()}
                on_spin={wheel.on_spin.clone()}
            />

            if let Some(error) = &wheel.error {
                <div class="error-message">{error.clone()}</div>
            }

            <WinnerPopup
                winner={wheel.winner.clone()}
                display={winner_display}
                on_close={wheel.on_dismiss_winner.clone()}
            />

            if admin.is_open {
                <AdminPanel
                    report={wheel.snapshot.report.clone()}
                    days={wheel.snapshot.days.clone()}
                    locked={busy}
                    on_select_day={wheel.on_select_day.clone()}
                    on_reset={wheel.on_reset.clone()}
                    on_close={admin.on_close.clone()}
                />
            }
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
