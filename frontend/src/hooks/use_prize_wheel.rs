use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use prize_wheel_engine::backend::domain::PrizeWheelService;
use prize_wheel_engine::backend::storage::{KeyValueStore, LedgerRepository};
use prize_wheel_engine::{initialize_backend, WheelBackend};
use shared::{Segment, SegmentDisplay, SegmentId, StockReport};
use uuid::Uuid;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::animation::SpinAnimation;
use crate::services::browser_store::BrowserStore;
use crate::services::logging::Logger;
use crate::services::random::JsRandom;

type BrowserWheel = PrizeWheelService<LedgerRepository<BrowserStore>>;
type FrameLoop = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// localStorage key remembering the last opened scenario
const ACTIVE_SCENARIO_KEY: &str = "prize-wheel-active-scenario";

/// Render-ready view of the open wheel
#[derive(Clone, PartialEq, Default)]
pub struct WheelSnapshot {
    pub scenario_id: String,
    pub scenario_name: String,
    /// Segments currently drawn on the wheel
    pub wheel: Vec<Segment>,
    pub displays: Vec<SegmentDisplay>,
    pub report: Option<StockReport>,
    pub days: Vec<u32>,
}

impl WheelSnapshot {
    fn of(service: &BrowserWheel) -> Self {
        let scenario = service.scenario();
        Self {
            scenario_id: scenario.id.clone(),
            scenario_name: scenario.name.clone(),
            wheel: service.available_segments(),
            displays: scenario.displays.clone(),
            report: Some(service.stock_report()),
            days: service.allowed_days().to_vec(),
        }
    }

    pub fn display(&self, id: SegmentId) -> Option<&SegmentDisplay> {
        self.displays.iter().find(|d| d.id == id)
    }
}

#[derive(Clone, PartialEq)]
pub struct ScenarioOption {
    pub id: String,
    pub name: String,
}

#[derive(Clone, PartialEq)]
pub struct UsePrizeWheelResult {
    pub snapshot: WheelSnapshot,
    pub scenarios: Vec<ScenarioOption>,
    pub selected_scenario: String,
    pub rotation: f64,
    pub spinning: bool,
    /// A finished spin whose result could not be saved yet
    pub save_pending: bool,
    pub winner: Option<Segment>,
    pub error: Option<String>,
    pub on_spin: Callback<()>,
    pub on_select_scenario: Callback<String>,
    pub on_select_day: Callback<u32>,
    pub on_reset: Callback<()>,
    pub on_dismiss_winner: Callback<()>,
}

#[derive(Clone)]
struct WheelState {
    service: Rc<RefCell<Option<BrowserWheel>>>,
    pending_spin: Rc<RefCell<Option<Uuid>>>,
    animating: Rc<RefCell<bool>>,
    snapshot: UseStateHandle<WheelSnapshot>,
    rotation: UseStateHandle<f64>,
    spinning: UseStateHandle<bool>,
    winner: UseStateHandle<Option<Segment>>,
    error: UseStateHandle<Option<String>>,
}

impl WheelState {
    fn open(&self, backend: &WheelBackend, scenario_id: &str) {
        let opened = BrowserStore::local()
            .map_err(|e| e.to_string())
            .and_then(|store| {
                backend
                    .open_scenario(scenario_id, LedgerRepository::new(store))
                    .map_err(|e| e.to_string())
            });

        match opened {
            Ok(wheel) => {
                Logger::info_with_component(
                    "prize-wheel",
                    &format!("Opened scenario '{}' on day {}", scenario_id, wheel.ledger().day),
                );
                self.rotation.set(wheel.rotation());
                self.snapshot.set(WheelSnapshot::of(&wheel));
                *self.service.borrow_mut() = Some(wheel);
                *self.pending_spin.borrow_mut() = None;
                self.winner.set(None);
                self.error.set(None);
            }
            Err(e) => self.fail(&format!("Could not open scenario '{}'", scenario_id), e),
        }
    }

    fn spin(&self) {
        if *self.animating.borrow() {
            return;
        }
        if self.pending_spin.borrow().is_some() {
            self.settle();
            return;
        }

        let started = {
            let mut guard = self.service.borrow_mut();
            let Some(wheel) = guard.as_mut() else { return };
            let from = wheel.rotation();
            wheel.spin(&mut JsRandom).map(|pending| (pending, from))
        };

        let (pending, from) = match started {
            Ok(started) => started,
            Err(e) => return self.fail("Spin rejected", e.to_string()),
        };

        *self.pending_spin.borrow_mut() = Some(pending.spin_id);
        *self.animating.borrow_mut() = true;
        self.winner.set(None);
        self.error.set(None);
        self.spinning.set(true);

        let animation = SpinAnimation::new(from, pending.target_rotation, js_sys::Date::now());
        let frame_state = self.clone();
        let done_state = self.clone();
        run_animation(
            animation,
            move |angle| frame_state.rotation.set(angle),
            move || {
                *done_state.animating.borrow_mut() = false;
                done_state.settle();
            },
        );
    }

    fn settle(&self) {
        let Some(spin_id) = *self.pending_spin.borrow() else {
            return;
        };

        let (result, snapshot) = {
            let mut guard = self.service.borrow_mut();
            let Some(wheel) = guard.as_mut() else { return };
            let result = wheel.settle(spin_id);
            (result, WheelSnapshot::of(wheel))
        };

        self.spinning.set(false);
        match result {
            Ok(segment) => {
                *self.pending_spin.borrow_mut() = None;
                self.snapshot.set(snapshot);
                self.winner.set(Some(segment));
                self.error.set(None);
            }
            Err(e) => self.fail("Could not save the spin result", e.to_string()),
        }
    }

    fn advance_day(&self, day: u32) {
        let result = match self.service.borrow_mut().as_mut() {
            Some(wheel) => wheel.advance_day(day).map(|_| ()),
            None => return,
        };
        match result {
            Ok(()) => self.refresh(),
            Err(e) => self.fail(&format!("Could not switch to day {}", day), e.to_string()),
        }
    }

    fn reset(&self) {
        let result = match self.service.borrow_mut().as_mut() {
            Some(wheel) => wheel.reset().map(|_| ()),
            None => return,
        };
        match result {
            Ok(()) => {
                self.winner.set(None);
                self.refresh();
            }
            Err(e) => self.fail("Could not reset the stock", e.to_string()),
        }
    }

    fn refresh(&self) {
        if let Some(wheel) = self.service.borrow().as_ref() {
            self.snapshot.set(WheelSnapshot::of(wheel));
        }
        self.error.set(None);
    }

    fn fail(&self, context: &str, message: String) {
        Logger::error_with_component("prize-wheel", &format!("{}: {}", context, message));
        self.error.set(Some(format!("{}: {}", context, message)));
    }
}

/// Drive `animation` with requestAnimationFrame until it finishes
fn run_animation(
    animation: SpinAnimation,
    on_frame: impl Fn(f64) + 'static,
    on_done: impl FnOnce() + 'static,
) {
    let frame: FrameLoop = Rc::new(RefCell::new(None));
    let scheduler = frame.clone();
    let mut on_done = Some(on_done);

    *scheduler.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let (angle, finished) = animation.rotation_at(js_sys::Date::now());
        on_frame(angle);
        if !finished {
            request_frame(&frame);
            return;
        }

        if let Some(done) = on_done.take() {
            done();
        }
        // The closure cannot drop itself while running
        let frame = frame.clone();
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            frame.borrow_mut().take();
        });
    }) as Box<dyn FnMut()>));

    request_frame(&scheduler);
}

fn request_frame(frame: &FrameLoop) {
    let scheduled = frame.borrow().as_ref().and_then(|closure| {
        web_sys::window()?
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .ok()
    });
    if scheduled.is_none() {
        Logger::error_with_component("prize-wheel", "requestAnimationFrame unavailable");
    }
}

fn initial_scenario(backend: &Result<WheelBackend, String>) -> String {
    let Ok(backend) = backend else {
        return String::new();
    };

    let remembered = BrowserStore::local()
        .and_then(|store| store.get(ACTIVE_SCENARIO_KEY))
        .ok()
        .flatten()
        .filter(|id| backend.catalog.scenario(id).is_ok());

    remembered
        .or_else(|| backend.default_scenario_id().map(str::to_string))
        .unwrap_or_default()
}

/// Hook owning the open wheel service and its UI state
#[hook]
pub fn use_prize_wheel() -> UsePrizeWheelResult {
    let backend = use_memo((), |_| initialize_backend().map_err(|e| e.to_string()));
    let selected_scenario = use_state({
        let backend = backend.clone();
        move || initial_scenario(&backend)
    });

    let state = WheelState {
        service: use_mut_ref(|| None::<BrowserWheel>),
        pending_spin: use_mut_ref(|| None::<Uuid>),
        animating: use_mut_ref(|| false),
        snapshot: use_state(WheelSnapshot::default),
        rotation: use_state(|| 0.0_f64),
        spinning: use_state(|| false),
        winner: use_state(|| None::<Segment>),
        error: use_state(|| None::<String>),
    };

    // Open the wheel for the selected scenario
    use_effect_with((*selected_scenario).clone(), {
        let state = state.clone();
        let backend = backend.clone();
        move |scenario_id: &String| {
            match &*backend {
                Ok(backend) => state.open(backend, scenario_id),
                Err(e) => state.fail("Could not load the scenario catalog", e.clone()),
            }
            || ()
        }
    });

    let on_spin = {
        let state = state.clone();
        Callback::from(move |_: ()| state.spin())
    };

    let on_select_scenario = {
        let state = state.clone();
        let selected_scenario = selected_scenario.clone();
        Callback::from(move |scenario_id: String| {
            if *state.animating.borrow() || state.pending_spin.borrow().is_some() {
                return;
            }
            if let Err(e) = BrowserStore::local().and_then(|s| s.set(ACTIVE_SCENARIO_KEY, &scenario_id)) {
                Logger::warn_with_component("prize-wheel", &format!("Could not remember scenario: {}", e));
            }
            selected_scenario.set(scenario_id);
        })
    };

    let on_select_day = {
        let state = state.clone();
        Callback::from(move |day: u32| state.advance_day(day))
    };

    let on_reset = {
        let state = state.clone();
        Callback::from(move |_: ()| state.reset())
    };

    let on_dismiss_winner = {
        let winner = state.winner.clone();
        Callback::from(move |_: ()| winner.set(None))
    };

    let scenarios = match &*backend {
        Ok(backend) => backend
            .catalog
            .scenarios()
            .iter()
            .map(|s| ScenarioOption {
                id: s.id.clone(),
                name: s.name.clone(),
            })
            .collect(),
        Err(_) => Vec::new(),
    };

    UsePrizeWheelResult {
        snapshot: (*state.snapshot).clone(),
        scenarios,
        selected_scenario: (*selected_scenario).clone(),
        rotation: *state.rotation,
        spinning: *state.spinning,
        save_pending: !*state.spinning && state.pending_spin.borrow().is_some(),
        winner: (*state.winner).clone(),
        error: (*state.error).clone(),
        on_spin,
        on_select_scenario,
        on_select_day,
        on_reset,
        on_dismiss_winner,
    }
}
