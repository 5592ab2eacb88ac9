use yew::prelude::*;

use crate::services::admin_gesture::CornerClickCounter;
use crate::services::logging::Logger;

/// Configuration for the hidden admin gesture
#[derive(Clone, PartialEq)]
pub struct AdminGestureConfig {
    pub required_clicks: u32,
    pub window_ms: f64,
}

impl Default for AdminGestureConfig {
    fn default() -> Self {
        Self {
            required_clicks: 5,
            window_ms: 1500.0,
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct UseAdminGestureResult {
    pub is_open: bool,
    /// Attach to the invisible top-left corner target
    pub on_corner_click: Callback<MouseEvent>,
    pub on_close: Callback<()>,
}

/// Toggles the admin panel after a burst of clicks in the page corner
#[hook]
pub fn use_admin_gesture(config: Option<AdminGestureConfig>) -> UseAdminGestureResult {
    let config = config.unwrap_or_default();
    let counter = use_mut_ref(|| CornerClickCounter::new(config.required_clicks, config.window_ms));
    let is_open = use_state(|| false);

    let on_corner_click = {
        let counter = counter.clone();
        let is_open = is_open.clone();
        Callback::from(move |_: MouseEvent| {
            if counter.borrow_mut().register(js_sys::Date::now()) {
                Logger::info_with_component("admin-gesture", "Admin panel toggled");
                is_open.set(!*is_open);
            }
        })
    };

    let on_close = {
        let is_open = is_open.clone();
        Callback::from(move |_: ()| is_open.set(false))
    };

    UseAdminGestureResult {
        is_open: *is_open,
        on_corner_click,
        on_close,
    }
}
