pub mod admin_panel;
pub mod scenario_picker;
pub mod spin_controls;
pub mod wheel_canvas;
pub mod winner_popup;
