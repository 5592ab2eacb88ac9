pub mod admin_gesture;
pub mod animation;
pub mod browser_store;
pub mod logging;
pub mod random;
