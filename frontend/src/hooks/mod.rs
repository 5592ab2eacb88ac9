pub mod use_admin_gesture;
pub mod use_prize_wheel;
