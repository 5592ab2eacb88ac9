//! Prize wheel engine: weighted prize selection, per-day stock ledger and
//! ledger persistence, independent of any rendering surface.

pub mod backend;

pub use backend::{initialize_backend, WheelBackend};
pub use backend::error::WheelError;
