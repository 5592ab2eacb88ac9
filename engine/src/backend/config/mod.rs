//! # Config Module
//!
//! Loads the scenario catalog: which festivals exist, which segments each
//! wheel carries, their daily quotas and the bonus probability.
//!
//! The catalog is YAML. A default catalog is compiled into the crate; the
//! `PRIZE_WHEEL_CONFIG` environment variable points to a replacement file.
//! Every loader validates the catalog before handing out `Scenario` values,
//! so the domain layer can rely on a non-empty segment list with exactly one
//! bonus segment.

pub mod catalog;

pub use catalog::{Scenario, ScenarioCatalog, DEFAULT_BONUS_PROBABILITY};
