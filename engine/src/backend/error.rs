//! Error type shared by the configuration, domain and service layers.

use shared::SegmentId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WheelError {
    #[error("scenario '{scenario}' has no segments configured")]
    EmptyConfiguration { scenario: String },

    #[error("no segments to select from")]
    NoSegments,

    #[error("scenario '{scenario}' has no bonus segment to fall back on")]
    MissingBonus { scenario: String },

    #[error("scenario '{scenario}' declares {count} bonus segments, exactly one is allowed")]
    MultipleBonus { scenario: String, count: usize },

    #[error("scenario '{scenario}' declares segment id {id} more than once")]
    DuplicateSegment { scenario: String, id: SegmentId },

    #[error("segment {id} in scenario '{scenario}' has an invalid quota: {reason}")]
    InvalidQuota {
        scenario: String,
        id: SegmentId,
        reason: &'static str,
    },

    #[error("bonus probability {value} is outside [0, 1)")]
    InvalidBonusProbability { value: f64 },

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("unknown segment: {0}")]
    UnknownSegment(SegmentId),

    #[error("day {day} is not configured (allowed: {allowed:?})")]
    UnknownDay { day: u32, allowed: Vec<u32> },

    #[error("every lot is exhausted and no bonus segment is configured")]
    NoBonusFallback,

    #[error("a spin is already in progress")]
    SpinInProgress,

    #[error("no spin is in progress")]
    NoSpinInProgress,

    #[error("spin {0} is not the spin in progress")]
    StaleSpin(String),

    #[error("storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}

pub type WheelResult<T> = std::result::Result<T, WheelError>;
