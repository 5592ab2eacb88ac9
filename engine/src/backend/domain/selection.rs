//! Prize selection.
//!
//! Selection is two independent policies chained together:
//!
//! 1. [`reserve_bonus`] sets aside a fixed share of the probability mass for the
//!    bonus segment and rescales the remaining draw into `[0, 1)`.
//! 2. A [`LotPolicy`] maps the rescaled draw onto one of the lots still under
//!    quota.
//!
//! Once every lot is exhausted the bonus segment is returned with certainty and
//! no draw is consumed.

use log::debug;
use rand::Rng;
use shared::{Ledger, Segment, SegmentId};

use crate::backend::config::DEFAULT_BONUS_PROBABILITY;
use crate::backend::domain::ledger::record_award;
use crate::backend::error::{WheelError, WheelResult};

/// Source of uniform draws in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl RandomSource for rand::rngs::StdRng {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

impl RandomSource for rand::rngs::ThreadRng {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed sequence of draws, then keeps returning `0.0`
#[derive(Debug, Clone)]
pub struct ScriptedDraws {
    draws: Vec<f64>,
    position: usize,
}

impl ScriptedDraws {
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        Self {
            draws: draws.into(),
            position: 0,
        }
    }

    /// Number of scripted draws consumed so far
    pub fn consumed(&self) -> usize {
        self.position
    }
}

impl RandomSource for ScriptedDraws {
    fn next_unit(&mut self) -> f64 {
        let value = self.draws.get(self.position).copied().unwrap_or(0.0);
        self.position += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Outcome of the bonus reservation step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Draw {
    Bonus,
    /// Rescaled draw in `[0, 1)` to hand to the lot policy
    Lot(f64),
}

/// Reserve `p_bonus` of the mass `[0, p_bonus)` for the bonus segment.
pub fn reserve_bonus(r: f64, p_bonus: f64) -> Draw {
    if r < p_bonus {
        Draw::Bonus
    } else {
        let rescaled = (r - p_bonus) / (1.0 - p_bonus);
        Draw::Lot(rescaled.clamp(0.0, 1.0 - f64::EPSILON))
    }
}

/// Picks one lot among those still under quota
pub trait LotPolicy {
    /// Index into `lots` for the rescaled draw `r`. `lots` is never empty.
    fn pick(&self, lots: &[&Segment], ledger: &Ledger, r: f64) -> usize;
}

/// Equal-width buckets, in configuration order
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UniformLots;

impl LotPolicy for UniformLots {
    fn pick(&self, lots: &[&Segment], _ledger: &Ledger, r: f64) -> usize {
        let index = (r * lots.len() as f64).floor() as usize;
        index.min(lots.len() - 1)
    }
}

/// Bucket widths proportional to each lot's remaining daily stock
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RemainingStockWeighted;

impl LotPolicy for RemainingStockWeighted {
    fn pick(&self, lots: &[&Segment], ledger: &Ledger, r: f64) -> usize {
        let weights: Vec<f64> = lots
            .iter()
            .map(|lot| {
                lot.remaining_today(ledger.awarded_today(lot.id))
                    .map(f64::from)
                    .unwrap_or(1.0)
            })
            .collect();
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return UniformLots.pick(lots, ledger, r);
        }

        let target = r * total;
        let mut cumulative = 0.0;
        for (index, weight) in weights.iter().enumerate() {
            cumulative += weight;
            if target < cumulative {
                return index;
            }
        }
        lots.len() - 1
    }
}

/// Lots that can still be awarded today, in configuration order
pub fn available_lots<'a>(segments: &'a [Segment], ledger: &Ledger) -> Vec<&'a Segment> {
    segments
        .iter()
        .filter(|s| s.is_lot() && s.has_quota_left(ledger.awarded_today(s.id)))
        .collect()
}

/// The fallback segment: first bonus in configuration order
pub fn bonus_segment(segments: &[Segment]) -> Option<&Segment> {
    segments.iter().find(|s| s.is_bonus())
}

/// Segments the wheel shows right now: lots under quota plus the bonus, in
/// configuration order
pub fn visible_segments(segments: &[Segment], ledger: &Ledger) -> Vec<Segment> {
    segments
        .iter()
        .filter(|s| s.is_bonus() || s.has_quota_left(ledger.awarded_today(s.id)))
        .cloned()
        .collect()
}

/// Bonus reservation chained with a lot policy
#[derive(Debug, Clone)]
pub struct PrizeSelector<P: LotPolicy = UniformLots> {
    bonus_probability: f64,
    lot_policy: P,
}

impl Default for PrizeSelector<UniformLots> {
    fn default() -> Self {
        Self::new(DEFAULT_BONUS_PROBABILITY)
    }
}

impl PrizeSelector<UniformLots> {
    pub fn new(bonus_probability: f64) -> Self {
        Self::with_policy(bonus_probability, UniformLots)
    }
}

impl<P: LotPolicy> PrizeSelector<P> {
    pub fn with_policy(bonus_probability: f64, lot_policy: P) -> Self {
        Self {
            bonus_probability,
            lot_policy,
        }
    }

    pub fn bonus_probability(&self) -> f64 {
        self.bonus_probability
    }

    /// Choose a winner without touching the ledger
    pub fn select<'a, R: RandomSource + ?Sized>(
        &self,
        segments: &'a [Segment],
        ledger: &Ledger,
        rng: &mut R,
    ) -> WheelResult<&'a Segment> {
        if segments.is_empty() {
            return Err(WheelError::NoSegments);
        }

        let lots = available_lots(segments, ledger);
        let bonus = bonus_segment(segments);

        if lots.is_empty() {
            debug!("All lots exhausted for day {}, forcing bonus", ledger.day);
            return bonus.ok_or(WheelError::NoBonusFallback);
        }

        let r = rng.next_unit();
        let draw = match bonus {
            Some(_) => reserve_bonus(r, self.bonus_probability),
            None => Draw::Lot(r),
        };

        match draw {
            Draw::Bonus => bonus.ok_or(WheelError::NoBonusFallback),
            Draw::Lot(rescaled) => {
                let index = self.lot_policy.pick(&lots, ledger, rescaled);
                Ok(lots[index.min(lots.len() - 1)])
            }
        }
    }

    /// Choose a winner and record it in `ledger`
    pub fn select_and_award<R: RandomSource + ?Sized>(
        &self,
        segments: &[Segment],
        ledger: &mut Ledger,
        rng: &mut R,
    ) -> WheelResult<Segment> {
        let winner = self.select(segments, ledger, rng)?.clone();
        record_award(ledger, &winner);
        Ok(winner)
    }
}

/// Select with the default policy (1% bonus, uniform lots) and record the award
pub fn select_and_award<R: RandomSource + ?Sized>(
    segments: &[Segment],
    ledger: &mut Ledger,
    rng: &mut R,
) -> WheelResult<Segment> {
    PrizeSelector::default().select_and_award(segments, ledger, rng)
}

/// Ids of `segments`, handy for logging
pub fn segment_ids(segments: &[&Segment]) -> Vec<SegmentId> {
    segments.iter().map(|s| s.id).collect()
}
