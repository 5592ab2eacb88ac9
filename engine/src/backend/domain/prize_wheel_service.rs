use log::{debug, info, warn};
use shared::{Ledger, Segment, StockReport};
use uuid::Uuid;

use crate::backend::config::{Scenario, ScenarioCatalog};
use crate::backend::domain::angle_mapping::{target_rotation, DEFAULT_EXTRA_TURNS};
use crate::backend::domain::ledger;
use crate::backend::domain::selection::{
    visible_segments, LotPolicy, PrizeSelector, RandomSource, UniformLots,
};
use crate::backend::error::{WheelError, WheelResult};
use crate::backend::storage::LedgerStorage;

/// A spin whose winner is decided but not yet committed to the ledger
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSpin {
    pub spin_id: Uuid,
    pub winner: Segment,
    /// Segments on the wheel while it spins, in drawing order
    pub wheel: Vec<Segment>,
    /// Absolute rotation at which the wheel must stop
    pub target_rotation: f64,
}

#[derive(Debug, Clone)]
struct InFlight {
    spin_id: Uuid,
    winner: Segment,
    ledger: Ledger,
    target_rotation: f64,
}

/// Runs one scenario's wheel: selection, stock ledger and persistence.
///
/// Spins are two-phase. `spin` decides the winner and returns the target
/// rotation for the animation; `settle` commits the award once the animation
/// has finished. Only one spin can be in flight at a time.
pub struct PrizeWheelService<S: LedgerStorage, P: LotPolicy = UniformLots> {
    scenario: Scenario,
    storage_key: String,
    allowed_days: Vec<u32>,
    storage: S,
    selector: PrizeSelector<P>,
    ledger: Ledger,
    rotation: f64,
    extra_turns: u32,
    in_flight: Option<InFlight>,
}

impl<S: LedgerStorage> PrizeWheelService<S, UniformLots> {
    /// Open `scenario_id` from the catalog with the uniform lot policy
    pub fn open(catalog: &ScenarioCatalog, scenario_id: &str, storage: S) -> WheelResult<Self> {
        let scenario = catalog.scenario(scenario_id)?.clone();
        let selector = PrizeSelector::new(scenario.bonus_probability);
        Self::open_with_selector(
            scenario,
            catalog.storage_key(scenario_id),
            catalog.days().to_vec(),
            storage,
            selector,
        )
    }
}

impl<S: LedgerStorage, P: LotPolicy> PrizeWheelService<S, P> {
    /// Open a scenario with an explicit selector. Loads the stored ledger, or
    /// starts a fresh one when nothing usable is stored.
    pub fn open_with_selector(
        scenario: Scenario,
        storage_key: String,
        allowed_days: Vec<u32>,
        storage: S,
        selector: PrizeSelector<P>,
    ) -> WheelResult<Self> {
        scenario.validate()?;
        debug!(
            "Opening scenario '{}' with bonus probability {}",
            scenario.id,
            selector.bonus_probability()
        );

        let ledger = match storage.load(&storage_key)? {
            Some(ledger) => {
                info!(
                    "Resuming scenario '{}' on day {} from '{}'",
                    scenario.id, ledger.day, storage_key
                );
                ledger
            }
            None => {
                info!("Starting scenario '{}' with a fresh ledger", scenario.id);
                ledger::reset()
            }
        };

        if !allowed_days.contains(&ledger.day) {
            warn!(
                "Stored day {} for '{}' is not in the configured days {:?}",
                ledger.day, scenario.id, allowed_days
            );
        }

        Ok(Self {
            scenario,
            storage_key,
            allowed_days,
            storage,
            selector,
            ledger,
            rotation: 0.0,
            extra_turns: DEFAULT_EXTRA_TURNS,
            in_flight: None,
        })
    }

    /// Full turns the wheel makes before landing
    pub fn with_extra_turns(mut self, extra_turns: u32) -> Self {
        self.extra_turns = extra_turns;
        self
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn allowed_days(&self) -> &[u32] {
        &self.allowed_days
    }

    /// Wheel rotation after the last settled spin
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn is_spinning(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Segments currently shown on the wheel
    pub fn available_segments(&self) -> Vec<Segment> {
        visible_segments(&self.scenario.segments, &self.ledger)
    }

    pub fn stock_report(&self) -> StockReport {
        ledger::stock_report(&self.scenario, &self.ledger)
    }

    /// Decide the winner of a new spin. The live ledger and storage are not
    /// touched until `settle`.
    pub fn spin<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> WheelResult<PendingSpin> {
        if self.in_flight.is_some() {
            warn!("Rejected spin on '{}': a spin is already in progress", self.scenario.id);
            return Err(WheelError::SpinInProgress);
        }

        let wheel = self.available_segments();
        let mut next_ledger = self.ledger.clone();
        let winner = self
            .selector
            .select_and_award(&self.scenario.segments, &mut next_ledger, rng)?;
        let target = target_rotation(&wheel, winner.id, self.rotation, self.extra_turns)?;
        let spin_id = Uuid::new_v4();

        info!(
            "Spin {} on '{}' day {}: winner {} ({})",
            spin_id,
            self.scenario.id,
            self.ledger.day,
            self.scenario.label(winner.id),
            winner.kind
        );

        self.in_flight = Some(InFlight {
            spin_id,
            winner: winner.clone(),
            ledger: next_ledger,
            target_rotation: target,
        });

        Ok(PendingSpin {
            spin_id,
            winner,
            wheel,
            target_rotation: target,
        })
    }

    /// Commit the in-flight spin: persist the updated ledger and make it live.
    /// If persisting fails the spin stays in flight and can be settled again.
    pub fn settle(&mut self, spin_id: Uuid) -> WheelResult<Segment> {
        match &self.in_flight {
            None => return Err(WheelError::NoSpinInProgress),
            Some(in_flight) if in_flight.spin_id != spin_id => {
                return Err(WheelError::StaleSpin(spin_id.to_string()));
            }
            Some(in_flight) => self.storage.save(&self.storage_key, &in_flight.ledger)?,
        }

        let in_flight = self.in_flight.take().ok_or(WheelError::NoSpinInProgress)?;
        self.ledger = in_flight.ledger;
        self.rotation = in_flight.target_rotation;

        info!(
            "Settled spin {} on '{}': {} awarded {} today",
            spin_id,
            self.scenario.id,
            self.scenario.label(in_flight.winner.id),
            self.ledger.awarded_today(in_flight.winner.id)
        );
        Ok(in_flight.winner)
    }

    /// Spin and settle in one step
    pub fn select_and_award<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> WheelResult<Segment> {
        let pending = self.spin(rng)?;
        self.settle(pending.spin_id)
    }

    /// Switch the active day. Today's counts are cleared when the day changes.
    pub fn advance_day(&mut self, new_day: u32) -> WheelResult<&Ledger> {
        if self.in_flight.is_some() {
            return Err(WheelError::SpinInProgress);
        }
        if !self.allowed_days.contains(&new_day) {
            return Err(WheelError::UnknownDay {
                day: new_day,
                allowed: self.allowed_days.clone(),
            });
        }
        if new_day == self.ledger.day {
            return Ok(&self.ledger);
        }

        let next = ledger::advance_day(self.ledger.clone(), new_day);
        self.storage.save(&self.storage_key, &next)?;
        self.ledger = next;
        Ok(&self.ledger)
    }

    /// Wipe the ledger and its stored record
    pub fn reset(&mut self) -> WheelResult<&Ledger> {
        if self.in_flight.is_some() {
            return Err(WheelError::SpinInProgress);
        }

        self.storage.remove(&self.storage_key)?;
        self.ledger = ledger::reset();
        info!("Reset ledger for '{}'", self.scenario.id);
        Ok(&self.ledger)
    }
}
