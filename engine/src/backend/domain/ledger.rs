//! Ledger operations: awarding, day rollover, reset and the stock view.

use log::info;
use shared::{Ledger, Segment, StockLine, StockReport};

use crate::backend::config::Scenario;

/// Count one award. Bonus awards leave the ledger untouched.
/// Counters saturate at `u32::MAX`.
pub fn record_award(ledger: &mut Ledger, segment: &Segment) {
    if segment.is_bonus() {
        return;
    }
    for counts in [&mut ledger.awarded_today, &mut ledger.awarded_total] {
        let count = counts.entry(segment.id).or_insert(0);
        *count = count.saturating_add(1);
    }
}

/// Switch to `new_day`, clearing today's counts. Totals are kept.
pub fn advance_day(ledger: Ledger, new_day: u32) -> Ledger {
    if ledger.day == new_day {
        return ledger;
    }

    info!("Advancing ledger from day {} to day {}", ledger.day, new_day);
    Ledger {
        day: new_day,
        awarded_today: Default::default(),
        awarded_total: ledger.awarded_total,
    }
}

/// The empty ledger: day 1, nothing awarded
pub fn reset() -> Ledger {
    Ledger::new()
}

pub fn stock_report(scenario: &Scenario, ledger: &Ledger) -> StockReport {
    let lines: Vec<StockLine> = scenario
        .segments
        .iter()
        .map(|segment| {
            let awarded_today = ledger.awarded_today(segment.id);
            StockLine {
                segment_id: segment.id,
                label: scenario.label(segment.id),
                kind: segment.kind,
                daily_quota: segment.daily_quota,
                awarded_today,
                awarded_total: ledger.awarded_total(segment.id),
                remaining_today: segment.remaining_today(awarded_today),
            }
        })
        .collect();

    let lots_exhausted = scenario
        .segments
        .iter()
        .filter(|s| s.is_lot())
        .all(|s| !s.has_quota_left(ledger.awarded_today(s.id)));

    StockReport {
        scenario_id: scenario.id.clone(),
        day: ledger.day,
        lines,
        lots_exhausted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Scenario {
        Scenario::new(
            "fair",
            "Fair",
            0.01,
            vec![Segment::lot(1, 2), Segment::lot(2, 1), Segment::bonus(3)],
        )
        .unwrap()
    }

    #[test]
    fn test_record_award() {
        let mut ledger = Ledger::new();
        record_award(&mut ledger, &Segment::lot(1, 2));
        record_award(&mut ledger, &Segment::lot(1, 2));
        record_award(&mut ledger, &Segment::bonus(3));

        assert_eq!(ledger.awarded_today(1), 2);
        assert_eq!(ledger.awarded_total(1), 2);
        assert!(!ledger.awarded_today.contains_key(&3));
        assert!(!ledger.awarded_total.contains_key(&3));
    }

    #[test]
    fn test_record_award_saturates_counters() {
        let mut ledger = Ledger::new();
        ledger.awarded_today.insert(1, u32::MAX);
        ledger.awarded_total.insert(1, u32::MAX);

        record_award(&mut ledger, &Segment::lot(1, u32::MAX));
        assert_eq!(ledger.awarded_today(1), u32::MAX);
        assert_eq!(ledger.awarded_total(1), u32::MAX);
    }

    #[test]
    fn test_advance_day_clears_today_keeps_totals() {
        let mut ledger = Ledger::new();
        ledger.awarded_today.insert(1, 2);
        ledger.awarded_total.insert(1, 5);
        ledger.awarded_total.insert(2, 1);
        let totals_before = ledger.awarded_total.clone();

        let advanced = advance_day(ledger, 2);
        assert_eq!(advanced.day, 2);
        assert!(advanced.awarded_today.is_empty());
        assert_eq!(advanced.awarded_total, totals_before);
    }

    #[test]
    fn test_advance_to_same_day_is_noop() {
        let mut ledger = Ledger::new();
        ledger.awarded_today.insert(1, 2);
        let unchanged = advance_day(ledger.clone(), 1);
        assert_eq!(unchanged, ledger);
    }

    #[test]
    fn test_reset() {
        let ledger = reset();
        assert_eq!(ledger.day, 1);
        assert!(ledger.awarded_today.is_empty());
        assert!(ledger.awarded_total.is_empty());
    }

    #[test]
    fn test_stock_report() {
        let scenario = scenario();
        let mut ledger = Ledger::new();
        record_award(&mut ledger, &Segment::lot(2, 1));

        let report = stock_report(&scenario, &ledger);
        assert_eq!(report.scenario_id, "fair");
        assert_eq!(report.day, 1);
        assert_eq!(report.lines.len(), 3);
        assert!(!report.lots_exhausted);

        let line = report.lines.iter().find(|l| l.segment_id == 2).unwrap();
        assert_eq!(line.awarded_today, 1);
        assert_eq!(line.remaining_today, Some(0));
        assert_eq!(line.label, "Segment 2");

        let bonus = report.lines.iter().find(|l| l.segment_id == 3).unwrap();
        assert_eq!(bonus.remaining_today, None);

        record_award(&mut ledger, &Segment::lot(1, 2));
        record_award(&mut ledger, &Segment::lot(1, 2));
        assert!(stock_report(&scenario, &ledger).lots_exhausted);
    }
}
