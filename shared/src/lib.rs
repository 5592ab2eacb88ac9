use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Small integer identifier of a wheel segment, stable across a run
pub type SegmentId = u32;

/// Kind of prize a segment represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Ordinary prize with a finite daily stock
    Lot,
    /// Rare prize with unlimited stock, always eligible
    Bonus,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKind::Lot => write!(f, "lot"),
            SegmentKind::Bonus => write!(f, "bonus"),
        }
    }
}

/// A prize category on the wheel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub id: SegmentId,
    pub kind: SegmentKind,
    /// Maximum awards per day. `None` means unlimited (bonus segments)
    pub daily_quota: Option<u32>,
}

impl Segment {
    pub fn lot(id: SegmentId, daily_quota: u32) -> Self {
        Self {
            id,
            kind: SegmentKind::Lot,
            daily_quota: Some(daily_quota),
        }
    }

    pub fn bonus(id: SegmentId) -> Self {
        Self {
            id,
            kind: SegmentKind::Bonus,
            daily_quota: None,
        }
    }

    pub fn is_lot(&self) -> bool {
        self.kind == SegmentKind::Lot
    }

    pub fn is_bonus(&self) -> bool {
        self.kind == SegmentKind::Bonus
    }

    /// Whether the segment may still be awarded given today's count
    pub fn has_quota_left(&self, awarded_today: u32) -> bool {
        match (self.kind, self.daily_quota) {
            (SegmentKind::Bonus, _) | (_, None) => true,
            (SegmentKind::Lot, Some(quota)) => awarded_today < quota,
        }
    }

    /// Remaining stock for today, `None` when unlimited
    pub fn remaining_today(&self, awarded_today: u32) -> Option<u32> {
        match self.kind {
            SegmentKind::Bonus => None,
            SegmentKind::Lot => self
                .daily_quota
                .map(|quota| quota.saturating_sub(awarded_today)),
        }
    }
}

/// Presentation attributes of a segment, joined to `Segment` by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentDisplay {
    pub id: SegmentId,
    pub label: String,
    pub color: String,
    pub text_color: String,
}

/// Per-scenario award counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    /// Active day, selects which awarded-today bucket applies
    pub day: u32,
    #[serde(default)]
    pub awarded_today: BTreeMap<SegmentId, u32>,
    #[serde(default)]
    pub awarded_total: BTreeMap<SegmentId, u32>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub const FIRST_DAY: u32 = 1;

    pub fn new() -> Self {
        Self {
            day: Self::FIRST_DAY,
            awarded_today: BTreeMap::new(),
            awarded_total: BTreeMap::new(),
        }
    }

    pub fn awarded_today(&self, id: SegmentId) -> u32 {
        self.awarded_today.get(&id).copied().unwrap_or(0)
    }

    pub fn awarded_total(&self, id: SegmentId) -> u32 {
        self.awarded_total.get(&id).copied().unwrap_or(0)
    }

    /// True for a freshly initialized ledger
    pub fn is_empty(&self) -> bool {
        self.day == Self::FIRST_DAY && self.awarded_today.is_empty() && self.awarded_total.is_empty()
    }
}

/// Document stored per scenario key.
///
/// Layout: `{"stockManager": {"day", "awardedToday", "awardedTotal"}, "day", "updatedAt"}`.
/// The top-level `day` duplicates `stockManager.day` for older readers; the
/// nested value is authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRecord {
    pub stock_manager: Ledger,
    pub day: u32,
    /// RFC 3339 timestamp of the last write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl LedgerRecord {
    pub fn new(ledger: Ledger, updated_at: Option<String>) -> Self {
        let day = ledger.day;
        Self {
            stock_manager: ledger,
            day,
            updated_at,
        }
    }

    pub fn into_ledger(self) -> Ledger {
        self.stock_manager
    }
}

/// One row of the admin stock view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLine {
    pub segment_id: SegmentId,
    pub label: String,
    pub kind: SegmentKind,
    pub daily_quota: Option<u32>,
    pub awarded_today: u32,
    pub awarded_total: u32,
    pub remaining_today: Option<u32>,
}

/// Stock state of a scenario for the current day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockReport {
    pub scenario_id: String,
    pub day: u32,
    pub lines: Vec<StockLine>,
    /// Every lot segment has reached its daily quota
    pub lots_exhausted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_quota_left() {
        let lot = Segment::lot(1, 2);
        assert!(lot.has_quota_left(0));
        assert!(lot.has_quota_left(1));
        assert!(!lot.has_quota_left(2));
        assert!(!lot.has_quota_left(3));

        let bonus = Segment::bonus(9);
        assert!(bonus.has_quota_left(0));
        assert!(bonus.has_quota_left(u32::MAX));
    }

    #[test]
    fn test_segment_remaining_today() {
        let lot = Segment::lot(1, 5);
        assert_eq!(lot.remaining_today(0), Some(5));
        assert_eq!(lot.remaining_today(3), Some(2));
        assert_eq!(lot.remaining_today(7), Some(0));
        assert_eq!(Segment::bonus(2).remaining_today(100), None);
    }

    #[test]
    fn test_segment_kind_serialization() {
        let json = serde_json::to_string(&Segment::lot(3, 10)).unwrap();
        assert_eq!(json, r#"{"id":3,"kind":"lot","daily_quota":10}"#);

        let bonus: Segment =
            serde_json::from_str(r#"{"id":4,"kind":"bonus","daily_quota":null}"#).unwrap();
        assert!(bonus.is_bonus());
        assert_eq!(bonus.daily_quota, None);
    }

    #[test]
    fn test_ledger_defaults() {
        let ledger = Ledger::default();
        assert_eq!(ledger.day, 1);
        assert!(ledger.is_empty());
        assert_eq!(ledger.awarded_today(42), 0);
        assert_eq!(ledger.awarded_total(42), 0);
    }

    #[test]
    fn test_ledger_record_layout() {
        let mut ledger = Ledger::new();
        ledger.day = 2;
        ledger.awarded_today.insert(1, 3);
        ledger.awarded_total.insert(1, 7);

        let record = LedgerRecord::new(ledger, None);
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["day"], 2);
        assert_eq!(value["stockManager"]["day"], 2);
        assert_eq!(value["stockManager"]["awardedToday"]["1"], 3);
        assert_eq!(value["stockManager"]["awardedTotal"]["1"], 7);
        assert!(value.get("updatedAt").is_none());
    }

    #[test]
    fn test_ledger_record_nested_day_wins() {
        let json = r#"{
            "stockManager": {"day": 2, "awardedToday": {"5": 1}, "awardedTotal": {"5": 4}},
            "day": 1
        }"#;

        let record: LedgerRecord = serde_json::from_str(json).unwrap();
        let ledger = record.into_ledger();
        assert_eq!(ledger.day, 2);
        assert_eq!(ledger.awarded_today(5), 1);
        assert_eq!(ledger.awarded_total(5), 4);
    }

    #[test]
    fn test_ledger_record_missing_maps() {
        let json = r#"{"stockManager": {"day": 1}, "day": 1}"#;
        let record: LedgerRecord = serde_json::from_str(json).unwrap();
        assert!(record.into_ledger().is_empty());
    }
}
