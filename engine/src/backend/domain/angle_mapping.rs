//! Maps a chosen segment to the rotation that stops the wheel on it.
//!
//! Angles are degrees, clockwise, measured from 12 o'clock. The pointer is
//! fixed at 12 o'clock. Rotating the wheel by `θ` moves a sector drawn at
//! local angle `a` to `a + θ`.

use shared::{Segment, SegmentId};

use crate::backend::error::{WheelError, WheelResult};

/// Where the first sector starts, in wheel-local degrees
pub const REFERENCE_ANGLE: f64 = 0.0;
/// Fixed pointer position
pub const POINTER_ANGLE: f64 = 0.0;
pub const LOT_SPAN_WEIGHT: f64 = 2.0;
pub const BONUS_SPAN_WEIGHT: f64 = 1.0;
/// Full turns added before landing
pub const DEFAULT_EXTRA_TURNS: u32 = 5;

const FULL_TURN: f64 = 360.0;

/// Angular extent of one sector, in wheel-local degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorSpan {
    pub segment_id: SegmentId,
    pub start: f64,
    pub end: f64,
}

impl SectorSpan {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn contains(&self, local_angle: f64) -> bool {
        let angle = (local_angle - REFERENCE_ANGLE).rem_euclid(FULL_TURN) + REFERENCE_ANGLE;
        angle >= self.start && angle < self.end
    }
}

fn span_weight(segment: &Segment) -> f64 {
    if segment.is_bonus() {
        BONUS_SPAN_WEIGHT
    } else {
        LOT_SPAN_WEIGHT
    }
}

/// Lay the visible segments out sequentially around the wheel
pub fn sector_spans(available: &[Segment]) -> Vec<SectorSpan> {
    let total: f64 = available.iter().map(span_weight).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut spans = Vec::with_capacity(available.len());
    let mut cursor = REFERENCE_ANGLE;
    for (index, segment) in available.iter().enumerate() {
        let end = if index + 1 == available.len() {
            REFERENCE_ANGLE + FULL_TURN
        } else {
            cursor + FULL_TURN * span_weight(segment) / total
        };
        spans.push(SectorSpan {
            segment_id: segment.id,
            start: cursor,
            end,
        });
        cursor = end;
    }
    spans
}

/// Absolute rotation at which the wheel must stop so the pointer sits on the
/// middle of `winner_id`'s sector. The result is at least `extra_turns` full
/// turns ahead of `current_rotation`.
pub fn target_rotation(
    available: &[Segment],
    winner_id: SegmentId,
    current_rotation: f64,
    extra_turns: u32,
) -> WheelResult<f64> {
    let span = sector_spans(available)
        .into_iter()
        .find(|span| span.segment_id == winner_id)
        .ok_or(WheelError::UnknownSegment(winner_id))?;

    let landing = (POINTER_ANGLE - span.midpoint()).rem_euclid(FULL_TURN);
    let delta = (landing - current_rotation).rem_euclid(FULL_TURN);
    Ok(current_rotation + FULL_TURN * f64::from(extra_turns) + delta)
}

/// Segment whose sector is under the pointer at `rotation`
pub fn segment_under_pointer(available: &[Segment], rotation: f64) -> Option<SegmentId> {
    let local = (POINTER_ANGLE - rotation).rem_euclid(FULL_TURN);
    sector_spans(available)
        .into_iter()
        .find(|span| span.contains(local))
        .map(|span| span.segment_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel() -> Vec<Segment> {
        vec![
            Segment::lot(1, 5),
            Segment::lot(2, 5),
            Segment::bonus(3),
            Segment::lot(4, 5),
        ]
    }

    #[test]
    fn test_spans_cover_full_turn() {
        let spans = sector_spans(&wheel());
        assert_eq!(spans.len(), 4);
        assert_eq!(spans[0].start, REFERENCE_ANGLE);
        assert_eq!(spans[3].end, REFERENCE_ANGLE + 360.0);

        let total: f64 = spans.iter().map(SectorSpan::width).sum();
        assert!((total - 360.0).abs() < 1e-9);

        for pair in spans.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn test_bonus_sector_is_half_width() {
        let spans = sector_spans(&wheel());
        // weights 2 + 2 + 1 + 2 = 7
        assert!((spans[0].width() - 360.0 * 2.0 / 7.0).abs() < 1e-9);
        assert!((spans[2].width() - 360.0 / 7.0).abs() < 1e-9);
        assert!((spans[2].width() * 2.0 - spans[1].width()).abs() < 1e-9);
    }

    #[test]
    fn test_single_segment_takes_whole_wheel() {
        let spans = sector_spans(&[Segment::bonus(9)]);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].width(), 360.0);
        assert!(sector_spans(&[]).is_empty());
    }

    #[test]
    fn test_target_rotation_lands_on_winner() {
        let available = wheel();
        for current in [0.0, 17.5, 359.0, 1234.0] {
            for segment in &available {
                let target = target_rotation(&available, segment.id, current, DEFAULT_EXTRA_TURNS)
                    .unwrap();
                assert!(target >= current + 360.0 * f64::from(DEFAULT_EXTRA_TURNS));
                assert!(target < current + 360.0 * f64::from(DEFAULT_EXTRA_TURNS + 1));
                assert_eq!(segment_under_pointer(&available, target), Some(segment.id));
            }
        }
    }

    #[test]
    fn test_target_rotation_centers_sector() {
        let available = wheel();
        let spans = sector_spans(&available);
        let target = target_rotation(&available, 2, 0.0, 0).unwrap();

        let local = (POINTER_ANGLE - target).rem_euclid(360.0);
        assert!((local - spans[1].midpoint()).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_winner() {
        let result = target_rotation(&wheel(), 42, 0.0, 3);
        assert!(matches!(result, Err(WheelError::UnknownSegment(42))));
    }
}
