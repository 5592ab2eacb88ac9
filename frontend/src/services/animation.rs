/// Smooth deceleration, `t` in `[0, 1]`
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Rotation from `from` to `to` degrees over `duration_ms`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinAnimation {
    pub from: f64,
    pub to: f64,
    pub started_at: f64,
    pub duration_ms: f64,
}

impl SpinAnimation {
    pub const DEFAULT_DURATION_MS: f64 = 6000.0;

    pub fn new(from: f64, to: f64, started_at: f64) -> Self {
        Self {
            from,
            to,
            started_at,
            duration_ms: Self::DEFAULT_DURATION_MS,
        }
    }

    /// Rotation at time `now` (ms) and whether the animation has finished.
    /// The final frame is exactly `to`.
    pub fn rotation_at(&self, now: f64) -> (f64, bool) {
        if self.duration_ms <= 0.0 {
            return (self.to, true);
        }
        let progress = (now - self.started_at) / self.duration_ms;
        if progress >= 1.0 {
            return (self.to, true);
        }
        let eased = ease_out_cubic(progress);
        (self.from + (self.to - self.from) * eased, false)
    }
}
