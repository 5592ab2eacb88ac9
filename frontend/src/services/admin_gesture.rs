/// Detects the hidden admin gesture: a burst of clicks in the page corner.
///
/// Each click must come within `window_ms` of the previous one; a longer gap
/// starts the count over. Reaching `required_clicks` fires and resets.
#[derive(Debug, Clone, PartialEq)]
pub struct CornerClickCounter {
    required_clicks: u32,
    window_ms: f64,
    count: u32,
    last_click_at: Option<f64>,
}

impl Default for CornerClickCounter {
    fn default() -> Self {
        Self::new(5, 1500.0)
    }
}

impl CornerClickCounter {
    pub fn new(required_clicks: u32, window_ms: f64) -> Self {
        Self {
            required_clicks: required_clicks.max(1),
            window_ms,
            count: 0,
            last_click_at: None,
        }
    }

    /// Register a click at `now` (ms). Returns true when the gesture completes.
    pub fn register(&mut self, now: f64) -> bool {
        let within_window = self
            .last_click_at
            .map(|last| now - last <= self.window_ms)
            .unwrap_or(false);

        self.count = if within_window { self.count + 1 } else { 1 };
        self.last_click_at = Some(now);

        if self.count >= self.required_clicks {
            self.count = 0;
            self.last_click_at = None;
            true
        } else {
            false
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_required_clicks() {
        let mut counter = CornerClickCounter::new(3, 1000.0);
        assert!(!counter.register(0.0));
        assert!(!counter.register(500.0));
        assert!(counter.register(900.0));
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_gap_restarts_count() {
        let mut counter = CornerClickCounter::new(3, 1000.0);
        counter.register(0.0);
        counter.register(800.0);
        assert!(!counter.register(2000.0));
        assert_eq!(counter.count(), 1);
        assert!(!counter.register(2500.0));
        assert!(counter.register(3000.0));
    }

    #[test]
    fn test_default_needs_five_clicks() {
        let mut counter = CornerClickCounter::default();
        let fired: Vec<bool> = (0..5).map(|i| counter.register(i as f64 * 100.0)).collect();
        assert_eq!(fired, vec![false, false, false, false, true]);
    }
}
