/// Frame-counting visibility toggle.
///
/// Counts one tick per frame; once the count exceeds `threshold` the
/// visibility flips and the count restarts from zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlinkTimer {
    ticks: u32,
    threshold: u32,
    visible: bool,
}

impl BlinkTimer {
    pub fn new(threshold: u32, visible: bool) -> Self {
        Self {
            ticks: 0,
            threshold,
            visible,
        }
    }

    /// Advance one frame. Returns the visibility for this frame.
    pub fn tick(&mut self) -> bool {
        self.ticks += 1;
        if self.ticks > self.threshold {
            self.visible = !self.visible;
            self.ticks = 0;
        }
        self.visible
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_once_after_threshold_plus_one() {
        let mut t = BlinkTimer::new(500, false);
        for _ in 0..500 {
            assert!(!t.tick());
        }
        assert_eq!(t.ticks(), 500);
        assert!(t.tick());
        assert_eq!(t.ticks(), 0);
    }

    #[test]
    fn period_is_threshold_plus_one() {
        let mut t = BlinkTimer::new(3, false);
        let seq: Vec<bool> = (0..8).map(|_| t.tick()).collect();
        assert_eq!(seq, vec![false, false, false, true, true, true, true, false]);
    }
}
