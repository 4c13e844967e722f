/// Wall-clock frame clock.
///
/// The host passes absolute wall-clock milliseconds once per display refresh.
/// Phase-driven rules read `elapsed_ms`; per-frame rules ignore time entirely.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    /// Most recent wall-clock reading in milliseconds.
    now_ms: f64,
    /// Milliseconds between the last two readings (0 on the first frame).
    delta_ms: f64,
    /// Number of frames advanced.
    frame: u64,
    started: bool,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new wall-clock reading. Returns the frame delta in ms.
    /// A reading earlier than the previous one yields a zero delta.
    pub fn advance(&mut self, now_ms: f64) -> f64 {
        self.delta_ms = if self.started {
            (now_ms - self.now_ms).max(0.0)
        } else {
            0.0
        };
        self.now_ms = now_ms;
        self.started = true;
        self.frame += 1;
        self.delta_ms
    }

    /// Wall-clock time of the current frame in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn delta_ms(&self) -> f64 {
        self.delta_ms
    }

    /// Frames advanced so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
