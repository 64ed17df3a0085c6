/// Repeating poll schedule driven by elapsed wall time.
/// Turns host frame/interval deltas into a whole number of sampling ticks,
/// and can be started and stopped.
pub struct PollTimer {
    /// Milliseconds between ticks.
    period_ms: f32,
    /// Time carried over from previous deltas.
    accumulator: f32,
    running: bool,
}

impl PollTimer {
    /// Create a stopped timer.
    pub fn new(period_ms: f32) -> Self {
        Self {
            period_ms: period_ms.max(1.0),
            accumulator: 0.0,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop ticking and drop any partial period.
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Add elapsed time. Returns the number of ticks due; 0 while stopped.
    pub fn accumulate(&mut self, elapsed_ms: f32) -> u32 {
        if !self.running {
            return 0;
        }
        self.accumulator += elapsed_ms.max(0.0);
        // A backgrounded tab can hand us seconds at once; never burst more than 10 ticks.
        self.accumulator = self.accumulator.min(self.period_ms * 10.0);
        let ticks = (self.accumulator / self.period_ms) as u32;
        self.accumulator -= ticks as f32 * self.period_ms;
        ticks
    }

    /// Milliseconds between ticks.
    pub fn period_ms(&self) -> f32 {
        self.period_ms
    }
}
