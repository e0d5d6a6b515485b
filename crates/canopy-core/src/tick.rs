use std::time::Duration;

/// Interval used by drivers that are not told otherwise.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickContext {
    /// Zero-based index of this driver tick.
    pub tick: u64,
    /// Time covered by this tick.
    pub dt: Duration,
    /// Total simulated time, including `dt`.
    pub time: Duration,
}

impl TickContext {
    pub fn new(tick: u64, dt: Duration, time: Duration) -> Self {
        Self { tick, dt, time }
    }

    /// First tick of a fixed-interval clock.
    pub fn first(dt: Duration) -> Self {
        Self::new(0, dt, dt)
    }

    /// The tick following this one, covering the same interval.
    pub fn next(&self) -> Self {
        Self::new(self.tick + 1, self.dt, self.time + self.dt)
    }

    pub fn dt_seconds(&self) -> f32 {
        self.dt.as_secs_f32()
    }
}

/// Fixed-interval clock.
///
/// Time is accumulated as an integer `Duration`, so ten 100 ms ticks land on exactly one second.
#[derive(Debug, Clone)]
pub struct FixedStep {
    interval: Duration,
    last: Option<TickContext>,
}

impl FixedStep {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn last(&self) -> Option<TickContext> {
        self.last
    }

    pub fn advance(&mut self) -> TickContext {
        let ctx = match self.last {
            Some(last) => last.next(),
            None => TickContext::first(self.interval),
        };
        self.last = Some(ctx);
        ctx
    }

    pub fn restart(&mut self) {
        self.last = None;
    }
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}

impl Iterator for FixedStep {
    type Item = TickContext;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.advance())
    }
}
