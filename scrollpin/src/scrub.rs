/// Catch-up time constant at `scrub = 1.0`.
pub const SCRUB_MAX_LAG_MS: f32 = 1000.0;

const SETTLE_EPSILON: f32 = 1e-4;

/// Display-side lag over successive progress reads.
///
/// The displayed value moves towards the target by `dt / (dt + tau)` of the remaining distance
/// per step, with `tau = factor * SCRUB_MAX_LAG_MS`. A factor of 0 follows the target exactly.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scrub {
    factor: f32,
    target: f32,
    displayed: f32,
    last_ms: Option<u64>,
}

impl Scrub {
    pub fn new(factor: f32) -> Self {
        Self {
            factor: factor.clamp(0.0, 1.0),
            target: 0.0,
            displayed: 0.0,
            last_ms: None,
        }
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn displayed(&self) -> f32 {
        self.displayed
    }

    pub fn is_settled(&self) -> bool {
        self.displayed == self.target
    }

    /// Sets a new target and advances the displayed value to `now_ms`.
    ///
    /// A settled scrub restarts its clock at `now_ms`, so idle time before a gesture does not
    /// count as catch-up time.
    pub fn set_target(&mut self, target: f32, now_ms: u64) -> f32 {
        if self.is_settled() {
            self.last_ms = Some(now_ms);
        }
        self.target = target;
        self.advance(now_ms)
    }

    /// Advances the displayed value towards the target, as of `now_ms`.
    pub fn advance(&mut self, now_ms: u64) -> f32 {
        let dt = match self.last_ms {
            Some(last) if now_ms < last => {
                pwarn!(last, now_ms, "Scrub: clock went backwards");
                0.0
            }
            Some(last) => (now_ms - last) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);

        if self.factor <= 0.0 {
            self.displayed = self.target;
            return self.displayed;
        }
        let tau = self.factor * SCRUB_MAX_LAG_MS;
        let alpha = dt / (dt + tau);
        self.displayed += (self.target - self.displayed) * alpha;
        let gap = self.target - self.displayed;
        if -SETTLE_EPSILON < gap && gap < SETTLE_EPSILON {
            self.displayed = self.target;
        }
        self.displayed
    }

    /// Jumps both target and displayed value to `value` (no animation).
    pub fn snap(&mut self, value: f32) {
        self.target = value;
        self.displayed = value;
    }

    /// Freezes at the current displayed value; no further ticks are needed.
    pub fn halt(&mut self) {
        self.target = self.displayed;
        self.last_ms = None;
    }
}
