use alloc::sync::Arc;
use alloc::vec::Vec;

use scrollpin::{
    ConfigError, PinGeometry, PropertyWrite, ScrollDirection, SectionLocator, TargetId, TargetKey,
    Timeline, Viewport,
};

/// Default trigger line (`start: 'top 80%'`).
pub const DEFAULT_REVEAL_ANCHOR: f32 = 0.8;
pub const DEFAULT_REVEAL_MS: u64 = 700;

/// Configuration of a time-driven reveal.
#[derive(Clone, Debug)]
pub struct RevealOptions {
    /// Where the watched element starts. `None` plays only through [`Reveal::play`] or autoplay.
    pub trigger: Option<SectionLocator>,

    /// Fraction of the viewport height the element's top must scroll past to play.
    pub start_anchor: f32,

    pub duration_ms: u64,

    /// Wait before a forward play starts moving. Reversal starts immediately.
    pub delay_ms: u64,

    /// Plays forward on the first tick, as a load-time entrance.
    pub autoplay: bool,

    /// Jumps to the end state instead of animating.
    pub reduced_motion: bool,
}

impl RevealOptions {
    /// A reveal watching an element whose top edge sits at `top`.
    pub fn new(top: u64) -> Self {
        Self::with_trigger(Some(SectionLocator::Offset(top)))
    }

    pub fn with_trigger_provider(
        provider: impl Fn() -> Option<u64> + Send + Sync + 'static,
    ) -> Self {
        Self::with_trigger(Some(SectionLocator::Provider(Arc::new(provider))))
    }

    /// A reveal without a scroll trigger that plays once on load.
    pub fn on_load() -> Self {
        Self::with_trigger(None).with_autoplay(true)
    }

    fn with_trigger(trigger: Option<SectionLocator>) -> Self {
        Self {
            trigger,
            start_anchor: DEFAULT_REVEAL_ANCHOR,
            duration_ms: DEFAULT_REVEAL_MS,
            delay_ms: 0,
            autoplay: false,
            reduced_motion: false,
        }
    }

    pub fn with_start_anchor(mut self, start_anchor: f32) -> Self {
        self.start_anchor = start_anchor;
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.start_anchor) {
            return Err(ConfigError::StartAnchorOutOfRange(self.start_anchor));
        }
        Ok(())
    }
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self::on_load()
    }
}

#[derive(Clone, Copy, Debug)]
struct Motion {
    direction: ScrollDirection,
    from: f32,
    /// Includes the forward delay.
    start_ms: u64,
}

/// A timeline played over wall-clock time when a trigger line is crossed.
///
/// Crossing the line downward plays forward; crossing it back upward reverses from wherever the
/// animation currently is. Leaving or re-entering from below does nothing.
#[derive(Clone, Debug)]
pub struct Reveal<K = TargetId> {
    options: RevealOptions,
    timeline: Timeline<K>,
    viewport: Viewport,
    trigger_line: Option<u64>,
    trigger_height: u32,
    crossed: bool,
    position: f32,
    motion: Option<Motion>,
    autoplay_pending: bool,
    disposed: bool,
}

impl<K: TargetKey> Reveal<K> {
    pub fn new(options: RevealOptions, timeline: Timeline<K>) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self {
            autoplay_pending: options.autoplay,
            options,
            timeline,
            viewport: Viewport::default(),
            trigger_line: None,
            trigger_height: 0,
            crossed: false,
            position: 0.0,
            motion: None,
            disposed: false,
        })
    }

    pub fn options(&self) -> &RevealOptions {
        &self.options
    }

    pub fn timeline(&self) -> &Timeline<K> {
        &self.timeline
    }

    /// Playback position in `[0, 1]`.
    pub fn position(&self) -> f32 {
        self.position
    }

    /// `true` once scroll is at or below the trigger line.
    pub fn is_crossed(&self) -> bool {
        self.crossed
    }

    pub fn is_playing(&self) -> bool {
        self.motion.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn needs_tick(&self) -> bool {
        !self.disposed && (self.motion.is_some() || self.autoplay_pending)
    }

    pub fn on_resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.trigger_line = None;
    }

    /// Marks the cached trigger line stale after a layout change.
    pub fn invalidate_trigger(&mut self) {
        self.trigger_line = None;
    }

    /// Checks the trigger line against `scroll`.
    ///
    /// Returns the direction of a crossing, if one happened.
    pub fn on_scroll(&mut self, scroll: u64, now_ms: u64) -> Option<ScrollDirection> {
        if self.disposed {
            return None;
        }
        let line = self.trigger_line()?;
        let crossed = scroll >= line;
        if crossed == self.crossed {
            return None;
        }
        self.crossed = crossed;
        if crossed {
            self.play(now_ms);
            Some(ScrollDirection::Forward)
        } else {
            self.reverse(now_ms);
            Some(ScrollDirection::Backward)
        }
    }

    fn trigger_line(&mut self) -> Option<u64> {
        if let Some(line) = self.trigger_line {
            if self.trigger_height == self.viewport.height {
                return Some(line);
            }
        }
        let top = self.options.trigger.as_ref()?.locate()?;
        let line = PinGeometry::derive(top, self.viewport.height, self.options.start_anchor, 1.0).start;
        atrace!(top, line, "Reveal: trigger line derived");
        self.trigger_line = Some(line);
        self.trigger_height = self.viewport.height;
        Some(line)
    }

    /// Plays forward from the current position after the configured delay.
    pub fn play(&mut self, now_ms: u64) {
        self.autoplay_pending = false;
        let start_ms = now_ms.saturating_add(self.options.delay_ms);
        self.start(ScrollDirection::Forward, now_ms, start_ms);
    }

    /// Plays backward from the current position.
    pub fn reverse(&mut self, now_ms: u64) {
        self.autoplay_pending = false;
        self.start(ScrollDirection::Backward, now_ms, now_ms);
    }

    fn start(&mut self, direction: ScrollDirection, now_ms: u64, start_ms: u64) {
        if self.disposed {
            return;
        }
        if let Some(m) = self.motion {
            self.position = self.sample(m, now_ms);
        }
        if self.options.reduced_motion {
            self.motion = None;
            self.position = match direction {
                ScrollDirection::Forward => 1.0,
                ScrollDirection::Backward => 0.0,
            };
            return;
        }
        adebug!(?direction, from = self.position, "Reveal: start");
        self.motion = Some(Motion {
            direction,
            from: self.position,
            start_ms,
        });
    }

    fn sample(&self, motion: Motion, now_ms: u64) -> f32 {
        if now_ms <= motion.start_ms {
            return motion.from;
        }
        let delta = (now_ms - motion.start_ms) as f32 / self.options.duration_ms.max(1) as f32;
        match motion.direction {
            ScrollDirection::Forward => (motion.from + delta).min(1.0),
            ScrollDirection::Backward => (motion.from - delta).max(0.0),
        }
    }

    /// Advances playback. Returns the position, or `None` once disposed.
    pub fn tick(&mut self, now_ms: u64) -> Option<f32> {
        if self.disposed {
            return None;
        }
        if self.autoplay_pending {
            self.play(now_ms);
        }
        if let Some(m) = self.motion {
            self.position = self.sample(m, now_ms);
            let done = match m.direction {
                ScrollDirection::Forward => self.position >= 1.0,
                ScrollDirection::Backward => self.position <= 0.0,
            };
            if done {
                self.motion = None;
            }
        }
        Some(self.position)
    }

    /// Writes the current frame into `out` (cleared first). A disposed reveal writes nothing.
    pub fn render_into(
        &self,
        is_present: impl FnMut(&K) -> bool,
        out: &mut Vec<PropertyWrite<K>>,
    ) {
        if self.disposed {
            out.clear();
            return;
        }
        self.timeline
            .evaluate_into(self.position, self.viewport, is_present, out);
    }

    /// Stops playback. Idempotent.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.motion = None;
        self.autoplay_pending = false;
    }
}
