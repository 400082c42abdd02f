use scrollpin::Easing;

use crate::Tween;

/// Default duration of a programmatic scroll.
pub const DEFAULT_NAVIGATION_MS: u64 = 600;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavigatorOptions {
    pub duration_ms: u64,
    pub easing: Easing,
}

impl NavigatorOptions {
    pub fn new() -> Self {
        Self {
            duration_ms: DEFAULT_NAVIGATION_MS,
            easing: Easing::EaseInOutCubic,
        }
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

impl Default for NavigatorOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// The only programmatic scroll writer.
///
/// Sections only read scroll. The navigator owns the offset while a tween runs; any user scroll
/// takes it back and cancels the tween.
#[derive(Clone, Debug, Default)]
pub struct Navigator {
    options: NavigatorOptions,
    scroll: u64,
    tween: Option<Tween>,
}

impl Navigator {
    pub fn new(options: NavigatorOptions) -> Self {
        Self {
            options,
            scroll: 0,
            tween: None,
        }
    }

    pub fn options(&self) -> NavigatorOptions {
        self.options
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// The offset the running tween ends at.
    pub fn target(&self) -> Option<u64> {
        self.tween.map(|t| t.to)
    }

    pub fn cancel_animation(&mut self) {
        self.tween = None;
    }

    /// Call this when the UI reports a user scroll (wheel, drag, keyboard).
    ///
    /// This cancels any active tween.
    pub fn on_scroll(&mut self, scroll_offset: u64) {
        if self.tween.take().is_some() {
            adebug!(scroll_offset, "Navigator: user scroll cancels navigation");
        }
        self.scroll = scroll_offset;
    }

    /// Starts (or retargets) a tween to `offset`.
    ///
    /// Returns the target offset.
    pub fn scroll_to_offset(&mut self, offset: u64, now_ms: u64) -> u64 {
        let duration_ms = self.options.duration_ms;
        match self.tween.as_mut() {
            Some(tween) => tween.retarget(now_ms, offset, duration_ms),
            None => {
                self.tween = Some(Tween::new(
                    self.scroll,
                    offset,
                    now_ms,
                    duration_ms,
                    self.options.easing,
                ));
            }
        }
        offset
    }

    /// Advances the tween.
    ///
    /// Returns the offset to write to the scroll container, or `None` when idle.
    pub fn tick(&mut self, now_ms: u64) -> Option<u64> {
        let tween = self.tween?;
        self.scroll = tween.sample(now_ms);
        if tween.is_done(now_ms) {
            self.tween = None;
        }
        Some(self.scroll)
    }
}
