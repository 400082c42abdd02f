use alloc::vec::Vec;

use crate::key::TargetKey;
use crate::{
    ConfigError, PinController, PinGeometry, PinState, PinTransition, ProgressSource,
    PropertyWrite, Scrub, SectionOptions, TargetId, Timeline, Viewport,
};

/// What a scroll/resize/tick changed.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionUpdate {
    /// True progress.
    pub progress: f32,
    /// Smoothed progress the next frame renders.
    pub displayed: f32,
    pub pin: PinState,
    pub transition: Option<PinTransition>,
}

impl SectionUpdate {
    pub fn reset(&self) -> bool {
        self.transition.is_some_and(|t| t.reset)
    }
}

/// A rendered frame: the batch of writes plus pin layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame<K> {
    pub progress: f32,
    pub pin: PinState,
    /// Translation keeping the section fixed while pinned (see [`PinController::pin_offset`]).
    pub pin_offset: u64,
    /// `true` when this frame is the instantaneous leave-back reset.
    pub reset: bool,
    pub writes: Vec<PropertyWrite<K>>,
}

/// One pinned section: binding geometry, pin state, smoothing and its timeline.
///
/// This type does not hold any UI objects. The adapter drives it by calling:
/// - `on_scroll` / `on_resize` when UI events occur, in arrival order
/// - `tick(now_ms)` each animation frame while [`Section::needs_tick`] is `true`
/// - `render_into` / `frame` to obtain the property writes for the frame
///
/// After [`Section::dispose`] the section ignores every event and never writes again.
#[derive(Clone, Debug)]
pub struct Section<K = TargetId> {
    options: SectionOptions,
    timeline: Timeline<K>,
    source: ProgressSource,
    pin: PinController,
    scrub: Scrub,
    viewport: Viewport,
    scroll: u64,
    reset_pending: bool,
    disposed: bool,
}

impl<K: TargetKey> Section<K> {
    /// Validates `options` and binds `timeline` to them.
    pub fn new(options: SectionOptions, timeline: Timeline<K>) -> Result<Self, ConfigError> {
        options.validate()?;
        pdebug!(
            end_offset_multiplier = options.end_offset_multiplier,
            scrub = options.scrub,
            tracks = timeline.tracks().len(),
            "Section::new"
        );
        Ok(Self {
            source: ProgressSource::new(&options),
            scrub: Scrub::new(options.effective_scrub()),
            pin: PinController::new(),
            options,
            timeline,
            viewport: Viewport::default(),
            scroll: 0,
            reset_pending: false,
            disposed: false,
        })
    }

    pub fn options(&self) -> &SectionOptions {
        &self.options
    }

    pub fn timeline(&self) -> &Timeline<K> {
        &self.timeline
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll
    }

    /// True progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.source.progress()
    }

    /// Smoothed progress the next frame renders.
    pub fn displayed_progress(&self) -> f32 {
        self.scrub.displayed()
    }

    pub fn pin_state(&self) -> PinState {
        self.pin.state()
    }

    pub fn geometry(&self) -> Option<PinGeometry> {
        self.source.geometry()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// `true` while smoothing still has to catch up with the true progress.
    pub fn needs_tick(&self) -> bool {
        !self.disposed && !self.scrub.is_settled()
    }

    /// Applies a scroll event. Returns `None` once disposed.
    pub fn on_scroll(&mut self, scroll: u64, now_ms: u64) -> Option<SectionUpdate> {
        if self.disposed {
            return None;
        }
        ptrace!(scroll, now_ms, "Section::on_scroll");
        self.scroll = scroll;
        Some(self.update(now_ms))
    }

    /// Applies a viewport change; geometry is re-derived on the spot.
    pub fn on_resize(&mut self, viewport: Viewport, now_ms: u64) -> Option<SectionUpdate> {
        if self.disposed {
            return None;
        }
        self.viewport = viewport;
        self.source.invalidate();
        Some(self.update(now_ms))
    }

    /// Applies viewport and scroll offset together, as delivered by a single UI frame.
    pub fn apply_scroll_frame(
        &mut self,
        viewport: Viewport,
        scroll: u64,
        now_ms: u64,
    ) -> Option<SectionUpdate> {
        if self.disposed {
            return None;
        }
        if self.viewport != viewport {
            self.viewport = viewport;
            self.source.invalidate();
        }
        self.scroll = scroll;
        Some(self.update(now_ms))
    }

    /// Marks cached geometry stale after a layout change that did not resize the viewport.
    pub fn invalidate_geometry(&mut self) {
        self.source.invalidate();
    }

    /// Advances smoothing. Returns the displayed progress, or `None` once disposed.
    pub fn tick(&mut self, now_ms: u64) -> Option<f32> {
        if self.disposed {
            return None;
        }
        Some(self.scrub.advance(now_ms))
    }

    fn update(&mut self, now_ms: u64) -> SectionUpdate {
        let progress = self.source.update(self.scroll, self.viewport);
        let transition = self
            .source
            .geometry()
            .and_then(|g| self.pin.update(self.scroll, g));

        let reset = transition.is_some_and(|t| t.reset);
        if reset {
            pdebug!(scroll = self.scroll, "Section: leave-back reset");
            self.scrub.snap(0.0);
        } else {
            self.scrub.set_target(progress, now_ms);
        }
        // A pending reset frame only survives while the section stays above its range.
        self.reset_pending =
            reset || (self.reset_pending && self.pin.state() == PinState::PrePin);

        SectionUpdate {
            progress,
            displayed: self.scrub.displayed(),
            pin: self.pin.state(),
            transition,
        }
    }

    pub fn pin_offset(&self) -> u64 {
        if !self.options.pin {
            return 0;
        }
        match self.source.geometry() {
            Some(g) => self.pin.pin_offset(self.scroll, g),
            None => 0,
        }
    }

    /// Writes this frame's property values into `out` (cleared first).
    ///
    /// Targets failing `is_present` are skipped. Returns `true` if the frame is the leave-back
    /// reset, in which case `out` holds the entrance-start snapshot.
    pub fn render_into(
        &mut self,
        is_present: impl FnMut(&K) -> bool,
        out: &mut Vec<PropertyWrite<K>>,
    ) -> bool {
        if self.disposed {
            out.clear();
            return false;
        }
        if self.reset_pending {
            self.reset_pending = false;
            self.timeline
                .entrance_snapshot_into(self.viewport, is_present, out);
            return true;
        }
        self.timeline
            .evaluate_into(self.scrub.displayed(), self.viewport, is_present, out);
        false
    }

    pub fn frame(&mut self, is_present: impl FnMut(&K) -> bool) -> Frame<K> {
        let mut writes = Vec::new();
        let reset = self.render_into(is_present, &mut writes);
        Frame {
            progress: self.scrub.displayed(),
            pin: self.pin.state(),
            pin_offset: self.pin_offset(),
            reset,
            writes,
        }
    }

    /// Tears the section down: stops smoothing and detaches from scroll input.
    ///
    /// Idempotent. The last known progress stays readable.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        pdebug!("Section::dispose");
        self.disposed = true;
        self.reset_pending = false;
        self.scrub.halt();
        self.source.detach();
    }
}
