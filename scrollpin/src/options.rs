use alloc::sync::Arc;

use crate::track::validate_window;
use crate::{ConfigError, Window};

/// Default extra scroll distance of a pinned section (`end: '+=130%'`).
pub const DEFAULT_END_OFFSET_MULTIPLIER: f32 = 1.3;
/// Default display smoothing (`scrub: 0.6`).
pub const DEFAULT_SCRUB: f32 = 0.6;

/// Authoring convention partitioning a timeline into three windows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Entrance,
    /// Explicit hold: no tracks are expected here.
    Settle,
    Exit,
}

/// Phase windows; the timeline supports arbitrary windows and never enforces these.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Phases {
    pub entrance: Window,
    pub settle: Window,
    pub exit: Window,
}

impl Default for Phases {
    fn default() -> Self {
        Self {
            entrance: Window::new(0.0, 0.3),
            settle: Window::new(0.3, 0.7),
            exit: Window::new(0.7, 1.0),
        }
    }
}

impl Phases {
    pub fn window(&self, phase: Phase) -> Window {
        match phase {
            Phase::Entrance => self.entrance,
            Phase::Settle => self.settle,
            Phase::Exit => self.exit,
        }
    }

    /// The phase `progress` falls in (boundaries belong to the later phase).
    pub fn phase_at(&self, progress: f32) -> Phase {
        if progress >= self.exit.start {
            Phase::Exit
        } else if progress >= self.settle.start {
            Phase::Settle
        } else {
            Phase::Entrance
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_window(self.entrance)?;
        validate_window(self.settle)?;
        validate_window(self.exit)
    }
}

/// Where a section starts in the scroll container.
///
/// `Provider` is called whenever geometry must be re-derived; `None` means the section element
/// is not mounted.
#[derive(Clone)]
pub enum SectionLocator {
    /// A fixed document offset of the section's top edge.
    Offset(u64),
    Provider(Arc<dyn Fn() -> Option<u64> + Send + Sync>),
}

impl SectionLocator {
    /// The section's top offset, or `None` while it is not mounted.
    pub fn locate(&self) -> Option<u64> {
        match self {
            Self::Offset(v) => Some(*v),
            Self::Provider(f) => f(),
        }
    }
}

impl Default for SectionLocator {
    fn default() -> Self {
        Self::Offset(0)
    }
}

impl core::fmt::Debug for SectionLocator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Offset(v) => f.debug_tuple("Offset").field(v).finish(),
            Self::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// Configuration of one pinned section (its "binding").
#[derive(Clone, Debug)]
pub struct SectionOptions {
    pub locator: SectionLocator,

    /// Extra scroll distance while pinned, as a multiple of the viewport height. Must be `> 0`.
    pub end_offset_multiplier: f32,

    /// Display smoothing in `[0, 1]`: 0 follows scroll instantly, 1 lags the most.
    pub scrub: f32,

    /// Fraction of the viewport height where the section's top edge triggers the start.
    ///
    /// `0.0` starts when the top reaches the top of the viewport; `0.8` when it reaches 80% down.
    pub start_anchor: f32,

    pub phases: Phases,

    /// Disables display smoothing so progress follows scroll without lag.
    pub reduced_motion: bool,

    /// Pins the section while in range. When `false` only progress is tracked (no pin offset).
    pub pin: bool,
}

impl SectionOptions {
    /// Options for a section whose top edge sits at `top` in the scroll container.
    pub fn new(top: u64) -> Self {
        Self::with_locator(SectionLocator::Offset(top))
    }

    pub fn with_locator(locator: SectionLocator) -> Self {
        Self {
            locator,
            end_offset_multiplier: DEFAULT_END_OFFSET_MULTIPLIER,
            scrub: DEFAULT_SCRUB,
            start_anchor: 0.0,
            phases: Phases::default(),
            reduced_motion: false,
            pin: true,
        }
    }

    pub fn with_locator_provider(
        provider: impl Fn() -> Option<u64> + Send + Sync + 'static,
    ) -> Self {
        Self::with_locator(SectionLocator::Provider(Arc::new(provider)))
    }

    pub fn with_end_offset_multiplier(mut self, multiplier: f32) -> Self {
        self.end_offset_multiplier = multiplier;
        self
    }

    pub fn with_scrub(mut self, scrub: f32) -> Self {
        self.scrub = scrub;
        self
    }

    pub fn with_start_anchor(mut self, start_anchor: f32) -> Self {
        self.start_anchor = start_anchor;
        self
    }

    pub fn with_phases(mut self, phases: Phases) -> Self {
        self.phases = phases;
        self
    }

    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    pub fn with_pin(mut self, pin: bool) -> Self {
        self.pin = pin;
        self
    }

    /// The smoothing factor actually applied (0 under reduced motion).
    pub fn effective_scrub(&self) -> f32 {
        if self.reduced_motion { 0.0 } else { self.scrub }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = self.end_offset_multiplier;
        if !m.is_finite() || m <= 0.0 {
            return Err(ConfigError::NonPositiveEndOffset(m));
        }
        if !(0.0..=1.0).contains(&self.scrub) {
            return Err(ConfigError::ScrubOutOfRange(self.scrub));
        }
        if !(0.0..=1.0).contains(&self.start_anchor) {
            return Err(ConfigError::StartAnchorOutOfRange(self.start_anchor));
        }
        self.phases.validate()
    }
}

impl Default for SectionOptions {
    fn default() -> Self {
        Self::new(0)
    }
}
