use crate::{PinGeometry, ScrollDirection};

/// Layout mode of a pinned section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PinState {
    /// Above the pinned range: the section flows normally, progress is 0.
    #[default]
    PrePin,
    /// Inside the pinned range (bounds included): the section is held fixed on screen.
    Pinned,
    /// Past the pinned range: the section flows again, offset by the range, progress is 1.
    PostPin,
}

impl PinState {
    pub fn classify(scroll: u64, geometry: PinGeometry) -> Self {
        if scroll < geometry.start {
            Self::PrePin
        } else if scroll <= geometry.end {
            Self::Pinned
        } else {
            Self::PostPin
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinTransition {
    pub from: PinState,
    pub to: PinState,
    pub direction: ScrollDirection,
    /// Set when the section was left backwards through its start ("leave back"): every target
    /// must snap to its entrance-start value without animation.
    pub reset: bool,
}

/// Tracks a section's [`PinState`] from scroll position alone.
#[derive(Clone, Debug, Default)]
pub struct PinController {
    state: PinState,
    last_scroll: Option<u64>,
}

impl PinController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PinState {
        self.state
    }

    /// Classifies `scroll` against `geometry` and reports a transition if the state changed.
    pub fn update(&mut self, scroll: u64, geometry: PinGeometry) -> Option<PinTransition> {
        let direction = match self.last_scroll {
            Some(prev) if scroll < prev => ScrollDirection::Backward,
            _ => ScrollDirection::Forward,
        };
        self.last_scroll = Some(scroll);

        let next = PinState::classify(scroll, geometry);
        if next == self.state {
            return None;
        }
        let from = self.state;
        self.state = next;
        let reset = next == PinState::PrePin && direction == ScrollDirection::Backward;
        ptrace!(?from, to = ?next, reset, "PinController: transition");
        Some(PinTransition {
            from,
            to: next,
            direction,
            reset,
        })
    }

    /// Translation (along the scroll axis) that keeps the section in place while pinned:
    /// 0 before the range, `scroll - start` inside it, the full range after it.
    pub fn pin_offset(&self, scroll: u64, geometry: PinGeometry) -> u64 {
        match self.state {
            PinState::PrePin => 0,
            PinState::Pinned => scroll.clamp(geometry.start, geometry.end) - geometry.start,
            PinState::PostPin => geometry.distance(),
        }
    }
}
