use crate::{Property, Window};

/// A malformed section binding or timeline, reported at construction time.
///
/// Nothing is registered when construction fails.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("track needs at least 2 keyframes, got {count}")]
    TooFewKeyframes { count: usize },

    #[error("keyframe {index} does not strictly follow the previous one")]
    NonIncreasingKeyframes { index: usize },

    #[error("keyframe {index} has local progress {at} outside [0, 1]")]
    KeyframeOutOfRange { index: usize, at: f32 },

    #[error("keyframe {index} animates a different property set than keyframe 0")]
    KeyframePropertyMismatch { index: usize },

    #[error("keyframe {index} lists {property:?} more than once")]
    DuplicateProperty { index: usize, property: Property },

    #[error("window [{}, {}] is empty or outside [0, 1]", .window.start, .window.end)]
    InvalidWindow { window: Window },

    #[error("end offset multiplier must be finite and > 0, got {0}")]
    NonPositiveEndOffset(f32),

    #[error("scrub factor must be in [0, 1], got {0}")]
    ScrubOutOfRange(f32),

    #[error("start anchor must be in [0, 1], got {0}")]
    StartAnchorOutOfRange(f32),

    #[error("stagger offset must be finite and >= 0, got {0}")]
    InvalidStaggerOffset(f32),

    #[error("unknown easing `{0}`")]
    UnknownEasing(alloc::string::String),
}
