//! A headless engine for scroll-pinned, scrubbed animation timelines.
//!
//! For page-level utilities (section registry, navigation tweens, time-driven reveals), see the
//! `scrollpin-adapter` crate.
//!
//! A pinned section holds still while the user scrolls through an extra virtual distance. This
//! crate maps that scroll position to a progress value in `[0, 1]`, tracks the pin state
//! (including the instant reset when the user scrolls back above the section), smooths the
//! displayed progress, and evaluates a timeline of keyframed tracks into property writes.
//!
//! It is UI-agnostic. A DOM/GUI layer is expected to provide:
//! - viewport size
//! - scroll offset
//! - each section's top offset (or a locator that may report "not mounted")
//!
//! and to apply the `(target, property, value)` writes of each frame.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod easing;
mod error;
mod evaluator;
mod key;
mod options;
mod pin;
mod progress;
mod scrub;
mod section;
mod stagger;
mod timeline;
mod track;
mod types;

#[cfg(test)]
mod tests;

pub use easing::Easing;
pub use error::ConfigError;
pub use key::TargetKey;
pub use options::{
    DEFAULT_END_OFFSET_MULTIPLIER, DEFAULT_SCRUB, Phase, Phases, SectionLocator, SectionOptions,
};
pub use pin::{PinController, PinState, PinTransition};
pub use progress::{PinGeometry, ProgressSource};
pub use scrub::{SCRUB_MAX_LAG_MS, Scrub};
pub use section::{Frame, Section, SectionUpdate};
pub use stagger::{StaggerPlan, expand, stagger_windows};
pub use timeline::{Timeline, TimelineBuilder};
pub use track::{Keyframe, Track};
pub use types::{Length, Property, PropertyWrite, ScrollDirection, Unit, Viewport, Window};

/// Default target identity.
pub type TargetId = u64;
