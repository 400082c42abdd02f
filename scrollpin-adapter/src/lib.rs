//! Adapter utilities for the `scrollpin` crate.
//!
//! The `scrollpin` crate is UI-agnostic and focuses on the timeline math and per-section state.
//! This crate provides small, framework-neutral helpers a page typically needs on top:
//!
//! - A [`Page`] registry that fans scroll/resize/tick out to every section and skips evaluating
//!   sections far outside the viewport
//! - A [`Navigator`] for smooth, time-bounded scrolling to a section
//! - [`Reveal`]: timelines played over wall-clock time when a trigger line is crossed
//!
//! This crate is intentionally framework-agnostic (no DOM/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod navigator;
mod page;
mod reveal;
mod tween;


pub use navigator::{DEFAULT_NAVIGATION_MS, Navigator, NavigatorOptions};
pub use page::{DEFAULT_CULL_MARGIN, Page, PageOptions, SectionHandle, SectionRender};
pub use reveal::{DEFAULT_REVEAL_ANCHOR, DEFAULT_REVEAL_MS, Reveal, RevealOptions};
pub use tween::Tween;
