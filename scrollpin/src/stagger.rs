use alloc::vec::Vec;

use crate::{ConfigError, Track, Window};

/// Windows of a staggered collection: item `i` is `window` shifted by `i * per_item_offset`.
///
/// Each bound is clamped to `[0, 1]` independently. Items pushed past the end are clipped
/// (possibly down to a point), never rejected and never wrapped.
pub fn stagger_windows(
    window: Window,
    count: usize,
    per_item_offset: f32,
) -> impl Iterator<Item = Window> {
    (0..count).map(move |i| window.shifted_clamped(i as f32 * per_item_offset))
}

/// Expands a template into `count` tracks on the template's own target, ordered by index.
pub fn expand<K: Clone>(template: &Track<K>, count: usize, per_item_offset: f32) -> Vec<Track<K>> {
    stagger_windows(template.window, count, per_item_offset)
        .map(|window| template.clone().with_window(window))
        .collect()
}

/// A homogeneous collection (a card grid, a row of tiles) animated by one template.
///
/// The caller supplies the ordered targets up front; the planner never discovers them.
#[derive(Clone, Debug, PartialEq)]
pub struct StaggerPlan<K> {
    pub template: Track<K>,
    pub targets: Vec<K>,
    pub per_item_offset: f32,
}

impl<K: Clone> StaggerPlan<K> {
    /// `template.target` is ignored; item `i` animates `targets[i]`.
    pub fn new(template: Track<K>, targets: impl IntoIterator<Item = K>, per_item_offset: f32) -> Self {
        Self {
            template,
            targets: targets.into_iter().collect(),
            per_item_offset,
        }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.per_item_offset.is_finite() || self.per_item_offset < 0.0 {
            return Err(ConfigError::InvalidStaggerOffset(self.per_item_offset));
        }
        self.template.validate()
    }

    /// One track per target, ordered by index ascending.
    pub fn expand(&self) -> Vec<Track<K>> {
        stagger_windows(self.template.window, self.targets.len(), self.per_item_offset)
            .zip(self.targets.iter())
            .map(|(window, target)| Track {
                target: target.clone(),
                keyframes: self.template.keyframes.clone(),
                window,
            })
            .collect()
    }
}
