use alloc::vec::Vec;

use crate::{ConfigError, Easing, Length, Property, Viewport, Window};

/// A value snapshot at a local progress point of a [`Track`].
///
/// `easing` shapes the segment that leaves this keyframe towards the next one; it is ignored on
/// the last keyframe.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Keyframe {
    pub at: f32,
    pub values: Vec<(Property, Length)>,
    pub easing: Easing,
}

impl Keyframe {
    pub fn new(at: f32, values: impl IntoIterator<Item = (Property, Length)>) -> Self {
        Self {
            at,
            values: values.into_iter().collect(),
            easing: Easing::Linear,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    fn value_of(&self, property: Property) -> Option<Length> {
        self.values
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| *v)
    }
}

/// One target's keyframed motion inside a timeline window.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track<K> {
    pub target: K,
    pub keyframes: Vec<Keyframe>,
    pub window: Window,
}

impl<K> Track<K> {
    pub fn new(target: K, window: Window, keyframes: Vec<Keyframe>) -> Self {
        Self {
            target,
            keyframes,
            window,
        }
    }

    /// A two-keyframe track (`from -> to`), the shape of every motion in a typical section.
    pub fn from_to(
        target: K,
        window: Window,
        from: impl IntoIterator<Item = (Property, Length)>,
        to: impl IntoIterator<Item = (Property, Length)>,
        easing: Easing,
    ) -> Self {
        Self::new(
            target,
            window,
            alloc::vec![
                Keyframe::new(0.0, from).with_easing(easing),
                Keyframe::new(1.0, to),
            ],
        )
    }

    pub fn with_window(mut self, window: Window) -> Self {
        self.window = window;
        self
    }

    /// Properties animated by this track, in keyframe-0 order.
    pub fn properties(&self) -> impl Iterator<Item = Property> + '_ {
        self.keyframes
            .first()
            .into_iter()
            .flat_map(|k| k.values.iter().map(|(p, _)| *p))
    }

    /// Checks the keyframe invariants and the window.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_window(self.window)?;
        self.validate_keyframes()
    }

    /// Like [`Track::validate`], but accepts a degenerate window inside `[0, 1]`.
    ///
    /// Stagger expansion may clip an item's window to a point; such tracks are valid and always
    /// hold one of their boundary values.
    pub(crate) fn validate_expanded(&self) -> Result<(), ConfigError> {
        let w = self.window;
        if !(0.0..=1.0).contains(&w.start) || !(0.0..=1.0).contains(&w.end) || w.end < w.start {
            return Err(ConfigError::InvalidWindow { window: w });
        }
        self.validate_keyframes()
    }

    fn validate_keyframes(&self) -> Result<(), ConfigError> {
        let count = self.keyframes.len();
        if count < 2 {
            return Err(ConfigError::TooFewKeyframes { count });
        }
        let first = &self.keyframes[0];
        for (index, k) in self.keyframes.iter().enumerate() {
            if !(0.0..=1.0).contains(&k.at) {
                return Err(ConfigError::KeyframeOutOfRange { index, at: k.at });
            }
            for (i, (property, _)) in k.values.iter().enumerate() {
                if k.values[..i].iter().any(|(p, _)| p == property) {
                    return Err(ConfigError::DuplicateProperty {
                        index,
                        property: *property,
                    });
                }
            }
            if index > 0 {
                if k.at <= self.keyframes[index - 1].at {
                    return Err(ConfigError::NonIncreasingKeyframes { index });
                }
                let same_props = k.values.len() == first.values.len()
                    && first.values.iter().all(|(p, _)| k.value_of(*p).is_some());
                if !same_props {
                    return Err(ConfigError::KeyframePropertyMismatch { index });
                }
            }
        }
        Ok(())
    }

    /// Samples `property` at timeline `progress`.
    ///
    /// Outside the window the track holds its boundary keyframe (clamped, never extrapolated).
    pub fn sample(&self, property: Property, progress: f32, viewport: Viewport) -> Option<f32> {
        let local = self.window.local(progress);
        self.sample_local(property, local, viewport)
    }

    pub(crate) fn sample_local(
        &self,
        property: Property,
        local: f32,
        viewport: Viewport,
    ) -> Option<f32> {
        let (a, b) = self.bracket(local)?;
        let from = a.value_of(property)?.resolve(viewport);
        let to = b.value_of(property)?.resolve(viewport);
        if local <= a.at {
            return Some(from);
        }
        if local >= b.at {
            return Some(to);
        }
        let t = (local - a.at) / (b.at - a.at);
        let eased = a.easing.sample(t);
        Some(from + (to - from) * eased)
    }

    fn bracket(&self, local: f32) -> Option<(&Keyframe, &Keyframe)> {
        let n = self.keyframes.len();
        if n < 2 {
            return None;
        }
        // First segment whose end keyframe reaches `local`; clamps to the last segment.
        let seg = self.keyframes[1..]
            .iter()
            .position(|k| local <= k.at)
            .unwrap_or(n - 2);
        Some((&self.keyframes[seg], &self.keyframes[seg + 1]))
    }
}

pub(crate) fn validate_window(window: Window) -> Result<(), ConfigError> {
    let in_range = (0.0..=1.0).contains(&window.start) && (0.0..=1.0).contains(&window.end);
    if !in_range || window.start >= window.end {
        return Err(ConfigError::InvalidWindow { window });
    }
    Ok(())
}
