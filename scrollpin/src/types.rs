/// Viewport geometry in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// An animatable property of a target.
///
/// `Custom` is an adapter-defined slot for anything the renderer maps itself (e.g. a CSS
/// variable or a shader uniform).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Property {
    X,
    Y,
    Scale,
    ScaleX,
    ScaleY,
    Rotate,
    Opacity,
    Custom(u16),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    /// Unitless (opacity, scale, degrees).
    #[default]
    Num,
    Px,
    /// Percent of the viewport width.
    Vw,
    /// Percent of the viewport height.
    Vh,
}

/// A property value, resolved against the viewport when a frame is evaluated.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Length {
    pub value: f32,
    pub unit: Unit,
}

impl Length {
    pub const ZERO: Length = Length::num(0.0);

    pub const fn num(value: f32) -> Self {
        Self {
            value,
            unit: Unit::Num,
        }
    }

    pub const fn px(value: f32) -> Self {
        Self {
            value,
            unit: Unit::Px,
        }
    }

    pub const fn vw(value: f32) -> Self {
        Self {
            value,
            unit: Unit::Vw,
        }
    }

    pub const fn vh(value: f32) -> Self {
        Self {
            value,
            unit: Unit::Vh,
        }
    }

    pub fn resolve(&self, viewport: Viewport) -> f32 {
        match self.unit {
            Unit::Num | Unit::Px => self.value,
            Unit::Vw => self.value * viewport.width as f32 / 100.0,
            Unit::Vh => self.value * viewport.height as f32 / 100.0,
        }
    }
}

impl From<f32> for Length {
    fn from(value: f32) -> Self {
        Self::num(value)
    }
}

/// A normalized window `[start, end]` inside a timeline's `[0, 1]` space.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub start: f32,
    pub end: f32,
}

impl Window {
    pub const FULL: Window = Window::new(0.0, 1.0);

    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> f32 {
        self.end - self.start
    }

    /// `true` for a window that collapsed to a point (e.g. a clipped stagger item).
    pub fn is_degenerate(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, progress: f32) -> bool {
        progress >= self.start && progress <= self.end
    }

    /// Shifts both bounds by `delta`, clamping each to `[0, 1]` independently.
    pub fn shifted_clamped(&self, delta: f32) -> Self {
        Self {
            start: (self.start + delta).clamp(0.0, 1.0),
            end: (self.end + delta).clamp(0.0, 1.0),
        }
    }

    /// Maps timeline progress to local progress in `[0, 1]`.
    ///
    /// A degenerate window is a step: 0 before `start`, 1 from `start` on.
    pub fn local(&self, progress: f32) -> f32 {
        if self.is_degenerate() {
            return if progress < self.start { 0.0 } else { 1.0 };
        }
        ((progress - self.start) / self.len()).clamp(0.0, 1.0)
    }
}

/// One output value of a frame: the renderer applies it to `target` as-is.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyWrite<K> {
    pub target: K,
    pub property: Property,
    /// Resolved value (pixels for lengths, unitless otherwise).
    pub value: f32,
}
