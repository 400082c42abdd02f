use alloc::string::ToString;
use core::str::FromStr;

use crate::ConfigError;

const BACK_OVERSHOOT: f32 = 1.70158;

/// Easing curves, named after the GSAP vocabulary (`"power2.out"`, `"none"`, ...).
///
/// Every curve is polynomial and maps `0 -> 0` and `1 -> 1`. `PowerN` is `t^(N+1)`, so
/// `Power2In` is cubic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    #[default]
    Linear,
    Power1In,
    Power1Out,
    Power1InOut,
    Power2In,
    Power2Out,
    Power2InOut,
    Power3In,
    Power3Out,
    Power3InOut,
    Power4In,
    Power4Out,
    Power4InOut,
    SmoothStep,
    EaseInOutCubic,
    BackIn,
    BackOut,
    BackInOut,
}

fn pow(t: f32, n: u32) -> f32 {
    let mut v = 1.0;
    for _ in 0..n {
        v *= t;
    }
    v
}

fn ease_in(t: f32, n: u32) -> f32 {
    pow(t, n)
}

fn ease_out(t: f32, n: u32) -> f32 {
    1.0 - pow(1.0 - t, n)
}

fn ease_in_out(t: f32, n: u32) -> f32 {
    if t < 0.5 {
        ease_in(t * 2.0, n) / 2.0
    } else {
        1.0 - ease_in((1.0 - t) * 2.0, n) / 2.0
    }
}

fn back_in(t: f32) -> f32 {
    t * t * ((BACK_OVERSHOOT + 1.0) * t - BACK_OVERSHOOT)
}

impl Easing {
    /// Samples the curve at `t` (clamped to `[0, 1]`).
    pub fn sample(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Power1In => ease_in(t, 2),
            Self::Power1Out => ease_out(t, 2),
            Self::Power1InOut => ease_in_out(t, 2),
            Self::Power2In => ease_in(t, 3),
            Self::Power2Out => ease_out(t, 3),
            Self::Power2InOut => ease_in_out(t, 3),
            Self::Power3In => ease_in(t, 4),
            Self::Power3Out => ease_out(t, 4),
            Self::Power3InOut => ease_in_out(t, 4),
            Self::Power4In => ease_in(t, 5),
            Self::Power4Out => ease_out(t, 5),
            Self::Power4InOut => ease_in_out(t, 5),
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - (u * u * u) / 2.0
                }
            }
            Self::BackIn => back_in(t),
            Self::BackOut => 1.0 - back_in(1.0 - t),
            Self::BackInOut => {
                if t < 0.5 {
                    back_in(t * 2.0) / 2.0
                } else {
                    1.0 - back_in((1.0 - t) * 2.0) / 2.0
                }
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "none",
            Self::Power1In => "power1.in",
            Self::Power1Out => "power1.out",
            Self::Power1InOut => "power1.inOut",
            Self::Power2In => "power2.in",
            Self::Power2Out => "power2.out",
            Self::Power2InOut => "power2.inOut",
            Self::Power3In => "power3.in",
            Self::Power3Out => "power3.out",
            Self::Power3InOut => "power3.inOut",
            Self::Power4In => "power4.in",
            Self::Power4Out => "power4.out",
            Self::Power4InOut => "power4.inOut",
            Self::SmoothStep => "smoothstep",
            Self::EaseInOutCubic => "cubic.inOut",
            Self::BackIn => "back.in",
            Self::BackOut => "back.out",
            Self::BackInOut => "back.inOut",
        }
    }
}

impl FromStr for Easing {
    type Err = ConfigError;

    /// Parses GSAP-style names. A bare `"powerN"` is `powerN.out`, as in GSAP.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let easing = match s {
            "none" | "linear" => Self::Linear,
            "power1.in" | "quad.in" => Self::Power1In,
            "power1" | "power1.out" | "quad.out" => Self::Power1Out,
            "power1.inOut" | "quad.inOut" => Self::Power1InOut,
            "power2.in" | "cubic.in" => Self::Power2In,
            "power2" | "power2.out" | "cubic.out" => Self::Power2Out,
            "power2.inOut" => Self::Power2InOut,
            "power3.in" | "quart.in" => Self::Power3In,
            "power3" | "power3.out" | "quart.out" => Self::Power3Out,
            "power3.inOut" | "quart.inOut" => Self::Power3InOut,
            "power4.in" | "quint.in" => Self::Power4In,
            "power4" | "power4.out" | "quint.out" => Self::Power4Out,
            "power4.inOut" | "quint.inOut" => Self::Power4InOut,
            "smoothstep" => Self::SmoothStep,
            "cubic.inOut" => Self::EaseInOutCubic,
            "back.in" => Self::BackIn,
            "back" | "back.out" => Self::BackOut,
            "back.inOut" => Self::BackInOut,
            other => return Err(ConfigError::UnknownEasing(other.to_string())),
        };
        Ok(easing)
    }
}
