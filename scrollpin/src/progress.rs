use crate::{SectionLocator, SectionOptions, Viewport};

/// Scroll range `[start, end]` during which a section is pinned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinGeometry {
    pub start: u64,
    pub end: u64,
}

impl PinGeometry {
    /// Derives the pinned range of a section whose top edge sits at `top`.
    ///
    /// The range starts when `top` reaches `start_anchor * viewport_height` below the viewport's
    /// top edge and lasts `end_offset_multiplier * viewport_height` (at least 1px).
    pub fn derive(top: u64, viewport_height: u32, start_anchor: f32, end_offset_multiplier: f32) -> Self {
        let vh = viewport_height as f32;
        let start = top.saturating_sub(round_px(start_anchor * vh));
        let distance = round_px(end_offset_multiplier * vh).max(1);
        Self {
            start,
            end: start.saturating_add(distance),
        }
    }

    /// Scroll distance covered while pinned (the spacer a renderer reserves in the flow).
    pub fn distance(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn progress_at(&self, scroll: u64) -> f32 {
        let distance = self.distance();
        if distance == 0 {
            return if scroll < self.start { 0.0 } else { 1.0 };
        }
        let p = (scroll as f64 - self.start as f64) / distance as f64;
        p.clamp(0.0, 1.0) as f32
    }

    /// Scroll offset at which progress equals `progress`.
    pub fn offset_at(&self, progress: f32) -> u64 {
        let p = progress.clamp(0.0, 1.0) as f64;
        self.start + (self.distance() as f64 * p + 0.5) as u64
    }
}

fn round_px(v: f32) -> u64 {
    if v <= 0.0 { 0 } else { (v + 0.5) as u64 }
}

/// Maps scroll input to a section's progress in `[0, 1]`.
///
/// Geometry is cached and re-derived lazily: after [`ProgressSource::invalidate`], after a
/// viewport height change, or while the section could not be located. Smoothing is not applied
/// here; this is the true, instantaneous progress.
#[derive(Clone, Debug)]
pub struct ProgressSource {
    locator: SectionLocator,
    start_anchor: f32,
    end_offset_multiplier: f32,
    geometry: Option<PinGeometry>,
    geometry_height: u32,
    progress: f32,
    detached: bool,
}

impl ProgressSource {
    pub fn new(options: &SectionOptions) -> Self {
        Self {
            locator: options.locator.clone(),
            start_anchor: options.start_anchor,
            end_offset_multiplier: options.end_offset_multiplier,
            geometry: None,
            geometry_height: 0,
            progress: 0.0,
            detached: false,
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn geometry(&self) -> Option<PinGeometry> {
        self.geometry
    }

    /// Drops cached geometry (layout changed); it is re-derived on the next update.
    pub fn invalidate(&mut self) {
        self.geometry = None;
    }

    /// Stops tracking: every later update returns the last known progress.
    pub fn detach(&mut self) {
        self.detached = true;
        self.geometry = None;
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// Recomputes progress for `scroll`.
    ///
    /// Returns the last known progress unchanged when detached or when the section element
    /// cannot be located.
    pub fn update(&mut self, scroll: u64, viewport: Viewport) -> f32 {
        if self.detached {
            return self.progress;
        }
        let Some(geometry) = self.ensure_geometry(viewport) else {
            return self.progress;
        };
        self.progress = geometry.progress_at(scroll);
        self.progress
    }

    fn ensure_geometry(&mut self, viewport: Viewport) -> Option<PinGeometry> {
        if let Some(g) = self.geometry {
            if self.geometry_height == viewport.height {
                return Some(g);
            }
        }
        let Some(top) = self.locator.locate() else {
            pdebug!("ProgressSource: section not located; holding progress");
            self.geometry = None;
            return None;
        };
        let g = PinGeometry::derive(
            top,
            viewport.height,
            self.start_anchor,
            self.end_offset_multiplier,
        );
        ptrace!(top, start = g.start, end = g.end, "ProgressSource: geometry derived");
        self.geometry = Some(g);
        self.geometry_height = viewport.height;
        Some(g)
    }
}
