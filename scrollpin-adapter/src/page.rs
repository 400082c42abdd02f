use alloc::vec::Vec;

use scrollpin::{
    ConfigError, PinGeometry, PinState, PropertyWrite, Section, SectionOptions, TargetId,
    TargetKey, Timeline, Viewport,
};

use crate::{Navigator, NavigatorOptions, Reveal, RevealOptions};

/// Default culling distance, in viewport heights.
pub const DEFAULT_CULL_MARGIN: f32 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageOptions {
    /// Pinned sections whose range lies further than this many viewport heights from the scroll
    /// offset are not evaluated. Their progress and pin state keep updating.
    pub cull_margin: f32,
    pub navigator: NavigatorOptions,
}

impl PageOptions {
    pub fn new() -> Self {
        Self {
            cull_margin: DEFAULT_CULL_MARGIN,
            navigator: NavigatorOptions::default(),
        }
    }

    pub fn with_cull_margin(mut self, cull_margin: f32) -> Self {
        self.cull_margin = cull_margin;
        self
    }

    pub fn with_navigator(mut self, navigator: NavigatorOptions) -> Self {
        self.navigator = navigator;
        self
    }
}

impl Default for PageOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifies a section registered on a [`Page`].
///
/// Handles are never reused: after [`Page::dispose`] the handle stays stale forever.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionHandle(u32);

impl SectionHandle {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
enum Slot<K> {
    Pinned(Section<K>),
    Reveal(Reveal<K>),
    Disposed,
}

/// One section's output for a frame, handed to the [`Page::render`] sink.
#[derive(Debug)]
pub struct SectionRender<'a, K> {
    pub handle: SectionHandle,
    /// `None` for reveals.
    pub pin: Option<PinState>,
    pub pin_offset: u64,
    /// The leave-back reset frame: `writes` holds the entrance-start snapshot.
    pub reset: bool,
    pub writes: &'a [PropertyWrite<K>],
}

/// Every animated section of one scroll container, plus the navigation scroller.
///
/// The page fans scroll, resize and frame ticks out to its sections. During a programmatic
/// scroll the navigator's offset is applied before any section reads scroll in the same tick.
#[derive(Clone, Debug)]
pub struct Page<K = TargetId> {
    options: PageOptions,
    slots: Vec<Slot<K>>,
    navigator: Navigator,
    viewport: Viewport,
    scroll: u64,
    now_ms: u64,
    scratch: Vec<PropertyWrite<K>>,
}

impl<K: TargetKey> Default for Page<K> {
    fn default() -> Self {
        Self::new(PageOptions::default())
    }
}

impl<K: TargetKey> Page<K> {
    pub fn new(options: PageOptions) -> Self {
        Self {
            navigator: Navigator::new(options.navigator),
            options,
            slots: Vec::new(),
            viewport: Viewport::default(),
            scroll: 0,
            now_ms: 0,
            scratch: Vec::new(),
        }
    }

    pub fn options(&self) -> PageOptions {
        self.options
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Number of live (not disposed) sections.
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| !matches!(s, Slot::Disposed))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registers a pinned section.
    ///
    /// Fails without registering anything if `options` are invalid. The section immediately
    /// observes the page's current viewport and scroll offset.
    pub fn construct(
        &mut self,
        options: SectionOptions,
        timeline: Timeline<K>,
    ) -> Result<SectionHandle, ConfigError> {
        let mut section = Section::new(options, timeline)?;
        section.apply_scroll_frame(self.viewport, self.scroll, self.now_ms);
        Ok(self.push(Slot::Pinned(section)))
    }

    /// Registers a time-driven reveal.
    pub fn construct_reveal(
        &mut self,
        options: RevealOptions,
        timeline: Timeline<K>,
    ) -> Result<SectionHandle, ConfigError> {
        let mut reveal = Reveal::new(options, timeline)?;
        reveal.on_resize(self.viewport);
        reveal.on_scroll(self.scroll, self.now_ms);
        Ok(self.push(Slot::Reveal(reveal)))
    }

    fn push(&mut self, slot: Slot<K>) -> SectionHandle {
        let handle = SectionHandle(self.slots.len() as u32);
        adebug!(handle = handle.0, "Page: section registered");
        self.slots.push(slot);
        handle
    }

    /// Tears a section down and releases its timeline.
    ///
    /// Idempotent: returns `false` for stale or unknown handles.
    pub fn dispose(&mut self, handle: SectionHandle) -> bool {
        let Some(slot) = self.slots.get_mut(handle.index()) else {
            return false;
        };
        match slot {
            Slot::Pinned(s) => s.dispose(),
            Slot::Reveal(r) => r.dispose(),
            Slot::Disposed => return false,
        }
        *slot = Slot::Disposed;
        adebug!(handle = handle.0, "Page: section disposed");
        true
    }

    pub fn section(&self, handle: SectionHandle) -> Option<&Section<K>> {
        match self.slots.get(handle.index())? {
            Slot::Pinned(s) => Some(s),
            _ => None,
        }
    }

    pub fn reveal(&self, handle: SectionHandle) -> Option<&Reveal<K>> {
        match self.slots.get(handle.index())? {
            Slot::Reveal(r) => Some(r),
            _ => None,
        }
    }

    /// True progress of a pinned section, or playback position of a reveal.
    pub fn current_progress(&self, handle: SectionHandle) -> Option<f32> {
        match self.slots.get(handle.index())? {
            Slot::Pinned(s) => Some(s.progress()),
            Slot::Reveal(r) => Some(r.position()),
            Slot::Disposed => None,
        }
    }

    /// Call this when the UI reports a user scroll. Cancels any navigation tween.
    pub fn on_scroll(&mut self, scroll: u64, now_ms: u64) {
        self.navigator.on_scroll(scroll);
        self.apply_scroll(scroll, now_ms);
    }

    fn apply_scroll(&mut self, scroll: u64, now_ms: u64) {
        self.scroll = scroll;
        self.now_ms = now_ms;
        for slot in &mut self.slots {
            match slot {
                Slot::Pinned(s) => {
                    s.on_scroll(scroll, now_ms);
                }
                Slot::Reveal(r) => {
                    r.on_scroll(scroll, now_ms);
                }
                Slot::Disposed => {}
            }
        }
    }

    pub fn on_resize(&mut self, viewport: Viewport, now_ms: u64) {
        self.viewport = viewport;
        self.now_ms = now_ms;
        let scroll = self.scroll;
        for slot in &mut self.slots {
            match slot {
                Slot::Pinned(s) => {
                    s.on_resize(viewport, now_ms);
                }
                Slot::Reveal(r) => {
                    r.on_resize(viewport);
                    r.on_scroll(scroll, now_ms);
                }
                Slot::Disposed => {}
            }
        }
    }

    /// Starts a smooth scroll to the `index`-th live section, in registration order.
    ///
    /// Returns the target offset, or `None` if there is no such section or it is not mounted.
    pub fn scroll_to_section(&mut self, index: usize, now_ms: u64) -> Option<u64> {
        let top = self
            .slots
            .iter()
            .filter(|s| !matches!(s, Slot::Disposed))
            .nth(index)
            .and_then(|slot| match slot {
                Slot::Pinned(s) => s.options().locator.locate(),
                Slot::Reveal(r) => r.options().trigger.as_ref()?.locate(),
                Slot::Disposed => None,
            })?;
        Some(self.navigator.scroll_to_offset(top, now_ms))
    }

    /// `true` while a navigation tween, smoothing or a reveal is in flight.
    pub fn needs_tick(&self) -> bool {
        self.navigator.is_animating()
            || self.slots.iter().any(|slot| match slot {
                Slot::Pinned(s) => s.needs_tick(),
                Slot::Reveal(r) => r.needs_tick(),
                Slot::Disposed => false,
            })
    }

    /// Advances navigation, smoothing and reveals.
    ///
    /// Returns the scroll offset the host must write to the scroll container, if navigating.
    pub fn tick(&mut self, now_ms: u64) -> Option<u64> {
        let written = self.navigator.tick(now_ms);
        match written {
            Some(offset) => self.apply_scroll(offset, now_ms),
            None => self.now_ms = now_ms,
        }
        for slot in &mut self.slots {
            match slot {
                Slot::Pinned(s) if s.needs_tick() => {
                    s.tick(now_ms);
                }
                Slot::Reveal(r) if r.needs_tick() => {
                    r.tick(now_ms);
                }
                _ => {}
            }
        }
        written
    }

    /// Renders every live section that is not culled, in registration order.
    pub fn render(
        &mut self,
        mut is_present: impl FnMut(&K) -> bool,
        mut sink: impl FnMut(SectionRender<'_, K>),
    ) {
        let margin = self.options.cull_margin;
        let (scroll, height) = (self.scroll, self.viewport.height);
        let mut scratch = core::mem::take(&mut self.scratch);

        for (i, slot) in self.slots.iter_mut().enumerate() {
            let handle = SectionHandle(i as u32);
            match slot {
                Slot::Pinned(s) => {
                    if is_far(s.geometry(), scroll, height, margin) {
                        atrace!(handle = i, "Page: culled");
                        continue;
                    }
                    let reset = s.render_into(&mut is_present, &mut scratch);
                    sink(SectionRender {
                        handle,
                        pin: Some(s.pin_state()),
                        pin_offset: s.pin_offset(),
                        reset,
                        writes: &scratch,
                    });
                }
                Slot::Reveal(r) => {
                    r.render_into(&mut is_present, &mut scratch);
                    sink(SectionRender {
                        handle,
                        pin: None,
                        pin_offset: 0,
                        reset: false,
                        writes: &scratch,
                    });
                }
                Slot::Disposed => {}
            }
        }
        self.scratch = scratch;
    }

    /// Disposes every section.
    pub fn clear(&mut self) {
        for i in 0..self.slots.len() {
            self.dispose(SectionHandle(i as u32));
        }
        self.navigator.cancel_animation();
    }
}

fn is_far(geometry: Option<PinGeometry>, scroll: u64, viewport_height: u32, margin: f32) -> bool {
    let Some(g) = geometry else {
        return false;
    };
    let reach = (margin.max(0.0) * viewport_height as f32) as u64;
    let distance = if scroll < g.start {
        g.start - scroll
    } else {
        scroll.saturating_sub(g.end)
    };
    distance > reach
}
