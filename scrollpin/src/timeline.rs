use alloc::vec::Vec;

use crate::key::{ChannelMap, TargetKey};
use crate::{
    ConfigError, Easing, Length, Phase, Phases, Property, StaggerPlan, TargetId, Track, Window,
};

/// A (target, property) pair and the tracks that write it, in declaration order.
#[derive(Clone, Debug)]
pub(crate) struct Channel<K> {
    pub(crate) target: K,
    pub(crate) property: Property,
    pub(crate) tracks: Vec<usize>,
    /// Value at progress 0 (the entrance-start snapshot), kept unresolved.
    pub(crate) entrance: Length,
}

/// An ordered, progress-addressed set of tracks.
///
/// A timeline is immutable once built: tracks (including expanded stagger items) are owned
/// exclusively and released together when the timeline is dropped. Evaluation is a pure function
/// of progress; see [`Timeline::for_each_write`].
#[derive(Clone, Debug)]
pub struct Timeline<K = TargetId> {
    pub(crate) tracks: Vec<Track<K>>,
    pub(crate) channels: Vec<Channel<K>>,
}

impl<K: TargetKey> Timeline<K> {
    pub fn builder() -> TimelineBuilder<K> {
        TimelineBuilder::new()
    }

    /// Builds a timeline from tracks in declaration order.
    pub fn from_tracks(tracks: impl IntoIterator<Item = Track<K>>) -> Result<Self, ConfigError> {
        let mut b = TimelineBuilder::new();
        for t in tracks {
            b = b.track(t);
        }
        b.build()
    }

    pub fn tracks(&self) -> &[Track<K>] {
        &self.tracks
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    fn assemble(tracks: Vec<Track<K>>) -> Self {
        let mut index = ChannelMap::<K>::new();
        let mut channels: Vec<Channel<K>> = Vec::new();
        for (ti, track) in tracks.iter().enumerate() {
            for property in track.properties() {
                let key = (track.target.clone(), property);
                let ci = *index.entry(key).or_insert_with(|| {
                    channels.push(Channel {
                        target: track.target.clone(),
                        property,
                        tracks: Vec::new(),
                        entrance: Length::ZERO,
                    });
                    channels.len() - 1
                });
                channels[ci].tracks.push(ti);
            }
        }

        let mut timeline = Self { tracks, channels };
        for ci in 0..timeline.channels.len() {
            let entrance = timeline.boundary_value(&timeline.channels[ci], 0.0);
            timeline.channels[ci].entrance = entrance;
        }
        timeline
    }

    /// Keyframe value the channel holds at `progress`, for progress points where the resolved
    /// track sits on a keyframe boundary (0 and 1 always do).
    fn boundary_value(&self, channel: &Channel<K>, progress: f32) -> Length {
        let Some(ti) = self.resolve(channel, progress) else {
            return Length::ZERO;
        };
        let track = &self.tracks[ti];
        let local = track.window.local(progress);
        let keyframe = if local <= 0.0 {
            track.keyframes.first()
        } else {
            track.keyframes.last()
        };
        keyframe
            .and_then(|k| k.values.iter().find(|(p, _)| *p == channel.property))
            .map(|(_, v)| *v)
            .unwrap_or(Length::ZERO)
    }
}

enum Entry<K> {
    Track(Track<K>),
    Stagger(StaggerPlan<K>),
}

/// Declares tracks and stagger plans; declaration order is the conflict tie-break.
pub struct TimelineBuilder<K = TargetId> {
    phases: Phases,
    entries: Vec<Entry<K>>,
}

impl<K: TargetKey> Default for TimelineBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: TargetKey> TimelineBuilder<K> {
    pub fn new() -> Self {
        Self {
            phases: Phases::default(),
            entries: Vec::new(),
        }
    }

    /// Phase windows used by [`TimelineBuilder::in_phase`] and friends.
    pub fn with_phases(mut self, phases: Phases) -> Self {
        self.phases = phases;
        self
    }

    pub fn phases(&self) -> Phases {
        self.phases
    }

    pub fn track(mut self, track: Track<K>) -> Self {
        self.entries.push(Entry::Track(track));
        self
    }

    pub fn stagger(mut self, plan: StaggerPlan<K>) -> Self {
        self.entries.push(Entry::Stagger(plan));
        self
    }

    pub fn from_to(
        self,
        target: K,
        window: Window,
        from: impl IntoIterator<Item = (Property, Length)>,
        to: impl IntoIterator<Item = (Property, Length)>,
        easing: Easing,
    ) -> Self {
        self.track(Track::from_to(target, window, from, to, easing))
    }

    /// A `from -> to` track spanning `phase`, starting `delay` later (the end is kept).
    pub fn in_phase(
        self,
        phase: Phase,
        delay: f32,
        target: K,
        from: impl IntoIterator<Item = (Property, Length)>,
        to: impl IntoIterator<Item = (Property, Length)>,
        easing: Easing,
    ) -> Self {
        let w = self.phases.window(phase);
        let window = Window::new((w.start + delay).min(w.end), w.end);
        self.from_to(target, window, from, to, easing)
    }

    pub fn entrance(
        self,
        target: K,
        from: impl IntoIterator<Item = (Property, Length)>,
        to: impl IntoIterator<Item = (Property, Length)>,
        easing: Easing,
    ) -> Self {
        self.in_phase(Phase::Entrance, 0.0, target, from, to, easing)
    }

    pub fn exit(
        self,
        target: K,
        from: impl IntoIterator<Item = (Property, Length)>,
        to: impl IntoIterator<Item = (Property, Length)>,
        easing: Easing,
    ) -> Self {
        self.in_phase(Phase::Exit, 0.0, target, from, to, easing)
    }

    /// Validates every entry, expands stagger plans in place and indexes channels.
    ///
    /// Fails on the first malformed entry; nothing is built in that case.
    pub fn build(self) -> Result<Timeline<K>, ConfigError> {
        self.phases.validate()?;
        let mut tracks = Vec::new();
        for entry in self.entries {
            match entry {
                Entry::Track(track) => {
                    track.validate()?;
                    tracks.push(track);
                }
                Entry::Stagger(plan) => {
                    plan.validate()?;
                    for track in plan.expand() {
                        track.validate_expanded()?;
                        tracks.push(track);
                    }
                }
            }
        }
        pdebug!(tracks = tracks.len(), "TimelineBuilder::build");
        Ok(Timeline::assemble(tracks))
    }
}
