use alloc::vec::Vec;

use crate::key::TargetKey;
use crate::timeline::Channel;
use crate::{Property, PropertyWrite, Timeline, Viewport};

fn sanitize(progress: f32) -> f32 {
    if progress.is_nan() {
        return 0.0;
    }
    progress.clamp(0.0, 1.0)
}

impl<K: TargetKey> Timeline<K> {
    /// Picks the track that owns `channel` at `progress`.
    ///
    /// 1. Among tracks whose window contains `progress`, the last declared wins.
    /// 2. Otherwise the track whose window ended latest holds its last value.
    /// 3. Otherwise (every window lies ahead) the track starting earliest holds its first value.
    ///
    /// Ties in 2 and 3 also go to the last declared track.
    pub(crate) fn resolve(&self, channel: &Channel<K>, progress: f32) -> Option<usize> {
        let mut active = None;
        let mut ended: Option<(usize, f32)> = None;
        let mut pending: Option<(usize, f32)> = None;
        for &ti in &channel.tracks {
            let w = self.tracks[ti].window;
            if w.contains(progress) {
                active = Some(ti);
            } else if w.end < progress {
                if ended.is_none_or(|(_, end)| w.end >= end) {
                    ended = Some((ti, w.end));
                }
            } else if pending.is_none_or(|(_, start)| w.start <= start) {
                pending = Some((ti, w.start));
            }
        }
        active
            .or(ended.map(|(ti, _)| ti))
            .or(pending.map(|(ti, _)| ti))
    }

    /// Visits one resolved value per (target, property) channel, in first-declaration order.
    ///
    /// Channels whose target fails `is_present` are skipped for this frame. The output depends
    /// only on the arguments, never on previously evaluated frames.
    pub fn for_each_write(
        &self,
        progress: f32,
        viewport: Viewport,
        mut is_present: impl FnMut(&K) -> bool,
        mut f: impl FnMut(&K, Property, f32),
    ) {
        let progress = sanitize(progress);
        for channel in &self.channels {
            if !is_present(&channel.target) {
                ptrace!(property = ?channel.property, "skipping write for missing target");
                continue;
            }
            let Some(ti) = self.resolve(channel, progress) else {
                continue;
            };
            if let Some(value) = self.tracks[ti].sample(channel.property, progress, viewport) {
                f(&channel.target, channel.property, value);
            }
        }
    }

    /// Same as [`Timeline::for_each_write`], appending to `out` (which is cleared first).
    pub fn evaluate_into(
        &self,
        progress: f32,
        viewport: Viewport,
        is_present: impl FnMut(&K) -> bool,
        out: &mut Vec<PropertyWrite<K>>,
    ) {
        out.clear();
        out.reserve(self.channels.len());
        self.for_each_write(progress, viewport, is_present, |target, property, value| {
            out.push(PropertyWrite {
                target: target.clone(),
                property,
                value,
            });
        });
    }

    /// Evaluates every channel, treating all targets as present.
    pub fn evaluate(&self, progress: f32, viewport: Viewport) -> Vec<PropertyWrite<K>> {
        let mut out = Vec::new();
        self.evaluate_into(progress, viewport, |_| true, &mut out);
        out
    }

    /// The stored progress-0 value of every channel, resolved against `viewport`.
    ///
    /// This is what a leave-back reset writes; it always equals `evaluate(0.0, viewport)`.
    pub fn entrance_snapshot(&self, viewport: Viewport) -> Vec<PropertyWrite<K>> {
        self.channels
            .iter()
            .map(|c| PropertyWrite {
                target: c.target.clone(),
                property: c.property,
                value: c.entrance.resolve(viewport),
            })
            .collect()
    }

    /// Like [`Timeline::entrance_snapshot`], skipping targets that fail `is_present`.
    pub fn entrance_snapshot_into(
        &self,
        viewport: Viewport,
        mut is_present: impl FnMut(&K) -> bool,
        out: &mut Vec<PropertyWrite<K>>,
    ) {
        out.clear();
        for c in &self.channels {
            if !is_present(&c.target) {
                continue;
            }
            out.push(PropertyWrite {
                target: c.target.clone(),
                property: c.property,
                value: c.entrance.resolve(viewport),
            });
        }
    }
}
