use std::collections::BTreeMap;

use crate::{
    animation::property::Property,
    animation::tween::{Channel, Target, Tween, TweenSpec},
    foundation::error::{ChoreoError, ChoreoResult},
    scene::entity::EntityId,
    scene::stage::{PropertySink, PropertyWrite},
    scene::state::SampledFrame,
    timeline::anchor::{ResolveCtx, Span, TimeAnchor, resolve},
    timeline::schedule::{BaseValue, Schedule, ScheduledLabel},
};

/// Identity of one timeline instance; stamped on every write it produces.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TimelineId(pub u64);

/// How often the timeline plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    /// Play `1 + n` times, then hold the final state.
    Count(u32),
    /// Loop forever; every loop restarts from the time-0 state.
    #[default]
    Infinite,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum PlayState {
    Building,
    Playing { origin: f64 },
    Killed,
}

/// Ordered tweens and labels on one shared clock.
///
/// A timeline is populated synchronously, started once, and killed once. It is never edited after
/// it starts playing.
#[derive(Debug)]
pub struct Timeline {
    id: TimelineId,
    repeat: Repeat,
    // sorted by (start, seq)
    tweens: Vec<Tween>,
    labels: BTreeMap<String, f64>,
    base: BTreeMap<(EntityId, Property), f64>,
    previous: Option<Span>,
    duration: f64,
    next_seq: u64,
    state: PlayState,
}

impl Timeline {
    /// Create an empty timeline.
    pub fn new(id: TimelineId, repeat: Repeat) -> Self {
        Self {
            id,
            repeat,
            tweens: Vec::new(),
            labels: BTreeMap::new(),
            base: BTreeMap::new(),
            previous: None,
            duration: 0.0,
            next_seq: 0,
            state: PlayState::Building,
        }
    }

    /// Instance id.
    pub fn id(&self) -> TimelineId {
        self.id
    }

    /// Repeat mode.
    pub fn repeat(&self) -> Repeat {
        self.repeat
    }

    /// Total duration: the latest tween end.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// End of the most recently appended tween.
    pub fn cursor(&self) -> f64 {
        self.previous.map_or(0.0, |s| s.end)
    }

    /// Resolved time of a declared label.
    pub fn label(&self, name: &str) -> Option<f64> {
        self.labels.get(name).copied()
    }

    /// Scheduled tweens in application order.
    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    /// Return `true` once [`Timeline::start`] succeeded and before [`Timeline::kill`].
    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlayState::Playing { .. })
    }

    /// Return `true` after [`Timeline::kill`].
    pub fn is_killed(&self) -> bool {
        self.state == PlayState::Killed
    }

    fn ensure_building(&self) -> ChoreoResult<()> {
        match self.state {
            PlayState::Building => Ok(()),
            PlayState::Playing { .. } => Err(ChoreoError::schedule(
                "timeline is already playing and cannot be edited",
            )),
            PlayState::Killed => Err(ChoreoError::schedule("timeline was killed")),
        }
    }

    fn resolve(&self, anchor: &TimeAnchor) -> ChoreoResult<f64> {
        resolve(
            anchor,
            &ResolveCtx {
                previous: self.previous,
                duration: self.duration,
                labels: &self.labels,
            },
        )
    }

    /// Declare a label, resolving its anchor immediately.
    pub fn add_label(&mut self, name: impl Into<String>, anchor: TimeAnchor) -> ChoreoResult<f64> {
        self.ensure_building()?;
        let name = name.into();
        if self.labels.contains_key(&name) {
            return Err(ChoreoError::schedule(format!(
                "label '{name}' is declared twice"
            )));
        }
        let at = self.resolve(&anchor)?;
        self.labels.insert(name, at);
        Ok(at)
    }

    /// Pin the time-0 value of a property, overriding any captured start value.
    pub fn set_base(
        &mut self,
        target: EntityId,
        property: Property,
        value: f64,
    ) -> ChoreoResult<()> {
        self.ensure_building()?;
        if !value.is_finite() {
            return Err(ChoreoError::validation("base value must be finite"));
        }
        self.base.insert((target, property), value);
        Ok(())
    }

    /// Append one tween at `anchor`.
    pub fn append(
        &mut self,
        target: EntityId,
        spec: TweenSpec,
        anchor: TimeAnchor,
    ) -> ChoreoResult<Span> {
        self.append_group(&[target], spec, anchor)
    }

    /// Append the same tween for several targets as one scheduling unit.
    ///
    /// The anchor is resolved once; afterwards the group counts as the "previous" tween.
    pub fn append_group(
        &mut self,
        targets: &[EntityId],
        spec: TweenSpec,
        anchor: TimeAnchor,
    ) -> ChoreoResult<Span> {
        self.ensure_building()?;
        spec.validate()?;
        if targets.is_empty() {
            return Err(ChoreoError::schedule("tween group has no targets"));
        }

        let start = self.resolve(&anchor)?;
        let span = Span {
            start,
            end: start + spec.duration,
        };

        for &target in targets {
            let channels = spec
                .props
                .iter()
                .map(|p| {
                    let from = p
                        .from
                        .unwrap_or_else(|| self.value_at(target, p.property, start));
                    let to = match p.to {
                        Target::To(v) => v,
                        Target::By(d) => from + d,
                    };
                    Channel {
                        property: p.property,
                        from,
                        to,
                    }
                })
                .collect::<Vec<_>>();

            for c in &channels {
                self.base.entry((target, c.property)).or_insert(c.from);
            }

            let tween = Tween {
                seq: self.next_seq,
                target,
                start,
                duration: spec.duration,
                ease: spec.ease,
                channels,
            };
            self.next_seq += 1;

            let at = self.tweens.partition_point(|t| t.start <= start);
            self.tweens.insert(at, tween);
        }

        self.previous = Some(span);
        self.duration = self.duration.max(span.end);
        Ok(span)
    }

    /// Scheduled value of one property at absolute time `t`.
    ///
    /// The latest-applied tween that started at or before `t` wins; otherwise the time-0 base
    /// value, otherwise the property default.
    pub fn value_at(&self, target: EntityId, property: Property, t: f64) -> f64 {
        let started = self.tweens.partition_point(|tw| tw.start <= t);
        self.tweens[..started]
            .iter()
            .rev()
            .filter(|tw| tw.target == target)
            .find_map(|tw| tw.channel(property).map(|c| c.value(tw.progress(t))))
            .or_else(|| self.base.get(&(target, property)).copied())
            .unwrap_or_else(|| property.default_value())
    }

    /// Evaluate every animated property at timeline-local time `t`.
    ///
    /// Starts from the time-0 base state and applies started tweens in schedule order, so the
    /// result depends on `t` alone.
    pub fn sample(&self, t: f64) -> SampledFrame {
        let mut values = self.base.clone();
        let started = self.tweens.partition_point(|tw| tw.start <= t);
        for tw in &self.tweens[..started] {
            let p = tw.progress(t);
            for c in &tw.channels {
                values.insert((tw.target, c.property), c.value(p));
            }
        }
        SampledFrame::new(t, values)
    }

    /// Begin playback; `now` becomes local time 0.
    pub fn start(&mut self, now: f64) -> ChoreoResult<()> {
        if self.state == PlayState::Killed {
            return Err(ChoreoError::evaluation("cannot start a killed timeline"));
        }
        if !now.is_finite() {
            return Err(ChoreoError::evaluation("start time must be finite"));
        }
        self.state = PlayState::Playing { origin: now };
        Ok(())
    }

    /// Map host time to timeline-local time, applying the repeat mode.
    ///
    /// Returns `None` unless the timeline is playing.
    pub fn local_time(&self, now: f64) -> Option<f64> {
        let PlayState::Playing { origin } = self.state else {
            return None;
        };
        let elapsed = (now - origin).max(0.0);
        if self.duration <= 0.0 {
            return Some(0.0);
        }
        let local = match self.repeat {
            Repeat::Infinite => elapsed.rem_euclid(self.duration),
            Repeat::Count(n) => {
                let total = self.duration * (f64::from(n) + 1.0);
                if elapsed >= total {
                    self.duration
                } else {
                    elapsed.rem_euclid(self.duration)
                }
            }
        };
        Some(local)
    }

    /// Evaluate at host time `now` and push every property value into `sink`.
    ///
    /// Writes nothing unless playing. Returns the number of writes.
    pub fn tick(&self, now: f64, sink: &mut dyn PropertySink) -> usize {
        let Some(local) = self.local_time(now) else {
            return 0;
        };
        let frame = self.sample(local);
        let mut n = 0;
        for (entity, property, value) in frame.iter() {
            sink.apply(PropertyWrite {
                timeline: self.id,
                entity,
                property,
                value,
            });
            n += 1;
        }
        n
    }

    /// Stop for good and release every registry. No write can follow.
    pub fn kill(&mut self) {
        self.state = PlayState::Killed;
        self.tweens = Vec::new();
        self.labels = BTreeMap::new();
        self.base = BTreeMap::new();
        self.previous = None;
    }

    /// Snapshot of the resolved schedule.
    pub fn schedule(&self) -> Schedule {
        Schedule {
            duration: self.duration,
            repeat: self.repeat,
            labels: self
                .labels
                .iter()
                .map(|(name, &time)| ScheduledLabel {
                    name: name.clone(),
                    time,
                })
                .collect(),
            base: self
                .base
                .iter()
                .map(|(&(entity, property), &value)| BaseValue {
                    entity,
                    property,
                    value,
                })
                .collect(),
            tweens: self.tweens.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/timeline.rs"]
mod tests;
