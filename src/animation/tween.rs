use crate::{
    animation::ease::Ease,
    animation::property::Property,
    foundation::error::{ChoreoError, ChoreoResult},
    scene::entity::EntityId,
};

/// End value of one property track.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Target {
    /// Animate to an absolute value.
    To(f64),
    /// Animate by a delta relative to the value at the tween's start.
    By(f64),
}

/// One property track of an unscheduled tween.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PropTween {
    /// Animated property.
    pub property: Property,
    /// Explicit start value. `None` captures the scheduled value at the tween's start.
    pub from: Option<f64>,
    /// End value.
    pub to: Target,
}

/// Declarative description of a tween before it is placed on a timeline.
///
/// Built with chained setters, mirroring how tweens are written by hand:
///
/// ```
/// use choreo::{Ease, Property, TweenSpec};
///
/// let spec = TweenSpec::new(1.0, Ease::InOutSine)
///     .from_to(Property::Width, 0.0, 200.0)
///     .by(Property::Rotation, 30.0);
/// assert_eq!(spec.props.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TweenSpec {
    /// Duration in seconds (`0` for an instant set).
    pub duration: f64,
    /// Easing applied to the whole tween.
    pub ease: Ease,
    /// Property tracks, at most one per property.
    pub props: Vec<PropTween>,
}

impl TweenSpec {
    /// Empty tween with a duration and easing.
    pub fn new(duration: f64, ease: Ease) -> Self {
        Self {
            duration,
            ease,
            props: Vec::new(),
        }
    }

    /// Zero-duration tween that snaps properties to their end values.
    pub fn set() -> Self {
        Self::new(0.0, Ease::Linear)
    }

    /// Animate `property` to an absolute value from whatever it is at the start.
    pub fn to(self, property: Property, value: f64) -> Self {
        self.push(property, None, Target::To(value))
    }

    /// Animate `property` by a relative delta.
    pub fn by(self, property: Property, delta: f64) -> Self {
        self.push(property, None, Target::By(delta))
    }

    /// Animate `property` between two explicit values.
    pub fn from_to(self, property: Property, from: f64, to: f64) -> Self {
        self.push(property, Some(from), Target::To(to))
    }

    fn push(mut self, property: Property, from: Option<f64>, to: Target) -> Self {
        self.props.push(PropTween { property, from, to });
        self
    }

    /// Track for `property`, if present.
    pub fn prop(&self, property: Property) -> Option<&PropTween> {
        self.props.iter().find(|p| p.property == property)
    }

    /// Validate duration, values, and property uniqueness.
    pub fn validate(&self) -> ChoreoResult<()> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(ChoreoError::validation(
                "tween duration must be finite and >= 0",
            ));
        }
        if self.props.is_empty() {
            return Err(ChoreoError::validation(
                "tween must animate at least one property",
            ));
        }
        for (idx, p) in self.props.iter().enumerate() {
            let to = match p.to {
                Target::To(v) | Target::By(v) => v,
            };
            if !to.is_finite() || p.from.is_some_and(|v| !v.is_finite()) {
                return Err(ChoreoError::validation(format!(
                    "tween value for {:?} must be finite",
                    p.property
                )));
            }
            if self.props[..idx].iter().any(|q| q.property == p.property) {
                return Err(ChoreoError::validation(format!(
                    "tween animates {:?} more than once",
                    p.property
                )));
            }
        }
        Ok(())
    }
}

/// Resolved start/end pair of one property inside a scheduled tween.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Channel {
    /// Animated property.
    pub property: Property,
    /// Value at the tween's start.
    pub from: f64,
    /// Value at the tween's end.
    pub to: f64,
}

impl Channel {
    /// Value at eased progress `p` in `[0, 1]`.
    pub fn value(&self, p: f64) -> f64 {
        self.from + (self.to - self.from) * p
    }
}

/// A tween placed on a timeline: absolute start, resolved channels.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Tween {
    /// Registration order on the owning timeline.
    pub seq: u64,
    /// Animated entity.
    pub target: EntityId,
    /// Absolute start in seconds.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
    /// Easing curve.
    pub ease: Ease,
    /// Resolved property channels.
    pub channels: Vec<Channel>,
}

impl Tween {
    /// Absolute end in seconds.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Eased progress at absolute time `t` (`0` before start, `1` from the end on).
    pub fn progress(&self, t: f64) -> f64 {
        if self.duration <= 0.0 {
            return if t >= self.start { 1.0 } else { 0.0 };
        }
        self.ease.apply((t - self.start) / self.duration)
    }

    /// Channel for `property`, if this tween animates it.
    pub fn channel(&self, property: Property) -> Option<&Channel> {
        self.channels.iter().find(|c| c.property == property)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
