use crate::{
    animation::property::Property,
    animation::tween::Tween,
    foundation::error::ChoreoResult,
    foundation::math::Fnv1a64,
    scene::entity::EntityId,
    timeline::timeline::Repeat,
};

/// A label and the second it resolved to.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ScheduledLabel {
    /// Label name.
    pub name: String,
    /// Absolute time in seconds.
    pub time: f64,
}

/// Time-0 value of one property, restored on every loop.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct BaseValue {
    /// Animated entity.
    pub entity: EntityId,
    /// Property.
    pub property: Property,
    /// Value at local time 0.
    pub value: f64,
}

/// Read-only snapshot of a built timeline.
///
/// Two timelines built from the same inputs produce equal schedules and equal fingerprints.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Schedule {
    /// Total loop length in seconds.
    pub duration: f64,
    /// Repeat mode.
    pub repeat: Repeat,
    /// Declared labels, sorted by name.
    pub labels: Vec<ScheduledLabel>,
    /// Time-0 state, sorted by entity then property.
    pub base: Vec<BaseValue>,
    /// Tweens in application order.
    pub tweens: Vec<Tween>,
}

impl Schedule {
    /// Stable 64-bit digest of every resolved time and value.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_f64(self.duration);
        match self.repeat {
            Repeat::Infinite => h.write_u64(u64::MAX),
            Repeat::Count(n) => h.write_u64(u64::from(n)),
        }

        h.write_u64(self.labels.len() as u64);
        for l in &self.labels {
            h.write_str(&l.name);
            h.write_f64(l.time);
        }

        h.write_u64(self.base.len() as u64);
        for b in &self.base {
            h.write_str(&b.entity.to_string());
            h.write_u64(b.property as u64);
            h.write_f64(b.value);
        }

        h.write_u64(self.tweens.len() as u64);
        for t in &self.tweens {
            h.write_u64(t.seq);
            h.write_str(&t.target.to_string());
            h.write_f64(t.start);
            h.write_f64(t.duration);
            h.write_u64(t.ease as u64);
            for c in &t.channels {
                h.write_u64(c.property as u64);
                h.write_f64(c.from);
                h.write_f64(c.to);
            }
        }
        h.finish()
    }

    /// Tweens animating `target`, in application order.
    pub fn tweens_for(&self, target: EntityId) -> impl Iterator<Item = &Tween> + '_ {
        self.tweens.iter().filter(move |t| t.target == target)
    }

    /// Resolved time of a label.
    pub fn label(&self, name: &str) -> Option<f64> {
        self.labels.iter().find(|l| l.name == name).map(|l| l.time)
    }

    /// Pretty JSON, as printed by the `schedule` CLI command.
    pub fn to_json_pretty(&self) -> ChoreoResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/schedule.rs"]
mod tests;
