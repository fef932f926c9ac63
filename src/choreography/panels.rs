//! Phase lists for the primary and secondary panel tracks.
//!
//! Every value here is an affine function of the panel index and the viewport metrics, so the
//! same inputs always yield the same phases.

use crate::{
    animation::ease::Ease,
    animation::property::Property,
    animation::tween::{Target, TweenSpec},
    choreography::config::ShowConfig,
    choreography::metrics::ViewportMetrics,
    foundation::error::ChoreoResult,
    scene::entity::{EntityId, REST_CYCLES},
    timeline::anchor::{Span, TimeAnchor},
    timeline::timeline::Timeline,
};

/// Label every panel's split is offset from.
pub const SPLIT_LABEL: &str = "split";

const FULL_TURN: f64 = 360.0;
const REVEAL_OFFSET_CELLS: f64 = 5.5;
const REVEAL_ROTATION: f64 = -360.0;
const SPLIT_ROTATION: f64 = 720.0 + 90.0;
const SPIN_DURATION: f64 = 3.0;
const REORDER_DURATION: f64 = 1.0;
const SECOND_SPIN_DURATION: f64 = 4.0;
const SPLIT_DURATION: f64 = 1.0;
const SECONDARY_REST_ROTATION: f64 = -90.0;

/// What a phase does in the panel's life.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum PhaseKind {
    /// Grow in from the centre.
    Reveal,
    /// First linear spin.
    Spin,
    /// Move into the stacked layout.
    Reorder,
    /// Second linear spin.
    SecondSpin,
    /// Move to the rest geometry at the split.
    Split,
    /// Shrink away at the split (panel 0 only).
    Exit,
    /// Slow linear turn of rest cycle `n`.
    Sustain(u8),
    /// Short eased move ending rest cycle `n`.
    Bump(u8),
}

/// Label declared right before a phase is appended.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LabelDecl {
    /// Label name.
    pub name: String,
    /// Where the label lands.
    pub anchor: TimeAnchor,
}

/// One tween of a panel's choreography, not yet placed on a timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Phase {
    /// Role of the phase.
    pub kind: PhaseKind,
    /// Animated panel.
    pub target: EntityId,
    /// Label to declare before appending.
    pub label: Option<LabelDecl>,
    /// Start anchor.
    pub anchor: TimeAnchor,
    /// Tween.
    pub spec: TweenSpec,
}

impl Phase {
    /// Declare the phase's label (if any), then append its tween.
    pub fn apply(&self, tl: &mut Timeline) -> ChoreoResult<Span> {
        if let Some(l) = &self.label {
            tl.add_label(l.name.clone(), l.anchor.clone())?;
        }
        tl.append(self.target, self.spec.clone(), self.anchor.clone())
    }
}

/// Label opening rest cycle `cycle` of `target`.
pub fn rest_label(target: EntityId, cycle: u8) -> String {
    format!("{target}.rest-{cycle}")
}

#[derive(Clone, Copy, Debug)]
enum Turn {
    /// Track base plus an offset.
    To(f64),
    /// Absolute angle.
    Absolute(f64),
    /// Relative delta; never negative.
    By(f64),
}

#[derive(Clone, Copy, Debug)]
enum Shift {
    Far,
    Near,
    Drift,
}

#[derive(Clone, Copy, Debug)]
struct RestCycle {
    cycle: u8,
    sustain: Turn,
    bump: Turn,
    shift: Shift,
}

const PRIMARY_REST: [RestCycle; REST_CYCLES as usize] = [
    RestCycle {
        cycle: 1,
        sustain: Turn::To(810.0),
        bump: Turn::To(1180.0),
        shift: Shift::Far,
    },
    RestCycle {
        cycle: 2,
        sustain: Turn::To(1200.0),
        bump: Turn::To(700.0),
        shift: Shift::Near,
    },
    RestCycle {
        cycle: 3,
        sustain: Turn::By(30.0),
        bump: Turn::To(700.0),
        shift: Shift::Far,
    },
    RestCycle {
        cycle: 4,
        sustain: Turn::By(15.0),
        bump: Turn::By(140.0),
        shift: Shift::Near,
    },
    RestCycle {
        cycle: 5,
        sustain: Turn::By(30.0),
        bump: Turn::To(1500.0),
        shift: Shift::Drift,
    },
];

const SECONDARY_REST: [RestCycle; REST_CYCLES as usize] = [
    RestCycle {
        cycle: 1,
        sustain: Turn::To(SECONDARY_REST_ROTATION),
        bump: Turn::Absolute(-300.0),
        shift: Shift::Far,
    },
    RestCycle {
        cycle: 2,
        sustain: Turn::By(15.0),
        bump: Turn::Absolute(-130.0),
        shift: Shift::Near,
    },
    RestCycle {
        cycle: 3,
        sustain: Turn::By(30.0),
        bump: Turn::Absolute(200.0),
        shift: Shift::Far,
    },
    RestCycle {
        cycle: 4,
        sustain: Turn::By(15.0),
        bump: Turn::Absolute(-90.0),
        shift: Shift::Near,
    },
    RestCycle {
        cycle: 5,
        sustain: Turn::By(30.0),
        bump: Turn::By(FULL_TURN),
        shift: Shift::Drift,
    },
];

/// Running rotation of one panel; absolute targets behind it are pushed forward by whole turns.
struct RotationTrack {
    base: f64,
    last: f64,
}

impl RotationTrack {
    fn new(base: f64, last: f64) -> Self {
        Self { base, last }
    }

    fn forward(&mut self, angle: f64) -> f64 {
        let mut t = angle;
        if t < self.last {
            t += ((self.last - t) / FULL_TURN).ceil() * FULL_TURN;
            if t < self.last {
                t += FULL_TURN;
            }
        }
        self.last = t;
        t
    }

    fn turn(&mut self, turn: Turn) -> Target {
        match turn {
            Turn::To(offset) => Target::To(self.forward(self.base + offset)),
            Turn::Absolute(angle) => Target::To(self.forward(angle)),
            Turn::By(delta) => {
                let delta = delta.max(0.0);
                self.last += delta;
                Target::By(delta)
            }
        }
    }
}

fn with_target(spec: TweenSpec, property: Property, target: Target) -> TweenSpec {
    match target {
        Target::To(v) => spec.to(property, v),
        Target::By(d) => spec.by(property, d),
    }
}

fn settled_gradient(spec: TweenSpec) -> TweenSpec {
    spec.to(Property::GradientAngle, 90.0)
        .to(Property::GradientLead, 1.0)
        .to(Property::GradientStop, 100.0)
}

/// Generates the phase list of each panel from its index and the viewport metrics.
pub struct PanelChoreographer<'a> {
    config: &'a ShowConfig,
    metrics: &'a ViewportMetrics,
}

impl<'a> PanelChoreographer<'a> {
    /// Choreographer for one build.
    pub fn new(config: &'a ShowConfig, metrics: &'a ViewportMetrics) -> Self {
        Self { config, metrics }
    }

    fn spin_angle(&self, i: u32) -> f64 {
        let c = self.config.rotation_coef;
        f64::from(self.metrics.panel_count) * c - f64::from(i + 1) * c
    }

    /// Width of primary panel `i` once revealed (height uses the vertical cell size).
    pub fn primary_width(&self, i: u32) -> f64 {
        let m = self.metrics;
        let from_end = f64::from(m.panel_count) - f64::from(i);
        m.width() - m.cell_width * from_end + m.cell_width
    }

    fn primary_height(&self, i: u32) -> f64 {
        let m = self.metrics;
        let from_end = f64::from(m.panel_count) - f64::from(i);
        m.height() - m.cell_height * from_end + m.cell_height
    }

    /// Side of secondary panel `k` once revealed.
    pub fn secondary_side(&self, k: u32) -> f64 {
        let m = self.metrics;
        m.width() - m.cell_width * f64::from(k) + m.cell_width
    }

    /// Full phase list of primary panel `i`.
    ///
    /// Panel 0 declares [`SPLIT_LABEL`] and exits at the split; every other panel settles and
    /// runs the rest cycles.
    pub fn primary(&self, i: u32) -> Vec<Phase> {
        let m = self.metrics;
        let (ew, eh) = (m.cell_width, m.cell_height);
        let ni = f64::from(m.panel_count) - f64::from(i);
        let stop = 100.0 - f64::from(i);
        let width = self.primary_width(i);
        let height = self.primary_height(i);
        let spin = self.spin_angle(i);
        let target = EntityId::Primary(i);

        let phase = |kind, anchor, spec| Phase {
            kind,
            target,
            label: None,
            anchor,
            spec,
        };

        let mut track = RotationTrack::new(0.0, REVEAL_ROTATION);
        let mut out = Vec::with_capacity(5 + 2 * usize::from(REST_CYCLES));

        out.push(phase(
            PhaseKind::Reveal,
            TimeAnchor::Absolute(0.0),
            TweenSpec::new(1.0 + 0.1 * ni, Ease::InOutSine)
                .from_to(Property::Y, eh * REVEAL_OFFSET_CELLS, -eh / 1.33 + ni * eh / 1.33)
                .from_to(Property::X, ew * REVEAL_OFFSET_CELLS, 0.0)
                .from_to(Property::Width, 0.0, width)
                .from_to(Property::Height, 0.0, height)
                .from_to(Property::Rotation, REVEAL_ROTATION, track.forward(0.0))
                .from_to(Property::GradientAngle, 105.0, 105.0)
                .from_to(Property::GradientLead, 0.0, 0.0)
                .from_to(Property::GradientStop, stop, stop),
        ));
        out.push(phase(
            PhaseKind::Spin,
            TimeAnchor::AfterPrevious,
            TweenSpec::new(SPIN_DURATION, Ease::Linear)
                .to(Property::Rotation, track.forward(spin))
                .to(Property::GradientAngle, 90.0)
                .to(Property::GradientLead, 1.0)
                .to(Property::GradientStop, stop),
        ));
        out.push(phase(
            PhaseKind::Reorder,
            TimeAnchor::AfterPrevious,
            settled_gradient(
                TweenSpec::new(REORDER_DURATION, Ease::InOutSine)
                    .to(Property::Rotation, track.forward(FULL_TURN))
                    .to(Property::Y, -eh / 6.0 + ni * eh / 6.0)
                    .to(Property::X, -ew / 1.2 + ni * ew / 1.2),
            ),
        ));
        out.push(phase(
            PhaseKind::SecondSpin,
            TimeAnchor::AfterPrevious,
            settled_gradient(
                TweenSpec::new(SECOND_SPIN_DURATION, Ease::Linear)
                    .to(Property::Rotation, track.forward(spin + FULL_TURN)),
            ),
        ));

        let split_at = TimeAnchor::label_offset(
            SPLIT_LABEL,
            self.config.split_stagger * f64::from(i),
        );
        let split = TweenSpec::new(SPLIT_DURATION, Ease::InOutSine)
            .to(Property::Rotation, track.forward(SPLIT_ROTATION))
            .to(Property::Y, m.height() - ni * eh / 4.0)
            .to(Property::X, -ew / 2.0 + ni * ew / 2.0);

        if i == 0 {
            out.push(Phase {
                label: Some(LabelDecl {
                    name: SPLIT_LABEL.to_owned(),
                    anchor: TimeAnchor::FromEnd(-self.config.split_lead),
                }),
                ..phase(
                    PhaseKind::Exit,
                    split_at,
                    settled_gradient(
                        split
                            .to(Property::Width, 0.0)
                            .to(Property::Height, 0.0)
                            .to(Property::Opacity, 0.0),
                    ),
                )
            });
            return out;
        }

        out.push(phase(
            PhaseKind::Split,
            split_at,
            settled_gradient(
                split
                    .to(Property::Width, width)
                    .to(Property::Height, width),
            ),
        ));

        track.base = spin / 1.2;
        for rc in PRIMARY_REST {
            let label = rest_label(target, rc.cycle);
            let sustain = with_target(
                TweenSpec::new(self.config.rest_cycle_duration, Ease::Linear),
                Property::Rotation,
                track.turn(rc.sustain),
            );
            out.push(Phase {
                label: Some(LabelDecl {
                    name: label.clone(),
                    anchor: TimeAnchor::AfterPrevious,
                }),
                ..phase(
                    PhaseKind::Sustain(rc.cycle),
                    TimeAnchor::label(label.clone()),
                    settled_gradient(sustain),
                )
            });

            let bump = TweenSpec::new(self.config.rest_bump_duration, Ease::InOutSine);
            let bump = match rc.shift {
                Shift::Far => bump
                    .to(Property::Y, m.height() - ni * eh / 2.0)
                    .to(Property::X, -ew * 1.2),
                Shift::Near => bump
                    .to(Property::Y, m.height() - ni * eh / 4.0)
                    .to(Property::X, -ew / 2.0 + ni * ew / 2.0),
                Shift::Drift => bump
                    .by(Property::Y, eh * 4.0)
                    .by(Property::X, -ew * 4.0),
            };
            let bump = with_target(bump, Property::Rotation, track.turn(rc.bump));
            out.push(phase(
                PhaseKind::Bump(rc.cycle),
                TimeAnchor::label_offset(label, self.config.rest_cycle_duration),
                settled_gradient(bump),
            ));
        }
        out
    }

    /// Full phase list of secondary panel `k`.
    pub fn secondary(&self, k: u32) -> Vec<Phase> {
        let m = self.metrics;
        let (ew, eh) = (m.cell_width, m.cell_height);
        let kf = f64::from(k);
        let side = self.secondary_side(k);
        let target = EntityId::Secondary(k);

        let phase = |kind, anchor, spec| Phase {
            kind,
            target,
            label: None,
            anchor,
            spec,
        };

        let near_y = kf * eh / 4.0 - side;
        let near_x = -ew / 2.0 + kf * ew / 2.0;
        let far_y = kf * eh / 2.0 - side;
        let far_x = m.width() * 1.1 - side * 1.2;

        let mut out = Vec::with_capacity(1 + 2 * usize::from(REST_CYCLES));
        out.push(phase(
            PhaseKind::Reveal,
            TimeAnchor::label_offset(SPLIT_LABEL, self.config.split_stagger * kf),
            TweenSpec::new(SPLIT_DURATION, Ease::InOutSine)
                .from_to(Property::Y, eh * REVEAL_OFFSET_CELLS, near_y)
                .from_to(Property::X, ew * REVEAL_OFFSET_CELLS, near_x)
                .from_to(Property::Width, 0.0, side)
                .from_to(Property::Height, 0.0, side)
                .from_to(Property::Rotation, REVEAL_ROTATION, SECONDARY_REST_ROTATION)
                .from_to(Property::GradientAngle, 105.0, 90.0)
                .from_to(Property::GradientLead, 0.0, 1.0)
                .from_to(Property::GradientStop, 100.0, 100.0),
        ));

        let mut track =
            RotationTrack::new(self.config.rotation_coef * kf, SECONDARY_REST_ROTATION);
        for rc in SECONDARY_REST {
            let sustain = with_target(
                TweenSpec::new(self.config.rest_cycle_duration, Ease::Linear),
                Property::Rotation,
                track.turn(rc.sustain),
            );
            out.push(phase(
                PhaseKind::Sustain(rc.cycle),
                TimeAnchor::AfterPrevious,
                settled_gradient(sustain),
            ));

            let bump = TweenSpec::new(self.config.rest_bump_duration, Ease::InOutSine)
                .to(Property::Width, side)
                .to(Property::Height, side);
            let bump = match rc.shift {
                Shift::Far => bump.to(Property::Y, far_y).to(Property::X, far_x),
                Shift::Near => bump.to(Property::Y, near_y).to(Property::X, near_x),
                Shift::Drift => bump
                    .by(Property::Y, -side * 2.0)
                    .by(Property::X, side * 2.0),
            };
            let bump = with_target(bump, Property::Rotation, track.turn(rc.bump));
            out.push(phase(
                PhaseKind::Bump(rc.cycle),
                TimeAnchor::AfterPrevious,
                settled_gradient(bump),
            ));
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/choreography/panels.rs"]
mod tests;
