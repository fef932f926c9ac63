use std::collections::BTreeMap;

use crate::{
    animation::property::Property,
    foundation::core::{Point, Rgba8, Size},
    scene::entity::EntityId,
};

const LEAD_PINK: Rgba8 = Rgba8::opaque(255, 149, 236);
const LEAD_BLUSH: Rgba8 = Rgba8::opaque(255, 180, 200);
const INNER_STOPS: [(f64, Rgba8); 3] = [
    (6.0, Rgba8::opaque(255, 89, 226)),
    (19.0, Rgba8::opaque(255, 0, 211)),
    (72.0, Rgba8::opaque(255, 0, 0)),
];
const END_COLOR: Rgba8 = Rgba8::opaque(0, 0, 0);

/// One colour stop of a linear gradient.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GradientStop {
    /// Position along the gradient line, in percent.
    pub pos_pct: f64,
    /// Colour at the stop.
    pub color: Rgba8,
}

/// Animated parameters of a panel's linear gradient fill.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Gradient {
    /// CSS-style angle: `0` points up, `90` points right.
    pub angle_deg: f64,
    /// Lead colour mix (`0` pink, `1` blush).
    pub lead_mix: f64,
    /// Position of the final black stop, in percent.
    pub end_stop_pct: f64,
}

impl Gradient {
    /// The five colour stops, with positions forced non-decreasing.
    pub fn stops(&self) -> [GradientStop; 5] {
        let lead = Rgba8::lerp(LEAD_PINK, LEAD_BLUSH, self.lead_mix.clamp(0.0, 1.0));
        let mut out = [GradientStop {
            pos_pct: 0.0,
            color: lead,
        }; 5];
        for (slot, (pos, color)) in out[1..4].iter_mut().zip(INNER_STOPS) {
            *slot = GradientStop {
                pos_pct: pos,
                color,
            };
        }
        out[4] = GradientStop {
            pos_pct: self.end_stop_pct,
            color: END_COLOR,
        };
        for i in 1..out.len() {
            out[i].pos_pct = out[i].pos_pct.max(out[i - 1].pos_pct);
        }
        out
    }
}

/// Evaluated state of one panel.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PanelState {
    /// Translation of the box's top-left corner.
    pub position: Point,
    /// Box size.
    pub size: Size,
    /// Rotation about the box centre, in degrees.
    pub rotation_deg: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Gradient fill.
    pub gradient: Gradient,
}

/// Evaluated state of one text element or group container.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TextState {
    /// Horizontal anchor, in percent of the viewport width.
    pub left_pct: f64,
    /// Vertical offset in pixels.
    pub offset_y: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Visibility-coupled opacity; `0` hides the element.
    pub auto_alpha: f64,
}

impl TextState {
    /// Return `true` if the element is rendered at all.
    pub fn is_visible(&self) -> bool {
        self.auto_alpha > 0.0
    }
}

/// Every animated property value at one timeline-local time.
#[derive(Clone, Debug, PartialEq)]
pub struct SampledFrame {
    time: f64,
    values: BTreeMap<(EntityId, Property), f64>,
}

impl SampledFrame {
    pub(crate) fn new(time: f64, values: BTreeMap<(EntityId, Property), f64>) -> Self {
        Self { time, values }
    }

    /// Timeline-local time of the sample.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Animated value, if the schedule touches this property.
    pub fn get(&self, entity: EntityId, property: Property) -> Option<f64> {
        self.values.get(&(entity, property)).copied()
    }

    fn value(&self, entity: EntityId, property: Property) -> f64 {
        self.get(entity, property)
            .unwrap_or_else(|| property.default_value())
    }

    /// Every `(entity, property, value)` in stable order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, Property, f64)> + '_ {
        self.values.iter().map(|(&(e, p), &v)| (e, p, v))
    }

    /// Number of animated properties.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Return `true` if nothing is animated.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn touches(&self, entity: EntityId) -> bool {
        self.values
            .range((entity, Property::X)..=(entity, Property::GradientStop))
            .next()
            .is_some()
    }

    /// Typed panel state; `None` for non-panels and panels the schedule never touches.
    pub fn panel(&self, id: EntityId) -> Option<PanelState> {
        if !id.is_panel() || !self.touches(id) {
            return None;
        }
        let v = |p| self.value(id, p);
        Some(PanelState {
            position: Point::new(v(Property::X), v(Property::Y)),
            size: Size::new(v(Property::Width).max(0.0), v(Property::Height).max(0.0)),
            rotation_deg: v(Property::Rotation),
            opacity: v(Property::Opacity).clamp(0.0, 1.0),
            gradient: Gradient {
                angle_deg: v(Property::GradientAngle),
                lead_mix: v(Property::GradientLead),
                end_stop_pct: v(Property::GradientStop),
            },
        })
    }

    /// Typed text state; `None` for panels and untouched elements.
    pub fn text(&self, id: EntityId) -> Option<TextState> {
        if id.is_panel() || !self.touches(id) {
            return None;
        }
        let v = |p| self.value(id, p);
        Some(TextState {
            left_pct: v(Property::Left),
            offset_y: v(Property::Y),
            opacity: v(Property::Opacity).clamp(0.0, 1.0),
            auto_alpha: v(Property::AutoAlpha).clamp(0.0, 1.0),
        })
    }

    /// Serialisable view, as printed by the `sample` CLI command.
    pub fn snapshot(&self) -> FrameSnapshot {
        let mut panels = BTreeMap::new();
        let mut text = BTreeMap::new();
        let mut last = None;
        for &(entity, _) in self.values.keys() {
            if last == Some(entity) {
                continue;
            }
            last = Some(entity);
            if let Some(p) = self.panel(entity) {
                panels.insert(entity.to_string(), p);
            } else if let Some(t) = self.text(entity) {
                text.insert(entity.to_string(), t);
            }
        }
        FrameSnapshot {
            time: self.time,
            panels,
            text,
        }
    }
}

/// Serialisable view of a [`SampledFrame`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameSnapshot {
    /// Timeline-local time.
    pub time: f64,
    /// Panel states keyed by entity name.
    pub panels: BTreeMap<String, PanelState>,
    /// Text states keyed by entity name.
    pub text: BTreeMap<String, TextState>,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/state.rs"]
mod tests;
