use crate::{
    animation::property::Property,
    choreography::config::ShowConfig,
    choreography::metrics::ViewportMetrics,
    choreography::panels::{PanelChoreographer, PhaseKind},
    choreography::text::{IntroComposer, TextPlan, TextRevealComposer},
    foundation::error::{ChoreoError, ChoreoResult},
    scene::entity::{EntityId, TextGroupId},
    scene::stage::TargetRegistry,
    timeline::timeline::{Timeline, TimelineId},
};

/// A freshly built, not yet started show timeline.
#[derive(Debug)]
pub struct BuiltShow {
    /// The populated timeline.
    pub timeline: Timeline,
    /// When the intro group hides, if the stage has one.
    pub intro_hide_at: Option<f64>,
    /// Text schedule of every rest cycle whose group exists.
    pub text_plans: Vec<TextPlan>,
}

/// Populate a new timeline with the whole show.
///
/// Order matters: the intro first, then panel 0 (which declares the split label), then the
/// secondary track, then the remaining primary panels with the rest text on the host panel.
#[tracing::instrument(skip(config, registry), fields(panels = config.panel_count))]
pub fn build_show(
    id: TimelineId,
    config: &ShowConfig,
    metrics: &ViewportMetrics,
    registry: &TargetRegistry,
) -> ChoreoResult<BuiltShow> {
    config.validate()?;
    if metrics.panel_count != config.panel_count {
        return Err(ChoreoError::validation(format!(
            "metrics were computed for {} panels, config has {}",
            metrics.panel_count, config.panel_count
        )));
    }

    let mut tl = Timeline::new(id, config.repeat);
    for g in registry.group_ids() {
        tl.set_base(EntityId::Group(g), Property::AutoAlpha, 0.0)?;
    }

    let intro_hide_at =
        IntroComposer::new(&config.intro).compose(&mut tl, registry.group(TextGroupId::Intro))?;

    let panels = PanelChoreographer::new(config, metrics);
    let text = TextRevealComposer::new(&config.rest_text, &config.pacing);
    let mut text_plans = Vec::new();

    for phase in panels.primary(0) {
        phase.apply(&mut tl)?;
    }
    for k in 0..config.panel_count {
        for phase in panels.secondary(k) {
            phase.apply(&mut tl)?;
        }
    }
    for i in 1..config.panel_count {
        for phase in panels.primary(i) {
            phase.apply(&mut tl)?;
            let PhaseKind::Sustain(cycle) = phase.kind else {
                continue;
            };
            if i != config.text_host_panel {
                continue;
            }
            let Some(label) = &phase.label else {
                continue;
            };
            let group = TextGroupId::rest(cycle)?;
            if let Some(plan) = text.compose(
                &mut tl,
                group,
                registry.group(group),
                &label.name,
                config.rest_cycle_duration,
            )? {
                text_plans.push(plan);
            }
        }
    }

    tracing::debug!(
        duration = tl.duration(),
        tweens = tl.tweens().len(),
        "show timeline built"
    );
    Ok(BuiltShow {
        timeline: tl,
        intro_hide_at,
        text_plans,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/choreography/show.rs"]
mod tests;
