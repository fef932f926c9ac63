use crate::{
    animation::ease::Ease,
    animation::property::Property,
    animation::tween::TweenSpec,
    choreography::config::{IntroTiming, PacingParams, RestTextTiming},
    choreography::pacing::{overruns, pace},
    foundation::error::{ChoreoError, ChoreoResult},
    scene::entity::{EntityId, TextGroupId},
    scene::stage::TextGroup,
    timeline::anchor::TimeAnchor,
    timeline::timeline::Timeline,
};

const OFFSCREEN_RIGHT_PCT: f64 = 150.0;
const CENTER_PCT: f64 = 50.0;
const OFFSCREEN_LEFT_PCT: f64 = -150.0;
const TITLE_LIFT: f64 = -60.0;

/// Resolved timing of one rest cycle's text, in absolute seconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextPlan {
    /// Group the plan animates.
    pub group: TextGroupId,
    /// Cycle start (the label the text is anchored to).
    pub start: f64,
    /// First list item reveal, if the group has items.
    pub list_start: Option<f64>,
    /// Gap between item reveals (`0` for fewer than two items).
    pub step: f64,
    /// Start of the slide-out.
    pub exit_start: f64,
    /// Moment the group is hidden.
    pub hide_at: f64,
    /// `true` if the paced list leaves less than the minimum reading time before the exit.
    pub overrun: bool,
}

fn present(group: &TextGroup, id: TextGroupId) -> Vec<EntityId> {
    let mut out = Vec::with_capacity(2 + group.items.len());
    if group.title.is_some() {
        out.push(EntityId::Title(id));
    }
    if group.subtitle.is_some() {
        out.push(EntityId::Subtitle(id));
    }
    out.extend((0..group.items.len()).map(|n| EntityId::Item(id, n as u32)));
    out
}

/// Schedules the text of one rest cycle against the cycle's label.
pub struct TextRevealComposer<'a> {
    timing: &'a RestTextTiming,
    pacing: &'a PacingParams,
}

impl<'a> TextRevealComposer<'a> {
    /// Composer using the given timing and pacing.
    pub fn new(timing: &'a RestTextTiming, pacing: &'a PacingParams) -> Self {
        Self { timing, pacing }
    }

    /// Append the text phases of `group` to `tl`, anchored at `label`.
    ///
    /// A missing group is a no-op and returns `None`.
    pub fn compose(
        &self,
        tl: &mut Timeline,
        id: TextGroupId,
        group: Option<&TextGroup>,
        label: &str,
        duration: f64,
    ) -> ChoreoResult<Option<TextPlan>> {
        let Some(group) = group else {
            tracing::debug!(group = %id, "text group missing, skipping");
            return Ok(None);
        };
        let t = self.timing;
        if !duration.is_finite() || duration < t.min_cycle_duration() {
            return Err(ChoreoError::validation(format!(
                "text window of {duration}s for {id} is shorter than {}s",
                t.min_cycle_duration()
            )));
        }
        let at = |offset: f64| TimeAnchor::label_offset(label, offset);
        let start = tl.label(label).ok_or_else(|| {
            ChoreoError::schedule(format!("label '{label}' is not declared"))
        })?;

        tl.append(
            EntityId::Group(id),
            TweenSpec::set().to(Property::AutoAlpha, 1.0),
            at(0.0),
        )?;

        let title = group.title.as_ref().map(|_| EntityId::Title(id));
        if let Some(title) = title {
            tl.append(
                title,
                TweenSpec::new(t.title_enter, Ease::OutExpo)
                    .from_to(Property::Left, OFFSCREEN_RIGHT_PCT, CENTER_PCT)
                    .from_to(Property::Y, 0.0, 0.0),
                at(0.0),
            )?;
            tl.append(
                title,
                TweenSpec::new(t.move_up_duration, Ease::OutSine).to(Property::Y, TITLE_LIFT),
                at(t.move_up_delay),
            )?;
        }

        let exit_offset = t.exit_offset(duration);
        let mut list_start = None;
        let mut step = 0.0;
        let mut overrun = false;

        if !group.items.is_empty() {
            let count = group.items.len();
            let first = t.list_start();
            step = pace(
                first,
                exit_offset,
                self.pacing.min_read_time,
                self.pacing.max_step,
                count,
            );
            overrun = overruns(first, exit_offset, self.pacing.min_read_time, step, count);
            if overrun {
                tracing::warn!(
                    group = %id,
                    items = count,
                    step,
                    "list reveals overrun the reading window"
                );
            }
            list_start = Some(start + first);

            for k in 0..count {
                let item = EntityId::Item(id, k as u32);
                let reveal = at(first + k as f64 * step);
                if k > 0 {
                    let pushed = title
                        .into_iter()
                        .chain((0..k).map(|n| EntityId::Item(id, n as u32)))
                        .collect::<Vec<_>>();
                    tl.append_group(
                        &pushed,
                        TweenSpec::new(t.item_fade, Ease::InOutSine)
                            .by(Property::Y, -self.pacing.push_distance),
                        reveal.clone(),
                    )?;
                    tl.append(
                        EntityId::Item(id, (k - 1) as u32),
                        TweenSpec::new(t.item_fade, Ease::OutQuad)
                            .to(Property::Opacity, t.dim_opacity),
                        reveal.clone(),
                    )?;
                }
                tl.append(
                    item,
                    TweenSpec::new(t.item_fade, Ease::OutSine)
                        .from_to(Property::Opacity, 0.0, 1.0)
                        .from_to(Property::Y, t.item_rise, 0.0),
                    reveal,
                )?;
            }
        } else if group.subtitle.is_some() {
            tl.append(
                EntityId::Subtitle(id),
                TweenSpec::new(t.item_fade, Ease::OutSine)
                    .from_to(Property::Opacity, 0.0, 1.0)
                    .from_to(Property::Y, t.item_rise, 0.0),
                at(t.move_up_delay),
            )?;
        }

        let leaving = present(group, id);
        if !leaving.is_empty() {
            tl.append_group(
                &leaving,
                TweenSpec::new(t.exit_duration.min(duration), Ease::InSine)
                    .to(Property::Left, OFFSCREEN_LEFT_PCT),
                at(exit_offset),
            )?;
        }

        tl.append(
            EntityId::Group(id),
            TweenSpec::set().to(Property::AutoAlpha, 0.0),
            at(duration),
        )?;

        Ok(Some(TextPlan {
            group: id,
            start,
            list_start,
            step,
            exit_start: start + exit_offset,
            hide_at: start + duration,
            overrun,
        }))
    }
}

/// Schedules the intro title and subtitle from the start of the loop.
pub struct IntroComposer<'a> {
    timing: &'a IntroTiming,
}

impl<'a> IntroComposer<'a> {
    /// Composer using the given timing.
    pub fn new(timing: &'a IntroTiming) -> Self {
        Self { timing }
    }

    /// Append the intro phases; returns the time the intro group hides, or `None` if missing.
    pub fn compose(
        &self,
        tl: &mut Timeline,
        group: Option<&TextGroup>,
    ) -> ChoreoResult<Option<f64>> {
        let Some(group) = group else {
            tracing::debug!("intro group missing, skipping");
            return Ok(None);
        };
        let t = self.timing;
        let id = TextGroupId::Intro;
        tl.set_base(EntityId::Group(id), Property::AutoAlpha, 1.0)?;

        if group.title.is_some() {
            let title = EntityId::Title(id);
            tl.append(
                title,
                TweenSpec::new(t.in_duration, Ease::OutExpo)
                    .from_to(Property::Left, OFFSCREEN_RIGHT_PCT, CENTER_PCT),
                TimeAnchor::Absolute(t.in_delay),
            )?;
            tl.append(
                title,
                TweenSpec::new(t.move_up_duration, Ease::OutSine).to(Property::Y, TITLE_LIFT),
                TimeAnchor::Absolute(t.move_up_delay),
            )?;
        }
        if group.subtitle.is_some() {
            tl.append(
                EntityId::Subtitle(id),
                TweenSpec::new(t.subtitle_duration, Ease::OutSine)
                    .from_to(Property::Opacity, 0.0, 1.0)
                    .from_to(Property::Y, t.subtitle_rise, 0.0),
                TimeAnchor::Absolute(t.subtitle_delay),
            )?;
        }

        let leaving = present(group, id);
        let hide_anchor = if leaving.is_empty() {
            TimeAnchor::Absolute(t.exit_at + t.exit_delay)
        } else {
            tl.append_group(
                &leaving,
                TweenSpec::new(t.exit_duration, Ease::InSine)
                    .to(Property::Left, OFFSCREEN_LEFT_PCT),
                TimeAnchor::Absolute(t.exit_at + t.exit_delay),
            )?;
            TimeAnchor::AfterPrevious
        };
        let hide = tl.append(
            EntityId::Group(id),
            TweenSpec::set().to(Property::AutoAlpha, 0.0),
            hide_anchor,
        )?;
        Ok(Some(hide.start))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/choreography/text.rs"]
mod tests;
