use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    foundation::error::{ChoreoError, ChoreoResult},
    timeline::timeline::Repeat,
};

/// Timing of the intro title and subtitle, in seconds from the start of the loop.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntroTiming {
    /// Title enter start.
    pub in_delay: f64,
    /// Title enter duration.
    pub in_duration: f64,
    /// Title move-up start.
    pub move_up_delay: f64,
    /// Title move-up duration.
    pub move_up_duration: f64,
    /// Subtitle fade-in start.
    pub subtitle_delay: f64,
    /// Subtitle fade-in duration.
    pub subtitle_duration: f64,
    /// Subtitle rise distance in pixels.
    pub subtitle_rise: f64,
    /// Exit position; the exit starts at `exit_at + exit_delay`.
    pub exit_at: f64,
    /// Delay added to `exit_at`.
    pub exit_delay: f64,
    /// Exit duration.
    pub exit_duration: f64,
}

impl Default for IntroTiming {
    fn default() -> Self {
        Self {
            in_delay: 1.2,
            in_duration: 1.0,
            move_up_delay: 3.0,
            move_up_duration: 0.5,
            subtitle_delay: 3.0,
            subtitle_duration: 0.5,
            subtitle_rise: 50.0,
            exit_at: 4.0,
            exit_delay: 1.2,
            exit_duration: 1.0,
        }
    }
}

/// Timing of the text bound to one rest cycle, in seconds from the cycle label.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RestTextTiming {
    /// Title slide-in duration.
    pub title_enter: f64,
    /// Delay before the title moves up (and the subtitle appears).
    pub move_up_delay: f64,
    /// Title move-up duration.
    pub move_up_duration: f64,
    /// Gap between the move-up and the first list item.
    pub list_lead: f64,
    /// Slide-out duration.
    pub exit_duration: f64,
    /// Slack between the end of the exit and the end of the cycle.
    pub exit_margin: f64,
    /// Item fade-in (and push) duration.
    pub item_fade: f64,
    /// Item rise distance in pixels.
    pub item_rise: f64,
    /// Opacity of items that have been pushed up.
    pub dim_opacity: f64,
}

impl Default for RestTextTiming {
    fn default() -> Self {
        Self {
            title_enter: 0.8,
            move_up_delay: 1.0,
            move_up_duration: 0.5,
            list_lead: 0.3,
            exit_duration: 0.8,
            exit_margin: 0.2,
            item_fade: 0.5,
            item_rise: 20.0,
            dim_opacity: 0.9,
        }
    }
}

impl RestTextTiming {
    /// Offset of the first list item from the cycle label.
    pub fn list_start(&self) -> f64 {
        self.move_up_delay + self.list_lead
    }

    /// Shortest cycle that fits the title entrance, the move-up, and the first list reveal.
    pub fn min_cycle_duration(&self) -> f64 {
        self.title_enter
            .max(self.move_up_delay + self.move_up_duration)
            .max(self.list_start() + self.item_fade)
    }

    /// Offset of the exit from the cycle label for a cycle of `duration` seconds.
    pub fn exit_offset(&self, duration: f64) -> f64 {
        (duration - self.exit_duration - self.exit_margin).max(0.0)
    }
}

/// Parameters of the list-item pacing calculation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PacingParams {
    /// Reading time reserved after the last item before the exit.
    pub min_read_time: f64,
    /// Upper bound on the gap between two items.
    pub max_step: f64,
    /// How far earlier lines move up when a new item appears, in pixels.
    pub push_distance: f64,
}

impl Default for PacingParams {
    fn default() -> Self {
        Self {
            min_read_time: 2.0,
            max_step: 3.2,
            push_distance: 30.0,
        }
    }
}

/// Every tunable of the show.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShowConfig {
    /// Panels per track.
    pub panel_count: u32,
    /// Degrees of spin offset between neighbouring panels.
    pub rotation_coef: f64,
    /// Sustain length of one rest cycle.
    pub rest_cycle_duration: f64,
    /// Bump length at the end of one rest cycle.
    pub rest_bump_duration: f64,
    /// How far before the end of panel 0's spins the split starts.
    pub split_lead: f64,
    /// Per-index delay of the split.
    pub split_stagger: f64,
    /// Primary panel whose rest cycles carry the rest text.
    pub text_host_panel: u32,
    /// Repeat mode of the show timeline.
    pub repeat: Repeat,
    /// Intro text timing.
    pub intro: IntroTiming,
    /// Rest text timing.
    pub rest_text: RestTextTiming,
    /// List pacing.
    pub pacing: PacingParams,
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            panel_count: 12,
            rotation_coef: 5.0,
            rest_cycle_duration: 10.0,
            rest_bump_duration: 1.0,
            split_lead: 0.8,
            split_stagger: 0.05,
            text_host_panel: 1,
            repeat: Repeat::Infinite,
            intro: IntroTiming::default(),
            rest_text: RestTextTiming::default(),
            pacing: PacingParams::default(),
        }
    }
}

fn non_negative(name: &str, v: f64) -> ChoreoResult<()> {
    if !v.is_finite() || v < 0.0 {
        return Err(ChoreoError::validation(format!(
            "{name} must be finite and >= 0, got {v}"
        )));
    }
    Ok(())
}

impl ShowConfig {
    /// Parse from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ChoreoResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ChoreoError::serde(format!("parse show config JSON: {e}")))
    }

    /// Parse from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ChoreoResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ChoreoError::validation(format!("open show config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Parse from a JSON string.
    pub fn from_json_str(s: &str) -> ChoreoResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Check every field before a timeline is built from it.
    pub fn validate(&self) -> ChoreoResult<()> {
        if self.panel_count < 2 {
            return Err(ChoreoError::validation("panel_count must be >= 2"));
        }
        if self.text_host_panel == 0 || self.text_host_panel >= self.panel_count {
            return Err(ChoreoError::validation(format!(
                "text_host_panel must be in 1..{}, got {}",
                self.panel_count, self.text_host_panel
            )));
        }
        if !self.rotation_coef.is_finite() {
            return Err(ChoreoError::validation("rotation_coef must be finite"));
        }
        if !(self.rest_cycle_duration.is_finite() && self.rest_cycle_duration > 0.0) {
            return Err(ChoreoError::validation("rest_cycle_duration must be > 0"));
        }
        for (name, v) in [
            ("rest_bump_duration", self.rest_bump_duration),
            ("split_lead", self.split_lead),
            ("split_stagger", self.split_stagger),
            ("intro.in_delay", self.intro.in_delay),
            ("intro.in_duration", self.intro.in_duration),
            ("intro.move_up_delay", self.intro.move_up_delay),
            ("intro.move_up_duration", self.intro.move_up_duration),
            ("intro.subtitle_delay", self.intro.subtitle_delay),
            ("intro.subtitle_duration", self.intro.subtitle_duration),
            ("intro.exit_at", self.intro.exit_at),
            ("intro.exit_delay", self.intro.exit_delay),
            ("intro.exit_duration", self.intro.exit_duration),
            ("rest_text.title_enter", self.rest_text.title_enter),
            ("rest_text.move_up_delay", self.rest_text.move_up_delay),
            ("rest_text.move_up_duration", self.rest_text.move_up_duration),
            ("rest_text.list_lead", self.rest_text.list_lead),
            ("rest_text.exit_duration", self.rest_text.exit_duration),
            ("rest_text.exit_margin", self.rest_text.exit_margin),
            ("rest_text.item_fade", self.rest_text.item_fade),
            ("pacing.min_read_time", self.pacing.min_read_time),
            ("pacing.max_step", self.pacing.max_step),
            ("pacing.push_distance", self.pacing.push_distance),
        ] {
            non_negative(name, v)?;
        }
        let min_cycle = self.rest_text.min_cycle_duration();
        if self.rest_cycle_duration < min_cycle {
            return Err(ChoreoError::validation(format!(
                "rest_cycle_duration {} is shorter than the rest text needs ({min_cycle})",
                self.rest_cycle_duration
            )));
        }
        if !self.intro.subtitle_rise.is_finite() || !self.rest_text.item_rise.is_finite() {
            return Err(ChoreoError::validation("rise distances must be finite"));
        }
        if !(0.0..=1.0).contains(&self.rest_text.dim_opacity) {
            return Err(ChoreoError::validation("rest_text.dim_opacity must be in [0, 1]"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/choreography/config.rs"]
mod tests;
