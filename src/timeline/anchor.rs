use std::collections::BTreeMap;

use crate::foundation::error::{ChoreoError, ChoreoResult};

/// Where a tween or label starts on the timeline clock.
///
/// Anchors are resolved exactly once, when the tween/label is appended. They can only refer to
/// things already on the timeline (the previous tween, declared labels, the current end).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum TimeAnchor {
    /// Absolute second.
    Absolute(f64),
    /// End of the most recently appended tween (`0` on an empty timeline).
    AfterPrevious,
    /// Start of the most recently appended tween (`0` on an empty timeline).
    StartOfPrevious,
    /// Current total duration plus an offset (usually negative, to overlap the tail).
    FromEnd(f64),
    /// A declared label plus an offset in seconds.
    AtLabel {
        /// Label name.
        name: String,
        /// Offset from the label, in seconds.
        offset: f64,
    },
}

impl TimeAnchor {
    /// Anchor exactly at a label.
    pub fn label(name: impl Into<String>) -> Self {
        Self::label_offset(name, 0.0)
    }

    /// Anchor at a label plus `offset` seconds.
    pub fn label_offset(name: impl Into<String>, offset: f64) -> Self {
        Self::AtLabel {
            name: name.into(),
            offset,
        }
    }
}

/// Start/end of an already-appended scheduling unit.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Span {
    /// Absolute start in seconds.
    pub start: f64,
    /// Absolute end in seconds.
    pub end: f64,
}

/// Everything an anchor is allowed to consult.
pub(crate) struct ResolveCtx<'a> {
    pub(crate) previous: Option<Span>,
    pub(crate) duration: f64,
    pub(crate) labels: &'a BTreeMap<String, f64>,
}

/// Resolve `anchor` to an absolute second.
///
/// Negative results clamp to `0`. Unknown labels are an error, never an implicit `0`.
pub(crate) fn resolve(anchor: &TimeAnchor, ctx: &ResolveCtx<'_>) -> ChoreoResult<f64> {
    let t = match anchor {
        TimeAnchor::Absolute(secs) => *secs,
        TimeAnchor::AfterPrevious => ctx.previous.map_or(0.0, |s| s.end),
        TimeAnchor::StartOfPrevious => ctx.previous.map_or(0.0, |s| s.start),
        TimeAnchor::FromEnd(offset) => ctx.duration + offset,
        TimeAnchor::AtLabel { name, offset } => {
            let at = ctx.labels.get(name).ok_or_else(|| {
                ChoreoError::schedule(format!("label '{name}' is not declared"))
            })?;
            at + offset
        }
    };
    if !t.is_finite() {
        return Err(ChoreoError::schedule(format!(
            "anchor {anchor:?} resolved to a non-finite time"
        )));
    }
    Ok(t.max(0.0))
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/anchor.rs"]
mod tests;
