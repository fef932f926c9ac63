use std::fmt;

use crate::foundation::error::{ChoreoError, ChoreoResult};

/// Number of rest cycles (and rest text groups) in one loop of the show.
pub const REST_CYCLES: u8 = 5;

/// Stable id of a text overlay group.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum TextGroupId {
    /// The opening title shown before the panels split.
    Intro,
    /// Text bound to rest cycle `1..=5`.
    Rest(u8),
}

impl TextGroupId {
    /// Validated rest-cycle group id.
    pub fn rest(cycle: u8) -> ChoreoResult<Self> {
        if cycle == 0 || cycle > REST_CYCLES {
            return Err(ChoreoError::validation(format!(
                "rest text group must be in 1..={REST_CYCLES}, got {cycle}"
            )));
        }
        Ok(Self::Rest(cycle))
    }

    /// The intro group followed by every rest group, in show order.
    pub fn all() -> impl Iterator<Item = Self> {
        std::iter::once(Self::Intro).chain((1..=REST_CYCLES).map(Self::Rest))
    }
}

impl fmt::Display for TextGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intro => f.write_str("intro"),
            Self::Rest(n) => write!(f, "rest-{n}"),
        }
    }
}

/// Stable id of anything the show animates.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum EntityId {
    /// Primary panel `0..panel_count`.
    Primary(u32),
    /// Secondary panel `0..panel_count`.
    Secondary(u32),
    /// Container of a text group (visibility only).
    Group(TextGroupId),
    /// Title line of a text group.
    Title(TextGroupId),
    /// Subtitle line of a text group.
    Subtitle(TextGroupId),
    /// List item `n` of a text group, in reveal order.
    Item(TextGroupId, u32),
}

impl EntityId {
    /// Return `true` for primary and secondary panels.
    pub fn is_panel(self) -> bool {
        matches!(self, Self::Primary(_) | Self::Secondary(_))
    }

    /// Text group this entity belongs to, if any.
    pub fn text_group(self) -> Option<TextGroupId> {
        match self {
            Self::Primary(_) | Self::Secondary(_) => None,
            Self::Group(g) | Self::Title(g) | Self::Subtitle(g) | Self::Item(g, _) => Some(g),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary(i) => write!(f, "primary[{i}]"),
            Self::Secondary(i) => write!(f, "secondary[{i}]"),
            Self::Group(g) => write!(f, "{g}"),
            Self::Title(g) => write!(f, "{g}.title"),
            Self::Subtitle(g) => write!(f, "{g}.subtitle"),
            Self::Item(g, n) => write!(f, "{g}.item[{n}]"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/entity.rs"]
mod tests;
