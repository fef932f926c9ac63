use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    animation::property::Property,
    foundation::core::Viewport,
    foundation::error::{ChoreoError, ChoreoResult},
    scene::entity::{EntityId, TextGroupId},
    timeline::timeline::TimelineId,
};

/// Text content of one overlay group.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextGroup {
    /// Heading line.
    pub title: Option<String>,
    /// Single subtitle line, shown when the group has no list items.
    pub subtitle: Option<String>,
    /// List items, revealed one after another.
    pub items: Vec<String>,
}

impl TextGroup {
    /// Group with a title and list items.
    pub fn list(
        title: impl Into<String>,
        items: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            subtitle: None,
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Group with a title and a subtitle.
    pub fn headline(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            subtitle: Some(subtitle.into()),
            items: Vec::new(),
        }
    }
}

/// The host surface the show is played on.
///
/// Queried only while a timeline is being built; never during playback.
pub trait Stage {
    /// Current viewport size.
    fn viewport(&self) -> Viewport;

    /// Return `true` if a panel element exists for `id`.
    fn resolves(&self, id: EntityId) -> bool;

    /// Content of a text group, if the host has one.
    fn text_group(&self, id: TextGroupId) -> Option<TextGroup>;

    /// Return `false` if there is no element a user could activate the show from.
    fn has_activation_surface(&self) -> bool {
        true
    }
}

/// One property write produced by a timeline tick.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PropertyWrite {
    /// Timeline instance that produced the write.
    pub timeline: TimelineId,
    /// Written entity.
    pub entity: EntityId,
    /// Written property.
    pub property: Property,
    /// New value.
    pub value: f64,
}

/// Receiver of property writes (the host's element styles).
pub trait PropertySink {
    /// Apply one write.
    fn apply(&mut self, write: PropertyWrite);
}

impl PropertySink for Vec<PropertyWrite> {
    fn apply(&mut self, write: PropertyWrite) {
        self.push(write);
    }
}

/// Entities resolved against a stage at build time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TargetRegistry {
    entities: BTreeSet<EntityId>,
    groups: BTreeMap<TextGroupId, TextGroup>,
}

impl TargetRegistry {
    /// Resolve panels `0..panel_count` and every known text group.
    pub fn resolve(stage: &dyn Stage, panel_count: u32) -> Self {
        let mut reg = Self::default();
        for i in 0..panel_count {
            for id in [EntityId::Primary(i), EntityId::Secondary(i)] {
                if stage.resolves(id) {
                    reg.entities.insert(id);
                } else {
                    tracing::debug!(entity = %id, "panel not present on stage");
                }
            }
        }
        for g in TextGroupId::all() {
            if let Some(group) = stage.text_group(g) {
                reg.insert_group(g, group);
            }
        }
        reg
    }

    fn insert_group(&mut self, id: TextGroupId, group: TextGroup) {
        self.entities.insert(EntityId::Group(id));
        if group.title.is_some() {
            self.entities.insert(EntityId::Title(id));
        }
        if group.subtitle.is_some() {
            self.entities.insert(EntityId::Subtitle(id));
        }
        for n in 0..group.items.len() {
            self.entities.insert(EntityId::Item(id, n as u32));
        }
        self.groups.insert(id, group);
    }

    /// Return `true` if writes to `id` reach the host.
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains(&id)
    }

    /// Resolved text group content.
    pub fn group(&self, id: TextGroupId) -> Option<&TextGroup> {
        self.groups.get(&id)
    }

    /// Resolved text group ids, in show order.
    pub fn group_ids(&self) -> impl Iterator<Item = TextGroupId> + '_ {
        self.groups.keys().copied()
    }

    /// Number of resolved entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Return `true` if nothing resolved.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Sink adapter that drops writes to entities the registry did not resolve.
pub struct RegistrySink<'r, 's> {
    registry: &'r TargetRegistry,
    inner: &'s mut dyn PropertySink,
}

impl<'r, 's> RegistrySink<'r, 's> {
    /// Wrap `inner`.
    pub fn new(registry: &'r TargetRegistry, inner: &'s mut dyn PropertySink) -> Self {
        Self { registry, inner }
    }
}

impl PropertySink for RegistrySink<'_, '_> {
    fn apply(&mut self, write: PropertyWrite) {
        if self.registry.contains(write.entity) {
            self.inner.apply(write);
        }
    }
}

/// JSON description of a static stage.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StageDef {
    /// Viewport width in pixels.
    pub width: f64,
    /// Viewport height in pixels.
    pub height: f64,
    /// Number of primary panel elements on the page.
    pub primary_panels: u32,
    /// Number of secondary panel elements on the page.
    pub secondary_panels: u32,
    /// Whether an activation surface exists.
    pub activation_surface: bool,
    /// Text content of the intro group.
    pub intro: Option<TextGroup>,
    /// Text content of rest groups `1..=5`, in order. Shorter lists leave later groups missing.
    pub rest: Vec<Option<TextGroup>>,
}

impl Default for StageDef {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            primary_panels: 12,
            secondary_panels: 12,
            activation_surface: true,
            intro: None,
            rest: Vec::new(),
        }
    }
}

impl StageDef {
    /// Parse from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ChoreoResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ChoreoError::serde(format!("parse stage JSON: {e}")))
    }

    /// Parse from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ChoreoResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ChoreoError::validation(format!("open stage JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Parse from a JSON string.
    pub fn from_json_str(s: &str) -> ChoreoResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Sample stage with an intro and five rest groups.
    pub fn demo() -> Self {
        Self {
            intro: Some(TextGroup::headline("Panels in motion", "a looping show")),
            rest: vec![
                Some(TextGroup::list(
                    "Scheduling",
                    ["absolute times", "after previous", "labels with offsets"],
                )),
                Some(TextGroup::headline("Choreography", "derived from the viewport")),
                Some(TextGroup::list(
                    "Pacing",
                    ["first item", "second item", "third item", "fourth item"],
                )),
                Some(TextGroup::headline("Rebuilds", "on every resize")),
                Some(TextGroup::list("Loop", ["reset", "repeat"])),
            ],
            ..Self::default()
        }
    }

    /// Build the stage.
    pub fn into_stage(self) -> ChoreoResult<StaticStage> {
        let viewport = Viewport::new(self.width, self.height)?;
        let mut groups = BTreeMap::new();
        if let Some(g) = self.intro {
            groups.insert(TextGroupId::Intro, g);
        }
        for (idx, g) in self.rest.into_iter().enumerate() {
            let Some(g) = g else {
                continue;
            };
            let cycle = u8::try_from(idx + 1)
                .map_err(|_| ChoreoError::validation("too many rest text groups"))?;
            groups.insert(TextGroupId::rest(cycle)?, g);
        }
        Ok(StaticStage {
            viewport,
            primary_panels: self.primary_panels,
            secondary_panels: self.secondary_panels,
            activation_surface: self.activation_surface,
            groups,
        })
    }
}

/// In-memory stage with a resizable viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct StaticStage {
    viewport: Viewport,
    primary_panels: u32,
    secondary_panels: u32,
    activation_surface: bool,
    groups: BTreeMap<TextGroupId, TextGroup>,
}

impl StaticStage {
    /// Stage with `panels` primary and secondary panels and no text.
    pub fn new(viewport: Viewport, panels: u32) -> Self {
        Self {
            viewport,
            primary_panels: panels,
            secondary_panels: panels,
            activation_surface: true,
            groups: BTreeMap::new(),
        }
    }

    /// Add or replace a text group.
    pub fn with_group(mut self, id: TextGroupId, group: TextGroup) -> Self {
        self.groups.insert(id, group);
        self
    }

    /// Remove the activation surface.
    pub fn without_activation_surface(mut self) -> Self {
        self.activation_surface = false;
        self
    }

    /// Change the viewport; takes effect at the next rebuild.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}

impl Stage for StaticStage {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resolves(&self, id: EntityId) -> bool {
        match id {
            EntityId::Primary(i) => i < self.primary_panels,
            EntityId::Secondary(i) => i < self.secondary_panels,
            _ => id.text_group().is_some_and(|g| self.groups.contains_key(&g)),
        }
    }

    fn text_group(&self, id: TextGroupId) -> Option<TextGroup> {
        self.groups.get(&id).cloned()
    }

    fn has_activation_surface(&self) -> bool {
        self.activation_surface
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/stage.rs"]
mod tests;
