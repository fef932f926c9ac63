use super::*;

fn stage() -> StaticStage {
    StaticStage::new(Viewport::new(1200.0, 800.0).unwrap(), 3)
        .with_group(TextGroupId::Rest(2), TextGroup::list("t", ["a", "b"]))
}

fn write(entity: EntityId) -> PropertyWrite {
    PropertyWrite {
        timeline: TimelineId(1),
        entity,
        property: Property::Opacity,
        value: 1.0,
    }
}

#[test]
fn registry_resolves_panels_and_groups() {
    let reg = TargetRegistry::resolve(&stage(), 4);
    assert!(reg.contains(EntityId::Primary(2)));
    assert!(reg.contains(EntityId::Secondary(0)));
    assert!(!reg.contains(EntityId::Primary(3)));
    assert!(reg.contains(EntityId::Item(TextGroupId::Rest(2), 1)));
    assert!(!reg.contains(EntityId::Item(TextGroupId::Rest(2), 2)));
    assert!(!reg.contains(EntityId::Subtitle(TextGroupId::Rest(2))));
    assert!(reg.group(TextGroupId::Rest(1)).is_none());
    assert_eq!(reg.group_ids().collect::<Vec<_>>(), vec![TextGroupId::Rest(2)]);
}

#[test]
fn registry_sink_drops_unresolved_targets() {
    let reg = TargetRegistry::resolve(&stage(), 4);
    let mut out: Vec<PropertyWrite> = Vec::new();
    {
        let mut sink = RegistrySink::new(&reg, &mut out);
        sink.apply(write(EntityId::Primary(0)));
        sink.apply(write(EntityId::Primary(3)));
        sink.apply(write(EntityId::Title(TextGroupId::Intro)));
    }
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].entity, EntityId::Primary(0));
}

#[test]
fn stage_def_parses_with_defaults() {
    let def = StageDef::from_json_str(
        r#"{ "width": 640, "height": 480, "rest": [null, {"title": "x", "subtitle": "y"}] }"#,
    )
    .unwrap();
    assert_eq!(def.primary_panels, 12);
    let st = def.into_stage().unwrap();
    assert_eq!(st.viewport(), Viewport::new(640.0, 480.0).unwrap());
    assert!(st.text_group(TextGroupId::Rest(1)).is_none());
    assert_eq!(
        st.text_group(TextGroupId::Rest(2)),
        Some(TextGroup::headline("x", "y"))
    );
}

#[test]
fn stage_def_rejects_unknown_fields_and_extra_groups() {
    assert!(matches!(
        StageDef::from_json_str(r#"{ "panels": 3 }"#),
        Err(ChoreoError::Serde(_))
    ));
    let def = StageDef {
        rest: vec![None; 6],
        ..StageDef::default()
    };
    assert!(def.into_stage().is_ok());
    let def = StageDef {
        rest: (0..6).map(|_| Some(TextGroup::default())).collect(),
        ..StageDef::default()
    };
    assert!(matches!(def.into_stage(), Err(ChoreoError::Validation(_))));
}

#[test]
fn demo_stage_has_every_group() {
    let st = StageDef::demo().into_stage().unwrap();
    for g in TextGroupId::all() {
        assert!(st.text_group(g).is_some(), "{g}");
    }
    assert!(st.has_activation_surface());
    assert!(!st.clone().without_activation_surface().has_activation_surface());
}
