use super::*;
use crate::animation::ease::Ease;
use crate::animation::tween::TweenSpec;
use crate::timeline::anchor::TimeAnchor;
use crate::timeline::timeline::{Timeline, TimelineId};

fn build(width: f64) -> Timeline {
    let mut t = Timeline::new(TimelineId(7), Repeat::Infinite);
    t.append(
        EntityId::Primary(0),
        TweenSpec::new(1.0, Ease::InOutSine).from_to(Property::Width, 0.0, width),
        TimeAnchor::Absolute(0.0),
    )
    .unwrap();
    t.add_label("mid", TimeAnchor::FromEnd(-0.5)).unwrap();
    t.append(
        EntityId::Primary(1),
        TweenSpec::new(1.0, Ease::Linear).by(Property::Rotation, 30.0),
        TimeAnchor::label("mid"),
    )
    .unwrap();
    t
}

#[test]
fn identical_builds_have_identical_fingerprints() {
    let a = build(200.0).schedule();
    let b = build(200.0).schedule();
    assert_eq!(a, b);
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_eq!(a.to_json_pretty().unwrap(), b.to_json_pretty().unwrap());
}

#[test]
fn fingerprint_tracks_resolved_values() {
    let a = build(200.0).schedule();
    let b = build(201.0).schedule();
    assert_ne!(a.fingerprint(), b.fingerprint());
}

#[test]
fn timeline_id_is_not_part_of_the_schedule() {
    let mut other = Timeline::new(TimelineId(99), Repeat::Infinite);
    other
        .append(
            EntityId::Primary(0),
            TweenSpec::new(1.0, Ease::InOutSine).from_to(Property::Width, 0.0, 200.0),
            TimeAnchor::Absolute(0.0),
        )
        .unwrap();
    other.add_label("mid", TimeAnchor::FromEnd(-0.5)).unwrap();
    other
        .append(
            EntityId::Primary(1),
            TweenSpec::new(1.0, Ease::Linear).by(Property::Rotation, 30.0),
            TimeAnchor::label("mid"),
        )
        .unwrap();
    assert_eq!(
        other.schedule().fingerprint(),
        build(200.0).schedule().fingerprint()
    );
}

#[test]
fn accessors() {
    let s = build(200.0).schedule();
    assert_eq!(s.label("mid"), Some(0.5));
    assert_eq!(s.tweens_for(EntityId::Primary(1)).count(), 1);
    assert_eq!(s.duration, 1.5);
    assert_eq!(s.base.len(), 2);
}

#[test]
fn json_names_entities_and_properties() {
    let json = build(200.0).schedule().to_json_pretty().unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["labels"][0]["name"], "mid");
    assert_eq!(v["repeat"], "infinite");
    assert!(json.contains("\"Width\""));
}
