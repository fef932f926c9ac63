use super::*;
use crate::animation::ease::Ease;

const P0: EntityId = EntityId::Primary(0);
const P1: EntityId = EntityId::Primary(1);

fn w(duration: f64, to: f64) -> TweenSpec {
    TweenSpec::new(duration, Ease::Linear).to(Property::Width, to)
}

fn tl() -> Timeline {
    Timeline::new(TimelineId(1), Repeat::Infinite)
}

#[test]
fn after_previous_chains_and_advances_cursor() {
    let mut t = tl();
    let a = t.append(P0, w(1.0, 10.0), TimeAnchor::AfterPrevious).unwrap();
    let b = t.append(P0, w(2.0, 20.0), TimeAnchor::AfterPrevious).unwrap();
    assert_eq!((a.start, a.end), (0.0, 1.0));
    assert_eq!((b.start, b.end), (1.0, 3.0));
    assert_eq!(t.cursor(), 3.0);
    assert_eq!(t.duration(), 3.0);
}

#[test]
fn cursor_follows_the_previous_tween_not_the_max_end() {
    let mut t = tl();
    t.append(P0, w(5.0, 10.0), TimeAnchor::Absolute(0.0)).unwrap();
    t.append(P1, w(1.0, 10.0), TimeAnchor::Absolute(0.0)).unwrap();
    assert_eq!(t.cursor(), 1.0);
    assert_eq!(t.duration(), 5.0);
    let s = t.append(P1, w(1.0, 0.0), TimeAnchor::AfterPrevious).unwrap();
    assert_eq!(s.start, 1.0);
}

#[test]
fn from_end_and_labels() {
    let mut t = tl();
    t.append(P0, w(10.2, 10.0), TimeAnchor::Absolute(0.0)).unwrap();
    let at = t.add_label("split", TimeAnchor::FromEnd(-0.8)).unwrap();
    assert!((at - 9.4).abs() < 1e-9);
    let s = t
        .append(P1, w(1.0, 5.0), TimeAnchor::label_offset("split", 0.05))
        .unwrap();
    assert!((s.start - 9.45).abs() < 1e-9);
    assert_eq!(t.label("split"), Some(at));
}

#[test]
fn undeclared_label_is_a_schedule_error() {
    let mut t = tl();
    let err = t
        .append(P0, w(1.0, 1.0), TimeAnchor::label("nope"))
        .unwrap_err();
    assert!(matches!(err, ChoreoError::Schedule(_)));
    assert!(t.tweens().is_empty());
}

#[test]
fn duplicate_label_is_rejected() {
    let mut t = tl();
    t.add_label("a", TimeAnchor::Absolute(1.0)).unwrap();
    assert!(t.add_label("a", TimeAnchor::Absolute(2.0)).is_err());
    assert_eq!(t.label("a"), Some(1.0));
}

#[test]
fn to_tween_captures_scheduled_value_at_start() {
    let mut t = tl();
    t.append(
        P0,
        TweenSpec::new(1.0, Ease::Linear).from_to(Property::Width, 0.0, 100.0),
        TimeAnchor::Absolute(0.0),
    )
    .unwrap();
    // starts halfway through the first tween
    t.append(P0, w(1.0, 0.0), TimeAnchor::Absolute(0.5)).unwrap();
    let second = &t.tweens()[1];
    assert!((second.channels[0].from - 50.0).abs() < 1e-9);
}

#[test]
fn by_tween_is_relative_to_captured_value() {
    let mut t = tl();
    t.append(
        P0,
        TweenSpec::new(1.0, Ease::Linear).to(Property::Rotation, 90.0),
        TimeAnchor::AfterPrevious,
    )
    .unwrap();
    t.append(
        P0,
        TweenSpec::new(1.0, Ease::Linear).by(Property::Rotation, 30.0),
        TimeAnchor::AfterPrevious,
    )
    .unwrap();
    let c = t.tweens()[1].channels[0];
    assert_eq!((c.from, c.to), (90.0, 120.0));
}

#[test]
fn explicit_from_becomes_base_value() {
    let mut t = tl();
    t.append(
        P0,
        TweenSpec::new(1.0, Ease::Linear).from_to(Property::Rotation, -360.0, 0.0),
        TimeAnchor::Absolute(2.0),
    )
    .unwrap();
    let f = t.sample(0.0);
    assert_eq!(f.get(P0, Property::Rotation), Some(-360.0));
}

#[test]
fn set_base_overrides_captured_start() {
    let mut t = tl();
    let g = EntityId::Group(crate::scene::entity::TextGroupId::Intro);
    t.set_base(g, Property::AutoAlpha, 0.0).unwrap();
    t.append(
        g,
        TweenSpec::set().to(Property::AutoAlpha, 1.0),
        TimeAnchor::Absolute(3.0),
    )
    .unwrap();
    assert_eq!(t.sample(2.9).get(g, Property::AutoAlpha), Some(0.0));
    assert_eq!(t.sample(3.0).get(g, Property::AutoAlpha), Some(1.0));
}

#[test]
fn later_start_wins_on_overlap() {
    let mut t = tl();
    t.append(P0, w(4.0, 100.0), TimeAnchor::Absolute(0.0)).unwrap();
    t.append(
        P0,
        TweenSpec::new(1.0, Ease::Linear).from_to(Property::Width, 0.0, 10.0),
        TimeAnchor::Absolute(1.0),
    )
    .unwrap();
    let v = t.sample(3.0).get(P0, Property::Width).unwrap();
    assert_eq!(v, 10.0);
}

#[test]
fn identical_start_applies_in_registration_order() {
    let mut t = tl();
    t.append(P0, w(1.0, 10.0), TimeAnchor::Absolute(1.0)).unwrap();
    t.append(P0, w(1.0, 20.0), TimeAnchor::Absolute(1.0)).unwrap();
    assert_eq!(t.tweens()[0].seq, 0);
    assert_eq!(t.tweens()[1].seq, 1);
    assert_eq!(t.sample(2.0).get(P0, Property::Width), Some(20.0));
}

#[test]
fn group_resolves_anchor_once() {
    let mut t = tl();
    t.append(P0, w(2.0, 1.0), TimeAnchor::Absolute(0.0)).unwrap();
    let s = t
        .append_group(&[P0, P1], w(1.0, 5.0), TimeAnchor::AfterPrevious)
        .unwrap();
    assert_eq!((s.start, s.end), (2.0, 3.0));
    assert!(t.tweens().iter().filter(|x| x.start == 2.0).count() == 2);
    assert_eq!(t.cursor(), 3.0);
}

#[test]
fn infinite_repeat_restarts_from_time_zero() {
    let mut t = tl();
    t.append(
        P0,
        TweenSpec::new(2.0, Ease::Linear).from_to(Property::X, 0.0, 100.0),
        TimeAnchor::Absolute(0.0),
    )
    .unwrap();
    t.start(10.0).unwrap();
    assert_eq!(t.local_time(11.0), Some(1.0));
    assert_eq!(t.local_time(12.5), Some(0.5));
    assert_eq!(t.local_time(110.0), Some(0.0));
}

#[test]
fn finite_repeat_holds_final_state() {
    let mut t = Timeline::new(TimelineId(1), Repeat::Count(1));
    t.append(P0, w(2.0, 100.0), TimeAnchor::Absolute(0.0)).unwrap();
    t.start(0.0).unwrap();
    assert_eq!(t.local_time(3.0), Some(1.0));
    assert_eq!(t.local_time(4.0), Some(2.0));
    assert_eq!(t.local_time(50.0), Some(2.0));
}

#[test]
fn tick_writes_only_while_playing() {
    let mut t = tl();
    t.append(P0, w(1.0, 100.0), TimeAnchor::Absolute(0.0)).unwrap();
    let mut sink: Vec<PropertyWrite> = Vec::new();
    assert_eq!(t.tick(0.5, &mut sink), 0);
    t.start(0.0).unwrap();
    assert_eq!(t.tick(0.5, &mut sink), 1);
    assert_eq!(sink[0].timeline, TimelineId(1));
    assert!((sink[0].value - 50.0).abs() < 1e-9);
}

#[test]
fn kill_is_total() {
    let mut t = tl();
    t.add_label("a", TimeAnchor::Absolute(0.0)).unwrap();
    t.append(P0, w(1.0, 100.0), TimeAnchor::Absolute(0.0)).unwrap();
    t.start(0.0).unwrap();
    t.kill();
    let mut sink: Vec<PropertyWrite> = Vec::new();
    assert_eq!(t.tick(0.5, &mut sink), 0);
    assert!(sink.is_empty());
    assert!(t.tweens().is_empty());
    assert_eq!(t.label("a"), None);
    assert!(t.is_killed());
    assert!(t.start(1.0).is_err());
    assert!(t.append(P0, w(1.0, 1.0), TimeAnchor::Absolute(0.0)).is_err());
}

#[test]
fn editing_after_start_is_rejected() {
    let mut t = tl();
    t.append(P0, w(1.0, 100.0), TimeAnchor::Absolute(0.0)).unwrap();
    t.start(0.0).unwrap();
    assert!(matches!(
        t.add_label("late", TimeAnchor::Absolute(0.0)),
        Err(ChoreoError::Schedule(_))
    ));
}

#[test]
fn invalid_spec_is_rejected_before_resolution() {
    let mut t = tl();
    let err = t
        .append(P0, TweenSpec::new(1.0, Ease::Linear), TimeAnchor::label("nope"))
        .unwrap_err();
    assert!(matches!(err, ChoreoError::Validation(_)));
}
