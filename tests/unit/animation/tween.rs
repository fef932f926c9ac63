use super::*;

#[test]
fn builder_collects_tracks_in_order() {
    let spec = TweenSpec::new(2.0, Ease::Linear)
        .to(Property::X, 10.0)
        .by(Property::Rotation, 30.0)
        .from_to(Property::Opacity, 0.0, 1.0);
    assert_eq!(spec.props.len(), 3);
    assert_eq!(spec.props[0].to, Target::To(10.0));
    assert_eq!(spec.prop(Property::Rotation).unwrap().to, Target::By(30.0));
    assert_eq!(spec.prop(Property::Opacity).unwrap().from, Some(0.0));
    assert!(spec.prop(Property::Width).is_none());
    spec.validate().unwrap();
}

#[test]
fn validate_rejects_duplicate_property() {
    let spec = TweenSpec::new(1.0, Ease::Linear)
        .to(Property::X, 1.0)
        .to(Property::X, 2.0);
    assert!(spec.validate().is_err());
}

#[test]
fn validate_rejects_bad_duration_and_values() {
    assert!(
        TweenSpec::new(-1.0, Ease::Linear)
            .to(Property::X, 1.0)
            .validate()
            .is_err()
    );
    assert!(
        TweenSpec::new(1.0, Ease::Linear)
            .to(Property::X, f64::NAN)
            .validate()
            .is_err()
    );
    assert!(TweenSpec::new(1.0, Ease::Linear).validate().is_err());
}

#[test]
fn set_is_instant() {
    let spec = TweenSpec::set().to(Property::AutoAlpha, 1.0);
    assert_eq!(spec.duration, 0.0);
    spec.validate().unwrap();
}

#[test]
fn progress_is_clamped_and_instant_tweens_snap() {
    let tween = Tween {
        seq: 0,
        target: EntityId::Primary(0),
        start: 2.0,
        duration: 4.0,
        ease: Ease::Linear,
        channels: vec![Channel {
            property: Property::X,
            from: 0.0,
            to: 8.0,
        }],
    };
    assert_eq!(tween.end(), 6.0);
    assert_eq!(tween.progress(1.0), 0.0);
    assert_eq!(tween.progress(4.0), 0.5);
    assert_eq!(tween.progress(9.0), 1.0);
    assert_eq!(tween.channel(Property::X).unwrap().value(0.5), 4.0);

    let instant = Tween {
        duration: 0.0,
        ..tween
    };
    assert_eq!(instant.progress(1.999), 0.0);
    assert_eq!(instant.progress(2.0), 1.0);
}
