use super::*;

const ALL: [Ease; 6] = [
    Ease::Linear,
    Ease::OutQuad,
    Ease::InSine,
    Ease::OutSine,
    Ease::InOutSine,
    Ease::OutExpo,
];

#[test]
fn endpoints_are_exact() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn out_of_range_progress_is_clamped() {
    for ease in ALL {
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(7.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn in_out_sine_is_symmetric_at_midpoint() {
    assert!((Ease::InOutSine.apply(0.5) - 0.5).abs() < 1e-12);
}

#[test]
fn decelerating_eases_lead_linear() {
    assert!(Ease::OutExpo.apply(0.2) > 0.2);
    assert!(Ease::OutSine.apply(0.2) > 0.2);
    assert!(Ease::InSine.apply(0.2) < 0.2);
}
