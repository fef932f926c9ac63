use super::*;

#[test]
fn single_item_has_no_step() {
    assert_eq!(pace(0.0, 10.0, 2.0, 3.2, 1), 0.0);
    assert_eq!(pace(0.0, 10.0, 2.0, 3.2, 0), 0.0);
}

#[test]
fn step_spreads_items_over_the_window() {
    assert_eq!(pace(0.0, 10.0, 2.0, 3.2, 5), 2.0);
}

#[test]
fn step_is_capped() {
    assert_eq!(pace(0.0, 10.0, 2.0, 3.2, 2), 3.2);
}

#[test]
fn tight_windows_fall_back() {
    assert_eq!(pace(0.0, 2.0, 2.0, 3.2, 3), FALLBACK_STEP);
    assert_eq!(pace(5.0, 1.0, 2.0, 3.2, 3), FALLBACK_STEP);
}

#[test]
fn never_returns_an_illegible_step() {
    for count in 0..40 {
        for end in 0..30 {
            let s = pace(1.3, f64::from(end) * 0.5, 2.0, 3.2, count);
            assert!(s == 0.0 || s >= MIN_LEGIBLE_STEP, "count={count} end={end} step={s}");
        }
    }
}

#[test]
fn overrun_detection() {
    let step = pace(1.3, 9.0, 2.0, 3.2, 4);
    assert!(!overruns(1.3, 9.0, 2.0, step, 4));
    let step = pace(1.3, 9.0, 2.0, 3.2, 30);
    assert_eq!(step, FALLBACK_STEP);
    assert!(overruns(1.3, 9.0, 2.0, step, 30));
    assert!(!overruns(1.3, 9.0, 2.0, 0.0, 0));
}
