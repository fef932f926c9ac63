use super::*;

fn labels() -> BTreeMap<String, f64> {
    let mut m = BTreeMap::new();
    m.insert("split".to_owned(), 9.4);
    m
}

fn ctx(labels: &BTreeMap<String, f64>) -> ResolveCtx<'_> {
    ResolveCtx {
        previous: Some(Span {
            start: 2.0,
            end: 5.0,
        }),
        duration: 10.2,
        labels,
    }
}

#[test]
fn absolute_and_previous_anchors() {
    let l = labels();
    let c = ctx(&l);
    assert_eq!(resolve(&TimeAnchor::Absolute(1.5), &c).unwrap(), 1.5);
    assert_eq!(resolve(&TimeAnchor::AfterPrevious, &c).unwrap(), 5.0);
    assert_eq!(resolve(&TimeAnchor::StartOfPrevious, &c).unwrap(), 2.0);
}

#[test]
fn empty_timeline_previous_is_zero() {
    let l = BTreeMap::new();
    let c = ResolveCtx {
        previous: None,
        duration: 0.0,
        labels: &l,
    };
    assert_eq!(resolve(&TimeAnchor::AfterPrevious, &c).unwrap(), 0.0);
    assert_eq!(resolve(&TimeAnchor::StartOfPrevious, &c).unwrap(), 0.0);
}

#[test]
fn from_end_overlaps_tail() {
    let l = labels();
    let t = resolve(&TimeAnchor::FromEnd(-0.8), &ctx(&l)).unwrap();
    assert!((t - 9.4).abs() < 1e-12);
}

#[test]
fn label_offsets_add() {
    let l = labels();
    let t = resolve(&TimeAnchor::label_offset("split", 0.05), &ctx(&l)).unwrap();
    assert!((t - 9.45).abs() < 1e-12);
    assert_eq!(resolve(&TimeAnchor::label("split"), &ctx(&l)).unwrap(), 9.4);
}

#[test]
fn undeclared_label_is_an_error_not_zero() {
    let l = labels();
    let err = resolve(&TimeAnchor::label("nope"), &ctx(&l)).unwrap_err();
    assert!(err.to_string().contains("label 'nope' is not declared"));
}

#[test]
fn negative_results_clamp_to_zero() {
    let l = labels();
    assert_eq!(resolve(&TimeAnchor::FromEnd(-99.0), &ctx(&l)).unwrap(), 0.0);
    assert_eq!(resolve(&TimeAnchor::Absolute(-1.0), &ctx(&l)).unwrap(), 0.0);
}

#[test]
fn non_finite_is_rejected() {
    let l = labels();
    assert!(resolve(&TimeAnchor::Absolute(f64::NAN), &ctx(&l)).is_err());
}
