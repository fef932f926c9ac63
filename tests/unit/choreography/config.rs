use super::*;

#[test]
fn defaults_match_the_show() {
    let c = ShowConfig::default();
    assert_eq!(c.panel_count, 12);
    assert_eq!(c.rotation_coef, 5.0);
    assert_eq!(c.rest_cycle_duration, 10.0);
    assert_eq!(c.text_host_panel, 1);
    assert_eq!(c.repeat, Repeat::Infinite);
    assert_eq!(c.rest_text.list_start(), 1.3);
    assert_eq!(c.rest_text.exit_offset(10.0), 9.0);
    assert!(c.validate().is_ok());
}

#[test]
fn partial_json_keeps_defaults() {
    let c = ShowConfig::from_json_str(
        r#"{ "panel_count": 6, "pacing": { "max_step": 2.0 }, "repeat": { "count": 2 } }"#,
    )
    .unwrap();
    assert_eq!(c.panel_count, 6);
    assert_eq!(c.pacing.max_step, 2.0);
    assert_eq!(c.pacing.min_read_time, 2.0);
    assert_eq!(c.repeat, Repeat::Count(2));
    assert_eq!(c.intro, IntroTiming::default());
}

#[test]
fn unknown_fields_are_rejected() {
    let err = ShowConfig::from_json_str(r#"{ "panels": 6 }"#).unwrap_err();
    assert!(matches!(err, ChoreoError::Serde(_)));
    assert!(err.to_string().starts_with("serialization error: parse show config JSON"));
}

#[test]
fn validation_catches_bad_values() {
    let bad = [
        ShowConfig {
            panel_count: 1,
            ..ShowConfig::default()
        },
        ShowConfig {
            text_host_panel: 0,
            ..ShowConfig::default()
        },
        ShowConfig {
            text_host_panel: 12,
            ..ShowConfig::default()
        },
        ShowConfig {
            rest_cycle_duration: 0.0,
            ..ShowConfig::default()
        },
        ShowConfig {
            rest_cycle_duration: 1.0,
            ..ShowConfig::default()
        },
        ShowConfig {
            split_lead: -1.0,
            ..ShowConfig::default()
        },
        ShowConfig {
            rotation_coef: f64::NAN,
            ..ShowConfig::default()
        },
        ShowConfig {
            rest_text: RestTextTiming {
                dim_opacity: 1.5,
                ..RestTextTiming::default()
            },
            ..ShowConfig::default()
        },
    ];
    for c in bad {
        assert!(
            matches!(c.validate(), Err(ChoreoError::Validation(_))),
            "{c:?}"
        );
    }
}

#[test]
fn missing_file_is_a_validation_error() {
    let err = ShowConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, ChoreoError::Validation(_)));
}

#[test]
fn rest_cycle_must_fit_the_fixed_text_phases() {
    let timing = RestTextTiming::default();
    assert!((timing.min_cycle_duration() - 1.8).abs() < 1e-9);

    let fits = ShowConfig {
        rest_cycle_duration: timing.min_cycle_duration(),
        ..ShowConfig::default()
    };
    assert!(fits.validate().is_ok());

    let short = ShowConfig {
        rest_cycle_duration: 1.7,
        ..ShowConfig::default()
    };
    let err = short.validate().unwrap_err();
    assert!(err.to_string().contains("rest_cycle_duration"), "{err}");
}
