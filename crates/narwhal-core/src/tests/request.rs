use crate::*;
use serde_json::json;
use std::path::Path;

#[test]
fn chart_kind_parses_case_insensitively() {
    assert_eq!("bar".parse::<ChartKind>().unwrap(), ChartKind::Bar);
    assert_eq!(" Pie ".parse::<ChartKind>().unwrap(), ChartKind::Pie);
    assert_eq!("FLOWCHART".parse::<ChartKind>().unwrap(), ChartKind::Flowchart);

    let err = "histogram".parse::<ChartKind>().unwrap_err();
    assert!(matches!(err, Error::UnknownKind { ref kind } if kind == "histogram"));
}

#[test]
fn chart_kind_display_and_artifact_type() {
    for kind in ChartKind::ALL {
        assert_eq!(kind.to_string().parse::<ChartKind>().unwrap(), kind);
    }
    assert_eq!(ChartKind::Stats.artifact_type(), "stat_cards");
    assert_eq!(ChartKind::Comparison.artifact_type(), "comparison_table");
    assert!(ChartKind::Pie.is_multi_series());
    assert!(!ChartKind::Bar.is_multi_series());
}

#[test]
fn request_from_json_keeps_record_order() {
    let req = ChartRequest::from_json(
        ChartKind::Bar,
        "Adoption",
        r#"[{"label":"B","value":2},{"label":"A","value":1}]"#,
        "out/chart.svg",
    )
    .unwrap();

    assert_eq!(req.kind(), ChartKind::Bar);
    assert_eq!(req.title(), "Adoption");
    assert_eq!(req.destination(), Path::new("out/chart.svg"));
    assert_eq!(req.data()[0]["label"], json!("B"));

    let ChartData::Bar(records) = req.validate().unwrap() else {
        panic!("expected bar data");
    };
    assert_eq!(records[0].label, "B");
    assert_eq!(records[1].label, "A");
}

#[test]
fn request_from_json_rejects_non_arrays_and_bad_json() {
    let err = ChartRequest::from_json(ChartKind::Pie, "t", r#"{"label":"A"}"#, "x.svg")
        .unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::NotAnArray)));

    let err = ChartRequest::from_json(ChartKind::Pie, "t", "[{", "x.svg").unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn request_carries_style_overrides() {
    let style = StyleOptions {
        primary_color: Some("#ff0000".to_string()),
        ..Default::default()
    };
    let req = ChartRequest::new(ChartKind::Bar, "t", vec![], "x.svg").with_style(style.clone());
    assert_eq!(req.style(), &style);
}
