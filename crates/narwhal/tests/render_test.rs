use narwhal::render::{HeadlessError, HeadlessRenderer};
use narwhal::{ChartKind, ChartRequest, StyleConfig, ValidationError};
use serde_json::json;

#[test]
fn renders_bar_chart_to_destination() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("scores.svg");
    let req = ChartRequest::from_json(
        ChartKind::Bar,
        "Scores",
        r#"[{"label": "A", "value": 75}, {"label": "B", "value": 50}]"#,
        &out,
    )
    .expect("request");

    let summary = HeadlessRenderer::new().render(&req).expect("render ok");
    assert_eq!(summary.path, out);
    assert_eq!(summary.caption, "Scores");
    assert_eq!(summary.artifact_type, "bar_chart");

    let svg = std::fs::read_to_string(&out).expect("read svg");
    let doc = roxmltree::Document::parse(&svg).expect("valid svg");
    assert_eq!(doc.root_element().attribute("aria-label"), Some("Scores"));
}

#[test]
fn summary_serializes_with_type_field() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("share.svg");
    let req = ChartRequest::from_json(
        ChartKind::Pie,
        "Share",
        r#"[{"label": "X", "value": 60}, {"label": "Y", "value": 40}]"#,
        &out,
    )
    .expect("request");

    let summary = HeadlessRenderer::new().render(&req).expect("render ok");
    let value = serde_json::to_value(&summary).expect("json");
    assert_eq!(
        value,
        json!({
            "path": out.to_string_lossy(),
            "caption": "Share",
            "type": "pie_chart"
        })
    );
}

#[test]
fn validation_failure_writes_nothing() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("bad.svg");
    let req = ChartRequest::from_json(
        ChartKind::Bar,
        "Bad",
        r#"[{"label": "A", "value": -1}]"#,
        &out,
    )
    .expect("request");

    let err = HeadlessRenderer::new().render(&req).expect_err("negative value");
    assert!(matches!(
        err,
        HeadlessError::Validation(ValidationError::NegativeValue { index: 0, .. })
    ));
    assert!(!out.exists());
    assert_eq!(std::fs::read_dir(tmp.path()).expect("read_dir").count(), 0);
}

#[test]
fn missing_output_directory_is_a_write_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("missing").join("chart.svg");
    let req = ChartRequest::from_json(ChartKind::Flowchart, "Flow", r#"["a", "b"]"#, &out)
        .expect("request");

    let err = HeadlessRenderer::new().render(&req).expect_err("no parent");
    assert!(matches!(err, HeadlessError::Write(_)));
    assert!(!tmp.path().join("missing").exists());
}

#[test]
fn style_config_layers_feed_rendering() {
    let mut config = StyleConfig::from_json_str(r##"{"primaryColor": "#10b981"}"##).expect("config");
    config.set_value("width", json!(640));
    let style = config.to_style_options().expect("style options");

    let req = ChartRequest::from_json(
        ChartKind::Bar,
        "Styled",
        r#"[{"label": "A", "value": 1}]"#,
        "unused.svg",
    )
    .expect("request")
    .with_style(style);

    let svg = HeadlessRenderer::new()
        .with_document_id("styled")
        .render_svg(&req)
        .expect("svg");
    assert!(svg.starts_with(r#"<svg id="styled""#));
    assert!(svg.contains(r#"width="640""#));
    assert!(svg.contains("#10b981"));
}

#[test]
fn layout_json_lists_primitives() {
    let req = ChartRequest::from_json(
        ChartKind::Stats,
        "KPIs",
        r#"[{"label": "Users", "value": "12k"}]"#,
        "unused.svg",
    )
    .expect("request");
    let json = HeadlessRenderer::new().layout_json(&req, false).expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
    assert_eq!(value["kind"], "stats");
    let primitives = value["primitives"].as_array().expect("primitives");
    assert_eq!(primitives[0]["type"], "rect");
    assert_eq!(primitives[0]["class"], "background");
}

#[test]
fn layout_json_reports_validation_errors_as_validation() {
    let req = ChartRequest::from_json(ChartKind::Pie, "Bad", r#"[{"label": "A"}]"#, "unused.svg")
        .expect("request");
    let err = HeadlessRenderer::new()
        .layout_json(&req, false)
        .expect_err("missing value");
    assert!(matches!(err, HeadlessError::Validation(_)));
}
