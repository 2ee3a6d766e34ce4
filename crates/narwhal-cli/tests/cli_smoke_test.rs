use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn cli() -> Command {
    Command::new(assert_cmd::cargo_bin!("narwhal-cli"))
}

#[test]
fn renders_bar_chart_and_reports_path() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("bars.svg");

    cli()
        .args([
            "render",
            "-t",
            "bar",
            "--title",
            "Scores",
            "-d",
            r#"[{"label": "A", "value": 75}, {"label": "B", "value": 50}]"#,
            "-o",
            out.to_string_lossy().as_ref(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created bar chart:"));

    let svg = std::fs::read_to_string(&out).expect("read svg");
    assert!(svg.starts_with("<svg "));
    assert!(svg.contains(r#"aria-label="Scores""#));
}

#[test]
fn json_flag_prints_summary() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("share.svg");

    let output = cli()
        .args([
            "--type",
            "pie",
            "--title",
            "Share",
            "--data",
            r#"[{"label": "X", "value": 60}, {"label": "Y", "value": 40}]"#,
            "--out",
            out.to_string_lossy().as_ref(),
            "--json",
        ])
        .output()
        .expect("run");
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(summary["type"], "pie_chart");
    assert_eq!(summary["caption"], "Share");
    assert_eq!(summary["path"], out.to_string_lossy().as_ref());
}

#[test]
fn reads_records_from_file_and_applies_style_flags() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let data = tmp.path().join("steps.json");
    std::fs::write(&data, r#"["Collect", "Clean", "Publish"]"#).expect("write data");
    let style = tmp.path().join("style.json");
    std::fs::write(&style, r##"{"primaryColor": "#111111", "width": 500}"##).expect("write style");
    let out = tmp.path().join("flow.svg");

    cli()
        .args([
            "-t",
            "flowchart",
            "--title",
            "Steps",
            "--data-file",
            data.to_string_lossy().as_ref(),
            "--style-file",
            style.to_string_lossy().as_ref(),
            "--color",
            "#ef4444",
            "--id",
            "steps",
            "-o",
            out.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let svg = std::fs::read_to_string(&out).expect("read svg");
    assert!(svg.contains(r#"<svg id="steps""#));
    assert!(svg.contains(r#"width="500""#));
    assert!(svg.contains("#ef4444"));
    assert!(!svg.contains("#111111"));
}

#[test]
fn layout_command_prints_primitives() {
    let output = cli()
        .args([
            "layout",
            "-t",
            "stats",
            "--title",
            "KPIs",
            "-d",
            r#"[{"label": "Users", "value": 1200}]"#,
        ])
        .output()
        .expect("run");
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(doc["kind"], "stats");
    assert!(doc["primitives"].as_array().is_some_and(|p| !p.is_empty()));
}

#[test]
fn missing_required_flag_is_usage_error() {
    cli()
        .args(["-t", "bar", "-d", "[]", "-o", "x.svg"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--title is required"));
}

#[test]
fn non_finite_width_is_usage_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("bars.svg");
    for raw in ["NaN", "inf", "-infinity"] {
        cli()
            .args(["-t", "bar", "--title", "x", "-d", r#"[{"label": "A", "value": 1}]"#])
            .args(["-o", out.to_string_lossy().as_ref(), "--width", raw])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("--width expects a finite number"));
    }
    assert!(!out.exists());
}

#[test]
fn unknown_kind_is_usage_error() {
    cli()
        .args(["-t", "donut", "--title", "x", "-d", "[]", "-o", "x.svg"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("donut"));
}

#[test]
fn validation_error_names_record_and_writes_nothing() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("bad.svg");

    cli()
        .args([
            "-t",
            "bar",
            "--title",
            "Bad",
            "-d",
            r#"[{"label": "A", "value": 1}, {"label": "B", "value": -3}]"#,
            "-o",
            out.to_string_lossy().as_ref(),
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("record 1"));

    assert!(!out.exists());
}

#[test]
fn missing_output_directory_fails_without_creating_it() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("nested").join("chart.svg");

    cli()
        .args([
            "-t",
            "bar",
            "--title",
            "Nowhere",
            "-d",
            r#"[{"label": "A", "value": 1}]"#,
            "-o",
            out.to_string_lossy().as_ref(),
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));

    assert!(!tmp.path().join("nested").exists());
}
