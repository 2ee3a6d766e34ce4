use narwhal_core::{ChartKind, ChartRequest};
use narwhal_render::svg::{SvgRenderOptions, render_svg};
use narwhal_render::{LayoutOptions, layout_request};
use serde_json::json;

fn render(kind: ChartKind, title: &str, data: serde_json::Value) -> (usize, String) {
    let serde_json::Value::Array(records) = data else {
        panic!("fixture must be an array");
    };
    let req = ChartRequest::new(kind, title, records, "out.svg");
    let doc = layout_request(&req, &LayoutOptions::default()).expect("layout ok");
    let svg = render_svg(&doc, &SvgRenderOptions::with_document_id("chart-1"));
    (doc.primitives().len(), svg)
}

fn fixtures() -> Vec<(ChartKind, serde_json::Value)> {
    vec![
        (
            ChartKind::Bar,
            json!([{"label": "A", "value": 75}, {"label": "B", "value": 50}]),
        ),
        (
            ChartKind::Pie,
            json!([{"label": "X", "value": 60}, {"label": "Y", "value": 40}]),
        ),
        (
            ChartKind::Stats,
            json!([{"label": "Users", "value": "12k", "description": "monthly"}]),
        ),
        (
            ChartKind::Comparison,
            json!([{"name": "a", "speed": "fast"}, {"name": "b", "speed": "slow"}]),
        ),
        (
            ChartKind::Flowchart,
            json!([{"id": "a", "label": "A", "next": ["b"]}, {"id": "b", "label": "B"}]),
        ),
    ]
}

#[test]
fn every_kind_serializes_to_well_formed_svg() {
    for (kind, data) in fixtures() {
        let (primitive_count, svg) = render(kind, "Report", data);
        let doc = roxmltree::Document::parse(&svg)
            .unwrap_or_else(|e| panic!("{kind}: invalid SVG: {e}\n{svg}"));
        let root = doc.root_element();
        assert_eq!(root.tag_name().name(), "svg");
        assert_eq!(root.attribute("role"), Some("img"));
        assert_eq!(root.attribute("aria-label"), Some("Report"));
        assert_eq!(root.attribute("id"), Some("chart-1"));

        let vb = root.attribute("viewBox").expect("viewBox");
        let w = root.attribute("width").expect("width");
        let h = root.attribute("height").expect("height");
        assert_eq!(vb, format!("0 0 {w} {h}"));

        let elements: Vec<_> = root
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() != "defs")
            .collect();
        assert_eq!(elements.len(), primitive_count, "{kind}: one element per primitive");
    }
}

#[test]
fn identical_requests_are_byte_identical() {
    for (kind, data) in fixtures() {
        let (_, a) = render(kind, "Same", data.clone());
        let (_, b) = render(kind, "Same", data);
        assert_eq!(a, b, "{kind}");
    }
}

#[test]
fn title_is_first_text_element() {
    let (_, svg) = render(
        ChartKind::Bar,
        "Quarterly",
        json!([{"label": "A", "value": 1}]),
    );
    let doc = roxmltree::Document::parse(&svg).expect("valid svg");
    let first_text = doc
        .descendants()
        .find(|n| n.has_tag_name("text"))
        .expect("text");
    assert_eq!(first_text.text(), Some("Quarterly"));
    assert_eq!(first_text.attribute("text-anchor"), Some("middle"));
}

#[test]
fn reserved_characters_are_escaped() {
    let (_, svg) = render(
        ChartKind::Bar,
        "R&D <2024> \"draft\"",
        json!([{"label": "<script>&", "value": 1}]),
    );
    assert!(!svg.contains("<script>"));
    let doc = roxmltree::Document::parse(&svg).expect("valid svg");
    assert_eq!(
        doc.root_element().attribute("aria-label"),
        Some("R&D <2024> \"draft\"")
    );
    assert!(
        doc.descendants()
            .any(|n| n.has_tag_name("text") && n.text() == Some("<script>&"))
    );

    let (_, svg) = render(
        ChartKind::Bar,
        "Bell\u{0007}",
        json!([{"label": "a\u{0001}b", "value": 1}]),
    );
    let doc = roxmltree::Document::parse(&svg).expect("control characters keep svg well-formed");
    assert_eq!(doc.root_element().attribute("aria-label"), Some("Bell\u{fffd}"));
    assert!(
        doc.descendants()
            .any(|n| n.has_tag_name("text") && n.text() == Some("a\u{fffd}b"))
    );
}

#[test]
fn arrow_marker_is_defined_only_when_used() {
    let (_, flow) = render(
        ChartKind::Flowchart,
        "Flow",
        json!([{"id": "a", "label": "A", "next": ["b"]}, {"id": "b", "label": "B"}]),
    );
    let doc = roxmltree::Document::parse(&flow).expect("valid svg");
    let marker = doc
        .descendants()
        .find(|n| n.has_tag_name("marker"))
        .expect("marker");
    assert_eq!(marker.attribute("id"), Some("chart-1-arrowhead"));
    let line = doc
        .descendants()
        .find(|n| n.has_tag_name("line"))
        .expect("edge");
    assert_eq!(line.attribute("marker-end"), Some("url(#chart-1-arrowhead)"));

    let (_, bar) = render(ChartKind::Bar, "Bars", json!([{"label": "A", "value": 1}]));
    assert!(!bar.contains("<defs>"));
}

#[test]
fn single_slice_pie_emits_circle_element() {
    let (_, svg) = render(ChartKind::Pie, "One", json!([{"label": "all", "value": 3}]));
    let doc = roxmltree::Document::parse(&svg).expect("valid svg");
    assert_eq!(doc.descendants().filter(|n| n.has_tag_name("circle")).count(), 1);
    assert_eq!(doc.descendants().filter(|n| n.has_tag_name("path")).count(), 0);
}

#[test]
fn bar_lengths_are_written_without_fractions_when_whole() {
    let (_, svg) = render(
        ChartKind::Bar,
        "Bars",
        json!([{"label": "A", "value": 75}, {"label": "B", "value": 50}]),
    );
    assert!(svg.contains(r#"class="bar" x="240" y="#));
    assert!(svg.contains(r#"width="440""#));
}
