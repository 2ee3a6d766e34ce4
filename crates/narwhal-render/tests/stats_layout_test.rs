use narwhal_core::{ChartKind, ChartRequest, StyleOptions};
use narwhal_render::model::{Primitive, RenderedDocument, TextAnchor};
use narwhal_render::{LayoutOptions, layout_request};
use serde_json::json;

fn layout_with(data: serde_json::Value, style: StyleOptions) -> RenderedDocument {
    let serde_json::Value::Array(records) = data else {
        panic!("fixture must be an array");
    };
    let req = ChartRequest::new(ChartKind::Stats, "KPIs", records, "out.svg").with_style(style);
    layout_request(&req, &LayoutOptions::default()).expect("layout ok")
}

fn cards(doc: &RenderedDocument) -> Vec<(f64, f64, f64)> {
    doc.by_class("card")
        .filter_map(Primitive::as_rect)
        .map(|r| (r.x, r.y, r.width))
        .collect()
}

fn stat(i: usize) -> serde_json::Value {
    json!({"label": format!("metric {i}"), "value": format!("{i}k")})
}

#[test]
fn default_grid_has_three_columns_and_wraps() {
    let data = serde_json::Value::Array((0..5).map(stat).collect());
    let doc = layout_with(data, StyleOptions::default());
    let cards = cards(&doc);
    assert_eq!(cards.len(), 5);

    // (800 - 2 * 40) / 3 per slot, minus the gap.
    for c in &cards {
        assert_eq!(c.2, 220.0);
    }
    assert_eq!(cards[0].1, cards[2].1);
    assert!(cards[3].1 > cards[0].1);
    assert_eq!(cards[3].0, cards[0].0);
}

#[test]
fn fewer_records_than_columns_widen_cards() {
    let doc = layout_with(json!([stat(1), stat(2)]), StyleOptions::default());
    let cards = cards(&doc);
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].2, 340.0);
    assert_eq!(cards[0].1, cards[1].1);
}

#[test]
fn columns_option_controls_grid() {
    let data = serde_json::Value::Array((0..4).map(stat).collect());
    let doc = layout_with(
        data,
        StyleOptions {
            columns: Some(2),
            ..Default::default()
        },
    );
    let cards = cards(&doc);
    assert_eq!(cards[0].1, cards[1].1);
    assert!(cards[2].1 > cards[1].1);
}

#[test]
fn card_texts_are_centered_and_ordered() {
    let doc = layout_with(
        json!([{"label": "Revenue", "value": 1200, "description": "FY 2024"}]),
        StyleOptions::default(),
    );
    let value = doc.by_class("stat-value").find_map(Primitive::as_text).expect("value");
    let label = doc.by_class("stat-label").find_map(Primitive::as_text).expect("label");
    let desc = doc
        .by_class("stat-description")
        .find_map(Primitive::as_text)
        .expect("description");

    assert_eq!(value.content, "1200");
    assert_eq!(label.content, "Revenue");
    assert_eq!(desc.content, "FY 2024");
    for t in [value, label, desc] {
        assert_eq!(t.anchor, TextAnchor::Middle);
    }
    assert!(value.y < label.y && label.y < desc.y);
    assert!(value.font_size > label.font_size && label.font_size > desc.font_size);
}

#[test]
fn description_is_optional() {
    let doc = layout_with(json!([stat(1), stat(2)]), StyleOptions::default());
    assert_eq!(doc.by_class("stat-description").count(), 0);
    assert_eq!(doc.by_class("stat-label").count(), 2);
}

#[test]
fn value_colors_come_from_palette() {
    let doc = layout_with(json!([stat(1), stat(2), stat(3)]), StyleOptions::default());
    let fills: Vec<&str> = doc
        .by_class("stat-value")
        .filter_map(Primitive::as_text)
        .map(|t| t.fill.as_str())
        .collect();
    assert_eq!(fills.len(), 3);
    assert_ne!(fills[0], fills[1]);
    assert_ne!(fills[1], fills[2]);
}
