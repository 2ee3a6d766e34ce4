use crate::model::{ChartBody, Primitive, RectPrimitive, Stroke, TextAnchor, TextPrimitive};
use crate::{Frame, LABEL_COLOR, MARGIN, MUTED_COLOR};
use narwhal_core::StatRecord;

pub const CARD_GAP: f64 = 20.0;
const CARD_FILL: &str = "#f8fafc";
const CARD_BORDER: &str = "#e2e8f0";
const CARD_PADDING: f64 = 20.0;
const LINE_GAP: f64 = 8.0;

pub(crate) fn layout_stats(records: &[StatRecord], frame: &Frame<'_>) -> ChartBody {
    let style = frame.style;
    let n = records.len();
    let columns = style.columns.min(n).max(1);
    let rows = n.div_ceil(columns);

    let label_size = style.font_size;
    let value_size = style.font_size * 1.75;
    let desc_size = style.font_size * 0.8125;
    let has_description = records.iter().any(|r| r.description.is_some());

    let slot_width = (style.width - 2.0 * MARGIN) / columns as f64;
    let card_width = (slot_width - CARD_GAP).max(0.0);
    let mut card_height = CARD_PADDING * 2.0 + value_size + LINE_GAP + label_size;
    if has_description {
        card_height += LINE_GAP + desc_size;
    }
    let text_budget = card_width - CARD_PADDING;
    tracing::debug!(cards = n, columns, rows, card_width, card_height, "stats layout");

    let mut out: Vec<Primitive> = Vec::with_capacity(n * 4);
    for (i, rec) in records.iter().enumerate() {
        let col = i % columns;
        let row = i / columns;
        let x = MARGIN + col as f64 * slot_width + CARD_GAP / 2.0;
        let y = frame.top + row as f64 * (card_height + CARD_GAP);
        let center_x = x + card_width / 2.0;

        out.push(
            RectPrimitive::new("card", x, y, card_width, card_height)
                .fill(CARD_FILL)
                .stroke(Stroke::new(CARD_BORDER, 1.0))
                .rounded(8.0)
                .into(),
        );

        let value_y = y + CARD_PADDING + value_size;
        out.push(
            TextPrimitive::new(
                "stat-value",
                center_x,
                value_y,
                frame.fit(&rec.value, value_size, text_budget),
                value_size,
                style.series_color(i),
            )
            .anchor(TextAnchor::Middle)
            .weight(700)
            .into(),
        );

        let label_y = value_y + LINE_GAP + label_size;
        out.push(
            TextPrimitive::new(
                "stat-label",
                center_x,
                label_y,
                frame.fit(&rec.label, label_size, text_budget),
                label_size,
                LABEL_COLOR,
            )
            .anchor(TextAnchor::Middle)
            .weight(600)
            .into(),
        );

        if let Some(desc) = rec.description.as_deref() {
            out.push(
                TextPrimitive::new(
                    "stat-description",
                    center_x,
                    label_y + LINE_GAP + desc_size,
                    frame.fit(desc, desc_size, text_budget),
                    desc_size,
                    MUTED_COLOR,
                )
                .anchor(TextAnchor::Middle)
                .into(),
            );
        }
    }

    let content = rows as f64 * card_height + rows.saturating_sub(1) as f64 * CARD_GAP;
    ChartBody {
        width: style.width,
        height: frame.top + content + MARGIN,
        primitives: out,
    }
}
