use crate::model::{ChartBody, Primitive, RectPrimitive, TextPrimitive};
use crate::{
    Frame, LABEL_COLOR, MARGIN, TRACK_COLOR, VALUE_COLOR, baseline_for_center, format_value,
};
use narwhal_core::{MagnitudeRecord, ResolvedStyle};

pub const LABEL_COLUMN_WIDTH: f64 = 200.0;
/// Minimum space right of the longest bar reserved for its value text.
pub const VALUE_GUTTER: f64 = 80.0;
pub const ROW_GAP: f64 = 15.0;
pub const DEFAULT_UNIT: &str = "%";

const LABEL_PADDING: f64 = 12.0;
const VALUE_OFFSET: f64 = 8.0;
const BAR_RADIUS: f64 = 4.0;

/// Horizontal space available to the longest bar once `gutter` is reserved for value text.
pub fn bar_usable_width(style: &ResolvedStyle, gutter: f64) -> f64 {
    (style.width - LABEL_COLUMN_WIDTH - 2.0 * MARGIN - gutter).max(0.0)
}

fn value_text(rec: &MagnitudeRecord) -> String {
    let unit = rec.unit.as_deref().unwrap_or(DEFAULT_UNIT);
    format!("{}{unit}", format_value(rec.value))
}

pub fn row_height(style: &ResolvedStyle) -> f64 {
    (style.font_size * 2.25).max(36.0)
}

pub(crate) fn layout_bar(records: &[MagnitudeRecord], frame: &Frame<'_>) -> ChartBody {
    let style = frame.style;
    let font_size = style.font_size;
    let value_texts: Vec<String> = if style.show_values {
        records.iter().map(value_text).collect()
    } else {
        Vec::new()
    };
    let widest_value = value_texts
        .iter()
        .map(|t| frame.text_width(t, font_size))
        .fold(0.0_f64, f64::max);
    let usable = bar_usable_width(style, VALUE_GUTTER.max(widest_value + VALUE_OFFSET));
    // The gutter holds every value text unless the canvas is too narrow for it.
    let value_budget = if usable > 0.0 {
        widest_value
    } else {
        style.width - 2.0 * MARGIN - LABEL_COLUMN_WIDTH - VALUE_OFFSET
    };
    let row_h = row_height(style);
    let x_bar = MARGIN + LABEL_COLUMN_WIDTH;
    let color = style.series_color(0).to_string();

    let max = records.iter().map(|r| r.value).fold(0.0_f64, f64::max);
    tracing::debug!(rows = records.len(), max, usable, "bar layout");

    let mut out: Vec<Primitive> = Vec::with_capacity(records.len() * 4);
    for (i, rec) in records.iter().enumerate() {
        let y = frame.top + i as f64 * (row_h + ROW_GAP);
        let text_y = baseline_for_center(y + row_h / 2.0, font_size);
        let length = if max > 0.0 {
            rec.value / max * usable
        } else {
            0.0
        };
        tracing::trace!(row = i, label = %rec.label, length, "bar row");

        let label = frame.fit(&rec.label, font_size, LABEL_COLUMN_WIDTH - LABEL_PADDING);
        out.push(
            TextPrimitive::new("bar-label", MARGIN, text_y, label, font_size, LABEL_COLOR).into(),
        );
        out.push(
            RectPrimitive::new("bar-track", x_bar, y, usable, row_h)
                .fill(TRACK_COLOR)
                .rounded(BAR_RADIUS)
                .into(),
        );
        out.push(
            RectPrimitive::new("bar", x_bar, y, length, row_h)
                .fill(color.clone())
                .rounded(BAR_RADIUS)
                .into(),
        );

        if let Some(text) = value_texts.get(i) {
            let value_text = frame.fit(text, font_size, value_budget);
            out.push(
                TextPrimitive::new(
                    "bar-value",
                    x_bar + length + VALUE_OFFSET,
                    text_y,
                    value_text,
                    font_size,
                    VALUE_COLOR,
                )
                .weight(600)
                .into(),
            );
        }
    }

    let rows = records.len() as f64;
    let content = rows * row_h + (rows - 1.0).max(0.0) * ROW_GAP;
    ChartBody {
        width: style.width,
        height: frame.top + content + MARGIN,
        primitives: out,
    }
}
