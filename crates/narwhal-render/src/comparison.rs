use crate::model::{ChartBody, LinePrimitive, Primitive, RectPrimitive, Stroke, TextPrimitive};
use crate::{BORDER_COLOR, Frame, LABEL_COLOR, MARGIN, baseline_for_center};
use narwhal_core::ComparisonTable;

pub const MIN_COLUMN_WIDTH: f64 = 80.0;
pub const MAX_COLUMN_WIDTH: f64 = 280.0;
pub const CELL_PADDING: f64 = 12.0;

const HEADER_TEXT: &str = "#ffffff";
const STRIPE_FILL: &str = "#f9fafb";
const ACCENT_HEIGHT: f64 = 4.0;

/// `release_date` → `Release Date`: underscores become spaces, and every letter that follows a
/// non-letter is uppercased while the rest are lowercased.
pub fn title_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut prev_is_letter = false;
    for ch in key.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if prev_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }
    out
}

pub fn row_height(font_size: f64) -> f64 {
    (font_size * 2.5).max(40.0)
}

/// Per-column widths: widest text plus padding, clamped, then shrunk proportionally when the
/// table would not fit in `available`.
pub(crate) fn column_widths(
    headers: &[String],
    table: &ComparisonTable,
    frame: &Frame<'_>,
    available: f64,
) -> Vec<f64> {
    let font_size = frame.style.font_size;
    let mut widths: Vec<f64> = headers
        .iter()
        .enumerate()
        .map(|(j, header)| {
            let header_w = frame.text_width(header, font_size);
            let content_w = table
                .rows
                .iter()
                .map(|row| {
                    let text = if j == 0 { &row.name } else { &row.cells[j - 1] };
                    frame.text_width(text, font_size)
                })
                .fold(0.0_f64, f64::max);
            (header_w.max(content_w) + 2.0 * CELL_PADDING)
                .clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
        })
        .collect();

    let total: f64 = widths.iter().sum();
    if total > available && total > 0.0 {
        let scale = available.max(0.0) / total;
        for w in &mut widths {
            *w *= scale;
        }
    }
    widths
}

pub(crate) fn layout_comparison(table: &ComparisonTable, frame: &Frame<'_>) -> ChartBody {
    let style = frame.style;
    let font_size = style.font_size;
    let row_h = row_height(font_size);

    let headers: Vec<String> = std::iter::once("name")
        .chain(table.columns.iter().map(String::as_str))
        .map(title_case)
        .collect();
    let available = style.width - 2.0 * MARGIN;
    let widths = column_widths(&headers, table, frame, available);
    let table_width: f64 = widths.iter().sum();
    let x0 = MARGIN + ((available - table_width) / 2.0).max(0.0);
    let mut col_x = Vec::with_capacity(widths.len());
    let mut acc = x0;
    for w in &widths {
        col_x.push(acc);
        acc += w;
    }

    let y0 = frame.top;
    let table_height = row_h * (table.rows.len() + 1) as f64;
    tracing::debug!(
        columns = headers.len(),
        rows = table.rows.len(),
        table_width,
        "comparison layout"
    );

    let mut out: Vec<Primitive> = Vec::new();
    out.push(
        RectPrimitive::new("header-row", x0, y0, table_width, row_h)
            .fill(style.primary_color.clone())
            .into(),
    );
    for (j, header) in headers.iter().enumerate() {
        out.push(
            RectPrimitive::new("column-accent", col_x[j], y0, widths[j], ACCENT_HEIGHT)
                .fill(style.series_color(j).to_string())
                .into(),
        );
        out.push(
            TextPrimitive::new(
                "header-cell",
                col_x[j] + CELL_PADDING,
                baseline_for_center(y0 + row_h / 2.0, font_size),
                frame.fit(header, font_size, widths[j] - 2.0 * CELL_PADDING),
                font_size,
                HEADER_TEXT,
            )
            .weight(600)
            .into(),
        );
    }

    for (i, row) in table.rows.iter().enumerate() {
        let y = y0 + row_h * (i + 1) as f64;
        if i % 2 == 1 {
            out.push(
                RectPrimitive::new("row-stripe", x0, y, table_width, row_h)
                    .fill(STRIPE_FILL)
                    .into(),
            );
        }
        let text_y = baseline_for_center(y + row_h / 2.0, font_size);
        let cells = std::iter::once(&row.name).chain(row.cells.iter());
        for (j, text) in cells.enumerate() {
            let mut cell = TextPrimitive::new(
                "cell",
                col_x[j] + CELL_PADDING,
                text_y,
                frame.fit(text, font_size, widths[j] - 2.0 * CELL_PADDING),
                font_size,
                LABEL_COLOR,
            );
            if j == 0 {
                cell = cell.weight(600);
            }
            out.push(cell.into());
        }
    }

    for x in col_x.iter().skip(1) {
        out.push(
            LinePrimitive {
                class: "column-rule",
                x1: *x,
                y1: y0 + row_h,
                x2: *x,
                y2: y0 + table_height,
                stroke: Stroke::new(BORDER_COLOR, 1.0),
                arrow: false,
            }
            .into(),
        );
    }
    out.push(
        RectPrimitive::new("table-border", x0, y0, table_width, table_height)
            .stroke(Stroke::new(BORDER_COLOR, 1.0))
            .into(),
    );

    ChartBody {
        width: style.width,
        height: y0 + table_height + MARGIN,
        primitives: out,
    }
}
