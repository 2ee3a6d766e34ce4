use crate::model::{
    ArcPrimitive, ChartBody, CirclePrimitive, Primitive, RectPrimitive, Stroke, TextPrimitive,
};
use crate::{Frame, LABEL_COLOR, MARGIN, baseline_for_center};
use narwhal_core::MagnitudeRecord;

pub const LEGEND_WIDTH: f64 = 280.0;
pub const LEGEND_ROW_STEP: f64 = 32.0;
pub const SWATCH_SIZE: f64 = 16.0;
pub const MAX_DIAMETER: f64 = 360.0;

const SWATCH_GAP: f64 = 10.0;
const SLICE_STROKE: &str = "#ffffff";

/// Converts a pie angle (degrees, 12 o'clock = 0, clockwise) to an offset from the center.
pub fn polar_xy(radius: f64, angle_deg: f64) -> (f64, f64) {
    let angle = angle_deg.to_radians();
    (radius * angle.sin(), -radius * angle.cos())
}

/// Each record's fraction of the total, all zero when nothing is positive.
///
/// Values are scaled by the maximum before summing so totals near `f64::MAX` stay finite.
pub fn shares(records: &[MagnitudeRecord]) -> Vec<f64> {
    let max = records.iter().map(|r| r.value).fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return vec![0.0; records.len()];
    }
    let sum: f64 = records.iter().map(|r| r.value / max).sum();
    records.iter().map(|r| r.value / max / sum).collect()
}

/// `[start, end)` angles in degrees for each record, `None` for zero-valued records.
///
/// The last positive slice always ends at exactly 360 so accumulated rounding never leaves a gap.
pub fn slice_angles(records: &[MagnitudeRecord]) -> Vec<Option<(f64, f64)>> {
    let shares = shares(records);
    let last_positive = shares.iter().rposition(|s| *s > 0.0);
    let mut cum = 0.0;
    shares
        .iter()
        .enumerate()
        .map(|(i, share)| {
            if *share <= 0.0 {
                return None;
            }
            let start = cum;
            let end = if Some(i) == last_positive {
                360.0
            } else {
                cum + share * 360.0
            };
            cum = end;
            Some((start, end))
        })
        .collect()
}

pub fn legend_text(label: &str, pct: f64) -> String {
    format!("{label} \u{2014} {pct:.1}%")
}

pub(crate) fn layout_pie(records: &[MagnitudeRecord], frame: &Frame<'_>) -> ChartBody {
    let style = frame.style;
    let font_size = style.font_size;
    let shares = shares(records);

    let diameter = (style.width - 3.0 * MARGIN - LEGEND_WIDTH)
        .min(MAX_DIAMETER)
        .max(0.0);
    let r = diameter / 2.0;
    let cx = MARGIN + r;
    let cy = frame.top + r;
    let stroke = Stroke::new(SLICE_STROKE, 2.0);

    let angles = slice_angles(records);
    let positive = angles.iter().filter(|a| a.is_some()).count();
    tracing::debug!(slices = positive, records = records.len(), "pie layout");

    let mut out: Vec<Primitive> = Vec::with_capacity(records.len() * 3);
    for (i, span) in angles.iter().enumerate() {
        let Some((start, end)) = *span else {
            continue;
        };
        let fill = style.series_color(i).to_string();
        if positive == 1 {
            out.push(
                CirclePrimitive {
                    class: "slice",
                    cx,
                    cy,
                    r,
                    fill,
                    stroke: Some(stroke.clone()),
                }
                .into(),
            );
        } else {
            out.push(
                ArcPrimitive {
                    class: "slice",
                    cx,
                    cy,
                    r,
                    start_angle: start,
                    end_angle: end,
                    fill,
                    stroke: Some(stroke.clone()),
                }
                .into(),
            );
        }
    }

    let legend_x = MARGIN + diameter + MARGIN;
    let text_x = legend_x + SWATCH_SIZE + SWATCH_GAP;
    let text_budget = LEGEND_WIDTH - SWATCH_SIZE - SWATCH_GAP;
    for (i, rec) in records.iter().enumerate() {
        let y = frame.top + i as f64 * LEGEND_ROW_STEP;
        let pct = shares[i] * 100.0;
        out.push(
            RectPrimitive::new("legend-swatch", legend_x, y, SWATCH_SIZE, SWATCH_SIZE)
                .fill(style.series_color(i).to_string())
                .rounded(2.0)
                .into(),
        );

        let suffix = legend_text("", pct);
        let label_budget = text_budget - frame.text_width(&suffix, font_size);
        let label = frame.fit(&rec.label, font_size, label_budget);
        out.push(
            TextPrimitive::new(
                "legend-label",
                text_x,
                baseline_for_center(y + SWATCH_SIZE / 2.0, font_size),
                legend_text(&label, pct),
                font_size,
                LABEL_COLOR,
            )
            .into(),
        );
    }

    let legend_height = records.len() as f64 * LEGEND_ROW_STEP;
    ChartBody {
        width: style.width,
        height: frame.top + diameter.max(legend_height) + MARGIN,
        primitives: out,
    }
}
