#![forbid(unsafe_code)]

//! Layout engines (records → primitives) and the SVG serializer (primitives → markup).
//!
//! Layout never touches the filesystem; `svg::render_svg` is a pure function of the
//! `RenderedDocument`, so identical requests serialize to identical bytes.

pub mod bar;
pub mod comparison;
pub mod flowchart;
pub mod model;
pub mod pie;
pub mod stats;
pub mod svg;
pub mod text;

use crate::model::{ChartBody, RectPrimitive, RenderedDocument, TextAnchor, TextPrimitive};
use crate::text::{
    DeterministicTextMeasurer, TextMeasurer, TextStyle, single_line, truncate_to_width,
};
use narwhal_core::{ChartData, ChartRequest, ResolvedStyle, ValidationError, resolve_style};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("layout JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
        }
    }
}

/// Outer whitespace on every side of the canvas.
pub const MARGIN: f64 = 40.0;

pub(crate) const TITLE_COLOR: &str = "#1a1a1a";
pub(crate) const LABEL_COLOR: &str = "#374151";
pub(crate) const VALUE_COLOR: &str = "#1f2937";
pub(crate) const MUTED_COLOR: &str = "#6b7280";
pub(crate) const TRACK_COLOR: &str = "#f3f4f6";
pub(crate) const BORDER_COLOR: &str = "#e5e7eb";
pub(crate) const EDGE_COLOR: &str = "#7f8c8d";

pub(crate) const TITLE_SCALE: f64 = 1.25;

/// Everything an engine needs besides its records.
pub(crate) struct Frame<'a> {
    pub style: &'a ResolvedStyle,
    pub measurer: &'a dyn TextMeasurer,
    /// y coordinate where the chart body starts (below the title band).
    pub top: f64,
}

impl Frame<'_> {
    pub fn text_style(&self, font_size: f64) -> TextStyle {
        TextStyle {
            font_family: Some(self.style.font_family.clone()),
            font_size,
            font_weight: None,
        }
    }

    pub fn fit(&self, text: &str, font_size: f64, max_width: f64) -> String {
        truncate_to_width(
            self.measurer,
            &single_line(text),
            &self.text_style(font_size),
            max_width.max(0.0),
        )
    }

    pub fn text_width(&self, text: &str, font_size: f64) -> f64 {
        self.measurer
            .measure(&single_line(text), &self.text_style(font_size))
            .width
    }
}

/// Baseline offset that visually centers a single line of text on `center_y`.
pub(crate) fn baseline_for_center(center_y: f64, font_size: f64) -> f64 {
    center_y + font_size * 0.35
}

/// Formats a data value for labels: whole numbers print without a fraction.
pub(crate) fn format_value(v: f64) -> String {
    let nearest = v.round();
    if (v - nearest).abs() < 1e-9 {
        let nearest = if nearest == -0.0 { 0.0 } else { nearest };
        return format!("{nearest}");
    }
    let rounded = (v * 100.0).round() / 100.0;
    format!("{rounded}")
}

/// Lays out validated records and adds the chart chrome (background, title).
pub fn layout_chart(
    data: &ChartData,
    title: &str,
    style: &ResolvedStyle,
    options: &LayoutOptions,
) -> RenderedDocument {
    let measurer = options.text_measurer.as_ref();
    let title = title.trim();
    let title_size = style.font_size * TITLE_SCALE;
    let top = if title.is_empty() {
        MARGIN
    } else {
        MARGIN + title_size
    };
    let frame = Frame {
        style,
        measurer,
        top,
    };

    let body: ChartBody = match data {
        ChartData::Bar(records) => bar::layout_bar(records, &frame),
        ChartData::Pie(records) => pie::layout_pie(records, &frame),
        ChartData::Stats(records) => stats::layout_stats(records, &frame),
        ChartData::Comparison(table) => comparison::layout_comparison(table, &frame),
        ChartData::Flowchart(nodes) => flowchart::layout_flowchart(nodes, &frame),
    };

    let width = body.width;
    let height = style.height.unwrap_or(body.height);
    tracing::debug!(
        kind = %data.kind(),
        records = data.len(),
        width,
        height,
        primitives = body.primitives.len(),
        "chart laid out"
    );

    let mut primitives = Vec::with_capacity(body.primitives.len() + 2);
    primitives.push(
        RectPrimitive::new("background", 0.0, 0.0, width, height)
            .fill(style.background.clone())
            .into(),
    );
    if !title.is_empty() {
        let content = frame.fit(title, title_size, width - 2.0 * MARGIN);
        primitives.push(
            TextPrimitive::new("title", width / 2.0, MARGIN, content, title_size, TITLE_COLOR)
                .anchor(TextAnchor::Middle)
                .weight(600)
                .into(),
        );
    }
    primitives.extend(body.primitives);

    RenderedDocument::new(
        data.kind(),
        title,
        (width, height),
        style.font_family.clone(),
        primitives,
    )
}

/// Validates `request`, resolves its style and lays it out.
pub fn layout_request(request: &ChartRequest, options: &LayoutOptions) -> Result<RenderedDocument> {
    let data = request.validate()?;
    let style = resolve_style(request.kind(), request.style(), data.series_count())?;
    Ok(layout_chart(&data, request.title(), &style, options))
}

/// Lays out `request` and returns the primitive list as JSON.
pub fn layout_request_json(
    request: &ChartRequest,
    options: &LayoutOptions,
    pretty: bool,
) -> Result<String> {
    let doc = layout_request(request, options)?;
    let json = if pretty {
        serde_json::to_string_pretty(&doc)?
    } else {
        serde_json::to_string(&doc)?
    };
    Ok(json)
}
