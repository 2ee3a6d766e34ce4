pub use narwhal_render::model::{Primitive, RenderedDocument};
pub use narwhal_render::svg::{SvgRenderOptions, render_svg, sanitize_svg_id};
pub use narwhal_render::text::{DeterministicTextMeasurer, TextMeasurer};
pub use narwhal_render::{LayoutOptions, layout_chart};

use crate::writer::{WriteError, write_document};
use narwhal_core::{ChartKind, ChartRequest, ValidationError};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum HeadlessError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Render(narwhal_render::Error),
    #[error(transparent)]
    Write(#[from] WriteError),
}

impl From<narwhal_render::Error> for HeadlessError {
    fn from(err: narwhal_render::Error) -> Self {
        match err {
            narwhal_render::Error::Validation(e) => Self::Validation(e),
            other => Self::Render(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, HeadlessError>;

/// What a successful render produced, in the shape report tooling consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSummary {
    pub path: PathBuf,
    pub caption: String,
    #[serde(rename = "type")]
    pub artifact_type: &'static str,
    #[serde(skip)]
    pub kind: ChartKind,
}

/// Validates and lays out `request`.
pub fn layout_request(request: &ChartRequest, layout: &LayoutOptions) -> Result<RenderedDocument> {
    Ok(narwhal_render::layout_request(request, layout)?)
}

/// Renders `request` to SVG markup without touching the filesystem.
pub fn render_svg_for_request(
    request: &ChartRequest,
    layout: &LayoutOptions,
    svg: &SvgRenderOptions,
) -> Result<String> {
    let doc = layout_request(request, layout)?;
    Ok(render_svg(&doc, svg))
}

/// Renders `request` and writes the SVG to its destination.
pub fn render_request(
    request: &ChartRequest,
    layout: &LayoutOptions,
    svg: &SvgRenderOptions,
) -> Result<RenderSummary> {
    let markup = render_svg_for_request(request, layout, svg)?;
    write_document(request.destination(), &markup)?;
    Ok(RenderSummary {
        path: request.destination().to_path_buf(),
        caption: request.title().to_string(),
        artifact_type: request.kind().artifact_type(),
        kind: request.kind(),
    })
}

/// Bundles layout and SVG options so integrations can render with a single call.
#[derive(Clone, Default)]
pub struct HeadlessRenderer {
    pub layout: LayoutOptions,
    pub svg: SvgRenderOptions,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document_id(mut self, id: impl Into<String>) -> Self {
        self.svg.document_id = Some(id.into());
        self
    }

    pub fn with_text_measurer(
        mut self,
        measurer: std::sync::Arc<dyn TextMeasurer + Send + Sync>,
    ) -> Self {
        self.layout.text_measurer = measurer;
        self
    }

    pub fn layout(&self, request: &ChartRequest) -> Result<RenderedDocument> {
        layout_request(request, &self.layout)
    }

    pub fn layout_json(&self, request: &ChartRequest, pretty: bool) -> Result<String> {
        Ok(narwhal_render::layout_request_json(request, &self.layout, pretty)?)
    }

    pub fn render_svg(&self, request: &ChartRequest) -> Result<String> {
        render_svg_for_request(request, &self.layout, &self.svg)
    }

    pub fn render(&self, request: &ChartRequest) -> Result<RenderSummary> {
        render_request(request, &self.layout, &self.svg)
    }
}
