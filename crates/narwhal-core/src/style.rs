use crate::palette::{generate_palette, normalize_color};
use crate::{ChartKind, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_WIDTH: f64 = 800.0;
pub const DEFAULT_PRIMARY_COLOR: &str = "#2563eb";
pub const DEFAULT_FONT_FAMILY: &str = "Inter, Arial, sans-serif";
pub const DEFAULT_BACKGROUND: &str = "#ffffff";
pub const MIN_FONT_SIZE: f64 = 16.0;
pub const DEFAULT_STATS_COLUMNS: usize = 3;

/// Caller-supplied style overrides. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StyleOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Bar charts only: print `value+unit` next to each bar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_values: Option<bool>,
    /// Stats only: cards per row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<usize>,
}

impl StyleOptions {
    pub fn deserialize_from(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }
}

/// Style with every default filled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedStyle {
    pub width: f64,
    /// `None` lets the layout engine size the canvas to its content.
    pub height: Option<f64>,
    pub primary_color: String,
    /// One color per series; never empty.
    pub palette: Vec<String>,
    pub font_size: f64,
    pub font_family: String,
    pub background: String,
    pub show_values: bool,
    pub columns: usize,
}

impl ResolvedStyle {
    /// Palette color for series `index`, cycling when the palette is shorter.
    pub fn series_color(&self, index: usize) -> &str {
        if self.palette.is_empty() {
            return &self.primary_color;
        }
        &self.palette[index % self.palette.len()]
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ValidationError {
    ValidationError::InvalidStyle {
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn positive_dimension(field: &str, v: Option<f64>) -> Result<Option<f64>, ValidationError> {
    match v {
        Some(v) if !(v.is_finite() && v > 0.0) => {
            Err(invalid(field, "must be a positive, finite number"))
        }
        other => Ok(other),
    }
}

fn color(field: &str, v: &str) -> Result<String, ValidationError> {
    normalize_color(v).ok_or_else(|| invalid(field, format!("`{v}` is not a supported color")))
}

/// Merges `options` with the fixed defaults.
///
/// `series_count` is the number of distinct colors the chart needs. Multi-series kinds without
/// an explicit palette get a generated hue sequence of that length; single-series kinds use the
/// primary color.
pub fn resolve_style(
    kind: ChartKind,
    options: &StyleOptions,
    series_count: usize,
) -> Result<ResolvedStyle, ValidationError> {
    let width = positive_dimension("width", options.width)?.unwrap_or(DEFAULT_WIDTH);
    let height = positive_dimension("height", options.height)?;
    let font_size = positive_dimension("fontSize", options.font_size)?
        .unwrap_or(MIN_FONT_SIZE)
        .max(MIN_FONT_SIZE);

    let primary_color = match options.primary_color.as_deref() {
        Some(c) => color("primaryColor", c)?,
        None => DEFAULT_PRIMARY_COLOR.to_string(),
    };
    let background = match options.background.as_deref() {
        Some(c) => color("background", c)?,
        None => DEFAULT_BACKGROUND.to_string(),
    };

    let series_count = series_count.max(1);
    let palette = match options.palette.as_deref() {
        Some([]) => return Err(invalid("palette", "must contain at least one color")),
        Some(colors) => {
            let mut out = Vec::with_capacity(colors.len());
            for (i, c) in colors.iter().enumerate() {
                out.push(color(&format!("palette[{i}]"), c)?);
            }
            out
        }
        None if kind.is_multi_series() => generate_palette(&primary_color, series_count),
        None => vec![primary_color.clone()],
    };

    let columns = match options.columns {
        Some(0) => return Err(invalid("columns", "must be at least 1")),
        Some(n) => n,
        None => DEFAULT_STATS_COLUMNS,
    };

    let font_family = options
        .font_family
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .unwrap_or(DEFAULT_FONT_FAMILY)
        .to_string();

    Ok(ResolvedStyle {
        width,
        height,
        primary_color,
        palette,
        font_size,
        font_family,
        background,
        show_values: options.show_values.unwrap_or(true),
        columns,
    })
}
