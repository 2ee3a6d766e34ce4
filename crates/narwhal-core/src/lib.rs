#![forbid(unsafe_code)]

//! Chart request model + validation (headless).
//!
//! Design goals:
//! - strict, index-precise validation of caller-supplied records
//! - deterministic style resolution (identical input yields identical colors)
//! - no I/O: everything here is a pure function over in-memory data

pub mod config;
pub mod error;
pub mod palette;
pub mod records;
pub mod style;
pub mod validate;

pub use config::StyleConfig;
pub use error::{Error, Result, ValidationError};
pub use records::{
    ChartData, ComparisonRow, ComparisonTable, FlowNode, MagnitudeRecord, StatRecord,
    parse_records,
};
pub use style::{ResolvedStyle, StyleOptions, resolve_style};
pub use validate::validate;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Pie,
    Stats,
    Comparison,
    Flowchart,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Bar,
        ChartKind::Pie,
        ChartKind::Stats,
        ChartKind::Comparison,
        ChartKind::Flowchart,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Stats => "stats",
            ChartKind::Comparison => "comparison",
            ChartKind::Flowchart => "flowchart",
        }
    }

    /// Artifact type reported to downstream report tooling.
    pub fn artifact_type(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar_chart",
            ChartKind::Pie => "pie_chart",
            ChartKind::Stats => "stat_cards",
            ChartKind::Comparison => "comparison_table",
            ChartKind::Flowchart => "flowchart",
        }
    }

    /// Kinds that color each category from a palette rather than a single hue.
    pub fn is_multi_series(self) -> bool {
        matches!(
            self,
            ChartKind::Pie | ChartKind::Stats | ChartKind::Comparison
        )
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        ChartKind::ALL
            .into_iter()
            .find(|k| k.as_str() == needle)
            .ok_or_else(|| Error::UnknownKind {
                kind: s.to_string(),
            })
    }
}

/// The sole input of a rendering call.
///
/// Fields are private so a request cannot change after it has been handed to the pipeline;
/// use the `with_*` builders before rendering.
#[derive(Debug, Clone)]
pub struct ChartRequest {
    kind: ChartKind,
    title: String,
    data: Vec<Value>,
    style: StyleOptions,
    destination: PathBuf,
}

impl ChartRequest {
    pub fn new(
        kind: ChartKind,
        title: impl Into<String>,
        data: Vec<Value>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            data,
            style: StyleOptions::default(),
            destination: destination.into(),
        }
    }

    /// Builds a request from a JSON-encoded array of records.
    pub fn from_json(
        kind: ChartKind,
        title: impl Into<String>,
        records_json: &str,
        destination: impl Into<PathBuf>,
    ) -> Result<Self> {
        let data = parse_records(records_json)?;
        Ok(Self::new(kind, title, data, destination))
    }

    pub fn with_style(mut self, style: StyleOptions) -> Self {
        self.style = style;
        self
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn data(&self) -> &[Value] {
        &self.data
    }

    pub fn style(&self) -> &StyleOptions {
        &self.style
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Validates the records for this request's kind.
    pub fn validate(&self) -> std::result::Result<ChartData, ValidationError> {
        validate(self.kind, &self.data)
    }
}

#[cfg(test)]
mod tests;
