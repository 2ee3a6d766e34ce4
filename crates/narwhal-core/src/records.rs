use crate::{ChartKind, Result, ValidationError};
use serde::Serialize;
use serde_json::Value;

/// A labelled magnitude (bar and pie charts).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MagnitudeRecord {
    pub label: String,
    pub value: f64,
    pub unit: Option<String>,
}

/// A headline metric shown as a card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatRecord {
    pub label: String,
    pub value: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub name: String,
    /// Cell text, in `ComparisonTable::columns` order.
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonTable {
    /// Column keys (excluding `name`) in the order record 0 declares them.
    pub columns: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowNode {
    pub id: String,
    pub label: String,
    pub next: Vec<String>,
}

/// Validated, kind-specific records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "records", rename_all = "lowercase")]
pub enum ChartData {
    Bar(Vec<MagnitudeRecord>),
    Pie(Vec<MagnitudeRecord>),
    Stats(Vec<StatRecord>),
    Comparison(ComparisonTable),
    Flowchart(Vec<FlowNode>),
}

impl ChartData {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartData::Bar(_) => ChartKind::Bar,
            ChartData::Pie(_) => ChartKind::Pie,
            ChartData::Stats(_) => ChartKind::Stats,
            ChartData::Comparison(_) => ChartKind::Comparison,
            ChartData::Flowchart(_) => ChartKind::Flowchart,
        }
    }

    /// Number of input records.
    pub fn len(&self) -> usize {
        match self {
            ChartData::Bar(r) | ChartData::Pie(r) => r.len(),
            ChartData::Stats(r) => r.len(),
            ChartData::Comparison(t) => t.rows.len(),
            ChartData::Flowchart(n) => n.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of distinct colors the chart needs from the palette.
    pub fn series_count(&self) -> usize {
        match self {
            ChartData::Pie(r) => r.len(),
            ChartData::Stats(r) => r.len(),
            // One accent per column, the name column included.
            ChartData::Comparison(t) => t.columns.len() + 1,
            ChartData::Bar(_) | ChartData::Flowchart(_) => 1,
        }
    }
}

/// Parses a JSON-encoded array of records.
pub fn parse_records(json: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(json)? {
        Value::Array(items) => Ok(items),
        _ => Err(ValidationError::NotAnArray.into()),
    }
}
