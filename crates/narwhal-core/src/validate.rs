//! Record validation and normalization.
//!
//! Records arrive as loosely-typed JSON. Each kind has its own shape; the first record that
//! violates it determines the error, so failures are deterministic for a given input.

use crate::records::{
    ChartData, ComparisonRow, ComparisonTable, FlowNode, MagnitudeRecord, StatRecord,
};
use crate::{ChartKind, ValidationError};
use indexmap::IndexMap;
use serde_json::{Map, Value};

type Result<T> = std::result::Result<T, ValidationError>;

const NAME_KEY: &str = "name";

pub fn validate(kind: ChartKind, data: &[Value]) -> Result<ChartData> {
    if data.is_empty() {
        return Err(ValidationError::EmptyData { kind });
    }

    let out = match kind {
        ChartKind::Bar => ChartData::Bar(validate_magnitudes(kind, data)?),
        ChartKind::Pie => {
            let records = validate_magnitudes(kind, data)?;
            let sum: f64 = records.iter().map(|r| r.value).sum();
            if sum <= 0.0 {
                return Err(ValidationError::DegenerateData);
            }
            ChartData::Pie(records)
        }
        ChartKind::Stats => ChartData::Stats(validate_stats(data)?),
        ChartKind::Comparison => ChartData::Comparison(validate_comparison(data)?),
        ChartKind::Flowchart => ChartData::Flowchart(validate_flowchart(data)?),
    };

    tracing::debug!(kind = %kind, records = out.len(), "validated chart records");
    Ok(out)
}

fn object_at(index: usize, value: &Value) -> Result<&Map<String, Value>> {
    value
        .as_object()
        .ok_or(ValidationError::NotAnObject { index })
}

fn required_str(obj: &Map<String, Value>, index: usize, field: &str) -> Result<String> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(ValidationError::MissingField {
            index,
            field: field.to_string(),
        }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationError::InvalidField {
            index,
            field: field.to_string(),
            reason: "must be a string".to_string(),
        }),
    }
}

fn optional_str(obj: &Map<String, Value>, index: usize, field: &str) -> Result<Option<String>> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ValidationError::InvalidField {
            index,
            field: field.to_string(),
            reason: "must be a string".to_string(),
        }),
    }
}

fn required_number(obj: &Map<String, Value>, index: usize, field: &str) -> Result<f64> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(ValidationError::MissingField {
            index,
            field: field.to_string(),
        }),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) if v.is_finite() => Ok(v),
            _ => Err(ValidationError::NonFiniteValue {
                index,
                field: field.to_string(),
            }),
        },
        Some(_) => Err(ValidationError::InvalidField {
            index,
            field: field.to_string(),
            reason: "must be a number".to_string(),
        }),
    }
}

/// Renders a scalar JSON cell as display text. Nested values have no textual form.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some("-".to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn validate_magnitudes(kind: ChartKind, data: &[Value]) -> Result<Vec<MagnitudeRecord>> {
    let mut out = Vec::with_capacity(data.len());
    for (index, item) in data.iter().enumerate() {
        let obj = object_at(index, item)?;
        let label = required_str(obj, index, "label")?;
        let value = required_number(obj, index, "value")?;
        if value < 0.0 {
            return Err(ValidationError::NegativeValue { kind, index });
        }
        let unit = optional_str(obj, index, "unit")?;
        out.push(MagnitudeRecord { label, value, unit });
    }
    Ok(out)
}

fn validate_stats(data: &[Value]) -> Result<Vec<StatRecord>> {
    let mut out = Vec::with_capacity(data.len());
    for (index, item) in data.iter().enumerate() {
        let obj = object_at(index, item)?;
        let label = required_str(obj, index, "label")?;
        let value = match obj.get("value") {
            None | Some(Value::Null) => {
                return Err(ValidationError::MissingField {
                    index,
                    field: "value".to_string(),
                });
            }
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(_) => {
                return Err(ValidationError::InvalidField {
                    index,
                    field: "value".to_string(),
                    reason: "must be a string or a number".to_string(),
                });
            }
        };
        let description = optional_str(obj, index, "description")?;
        out.push(StatRecord {
            label,
            value,
            description,
        });
    }
    Ok(out)
}

fn validate_comparison(data: &[Value]) -> Result<ComparisonTable> {
    let first = object_at(0, &data[0])?;
    let columns: Vec<String> = first
        .keys()
        .filter(|k| k.as_str() != NAME_KEY)
        .cloned()
        .collect();

    let mut rows = Vec::with_capacity(data.len());
    for (index, item) in data.iter().enumerate() {
        let obj = object_at(index, item)?;
        let name = required_str(obj, index, NAME_KEY)?;

        let mut cells = Vec::with_capacity(columns.len());
        for column in &columns {
            let Some(value) = obj.get(column) else {
                return Err(ValidationError::MissingColumn {
                    index,
                    column: column.clone(),
                });
            };
            let Some(text) = scalar_text(value) else {
                return Err(ValidationError::InvalidField {
                    index,
                    field: column.clone(),
                    reason: "must be a string, number, boolean or null".to_string(),
                });
            };
            cells.push(text);
        }

        if let Some(extra) = obj
            .keys()
            .find(|k| k.as_str() != NAME_KEY && !columns.contains(*k))
        {
            return Err(ValidationError::UnexpectedColumn {
                index,
                column: extra.clone(),
            });
        }

        rows.push(ComparisonRow { name, cells });
    }

    Ok(ComparisonTable { columns, rows })
}

fn validate_flowchart(data: &[Value]) -> Result<Vec<FlowNode>> {
    if data.iter().all(Value::is_string) {
        return Ok(steps_to_chain(data));
    }

    let mut nodes = Vec::with_capacity(data.len());
    let mut ids: IndexMap<String, usize> = IndexMap::with_capacity(data.len());
    for (index, item) in data.iter().enumerate() {
        let obj = object_at(index, item)?;
        let id = required_str(obj, index, "id")?;
        let label = required_str(obj, index, "label")?;
        let next = next_ids(obj, index)?;
        if ids.insert(id.clone(), index).is_some() {
            return Err(ValidationError::DuplicateId { index, id });
        }
        nodes.push(FlowNode { id, label, next });
    }

    for (index, node) in nodes.iter().enumerate() {
        for target in &node.next {
            if *target == node.id {
                return Err(ValidationError::SelfLoop {
                    index,
                    id: node.id.clone(),
                });
            }
            if !ids.contains_key(target) {
                return Err(ValidationError::DanglingReference {
                    index,
                    target: target.clone(),
                });
            }
        }
    }

    Ok(nodes)
}

fn next_ids(obj: &Map<String, Value>, index: usize) -> Result<Vec<String>> {
    let items = match obj.get("next") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(ValidationError::InvalidField {
                index,
                field: "next".to_string(),
                reason: "must be an array of node ids".to_string(),
            });
        }
    };

    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let Some(target) = item.as_str() else {
            return Err(ValidationError::InvalidField {
                index,
                field: format!("next[{i}]"),
                reason: "must be a string".to_string(),
            });
        };
        // Repeated successors would draw the same edge twice.
        if !out.iter().any(|t| t == target) {
            out.push(target.to_string());
        }
    }
    Ok(out)
}

/// Turns a plain list of step labels into a linear chain `step-1 -> step-2 -> ...`.
fn steps_to_chain(data: &[Value]) -> Vec<FlowNode> {
    let n = data.len();
    data.iter()
        .enumerate()
        .map(|(i, step)| FlowNode {
            id: format!("step-{}", i + 1),
            label: step.as_str().unwrap_or_default().to_string(),
            next: if i + 1 < n {
                vec![format!("step-{}", i + 2)]
            } else {
                Vec::new()
            },
        })
        .collect()
}
