use crate::ChartKind;

/// Malformed or semantically invalid chart input.
///
/// Every record-level variant carries the zero-based index of the first offending record so
/// callers can point at the exact entry in their JSON.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("data must be a JSON array of records")]
    NotAnArray,

    #[error("data for kind {kind} must contain at least one record")]
    EmptyData { kind: ChartKind },

    #[error("record {index}: expected a JSON object")]
    NotAnObject { index: usize },

    #[error("record {index}: missing field `{field}`")]
    MissingField { index: usize, field: String },

    #[error("record {index}: field `{field}` {reason}")]
    InvalidField {
        index: usize,
        field: String,
        reason: String,
    },

    #[error("record {index}: field `{field}` must be a finite number")]
    NonFiniteValue { index: usize, field: String },

    #[error("negative value not supported for kind {kind} (record {index}, field `value`)")]
    NegativeValue { kind: ChartKind, index: usize },

    #[error("degenerate data, sum=0")]
    DegenerateData,

    #[error("record {index}: missing column `{column}` (columns are defined by record 0)")]
    MissingColumn { index: usize, column: String },

    #[error("record {index}: unexpected column `{column}` (columns are defined by record 0)")]
    UnexpectedColumn { index: usize, column: String },

    #[error("record {index}: duplicate node id `{id}`")]
    DuplicateId { index: usize, id: String },

    #[error("record {index}: `next` references unknown node id `{target}`")]
    DanglingReference { index: usize, target: String },

    #[error("record {index}: node `{id}` lists itself in `next` (self-loops are ambiguous)")]
    SelfLoop { index: usize, id: String },

    #[error("style field `{field}`: {reason}")]
    InvalidStyle { field: String, reason: String },
}

impl ValidationError {
    /// Index of the offending record, when the failure is tied to one.
    pub fn record_index(&self) -> Option<usize> {
        match self {
            ValidationError::NotAnObject { index }
            | ValidationError::MissingField { index, .. }
            | ValidationError::InvalidField { index, .. }
            | ValidationError::NonFiniteValue { index, .. }
            | ValidationError::NegativeValue { index, .. }
            | ValidationError::MissingColumn { index, .. }
            | ValidationError::UnexpectedColumn { index, .. }
            | ValidationError::DuplicateId { index, .. }
            | ValidationError::DanglingReference { index, .. }
            | ValidationError::SelfLoop { index, .. } => Some(*index),
            ValidationError::NotAnArray
            | ValidationError::EmptyData { .. }
            | ValidationError::DegenerateData
            | ValidationError::InvalidStyle { .. } => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("unknown chart kind `{kind}` (expected one of bar, pie, stats, comparison, flowchart)")]
    UnknownKind { kind: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
