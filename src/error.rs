//! Error types for record reading and conversion

use thiserror::Error;

/// A source line the reader refused to turn into a record.
///
/// Always recoverable: the line is dropped and the pass goes on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("insufficient columns in line {line} (record {id}): found {found}, need at least {need}")]
    InsufficientColumns {
        line: usize,
        id: String,
        found: usize,
        need: usize,
    },

    #[error("too many columns in line {line} (record {id}): found {found}, maximum is {max}")]
    TooManyColumns {
        line: usize,
        id: String,
        found: usize,
        max: usize,
    },

    #[error("invalid format (script column {column}) in line {line} (record {id})")]
    InvalidScript {
        line: usize,
        id: String,
        column: usize,
    },

    #[error("mismatching curly braces in line {line} (record {id})")]
    MismatchedBraces { line: usize, id: String },
}

/// A numeric reference that has no entry in the symbol tables.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("skill name for skill id {id} ({field}) is not known")]
    UnknownSkill { id: u32, field: &'static str },

    #[error("mob name for mob id {id} ({field}) is not known")]
    UnknownMob { id: u32, field: &'static str },

    #[error("item name for item id {id} ({field}) is not known")]
    UnknownItem { id: u32, field: &'static str },

    #[error("no head gear registered for view id {view} ({field})")]
    UnknownView { view: u32, field: &'static str },

    #[error("option {0} is not known")]
    UnknownOption(i64),
}

/// Why a transformer produced no node for a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Malformed record contents; only this record is dropped.
    #[error("record rejected: {0}")]
    Rejected(String),

    /// Unresolved optional or secondary reference; only this record is dropped.
    #[error("record skipped: {0}")]
    Soft(ResolveError),

    /// Unresolved reference that means the symbol tables are stale; ends the pass.
    #[error("conversion aborted: {0}")]
    Hard(ResolveError),
}

impl RecordError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, RecordError::Hard(_))
    }
}

/// Result type for transformer calls
pub type RecordResult<T> = std::result::Result<T, RecordError>;
