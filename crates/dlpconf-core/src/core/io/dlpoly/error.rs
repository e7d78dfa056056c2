use crate::core::models::structure::StructureError;
use std::fmt;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DlpConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid header on line {line}: {kind}")]
    Header { line: usize, kind: FieldErrorKind },

    #[error("Invalid cell row {row} on line {line}: {kind}")]
    Cell {
        row: usize,
        line: usize,
        kind: FieldErrorKind,
    },

    #[error("Invalid {field} record for atom {atom} on line {line}: {kind}")]
    AtomRecord {
        atom: usize,
        field: RecordField,
        line: usize,
        kind: FieldErrorKind,
    },

    #[error("Unexpected end of stream at line {line} while reading the {context}")]
    UnexpectedEof { line: usize, context: &'static str },

    #[error("Inconsistent structure data: {0}")]
    Structure(#[from] StructureError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldErrorKind {
    #[error("line is missing")]
    MissingLine,
    #[error("expected at least {expected} values, found {found}")]
    TooFewTokens { expected: usize, found: usize },
    #[error("'{value}' is not a valid integer")]
    InvalidInteger { value: String },
    #[error("'{value}' is not a valid real number")]
    InvalidFloat { value: String },
    #[error("level of detail must be 0, 1 or 2 (found {value})")]
    UnsupportedLevel { value: i64 },
}

/// The per-atom line an [`DlpConfigError::AtomRecord`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Position,
    Velocity,
    Force,
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordField::Position => "position",
            RecordField::Velocity => "velocity",
            RecordField::Force => "force",
        };
        f.write_str(name)
    }
}
