use thiserror::Error;

use super::fields::ParseErrorKind;
use crate::models::{DocumentError, MetadataError};
use crate::schema::Flag;

/// Everything that can go wrong while reading or writing a topology file.
#[derive(Debug, Error)]
pub enum PrmtopError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {kind}")]
    Parse { line: usize, kind: ParseErrorKind },

    #[error("line {line}: unknown flag {name:?}")]
    UnknownFlag { line: usize, name: String },

    #[error("line {line}: unknown format specifier {spec:?}")]
    UnknownFormat { line: usize, spec: String },

    #[error("block {} is malformed: {reason}", .flag.name())]
    MalformedBlock { flag: Flag, reason: String },

    #[error("block {} is required but missing", .flag.name())]
    MissingBlock { flag: Flag },

    #[error("header error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    #[error("header disagrees with the blocks on {field}: blocks give {derived}, header claims {from_header}")]
    Inconsistency {
        field: &'static str,
        derived: i64,
        from_header: i64,
    },
}
