use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the inikit library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("source not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed input at line {line}: {kind}: `{text}`")]
    MalformedInput {
        line: usize,
        text: String,
        kind: MalformedKind,
    },

    #[error("no entry `{key}` in section `[{section}]`")]
    NotFound { section: String, key: String },
}

/// The specific validation rule a malformed line violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MalformedKind {
    #[error("empty section name")]
    EmptySectionName,

    #[error("reserved character in name or value")]
    ReservedCharacter,

    #[error("entry has no `=`")]
    MissingAssignment,

    #[error("entry has more than one `=`")]
    RepeatedAssignment,

    #[error("empty key")]
    EmptyKey,

    #[error("empty value")]
    EmptyValue,

    #[error("entry appears before any section header")]
    EntryOutsideSection,

    #[error("section header does not end with `]`")]
    UnterminatedHeader,
}
