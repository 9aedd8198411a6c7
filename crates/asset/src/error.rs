//! Error types for mesh and material loading.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Result type for loaders.
pub type AssetResult<T> = Result<T, AssetError>;

/// Why a single line could not be decoded.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    /// Fewer numeric operands than the record needs.
    #[error("expected {expected} operands for '{tag}', found {found}")]
    OperandCount {
        tag: &'static str,
        expected: usize,
        found: usize,
    },

    /// Face reference that matches none of `p/t/n`, `p/t`, `p//n`, `p`.
    #[error("unparseable face vertex at column {column}")]
    MalformedFace { column: usize },

    /// Index that does not land inside its attribute array.
    #[error("{attribute} index {raw} is out of range ({len} declared so far)")]
    UnresolvableIndex {
        attribute: &'static str,
        raw: i32,
        len: usize,
    },

    /// Vertex id that no longer fits the `u32` index buffer.
    #[error("mesh has more than {} vertices", u32::MAX)]
    TooManyVertices,
}

/// Errors raised while loading a mesh or a material library.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to open '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read line {line} of '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("{}:{line}: {source}\n  {text}", path.display())]
    Record {
        path: PathBuf,
        line: usize,
        text: String,
        #[source]
        source: RecordError,
    },

    #[error("{}:{line}: material library '{}' failed to load", path.display(), library.display())]
    MaterialLibrary {
        path: PathBuf,
        line: usize,
        library: PathBuf,
        #[source]
        source: Box<AssetError>,
    },
}

impl AssetError {
    /// Line of the mesh or library file the error points at, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Open { .. } => None,
            Self::Read { line, .. } | Self::Record { line, .. } | Self::MaterialLibrary { line, .. } => {
                Some(*line)
            }
        }
    }

    /// The decode failure behind this error, looking through library errors.
    pub fn record_error(&self) -> Option<&RecordError> {
        match self {
            Self::Record { source, .. } => Some(source),
            Self::MaterialLibrary { source, .. } => source.record_error(),
            _ => None,
        }
    }
}
