//! Level loading errors.
use std::path::PathBuf;

/// Why a level file could not be turned into a [`GridMap`](crate::core::map::GridMap).
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("cannot open '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid token '{token}' on line {line}")]
    MalformedToken { line: usize, token: String },
    #[error("non-rectangular map: line {line} has {found} tiles, expected {expected}")]
    NonRectangularGrid {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("empty or invalid map")]
    EmptyGrid,
}

/// Fieldless category of a [`MapError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapErrorKind {
    Io,
    MalformedToken,
    NonRectangularGrid,
    EmptyGrid,
}

impl MapError {
    pub fn kind(&self) -> MapErrorKind {
        match self {
            MapError::Io { .. } => MapErrorKind::Io,
            MapError::MalformedToken { .. } => MapErrorKind::MalformedToken,
            MapError::NonRectangularGrid { .. } => MapErrorKind::NonRectangularGrid,
            MapError::EmptyGrid => MapErrorKind::EmptyGrid,
        }
    }
}
