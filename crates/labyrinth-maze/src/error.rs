//! Error types for the maze layer.

use std::path::PathBuf;

use crate::CellKind;

/// Errors that can occur while loading or validating a maze.
///
/// Every variant is fatal at startup: a server never accepts connections
/// with a maze that failed to load.
#[derive(Debug, thiserror::Error)]
pub enum MazeError {
    /// The maze file could not be read.
    #[error("failed to read maze file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The definition has the wrong number of rows.
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    /// A row has the wrong number of cells.
    #[error("row {row}: expected {expected} cells, found {found}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A character that is not a cell digit.
    #[error("row {row}, column {col}: invalid cell character {found:?}")]
    InvalidCell { row: usize, col: usize, found: char },

    /// `Unknown` or `PlayerMarker` in a canonical maze. Those kinds only
    /// exist in rendered views.
    #[error("row {row}, column {col}: {kind} is a view-only cell kind")]
    ViewOnlyCell {
        row: usize,
        col: usize,
        kind: CellKind,
    },

    /// The maze does not have exactly one entry.
    #[error("maze must contain exactly one entry, found {0}")]
    EntryCount(usize),

    /// The maze does not have exactly one exit.
    #[error("maze must contain exactly one exit, found {0}")]
    ExitCount(usize),

    /// A flat cell list whose length is not `side * side`.
    #[error("board of side {side} needs {expected} cells, got {found}")]
    CellCount {
        side: usize,
        expected: usize,
        found: usize,
    },
}
