//! The maze grid: cell kinds, positions, and the square boards they live on.
//!
//! Two shapes of board exist:
//!
//! - A [`Grid`] is the canonical maze. It is validated on construction
//!   (exactly one entry, exactly one exit, no view-only cells) and never
//!   changes afterwards. The server loads one at startup and every session
//!   gets its own clone.
//! - A [`Board`] is any square matrix of [`CellKind`]s. Rendered views
//!   (fogged or full) are boards, and may contain `Unknown` and
//!   `PlayerMarker` cells.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::MazeError;

/// Side length of the reference maze.
pub const DEFAULT_SIDE: usize = 10;

// ---------------------------------------------------------------------------
// CellKind
// ---------------------------------------------------------------------------

/// What occupies a single cell.
///
/// The integer codes returned by [`code`](Self::code) are part of the wire
/// contract and of the maze file format:
///
/// ```text
/// 0 Wall   1 Path   2 Entry   3 Exit   4 Unknown   5 PlayerMarker
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    Wall,
    Path,
    Entry,
    Exit,
    /// Fogged cell in a rendered view.
    Unknown,
    /// The player's current cell in a rendered view.
    PlayerMarker,
}

impl CellKind {
    /// Returns the wire/file code for this kind.
    pub const fn code(self) -> i32 {
        match self {
            Self::Wall => 0,
            Self::Path => 1,
            Self::Entry => 2,
            Self::Exit => 3,
            Self::Unknown => 4,
            Self::PlayerMarker => 5,
        }
    }

    /// Parses a wire/file code. Returns `None` outside `0..=5`.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Wall),
            1 => Some(Self::Path),
            2 => Some(Self::Entry),
            3 => Some(Self::Exit),
            4 => Some(Self::Unknown),
            5 => Some(Self::PlayerMarker),
            _ => None,
        }
    }

    /// Parses a single ASCII digit from a maze definition.
    pub fn from_digit(c: char) -> Option<Self> {
        c.to_digit(10).and_then(|d| Self::from_code(d as i32))
    }

    /// `true` for kinds that only appear in rendered views.
    pub const fn is_view_only(self) -> bool {
        matches!(self, Self::Unknown | Self::PlayerMarker)
    }

    /// `true` for every kind a player may stand on.
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Wall)
    }

    /// `true` for the decor cells a player marker never overwrites.
    pub const fn is_landmark(self) -> bool {
        matches!(self, Self::Entry | Self::Exit)
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Wall => "wall",
            Self::Path => "path",
            Self::Entry => "entry",
            Self::Exit => "exit",
            Self::Unknown => "unknown",
            Self::PlayerMarker => "player marker",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A `(row, col)` cell coordinate. Row 0 is the top of the maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Chebyshev (king-move) distance to `other`.
    pub fn chebyshev(self, other: Position) -> usize {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// A square, row-major matrix of cells.
///
/// Deserialization goes through [`Board::from_cells`], so a board decoded
/// from the wire always has exactly `side * side` cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    side: usize,
    cells: Vec<CellKind>,
}

#[derive(Deserialize)]
struct BoardRepr {
    side: usize,
    cells: Vec<CellKind>,
}

impl TryFrom<BoardRepr> for Board {
    type Error = MazeError;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        Board::from_cells(repr.side, repr.cells)
    }
}

impl Board {
    /// Creates a board with every cell set to `kind`.
    pub fn filled(side: usize, kind: CellKind) -> Self {
        Self {
            side,
            cells: vec![kind; side * side],
        }
    }

    /// Builds a board from a row-major cell list.
    ///
    /// # Errors
    /// [`MazeError::CellCount`] if `cells.len() != side * side`.
    pub fn from_cells(side: usize, cells: Vec<CellKind>) -> Result<Self, MazeError> {
        let expected = side * side;
        if cells.len() != expected {
            return Err(MazeError::CellCount {
                side,
                expected,
                found: cells.len(),
            });
        }
        Ok(Self { side, cells })
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// `true` if `pos` lies inside the board.
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.side && pos.col < self.side
    }

    pub(crate) fn index(&self, pos: Position) -> Option<usize> {
        self.contains(pos).then(|| pos.row * self.side + pos.col)
    }

    /// Returns the cell at `pos`, or `None` when out of bounds.
    pub fn get(&self, pos: Position) -> Option<CellKind> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Overwrites the cell at `pos`. Out-of-bounds positions are ignored.
    pub fn set(&mut self, pos: Position, kind: CellKind) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = kind;
        }
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }

    /// Iterates over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[CellKind]> {
        // `chunks(0)` panics, and a zero-sided board has no rows anyway.
        self.cells.chunks(self.side.max(1))
    }

    /// Iterates over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let side = self.side;
        (0..side).flat_map(move |row| {
            (0..side).map(move |col| Position::new(row, col))
        })
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A validated, canonical maze.
///
/// Holds exactly one `Entry`, exactly one `Exit`, and no view-only cells.
/// A `Grid` has no setters: once built it is read-only, so it can be
/// shared freely and cloned per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    board: Board,
    entry: Position,
    exit: Position,
}

impl Grid {
    /// Validates a board as a canonical maze.
    ///
    /// # Errors
    /// - [`MazeError::ViewOnlyCell`] for any `Unknown`/`PlayerMarker` cell
    /// - [`MazeError::EntryCount`] / [`MazeError::ExitCount`] unless there
    ///   is exactly one of each
    pub fn from_board(board: Board) -> Result<Self, MazeError> {
        let mut entries = Vec::new();
        let mut exits = Vec::new();

        for pos in board.positions() {
            let kind = board.get(pos).unwrap_or(CellKind::Wall);
            match kind {
                CellKind::Entry => entries.push(pos),
                CellKind::Exit => exits.push(pos),
                kind if kind.is_view_only() => {
                    return Err(MazeError::ViewOnlyCell {
                        row: pos.row,
                        col: pos.col,
                        kind,
                    });
                }
                _ => {}
            }
        }

        let &[entry] = entries.as_slice() else {
            return Err(MazeError::EntryCount(entries.len()));
        };
        let &[exit] = exits.as_slice() else {
            return Err(MazeError::ExitCount(exits.len()));
        };

        Ok(Self { board, entry, exit })
    }

    /// Builds a grid from nested rows. The row count sets the side length.
    pub fn from_rows(rows: Vec<Vec<CellKind>>) -> Result<Self, MazeError> {
        let side = rows.len();
        let mut cells = Vec::with_capacity(side * side);
        for (row, cols) in rows.into_iter().enumerate() {
            if cols.len() != side {
                return Err(MazeError::RowLength {
                    row,
                    expected: side,
                    found: cols.len(),
                });
            }
            cells.extend(cols);
        }
        Self::from_board(Board::from_cells(side, cells)?)
    }

    /// Parses a maze definition: `side` lines of `side` ASCII digits each.
    ///
    /// ```text
    /// 2101111111
    /// 1101000001
    /// ...
    /// ```
    ///
    /// Trailing whitespace on a line (including the `\r` of CRLF files) and
    /// trailing blank lines are ignored. Anything else is an error.
    pub fn parse(text: &str, side: usize) -> Result<Self, MazeError> {
        let mut lines: Vec<&str> = text.lines().map(str::trim_end).collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }

        if lines.len() != side {
            return Err(MazeError::RowCount {
                expected: side,
                found: lines.len(),
            });
        }

        let mut cells = Vec::with_capacity(side * side);
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != side {
                return Err(MazeError::RowLength {
                    row,
                    expected: side,
                    found,
                });
            }
            for (col, c) in line.chars().enumerate() {
                let kind = CellKind::from_digit(c).ok_or(
                    MazeError::InvalidCell { row, col, found: c },
                )?;
                cells.push(kind);
            }
        }

        Self::from_board(Board::from_cells(side, cells)?)
    }

    /// Reads and parses a maze file.
    pub fn load(path: impl AsRef<Path>, side: usize) -> Result<Self, MazeError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| MazeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let grid = Self::parse(&text, side)?;
        tracing::info!(
            path = %path.display(),
            side,
            entry = %grid.entry,
            exit = %grid.exit,
            "maze loaded"
        );
        Ok(grid)
    }

    pub fn side(&self) -> usize {
        self.board.side()
    }

    pub fn entry(&self) -> Position {
        self.entry
    }

    pub fn exit(&self) -> Position {
        self.exit
    }

    /// Returns the cell at `pos`, or `None` when out of bounds.
    pub fn cell(&self, pos: Position) -> Option<CellKind> {
        self.board.get(pos)
    }

    /// The full, unfogged board.
    pub fn board(&self) -> &Board {
        &self.board
    }
}
