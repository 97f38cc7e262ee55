//! Directions and move validation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Grid, Position};

/// One of the four orthogonal moves.
///
/// Both the order of [`Direction::ALL`] and the codes returned by
/// [`code`](Self::code) are part of the wire contract: available-move lists
/// are always reported in `ALL` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Canonical enumeration order: Up, Right, Down, Left.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// `(row, col)` offset of one step.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Right => (0, 1),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
        }
    }

    /// Wire code: Up=1, Right=2, Down=3, Left=4.
    pub const fn code(self) -> i32 {
        match self {
            Self::Up => 1,
            Self::Right => 2,
            Self::Down => 3,
            Self::Left => 4,
        }
    }

    /// Parses a wire code. `0` and anything outside `1..=4` is `None`.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Up),
            2 => Some(Self::Right),
            3 => Some(Self::Down),
            4 => Some(Self::Left),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "up",
            Self::Right => "right",
            Self::Down => "down",
            Self::Left => "left",
        };
        f.write_str(name)
    }
}

/// Shifts `from` one step in `direction`, staying inside a `side`×`side`
/// square. Ignores cell contents.
pub fn shift(from: Position, direction: Direction, side: usize) -> Option<Position> {
    let (dr, dc) = direction.delta();
    let row = from.row.checked_add_signed(dr)?;
    let col = from.col.checked_add_signed(dc)?;
    (row < side && col < side).then_some(Position::new(row, col))
}

/// Where a step from `from` lands, or `None` if it leaves the grid or hits
/// a wall.
pub fn destination(grid: &Grid, from: Position, direction: Direction) -> Option<Position> {
    let to = shift(from, direction, grid.side())?;
    grid.cell(to)
        .is_some_and(|kind| kind.is_passable())
        .then_some(to)
}

/// Every direction that can be taken from `from`, in [`Direction::ALL`]
/// order. Empty when boxed in.
pub fn valid_moves(grid: &Grid, from: Position) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|&direction| destination(grid, from, direction).is_some())
        .collect()
}
