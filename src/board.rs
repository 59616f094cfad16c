//! Board state for the sliding tile puzzle.
//!
//! A `Board` is an immutable value object: neighbor generation, twin
//! generation and move application all return fresh instances, and no board
//! is ever mutated after a search node references it. The grid holds the
//! values `0..size²` exactly once, with `0` marking the blank.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// Direction a numbered tile travels when it slides into the blank.
///
/// Labels describe the tile's motion, not the blank's: when the blank moves
/// right the displaced tile has moved left, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "U")]
    Up,
    #[serde(rename = "D")]
    Down,
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "R")]
    Right,
}

impl Direction {
    /// Single-letter label used in move lists.
    pub fn letter(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }

    /// (row, col) offset of a tile moving in this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Rejection reasons for a grid that cannot form a valid board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// The twin swap needs two rows of at least two cells.
    #[error("board must be at least 2x2, got {0}x{0}")]
    TooSmall(usize),
    /// Cell values are bytes, so a grid may hold at most 256 cells.
    #[error("board of size {0}x{0} exceeds the tile value range")]
    TooLarge(usize),
    #[error("row {row} has {found} cells, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("found tile {0}")]
    TileOutOfRange(u8),
    #[error("tile {tile} appears {count} times")]
    DuplicateTile { tile: u8, count: usize },
}

/// Rejection reasons for the direct move API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("tile {0} not found")]
    UnknownTile(u8),
    #[error("tile {tile} cannot move {direction}")]
    Blocked { tile: u8, direction: Direction },
}

/// An N×N sliding puzzle position, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<u8>,
    /// Index of the blank, located once at construction.
    blank: usize,
}

impl Board {
    /// Builds a board from row-major rows, validating the grid invariant:
    /// every value in `0..size²` appears exactly once.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, BoardError> {
        let size = rows.len();
        if size < 2 {
            return Err(BoardError::TooSmall(size));
        }
        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != size {
                return Err(BoardError::NotSquare {
                    row,
                    expected: size,
                    found: values.len(),
                });
            }
            cells.extend_from_slice(values);
        }

        let mut counts = vec![0usize; size * size];
        for &value in &cells {
            let slot = counts
                .get_mut(value as usize)
                .ok_or(BoardError::TileOutOfRange(value))?;
            *slot += 1;
        }
        for (tile, &count) in counts.iter().enumerate() {
            if count != 1 {
                return Err(BoardError::DuplicateTile {
                    tile: tile as u8,
                    count,
                });
            }
        }

        // The multiset check guarantees exactly one zero.
        let blank = cells.iter().position(|&v| v == 0).unwrap_or(0);
        Ok(Self { size, cells, blank })
    }

    /// The solved board of the given dimension.
    pub fn goal(size: usize) -> Result<Self, BoardError> {
        if size < 2 {
            return Err(BoardError::TooSmall(size));
        }
        let total = size * size;
        if total > u8::MAX as usize + 1 {
            return Err(BoardError::TooLarge(size));
        }
        let cells: Vec<u8> = (0..total).map(|v| ((v + 1) % total) as u8).collect();
        Ok(Self {
            size,
            cells,
            blank: total - 1,
        })
    }

    /// Grid dimension.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The value at a cell, or `None` out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells.get(row * self.size + col).copied()
    }

    /// (row, col) of the blank.
    pub fn blank_position(&self) -> (usize, usize) {
        (self.blank / self.size, self.blank % self.size)
    }

    fn goal_position(&self, tile: u8) -> (usize, usize) {
        let t = tile as usize - 1;
        (t / self.size, t % self.size)
    }

    /// Heuristic estimate of remaining moves: the Manhattan distance of
    /// every tile to its goal cell, plus the number of misplaced tiles.
    ///
    /// The misplaced-tile term can overestimate the true remaining cost, so
    /// solutions found under this estimate are not guaranteed minimal. The
    /// double-count is kept as-is; changing it changes move counts.
    pub fn sum_distance(&self) -> u32 {
        let mut distance = 0u32;
        let mut misplaced = 0u32;
        for (idx, &tile) in self.cells.iter().enumerate() {
            if tile == 0 {
                continue;
            }
            let here = (idx / self.size, idx % self.size);
            let goal = self.goal_position(tile);
            distance += (here.0.abs_diff(goal.0) + here.1.abs_diff(goal.1)) as u32;
            if here != goal {
                misplaced += 1;
            }
        }
        distance + misplaced
    }

    /// True iff every tile occupies its goal cell.
    pub fn is_goal(&self) -> bool {
        self.cells.iter().enumerate().all(|(idx, &tile)| {
            tile == 0 || self.goal_position(tile) == (idx / self.size, idx % self.size)
        })
    }

    /// Boards one blank swap away, enumerated up, down, left, right relative
    /// to the blank. Each carries the direction the displaced tile moved,
    /// derived from how the blank shifted (blank up means the tile went
    /// down, blank left means it went right, and so on).
    pub fn neighbors(&self) -> SmallVec<[(Board, Direction); 4]> {
        let (row, col) = self.blank_position();
        let mut out = SmallVec::new();
        if row > 0 {
            out.push((self.swapped_with_blank(row - 1, col), Direction::Down));
        }
        if row + 1 < self.size {
            out.push((self.swapped_with_blank(row + 1, col), Direction::Up));
        }
        if col > 0 {
            out.push((self.swapped_with_blank(row, col - 1), Direction::Right));
        }
        if col + 1 < self.size {
            out.push((self.swapped_with_blank(row, col + 1), Direction::Left));
        }
        out
    }

    fn swapped_with_blank(&self, row: usize, col: usize) -> Board {
        let target = row * self.size + col;
        let mut cells = self.cells.clone();
        cells.swap(self.blank, target);
        Board {
            size: self.size,
            cells,
            blank: target,
        }
    }

    /// The board with one fixed pair of adjacent tiles swapped: `(0,0)` and
    /// `(0,1)` when neither holds the blank, otherwise `(1,0)` and `(1,1)`.
    ///
    /// The swap flips the permutation parity, so exactly one of `self` and
    /// `self.twin()` can reach the goal. That invariant is what lets the
    /// solver decide solvability without a parity formula.
    pub fn twin(&self) -> Board {
        let mut cells = self.cells.clone();
        if cells[0] != 0 && cells[1] != 0 {
            cells.swap(0, 1);
        } else {
            cells.swap(self.size, self.size + 1);
        }
        Board {
            size: self.size,
            cells,
            blank: self.blank,
        }
    }

    /// Slides `tile` one cell in `direction`, returning the new board.
    ///
    /// The destination must be the blank; anything else is an illegal move
    /// and leaves `self` untouched. The search never calls this; it exists
    /// for callers replaying a move list.
    pub fn apply_move(&self, tile: u8, direction: Direction) -> Result<Board, MoveError> {
        if tile == 0 {
            return Err(MoveError::UnknownTile(tile));
        }
        let idx = self
            .cells
            .iter()
            .position(|&v| v == tile)
            .ok_or(MoveError::UnknownTile(tile))?;

        let (dr, dc) = direction.delta();
        let dest_row = (idx / self.size) as isize + dr;
        let dest_col = (idx % self.size) as isize + dc;
        let in_bounds = dest_row >= 0
            && dest_col >= 0
            && (dest_row as usize) < self.size
            && (dest_col as usize) < self.size;
        if !in_bounds {
            return Err(MoveError::Blocked { tile, direction });
        }
        let dest = dest_row as usize * self.size + dest_col as usize;
        if self.cells[dest] != 0 {
            return Err(MoveError::Blocked { tile, direction });
        }

        let mut cells = self.cells.clone();
        cells.swap(idx, dest);
        Ok(Board {
            size: self.size,
            cells,
            blank: idx,
        })
    }
}

impl fmt::Display for Board {
    /// Two-character fields separated by single spaces, the blank as two
    /// spaces, one row per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                if col > 0 {
                    write!(f, " ")?;
                }
                match self.cells[row * self.size + col] {
                    0 => write!(f, "  ")?,
                    v => write!(f, "{v:2}")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
