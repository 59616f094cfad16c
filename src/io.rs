//! Text-format wrappers around the search core.
//!
//! Board files come in, move lists go out; the solver itself never touches
//! either format. A board file starts with a line holding the grid
//! dimension, followed by that many rows of two-character fields separated
//! by single spaces. Inside a field a space reads as the digit zero, so the
//! blank may appear as `00`, `" 0"` or two spaces.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::board::{Board, BoardError};
use crate::solver::SolutionMove;

/// Failures while reading a board file.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read board: {0}")]
    Io(#[from] io::Error),
    #[error("invalid board size line {0:?}")]
    InvalidSize(String),
    #[error("unexpected end of input at line {0}")]
    UnexpectedEof(usize),
    /// A field separator that is not a single space, or a short line.
    #[error("error in line {0}")]
    BadSeparator(usize),
    #[error("invalid tile field {field:?} in line {line}")]
    BadField { line: usize, field: String },
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Reads and validates a board file.
pub fn read_board<P: AsRef<Path>>(path: P) -> Result<Board, ReadError> {
    parse_board(BufReader::new(File::open(path)?))
}

/// Parses a board from the text format.
pub fn parse_board<R: BufRead>(reader: R) -> Result<Board, ReadError> {
    let mut lines = reader.lines();
    let size_line = lines.next().ok_or(ReadError::UnexpectedEof(0))??;
    let size: usize = size_line
        .trim()
        .parse()
        .map_err(|_| ReadError::InvalidSize(size_line.clone()))?;

    let mut rows = Vec::with_capacity(size);
    for row in 0..size {
        let line = lines.next().ok_or(ReadError::UnexpectedEof(row + 1))??;
        rows.push(parse_row(&line, size, row)?);
    }
    Ok(Board::from_rows(&rows)?)
}

/// One row: `size` two-character fields joined by single spaces.
fn parse_row(line: &str, size: usize, row: usize) -> Result<Vec<u8>, ReadError> {
    let chars: Vec<char> = line.chars().collect();
    if chars.len() != 3 * size - 1 {
        return Err(ReadError::BadSeparator(row));
    }

    let mut cells = Vec::with_capacity(size);
    for col in 0..size {
        let start = 3 * col;
        if col + 1 < size && chars[start + 2] != ' ' {
            return Err(ReadError::BadSeparator(row));
        }
        let value = parse_field(chars[start], chars[start + 1]).ok_or_else(|| {
            ReadError::BadField {
                line: row,
                field: chars[start..start + 2].iter().collect(),
            }
        })?;
        cells.push(value);
    }
    Ok(cells)
}

fn parse_field(c1: char, c2: char) -> Option<u8> {
    // A space stands in for a leading (or trailing) zero.
    let digit = |c: char| match c {
        ' ' => Some(0),
        _ => c.to_digit(10).map(|d| d as u8),
    };
    Some(10 * digit(c1)? + digit(c2)?)
}

/// Writes one `"<tile> <direction>"` line per move, root-to-goal order.
pub fn write_moves<W: Write>(mut writer: W, moves: &[SolutionMove]) -> io::Result<()> {
    for mv in moves {
        writeln!(writer, "{mv}")?;
    }
    Ok(())
}

/// Writes the move list to a file, creating or truncating it.
pub fn write_moves_file<P: AsRef<Path>>(path: P, moves: &[SolutionMove]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_moves(&mut writer, moves)?;
    writer.flush()
}
