//! Solver for the sliding 15-puzzle and its N×N relatives.
//!
//! The search runs two priority-first frontiers in lockstep: one from the
//! given board and one from its parity-flipped twin. Exactly one of the two
//! can reach the goal, so whichever frontier gets there first settles
//! solvability without a dedicated parity formula. Solvable boards yield a
//! root-to-goal list of (tile, direction) moves.

pub mod board;
pub mod heap;
pub mod io;
pub mod solver;

// Re-export main types
pub use board::{Board, BoardError, Direction, MoveError};
pub use heap::{MinHeap, Underflow};
pub use io::{parse_board, read_board, write_moves, write_moves_file, ReadError};
pub use solver::{SolutionMove, Solver, SolverError};
