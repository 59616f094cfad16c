//! Dual-frontier search that decides solvability through the twin board.
//!
//! Two priority-first searches run in lockstep: one seeded with the initial
//! board, one with its parity-flipped twin. Exactly one of the two can reach
//! the goal, so the first frontier to get there is decisive: the main
//! search winning means the puzzle is solvable, the twin search winning
//! means it is not.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use thiserror::Error;

use crate::board::{Board, Direction};
use crate::heap::{MinHeap, Underflow};

/// Internal invariant failures surfaced by the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SolverError {
    /// A frontier ran dry. Every expansion of a non-goal node enqueues at
    /// least one successor, so this cannot occur on a valid board.
    #[error("search frontier underflow: {0}")]
    FrontierUnderflow(#[from] Underflow),
}

/// One step of a candidate solution path.
///
/// Nodes form a tree rooted at the initial state; the `parent` chain of the
/// accepted goal node is the solution path. Parents are reference-counted
/// because sibling frontier nodes share their ancestor chains.
#[derive(Debug)]
struct SearchNode {
    board: Board,
    parent: Option<Rc<SearchNode>>,
    moves: u32,
    /// Heuristic estimate plus moves so far.
    priority: u32,
    /// How the displaced tile travelled to produce this node; `None` for
    /// the two roots.
    direction: Option<Direction>,
}

impl SearchNode {
    fn root(board: Board) -> Self {
        let priority = board.sum_distance();
        Self {
            board,
            parent: None,
            moves: 0,
            priority,
            direction: None,
        }
    }

    fn child(board: Board, parent: &Rc<SearchNode>, direction: Direction) -> Self {
        let moves = parent.moves + 1;
        let priority = board.sum_distance() + moves;
        Self {
            board,
            parent: Some(Rc::clone(parent)),
            moves,
            priority,
            direction: Some(direction),
        }
    }
}

// Ordering considers only the priority key. Nodes of equal priority compare
// equal and extract from the frontier in unspecified order.
impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
    }
}

impl Eq for SearchNode {}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority.cmp(&other.priority)
    }
}

/// A solved-path move: the tile that slid and the direction it travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SolutionMove {
    pub tile: u8,
    pub direction: Direction,
}

impl fmt::Display for SolutionMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tile, self.direction)
    }
}

/// Result of a completed twin search over one board.
///
/// Only one-step cycles (stepping straight back to the parent board) are
/// suppressed during expansion; there is no global visited set, so states
/// can re-enter the frontier along different paths. That keeps the search
/// faithful to its move-count behavior at the cost of memory on hard
/// instances.
#[derive(Debug)]
pub struct Solver {
    solution: Option<Rc<SearchNode>>,
}

impl Solver {
    /// Runs both searches to completion and freezes the outcome.
    pub fn solve(initial: Board) -> Result<Self, SolverError> {
        let twin = initial.twin();
        let mut main_frontier = MinHeap::new();
        let mut twin_frontier = MinHeap::new();
        main_frontier.insert(Rc::new(SearchNode::root(initial)));
        twin_frontier.insert(Rc::new(SearchNode::root(twin)));

        loop {
            if let Some(goal) = Self::step(&mut main_frontier)? {
                return Ok(Self {
                    solution: Some(goal),
                });
            }
            if Self::step(&mut twin_frontier)?.is_some() {
                return Ok(Self { solution: None });
            }
        }
    }

    /// One expansion: extract the minimum node, stop on goal, otherwise
    /// enqueue every neighbor except the extracted node's parent board.
    fn step(
        frontier: &mut MinHeap<Rc<SearchNode>>,
    ) -> Result<Option<Rc<SearchNode>>, SolverError> {
        let node = frontier.extract_min()?;
        if node.board.is_goal() {
            return Ok(Some(node));
        }
        for (neighbor, direction) in node.board.neighbors() {
            if let Some(parent) = &node.parent {
                if parent.board == neighbor {
                    continue;
                }
            }
            frontier.insert(Rc::new(SearchNode::child(neighbor, &node, direction)));
        }
        Ok(None)
    }

    /// True iff the main search reached the goal before the twin search.
    pub fn is_solvable(&self) -> bool {
        self.solution.is_some()
    }

    /// Length of the accepted path, or -1 when unsolvable.
    pub fn move_count(&self) -> i32 {
        self.solution.as_ref().map_or(-1, |node| node.moves as i32)
    }

    /// Board states from the initial board to the goal, or `None` when
    /// unsolvable.
    pub fn solution_states(&self) -> Option<Vec<Board>> {
        let mut node = self.solution.as_ref()?;
        let mut states = Vec::with_capacity(node.moves as usize + 1);
        loop {
            states.push(node.board.clone());
            match &node.parent {
                Some(parent) => node = parent,
                None => break,
            }
        }
        states.reverse();
        Some(states)
    }

    /// Moves from the initial board to the goal, or `None` when unsolvable.
    ///
    /// Each entry pairs the stored direction with the tile that slid, the
    /// one now occupying the cell that was the blank in the parent state.
    pub fn solution_moves(&self) -> Option<Vec<SolutionMove>> {
        let mut node = self.solution.as_ref()?;
        let mut moves = Vec::with_capacity(node.moves as usize);
        while let (Some(parent), Some(direction)) = (&node.parent, node.direction) {
            let (row, col) = parent.board.blank_position();
            let tile = node.board.get(row, col)?;
            moves.push(SolutionMove { tile, direction });
            node = parent;
        }
        moves.reverse();
        Some(moves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn board(rows: &[&[u8]]) -> Board {
        let rows: Vec<Vec<u8>> = rows.iter().map(|r| r.to_vec()).collect();
        Board::from_rows(&rows).expect("valid board")
    }

    /// A board produced by a seeded random walk from the goal, so it is
    /// always solvable and never further than `steps` moves out.
    fn scramble(size: usize, steps: usize, seed: u64) -> Board {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut current = Board::goal(size).unwrap();
        for _ in 0..steps {
            let neighbors = current.neighbors();
            let pick = rng.gen_range(0..neighbors.len());
            current = neighbors.into_iter().nth(pick).unwrap().0;
        }
        current
    }

    #[test]
    fn test_goal_board_solves_in_zero_moves() {
        let solver = Solver::solve(Board::goal(4).unwrap()).unwrap();
        assert!(solver.is_solvable());
        assert_eq!(solver.move_count(), 0);
        assert_eq!(solver.solution_moves(), Some(vec![]));

        let states = solver.solution_states().unwrap();
        assert_eq!(states.len(), 1);
        assert!(states[0].is_goal());
    }

    #[test]
    fn test_single_move_scenario() {
        // Goal with 15 and the blank swapped: the blank moves right, so
        // tile 15 moves left.
        let initial = board(&[
            &[1, 2, 3, 4],
            &[5, 6, 7, 8],
            &[9, 10, 11, 12],
            &[13, 14, 0, 15],
        ]);
        let solver = Solver::solve(initial).unwrap();
        assert!(solver.is_solvable());
        assert_eq!(solver.move_count(), 1);
        assert_eq!(
            solver.solution_moves(),
            Some(vec![SolutionMove {
                tile: 15,
                direction: Direction::Left
            }])
        );
    }

    #[test]
    fn test_odd_parity_board_is_unsolvable() {
        // Goal with 7 and 8 swapped: a classic odd-parity scramble.
        let initial = board(&[&[1, 2, 3], &[4, 5, 6], &[8, 7, 0]]);
        let solver = Solver::solve(initial).unwrap();
        assert!(!solver.is_solvable());
        assert_eq!(solver.move_count(), -1);
        assert_eq!(solver.solution_moves(), None);
        assert_eq!(solver.solution_states(), None);
    }

    #[test]
    fn test_solution_moves_replay_to_goal() {
        let initial = scramble(4, 14, 42);
        let solver = Solver::solve(initial.clone()).unwrap();
        assert!(solver.is_solvable());

        let mut current = initial;
        for mv in solver.solution_moves().unwrap() {
            current = current.apply_move(mv.tile, mv.direction).unwrap();
        }
        assert!(current.is_goal());
    }

    #[test]
    fn test_solution_states_walk_root_to_goal() {
        let initial = scramble(3, 10, 7);
        let solver = Solver::solve(initial.clone()).unwrap();

        let states = solver.solution_states().unwrap();
        assert_eq!(states.len(), solver.move_count() as usize + 1);
        assert_eq!(states[0], initial);
        assert!(states.last().unwrap().is_goal());

        // Consecutive states differ by one blank swap.
        for pair in states.windows(2) {
            assert!(pair[0].neighbors().iter().any(|(n, _)| *n == pair[1]));
        }
    }

    #[test]
    fn test_accessors_are_idempotent() {
        let solver = Solver::solve(scramble(3, 12, 3)).unwrap();
        assert_eq!(solver.solution_moves(), solver.solution_moves());
        assert_eq!(solver.solution_states(), solver.solution_states());
        assert_eq!(solver.move_count(), solver.move_count());
    }

    #[test]
    fn test_exactly_one_of_board_and_twin_is_solvable() {
        for seed in 0..36u64 {
            let size = if seed % 2 == 0 { 3 } else { 4 };
            let steps = 6 + (seed as usize % 5);
            let scrambled = scramble(size, steps, seed);

            let original = Solver::solve(scrambled.clone()).unwrap();
            let twin = Solver::solve(scrambled.twin()).unwrap();
            assert_ne!(
                original.is_solvable(),
                twin.is_solvable(),
                "seed {seed}: board and twin must disagree on solvability"
            );
        }
    }

    #[test]
    fn test_direction_labels_follow_blank_motion() {
        // Blank at (2,1); sliding tile 8 left means the blank moved right.
        let initial = board(&[&[1, 2, 3], &[4, 5, 6], &[7, 0, 8]]);
        let solver = Solver::solve(initial).unwrap();
        assert_eq!(
            solver.solution_moves(),
            Some(vec![SolutionMove {
                tile: 8,
                direction: Direction::Left
            }])
        );
    }

    #[test]
    fn test_move_display() {
        let mv = SolutionMove {
            tile: 15,
            direction: Direction::Up,
        };
        assert_eq!(mv.to_string(), "15 U");
    }
}
