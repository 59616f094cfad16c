//! CLI entry point for the fifteen-puzzle solver.
//!
//! Usage:
//!   fifteen-solver solve <board-file> <moves-file> [options]
//!
//! Options:
//!   --summary    Print a JSON summary of the run to stdout
//!
//! Exit codes: 0 solvable, 1 unsolvable, 2 bad input or internal error.

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::{Parser, Subcommand};
use serde::Serialize;

use fifteen_solver::{read_board, write_moves_file, SolutionMove, Solver};

#[derive(Parser)]
#[command(name = "fifteen-solver")]
#[command(about = "Twin-search solver for the sliding 15-puzzle")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a board file and write the move list
    Solve {
        /// Path to the board file
        input: PathBuf,

        /// Path the move list is written to
        output: PathBuf,

        /// Print a JSON summary to stdout
        #[arg(long)]
        summary: bool,
    },
}

/// Output format for the run summary
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveSummary {
    solvable: bool,
    moves: i32,
    time_elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    solution: Option<Vec<SolutionMove>>,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            input,
            output,
            summary,
        } => {
            let board = match read_board(&input) {
                Ok(board) => board,
                Err(e) => {
                    eprintln!("Error reading board {:?}: {}", input, e);
                    process::exit(2);
                }
            };

            let start = Instant::now();
            let solver = match Solver::solve(board) {
                Ok(solver) => solver,
                Err(e) => {
                    eprintln!("Solver error: {}", e);
                    process::exit(2);
                }
            };
            let elapsed_ms = start.elapsed().as_millis() as u64;

            let moves = solver.solution_moves();
            match &moves {
                Some(moves) => {
                    if let Err(e) = write_moves_file(&output, moves) {
                        eprintln!("Error writing moves {:?}: {}", output, e);
                        process::exit(2);
                    }
                }
                None => eprintln!("No solution possible"),
            }

            if summary {
                let out = SolveSummary {
                    solvable: solver.is_solvable(),
                    moves: solver.move_count(),
                    time_elapsed_ms: elapsed_ms,
                    solution: moves,
                };
                match serde_json::to_string_pretty(&out) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("Error encoding summary: {e}");
                        process::exit(2);
                    }
                }
            }

            if solver.is_solvable() {
                process::exit(0);
            } else {
                process::exit(1);
            }
        }
    }
}
