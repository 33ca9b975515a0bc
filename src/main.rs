//! The command line frontend: reads a puzzle from a file or standard input,
//! runs the solver and prints the resulting grid.

use clap::{Parser, ValueEnum};

use log::{warn, LevelFilter};

use sudoku_deduce::Grid;
use sudoku_deduce::solver::Solver;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

const INPUT_HELP: &str = "\
The puzzle format is line oriented. Everything after a '#' is a comment and \
blank lines are skipped. The first line holds the number of quadrants per \
grid side (2 for a 4x4 puzzle, 3 for a classic 9x9, 4 for 16x16 and so on); \
each following line holds one grid row, with '.' for a blank cell. Up to \
9x9, values are single digits and whitespace between them is optional.

Example:

3
..9 .8. ..6
... 97. 8..
78. ... 4.1
.3. ..7 .19
.97 .3. 2..
6.. 5.1 7..
..2 ... .47
... 762 .3.
3.5 ..8 ...";

#[derive(Parser)]
#[command(version, about = "Solves Sudoku puzzles of any size by pure \
    deduction, without guessing.", after_long_help = INPUT_HELP)]
struct Args {

    /// The file holding the puzzle. Standard input is read when omitted.
    input: Option<PathBuf>,

    /// How much of the solving process to log to standard error.
    #[arg(short, long, value_enum, default_value_t = Verbosity::Info)]
    verbosity: Verbosity
}

#[derive(Clone, Copy, ValueEnum)]
enum Verbosity {
    Error,
    Warn,
    Info,
    Debug
}

impl From<Verbosity> for LevelFilter {
    fn from(verbosity: Verbosity) -> LevelFilter {
        match verbosity {
            Verbosity::Error => LevelFilter::Error,
            Verbosity::Warn => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug
        }
    }
}

fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            warn!("no input file given, reading the puzzle from standard \
                input");

            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbosity.into())
        .format_timestamp(None)
        .init();

    let input = match read_input(args.input.as_deref()) {
        Ok(input) => input,
        Err(error) => {
            eprintln!("cannot read puzzle: {}", error);
            process::exit(1);
        }
    };

    let mut grid = match Grid::parse(&input) {
        Ok(grid) => grid,
        Err(error) => {
            eprintln!("{}", error);
            process::exit(1);
        }
    };

    let passes = Solver::new().solve(&mut grid);

    print!("{}", grid);

    if grid.is_fully_known() {
        println!("\nsolved in {} passes", passes);
    }
    else {
        println!("\nno further deductions possible after {} passes", passes);
        process::exit(2);
    }
}
