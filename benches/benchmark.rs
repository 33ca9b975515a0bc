use criterion::{criterion_group, criterion_main, Criterion};

use sudoku_deduce::Grid;
use sudoku_deduce::solver::Solver;

const PUZZLE_9X9: &str = "3
    ..9 .8. ..6
    ... 97. 8..
    78. ... 4.1
    .3. ..7 .19
    .97 .3. 2..
    6.. 5.1 7..
    ..2 ... .47
    ... 762 .3.
    3.5 ..8 ...";

/// A 9x9 puzzle with exactly one blank per row, column and quadrant, solved
/// by the cheap sum rule alone.
fn diagonal_9x9() -> String {
    let mut input = String::from("3\n");

    for row in 0..9 {
        for col in 0..9 {
            if row == col {
                input.push('.');
            }
            else {
                let value = (row * 3 + row / 3 + col) % 9 + 1;
                input.push_str(&value.to_string());
            }
        }

        input.push('\n');
    }

    input
}

fn benchmark_solve(c: &mut Criterion) {
    let solver = Solver::new();
    let easy = Grid::parse(&diagonal_9x9()).unwrap();
    let hard = Grid::parse(PUZZLE_9X9).unwrap();

    c.bench_function("solve 9x9 diagonal", |b| b.iter(|| {
        let mut grid = easy.clone();
        solver.solve(&mut grid)
    }));

    c.bench_function("solve 9x9 puzzle", |b| b.iter(|| {
        let mut grid = hard.clone();
        solver.solve(&mut grid)
    }));
}

criterion_group!(benches, benchmark_solve);
criterion_main!(benches);
