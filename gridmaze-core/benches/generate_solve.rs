use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gridmaze_core::{dims::Dims, solve, MazeGenerator};

const SIZE: Dims = Dims(101, 101);

pub fn generate(c: &mut Criterion) {
    c.bench_function("generate_101", |b| {
        let mut generator = MazeGenerator::from_seed(0);
        b.iter(|| generator.generate(black_box(SIZE)).unwrap())
    });
}

pub fn solve_generated(c: &mut Criterion) {
    let grid = MazeGenerator::from_seed(0).generate(SIZE).unwrap();
    let end = SIZE - Dims::ONE;

    c.bench_function("solve_101", |b| {
        b.iter(|| solve(black_box(&grid), Dims::ZERO, black_box(end)))
    });
}

criterion_group! {name = benches; config = Criterion::default().sample_size(20); targets = generate, solve_generated}
criterion_main!(benches);
