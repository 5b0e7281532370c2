use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{Board, GameState};
use blockfall::types::{Color, Direction};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            if state.game_over() {
                state.reset();
            }
            state.tick(black_box(Duration::from_millis(16)));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::default();
            // Fill bottom 4 rows
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(Color::Cyan));
                }
            }
            board.clear_completed_rows();
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if state.game_over() {
                state.reset();
            }
            state.hard_drop();
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("move_piece", |b| {
        b.iter(|| {
            state.move_piece(black_box(Direction::Right));
            state.move_piece(black_box(Direction::Left));
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("rotate_piece", |b| {
        b.iter(|| {
            state.rotate_piece();
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_hard_drop,
    bench_move,
    bench_rotate
);
criterion_main!(benches);
