use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_2048::core::{resolve_move, Board, GameSnapshot, GameState};
use tui_2048::term::{FrameBuffer, GameView, Viewport};
use tui_2048::types::{Direction, TICK_MS};

fn busy_board() -> Board {
    Board::from_rows([
        [2, 2, 4, 4],
        [8, 0, 8, 16],
        [0, 32, 32, 0],
        [64, 64, 64, 64],
    ])
}

fn bench_resolve_move(c: &mut Criterion) {
    let board = busy_board();
    c.bench_function("resolve_move_left", |b| {
        b.iter(|| resolve_move(black_box(&board), black_box(Direction::Left)))
    });
}

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            state.tick(black_box(TICK_MS));
        })
    });
}

fn bench_move_and_settle(c: &mut Criterion) {
    c.bench_function("move_and_settle", |b| {
        b.iter(|| {
            let mut state = GameState::from_board(7, busy_board());
            state.apply_move(black_box(Direction::Left));
            while state.is_animating() {
                state.tick(TICK_MS);
            }
            state.score()
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut state = GameState::from_board(7, busy_board());
    state.apply_move(Direction::Right);
    state.tick(TICK_MS);

    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(vp.width, vp.height);

    c.bench_function("snapshot_and_render", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            view.render_into(black_box(&snap), vp, &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_resolve_move,
    bench_tick,
    bench_move_and_settle,
    bench_render
);
criterion_main!(benches);
