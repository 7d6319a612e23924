use tui_2048::core::{Board, GameSnapshot, GameState};
use tui_2048::term::{tile_color, FrameBuffer, GameView, Viewport};
use tui_2048::types::{Direction, GamePhase, TICK_MS};

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            all.push(fb.get(x, y).unwrap().ch);
        }
        all.push('\n');
    }
    all
}

#[test]
fn term_view_title_then_board() {
    let mut gs = GameState::new(1);
    let view = GameView::default();
    let vp = Viewport::new(50, 24);

    let title = screen_text(&view.render(&gs.snapshot(), vp));
    assert!(title.contains("2048"));
    assert!(title.contains("press ENTER to start"));
    assert!(!title.contains("SCORE"));

    gs.start();
    let board = screen_text(&view.render(&gs.snapshot(), vp));
    assert!(board.contains("SCORE 0"));
    assert!(board.contains("MOVES 0"));
    assert!(!board.contains("press ENTER"));
}

#[test]
fn term_view_tiles_land_in_their_slots() {
    let gs = GameState::from_board(
        1,
        Board::from_rows([[2, 0, 0, 0], [0, 0, 0, 0], [0, 0, 64, 0], [0, 0, 0, 0]]),
    );
    let view = GameView::default();
    let vp = Viewport::new(50, 24);
    let layout = view.board_layout(vp);
    let fb = view.render(&gs.snapshot(), vp);

    let (x, y) = view.slot_origin(layout, 2, 2);
    assert_eq!(fb.get(x, y).unwrap().style.bg, tile_color(64));
    let number: String = (0..8).map(|dx| fb.get(x + dx, y + 1).unwrap().ch).collect();
    assert_eq!(number.trim(), "64");

    let (x, y) = view.slot_origin(layout, 0, 0);
    assert_eq!(fb.get(x, y).unwrap().style.bg, tile_color(2));
    assert_ne!(tile_color(2), tile_color(64));
}

#[test]
fn term_view_merge_target_stays_visible_during_slide() {
    let mut gs = GameState::from_board(
        1,
        Board::from_rows([[4, 0, 0, 4], [0; 4], [0; 4], [0; 4]]),
    );
    assert!(gs.apply_move(Direction::Left).accepted);
    gs.tick(TICK_MS);

    let view = GameView::default();
    let vp = Viewport::new(50, 24);
    let layout = view.board_layout(vp);
    let fb = view.render(&gs.snapshot(), vp);

    // The resting 4 at (0,0) is still drawn while the other 4 slides toward it.
    let (x, y) = view.slot_origin(layout, 0, 0);
    assert_eq!(fb.get(x, y).unwrap().style.bg, tile_color(4));
}

#[test]
fn term_view_game_over_overlay() {
    let mut snap = GameSnapshot::default();
    snap.phase = GamePhase::GameOver;
    snap.score = 31337;
    let fb = GameView::default().render(&snap, Viewport::new(50, 24));
    let text = screen_text(&fb);
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("Your score was: 31337"));
    assert!(text.contains("press R to restart"));
}

#[test]
fn term_view_render_into_reuses_framebuffer() {
    let gs = GameState::from_board(1, Board::from_rows([[2, 4, 8, 16]; 4]));
    let view = GameView::default();
    let snap = gs.snapshot();

    let mut fb = FrameBuffer::new(1, 1);
    view.render_into(&snap, Viewport::new(50, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (50, 24));
    assert_eq!(fb, view.render(&snap, Viewport::new(50, 24)));
}
