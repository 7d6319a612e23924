//! Terminal 2048 runner (default binary).
//!
//! Uses crossterm for input and the framebuffer-based renderer from
//! `tui_2048::term`. Configuration comes from `TUI_2048_*` environment
//! variables (see [`tui_2048::config::AppConfig`]).

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};

use tui_2048::config::AppConfig;
use tui_2048::core::{GameSnapshot, GameState};
use tui_2048::input::{handle_key_event, should_quit};
use tui_2048::logging;
use tui_2048::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_2048::types::GameAction;

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    if let Some(path) = config.log_path.as_deref() {
        logging::init_file(path)?;
    }
    info!(
        seed = config.seed,
        tick_ms = config.tick_ms,
        anim_step = config.anim_step,
        "starting"
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let mut game_state = GameState::with_config(config.seed, config.engine_config());

    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(config.tick_ms as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game_state.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // At most one swipe per frame; extra presses before the tick are dropped.
        let mut moved_this_frame = false;
        loop {
            let timeout = tick_duration
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!(score = game_state.score(), "quit");
                        return Ok(());
                    }
                    let Some(action) = handle_key_event(key) else {
                        continue;
                    };
                    if let GameAction::Move(_) = action {
                        if moved_this_frame {
                            continue;
                        }
                        moved_this_frame = true;
                    }
                    let accepted = game_state.apply_action(action);
                    debug!(action = action.as_str(), accepted, "input");
                }
                Event::Resize(_, _) => term.invalidate(),
                // Terminal auto-repeat and releases are ignored.
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game_state.tick(config.tick_ms);
        }
    }
}
