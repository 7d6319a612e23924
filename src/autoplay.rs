//! Headless autoplay: random-direction games for smoke testing the engine.
//!
//! Each finished game becomes one JSON line on the output writer.

use std::io::Write;

use anyhow::{anyhow, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::core::{GameState, SimpleRng};
use crate::types::{Cell, Direction, BOARD_SIZE, TICK_MS};

const N: usize = BOARD_SIZE as usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoplayConfig {
    pub seed: u32,
    pub games: u32,
    /// Accepted-move cap per game.
    pub max_moves: u32,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            games: 1,
            max_moves: 100_000,
        }
    }
}

/// One line of autoplay output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub seed: u32,
    pub score: u32,
    pub moves: u32,
    pub max_tile: Cell,
    pub game_over: bool,
    pub board: [[Cell; N]; N],
}

/// Parse `--seed N --games N --max-moves N` (program name excluded).
pub fn parse_autoplay_args(args: &[String]) -> Result<AutoplayConfig> {
    let mut config = AutoplayConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        let slot = match flag {
            "--seed" => &mut config.seed,
            "--games" => &mut config.games,
            "--max-moves" => &mut config.max_moves,
            other => return Err(anyhow!("autoplay: unknown argument: {}", other)),
        };
        i += 1;
        let v = args
            .get(i)
            .ok_or_else(|| anyhow!("autoplay: missing value for {}", flag))?;
        *slot = v
            .parse::<u32>()
            .map_err(|_| anyhow!("autoplay: invalid {} value: {}", flag, v))?;
        i += 1;
    }
    Ok(config)
}

/// Tick until every motion (including the spawn pop) has settled.
pub fn settle(game: &mut GameState) {
    while game.is_animating() {
        game.tick(TICK_MS);
    }
}

/// Play one game with uniformly random swipes.
pub fn play_game(seed: u32, max_moves: u32) -> GameRecord {
    let mut game = GameState::new(seed);
    game.start();
    settle(&mut game);

    // Separate stream so direction choice does not shift spawn placement.
    let mut picker = SimpleRng::new(seed.rotate_left(13) ^ 0x9E37_79B9);
    while !game.is_game_over() && game.move_count() < max_moves {
        let direction = picker.pick(&Direction::ALL);
        if game.apply_move(direction).accepted {
            settle(&mut game);
        }
    }

    let board = game.board();
    debug!(seed, score = game.score(), "autoplay game finished");
    GameRecord {
        seed,
        score: game.score(),
        moves: game.move_count(),
        max_tile: board.max_tile(),
        game_over: game.is_game_over(),
        board: board.to_rows(),
    }
}

/// Play `config.games` games with consecutive seeds, writing one JSON line each.
pub fn run(config: &AutoplayConfig, out: &mut impl Write) -> Result<()> {
    info!(
        seed = config.seed,
        games = config.games,
        max_moves = config.max_moves,
        "autoplay starting"
    );
    for i in 0..config.games {
        let record = play_game(config.seed.wrapping_add(i), config.max_moves);
        serde_json::to_writer(&mut *out, &record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
