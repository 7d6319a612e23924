//! Headless autoplay runner.
//!
//! Usage: `autoplay [--seed N] [--games N] [--max-moves N]`
//!
//! Prints one JSON object per finished game to stdout; logs go to stderr.

use anyhow::Result;

use tui_2048::autoplay::{parse_autoplay_args, run};
use tui_2048::logging;

fn main() -> Result<()> {
    logging::init_stderr()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_autoplay_args(&args)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&config, &mut out)
}
