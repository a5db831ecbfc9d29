//! Headless runner: plays one round with a perfect-memory player and prints the result.
//!
//! Uses the same environment configuration as the terminal game; logs go to stderr.

use anyhow::Result;
use log::info;

use tui_memory::autoplay::play_round;
use tui_memory::config::GameConfig;
use tui_memory::logging::init_stderr_logging;
use tui_memory::session::{SessionConfig, SessionHandle};

#[tokio::main]
async fn main() -> Result<()> {
    let config = GameConfig::from_env();
    let _logger = init_stderr_logging(&config)?;

    let seed = config.seed_or_random();
    let session = SessionHandle::spawn(SessionConfig::with_seed(seed));

    let result = play_round(&session).await?;
    session.shutdown().await?;

    info!("autoplay finished (seed {seed})");
    println!(
        "seed {seed}: {} moves, {}s, {} star(s)",
        result.move_count,
        result.elapsed_seconds,
        result.star_rating.stars()
    );
    Ok(())
}
