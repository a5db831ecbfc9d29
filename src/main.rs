//! Terminal memory game (default binary).
//!
//! Single-threaded fixed-timestep loop: crossterm input is polled until the
//! next tick, then the controller's timer queue advances by `TICK_MS`. Frames
//! are drawn through the diffing framebuffer renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, info};

use tui_memory::config::GameConfig;
use tui_memory::core::{RoundController, RoundEvent, RoundSnapshot, Selection};
use tui_memory::input::{handle_key_event, should_quit, GridCursor};
use tui_memory::logging::init_file_logging;
use tui_memory::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_memory::types::{GameAction, TICK_MS};

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    let _logger = init_file_logging(&config)?;

    let seed = config.seed_or_random();
    info!("starting tui-memory (seed {seed})");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, seed);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, seed: u64) -> Result<()> {
    let mut game = RoundController::with_seed(seed);
    game.start_new_round();

    let view = GameView::default();
    let mut cursor = GridCursor::new();
    let mut snap = RoundSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        log_events(&mut game);

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Some(cursor.index()), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!("quit requested");
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        apply_action(&mut game, &mut cursor, action)?;
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.tick(TICK_MS);
        }
    }
}

fn apply_action(game: &mut RoundController, cursor: &mut GridCursor, action: GameAction) -> Result<()> {
    match action {
        GameAction::Select => {
            let outcome = game.select_tile(cursor.index())?;
            if let Selection::Rejected(reason) = outcome {
                debug!("selection of {} ignored: {reason:?}", cursor.index());
            }
        }
        GameAction::Restart => {
            game.start_new_round();
            cursor.reset();
        }
        _ => {
            cursor.apply(action);
        }
    }
    Ok(())
}

fn log_events(game: &mut RoundController) {
    for event in game.drain_events() {
        match event {
            RoundEvent::RoundWon(result) => info!(
                "round won: {} moves in {}s ({} stars)",
                result.move_count,
                result.elapsed_seconds,
                result.star_rating.stars()
            ),
            other => debug!("{other:?}"),
        }
    }
}
