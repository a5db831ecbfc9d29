//! Async session driven by the headless player under paused tokio time.

use std::time::Duration;

use tui_memory::autoplay::play_round;
use tui_memory::core::RoundEvent;
use tui_memory::session::{SessionConfig, SessionError, SessionHandle};
use tui_memory::types::{StarRating, TileState};

#[tokio::test(start_paused = true)]
async fn autoplay_wins_a_round() {
    let session = SessionHandle::spawn(SessionConfig::with_seed(2024));
    let result = play_round(&session).await.unwrap();

    // Every tile is turned once to learn it and at most once more to match it.
    assert!(result.move_count >= 16);
    assert!(result.move_count <= 32);
    assert_eq!(result.star_rating, StarRating::Three);

    let snap = session.shutdown().await.unwrap();
    assert!(snap.won);
    assert!(snap.tiles.iter().all(|t| t.state == TileState::Matched));
    assert_eq!(snap.elapsed_seconds, result.elapsed_seconds);
}

#[tokio::test(start_paused = true)]
async fn autoplay_can_play_consecutive_rounds() {
    let session = SessionHandle::spawn(SessionConfig::with_seed(7));
    let first = play_round(&session).await.unwrap();
    let second = play_round(&session).await.unwrap();
    assert!(first.move_count >= 16 && second.move_count >= 16);

    let snap = session.shutdown().await.unwrap();
    assert_eq!(snap.generation, 2);
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_round_start_then_elapsed_ticks() {
    let session = SessionHandle::spawn(SessionConfig::with_seed(1));
    let mut events = session.subscribe();
    session.new_round().await.unwrap();

    assert_eq!(
        events.recv().await.unwrap(),
        RoundEvent::RoundStarted { generation: 1 }
    );
    assert_eq!(events.recv().await.unwrap(), RoundEvent::MoveCountChanged(0));
    assert_eq!(
        events.recv().await.unwrap(),
        RoundEvent::StarRatingChanged(StarRating::Three)
    );
    assert_eq!(events.recv().await.unwrap(), RoundEvent::ElapsedChanged(0));

    tokio::time::sleep(Duration::from_millis(2_100)).await;
    assert_eq!(events.recv().await.unwrap(), RoundEvent::ElapsedChanged(1));
    assert_eq!(events.recv().await.unwrap(), RoundEvent::ElapsedChanged(2));

    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn select_without_round_reports_not_started() {
    let session = SessionHandle::spawn(SessionConfig::default());
    assert!(matches!(
        session.select(0).await,
        Err(SessionError::Round(_))
    ));
    session.shutdown().await.unwrap();
}
