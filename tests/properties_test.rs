//! Property tests over arbitrary selection/tick sequences.

use proptest::prelude::*;

use tui_memory::core::{RoundController, Selection};
use tui_memory::types::{RoundPhase, StarRating, TileState, TILE_COUNT};

#[derive(Debug, Clone)]
enum Step {
    Select(usize),
    Tick(u32),
    Restart,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        8 => (0..TILE_COUNT).prop_map(Step::Select),
        3 => (0u32..1_500).prop_map(Step::Tick),
        1 => Just(Step::Restart),
    ]
}

proptest! {
    #[test]
    fn controller_invariants_hold(seed in any::<u64>(), steps in prop::collection::vec(step(), 0..200)) {
        let mut game = RoundController::with_seed(seed);
        game.start_new_round();
        let mut wins = 0;

        for step in steps {
            let before = game.move_count();
            match step {
                Step::Select(i) => {
                    let outcome = game.select_tile(i).unwrap();
                    let expected = if outcome.is_accepted() { before + 1 } else { before };
                    prop_assert_eq!(game.move_count(), expected);
                    if let Selection::Matched { won: true, .. } = outcome {
                        wins += 1;
                    }
                }
                Step::Tick(ms) => {
                    game.tick(ms);
                    prop_assert_eq!(game.move_count(), before);
                }
                Step::Restart => {
                    game.start_new_round();
                    prop_assert_eq!(game.move_count(), 0);
                    prop_assert_eq!(game.elapsed_seconds(), 0);
                    wins = 0;
                }
            }

            let pending = game.pending();
            prop_assert!(pending.len() <= 2);
            prop_assert_eq!(game.phase() == RoundPhase::Resolving, pending.len() == 2);
            for &i in pending {
                prop_assert_eq!(game.tile_state(i), Some(TileState::Revealed));
            }
            let revealed = (0..TILE_COUNT)
                .filter(|&i| game.tile_state(i) == Some(TileState::Revealed))
                .count();
            prop_assert_eq!(revealed, pending.len());
            prop_assert_eq!(game.star_rating(), StarRating::for_moves(game.move_count()));
            prop_assert!(wins <= 1);
        }
    }

    #[test]
    fn star_rating_is_non_increasing(a in 0u32..2_000, b in 0u32..2_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(StarRating::for_moves(lo) >= StarRating::for_moves(hi));
    }

    #[test]
    fn out_of_range_select_fails_without_side_effects(seed in any::<u64>(), index in TILE_COUNT..1_000usize) {
        let mut game = RoundController::with_seed(seed);
        game.start_new_round();
        let before = game.snapshot();
        prop_assert!(game.select_tile(index).is_err());
        prop_assert_eq!(game.snapshot(), before);
    }
}

#[test]
fn star_rating_thresholds() {
    for (moves, stars) in [(0, 3), (49, 3), (50, 2), (99, 2), (100, 1), (1000, 1)] {
        assert_eq!(StarRating::for_moves(moves).stars(), stars, "moves={moves}");
    }
}
