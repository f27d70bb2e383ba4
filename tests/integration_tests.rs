//! End-to-end simulation tests through the facade crate.

use proptest::prelude::*;

use floatybox::core::{Collision, GameState};
use floatybox::types::{GoalState, Settings, Size};

const DT: f64 = 0.016;

fn states(game: &GameState) -> Vec<GoalState> {
    game.goals().iter().map(|g| g.state).collect()
}

#[test]
fn same_seed_and_inputs_replay_identically() {
    let run = || {
        let mut game = GameState::new(Settings::with_seed(1234), 100, 30);
        let mut log = Vec::new();
        for step in 0..4000u32 {
            if step % 23 == 0 || step % 31 == 0 {
                game.float();
            }
            log.push((
                game.update(DT),
                game.player().object.position.y.to_bits(),
                game.player().velocity.to_bits(),
            ));
        }
        (log, game.score(), game.high_score(), states(&game))
    };
    assert_eq!(run(), run());
}

#[test]
fn different_seeds_lay_out_different_gaps() {
    let gaps = |seed| {
        let mut game = GameState::new(Settings::with_seed(seed), 120, 40);
        let mut ys = Vec::new();
        for _ in 0..3000 {
            game.update(DT);
            if let Some(g) = game.goals().iter().last() {
                ys.push(g.pass.position.y.to_bits());
            }
        }
        ys.dedup();
        ys
    };
    assert_ne!(gaps(1), gaps(2));
}

#[test]
fn box_never_leaves_the_playfield() {
    let mut game = GameState::new(Settings::with_seed(5), 80, 24);
    for step in 0..3000 {
        if step % 3 == 0 {
            game.float();
        }
        game.update(DT);
        let y = game.player().object.position.y;
        assert!((1.0..=22.0).contains(&y), "y = {y}");
    }
}

#[test]
fn attract_mode_keeps_the_box_airborne() {
    let mut game = GameState::new(Settings::with_seed(8), 80, 24);
    let mut floor_steps = 0;
    for _ in 0..3000 {
        game.update(DT);
        if game.player().object.position.y <= 1.0 {
            floor_steps += 1;
        }
    }
    assert!(!game.playing());
    assert!(floor_steps < 3000);
}

#[test]
fn miss_ends_play_and_banks_the_score() {
    let mut game = GameState::new(Settings::with_seed(21), 80, 24);
    game.float();
    // Never float again: the box falls to the floor and hits a goal.
    let mut missed = false;
    for _ in 0..5000 {
        if game.update(DT) == Some(Collision::Missed) {
            missed = true;
            break;
        }
    }
    assert!(missed);
    assert!(!game.playing());
    assert_eq!(game.score(), 0);
}

#[test]
fn custom_box_size_shapes_the_round() {
    let settings = Settings {
        box_size: Size::new(3, 2),
        ..Settings::with_seed(4)
    };
    let game = GameState::new(settings, 90, 40);
    assert_eq!(game.player().object.size, Size::new(3, 2));
    assert_eq!(game.geometry().window_height, 7);
    assert_eq!(game.geometry().goal_width, 5);
    assert!(game.trail().iter().all(|t| t.size == Size::new(1, 2)));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn resolved_goals_form_a_prefix(
        seed in any::<u32>(),
        floats in prop::collection::vec(any::<bool>(), 400..1200),
    ) {
        let mut game = GameState::new(Settings::with_seed(seed), 80, 24);
        for f in floats {
            if f {
                game.float();
            }
            game.update(DT);
            let s = states(&game);
            let first_open = s
                .iter()
                .position(|st| *st == GoalState::Unresolved)
                .unwrap_or(s.len());
            prop_assert!(s[first_open..].iter().all(|st| *st == GoalState::Unresolved));
        }
    }

    #[test]
    fn high_score_never_decreases(
        seed in any::<u32>(),
        floats in prop::collection::vec(prop::bool::weighted(0.08), 500..2000),
    ) {
        let mut game = GameState::new(Settings::with_seed(seed), 80, 24);
        let mut high = 0;
        for f in floats {
            if f {
                game.float();
            }
            let before = game.score();
            let was_playing = game.playing();
            match game.update(DT) {
                Some(Collision::Missed) => {
                    prop_assert_eq!(game.score(), 0);
                    prop_assert!(game.high_score() >= before);
                }
                Some(Collision::Passed) if was_playing => {
                    prop_assert_eq!(game.score(), before + 1);
                }
                _ => prop_assert_eq!(game.score(), before),
            }
            prop_assert!(game.high_score() >= high);
            high = game.high_score();
        }
    }

    #[test]
    fn trail_length_survives_any_input(
        seed in any::<u32>(),
        width in 10u32..200,
        height in 8u32..80,
        floats in prop::collection::vec(any::<bool>(), 0..300),
    ) {
        let mut game = GameState::new(Settings::with_seed(seed), width, height);
        let len = game.trail().len();
        for f in floats {
            if f {
                game.float();
            }
            game.update(DT);
            prop_assert_eq!(game.trail().len(), len);
        }
    }
}
