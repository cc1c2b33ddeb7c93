//! 무작위 대국 위에서 상태 불변식을 검사한다

use std::collections::BTreeMap;

use engine::{
    all_actions, playout, Action, ActionOutcome, Color, GameState, PieceKind, RandomPolicy, Square,
};
use proptest::prelude::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 시드로 정해지는 중간 국면
fn midgame(seed: u64, plies: usize) -> GameState {
    playout(
        GameState::with_id("prop"),
        &mut RandomPolicy::new(seed),
        plies,
    )
    .state
}

fn kinds(state: &GameState) -> BTreeMap<String, PieceKind> {
    state.pieces().map(|p| (p.id.clone(), p.kind)).collect()
}

fn colors(state: &GameState) -> BTreeMap<String, Color> {
    state.pieces().map(|p| (p.id.clone(), p.color)).collect()
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 24, .. ProptestConfig::default() })]

    #[test]
    fn prop_board_and_registry_agree(seed in any::<u64>(), plies in 1usize..48) {
        init_logger();
        let state = midgame(seed, plies);
        prop_assert!(
            state.check_consistency().is_ok(),
            "{:?}", state.check_consistency()
        );

        for square in Square::all() {
            if let Some(piece) = state.piece_at(square) {
                prop_assert_eq!(piece.pos, Some(square));
            }
        }
        let on_board = state.pieces().filter(|p| p.pos.is_some()).count();
        let held = state.hand(Color::White).len() + state.hand(Color::Black).len();
        prop_assert_eq!(on_board + held, 32);
    }

    #[test]
    fn prop_kinds_never_change(seed in any::<u64>(), plies in 1usize..48) {
        let start = GameState::with_id("prop");
        let end = midgame(seed, plies);
        prop_assert_eq!(kinds(&start), kinds(&end));
    }

    #[test]
    fn prop_color_changes_only_by_capture(seed in any::<u64>(), plies in 1usize..64) {
        let mut state = GameState::with_id("prop");
        let mut policy = RandomPolicy::new(seed);

        for _ in 0..plies {
            let mover = state.turn();
            if let Some(action) = policy.choose(&state, mover) {
                let before = colors(&state);
                let outcome = state.apply(&action);
                prop_assert!(outcome.is_ok(), "{:?}", outcome);
                let outcome = outcome.unwrap();
                let captured = match &outcome {
                    ActionOutcome::Moved(moved) => moved.captured().cloned(),
                    ActionOutcome::Dropped => None,
                };

                for (id, after) in colors(&state) {
                    if captured.as_ref() == Some(&id) {
                        prop_assert_eq!(before[&id], mover.opponent());
                        prop_assert_eq!(after, mover);
                    } else {
                        prop_assert_eq!(
                            before[&id], after,
                            "{} changed color without capture", id
                        );
                    }
                }
                if outcome.is_win() {
                    break;
                }
            }
            state.end_turn();
        }
    }

    #[test]
    fn prop_rejected_drop_is_pure(
        seed in any::<u64>(),
        plies in 0usize..24,
        pick in 0usize..32,
        x in -1i32..9,
        y in -1i32..9,
    ) {
        let mut state = midgame(seed, plies);
        let color = state.turn();
        let ids: Vec<String> = state.pieces().map(|p| p.id.clone()).collect();
        let before = state.clone();

        match state.drop(color, &ids[pick % ids.len()], Square::new(x, y)) {
            Ok(()) => prop_assert!(state.check_consistency().is_ok()),
            Err(_) => prop_assert_eq!(&state, &before),
        }
    }

    #[test]
    fn prop_rejected_move_is_pure(
        seed in any::<u64>(),
        plies in 0usize..24,
        pick in 0usize..32,
        tx in -1i32..9,
        ty in -1i32..9,
    ) {
        let mut state = midgame(seed, plies);
        let color = state.turn();
        let pieces: Vec<(String, Option<Square>)> =
            state.pieces().map(|p| (p.id.clone(), p.pos)).collect();
        let (id, pos) = &pieces[pick % pieces.len()];
        let from = pos.unwrap_or(Square::new(0, 0));
        let before = state.clone();

        match state.move_piece(color, id, from, Square::new(tx, ty)) {
            Ok(_) => {
                prop_assert!(state.check_consistency().is_ok());
                prop_assert!(state.action_done(color));
            }
            Err(_) => prop_assert_eq!(&state, &before),
        }
    }

    #[test]
    fn prop_safety_gate_is_pure(seed in any::<u64>(), plies in 2usize..32) {
        let state = midgame(seed, plies);
        let color = state.turn();
        let before = state.clone();
        for action in all_actions(&state, color) {
            if let Action::Move { piece, from, to } = action {
                let _ = state.is_safe_after_move(&piece, from, to, color);
            }
        }
        prop_assert_eq!(&state, &before);
    }

    #[test]
    fn prop_enumerated_actions_apply(seed in any::<u64>(), plies in 0usize..32) {
        let state = midgame(seed, plies);
        let color = state.turn();
        for action in all_actions(&state, color) {
            let mut copy = state.clone();
            prop_assert!(copy.apply(&action).is_ok(), "{:?}", action);
        }
    }
}

#[test]
fn king_capture_ends_playout() {
    init_logger();
    for seed in 0..6 {
        let result = playout(
            GameState::with_id("long"),
            &mut RandomPolicy::new(seed),
            400,
        );
        if let Some(winner) = result.winner {
            assert!(!result.state.king_on_board(winner.opponent()));
            let captured_king = result
                .state
                .pieces()
                .find(|p| p.kind == PieceKind::King && p.captured)
                .expect("captured king");
            assert_eq!(captured_king.color, winner);
            assert!(result.state.hand(winner).contains(&captured_king.id));
        }
        result.state.check_consistency().unwrap();
    }
}
