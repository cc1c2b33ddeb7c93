//! 무작위 AI: 합법 행동 중 하나를 고른다

use rand::seq::IndexedRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::actions::{all_actions, Action};
use crate::state::GameState;
use crate::Color;

/// 합법 행동 중 하나를 균등하게 고르는 정책.
///
/// 킹 안전 게이트를 통과하지 못하는 이동은 후보에서 뺀다.
pub struct RandomPolicy {
    rng: Xoshiro256PlusPlus,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    /// 후보 행동 (게이트 적용 후)
    pub fn candidates(state: &GameState, color: Color) -> Vec<Action> {
        all_actions(state, color)
            .into_iter()
            .filter(|action| match action {
                Action::Move { piece, from, to } => {
                    state.is_safe_after_move(piece, *from, *to, color)
                }
                Action::Drop { .. } => true,
            })
            .collect()
    }

    pub fn choose(&mut self, state: &GameState, color: Color) -> Option<Action> {
        Self::candidates(state, color).choose(&mut self.rng).cloned()
    }
}

/// 자가 대국 결과
#[derive(Debug, Clone)]
pub struct Playout {
    pub state: GameState,
    pub winner: Option<Color>,
    pub plies: usize,
}

/// 차례마다 행동 하나를 두고 턴을 넘기는 자가 대국.
///
/// 킹이 잡히거나 `max_plies`에 닿으면 멈춘다.
pub fn playout(mut state: GameState, policy: &mut RandomPolicy, max_plies: usize) -> Playout {
    for ply in 0..max_plies {
        let color = state.turn();
        if let Some(action) = policy.choose(&state, color) {
            match state.apply(&action) {
                Ok(outcome) if outcome.is_win() => {
                    log::info!(
                        "[{}] playout won by {:?} at ply {}",
                        state.id(), color, ply + 1
                    );
                    return Playout {
                        state,
                        winner: Some(color),
                        plies: ply + 1,
                    };
                }
                Ok(_) => {}
                Err(reason) => log::warn!(
                    "[{}] enumerated action rejected {:?}: {}",
                    state.id(),
                    action,
                    reason
                ),
            }
        }
        state.end_turn();
    }

    Playout {
        state,
        winner: None,
        plies: max_plies,
    }
}
