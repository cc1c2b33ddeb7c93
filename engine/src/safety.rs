//! 킹 안전 게이트: 이동을 상태 사본에서 미리 실행해 본다

use crate::state::GameState;
use crate::{Color, Square};

impl GameState {
    /// 이동 후에도 `color`의 킹이 보드 위에 남는지.
    ///
    /// 상태 전체를 복제한 사본에서 이동을 실행하므로 실제 상태는 바뀌지 않는다.
    /// 이동 진영은 사본에서 기물의 현재 진영으로 정하며, 사본에서 이동이 실패하면
    /// false를 돌려준다. 공격받는지 여부(체크)는 보지 않는다.
    pub fn is_safe_after_move(
        &self,
        piece_id: &str,
        from: Square,
        to: Square,
        color: Color,
    ) -> bool {
        let mut copy = self.clone();
        let Some(mover) = copy.piece(piece_id).map(|p| p.color) else {
            return false;
        };

        match copy.move_piece(mover, piece_id, from, to) {
            Ok(_) => {
                let safe = copy.king_on_board(color);
                log::trace!(
                    "[{}] simulated {} {:?}->{:?}: king safe = {}",
                    self.id(),
                    piece_id,
                    from,
                    to,
                    safe
                );
                safe
            }
            Err(reason) => {
                log::trace!(
                    "[{}] simulated {} rejected: {}",
                    self.id(),
                    piece_id,
                    reason.code()
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(x: i32, y: i32) -> Square {
        Square::new(x, y)
    }

    fn ready() -> GameState {
        let mut state = GameState::with_id("safety");
        state.setup_place("w_K0", sq(4, 0)).unwrap();
        state.setup_place("b_K0", sq(4, 7)).unwrap();
        state.setup_place("w_R0", sq(0, 7)).unwrap();
        state
    }

    #[test]
    fn test_legal_move_is_safe() {
        let state = ready();
        assert!(state.is_safe_after_move("w_K0", sq(4, 0), sq(4, 1), Color::White));
        assert!(state.is_safe_after_move("w_R0", sq(0, 7), sq(0, 3), Color::White));
    }

    #[test]
    fn test_failed_simulation_is_unsafe() {
        let state = ready();
        assert!(!state.is_safe_after_move("w_K0", sq(4, 0), sq(4, 2), Color::White));
        assert!(!state.is_safe_after_move("w_K0", sq(3, 0), sq(3, 1), Color::White));
        assert!(!state.is_safe_after_move("missing", sq(3, 0), sq(3, 1), Color::White));
    }

    #[test]
    fn test_reports_the_asked_color() {
        let state = ready();
        // 흑 킹을 잡는 이동: 백 킹은 남고 흑 킹은 사라진다
        assert!(state.is_safe_after_move("w_R0", sq(0, 7), sq(4, 7), Color::White));
        assert!(!state.is_safe_after_move("w_R0", sq(0, 7), sq(4, 7), Color::Black));
    }

    #[test]
    fn test_gate_never_mutates_live_state() {
        let state = ready();
        let before = state.clone();
        for _ in 0..3 {
            state.is_safe_after_move("w_R0", sq(0, 7), sq(4, 7), Color::White);
            state.is_safe_after_move("w_K0", sq(4, 0), sq(5, 1), Color::White);
            state.is_safe_after_move("w_K0", sq(4, 0), sq(7, 7), Color::White);
        }
        assert_eq!(state, before);
        assert!(state.king_on_board(Color::Black));
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_king_without_board_is_unsafe() {
        let mut state = GameState::with_id("no-king");
        state.setup_place("w_R0", sq(0, 0)).unwrap();
        assert!(!state.is_safe_after_move("w_R0", sq(0, 0), sq(0, 4), Color::White));
    }
}
