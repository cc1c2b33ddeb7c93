//! 합법 행동 열거와 적용 (AI 탐색, 테스트용)

use serde::{Deserialize, Serialize};

use crate::error::RejectReason;
use crate::state::{GameState, MoveOutcome};
use crate::{Color, PieceId, PieceKind, Square};

/// 플레이어가 수행할 수 있는 행동
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Action {
    /// 이동: 보드 위 기물 이동 (잡기 포함)
    Move {
        piece: PieceId,
        from: Square,
        to: Square,
    },
    /// 착수: 포켓에서 보드로 기물 배치
    Drop { piece: PieceId, to: Square },
}

impl Action {
    pub fn piece_id(&self) -> &str {
        match self {
            Action::Move { piece, .. } | Action::Drop { piece, .. } => piece,
        }
    }

    pub fn is_move(&self) -> bool {
        matches!(self, Action::Move { .. })
    }
}

/// 행동 적용 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Moved(MoveOutcome),
    Dropped,
}

impl ActionOutcome {
    pub fn is_win(&self) -> bool {
        matches!(self, ActionOutcome::Moved(outcome) if outcome.is_win())
    }
}

/// `color`가 지금 할 수 있는 모든 이동과 착수.
///
/// 이동은 스턴이 없는 보드 위 기물마다 행마 규칙을 만족하고 자기 기물이 없는
/// 칸으로 열거한다. 킹 안전 게이트는 거치지 않는다. 순서는 기물 id, 칸은 행 우선.
pub fn all_actions(state: &GameState, color: Color) -> Vec<Action> {
    let mut actions = Vec::new();
    let board = state.board_pieces();

    // 이동
    for piece in state.pieces().filter(|p| p.color == color && !p.is_stunned()) {
        let Some(from) = piece.pos else {
            continue;
        };
        for to in Square::all() {
            if !piece.can_move(from, to, &board) {
                continue;
            }
            if state.piece_at(to).is_some_and(|target| target.color == color) {
                continue;
            }
            actions.push(Action::Move {
                piece: piece.id.clone(),
                from,
                to,
            });
        }
    }

    // 착수
    let empty: Vec<Square> = Square::all().filter(|s| state.piece_at(*s).is_none()).collect();
    for id in state.hand(color) {
        let Some(piece) = state.piece(id) else {
            continue;
        };
        // 첫 턴에는 킹만 착수 가능
        if !state.first_turn_done(color) && piece.kind != PieceKind::King {
            continue;
        }
        for &to in &empty {
            if piece.kind == PieceKind::Pawn && to.y == color.back_rank() {
                continue;
            }
            actions.push(Action::Drop {
                piece: id.clone(),
                to,
            });
        }
    }

    actions
}

impl GameState {
    /// 현재 턴 진영으로 행동을 적용한다.
    pub fn apply(&mut self, action: &Action) -> Result<ActionOutcome, RejectReason> {
        let color = self.turn();
        match action {
            Action::Move { piece, from, to } => self
                .move_piece(color, piece, *from, *to)
                .map(ActionOutcome::Moved),
            Action::Drop { piece, to } => {
                self.drop(color, piece, *to).map(|_| ActionOutcome::Dropped)
            }
        }
    }
}

/// 사본 상태에 행동을 적용하고 돌려준다.
///
/// 실제 게임 상태가 아닌 복제본에 쓴다. 거부된 행동은 로그만 남기고 상태를 그대로 둔다.
pub fn apply_action(mut state: GameState, action: &Action) -> GameState {
    if let Err(reason) = state.apply(action) {
        log::debug!(
            "[{}] apply_action ignored {:?}: {}",
            state.id(), action, reason.code()
        );
    }
    state
}
