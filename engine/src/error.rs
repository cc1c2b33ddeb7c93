//! 거부 사유

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 행동이 거부된 이유.
///
/// 모든 거부는 복구 가능하며 상태를 바꾸지 않는다. 직렬화하면
/// `{"reason": "<code>"}` 형태이고, 스턴은 남은 스턴 수를 함께 싣는다.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum RejectReason {
    #[error("게임을 찾을 수 없습니다")]
    GameNotFound,
    #[error("게임이 이미 끝났습니다")]
    GameOver,
    #[error("자신의 턴이 아닙니다")]
    NotYourTurn,
    #[error("이번 턴에 이미 이동했습니다")]
    AlreadyMovedThisTurn,
    #[error("기물을 찾을 수 없습니다")]
    NoSuchPiece,
    #[error("스턴 상태입니다 (스턴: {stun})")]
    Stunned { stun: u32 },
    #[error("기물의 행마 규칙에 맞지 않는 이동입니다")]
    IllegalMove,
    #[error("이동 후 자신의 킹이 보드에 남지 않습니다")]
    SuicideOrKingLost,
    #[error("포켓에 없는 기물입니다")]
    NotOwned,
    #[error("킹을 먼저 착수해야 합니다")]
    KingMustDropFirst,
    #[error("보드 범위를 벗어난 좌표입니다")]
    InvalidCoords,
    #[error("해당 칸에 이미 기물이 있습니다")]
    Occupied,
    #[error("폰은 해당 랭크에 착수할 수 없습니다")]
    IllegalPawnRank,
    #[error("출발 칸의 기물이 일치하지 않습니다")]
    SourceMismatch,
    #[error("자신의 기물이 아닙니다")]
    NotYourPiece,
    #[error("자신의 기물은 잡을 수 없습니다")]
    CannotCaptureOwn,
}

impl RejectReason {
    /// 기계 판독용 사유 코드
    pub fn code(&self) -> &'static str {
        match self {
            RejectReason::GameNotFound => "game-not-found",
            RejectReason::GameOver => "game-over",
            RejectReason::NotYourTurn => "not-your-turn",
            RejectReason::AlreadyMovedThisTurn => "already-moved-this-turn",
            RejectReason::NoSuchPiece => "no-such-piece",
            RejectReason::Stunned { .. } => "stunned",
            RejectReason::IllegalMove => "illegal-move",
            RejectReason::SuicideOrKingLost => "suicide-or-king-lost",
            RejectReason::NotOwned => "not-owned",
            RejectReason::KingMustDropFirst => "king-must-drop-first",
            RejectReason::InvalidCoords => "invalid-coords",
            RejectReason::Occupied => "occupied",
            RejectReason::IllegalPawnRank => "illegal-pawn-rank",
            RejectReason::SourceMismatch => "source-mismatch",
            RejectReason::NotYourPiece => "not-your-piece",
            RejectReason::CannotCaptureOwn => "cannot-capture-own",
        }
    }
}
