//! 방 전체로 브로드캐스트되는 이벤트

use engine::{Color, GameSnapshot, PieceId, Square};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndReason {
    KingCapture,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum Event {
    MoveAccepted {
        by: Color,
        piece: PieceId,
        from: Square,
        to: Square,
    },
    DropAccepted {
        by: Color,
        piece: PieceId,
        to: Square,
    },
    TurnEnded {
        turn: Color,
    },
    GameEnd {
        winner: Color,
        loser: Color,
        reason: EndReason,
    },
    /// 전체 상태 스냅샷
    State {
        state: GameSnapshot,
    },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::MoveAccepted { .. } => "move-accepted",
            Event::DropAccepted { .. } => "drop-accepted",
            Event::TurnEnded { .. } => "turn-ended",
            Event::GameEnd { .. } => "game-end",
            Event::State { .. } => "state",
        }
    }
}
