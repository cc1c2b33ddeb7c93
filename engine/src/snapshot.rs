//! 클라이언트로 내보내는 상태 스냅샷

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::piece::Piece;
use crate::state::{GameState, HistoryEntry};
use crate::{ByColor, Color, PieceId, PieceKind, Square};

/// 기물 하나의 직렬화 형식
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub id: PieceId,
    #[serde(rename = "type")]
    pub kind: PieceKind,
    pub color: Color,
    pub pos: Option<Square>,
    pub stun: u32,
    #[serde(rename = "moveStack")]
    pub move_stack: i32,
    pub captured: bool,
}

impl From<&Piece> for PieceSnapshot {
    fn from(piece: &Piece) -> Self {
        Self {
            id: piece.id.clone(),
            kind: piece.kind,
            color: piece.color,
            pos: piece.pos,
            stun: piece.stun,
            move_stack: piece.move_stack,
            captured: piece.captured,
        }
    }
}

/// 게임 전체 스냅샷
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub id: String,
    pub turn: Color,
    pub pieces: BTreeMap<PieceId, PieceSnapshot>,
    pub hands: ByColor<Vec<PieceId>>,
    pub history: Vec<HistoryEntry>,
}

impl GameSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl GameState {
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            id: self.id().to_string(),
            turn: self.turn(),
            pieces: self
                .pieces()
                .map(|p| (p.id.clone(), PieceSnapshot::from(p)))
                .collect(),
            hands: self.hands().clone(),
            history: self.history().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_schema() {
        let mut state = GameState::with_id("snap");
        state.drop(Color::White, "w_K0", Square::new(4, 0)).unwrap();

        let value = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(value["id"], "snap");
        assert_eq!(value["turn"], "w");
        assert_eq!(
            value["pieces"]["w_K0"],
            json!({
                "id": "w_K0",
                "type": "king",
                "color": "w",
                "pos": [4, 0],
                "stun": 1,
                "moveStack": 0,
                "captured": false
            })
        );
        assert_eq!(value["pieces"]["b_Q0"]["pos"], serde_json::Value::Null);
        assert_eq!(value["hands"]["w"].as_array().unwrap().len(), 15);
        assert_eq!(value["hands"]["b"].as_array().unwrap().len(), 16);
        assert_eq!(
            value["history"],
            json!([{ "action": "drop", "player": "w", "piece": "w_K0", "pos": [4, 0] }])
        );
    }

    #[test]
    fn test_snapshot_json_parses_back() {
        let state = GameState::with_id("snap");
        let json = state.snapshot().to_json().unwrap();
        let back: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state.snapshot());
        assert_eq!(back.pieces.len(), 32);
    }
}
