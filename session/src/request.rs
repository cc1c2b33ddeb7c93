//! 클라이언트 요청

use engine::{Color, PieceId, Square};
use serde::{Deserialize, Serialize};

/// 전송 계층에서 들어오는 요청
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Request {
    Move {
        player_color: Color,
        piece_id: PieceId,
        from: Square,
        to: Square,
    },
    Drop {
        player_color: Color,
        piece_id: PieceId,
        to: Square,
    },
    EndTurn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_client_json() {
        let req: Request = serde_json::from_str(
            r#"{"type":"move","player_color":"w","piece_id":"w_R0","from":[0,0],"to":[0,5]}"#,
        )
        .unwrap();
        assert_eq!(
            req,
            Request::Move {
                player_color: Color::White,
                piece_id: "w_R0".into(),
                from: Square::new(0, 0),
                to: Square::new(0, 5),
            }
        );

        let req: Request = serde_json::from_str(r#"{"type":"end-turn"}"#).unwrap();
        assert_eq!(req, Request::EndTurn);

        let bad_color = r#"{"type":"drop","player_color":"x","piece_id":"a","to":[0,0]}"#;
        assert!(serde_json::from_str::<Request>(bad_color).is_err());
    }
}
