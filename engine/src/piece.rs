//! 기물 모델: 종류별 행마 판정과 기물 인스턴스 상태

use serde::{Deserialize, Serialize};

use crate::{Color, PieceId, PieceKind, Square, BOARD_SIZE};

/// 행마 판정용 읽기 전용 보드. `[y][x]` 순서로 접근한다.
///
/// 점유 여부와 진영 확인에만 쓰이며 실제 보드(`GameState`)와는 별개다.
pub type BoardSnapshot<'a> = [[Option<&'a Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize];

fn occupant<'a>(board: &BoardSnapshot<'a>, square: Square) -> Option<&'a Piece> {
    if !square.is_valid() {
        return None;
    }
    board[square.y as usize][square.x as usize]
}

/// from과 to 사이(양 끝 제외)의 칸이 모두 비었는지
fn path_clear(from: Square, to: Square, board: &BoardSnapshot) -> bool {
    let sx = (to.x - from.x).signum();
    let sy = (to.y - from.y).signum();
    let mut cur = Square::new(from.x + sx, from.y + sy);
    while cur != to {
        if occupant(board, cur).is_some() {
            return false;
        }
        cur = Square::new(cur.x + sx, cur.y + sy);
    }
    true
}

impl PieceKind {
    /// 행마 규칙 판정.
    ///
    /// 도착 칸의 점유·진영은 호출자가 따로 확인한다 (폰 제외: 폰은 전진/대각
    /// 잡기 구분에 도착 칸 정보가 필요하다).
    pub fn can_move(self, color: Color, from: Square, to: Square, board: &BoardSnapshot) -> bool {
        if from == to {
            return false;
        }
        let dx = to.x - from.x;
        let dy = to.y - from.y;

        match self {
            PieceKind::Knight => {
                let (ax, ay) = (dx.abs(), dy.abs());
                (ax == 1 && ay == 2) || (ax == 2 && ay == 1)
            }
            PieceKind::Rook => (dx == 0) != (dy == 0) && path_clear(from, to, board),
            PieceKind::Bishop => dx.abs() == dy.abs() && path_clear(from, to, board),
            // 퀸: 룩 규칙 또는 비숍 규칙
            PieceKind::Queen => {
                PieceKind::Rook.can_move(color, from, to, board)
                    || PieceKind::Bishop.can_move(color, from, to, board)
            }
            PieceKind::King => dx.abs().max(dy.abs()) == 1,
            PieceKind::Pawn => {
                if dy != color.forward() {
                    return false;
                }
                let target = occupant(board, to);
                match dx.abs() {
                    // 전진은 빈 칸으로만
                    0 => target.is_none(),
                    // 대각선은 상대 기물을 잡을 때만
                    1 => target.is_some_and(|t| t.color != color),
                    _ => false,
                }
            }
        }
    }
}

/// 기물
///
/// id와 종류는 게임 내내 변하지 않는다. 진영은 잡힐 때마다 잡은 쪽으로 바뀐다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub color: Color,
    pub pos: Option<Square>, // None == 포켓에 있음
    pub stun: u32,           // 스턴 스택 (양수면 움직일 수 없음)
    pub move_stack: i32,     // 이동 스택 (하한 없음)
    pub captured: bool,      // 포켓에 있는 동안 true
}

impl Piece {
    /// 포켓에 있는 새 기물
    pub fn new(id: PieceId, kind: PieceKind, color: Color) -> Self {
        Self {
            id,
            kind,
            color,
            pos: None,
            stun: 0,
            move_stack: 0,
            captured: true,
        }
    }

    pub fn is_on_board(&self) -> bool {
        self.pos.is_some()
    }

    pub fn is_stunned(&self) -> bool {
        self.stun > 0
    }

    /// 이 기물 기준 행마 판정
    pub fn can_move(&self, from: Square, to: Square, board: &BoardSnapshot) -> bool {
        self.kind.can_move(self.color, from, to, board)
    }

    /// 착수: 보드 위로 올리고 기본 스턴 1을 건다.
    ///
    /// 엔진이 폰 랭크 규칙 등에 따라 직후에 스턴 값을 덮어쓸 수 있다.
    pub fn drop(&mut self, square: Square) {
        self.pos = Some(square);
        self.captured = false;
        self.stun = 1;
        self.move_stack = 0;
    }

    /// `target`을 잡는다.
    ///
    /// 잡힌 기물에 쌓여 있던 스턴/이동 스택은 잡은 기물로 이전되고,
    /// 잡힌 기물은 잡은 쪽 진영이 되어 스택이 0으로 초기화된다.
    pub fn capture(&mut self, target: &mut Piece) {
        self.stun += target.stun;
        self.move_stack += target.move_stack;

        target.color = self.color;
        target.pos = None;
        target.captured = true;
        target.stun = 0;
        target.move_stack = 0;
    }

    /// 턴 종료: 스턴이 1 풀릴 때마다 이동 스택이 1 쌓인다.
    pub fn end_turn(&mut self) {
        if self.captured || self.stun == 0 {
            return;
        }
        self.stun -= 1;
        self.move_stack += 1;
    }
}
