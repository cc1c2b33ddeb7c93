//! 보드/게임 상태 엔진: 착수, 이동(잡기 포함), 턴 종료

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::RejectReason;
use crate::piece::{BoardSnapshot, Piece};
use crate::{ByColor, Color, PieceId, PieceKind, Square, BOARD_SIZE};

type Grid = [[Option<PieceId>; BOARD_SIZE as usize]; BOARD_SIZE as usize];

/// 실행된 행동 기록 (감사용, 규칙 판정에는 쓰지 않는다)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum HistoryEntry {
    Move {
        player: Color,
        piece: PieceId,
        from: Square,
        to: Square,
    },
    Drop {
        player: Color,
        piece: PieceId,
        pos: Square,
    },
}

/// 이동 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    Captured { captured: PieceId },
    /// 킹을 잡았다. 호출자는 이 게임의 처리를 멈춰야 한다.
    Win { captured: PieceId },
}

impl MoveOutcome {
    pub fn is_win(&self) -> bool {
        matches!(self, MoveOutcome::Win { .. })
    }

    pub fn captured(&self) -> Option<&PieceId> {
        match self {
            MoveOutcome::Moved => None,
            MoveOutcome::Captured { captured } | MoveOutcome::Win { captured } => Some(captured),
        }
    }
}

/// 폰 착수 스턴: 상대 진영에 가까울수록 높다.
///
/// 백은 랭크 y(0~6)에 y, 흑은 랭크 y(1~7)에 7-y. 표 밖은 1.
fn pawn_drop_stun(color: Color, rank: i32) -> u32 {
    match color {
        Color::White if (0..=6).contains(&rank) => rank as u32,
        Color::Black if (1..=7).contains(&rank) => (7 - rank) as u32,
        _ => 1,
    }
}

/// 게임 상태
///
/// 불변식: `board[y][x] == Some(id)` 이면 `pieces[id].pos == Some((x, y))` 이고 그 역도
/// 성립한다. 모든 기물은 보드 위 또는 정확히 한 포켓에만 있다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) id: String,
    pub(crate) board: Grid,
    pub(crate) pieces: BTreeMap<PieceId, Piece>,
    pub(crate) hands: ByColor<Vec<PieceId>>,
    pub(crate) turn: Color,
    pub(crate) action_done: ByColor<bool>,
    pub(crate) first_turn_done: ByColor<bool>,
    pub(crate) history: Vec<HistoryEntry>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// 무작위 8자리 id로 새 게임 생성
    pub fn new() -> Self {
        Self::with_id(format!("{:08x}", rand::random::<u32>()))
    }

    /// 32개 기물이 모두 포켓에 있는 초기 상태. 백 선공.
    pub fn with_id(id: impl Into<String>) -> Self {
        let mut state = Self {
            id: id.into(),
            board: Default::default(),
            pieces: BTreeMap::new(),
            hands: ByColor::default(),
            turn: Color::White,
            action_done: ByColor::default(),
            first_turn_done: ByColor::default(),
            history: Vec::new(),
        };

        for color in Color::ALL {
            for kind in PieceKind::ALL {
                for i in 0..kind.initial_count() {
                    let id = format!("{}_{}{}", color.code(), kind.abbr(), i);
                    state.pieces.insert(id.clone(), Piece::new(id.clone(), kind, color));
                    state.hands[color].push(id);
                }
            }
        }
        state
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn piece(&self, piece_id: &str) -> Option<&Piece> {
        self.pieces.get(piece_id)
    }

    /// id 순으로 정렬된 전체 기물
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values()
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.cell(square).and_then(|id| self.pieces.get(id))
    }

    pub fn hand(&self, color: Color) -> &[PieceId] {
        &self.hands[color]
    }

    pub fn hands(&self) -> &ByColor<Vec<PieceId>> {
        &self.hands
    }

    pub fn action_done(&self, color: Color) -> bool {
        self.action_done[color]
    }

    pub fn first_turn_done(&self, color: Color) -> bool {
        self.first_turn_done[color]
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// 해당 진영의 킹이 보드 위에 있는지
    pub fn king_on_board(&self, color: Color) -> bool {
        self.pieces
            .values()
            .any(|p| p.kind == PieceKind::King && p.color == color && p.is_on_board())
    }

    fn cell(&self, square: Square) -> Option<&PieceId> {
        if !square.is_valid() {
            return None;
        }
        self.board[square.y as usize][square.x as usize].as_ref()
    }

    fn set_cell(&mut self, square: Square, piece_id: Option<PieceId>) {
        self.board[square.y as usize][square.x as usize] = piece_id;
    }

    /// 행마 판정용 보드 스냅샷
    pub fn board_pieces(&self) -> BoardSnapshot<'_> {
        let mut snapshot: BoardSnapshot<'_> = [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize];
        for (y, row) in self.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                snapshot[y][x] = cell.as_ref().and_then(|id| self.pieces.get(id));
            }
        }
        snapshot
    }

    /// 착수: 포켓의 기물을 빈 칸에 놓는다.
    ///
    /// 검사는 순서대로 진행되고 첫 실패에서 멈춘다. 착수는 `action_done`을
    /// 건드리지 않는다.
    pub fn drop(
        &mut self,
        color: Color,
        piece_id: &str,
        square: Square,
    ) -> Result<(), RejectReason> {
        if !self.hands[color].iter().any(|id| id == piece_id) {
            return Err(RejectReason::NotOwned);
        }
        let piece = self.pieces.get(piece_id).ok_or(RejectReason::NotOwned)?;

        if !self.first_turn_done[color] && piece.kind != PieceKind::King {
            return Err(RejectReason::KingMustDropFirst);
        }
        if !square.is_valid() {
            return Err(RejectReason::InvalidCoords);
        }
        if self.cell(square).is_some() {
            return Err(RejectReason::Occupied);
        }

        let stun = if piece.kind == PieceKind::Pawn {
            if square.y == color.back_rank() {
                return Err(RejectReason::IllegalPawnRank);
            }
            pawn_drop_stun(color, square.y)
        } else {
            // 잡기로 이전된 스턴이 더 크면 유지
            piece.stun.max(1)
        };

        let piece = self.pieces.get_mut(piece_id).ok_or(RejectReason::NotOwned)?;
        piece.drop(square);
        piece.stun = stun;

        let id = piece.id.clone();
        self.set_cell(square, Some(id.clone()));
        self.hands[color].retain(|held| held != piece_id);
        self.first_turn_done[color] = true;
        self.history.push(HistoryEntry::Drop {
            player: color,
            piece: id,
            pos: square,
        });

        log::debug!(
            "[{}] {:?} dropped {} at {} (stun {})",
            self.id, color, piece_id, square, stun
        );
        Ok(())
    }

    /// 이동 실행 (잡기 포함)
    ///
    /// 잡은 기물은 이동한 쪽 포켓으로 들어가고 진영이 바뀐다. 킹을 잡으면
    /// `MoveOutcome::Win`을 돌려준다.
    pub fn move_piece(
        &mut self,
        color: Color,
        piece_id: &str,
        from: Square,
        to: Square,
    ) -> Result<MoveOutcome, RejectReason> {
        if !from.is_valid() || !to.is_valid() {
            return Err(RejectReason::InvalidCoords);
        }
        if self.cell(from).map(String::as_str) != Some(piece_id) {
            return Err(RejectReason::SourceMismatch);
        }

        let piece = self.pieces.get(piece_id).ok_or(RejectReason::SourceMismatch)?;
        if piece.color != color {
            return Err(RejectReason::NotYourPiece);
        }
        if piece.is_stunned() {
            return Err(RejectReason::Stunned { stun: piece.stun });
        }
        if !piece.can_move(from, to, &self.board_pieces()) {
            return Err(RejectReason::IllegalMove);
        }

        let target_id = self.cell(to).cloned();
        if let Some(target_id) = &target_id {
            let target = self.pieces.get(target_id).ok_or(RejectReason::SourceMismatch)?;
            if target.color == color {
                return Err(RejectReason::CannotCaptureOwn);
            }
        }

        // 여기부터는 실패하지 않는다
        let mut outcome = MoveOutcome::Moved;
        if let Some(target_id) = target_id {
            if let Some(mut victim) = self.pieces.remove(&target_id) {
                if let Some(mover) = self.pieces.get_mut(piece_id) {
                    mover.capture(&mut victim);
                }
                outcome = if victim.kind == PieceKind::King {
                    MoveOutcome::Win {
                        captured: target_id.clone(),
                    }
                } else {
                    MoveOutcome::Captured {
                        captured: target_id.clone(),
                    }
                };
                self.pieces.insert(target_id.clone(), victim);
            }
            self.hands[color].push(target_id);
            self.set_cell(to, None);
        }

        self.set_cell(from, None);
        self.set_cell(to, Some(piece_id.to_string()));
        if let Some(mover) = self.pieces.get_mut(piece_id) {
            mover.pos = Some(to);
            mover.move_stack -= 1;
        }

        self.history.push(HistoryEntry::Move {
            player: color,
            piece: piece_id.to_string(),
            from,
            to,
        });
        self.action_done[color] = true;

        match &outcome {
            MoveOutcome::Win { captured } => {
                log::info!(
                    "[{}] {:?} captured king {} with {}",
                    self.id, color, captured, piece_id
                )
            }
            _ => log::debug!(
                "[{}] {:?} moved {} {}->{}",
                self.id,
                color,
                piece_id,
                from,
                to
            ),
        }
        Ok(outcome)
    }

    /// 턴 종료: 모든 기물의 스턴을 1 풀고 턴을 넘긴다.
    pub fn end_turn(&mut self) {
        for piece in self.pieces.values_mut() {
            piece.end_turn();
        }
        self.turn = self.turn.opponent();
        self.action_done = ByColor::default();
    }

    /// 포켓의 기물을 규칙 검사 없이 배치 (퍼즐·테스트용). 스턴과 이동 스택은 0.
    pub fn setup_place(&mut self, piece_id: &str, square: Square) -> Result<(), String> {
        if !square.is_valid() {
            return Err(format!("보드 범위를 벗어난 좌표입니다: {:?}", square));
        }
        if let Some(occupant) = self.cell(square) {
            return Err(format!("{}에 이미 {}가 있습니다", square, occupant));
        }
        let piece = self
            .pieces
            .get_mut(piece_id)
            .ok_or_else(|| format!("기물을 찾을 수 없습니다: {}", piece_id))?;
        if piece.is_on_board() {
            return Err(format!("이미 보드 위에 있는 기물입니다: {}", piece_id));
        }

        let color = piece.color;
        piece.drop(square);
        piece.stun = 0;
        if piece.kind == PieceKind::King {
            self.first_turn_done[color] = true;
        }
        self.hands[color].retain(|held| held != piece_id);
        self.set_cell(square, Some(piece_id.to_string()));
        Ok(())
    }

    /// 보드/기물/포켓 사이의 일관성 검사
    pub fn check_consistency(&self) -> Result<(), String> {
        for square in Square::all() {
            if let Some(id) = self.cell(square) {
                let piece = self
                    .pieces
                    .get(id)
                    .ok_or_else(|| {
                        format!("{}의 기물 {}이 등록되어 있지 않습니다", square, id)
                    })?;
                if piece.pos != Some(square) {
                    return Err(format!(
                        "{}의 위치 {:?}가 보드({})와 다릅니다",
                        id, piece.pos, square
                    ));
                }
            }
        }

        for piece in self.pieces.values() {
            let mut holders: Vec<Color> = Vec::new();
            for (color, hand) in self.hands.iter() {
                holders.extend(hand.iter().filter(|id| **id == piece.id).map(|_| color));
            }

            match piece.pos {
                Some(square) => {
                    if self.cell(square) != Some(&piece.id) {
                        return Err(format!(
                            "{}가 {}에 있다고 하지만 보드는 다릅니다",
                            piece.id, square
                        ));
                    }
                    if piece.captured || !holders.is_empty() {
                        return Err(format!("{}가 보드와 포켓에 동시에 있습니다", piece.id));
                    }
                }
                None => {
                    if !piece.captured {
                        return Err(format!("{}가 보드 밖인데 captured가 아닙니다", piece.id));
                    }
                    if holders != [piece.color] {
                        return Err(format!(
                            "{}의 포켓 소속이 잘못되었습니다: {:?}",
                            piece.id, holders
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}
