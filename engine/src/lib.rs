//! 스턴 체스 규칙 엔진
//!
//! 체스 기물에 쇼기식 잡은 기물 재착수(드롭)와 스턴 스택을 더한 변형 규칙.
//! 잡힌 기물은 잡은 쪽 포켓으로 넘어가고, 새로 착수된 기물은 스턴이 풀릴 때까지
//! 움직일 수 없다. 스턴이 한 턴에 1씩 풀릴 때마다 이동 스택이 1씩 쌓인다.
//!
//! 엔진은 I/O를 하지 않는다. 전송 계층(`session` 크레이트)이 요청을 검증·적용하고
//! 결과 스냅샷을 내보낸다.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

pub mod actions;
pub mod ai;
pub mod error;
pub mod piece;
pub mod safety;
pub mod snapshot;
pub mod state;

pub use actions::{all_actions, apply_action, Action, ActionOutcome};
pub use ai::{playout, Playout, RandomPolicy};
pub use error::RejectReason;
pub use piece::{BoardSnapshot, Piece};
pub use snapshot::{GameSnapshot, PieceSnapshot};
pub use state::{GameState, HistoryEntry, MoveOutcome};

/// 보드 한 변의 칸 수
pub const BOARD_SIZE: i32 = 8;

pub type PieceId = String;

/// 보드 좌표 (0-indexed: x=0~7, y=0~7)
///
/// 직렬화 형식은 `[x, y]` 배열이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Square {
    pub x: i32, // 0=a, 7=h
    pub y: i32, // 보드 배열의 행 인덱스
}

impl Square {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// "e4" 같은 문자열에서 파싱
    pub fn from_notation(s: &str) -> Option<Self> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return None;
        }
        let x = (chars[0] as i32) - ('a' as i32);
        let y = (chars[1] as i32) - ('1' as i32);
        let square = Self { x, y };
        square.is_valid().then_some(square)
    }

    /// 체스 표기법으로 변환. 보드 밖 칸은 `None`.
    pub fn to_notation(&self) -> Option<String> {
        if !self.is_valid() {
            return None;
        }
        let file = (b'a' + self.x as u8) as char;
        let rank = (b'1' + self.y as u8) as char;
        Some(format!("{}{}", file, rank))
    }

    pub fn is_valid(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.x) && (0..BOARD_SIZE).contains(&self.y)
    }

    /// 64칸 전체 (행 우선: y, 그다음 x)
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Square::new(x, y)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_notation() {
            Some(notation) => f.write_str(&notation),
            None => write!(f, "({}, {})", self.x, self.y),
        }
    }
}

impl From<[i32; 2]> for Square {
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Square> for [i32; 2] {
    fn from(square: Square) -> Self {
        [square.x, square.y]
    }
}

impl From<(i32, i32)> for Square {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// 진영
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "w")]
    White,
    #[serde(rename = "b")]
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// 폰의 전진 방향 (흑은 y 증가, 백은 y 감소)
    pub fn forward(self) -> i32 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// 이 진영이 폰을 착수할 수 없는 랭크
    pub fn back_rank(self) -> i32 {
        match self {
            Color::White => BOARD_SIZE - 1,
            Color::Black => 0,
        }
    }

    /// 기물 id 접두사
    pub fn code(self) -> &'static str {
        match self {
            Color::White => "w",
            Color::Black => "b",
        }
    }

    pub fn from_code(code: &str) -> Option<Color> {
        match code {
            "w" | "white" => Some(Color::White),
            "b" | "black" => Some(Color::Black),
            _ => None,
        }
    }
}

/// 기물 종류 (닫힌 집합)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// id에 쓰이는 한 글자 약자 (나이트만 N)
    pub fn abbr(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// 진영별 초기 포켓 구성
    pub fn initial_count(self) -> usize {
        match self {
            PieceKind::Pawn => 8,
            PieceKind::Rook | PieceKind::Knight | PieceKind::Bishop => 2,
            PieceKind::Queen | PieceKind::King => 1,
        }
    }
}

/// 백/흑 한 쌍. 직렬화하면 `{"w": .., "b": ..}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByColor<T> {
    #[serde(rename = "w")]
    pub white: T,
    #[serde(rename = "b")]
    pub black: T,
}

impl<T> ByColor<T> {
    pub fn new(white: T, black: T) -> Self {
        Self { white, black }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Color, &T)> {
        [(Color::White, &self.white), (Color::Black, &self.black)].into_iter()
    }
}

impl<T> Index<Color> for ByColor<T> {
    type Output = T;

    fn index(&self, color: Color) -> &T {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
}

impl<T> IndexMut<Color> for ByColor<T> {
    fn index_mut(&mut self, color: Color) -> &mut T {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
}
