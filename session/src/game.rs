//! 게임 하나의 요청 처리 파이프라인

use engine::{Color, GameSnapshot, GameState, MoveOutcome, PieceId, RejectReason, Square};

use crate::config::SessionConfig;
use crate::event::{EndReason, Event};
use crate::request::Request;

/// 한 게임의 권위 있는 상태와 승패 기록.
///
/// 요청은 정해진 순서로 검사되고, 첫 실패 사유가 그대로 돌아간다. 거부된 요청은
/// 상태를 바꾸지 않는다.
#[derive(Debug, Clone)]
pub struct GameSession {
    state: GameState,
    config: SessionConfig,
    winner: Option<Color>,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_state(GameState::new(), config)
    }

    pub fn with_state(state: GameState, config: SessionConfig) -> Self {
        Self {
            state,
            config,
            winner: None,
        }
    }

    pub fn id(&self) -> &str {
        self.state.id()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    /// 요청 하나를 처리하고 방에 보낼 이벤트를 돌려준다.
    pub fn handle(&mut self, request: Request) -> Result<Vec<Event>, RejectReason> {
        let result = match request {
            Request::Move {
                player_color,
                piece_id,
                from,
                to,
            } => self.handle_move(player_color, piece_id, from, to),
            Request::Drop {
                player_color,
                piece_id,
                to,
            } => self.handle_drop(player_color, piece_id, to),
            Request::EndTurn => self.handle_end_turn(),
        };

        if let Err(reason) = &result {
            log::debug!("[{}] rejected {}: {}", self.id(), reason.code(), reason);
        }
        result
    }

    fn ensure_running(&self) -> Result<(), RejectReason> {
        if self.is_over() {
            return Err(RejectReason::GameOver);
        }
        Ok(())
    }

    fn ensure_turn(&self, color: Color) -> Result<(), RejectReason> {
        if self.state.turn() != color {
            return Err(RejectReason::NotYourTurn);
        }
        Ok(())
    }

    fn handle_move(
        &mut self,
        color: Color,
        piece_id: PieceId,
        from: Square,
        to: Square,
    ) -> Result<Vec<Event>, RejectReason> {
        self.ensure_running()?;
        self.ensure_turn(color)?;
        if self.config.one_move_per_turn && self.state.action_done(color) {
            return Err(RejectReason::AlreadyMovedThisTurn);
        }

        let piece = self.state.piece(&piece_id).ok_or(RejectReason::NoSuchPiece)?;
        if piece.is_stunned() {
            return Err(RejectReason::Stunned { stun: piece.stun });
        }
        if !from.is_valid() || !to.is_valid() {
            return Err(RejectReason::InvalidCoords);
        }
        if !piece.can_move(from, to, &self.state.board_pieces()) {
            return Err(RejectReason::IllegalMove);
        }
        if self.config.enforce_king_safety
            && !self.state.is_safe_after_move(&piece_id, from, to, piece.color)
        {
            return Err(RejectReason::SuicideOrKingLost);
        }

        let outcome = self.state.move_piece(color, &piece_id, from, to)?;

        let mut events = vec![
            Event::MoveAccepted {
                by: color,
                piece: piece_id,
                from,
                to,
            },
            Event::State {
                state: self.state.snapshot(),
            },
        ];
        if let MoveOutcome::Win { .. } = outcome {
            self.winner = Some(color);
            log::info!(
                "[{}] game over: {:?} wins by king capture",
                self.id(), color
            );
            events.push(Event::GameEnd {
                winner: color,
                loser: color.opponent(),
                reason: EndReason::KingCapture,
            });
        }
        Ok(events)
    }

    fn handle_drop(
        &mut self,
        color: Color,
        piece_id: PieceId,
        to: Square,
    ) -> Result<Vec<Event>, RejectReason> {
        self.ensure_running()?;
        self.ensure_turn(color)?;
        self.state.drop(color, &piece_id, to)?;

        Ok(vec![
            Event::DropAccepted {
                by: color,
                piece: piece_id,
                to,
            },
            Event::State {
                state: self.state.snapshot(),
            },
        ])
    }

    fn handle_end_turn(&mut self) -> Result<Vec<Event>, RejectReason> {
        self.ensure_running()?;
        self.state.end_turn();

        Ok(vec![
            Event::TurnEnded {
                turn: self.state.turn(),
            },
            Event::State {
                state: self.state.snapshot(),
            },
        ])
    }
}
