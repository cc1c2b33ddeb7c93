//! 게임 세션 계층
//!
//! 전송 계층(소켓, 방 브로드캐스트)과 규칙 엔진 사이에서 요청을 검증하고 적용한다.
//! 게임마다 한 번에 하나의 변경만 일어나도록 레지스트리가 게임별 락을 건다.

pub mod config;
pub mod event;
pub mod game;
pub mod registry;
pub mod request;

pub use config::{ConfigError, SessionConfig};
pub use event::{EndReason, Event};
pub use game::GameSession;
pub use registry::{GameId, GameRegistry, RegistryError};
pub use request::Request;
