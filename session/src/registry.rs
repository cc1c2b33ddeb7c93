//! 진행 중인 게임 목록

use std::collections::HashMap;
use std::sync::Arc;

use engine::{GameSnapshot, GameState, RejectReason};
use parking_lot::{Mutex, RwLock};
use thiserror::Error;

use crate::config::SessionConfig;
use crate::event::Event;
use crate::game::GameSession;
use crate::request::Request;

pub type GameId = String;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("동시 게임 수 제한({0})에 도달했습니다")]
    Full(usize),
    #[error("이미 존재하는 게임 id입니다: {0}")]
    DuplicateId(GameId),
}

/// 게임 id로 세션을 찾는 레지스트리.
///
/// 목록은 `RwLock`, 각 게임은 자기 `Mutex` 아래에 있다. 요청 처리 중에는 목록 락을
/// 잡지 않으므로 서로 다른 게임은 병렬로 진행되고, 한 게임의 변경은 직렬화된다.
pub struct GameRegistry {
    config: SessionConfig,
    games: RwLock<HashMap<GameId, Arc<Mutex<GameSession>>>>,
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl GameRegistry {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            games: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// 무작위 id의 새 게임
    pub fn create_game(&self) -> Result<GameId, RegistryError> {
        self.create_with(GameState::new)
    }

    /// `fresh`가 만든 상태 중 id가 겹치지 않는 첫 상태를 등록한다.
    ///
    /// 겹침 검사와 등록은 같은 쓰기 락 안에서 한다.
    fn create_with(
        &self,
        mut fresh: impl FnMut() -> GameState,
    ) -> Result<GameId, RegistryError> {
        let mut games = self.games.write();
        if games.len() >= self.config.max_games {
            return Err(RegistryError::Full(self.config.max_games));
        }
        let mut state = fresh();
        while games.contains_key(state.id()) {
            state = fresh();
        }
        Ok(self.register(&mut games, state))
    }

    /// 미리 만든 상태(퍼즐, 테스트)를 게임으로 등록
    pub fn insert(&self, state: GameState) -> Result<GameId, RegistryError> {
        let mut games = self.games.write();
        if games.len() >= self.config.max_games {
            return Err(RegistryError::Full(self.config.max_games));
        }
        if games.contains_key(state.id()) {
            return Err(RegistryError::DuplicateId(state.id().to_string()));
        }
        Ok(self.register(&mut games, state))
    }

    fn register(
        &self,
        games: &mut HashMap<GameId, Arc<Mutex<GameSession>>>,
        state: GameState,
    ) -> GameId {
        let id = state.id().to_string();
        let session = GameSession::with_state(state, self.config.clone());
        games.insert(id.clone(), Arc::new(Mutex::new(session)));
        log::info!("[{}] game created ({} active)", id, games.len());
        id
    }

    pub fn session(&self, id: &str) -> Option<Arc<Mutex<GameSession>>> {
        self.games.read().get(id).cloned()
    }

    /// 요청을 해당 게임에 전달한다. 게임 락은 처리하는 동안만 잡는다.
    pub fn dispatch(&self, id: &str, request: Request) -> Result<Vec<Event>, RejectReason> {
        let Some(session) = self.session(id) else {
            log::debug!("[{}] rejected game-not-found", id);
            return Err(RejectReason::GameNotFound);
        };
        let mut session = session.lock();
        session.handle(request)
    }

    pub fn snapshot(&self, id: &str) -> Option<GameSnapshot> {
        self.session(id).map(|session| session.lock().snapshot())
    }

    pub fn remove(&self, id: &str) -> bool {
        let removed = self.games.write().remove(id).is_some();
        if removed {
            log::info!("[{}] game removed", id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.games.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.read().is_empty()
    }

    /// 정렬된 게임 id 목록
    pub fn ids(&self) -> Vec<GameId> {
        let mut ids: Vec<_> = self.games.read().keys().cloned().collect();
        ids.sort();
        ids
    }
}
