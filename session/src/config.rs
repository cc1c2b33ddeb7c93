//! 세션 설정

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("설정 파싱 실패: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("max_games는 1 이상이어야 합니다")]
    ZeroGames,
}

/// 세션/레지스트리 동작 설정.
///
/// ```toml
/// max_games = 256
/// enforce_king_safety = true
/// one_move_per_turn = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// 동시에 보관할 수 있는 게임 수
    pub max_games: usize,
    /// 이동 전에 킹 안전 게이트를 돌린다
    pub enforce_king_safety: bool,
    /// 한 턴에 이동은 한 번만 (착수는 제한 없음)
    pub one_move_per_turn: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_games: 1024,
            enforce_king_safety: true,
            one_move_per_turn: true,
        }
    }
}

impl SessionConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_games == 0 {
            return Err(ConfigError::ZeroGames);
        }
        Ok(())
    }
}
