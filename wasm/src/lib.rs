use engine::{all_actions, Color, RandomPolicy, RejectReason, Square};
use serde::Serialize;
use session::{ConfigError, Event, GameSession, Request, SessionConfig};
use wasm_bindgen::prelude::*;

/// JS에서 사용할 게임 래퍼 (로컬 대국, 힌트)
#[wasm_bindgen]
pub struct Game {
    session: GameSession,
}

/// 행동 요청의 응답.
///
/// 성공: `{"ok":true,"events":[..]}`, 거부: `{"ok":false,"reason":"..."}`,
/// 잘못된 인자: `{"ok":false,"error":"..."}`
#[derive(Serialize)]
struct Reply<'a> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    events: Option<&'a [Event]>,
    #[serde(flatten)]
    reason: Option<&'a RejectReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Game {
    /// 새 게임 생성
    #[wasm_bindgen(constructor)]
    pub fn new() -> Game {
        Game {
            session: GameSession::new(SessionConfig::default()),
        }
    }

    /// TOML 설정으로 게임 생성
    #[wasm_bindgen]
    pub fn with_config(config_toml: &str) -> Result<Game, JsValue> {
        Self::from_toml(config_toml).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn id(&self) -> String {
        self.session.id().to_string()
    }

    /// 현재 차례 ("w" / "b")
    #[wasm_bindgen(getter)]
    pub fn turn(&self) -> String {
        self.session.state().turn().code().to_string()
    }

    /// 승자 ("w" / "b"), 진행 중이면 undefined
    #[wasm_bindgen(getter)]
    pub fn winner(&self) -> Option<String> {
        self.session.winner().map(|c| c.code().to_string())
    }

    /// 현재 게임 상태 (JS 객체)
    #[wasm_bindgen]
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.snapshot()).map_err(JsValue::from)
    }

    /// 현재 게임 상태 (JSON 문자열)
    #[wasm_bindgen]
    pub fn state_json(&self) -> String {
        self.session.snapshot().to_json().unwrap_or_else(|_| "{}".to_string())
    }

    /// 해당 진영의 합법 행동 목록
    #[wasm_bindgen]
    pub fn legal_actions_json(&self, color: &str) -> String {
        let Some(color) = Color::from_code(color) else {
            return "[]".to_string();
        };
        let actions = all_actions(self.session.state(), color);
        serde_json::to_string(&actions).unwrap_or_else(|_| "[]".to_string())
    }

    /// 기물 이동
    #[wasm_bindgen]
    pub fn move_piece(
        &mut self,
        color: &str,
        piece_id: &str,
        from_x: i32,
        from_y: i32,
        to_x: i32,
        to_y: i32,
    ) -> String {
        let Some(player_color) = Color::from_code(color) else {
            return Self::bad_color(color);
        };
        self.submit(Request::Move {
            player_color,
            piece_id: piece_id.to_string(),
            from: Square::new(from_x, from_y),
            to: Square::new(to_x, to_y),
        })
    }

    /// 포켓에서 기물 착수
    #[wasm_bindgen]
    pub fn drop_piece(&mut self, color: &str, piece_id: &str, x: i32, y: i32) -> String {
        let Some(player_color) = Color::from_code(color) else {
            return Self::bad_color(color);
        };
        self.submit(Request::Drop {
            player_color,
            piece_id: piece_id.to_string(),
            to: Square::new(x, y),
        })
    }

    /// 턴 종료
    #[wasm_bindgen]
    pub fn end_turn(&mut self) -> String {
        self.submit(Request::EndTurn)
    }

    /// 현재 차례에 둘 만한 행동 하나 (없으면 "null")
    #[wasm_bindgen]
    pub fn suggest_action_json(&self, seed: u64) -> String {
        let state = self.session.state();
        let action = RandomPolicy::new(seed).choose(state, state.turn());
        log::debug!("[{}] suggestion: {:?}", self.session.id(), action);
        serde_json::to_string(&action).unwrap_or_else(|_| "null".to_string())
    }

    // === Private helpers ===

    fn from_toml(config_toml: &str) -> Result<Game, ConfigError> {
        let config = SessionConfig::from_toml_str(config_toml)?;
        Ok(Game {
            session: GameSession::new(config),
        })
    }

    fn submit(&mut self, request: Request) -> String {
        match self.session.handle(request) {
            Ok(events) => Self::render(Reply {
                ok: true,
                events: Some(events.as_slice()),
                reason: None,
                error: None,
            }),
            Err(reason) => Self::render(Reply {
                ok: false,
                events: None,
                reason: Some(&reason),
                error: None,
            }),
        }
    }

    fn bad_color(color: &str) -> String {
        Self::render(Reply {
            ok: false,
            events: None,
            reason: None,
            error: Some(format!("unknown color: {}", color)),
        })
    }

    fn render(reply: Reply<'_>) -> String {
        serde_json::to_string(&reply)
            .unwrap_or_else(|e| format!(r#"{{"ok":false,"error":"{}"}}"#, e))
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
    log::info!("stunchess wasm initialized");
}


// WebAssembly 전용 테스트 (wasm-pack test --node wasm)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_wasm_constructor_draws_game_id() {
        let a = Game::new();
        let b = Game::new();
        assert_eq!(a.id().len(), 8);
        assert_ne!(a.id(), b.id());
    }

    #[wasm_bindgen_test]
    fn test_wasm_state_object() {
        let game = Game::new();
        assert!(game.state().is_ok());
        assert_eq!(game.turn(), "w");
    }
}
