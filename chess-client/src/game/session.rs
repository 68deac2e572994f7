//! 对局会话
//!
//! 一个连接对应一个会话，持有状态存储、身份信息、选择缓冲区、视图与待发送命令。
//! 所有处理都在单线程事件循环中同步完成。

use std::collections::BTreeSet;
use std::rc::Rc;

use protocol::{Annotation, Codec, Color, Command, GameStatus, PromotionPiece, ProtocolEvent, Square};

use super::input::{UserInput, HELP};
use super::promotion::PromotionPrompt;
use super::selection::{ClickAction, Selection};
use super::state::{is_your_turn, Field, FieldValue, GameState};
use super::store::{self, Projection, Store, StoreHost};
use crate::board;
use crate::ui::{self, View};

/// 会话身份
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    /// 分配的颜色，收到 `color:` 之前为 None
    pub color: Option<Color>,
    /// 会话 ID（仅用于显示）
    pub session_id: Option<String>,
    pub game_id: String,
}

/// 对局会话
pub struct GameSession {
    identity: Identity,
    store: Store<GameSession>,
    selection: Selection,
    promotion: Option<PromotionPrompt>,
    view: View,
    outbox: Vec<Command>,
}

impl StoreHost for GameSession {
    fn store(&self) -> &Store<Self> {
        &self.store
    }

    fn store_mut(&mut self) -> &mut Store<Self> {
        &mut self.store
    }
}

fn projection(f: impl Fn(&mut GameSession, &FieldValue) + 'static) -> Projection<GameSession> {
    Rc::new(f)
}

impl GameSession {
    /// 创建会话（连接建立时）
    pub fn new(game_id: impl Into<String>) -> Self {
        let mut session = Self {
            identity: Identity {
                game_id: game_id.into(),
                ..Default::default()
            },
            store: Store::new(),
            selection: Selection::default(),
            promotion: None,
            view: View::default(),
            outbox: Vec::new(),
        };
        session.register_projections();
        session
    }

    fn register_projections(&mut self) {
        let store = &mut self.store;
        // 回合数变化先重算 yourTurn，棋盘投影据此决定是否挂接点击
        store.register(Field::Turn, projection(Self::project_your_turn));
        store.register(Field::Board, projection(Self::project_board));
        store.register(Field::PossibleMoves, projection(Self::project_highlights));
        store.register(Field::CapturedWhite, projection(Self::project_trays));
        store.register(Field::CapturedBlack, projection(Self::project_trays));
        store.register(Field::History, projection(Self::project_history));
        store.register(Field::GameOver, projection(Self::project_history));
        store.register(Field::GameOver, projection(Self::project_game_over));
        store.register_always(projection(Self::project_status_line));
    }

    // ========================================================================
    // 存储访问
    // ========================================================================

    /// 写入字段并同步执行投影
    pub fn set(&mut self, value: FieldValue) {
        store::set(self, value);
    }

    pub fn get(&self, field: Field) -> FieldValue {
        self.store.get(field)
    }

    pub fn state(&self) -> &GameState {
        self.store.state()
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn promotion(&self) -> Option<&PromotionPrompt> {
        self.promotion.as_ref()
    }

    /// 取出待发送命令
    pub fn drain_outbox(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.outbox)
    }

    // ========================================================================
    // 投影
    // ========================================================================

    fn project_your_turn(&mut self, value: &FieldValue) {
        if let FieldValue::Turn(turn) = value {
            let yours = is_your_turn(*turn, self.identity.color);
            self.set(FieldValue::YourTurn(yours));
        }
    }

    fn project_board(&mut self, value: &FieldValue) {
        let FieldValue::Board(board) = value else {
            return;
        };

        // 升变检测需要刚走到的格子，先取出再清空选择
        let destination = self.selection.destination();
        self.selection.reset();
        self.rebuild_layout();
        self.set(FieldValue::PossibleMoves(BTreeSet::new()));

        self.outbox.push(Command::GetCaptured(Color::White));
        self.outbox.push(Command::GetCaptured(Color::Black));

        self.promotion = PromotionPrompt::detect(board, self.identity.color, destination);
        if let Some(prompt) = &self.promotion {
            tracing::info!("Pawn on {} can be promoted", prompt.square);
        }
    }

    fn project_highlights(&mut self, value: &FieldValue) {
        let FieldValue::PossibleMoves(moves) = value else {
            return;
        };
        let selected = self.selection.source();
        if let Some(layout) = self.view.layout.as_mut() {
            layout.apply_highlights(selected, moves);
        }
    }

    fn project_trays(&mut self, value: &FieldValue) {
        match value {
            FieldValue::CapturedWhite(pieces) => self.view.captured_white = pieces.clone(),
            FieldValue::CapturedBlack(pieces) => self.view.captured_black = pieces.clone(),
            _ => {}
        }
    }

    fn project_history(&mut self, _value: &FieldValue) {
        let state = self.store.state();
        self.view.history_lines = ui::history_lines(&state.history, state.game_over);
        self.view.last_move = ui::last_move(&state.history);
        if let Some(layout) = self.view.layout.as_mut() {
            layout.mark_last_move(self.view.last_move);
        }
    }

    fn project_game_over(&mut self, value: &FieldValue) {
        if let FieldValue::GameOver(true) = value {
            if self.view.layout.is_some() {
                self.rebuild_layout();
            }
        }
    }

    fn project_status_line(&mut self, _value: &FieldValue) {
        let state = self.store.state();
        self.view.status_line = ui::status_line(state.turn, state.status, state.game_over);
    }

    /// 按当前棋盘与颜色重建布局，游戏结束或非本方回合时不挂接点击
    fn rebuild_layout(&mut self) {
        let state = self.store.state();
        let interactive = !state.game_over && state.your_turn;
        let mut layout = board::render(&state.board, self.identity.color, interactive);
        layout.apply_highlights(self.selection.source(), &state.possible_moves);
        layout.mark_last_move(self.view.last_move);
        self.view.layout = Some(layout);
    }

    // ========================================================================
    // 服务端消息
    // ========================================================================

    /// 连接建立后的初始查询
    pub fn on_open(&mut self) {
        self.outbox.extend([
            Command::GetColor,
            Command::GetGameStat,
            Command::GetBoard,
            Command::GetStatus,
        ]);
    }

    /// 处理一条服务端消息，无法识别的消息被忽略
    pub fn handle_message(&mut self, text: &str) {
        match Codec::decode(text) {
            Ok(event) => self.handle_event(event),
            Err(e) => tracing::debug!("Ignoring server message: {}", e),
        }
    }

    /// 处理服务端事件
    pub fn handle_event(&mut self, event: ProtocolEvent) {
        match event {
            ProtocolEvent::Board(board) => {
                let turn = self.state().turn.saturating_add(1);
                self.set(FieldValue::Turn(turn));
                self.set(FieldValue::Board(board));
            }
            ProtocolEvent::Promoted(board) => {
                self.set(FieldValue::Board(board));
            }
            ProtocolEvent::GameStat { status, turn, history } => {
                self.set(FieldValue::Status(status));
                if status == GameStatus::GameOver {
                    self.set(FieldValue::GameOver(true));
                }
                self.set(FieldValue::Turn(turn));
                if !history.is_empty() {
                    self.set(FieldValue::History(history));
                }
            }
            ProtocolEvent::Status(status) => {
                self.set(FieldValue::Status(status));
            }
            ProtocolEvent::AssignedColor(color) => {
                if color.is_none() {
                    tracing::warn!("Server assigned an unrecognized color");
                }
                self.identity.color = color;
                let yours = is_your_turn(self.state().turn, color);
                self.set(FieldValue::YourTurn(yours));
                if self.view.layout.is_some() {
                    self.rebuild_layout();
                }
            }
            ProtocolEvent::SessionId(id) => {
                tracing::info!("Session id: {}", id);
                self.identity.session_id = Some(id);
            }
            ProtocolEvent::Captured { color, pieces } => match color {
                Color::White => self.set(FieldValue::CapturedWhite(pieces)),
                Color::Black => self.set(FieldValue::CapturedBlack(pieces)),
            },
            ProtocolEvent::History(text) => {
                let ends_game = Annotation::detect(&text).is_some_and(|a| a.ends_game());
                let mut history = self.state().history.clone();
                history.push(text);
                self.set(FieldValue::History(history));
                if ends_game {
                    self.set(FieldValue::GameOver(true));
                }
            }
            ProtocolEvent::PossibleMoves { origin, moves } => {
                if self.selection.on_possible_moves(origin, !moves.is_empty()) {
                    self.set(FieldValue::PossibleMoves(moves.into_iter().collect()));
                } else {
                    tracing::debug!("Discarding possible moves for {:?}", origin);
                }
            }
            ProtocolEvent::Error(text) => {
                tracing::warn!("Server rejected command: {}", text);
                self.selection.on_error();
                self.view.notify(text);
            }
            ProtocolEvent::PeerJoined(id) => self.view.notify(format!("{} joined", id)),
            ProtocolEvent::PeerLeft(id) => self.view.notify(format!("{} disconnected", id)),
        }
    }

    // ========================================================================
    // 用户操作
    // ========================================================================

    /// 点击格子，未挂接点击处理的格子直接忽略
    pub fn click(&mut self, square: Square) {
        let attached = self
            .view
            .layout
            .as_ref()
            .is_some_and(|layout| layout.is_interactive(square));
        if !attached {
            tracing::debug!("Click on {} ignored: board is not interactive", square);
            return;
        }

        let state = self.store.state();
        let action = self
            .selection
            .click(square, &state.board, state.turn, &state.possible_moves);

        match action {
            ClickAction::Ignore => tracing::debug!("Click on {} rejected", square),
            ClickAction::Send(command) => self.outbox.push(command),
            ClickAction::Deselect => self.set(FieldValue::PossibleMoves(BTreeSet::new())),
        }
    }

    /// 选择升变棋子，没有待选升变时返回 false
    pub fn choose_promotion(&mut self, piece: PromotionPiece) -> bool {
        match self.promotion.take() {
            Some(prompt) => {
                self.outbox.push(prompt.command(piece));
                true
            }
            None => false,
        }
    }

    /// 执行一条用户输入（`Quit` 由事件循环处理）
    pub fn apply_input(&mut self, input: UserInput) {
        match input {
            UserInput::Click(square) => self.click(square),
            UserInput::Promote(piece) => {
                if !self.choose_promotion(piece) {
                    self.view.notify("no promotion pending");
                }
            }
            UserInput::Refresh => {
                // 先取回合数再取棋盘，棋盘消息会在此基础上加一
                self.outbox.push(Command::GetGameStat);
                self.outbox.push(Command::GetBoard);
            }
            UserInput::Help => self.view.notify(HELP),
            UserInput::Quit => {}
        }
    }

    /// 显示提示信息
    pub fn notify(&mut self, notice: impl Into<String>) {
        self.view.notify(notice);
    }
}
