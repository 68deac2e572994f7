//! 客户端游戏状态

use std::collections::BTreeSet;

use protocol::{Board, Color, GameStatus, Piece, Square};

/// 状态字段（投影按字段注册）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Board,
    Turn,
    Status,
    History,
    CapturedWhite,
    CapturedBlack,
    GameOver,
    PossibleMoves,
    YourTurn,
}

/// 字段的新值
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Board(Board),
    Turn(u32),
    Status(GameStatus),
    History(Vec<String>),
    CapturedWhite(Vec<Piece>),
    CapturedBlack(Vec<Piece>),
    GameOver(bool),
    PossibleMoves(BTreeSet<Square>),
    YourTurn(bool),
}

impl FieldValue {
    /// 该值所属的字段
    pub fn field(&self) -> Field {
        match self {
            FieldValue::Board(_) => Field::Board,
            FieldValue::Turn(_) => Field::Turn,
            FieldValue::Status(_) => Field::Status,
            FieldValue::History(_) => Field::History,
            FieldValue::CapturedWhite(_) => Field::CapturedWhite,
            FieldValue::CapturedBlack(_) => Field::CapturedBlack,
            FieldValue::GameOver(_) => Field::GameOver,
            FieldValue::PossibleMoves(_) => Field::PossibleMoves,
            FieldValue::YourTurn(_) => Field::YourTurn,
        }
    }
}

/// 对局的规范状态（唯一数据源）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    /// 回合数，奇数为白方走棋
    pub turn: u32,
    pub status: GameStatus,
    /// 走法记谱
    pub history: Vec<String>,
    pub captured_white: Vec<Piece>,
    pub captured_black: Vec<Piece>,
    pub game_over: bool,
    /// 当前选中棋子的合法落点，未选中时为空
    pub possible_moves: BTreeSet<Square>,
    pub your_turn: bool,
}

impl GameState {
    /// 写入字段
    pub fn apply(&mut self, value: FieldValue) {
        match value {
            FieldValue::Board(board) => self.board = board,
            FieldValue::Turn(turn) => self.turn = turn,
            FieldValue::Status(status) => self.status = status,
            FieldValue::History(history) => self.history = history,
            FieldValue::CapturedWhite(pieces) => self.captured_white = pieces,
            FieldValue::CapturedBlack(pieces) => self.captured_black = pieces,
            FieldValue::GameOver(over) => self.game_over = over,
            FieldValue::PossibleMoves(moves) => self.possible_moves = moves,
            FieldValue::YourTurn(yours) => self.your_turn = yours,
        }
    }

    /// 读取字段
    pub fn get(&self, field: Field) -> FieldValue {
        match field {
            Field::Board => FieldValue::Board(self.board.clone()),
            Field::Turn => FieldValue::Turn(self.turn),
            Field::Status => FieldValue::Status(self.status),
            Field::History => FieldValue::History(self.history.clone()),
            Field::CapturedWhite => FieldValue::CapturedWhite(self.captured_white.clone()),
            Field::CapturedBlack => FieldValue::CapturedBlack(self.captured_black.clone()),
            Field::GameOver => FieldValue::GameOver(self.game_over),
            Field::PossibleMoves => FieldValue::PossibleMoves(self.possible_moves.clone()),
            Field::YourTurn => FieldValue::YourTurn(self.your_turn),
        }
    }
}

/// 回合数对应的走子方（奇数白方，偶数黑方）
pub fn mover_of(turn: u32) -> Color {
    if turn % 2 == 1 {
        Color::White
    } else {
        Color::Black
    }
}

/// 是否轮到本方：`(turn mod 2) == (color == white ? 1 : 0)`，未分配颜色按非白方计算
pub fn is_your_turn(turn: u32, color: Option<Color>) -> bool {
    let expected = if color == Some(Color::White) { 1 } else { 0 };
    turn % 2 == expected
}
