//! 消息类型定义

use std::fmt;

use crate::board::Board;
use crate::piece::{Color, Piece, PromotionPiece, Square};

/// 对局状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameStatus {
    /// 尚未收到或无法识别
    #[default]
    Unknown,
    /// 等待对手加入
    Waiting,
    /// 对局进行中
    InProgress,
    /// 对局结束
    GameOver,
}

impl GameStatus {
    /// 从服务端状态文本解析
    pub fn from_wire(s: &str) -> Self {
        match s.trim() {
            "waiting" => GameStatus::Waiting,
            "playing" => GameStatus::InProgress,
            "game over" => GameStatus::GameOver,
            _ => GameStatus::Unknown,
        }
    }

    /// 服务端状态文本
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Unknown => "unknown",
            GameStatus::Waiting => "waiting",
            GameStatus::InProgress => "playing",
            GameStatus::GameOver => "game over",
        }
    }
}

/// 客户端发送给服务端的命令（每条一行）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 查询本方颜色
    GetColor,
    /// 查询对局概况（状态、回合数、历史）
    GetGameStat,
    /// 查询棋盘
    GetBoard,
    /// 查询对局状态
    GetStatus,
    /// 查询某方被吃掉的棋子
    GetCaptured(Color),
    /// 查询某格棋子的合法落点
    GetPossibleMoves(Square),
    /// 走棋
    Move { from: Square, to: Square },
    /// 王车易位（from 为王，to 为车）
    Castling { from: Square, to: Square },
    /// 兵升变
    Promote { square: Square, piece: PromotionPiece },
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::GetColor => write!(f, "\\get_color"),
            Command::GetGameStat => write!(f, "\\get_game_stat"),
            Command::GetBoard => write!(f, "\\get_board"),
            Command::GetStatus => write!(f, "\\get_status"),
            Command::GetCaptured(color) => write!(f, "\\get_captured {}", color),
            Command::GetPossibleMoves(square) => write!(f, "\\get_possible_moves {}", square),
            Command::Move { from, to } => write!(f, "\\move {} {}", from, to),
            Command::Castling { from, to } => write!(f, "\\castling {} {}", from, to),
            Command::Promote { square, piece } => write!(f, "\\promote {} {}", square, piece),
        }
    }
}

/// 服务端推送的事件（由 `codec::decode` 产生）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolEvent {
    /// 新棋盘（回合数加一）
    Board(Board),
    /// 升变后的棋盘（回合数不变）
    Promoted(Board),
    /// 对局概况
    GameStat {
        status: GameStatus,
        turn: u32,
        history: Vec<String>,
    },
    /// 对局状态变化
    Status(GameStatus),
    /// 分配的颜色，无法识别时为 None
    AssignedColor(Option<Color>),
    /// 会话 ID
    SessionId(String),
    /// 某方被吃掉的棋子
    Captured { color: Color, pieces: Vec<Piece> },
    /// 新的走法记录
    History(String),
    /// 合法落点列表，`origin` 为查询的格子
    PossibleMoves {
        origin: Option<Square>,
        moves: Vec<Square>,
    },
    /// 服务端拒绝了命令
    Error(String),
    /// 对手加入
    PeerJoined(String),
    /// 对手断开
    PeerLeft(String),
}
