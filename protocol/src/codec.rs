//! 文本协议编解码
//!
//! 每次投递是一条完整的逻辑消息（可能多行），按首行前缀分派：
//!
//! ```text
//! board:            后接 8 行棋盘
//! promoted board:   后接 8 行棋盘
//! game stat: <状态> / turn: <n> / histories: / <历史...>
//! status: <状态>
//! color: <white|black>
//! your session_id is <id>
//! captured_white: <字符...>
//! captured_black: <字符...>
//! history: <记谱>
//! possible moves for: / <格子> / <格子列表>
//! Error...
//! ```

use crate::board::Board;
use crate::constants::BOARD_SIZE;
use crate::error::{ProtocolError, Result};
use crate::message::{Command, GameStatus, ProtocolEvent};
use crate::piece::{Color, Piece, Square};

/// 服务端规则错误的前缀，均视为被拒绝的命令
const ERROR_PREFIXES: [&str; 6] = [
    "Error",
    "Castling Error:",
    "Promotion Error:",
    "Invalid Moves:",
    "Invalid Chess Notation:",
    "Game Error:",
];

/// 协议编解码
pub struct Codec;

impl Codec {
    /// 将命令编码为一行文本
    pub fn encode(command: &Command) -> String {
        command.to_string()
    }

    /// 解码一条服务端消息
    ///
    /// 仅当首行前缀无法识别时返回 `MalformedMessage`，消息体的格式问题按空值处理。
    pub fn decode(block: &str) -> Result<ProtocolEvent> {
        let mut lines = block.lines();
        let head = lines.next().unwrap_or_default();

        let event = if head.starts_with("board:") {
            ProtocolEvent::Board(Self::parse_board(lines))
        } else if head.starts_with("promoted") {
            ProtocolEvent::Promoted(Self::parse_board(lines))
        } else if head.starts_with("game stat") {
            Self::parse_game_stat(head, lines)
        } else if head.starts_with("status:") {
            ProtocolEvent::Status(GameStatus::from_wire(Self::value_of(head)))
        } else if head.starts_with("color:") {
            ProtocolEvent::AssignedColor(Self::value_of(head).trim().parse().ok())
        } else if head.starts_with("your session_id") {
            let id = head.split(' ').nth(3).unwrap_or_default();
            ProtocolEvent::SessionId(id.to_string())
        } else if head.starts_with("captured_white") {
            ProtocolEvent::Captured {
                color: Color::White,
                pieces: Self::parse_tray(head),
            }
        } else if head.starts_with("captured_black") {
            ProtocolEvent::Captured {
                color: Color::Black,
                pieces: Self::parse_tray(head),
            }
        } else if head.starts_with("history") {
            ProtocolEvent::History(Self::value_of(head).to_string())
        } else if head.starts_with("possible moves") {
            Self::parse_possible_moves(lines)
        } else if ERROR_PREFIXES.iter().any(|p| head.starts_with(p)) {
            ProtocolEvent::Error(block.trim_end().to_string())
        } else if let Some(id) = head.strip_suffix(" just joined!") {
            ProtocolEvent::PeerJoined(id.to_string())
        } else if let Some(id) = head.strip_suffix(" disconnected.") {
            ProtocolEvent::PeerLeft(id.to_string())
        } else {
            return Err(ProtocolError::MalformedMessage {
                line: head.to_string(),
            });
        };

        Ok(event)
    }

    /// `tag: value` 中的 value，缺少分隔符时为空
    fn value_of(line: &str) -> &str {
        line.split_once(": ").map(|(_, v)| v).unwrap_or_default()
    }

    fn parse_board<'a>(lines: impl Iterator<Item = &'a str>) -> Board {
        Board::from_rows(
            lines
                .take(BOARD_SIZE)
                .map(|row| row.split_whitespace().map(Piece::from_glyph).collect::<Vec<_>>()),
        )
    }

    fn parse_game_stat<'a>(head: &str, mut lines: impl Iterator<Item = &'a str>) -> ProtocolEvent {
        let status = GameStatus::from_wire(head.split_once(':').map(|(_, v)| v).unwrap_or_default());
        let turn: u32 = lines
            .next()
            .map(|line| Self::value_of(line).trim().parse().unwrap_or(0))
            .unwrap_or(0);

        // 历史最多取 turn - 1 条
        let history = lines
            .filter(|line| !line.trim().is_empty() && line.trim() != "histories:")
            .take(turn.saturating_sub(1) as usize)
            .map(str::to_string)
            .collect();

        ProtocolEvent::GameStat {
            status,
            turn,
            history,
        }
    }

    fn parse_tray(head: &str) -> Vec<Piece> {
        head.split(' ')
            .skip(1)
            .filter_map(Piece::from_glyph)
            .collect()
    }

    fn parse_possible_moves<'a>(mut lines: impl Iterator<Item = &'a str>) -> ProtocolEvent {
        let origin = lines.next().and_then(|s| Square::from_notation(s.trim()).ok());
        let moves = lines
            .next()
            .map(|list| {
                list.split_whitespace()
                    .filter_map(|s| Square::from_notation(s).ok())
                    .collect()
            })
            .unwrap_or_default();
        ProtocolEvent::PossibleMoves { origin, moves }
    }
}
