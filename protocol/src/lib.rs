//! 国际象棋客户端共享协议库
//!
//! 包含:
//! - 格子、棋子、棋盘等核心数据结构
//! - 消息类型定义 (Command, ProtocolEvent)
//! - 文本协议编解码 (Codec)
//! - 走法记录解析 (MoveRecord)
//! - 传输层抽象 (Connector, Connection traits)

mod board;
mod codec;
mod constants;
mod error;
mod message;
mod piece;
mod record;
mod transport;

pub use board::Board;
pub use codec::Codec;
pub use constants::*;
pub use error::{ProtocolError, Result};
pub use message::{Command, GameStatus, ProtocolEvent};
pub use piece::{Color, Piece, PieceKind, PromotionPiece, Square};
pub use record::{Annotation, MoveRecord};
pub use transport::{Connection, Connector, NetworkConfig, WsConnection, WsConnector};
