//! 错误类型定义

use thiserror::Error;

/// 协议错误类型
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// 未知的消息标签（协议可能扩展，调用方应忽略而非中断）
    #[error("Malformed message: unrecognized tag in {line:?}")]
    MalformedMessage { line: String },

    /// 无效的格子记号
    #[error("Invalid square notation: {0:?}")]
    InvalidSquare(String),

    /// 无效的升变棋子名
    #[error("Invalid promotion piece: {0:?}")]
    InvalidPromotion(String),

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// WebSocket 错误
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// 连接超时
    #[error("Connection timeout")]
    ConnectionTimeout,

    /// 连接已关闭
    #[error("Connection closed")]
    ConnectionClosed,
}

/// 协议操作结果类型
pub type Result<T> = std::result::Result<T, ProtocolError>;
