//! 协议常量定义

use std::time::Duration;

/// 棋盘边长（行数与列数）
pub const BOARD_SIZE: usize = 8;

/// 列字母，按列索引排列
pub const FILES: [char; BOARD_SIZE] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// 服务端用于表示空格子的字符
pub const EMPTY_GLYPH: &str = "⬛";

/// 服务端默认端口
pub const DEFAULT_PORT: u16 = 8080;

/// WebSocket 路由前缀（完整路径为 `/ws/<game_id>`）
pub const WS_PATH: &str = "/ws";

/// 连接超时（秒）
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// 连接超时 Duration
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(CONNECT_TIMEOUT_SECS);
