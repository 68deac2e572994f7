//! 国际象棋客户端
//!
//! 连接对局服务器，在终端中同步显示棋局并完成选子、走子与升变。

pub mod board;
pub mod game;
pub mod network;
pub mod settings;
pub mod ui;
