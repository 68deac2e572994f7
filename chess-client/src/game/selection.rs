//! 走棋选择状态机
//!
//! 选择缓冲区保存 0、1 或 2 个格子：
//! - `Idle`：未选中，可能有一个尚未返回的合法落点查询
//! - `Sourced`：已选中起点，等待点击落点
//! - `AwaitingServer`：已发送走棋/易位命令，等待棋盘更新

use std::collections::BTreeSet;

use protocol::{Board, Command, PieceKind, Square};

use super::state::mover_of;

/// 选择状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Idle,
    /// 已发送合法落点查询，等待服务端返回
    Querying { square: Square },
    Sourced { from: Square },
    AwaitingServer { from: Square, to: Square },
}

/// 点击的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    /// 无操作（本地拒绝）
    Ignore,
    /// 发送命令
    Send(Command),
    /// 取消选择，需要清除合法落点
    Deselect,
}

impl Selection {
    /// 选择缓冲区
    pub fn buffer(&self) -> Vec<Square> {
        match *self {
            Selection::Idle | Selection::Querying { .. } => vec![],
            Selection::Sourced { from } => vec![from],
            Selection::AwaitingServer { from, to } => vec![from, to],
        }
    }

    /// 已选中的起点
    pub fn source(&self) -> Option<Square> {
        self.buffer().first().copied()
    }

    /// 已选中的落点
    pub fn destination(&self) -> Option<Square> {
        match *self {
            Selection::AwaitingServer { to, .. } => Some(to),
            _ => None,
        }
    }

    /// 处理格子点击
    ///
    /// 回合归属由渲染层在创建格子时把关，这里只检查棋子颜色。
    pub fn click(
        &mut self,
        square: Square,
        board: &Board,
        turn: u32,
        possible_moves: &BTreeSet<Square>,
    ) -> ClickAction {
        match *self {
            Selection::Idle | Selection::Querying { .. } => {
                match board.get(square) {
                    Some(piece) if piece.color == mover_of(turn) => {
                        *self = Selection::Querying { square };
                        ClickAction::Send(Command::GetPossibleMoves(square))
                    }
                    _ => ClickAction::Ignore,
                }
            }
            Selection::Sourced { from } if square == from => {
                *self = Selection::Idle;
                ClickAction::Deselect
            }
            Selection::Sourced { from } if possible_moves.contains(&square) => {
                *self = Selection::AwaitingServer { from, to: square };
                ClickAction::Send(Command::Move { from, to: square })
            }
            Selection::Sourced { from } => {
                let castling = match (board.get(from), board.get(square)) {
                    (Some(king), Some(rook)) => {
                        king.kind == PieceKind::King
                            && rook.kind == PieceKind::Rook
                            && king.color == rook.color
                    }
                    _ => false,
                };
                if castling {
                    *self = Selection::AwaitingServer { from, to: square };
                    ClickAction::Send(Command::Castling { from, to: square })
                } else {
                    ClickAction::Ignore
                }
            }
            Selection::AwaitingServer { .. } => ClickAction::Ignore,
        }
    }

    /// 处理合法落点列表，返回是否进入 `Sourced`
    ///
    /// 与当前查询不匹配的过期响应被丢弃。
    pub fn on_possible_moves(&mut self, origin: Option<Square>, has_moves: bool) -> bool {
        match *self {
            Selection::Querying { square } if origin == Some(square) => {
                if has_moves {
                    *self = Selection::Sourced { from: square };
                    true
                } else {
                    *self = Selection::Idle;
                    false
                }
            }
            _ => false,
        }
    }

    /// 服务端拒绝命令：丢弃落点，回到只选中起点
    pub fn on_error(&mut self) {
        if let Selection::AwaitingServer { from, .. } = *self {
            *self = Selection::Sourced { from };
        }
    }

    /// 清空（棋盘更新时）
    pub fn reset(&mut self) {
        *self = Selection::Idle;
    }
}
