//! 兵升变流程
//!
//! 棋盘更新后若本方的兵到达底线，提供四种升变选择，选中后发送升变命令。

use protocol::{Board, Color, Command, PromotionPiece, Square};

/// 待选择的升变
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionPrompt {
    pub square: Square,
    pub color: Color,
}

impl PromotionPrompt {
    /// 检测棋盘上可升变的兵，优先选择刚走到的格子
    pub fn detect(board: &Board, color: Option<Color>, preferred: Option<Square>) -> Option<Self> {
        let color = color?;
        let candidates = board.promotable_pawns(color);
        let square = preferred
            .filter(|sq| candidates.contains(sq))
            .or_else(|| candidates.first().copied())?;
        Some(Self { square, color })
    }

    /// 可选棋子
    pub fn choices(&self) -> [PromotionPiece; 4] {
        PromotionPiece::ALL
    }

    /// 选择后的升变命令
    pub fn command(&self, piece: PromotionPiece) -> Command {
        Command::Promote {
            square: self.square,
            piece,
        }
    }
}
