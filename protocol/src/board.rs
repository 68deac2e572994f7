//! 棋盘状态

use std::fmt;

use crate::constants::{BOARD_SIZE, EMPTY_GLYPH};
use crate::piece::{Color, Piece, PieceKind, Square};

/// 棋盘
///
/// 按服务端传输顺序存储：第 0 行是第 8 横线，第 7 行是第 1 横线。
/// 每次 `board:` / `promoted` 消息整体替换，不做单格更新。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// 8x8 棋盘，索引为 行 * 8 + 列（传输顺序）
    cells: Vec<Option<Piece>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            cells: vec![None; BOARD_SIZE * BOARD_SIZE],
        }
    }

    /// 创建初始棋盘
    pub fn initial() -> Self {
        use PieceKind::*;
        const BACK_RANK: [PieceKind; BOARD_SIZE] =
            [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut board = Self::empty();
        for col in 0..BOARD_SIZE as u8 {
            let kind = BACK_RANK[col as usize];
            board.set(Square::new_unchecked(0, col), Some(Piece::new(kind, Color::White)));
            board.set(Square::new_unchecked(1, col), Some(Piece::new(Pawn, Color::White)));
            board.set(Square::new_unchecked(6, col), Some(Piece::new(Pawn, Color::Black)));
            board.set(Square::new_unchecked(7, col), Some(Piece::new(kind, Color::Black)));
        }
        board
    }

    /// 从传输顺序的行构建，缺失的行或格子补为空
    pub fn from_rows<I, R>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = Option<Piece>>,
    {
        let mut board = Self::empty();
        for (row, cells) in rows.into_iter().take(BOARD_SIZE).enumerate() {
            for (col, cell) in cells.into_iter().take(BOARD_SIZE).enumerate() {
                board.cells[row * BOARD_SIZE + col] = cell;
            }
        }
        board
    }

    /// 获取传输顺序中 (行, 列) 的棋子
    pub fn cell(&self, row: usize, col: usize) -> Option<Piece> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            self.cells[row * BOARD_SIZE + col]
        } else {
            None
        }
    }

    /// 获取指定格子的棋子
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.cell(Self::row_of(square), square.col as usize)
    }

    /// 设置指定格子的棋子
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        if square.row < BOARD_SIZE as u8 && square.col < BOARD_SIZE as u8 {
            self.cells[Self::row_of(square) * BOARD_SIZE + square.col as usize] = piece;
        }
    }

    /// 格子对应的传输行号
    fn row_of(square: Square) -> usize {
        BOARD_SIZE - 1 - square.row as usize
    }

    /// 指定阵营到达升变横线的兵
    pub fn promotable_pawns(&self, color: Color) -> Vec<Square> {
        let row = color.promotion_row();
        (0..BOARD_SIZE as u8)
            .map(|col| Square::new_unchecked(row, col))
            .filter(|&sq| self.get(sq).is_some_and(|p| p.is(PieceKind::Pawn, color)))
            .collect()
    }
}

/// 按服务端格式输出：8 行，每行 8 个以空格分隔的字符
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                match self.cell(row, col) {
                    Some(piece) => write!(f, "{} ", piece)?,
                    None => write!(f, "{} ", EMPTY_GLYPH)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_board() {
        let board = Board::initial();
        let e1 = Square::from_notation("e1").unwrap();
        let d8 = Square::from_notation("d8").unwrap();
        assert_eq!(board.get(e1), Some(Piece::new(PieceKind::King, Color::White)));
        assert_eq!(board.get(d8), Some(Piece::new(PieceKind::Queen, Color::Black)));
        // 传输顺序第 0 行是黑方底线
        assert_eq!(board.cell(0, 0), Some(Piece::new(PieceKind::Rook, Color::Black)));
        assert_eq!(board.cell(7, 4), Some(Piece::new(PieceKind::King, Color::White)));
    }

    #[test]
    fn test_display_matches_server_format() {
        let text = Board::initial().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0].trim(), "♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜");
        assert_eq!(lines[3].trim(), "⬛ ⬛ ⬛ ⬛ ⬛ ⬛ ⬛ ⬛");
        assert_eq!(lines[7].trim(), "♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖");
    }

    #[test]
    fn test_from_rows_pads_missing_cells() {
        let board = Board::from_rows(vec![vec![Some(Piece::new(PieceKind::King, Color::Black))]]);
        assert_eq!(board.cell(0, 0), Some(Piece::new(PieceKind::King, Color::Black)));
        assert_eq!(board.cell(0, 1), None);
        assert_eq!(board.cell(7, 7), None);
    }

    #[test]
    fn test_promotable_pawns() {
        let mut board = Board::empty();
        assert!(board.promotable_pawns(Color::White).is_empty());
        let a8 = Square::from_notation("a8").unwrap();
        let c1 = Square::from_notation("c1").unwrap();
        board.set(a8, Some(Piece::new(PieceKind::Pawn, Color::White)));
        board.set(c1, Some(Piece::new(PieceKind::Pawn, Color::Black)));

        assert_eq!(board.promotable_pawns(Color::White), vec![a8]);
        assert_eq!(board.promotable_pawns(Color::Black), vec![c1]);
        assert!(Board::initial().promotable_pawns(Color::White).is_empty());
    }
}
