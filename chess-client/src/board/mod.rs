//! 棋盘渲染模块
//!
//! `render` 是纯投影：由棋盘与本方颜色得到视觉布局，
//! 每个格子绑定规范记号，作为点击处理与高亮的键。

mod render;

pub use render::*;

use std::collections::BTreeSet;

use protocol::{Board, Color, Piece, Square, BOARD_SIZE};

/// 格子底色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    Light,
    Dark,
}

/// 单个格子的视觉状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquareView {
    /// 绑定的格子
    pub square: Square,
    pub piece: Option<Piece>,
    pub shade: Shade,
    /// 横线标签（只在 a 列）
    pub rank_label: Option<u8>,
    /// 列标签（只在第 1 横线）
    pub file_label: Option<char>,
    /// 选中的起点
    pub selected: bool,
    /// 合法落点
    pub path: bool,
    /// 上一步走法
    pub last_move: bool,
}

/// 棋盘布局（按视觉顺序：从上到下、从左到右）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardLayout {
    /// 视角：本方底线总在下方
    pub orientation: Color,
    squares: Vec<SquareView>,
    /// 是否挂接点击处理
    interactive: bool,
}

/// 视觉坐标对应的格子
///
/// 白方视角：视觉 (0, 0) 为 a8；黑方视角行列均反转，视觉 (0, 0) 为 h1。
pub fn square_at(orientation: Color, visual_row: u8, visual_col: u8) -> Square {
    let last = BOARD_SIZE as u8 - 1;
    match orientation {
        Color::White => Square::new_unchecked(last - visual_row, visual_col),
        Color::Black => Square::new_unchecked(visual_row, last - visual_col),
    }
}

/// 渲染棋盘，未分配颜色时按白方视角
pub fn render(board: &Board, color: Option<Color>, interactive: bool) -> BoardLayout {
    let orientation = color.unwrap_or(Color::White);
    let mut squares = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);

    for y in 0..BOARD_SIZE as u8 {
        for x in 0..BOARD_SIZE as u8 {
            let square = square_at(orientation, y, x);
            let shade = if (x + y) % 2 == 0 { Shade::Light } else { Shade::Dark };
            squares.push(SquareView {
                square,
                piece: board.get(square),
                shade,
                rank_label: (square.col == 0).then(|| square.rank()),
                file_label: (square.row == 0).then(|| square.file()),
                selected: false,
                path: false,
                last_move: false,
            });
        }
    }

    BoardLayout {
        orientation,
        squares,
        interactive,
    }
}

impl BoardLayout {
    /// 按视觉行遍历
    pub fn rows(&self) -> impl Iterator<Item = &[SquareView]> {
        self.squares.chunks(BOARD_SIZE)
    }

    /// 视觉坐标处的格子
    pub fn at(&self, visual_row: usize, visual_col: usize) -> Option<&SquareView> {
        if visual_row < BOARD_SIZE && visual_col < BOARD_SIZE {
            self.squares.get(visual_row * BOARD_SIZE + visual_col)
        } else {
            None
        }
    }

    /// 按记号查找格子
    pub fn find(&self, square: Square) -> Option<&SquareView> {
        self.squares.iter().find(|v| v.square == square)
    }

    /// 该格子是否挂接了点击处理
    pub fn is_interactive(&self, square: Square) -> bool {
        self.interactive && self.find(square).is_some()
    }

    pub fn interactive(&self) -> bool {
        self.interactive
    }

    /// 更新选中与合法落点高亮
    pub fn apply_highlights(&mut self, selected: Option<Square>, path: &BTreeSet<Square>) {
        for view in &mut self.squares {
            view.selected = Some(view.square) == selected;
            view.path = path.contains(&view.square);
        }
    }

    /// 标记上一步走法
    pub fn mark_last_move(&mut self, last_move: Option<(Square, Square)>) {
        for view in &mut self.squares {
            view.last_move = last_move.is_some_and(|(from, to)| view.square == from || view.square == to);
        }
    }
}
