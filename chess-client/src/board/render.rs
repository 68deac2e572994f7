//! 棋盘绘制
//!
//! 绘制能力由 `Canvas` 提供，`TextCanvas` 输出到终端文本。

use protocol::Piece;

use super::{BoardLayout, Shade, SquareView};

/// 绘制能力
pub trait Canvas {
    /// 绘制一个格子
    fn paint_square(&mut self, view: &SquareView);
    /// 绘制横线标签
    fn paint_rank_label(&mut self, rank: Option<u8>);
    /// 绘制列标签行
    fn paint_file_labels(&mut self, files: &[Option<char>]);
    /// 结束一行
    fn end_row(&mut self);
}

/// 按布局绘制棋盘，标签放在所在格子的一侧
pub fn paint_board(layout: &BoardLayout, canvas: &mut impl Canvas) {
    let rows: Vec<&[SquareView]> = layout.rows().collect();
    let file_row = |row: &[SquareView]| row.iter().map(|v| v.file_label).collect::<Vec<_>>();

    // 黑方视角第 1 横线在顶部，列标签随之翻到上方
    if let Some(top) = rows.first() {
        if top.iter().any(|v| v.file_label.is_some()) {
            canvas.paint_file_labels(&file_row(top));
        }
    }

    for row in &rows {
        let left = row.first().and_then(|v| v.rank_label);
        let right = row.last().and_then(|v| v.rank_label);
        canvas.paint_rank_label(left);
        for view in row.iter() {
            canvas.paint_square(view);
        }
        canvas.paint_rank_label(right);
        canvas.end_row();
    }

    if let Some(bottom) = rows.last() {
        if bottom.iter().any(|v| v.file_label.is_some()) {
            canvas.paint_file_labels(&file_row(bottom));
        }
    }
}

/// 终端文本画布
#[derive(Debug, Default)]
pub struct TextCanvas {
    out: String,
    show_labels: bool,
}

impl TextCanvas {
    pub fn new(show_labels: bool) -> Self {
        Self {
            out: String::new(),
            show_labels,
        }
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn piece_text(piece: Option<Piece>, shade: Shade) -> String {
        match (piece, shade) {
            (Some(piece), _) => piece.glyph().to_string(),
            (None, Shade::Light) => " ".to_string(),
            (None, Shade::Dark) => "·".to_string(),
        }
    }
}

impl Canvas for TextCanvas {
    fn paint_square(&mut self, view: &SquareView) {
        let (open, close) = if view.selected {
            ('[', ']')
        } else if view.path {
            ('(', ')')
        } else if view.last_move {
            ('{', '}')
        } else {
            (' ', ' ')
        };
        let body = if view.path && view.piece.is_none() {
            "•".to_string()
        } else {
            Self::piece_text(view.piece, view.shade)
        };
        self.out.push(open);
        self.out.push_str(&body);
        self.out.push(close);
    }

    fn paint_rank_label(&mut self, rank: Option<u8>) {
        if !self.show_labels {
            return;
        }
        match rank {
            Some(rank) => self.out.push_str(&format!(" {} ", rank)),
            None => self.out.push_str("   "),
        }
    }

    fn paint_file_labels(&mut self, files: &[Option<char>]) {
        if !self.show_labels {
            return;
        }
        self.out.push_str("   ");
        for file in files {
            let label = file.map(|f| f.to_ascii_uppercase()).unwrap_or(' ');
            self.out.push_str(&format!(" {} ", label));
        }
        self.out.push('\n');
    }

    fn end_row(&mut self) {
        self.out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::render as render_layout;
    use protocol::{Board, Color, Square};
    use std::collections::BTreeSet;

    #[test]
    fn test_paint_white_board() {
        let layout = render_layout(&Board::initial(), Some(Color::White), true);
        let mut canvas = TextCanvas::new(true);
        paint_board(&layout, &mut canvas);
        let text = canvas.finish();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 9);
        assert!(lines[0].starts_with(" 8 "));
        assert!(lines[0].contains("♜"));
        assert!(lines[7].starts_with(" 1 "));
        assert!(lines[8].contains('A') && lines[8].contains('H'));
    }

    #[test]
    fn test_paint_black_board_flips_labels() {
        let layout = render_layout(&Board::initial(), Some(Color::Black), true);
        let mut canvas = TextCanvas::new(true);
        paint_board(&layout, &mut canvas);
        let text = canvas.finish();
        let lines: Vec<&str> = text.lines().collect();

        // 列标签在顶部，横线标签在右侧
        assert_eq!(lines.len(), 9);
        assert!(lines[0].contains('H'));
        assert!(lines[1].trim_end().ends_with('1'));
        assert!(lines[8].trim_end().ends_with('8'));
    }

    #[test]
    fn test_paint_highlights() {
        let mut layout = render_layout(&Board::initial(), Some(Color::White), true);
        let e2 = Square::from_notation("e2").unwrap();
        let path: BTreeSet<Square> = [Square::from_notation("e4").unwrap()].into_iter().collect();
        layout.apply_highlights(Some(e2), &path);

        let mut canvas = TextCanvas::new(false);
        paint_board(&layout, &mut canvas);
        let text = canvas.finish();
        assert!(text.contains("[♙]"));
        assert!(text.contains("(•)"));
    }
}
