//! 界面视图
//!
//! 视图由状态存储的投影维护：状态栏、吃子区、历史列表、提示信息。

use protocol::{Color, GameStatus, MoveRecord, Piece, Square};

use crate::board::{paint_board, BoardLayout, TextCanvas};
use crate::game::{mover_of, PromotionPrompt};

/// 提示信息保留条数
const MAX_NOTICES: usize = 5;

/// 视图状态
#[derive(Debug, Clone, Default)]
pub struct View {
    /// 棋盘布局（收到第一份棋盘前为空）
    pub layout: Option<BoardLayout>,
    pub status_line: String,
    pub captured_white: Vec<Piece>,
    pub captured_black: Vec<Piece>,
    pub history_lines: Vec<String>,
    pub last_move: Option<(Square, Square)>,
    notices: Vec<String>,
}

impl View {
    /// 追加提示信息
    pub fn notify(&mut self, notice: impl Into<String>) {
        self.notices.push(notice.into());
        if self.notices.len() > MAX_NOTICES {
            self.notices.remove(0);
        }
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }
}

/// 状态栏文本
pub fn status_line(turn: u32, status: GameStatus, game_over: bool) -> String {
    let mut text = if game_over {
        "Game Over".to_string()
    } else {
        match mover_of(turn) {
            Color::White => "White Turn".to_string(),
            Color::Black => "Black Turn".to_string(),
        }
    };
    if status == GameStatus::Waiting {
        text.push_str(" (Waiting Other Player)");
    }
    text
}

/// 历史列表：`N. <记谱>`，对局结束时追加 `Game Over`
pub fn history_lines(history: &[String], game_over: bool) -> Vec<String> {
    let mut lines: Vec<String> = history
        .iter()
        .enumerate()
        .map(|(idx, text)| format!("{}. {}", idx + 1, text))
        .collect();
    if game_over {
        lines.push("Game Over".to_string());
    }
    lines
}

/// 最后一步走法
pub fn last_move(history: &[String]) -> Option<(Square, Square)> {
    history
        .last()
        .and_then(|text| MoveRecord::parse(text))
        .map(|record| (record.from, record.to))
}

/// 吃子区文本
pub fn tray(pieces: &[Piece]) -> String {
    pieces.iter().map(|p| p.glyph()).collect::<Vec<_>>().join(" ")
}

/// 组合整屏文本
pub fn screen(view: &View, promotion: Option<&PromotionPrompt>, show_labels: bool) -> String {
    let mut out = String::new();
    out.push_str(&view.status_line);
    out.push('\n');
    out.push_str(&format!("captured white: {}\n", tray(&view.captured_white)));

    match &view.layout {
        Some(layout) => {
            let mut canvas = TextCanvas::new(show_labels);
            paint_board(layout, &mut canvas);
            out.push_str(&canvas.finish());
        }
        None => out.push_str("(waiting for board)\n"),
    }

    out.push_str(&format!("captured black: {}\n", tray(&view.captured_black)));

    if let Some(prompt) = promotion {
        let choices: Vec<&str> = prompt.choices().iter().map(|c| c.as_str()).collect();
        out.push_str(&format!(
            "promote {} to: {}\n",
            prompt.square,
            choices.join(" / ")
        ));
    }

    for line in &view.history_lines {
        out.push_str(line);
        out.push('\n');
    }
    for notice in view.notices() {
        out.push_str(&format!("! {}\n", notice));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::PieceKind;

    #[test]
    fn test_status_line() {
        assert_eq!(status_line(1, GameStatus::InProgress, false), "White Turn");
        assert_eq!(status_line(2, GameStatus::InProgress, false), "Black Turn");
        assert_eq!(
            status_line(1, GameStatus::Waiting, false),
            "White Turn (Waiting Other Player)"
        );
        assert_eq!(status_line(5, GameStatus::GameOver, true), "Game Over");
    }

    #[test]
    fn test_history_lines() {
        let history = vec!["Moving White Pawn from e2 to e4".to_string()];
        assert_eq!(
            history_lines(&history, false),
            vec!["1. Moving White Pawn from e2 to e4"]
        );
        assert_eq!(history_lines(&history, true).last().unwrap(), "Game Over");
        assert!(history_lines(&[], false).is_empty());
    }

    #[test]
    fn test_last_move() {
        let history = vec![
            "Moving White Pawn from e2 to e4".to_string(),
            "Moving Black Pawn from e7 to e5".to_string(),
        ];
        let e7 = Square::from_notation("e7").unwrap();
        let e5 = Square::from_notation("e5").unwrap();
        assert_eq!(last_move(&history), Some((e7, e5)));
        assert_eq!(last_move(&[]), None);
    }

    #[test]
    fn test_tray() {
        let pieces = vec![
            Piece::new(PieceKind::Pawn, Color::Black),
            Piece::new(PieceKind::Queen, Color::Black),
        ];
        assert_eq!(tray(&pieces), "♟ ♛");
        assert_eq!(tray(&[]), "");
    }

    #[test]
    fn test_notices_are_bounded() {
        let mut view = View::default();
        for i in 0..8 {
            view.notify(format!("n{}", i));
        }
        assert_eq!(view.notices().len(), MAX_NOTICES);
        assert_eq!(view.notices()[0], "n3");
    }
}
