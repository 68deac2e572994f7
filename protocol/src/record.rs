//! 走法记录解析
//!
//! 服务端的历史记谱为自由文本，例如：
//! - `Moving White Pawn from e2 to e4`
//! - `Moving White Queen from d1 to h5, captured Black Pawn Check`
//! - `Castling e1 and h1`

use crate::piece::Square;

/// 记谱附注
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    Check,
    Checkmate,
    Draw,
}

impl Annotation {
    /// 从记谱文本中识别附注
    pub fn detect(text: &str) -> Option<Annotation> {
        if text.contains("Checkmate") {
            Some(Annotation::Checkmate)
        } else if text.contains("Draw") {
            Some(Annotation::Draw)
        } else if text.contains("Check") {
            Some(Annotation::Check)
        } else {
            None
        }
    }

    /// 该附注是否意味着对局结束
    pub fn ends_game(&self) -> bool {
        matches!(self, Annotation::Checkmate | Annotation::Draw)
    }
}

/// 走法记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    /// 起点（易位时为王）
    pub from: Square,
    /// 终点（易位时为车）
    pub to: Square,
    pub annotation: Option<Annotation>,
}

impl MoveRecord {
    /// 解析服务端记谱，无法识别时返回 None
    pub fn parse(text: &str) -> Option<MoveRecord> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let square_after = |word: &str| {
            let idx = tokens.iter().position(|t| *t == word)?;
            let raw = tokens.get(idx + 1)?.trim_end_matches(',');
            Square::from_notation(raw).ok()
        };

        let (from, to) = match tokens.first() {
            Some(&"Moving") => (square_after("from")?, square_after("to")?),
            Some(&"Castling") => (
                Square::from_notation(tokens.get(1)?).ok()?,
                square_after("and")?,
            ),
            _ => return None,
        };

        Some(MoveRecord {
            from,
            to,
            annotation: Annotation::detect(text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_notation(s).unwrap()
    }

    #[test]
    fn test_parse_move() {
        let record = MoveRecord::parse("Moving White Pawn from e2 to e4").unwrap();
        assert_eq!(record.from, sq("e2"));
        assert_eq!(record.to, sq("e4"));
        assert_eq!(record.annotation, None);
    }

    #[test]
    fn test_parse_capture_with_checkmate() {
        let record = MoveRecord::parse(
            "Moving White Queen from h5 to f7, captured Black Pawn Checkmate",
        )
        .unwrap();
        assert_eq!(record.from, sq("h5"));
        assert_eq!(record.to, sq("f7"));
        assert_eq!(record.annotation, Some(Annotation::Checkmate));
        assert!(record.annotation.unwrap().ends_game());
    }

    #[test]
    fn test_parse_castling() {
        let record = MoveRecord::parse("Castling e1 and h1").unwrap();
        assert_eq!(record.from, sq("e1"));
        assert_eq!(record.to, sq("h1"));
    }

    #[test]
    fn test_parse_unknown() {
        assert!(MoveRecord::parse("Undo the moves from e2 to e4").is_none());
        assert!(MoveRecord::parse("Moving White Pawn from z2 to e4").is_none());
        assert!(MoveRecord::parse("").is_none());
    }

    #[test]
    fn test_annotation_detect() {
        assert_eq!(Annotation::detect("... Check"), Some(Annotation::Check));
        assert_eq!(Annotation::detect("... Draw"), Some(Annotation::Draw));
        assert!(!Annotation::Check.ends_game());
        assert!(Annotation::Draw.ends_game());
    }
}
